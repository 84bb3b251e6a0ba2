use compdist::{
    AgglomerativeClustering, Dendrogram, DistanceMatrix, DistanceSort, Linkage, Metric, datasets,
};

fn main() -> anyhow::Result<()> {
    println!("=== Pairwise distances between random composition profiles ===\n");

    let profiles = datasets::random_profiles(6, 12, 7)?;
    let labels: Vec<String> = (1..=6).map(|i| format!("S{i}")).collect();
    println!(
        "Profiles: {} samples, {} components each\n",
        profiles.nrows(),
        profiles.ncols()
    );

    for metric in [
        Metric::Hellinger,
        Metric::JensenShannon,
        Metric::BrayCurtis,
        Metric::PearsonCorrelation,
    ] {
        let distances = DistanceMatrix::pairwise(labels.clone(), &profiles, metric)?;
        println!("{metric}: condensed {:.3}", distances.condensed());

        let mut model = AgglomerativeClustering::new(Linkage::Average).n_clusters(3);
        let clusters = model.fit_predict(&distances)?;
        println!("  average linkage, k = 3: {clusters:?}");

        if let Some(linkage_matrix) = model.linkage_matrix.as_ref() {
            let dendrogram =
                Dendrogram::new(linkage_matrix, distances.labels(), DistanceSort::Ascending)?;
            println!("{}\n", dendrogram.to_text());
        }
    }

    Ok(())
}
