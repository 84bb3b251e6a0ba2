use compdist::{AgglomerativeClustering, Dendrogram, DistanceSort, Figure, Linkage, Panel, datasets};

fn main() -> anyhow::Result<()> {
    println!("=== Linkage Comparison: SN-1,2,3 Hellinger distances ===\n");

    let distances = datasets::sn123_hellinger()?;
    let mut figure = Figure::new();

    for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
        let mut model = AgglomerativeClustering::new(linkage);
        let labels = model.fit_predict(&distances)?;
        let Some(linkage_matrix) = model.linkage_matrix.as_ref() else {
            continue;
        };

        println!("Dendrogram (Linkage = {linkage})");
        print!("{linkage_matrix}");
        if let Some(c) = linkage_matrix.cophenetic_correlation(&distances)? {
            println!("Cophenetic correlation: {c:.4}");
        }
        println!("Two clusters: {labels:?}");

        let dendrogram =
            Dendrogram::new(linkage_matrix, distances.labels(), DistanceSort::Descending)?;
        println!("{}\n", dendrogram.to_text());
        figure.push(Panel::for_linkage(linkage, "Hellinger Distance", dendrogram));
    }

    let path = std::env::temp_dir().join("sn123_linkages.svg");
    figure.save_svg(&path)?;
    println!("Figure written to {}", path.display());

    Ok(())
}
