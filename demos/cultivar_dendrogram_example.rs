use compdist::{AgglomerativeClustering, Dendrogram, DistanceSort, Figure, Linkage, Panel, datasets};

fn main() -> anyhow::Result<()> {
    println!("=== Oil cultivars: single linkage ===\n");

    let distances = datasets::cultivar_hellinger()?;
    let mut model = AgglomerativeClustering::new(Linkage::Single).n_clusters(2);
    let labels = model.fit_predict(&distances)?;
    let Some(linkage_matrix) = model.linkage_matrix.as_ref() else {
        anyhow::bail!("no linkage matrix after fitting");
    };

    print!("{linkage_matrix}");
    for (label, cluster) in distances.labels().iter().zip(&labels) {
        println!("  {label:<30} cluster {cluster}");
    }

    let dendrogram = Dendrogram::new(linkage_matrix, distances.labels(), DistanceSort::Descending)?;
    println!("\n{}", dendrogram.to_text());

    let path = std::env::temp_dir().join("cultivar_single.svg");
    Figure::new()
        .panel(Panel::new(
            "Dendrogram (Single Linkage)",
            "Hellinger Distance",
            dendrogram,
        ))
        .save_svg(&path)?;
    println!("Figure written to {}", path.display());

    Ok(())
}
