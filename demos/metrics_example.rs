use compdist::metrics::{
    self, bray_curtis, hellinger, jensen_shannon_distance, kullback_leibler, normalize,
    sorensen_dice,
};
use compdist::{Metric, MetricReport, datasets};
use ndarray::array;

fn main() -> anyhow::Result<()> {
    println!("=== Metric Battery: V1 vs V2 ===\n");

    let v1 = datasets::v1();
    let v2 = datasets::v2();
    println!("V1: {} values, sum {:.6}", v1.len(), v1.sum());
    println!("V2: {} values, sum {:.6}\n", v2.len(), v2.sum());

    let report = MetricReport::compute(&v1, &v2)?;
    print!("{report}");

    println!("\n=== Probability metrics on normalized profiles ===");
    let p = normalize(&v1);
    let q = normalize(&v2);
    println!("Hellinger:        {:.6}", hellinger(&p, &q)?);
    println!("Jensen-Shannon:   {:.6}", jensen_shannon_distance(&p, &q)?);
    println!("KL(P || Q):       {}", kullback_leibler(&p, &q)?);
    println!("KL(Q || P):       {:.6}", kullback_leibler(&q, &p)?);
    println!("(KL(P || Q) is infinite: V2 has zeros where V1 does not)");

    println!("\n=== Degenerate inputs ===");
    let constant = array![2.0, 2.0, 2.0];
    let ramp = array![1.0, 2.0, 3.0];
    match metrics::pearson(&constant, &ramp)? {
        Some(r) => println!("Pearson r: {r:.4}"),
        None => println!("Pearson r: undefined for a constant vector"),
    }
    let zeros = array![0.0, 0.0, 0.0];
    println!(
        "Bray-Curtis / Sorensen-Dice of two zero vectors: {} / {}",
        bray_curtis(&zeros, &zeros)?,
        sorensen_dice(&zeros, &zeros)?
    );

    println!("\n=== Every named metric ===");
    for metric in [
        Metric::Euclidean,
        Metric::Manhattan,
        Metric::Chebyshev,
        Metric::Cosine,
        Metric::BrayCurtis,
        Metric::Ruzicka,
        Metric::Canberra,
        Metric::SorensenDice,
        Metric::Overlap,
        Metric::Hellinger,
        Metric::JensenShannon,
        Metric::Bhattacharyya,
        Metric::Wasserstein,
        Metric::PearsonCorrelation,
        Metric::SpearmanRankCorrelation,
    ] {
        println!("{:<28} {:.6}", metric.caption(), metric.distance(&v1, &v2)?);
    }

    Ok(())
}
