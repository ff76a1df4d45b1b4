use loam::{
    class_distribution, compute_stats, score_batch, score_histogram, AnalysisState, Kmeans,
    Sample, SoilField,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=loam=debug shows the k-means convergence events.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A small field survey: two fertile plots, two acidic ones, one with gaps.
    let samples = vec![
        Sample::new("north-1")
            .with(SoilField::Nitrogen, 310.0)
            .with(SoilField::Phosphorus, 32.0)
            .with(SoilField::Potassium, 260.0)
            .with(SoilField::Ph, 6.7)
            .with(SoilField::OrganicCarbon, 0.9)
            .with(SoilField::SoilMoisture, 48.0)
            .with(SoilField::Zinc, 0.8)
            .with(SoilField::Iron, 5.5)
            .with_soil_type("Loam"),
        Sample::new("north-2")
            .with(SoilField::Nitrogen, 295.0)
            .with(SoilField::Phosphorus, 28.0)
            .with(SoilField::Potassium, 240.0)
            .with(SoilField::Ph, 7.1)
            .with(SoilField::OrganicCarbon, 0.82)
            .with(SoilField::SoilMoisture, 52.0)
            .with_soil_type("Loam"),
        Sample::new("creek-1")
            .with(SoilField::Nitrogen, 140.0)
            .with(SoilField::Phosphorus, 12.0)
            .with(SoilField::Potassium, 110.0)
            .with(SoilField::Ph, 5.1)
            .with(SoilField::OrganicCarbon, 0.4)
            .with(SoilField::SoilMoisture, 68.0)
            .with_soil_type("Clay"),
        Sample::new("creek-2")
            .with(SoilField::Nitrogen, 155.0)
            .with(SoilField::Phosphorus, 9.0)
            .with(SoilField::Potassium, 95.0)
            .with(SoilField::Ph, 5.4)
            .with(SoilField::OrganicCarbon, 0.45)
            .with(SoilField::SoilMoisture, 71.0)
            .with_soil_type("Clay"),
        Sample::new("ridge-1")
            .with(SoilField::Nitrogen, 210.0)
            .with(SoilField::Ph, 8.2),
    ];

    let stats = compute_stats(&samples);
    println!("samples={}", stats.total_samples);
    for field in [SoilField::Nitrogen, SoilField::Ph, SoilField::OrganicCarbon] {
        if let Some(s) = stats.field(field) {
            println!(
                "  {:<14} n={} min={:.2} max={:.2} mean={:.2} std={:.2}",
                field, s.count, s.min, s.max, s.mean, s.std
            );
        }
    }
    println!("soil types: {:?}", stats.soil_types);

    let mut state = AnalysisState::new();
    state.load(samples);

    for c in state.cluster(&Kmeans::new(2).with_seed(2024))? {
        let ids: Vec<&str> = c.samples.iter().map(|s| s.id.as_str()).collect();
        println!("cluster {} [{}] {:?}", c.cluster, c.characteristics, ids);
    }

    for p in state.predict() {
        println!("{} -> {} ({})", p.sample.id, p.score, p.class);
        for r in &p.recommendations {
            println!("    - {r}");
        }
    }

    for pt in state.projection() {
        println!("  {:<8} x={:>8.3} y={:>8.3} cluster={}", pt.id, pt.x, pt.y, pt.cluster);
    }

    let preds = score_batch(state.samples());
    let dist = class_distribution(&preds);
    println!("high={} medium={} low={}", dist.high, dist.medium, dist.low);
    for bin in score_histogram(&preds) {
        println!("  {:>6}: {}", bin.label(), bin.count);
    }

    Ok(())
}
