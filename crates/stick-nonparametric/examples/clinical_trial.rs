//! Non-parametric analysis of a small three-arm dose trial
//!
//! Run with `RUST_LOG=debug` to see which p-value method each test selects.

use stick_core::Alternative;
use stick_correction::CorrectionMethod;
use stick_nonparametric::{HighPrecisionNonParametric, NonParametricConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Dose trial: pain scores after 4 weeks ===\n");

    let placebo = [6.1, 7.0, 5.8, 6.6, 7.3, 6.9, 6.2];
    let low = [5.2, 6.0, 5.9, 4.8, 6.3, 5.5, 5.0];
    let high = [3.9, 4.6, 5.1, 4.2, 3.5, 4.8, 4.4];

    let config = NonParametricConfig::default()
        .with_alpha(0.05)
        .with_correction(CorrectionMethod::Holm);
    let engine = HighPrecisionNonParametric::new(config)?;

    // 1. Two arms
    println!("1. Placebo vs high dose");
    let mw = engine.mann_whitney_u(&placebo, &high, Alternative::Greater)?;
    println!("  U = {}, p = {} ({:?})", mw.statistic, mw.p_value, mw.p_value_method);
    println!("  {}", mw.interpretation);

    // 2. All arms, then pairwise follow-up
    println!("\n2. All arms");
    let groups: [&[f64]; 3] = [&placebo, &low, &high];
    let kw = engine.kruskal_wallis(&groups)?;
    println!("  H = {}, p = {}", kw.statistic, kw.p_value);
    for note in &kw.recommendations {
        println!("  note: {note}");
    }
    if kw.significant {
        let dunn = engine.dunn_test(&groups, Some(&["placebo", "low", "high"]))?;
        for c in &dunn.comparisons {
            println!(
                "  {:<16} z = {}  adjusted p = {}{}",
                c.label(),
                c.z_statistic.with_prec(6),
                c.adjusted_p_value.with_prec(6),
                if c.significant { "  *" } else { "" }
            );
        }
    }

    // 3. Ordered alternative: pain falls with dose
    println!("\n3. Dose-response trend");
    let jt = engine.jonckheere_terpstra(&groups, Alternative::Less)?;
    println!("  J = {}, p = {}", jt.statistic, jt.p_value);

    // 4. Serialized record for a report
    println!("\n4. JSON record");
    println!("{}", serde_json::to_string_pretty(&kw.to_json()?)?);

    Ok(())
}
