//! Field names and value encodings of serialized results

use anyhow::Result;
use stick_core::{Alternative, Precision};
use stick_nonparametric::{HighPrecisionNonParametric, NonParametricConfig};

const COMMON_FIELDS: [&str; 15] = [
    "test_name",
    "statistic",
    "p_value",
    "p_value_method",
    "alternative",
    "sample_sizes",
    "effect_size",
    "mean_ranks",
    "rank_sums",
    "ties_present",
    "ties_correction_applied",
    "alpha",
    "significant",
    "interpretation",
    "extras",
];

#[test]
fn every_test_shares_the_field_set() -> Result<()> {
    let engine = HighPrecisionNonParametric::default();
    let a = [1.0, 3.0, 5.0, 7.0];
    let b = [2.0, 4.0, 6.0, 9.0];
    let c = [8.0, 10.0, 11.0, 12.0];
    let blocks = vec![a.to_vec(), b.to_vec(), c.to_vec()];

    let results = [
        engine.mann_whitney_u(&a, &b, Alternative::TwoSided)?,
        engine.wilcoxon_signed_rank(&a, &b, Alternative::TwoSided)?,
        engine.wilcoxon_one_sample(&a, 4.5, Alternative::TwoSided)?,
        engine.kruskal_wallis(&[&a, &b, &c])?,
        engine.friedman(&blocks)?,
        engine.sign_test(&a, &b, Alternative::TwoSided)?,
        engine.mood_median(&[&a, &b, &c])?,
        engine.jonckheere_terpstra(&[&a, &b, &c], Alternative::Greater)?,
        engine.page_trend(&blocks)?,
    ];
    for result in &results {
        let json = result.to_json()?;
        let object = json.as_object().unwrap();
        for field in COMMON_FIELDS {
            assert!(object.contains_key(field), "{} lacks {field}", result.test_name);
        }
        assert!(json["statistic"].is_string());
        assert!(json["p_value"].is_string());
    }
    Ok(())
}

#[test]
fn decimals_are_strings_and_counts_are_integers() -> Result<()> {
    let engine = HighPrecisionNonParametric::default();
    let result = engine.sign_test(&[5.0, 6.0, 7.0, 8.0], &[1.0, 2.0, 3.0, 4.0], Alternative::TwoSided)?;
    let json = result.to_json()?;
    assert_eq!(json["p_value"], "0.125");
    assert_eq!(json["p_value_method"], "exact");
    assert_eq!(json["alternative"], "two-sided");
    assert_eq!(json["extras"]["n_positive"], 4);
    assert_eq!(json["significant"], false);
    Ok(())
}

#[test]
fn effect_size_serializes_with_its_name() -> Result<()> {
    let engine = HighPrecisionNonParametric::default();
    let result = engine.mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], Alternative::TwoSided)?;
    let json = result.to_json()?;
    assert_eq!(json["effect_size"]["name"], "rank_biserial_r");
    assert_eq!(json["effect_size"]["value"], "1");
    assert_eq!(json["effect_size"]["interpretation"], "large");
    Ok(())
}

#[test]
fn post_hoc_comparisons_are_keyed_by_label() -> Result<()> {
    let engine = HighPrecisionNonParametric::default();
    let groups: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]];
    let json = engine
        .dunn_test(&groups, Some(&["placebo", "low", "high"]))?
        .to_json()?;
    let comparisons = json["comparisons"].as_object().unwrap();
    assert_eq!(comparisons.len(), 3);
    assert!(comparisons.contains_key("placebo_vs_high"));
    assert!(json["comparisons"]["low_vs_high"]["adjusted_p_value"].is_string());
    assert_eq!(json["correction_method"], "bonferroni");
    Ok(())
}

#[test]
fn precision_limits_significant_digits() -> Result<()> {
    let config = NonParametricConfig::default().with_precision(Precision::new(4)?);
    let engine = HighPrecisionNonParametric::new(config)?;
    let groups: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]];
    let result = engine.kruskal_wallis(&groups)?;
    // e^-3.6 = 0.02732372...
    assert_eq!(result.p_value.to_string(), "0.02732");
    Ok(())
}
