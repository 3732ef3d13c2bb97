//! Invariants over generated data

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use stick_core::Alternative;
use stick_nonparametric::HighPrecisionNonParametric;

/// Integer-valued samples so that ties are common
fn sample(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u8..12).prop_map(f64::from), 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mann_whitney_is_symmetric(x in sample(25), y in sample(25)) {
        let engine = HighPrecisionNonParametric::default();
        let xy = engine.mann_whitney_u(&x, &y, Alternative::TwoSided).unwrap();
        let yx = engine.mann_whitney_u(&y, &x, Alternative::TwoSided).unwrap();
        prop_assert_eq!(xy.statistic_f64(), yx.statistic_f64());
        assert_abs_diff_eq!(xy.p_value_f64(), yx.p_value_f64(), epsilon = 1e-12);
    }

    #[test]
    fn effect_sizes_stay_in_range(
        a in sample(15),
        b in sample(15),
        c in sample(15),
    ) {
        let engine = HighPrecisionNonParametric::default();
        let r = engine.rank_biserial_correlation(&a, &b).unwrap().magnitude;
        prop_assert!((-1.0..=1.0).contains(&r));

        let eps = engine.epsilon_squared(&[a.as_slice(), b.as_slice(), c.as_slice()]).unwrap().magnitude;
        prop_assert!((0.0..=1.0).contains(&eps));

        let n = a.len().min(b.len()).min(c.len()).max(2);
        let blocks: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                vec![
                    a[i % a.len()],
                    b[i % b.len()],
                    c[i % c.len()],
                ]
            })
            .collect();
        let w = engine.kendalls_w(&blocks).unwrap().magnitude;
        prop_assert!((0.0..=1.0).contains(&w));
    }

    #[test]
    fn p_values_are_probabilities(x in sample(30), y in sample(30)) {
        let engine = HighPrecisionNonParametric::default();
        for alternative in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
            let p = engine.mann_whitney_u(&x, &y, alternative).unwrap().p_value_f64();
            prop_assert!((0.0..=1.0).contains(&p));
        }
        let p = engine.mood_median(&[x.as_slice(), y.as_slice()]).unwrap().p_value_f64();
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
