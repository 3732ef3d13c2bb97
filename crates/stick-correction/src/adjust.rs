//! P-value adjustment

use stick_core::{Error, Result};
use tracing::debug;

use crate::method::CorrectionMethod;

/// Adjust a family of p-values for multiple comparisons
///
/// The adjusted values are returned in input order. Step-down methods are
/// made monotone with a running maximum over the ascending p-values,
/// step-up methods with a running minimum from the largest p-value down.
/// Every adjusted value lies in [0, 1] and is never smaller than its raw
/// p-value.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if any p-value is NaN or outside [0, 1].
pub fn correct(p_values: &[f64], method: CorrectionMethod) -> Result<Vec<f64>> {
    if let Some(&bad) = p_values.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(Error::InvalidInput(format!(
            "p-values must lie in [0, 1], got {bad}"
        )));
    }
    let m = p_values.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    debug!(method = method.name(), m, "adjusting p-values");
    let mf = m as f64;

    let adjusted = match method {
        CorrectionMethod::None => p_values.to_vec(),
        CorrectionMethod::Bonferroni => p_values.iter().map(|&p| (p * mf).min(1.0)).collect(),
        CorrectionMethod::Sidak => p_values.iter().map(|&p| sidak(p, mf)).collect(),
        CorrectionMethod::Holm => step_down(p_values, |p, rank| p * (m - rank) as f64),
        CorrectionMethod::HolmSidak => step_down(p_values, |p, rank| sidak(p, (m - rank) as f64)),
        CorrectionMethod::Hochberg => step_up(p_values, |p, rank| p * (m - rank) as f64),
        CorrectionMethod::BenjaminiHochberg => step_up(p_values, |p, rank| p * mf / (rank + 1) as f64),
        CorrectionMethod::BenjaminiYekutieli => {
            let harmonic: f64 = (1..=m).map(|i| 1.0 / i as f64).sum();
            step_up(p_values, |p, rank| p * mf * harmonic / (rank + 1) as f64)
        }
    };

    Ok(adjusted.into_iter().map(|p| p.clamp(0.0, 1.0)).collect())
}

/// `1 − (1 − p)^m`, computed as `−expm1(m·ln1p(−p))` to keep precision for
/// small p
fn sidak(p: f64, m: f64) -> f64 {
    -(m * (-p).ln_1p()).exp_m1()
}

/// Indices of `p_values` in ascending order of p (stable for ties)
fn ascending_order(p_values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..p_values.len()).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));
    order
}

/// Apply `factor(p, rank)` in ascending order and enforce a running maximum
fn step_down(p_values: &[f64], factor: impl Fn(f64, usize) -> f64) -> Vec<f64> {
    let mut adjusted = vec![0.0; p_values.len()];
    let mut running = 0.0f64;
    for (rank, &index) in ascending_order(p_values).iter().enumerate() {
        running = running.max(factor(p_values[index], rank).min(1.0));
        adjusted[index] = running;
    }
    adjusted
}

/// Apply `factor(p, rank)` and enforce a running minimum from the largest p
fn step_up(p_values: &[f64], factor: impl Fn(f64, usize) -> f64) -> Vec<f64> {
    let mut adjusted = vec![0.0; p_values.len()];
    let mut running = 1.0f64;
    for (rank, &index) in ascending_order(p_values).iter().enumerate().rev() {
        running = running.min(factor(p_values[index], rank));
        adjusted[index] = running;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const P: [f64; 4] = [0.01, 0.04, 0.03, 0.005];

    fn assert_all_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_none_passes_through() {
        assert_eq!(correct(&P, CorrectionMethod::None).unwrap(), P.to_vec());
    }

    #[test]
    fn test_bonferroni() {
        let adjusted = correct(&[0.01, 0.3, 0.02], CorrectionMethod::Bonferroni).unwrap();
        assert_all_close(&adjusted, &[0.03, 0.9, 0.06]);
        let adjusted = correct(&[0.5], CorrectionMethod::Bonferroni).unwrap();
        assert_eq!(adjusted, vec![0.5]);
    }

    #[test]
    fn test_holm() {
        // sorted: 0.005·4, 0.01·3, 0.03·2, 0.04·1 → 0.02, 0.03, 0.06, max(0.04, 0.06)
        let adjusted = correct(&P, CorrectionMethod::Holm).unwrap();
        assert_all_close(&adjusted, &[0.03, 0.06, 0.06, 0.02]);
    }

    #[test]
    fn test_hochberg() {
        // sorted factors 0.02, 0.03, 0.06, 0.04; running min from the top
        let adjusted = correct(&P, CorrectionMethod::Hochberg).unwrap();
        assert_all_close(&adjusted, &[0.03, 0.04, 0.04, 0.02]);
    }

    #[test]
    fn test_benjamini_hochberg() {
        // sorted: 0.005·4/1, 0.01·4/2, 0.03·4/3, 0.04·4/4
        let adjusted = correct(&P, CorrectionMethod::BenjaminiHochberg).unwrap();
        assert_all_close(&adjusted, &[0.02, 0.04, 0.04, 0.02]);
    }

    #[test]
    fn test_benjamini_yekutieli_scales_bh() {
        let bh = correct(&P, CorrectionMethod::BenjaminiHochberg).unwrap();
        let by = correct(&P, CorrectionMethod::BenjaminiYekutieli).unwrap();
        let c = 1.0 + 0.5 + 1.0 / 3.0 + 0.25;
        for (b, y) in bh.iter().zip(&by) {
            assert_abs_diff_eq!(*y, (b * c).min(1.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sidak() {
        let adjusted = correct(&[0.05, 0.5], CorrectionMethod::Sidak).unwrap();
        assert_abs_diff_eq!(adjusted[0], 1.0 - 0.95f64.powi(2), epsilon = 1e-12);
        assert_abs_diff_eq!(adjusted[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_holm_sidak() {
        let adjusted = correct(&[0.01, 0.02], CorrectionMethod::HolmSidak).unwrap();
        assert_abs_diff_eq!(adjusted[0], 1.0 - 0.99f64.powi(2), epsilon = 1e-12);
        assert_abs_diff_eq!(adjusted[1], 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_family() {
        assert!(correct(&[], CorrectionMethod::Holm).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_p_values() {
        assert!(matches!(
            correct(&[0.1, 1.5], CorrectionMethod::Bonferroni),
            Err(Error::InvalidInput(_))
        ));
        assert!(correct(&[f64::NAN], CorrectionMethod::None).is_err());
        assert!(correct(&[-0.01], CorrectionMethod::None).is_err());
    }
}
