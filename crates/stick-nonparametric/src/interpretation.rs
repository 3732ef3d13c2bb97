//! Plain-language summaries of test outcomes

use stick_effect::EffectSize;

use crate::result::Findings;

/// Format a p-value for prose: four decimals, or `< 0.0001`
pub fn format_p_value(p: f64) -> String {
    if p < 1e-4 {
        "p < 0.0001".to_string()
    } else {
        format!("p = {p:.4}")
    }
}

/// Summary sentence for a test outcome
pub(crate) fn describe(
    findings: &Findings,
    p_value: f64,
    alpha: f64,
    effect: Option<&EffectSize>,
) -> String {
    let mut text = if p_value < alpha {
        format!(
            "Statistically significant ({}, alpha = {alpha}): {}.",
            format_p_value(p_value),
            findings.significant
        )
    } else {
        format!(
            "Not statistically significant ({}, alpha = {alpha}): {}.",
            format_p_value(p_value),
            findings.not_significant
        )
    };
    if let Some(effect) = effect {
        text.push_str(&format!(
            " Effect size {} = {:.3} ({}).",
            effect.name, effect.magnitude, effect.interpretation
        ));
    }
    text
}
