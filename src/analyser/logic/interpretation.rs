use super::types::RegressionResult;

pub const STRONG_FIT: f64 = 0.7;
pub const MODERATE_FIT: f64 = 0.3;
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Plain-language reading of a fitted line for the insights panel.
pub fn interpret_regression(res: &RegressionResult) -> Vec<String> {
    let mut lines = Vec::new();
    let x = &res.x_column;
    let y = &res.y_column;
    let pct = (res.r_squared * 100.0).max(0.0);

    if res.r_squared > STRONG_FIT {
        lines.push(format!(
            "Strong fit: '{x}' explains {pct:.1}% of the variation in '{y}'."
        ));
    } else if res.r_squared > MODERATE_FIT {
        lines.push(format!(
            "Moderate fit: '{x}' explains {pct:.1}% of the variation in '{y}'."
        ));
    } else {
        lines.push(format!(
            "Weak fit: '{x}' only explains {pct:.1}% of the variation in '{y}'. Other factors are likely at play."
        ));
    }

    if res.slope == 0.0 {
        lines.push(format!("'{y}' does not change with '{x}'."));
    } else {
        let direction = if res.slope > 0.0 { "increase" } else { "decrease" };
        lines.push(format!(
            "Each one-unit increase in '{x}' is associated with a {:.4} {direction} in '{y}'.",
            res.slope.abs()
        ));
    }

    match res.diagnostics.slope_p_value {
        Some(p) if p < SIGNIFICANCE_LEVEL => lines.push(format!(
            "The relationship is statistically significant (p = {p:.4})."
        )),
        Some(p) => lines.push(format!(
            "The relationship is not statistically significant (p = {p:.4})."
        )),
        None if res.n_observations <= 2 => lines.push(
            "Only two observations: the line passes through both points and no significance can be assessed."
                .to_owned(),
        ),
        None => {}
    }

    lines
}
