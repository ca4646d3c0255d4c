/// Default number of significant figures used by the built-in renderers
pub const DEFAULT_SIGNIFICANT_FIGURES: u32 = 3;

/// Round `number` to `figures` significant figures.
///
/// `figures` below 1 is treated as 1. Zero and non-finite values pass through.
pub fn sigfigs(number: f64, figures: u32) -> f64 {
    if number == 0.0 || !number.is_finite() {
        return number;
    }
    let figures = figures.max(1) as i32;
    let magnitude = number.abs().log10().floor() as i32;
    let decimals = figures - magnitude - 1;
    let factor = 10f64.powi(decimals);
    (number * factor).round() / factor
}
