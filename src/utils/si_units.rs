// SI prefix scaling for report columns

/// Base unit for operations per second
pub const BASE_OPS_PER_INTERVAL_UNIT: &str = "Ops/s";
/// Base unit for timings
pub const BASE_INTERVAL_UNIT: &str = "s";
/// Base unit for memory
pub const BASE_MEMORY_UNIT: &str = "bytes";

/// (threshold, prefix, multiplier to convert base values into the prefixed unit)
const SI_PREFIXES: [(f64, &str, f64); 11] = [
    (1e15, "P", 1e-15),
    (1e12, "T", 1e-12),
    (1e9, "G", 1e-9),
    (1e6, "M", 1e-6),
    (1e3, "k", 1e-3),
    (1.0, "", 1.0),
    (1e-3, "m", 1e3),
    (1e-6, "μ", 1e6),
    (1e-9, "n", 1e9),
    (1e-12, "p", 1e12),
    (1e-15, "f", 1e15),
];

/// Unit and scale factor suited to the smallest non-zero magnitude in `numbers`.
///
/// Multiply values by the returned factor to express them in the returned unit.
/// When every value is zero (or there are none) the base unit and `1.0` come back.
pub fn si_scale_for_smallest(numbers: &[f64], base_unit: &str) -> (String, f64) {
    let smallest = numbers
        .iter()
        .filter(|n| **n != 0.0 && n.is_finite())
        .map(|n| n.abs())
        .fold(f64::INFINITY, f64::min);

    if !smallest.is_finite() {
        return (base_unit.to_string(), 1.0);
    }

    let (_, prefix, scale) = SI_PREFIXES
        .iter()
        .find(|(threshold, _, _)| smallest >= *threshold)
        .copied()
        .unwrap_or(SI_PREFIXES[SI_PREFIXES.len() - 1]);

    (format!("{}{}", prefix, base_unit), scale)
}
