//! Composition statistics.
//!
//! All functions take the fraction sequence of a validated
//! [`Composition`](crate::Composition): strictly positive entries summing to 1.

/// Σ fractionᵢ × valueᵢ over paired sequences.
pub fn weighted_average(fractions: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(fractions.len(), values.len());
    fractions.iter().zip(values).map(|(f, v)| f * v).sum()
}

/// Ideal mixing entropy −Σ cᵢ ln cᵢ (in units of R).
pub fn mixing_entropy(fractions: &[f64]) -> f64 {
    -fractions.iter().map(|c| c * c.ln()).sum::<f64>()
}

/// sqrt(Σ cᵢ (1 − cᵢ / c̄)²) with c̄ the mean fraction.
///
/// Historically labelled "atomic size difference", but it measures the
/// spread of the fractions themselves; no radii enter the formula.
pub fn size_difference(fractions: &[f64]) -> f64 {
    if fractions.is_empty() {
        return 0.0;
    }
    let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
    fractions
        .iter()
        .map(|c| c * (1.0 - c / mean).powi(2))
        .sum::<f64>()
        .sqrt()
}
