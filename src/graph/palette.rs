//! Deterministic color assignment for entity types.

use std::collections::BTreeMap;

/// Okabe–Ito colorblind-safe palette.
pub const PALETTE: [&str; 7] = [
    "#E69F00", "#56B4E9", "#009E73", "#F0E442", "#0072B2", "#D55E00", "#CC79A7",
];

/// Color for types outside the palette map (unknown or empty type).
pub const FALLBACK: &str = "#999999";

/// Assign palette colors to entity types.
///
/// Types are sorted before indexing, so re-running on the same data yields
/// identical colors; the palette wraps modulo its length when there are more
/// distinct types than colors.
pub fn assign<'a>(types: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    let sorted: std::collections::BTreeSet<&str> =
        types.into_iter().filter(|t| !t.is_empty()).collect();
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), PALETTE[i % PALETTE.len()].to_string()))
        .collect()
}
