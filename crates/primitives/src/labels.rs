//! Canonical vocabularies and label normalization.

/// Known regions, in their preferred display order.
pub const CANONICAL_REGIONS: [&str; 5] =
    ["Eastern", "North Western", "Northern", "Southern", "Western Area"];

/// Known commodities, in their preferred display order.
pub const CANONICAL_COMMODITIES: [&str; 3] = ["Fish (bonga)", "Rice (imported)", "Oil (palm)"];

/// Commodity assigned to every row of a single-series dataset.
pub const SINGLE_SERIES_COMMODITY: &str = "Commodity";

/// Commodity assigned to a wide-form row with no active commodity flag.
pub const UNKNOWN_COMMODITY: &str = "Unknown";

/// Trimmed, lowercased form used for label comparisons.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed label equality.
#[must_use]
pub fn labels_match(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}

/// Order a vocabulary: canonical entries first in canonical order, then
/// every other value in encounter order. Duplicates are removed.
pub fn canonical_order<'a, I>(values: I, canonical: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }

    let mut ordered: Vec<String> = Vec::with_capacity(seen.len());
    for canon in canonical {
        if let Some(hit) = seen.iter().find(|v| labels_match(v, canon)) {
            ordered.push((*hit).to_string());
        }
    }
    for value in seen {
        if !ordered.iter().any(|o| o == value) {
            ordered.push(value.to_string());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_first_then_encounter_order() {
        let ordered = canonical_order(
            ["Kenema", "Southern", "Bo", "Eastern", "Kenema"],
            &CANONICAL_REGIONS,
        );
        assert_eq!(ordered, vec!["Eastern", "Southern", "Kenema", "Bo"]);
    }

    #[test]
    fn label_matching_ignores_case_and_padding() {
        assert!(labels_match("  western area", "Western Area"));
        assert!(!labels_match("Western", "Western Area"));
    }
}
