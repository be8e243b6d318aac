//! Label lookup tables: explanation text and severity bands.
//!
//! Both tables are keyed by the **lowercased** label, so `"Anxiety"`,
//! `"ANXIETY"` and `"anxiety"` resolve to the same entry. Labels outside the
//! tables are not an error: they get the fallback explanation and the
//! [`SeverityBand::Uncertain`] band.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display grouping derived from label identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// Distress-related labels (negative/alert).
    Alert,
    /// Balanced or positive labels.
    Benign,
    /// Anything the catalog does not know.
    Uncertain,
}

impl SeverityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Benign => "benign",
            Self::Uncertain => "uncertain",
        }
    }

    /// Colored marker shown next to the label.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Alert => "🔴",
            Self::Benign => "🟢",
            Self::Uncertain => "🟡",
        }
    }
}

/// Explanation used when the primary label has no dedicated entry.
pub const FALLBACK_EXPLANATION: &str =
    "The model detected emotional cues that align with this category.";

const EXPLANATIONS: &[(&str, &str)] = &[
    (
        "depression",
        "The text might contain signs of hopelessness, sadness, or self-deprecating language often associated with depressive thoughts.",
    ),
    (
        "anxiety",
        "The text may include language reflecting excessive worry, fear, or tension commonly seen in anxious expressions.",
    ),
    (
        "suicidal ideation",
        "The AI may have detected phrases indicating self-harm, hopelessness, or thoughts about ending one’s life.",
    ),
    (
        "neutral",
        "The text seems emotionally balanced with no significant distress signals detected.",
    ),
    (
        "positive",
        "The content reflects optimism, calmness, or healthy emotional expression.",
    ),
];

const BANDS: &[(&str, SeverityBand)] = &[
    ("depression", SeverityBand::Alert),
    ("anxiety", SeverityBand::Alert),
    ("suicidal ideation", SeverityBand::Alert),
    ("positive", SeverityBand::Benign),
    ("neutral", SeverityBand::Benign),
];

/// Immutable label tables, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    explanations: HashMap<String, String>,
    bands: HashMap<String, SeverityBand>,
    fallback_explanation: String,
}

impl LabelCatalog {
    /// Tables for the mental-health classification model.
    pub fn mental_health() -> Self {
        Self::from_entries(
            EXPLANATIONS.iter().map(|(k, v)| (*k, *v)),
            BANDS.iter().copied(),
            FALLBACK_EXPLANATION,
        )
    }

    /// Build a catalog from arbitrary entries. Keys are lowercased on insert.
    pub fn from_entries<'a>(
        explanations: impl IntoIterator<Item = (&'a str, &'a str)>,
        bands: impl IntoIterator<Item = (&'a str, SeverityBand)>,
        fallback_explanation: impl Into<String>,
    ) -> Self {
        Self {
            explanations: explanations
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            bands: bands
                .into_iter()
                .map(|(k, b)| (k.to_lowercase(), b))
                .collect(),
            fallback_explanation: fallback_explanation.into(),
        }
    }

    /// Explanation for `label`, or the fallback string.
    pub fn explain(&self, label: &str) -> &str {
        self.explanations
            .get(&label.to_lowercase())
            .map(String::as_str)
            .unwrap_or(self.fallback_explanation.as_str())
    }

    /// Whether `label` has a dedicated explanation.
    pub fn is_known(&self, label: &str) -> bool {
        self.explanations.contains_key(&label.to_lowercase())
    }

    pub fn band(&self, label: &str) -> SeverityBand {
        self.bands
            .get(&label.to_lowercase())
            .copied()
            .unwrap_or(SeverityBand::Uncertain)
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::mental_health()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distress_labels_are_alert_in_any_case() {
        let catalog = LabelCatalog::mental_health();
        for label in [
            "depression",
            "Depression",
            "ANXIETY",
            "Anxiety",
            "suicidal ideation",
            "Suicidal Ideation",
        ] {
            assert_eq!(catalog.band(label), SeverityBand::Alert, "label {label}");
        }
    }

    #[test]
    fn positive_and_neutral_are_benign_in_any_case() {
        let catalog = LabelCatalog::mental_health();
        for label in ["positive", "Positive", "NEUTRAL", "Neutral"] {
            assert_eq!(catalog.band(label), SeverityBand::Benign, "label {label}");
        }
    }

    #[test]
    fn unknown_label_falls_back() {
        let catalog = LabelCatalog::mental_health();
        assert_eq!(catalog.band("Joyful"), SeverityBand::Uncertain);
        assert_eq!(catalog.explain("Joyful"), FALLBACK_EXPLANATION);
        assert!(!catalog.is_known("Joyful"));
    }

    #[test]
    fn label_lookup_does_not_trim() {
        let catalog = LabelCatalog::mental_health();
        assert_eq!(catalog.band(" anxiety"), SeverityBand::Uncertain);
    }

    #[test]
    fn explanations_cover_the_closed_set() {
        let catalog = LabelCatalog::mental_health();
        for label in ["depression", "anxiety", "suicidal ideation", "neutral", "positive"] {
            assert!(catalog.is_known(label), "label {label}");
            assert_ne!(catalog.explain(label), FALLBACK_EXPLANATION);
        }
        assert!(catalog.explain("Anxiety").contains("excessive worry"));
    }

    #[test]
    fn custom_catalog_lowercases_keys() {
        let catalog = LabelCatalog::from_entries(
            [("Joy", "Happy text.")],
            [("Joy", SeverityBand::Benign)],
            "Something else.",
        );
        assert_eq!(catalog.explain("JOY"), "Happy text.");
        assert_eq!(catalog.band("joy"), SeverityBand::Benign);
        assert_eq!(catalog.explain("anger"), "Something else.");
    }

    #[test]
    fn band_indicators_are_distinct() {
        assert_eq!(SeverityBand::Alert.indicator(), "🔴");
        assert_eq!(SeverityBand::Benign.indicator(), "🟢");
        assert_eq!(SeverityBand::Uncertain.indicator(), "🟡");
        assert_eq!(SeverityBand::Alert.as_str(), "alert");
    }
}
