//! Classification results and the ordering rules applied to them.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::labels::{LabelCatalog, SeverityBand};

/// One (label, score) pair as returned by the classifier.
///
/// Scores are independent per label (multi-label output), so a set of them
/// does not have to sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub score: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Score on a 0-100 scale.
    pub fn percent(&self) -> f64 {
        f64::from(self.score) * 100.0
    }

    /// Percentage with two decimals, e.g. `0.8734` → `"87.34%"`.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.percent())
    }

    /// Progress bar value: score × 100, truncated (not rounded), clamped to 0..=100.
    pub fn progress(&self) -> u8 {
        self.percent().trunc().clamp(0.0, 100.0) as u8
    }
}

/// Classifier output sorted by score, highest first.
///
/// Construction enforces the invariants: at least one entry, finite scores,
/// descending order. The sort is stable, so equal scores keep the
/// producer's order and the first-produced entry wins a tie for primary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet(Vec<ClassificationResult>);

impl ResultSet {
    pub fn from_unsorted(mut results: Vec<ClassificationResult>) -> DomainResult<Self> {
        if results.is_empty() {
            return Err(DomainError::EmptyResultSet);
        }

        if let Some(bad) = results.iter().find(|r| !r.score.is_finite()) {
            return Err(DomainError::validation(format!(
                "non-finite score for label {:?}",
                bad.label
            )));
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(Self(results))
    }

    /// Highest-scoring entry.
    pub fn primary(&self) -> &ClassificationResult {
        // Non-empty by construction.
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ClassificationResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The primary result plus everything derived from it for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryResult {
    pub label: String,
    pub score: f32,
    pub confidence: String,
    pub explanation: String,
    pub band: SeverityBand,
}

impl PrimaryResult {
    pub fn derive(results: &ResultSet, catalog: &LabelCatalog) -> Self {
        let top = results.primary();
        Self {
            label: top.label.clone(),
            score: top.score,
            confidence: top.confidence_display(),
            explanation: catalog.explain(&top.label).to_string(),
            band: catalog.band(&top.label),
        }
    }
}
