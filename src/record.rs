//! Analysis records - the single persisted entity
//!
//! An `AnalysisRecord` is one scored text plus its metadata. Records are
//! immutable once written: there is no update or delete path.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Compound score at or above which text is labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which text is labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Sentiment polarity derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Derive the label from a compound score using the fixed thresholds.
    ///
    /// Both boundaries are inclusive: `0.05` is positive and `-0.05` is negative.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(Error::InvalidLabel(s.to_string())),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Polarity breakdown as returned by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// One scored piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// UUID v4, primary key
    pub id: String,
    /// Trimmed input text
    pub text: String,
    pub label: SentimentLabel,
    pub compound: f64,
    pub scores: Scores,
    /// UTC creation time, `YYYY-MM-DDTHH:MM:SS.ffffffZ`
    pub timestamp: String,
}

impl AnalysisRecord {
    /// Build a fresh record: new id, current UTC time, label derived from `scores`.
    pub fn new(text: impl Into<String>, scores: Scores) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            label: SentimentLabel::from_compound(scores.compound),
            compound: scores.compound,
            scores,
            timestamp: utc_timestamp(),
        }
    }
}

/// Current UTC time with fixed microsecond precision and a trailing `Z`.
///
/// The fixed width keeps lexicographic order equal to chronological order.
pub fn utc_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.6fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(compound: f64) -> Scores {
        Scores { neg: 0.0, neu: 1.0, pos: 0.0, compound }
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_compound(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.5), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.049), SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_string_roundtrip() {
        for label in [SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative] {
            assert_eq!(label.as_str().parse::<SentimentLabel>().unwrap(), label);
        }
        assert!("mixed".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_new_record() {
        let a = AnalysisRecord::new("great", scores(0.6));
        let b = AnalysisRecord::new("great", scores(0.6));

        assert_ne!(a.id, b.id);
        assert_eq!(a.label, SentimentLabel::Positive);
        assert_eq!(a.compound, a.scores.compound);
        assert!(a.timestamp.ends_with('Z'));
        assert_eq!(a.timestamp.len(), "2024-01-01T00:00:00.000000Z".len());
    }

    #[test]
    fn test_wire_shape() {
        let record = AnalysisRecord::new("meh", scores(0.0));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["label"], "neutral");
        assert_eq!(value["text"], "meh");
        assert_eq!(value["scores"]["neu"], 1.0);
        assert_eq!(value["scores"]["compound"], 0.0);
        assert!(value["id"].is_string());
    }
}
