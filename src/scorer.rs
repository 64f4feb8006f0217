//! Sentiment scoring
//!
//! Scoring is delegated to the VADER lexicon analyzer. The service only talks
//! to it through [`SentimentScorer`], so the analyzer is built once at startup
//! and injected wherever it is needed.

use crate::record::Scores;
use crate::{Error, Result};
use std::collections::HashMap;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps text to a polarity breakdown.
///
/// Implementations must be deterministic for a given input.
pub trait SentimentScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> Result<Scores>;
}

/// Lexicon-based scorer backed by `vader_sentiment`.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> Result<Scores> {
        let raw = self.analyzer.polarity_scores(text);
        scores_from_map(&raw)
    }
}

fn scores_from_map(raw: &HashMap<&str, f64>) -> Result<Scores> {
    let get = |key: &str| {
        raw.get(key)
            .copied()
            .ok_or_else(|| Error::Scorer(format!("analyzer result missing '{}'", key)))
    };

    Ok(Scores {
        neg: get("neg")?,
        neu: get("neu")?,
        pos: get("pos")?,
        compound: get("compound")?,
    })
}

/// Scorer that returns the same breakdown for every input.
#[cfg(test)]
pub(crate) struct FixedScorer(pub Scores);

#[cfg(test)]
impl SentimentScorer for FixedScorer {
    fn polarity_scores(&self, _text: &str) -> Result<Scores> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SentimentLabel;

    fn assert_well_formed(scores: &Scores) {
        let total = scores.neg + scores.neu + scores.pos;
        assert!((total - 1.0).abs() < 0.01, "neg+neu+pos = {}", total);
        assert!((-1.0..=1.0).contains(&scores.compound));
        assert!(scores.neg >= 0.0 && scores.neu >= 0.0 && scores.pos >= 0.0);
    }

    #[test]
    fn test_vader_positive() {
        let scorer = VaderScorer::new();
        let scores = scorer.polarity_scores("I love this, it is wonderful and great!").unwrap();

        assert_well_formed(&scores);
        assert_eq!(SentimentLabel::from_compound(scores.compound), SentimentLabel::Positive);
    }

    #[test]
    fn test_vader_negative() {
        let scorer = VaderScorer::new();
        let scores = scorer.polarity_scores("This is terrible, I hate it and it is awful.").unwrap();

        assert_well_formed(&scores);
        assert_eq!(SentimentLabel::from_compound(scores.compound), SentimentLabel::Negative);
    }

    #[test]
    fn test_vader_neutral() {
        let scorer = VaderScorer::new();
        let scores = scorer.polarity_scores("The table is made of wood").unwrap();

        assert_well_formed(&scores);
        assert_eq!(SentimentLabel::from_compound(scores.compound), SentimentLabel::Neutral);
    }

    #[test]
    fn test_vader_deterministic() {
        let scorer = VaderScorer::new();
        let a = scorer.polarity_scores("Pretty good, but not amazing").unwrap();
        let b = scorer.polarity_scores("Pretty good, but not amazing").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_key() {
        let mut raw = HashMap::new();
        raw.insert("neg", 0.0);
        raw.insert("neu", 1.0);
        raw.insert("pos", 0.0);

        let err = scores_from_map(&raw).unwrap_err();
        assert!(err.to_string().contains("compound"));
    }
}
