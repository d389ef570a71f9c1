// File: src/core/classifier.rs
use crate::core::distribution::LogProbTable;
use crate::core::tokenizer::Tokenizer;
use crate::core::types::{Category, RawCounts, ALL_KEY, UNKNOWN_TOKEN};
use crate::error::{DataError, MissingDataError, NumericError, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{info, warn};

/// P(word | category) for one category, with the unseen-word fallback
/// resolved up front.
#[derive(Debug, Clone)]
struct CategoryLikelihood {
    words: LogProbTable,
    unknown: f64,
}

impl CategoryLikelihood {
    fn log_prob(&self, token: &str) -> f64 {
        self.words.get(token).unwrap_or(self.unknown)
    }
}

/// An immutable Naive Bayes model: a prior over categories and a word
/// likelihood table per category, both in log space.
///
/// Only categories with word counts take part; a category that appears in
/// the totals but has no words is left out of the prior entirely.
#[derive(Debug, Clone)]
pub struct ClassifierModel {
    prior: LogProbTable,
    likelihoods: HashMap<Category, CategoryLikelihood>,
}

impl ClassifierModel {
    /// Normalizes raw counts into the model's log-probability tables.
    pub fn build(raw: &RawCounts) -> Result<Self> {
        let mut likelihoods = HashMap::with_capacity(raw.word_counts.len());
        for (category, counts) in &raw.word_counts {
            let words = LogProbTable::from_counts(category, counts)?;
            let unknown = words.get(UNKNOWN_TOKEN).ok_or_else(|| DataError::MissingUnknown {
                category: category.clone(),
            })?;
            likelihoods.insert(category.clone(), CategoryLikelihood { words, unknown });
        }

        if let Some(category) = raw
            .word_counts
            .keys()
            .find(|c| !raw.category_totals.contains_key(*c))
        {
            return Err(DataError::MissingTotal { category: category.clone() }.into());
        }

        // Restrict the prior to categories that actually have words.
        let seen_totals: Vec<(&String, &u64)> = raw
            .category_totals
            .iter()
            .filter(|(category, _)| likelihoods.contains_key(*category))
            .collect();
        let dropped = categories_without_words(raw).len();
        if dropped > 0 {
            warn!(dropped, "categories without word counts left out of the prior");
        }
        if seen_totals.is_empty() {
            return Err(MissingDataError::NoCategories.into());
        }
        let prior = LogProbTable::from_counts("prior", seen_totals)?;

        let vocabulary: usize = likelihoods.values().map(|l| l.words.len()).sum();
        info!(categories = prior.len(), vocabulary, "built naive bayes model");
        Ok(Self { prior, likelihoods })
    }

    /// Scores pre-tokenized input against every category and returns the
    /// renormalized posterior.
    ///
    /// Scores accumulate in log space and are exponentiated only at the end.
    /// Very long inputs can underflow every score to zero; that surfaces as
    /// a `NumericError` rather than NaN.
    pub fn classify_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<BTreeMap<Category, f64>> {
        // Fresh accumulators for every call.
        let mut lg_scores: BTreeMap<&str, f64> =
            self.prior.iter().map(|(cat, lp)| (cat.as_str(), lp)).collect();

        for token in tokens {
            let token = token.as_ref();
            for (category, score) in lg_scores.iter_mut() {
                // Prior keys are a subset of the likelihood keys, checked in `build`.
                *score += self.likelihoods[*category].log_prob(token);
            }
        }

        let scores: Vec<(&str, f64)> = lg_scores
            .into_iter()
            .map(|(cat, lg)| (cat, lg.exp()))
            .collect();
        let total: f64 = scores.iter().map(|&(_, s)| s).sum();
        if total == 0.0 || !total.is_finite() {
            return Err(NumericError::DegenerateScores { sum: total }.into());
        }

        Ok(scores
            .into_iter()
            .map(|(cat, s)| (cat.to_string(), s / total))
            .collect())
    }

    /// Tokenizes `text` and classifies it.
    pub fn classify<T: Tokenizer + ?Sized>(&self, tokenizer: &T, text: &str) -> Result<BTreeMap<Category, f64>> {
        let tokens = tokenizer.tokenize(text);
        self.classify_tokens(&tokens)
    }

    /// Categories taking part in classification, sorted by name.
    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = self.prior.keys().map(String::as_str).collect();
        cats.sort_unstable();
        cats
    }

    pub fn prior_table(&self) -> &LogProbTable {
        &self.prior
    }

    /// Linear prior probability of `category`.
    pub fn prior(&self, category: &str) -> Option<f64> {
        self.prior.get(category).map(f64::exp)
    }

    pub fn likelihood_table(&self, category: &str) -> Option<&LogProbTable> {
        self.likelihoods.get(category).map(|l| &l.words)
    }

    /// log P(token | category), falling back to the UNK bucket.
    pub fn log_likelihood(&self, category: &str, token: &str) -> Option<f64> {
        self.likelihoods.get(category).map(|l| l.log_prob(token))
    }

    /// Distinct tokens (UNK included) known for `category`.
    pub fn vocabulary_size(&self, category: &str) -> Option<usize> {
        self.likelihoods.get(category).map(|l| l.words.len())
    }
}

/// Categories with a total but no word counts, sorted. The `all` key itself
/// is not a category and never counts.
fn categories_without_words(raw: &RawCounts) -> Vec<&str> {
    let mut dropped: Vec<&str> = raw
        .category_totals
        .keys()
        .map(String::as_str)
        .filter(|c| *c != ALL_KEY && !raw.word_counts.contains_key(*c))
        .collect();
    dropped.sort_unstable();
    dropped
}

/// One entry of a ranked shortlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    pub category: Category,
    pub probability: f64,
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category: \"{}\" - {:.2}% chance", self.category, self.probability * 100.0)
    }
}

/// Sorts a distribution by descending probability, ties by category name.
pub fn rank(distribution: &BTreeMap<Category, f64>) -> Vec<Guess> {
    let mut guesses: Vec<Guess> = distribution
        .iter()
        .map(|(category, &probability)| Guess { category: category.clone(), probability })
        .collect();
    guesses.sort_by(|a, b| match b.probability.total_cmp(&a.probability) {
        Ordering::Equal => a.category.cmp(&b.category),
        other => other,
    });
    guesses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::WordTokenizer;
    use crate::core::types::CountTable;
    use crate::error::PredictorError;

    fn table(pairs: &[(&str, u64)]) -> CountTable {
        pairs.iter().map(|&(k, c)| (k.to_string(), c)).collect()
    }

    fn pos_neg() -> RawCounts {
        RawCounts {
            category_totals: table(&[("pos", 4), ("neg", 4), ("all", 8)]),
            word_counts: [
                ("pos".to_string(), table(&[("good", 3), ("bad", 1), ("UNK", 1)])),
                ("neg".to_string(), table(&[("good", 1), ("bad", 3), ("UNK", 1)])),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_word_posterior() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        let probs = model.classify_tokens(&["good"]).unwrap();
        assert!(close(probs["pos"], 0.75));
        assert!(close(probs["neg"], 0.25));
    }

    #[test]
    fn test_tables_are_distributions() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        assert!(close(model.prior_table().linear_sum(), 1.0));
        for cat in model.categories() {
            assert!(close(model.likelihood_table(cat).unwrap().linear_sum(), 1.0));
        }
    }

    #[test]
    fn test_all_pseudo_category_is_not_classified() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        assert_eq!(model.categories(), vec!["neg", "pos"]);
        assert!(close(model.prior("pos").unwrap(), 0.5));
    }

    #[test]
    fn test_unseen_words_use_unk() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        assert_eq!(model.log_likelihood("pos", "zebra"), model.log_likelihood("pos", "UNK"));

        // UNK is 1/5 in both categories, so novel words leave the prior intact.
        let probs = model.classify_tokens(&["zebra", "quux"]).unwrap();
        assert!(close(probs["pos"], 0.5));
        assert!(close(probs["neg"], 0.5));
    }

    #[test]
    fn test_unseen_words_with_unequal_unk() {
        let raw = RawCounts {
            category_totals: table(&[("a", 3), ("b", 1)]),
            word_counts: [
                ("a".to_string(), table(&[("x", 1), ("UNK", 1)])),
                ("b".to_string(), table(&[("x", 3), ("UNK", 1)])),
            ]
            .into_iter()
            .collect(),
        };
        let model = ClassifierModel::build(&raw).unwrap();
        let probs = model.classify_tokens(&["novel"]).unwrap();

        let a = 0.75 * 0.5;
        let b = 0.25 * 0.25;
        assert!(close(probs["a"], a / (a + b)));
        assert!(close(probs["b"], b / (a + b)));
    }

    #[test]
    fn test_category_without_words_is_excluded() {
        let raw = RawCounts {
            category_totals: table(&[("A", 10), ("B", 5)]),
            word_counts: [("A".to_string(), table(&[("w", 2), ("UNK", 1)]))].into_iter().collect(),
        };
        let model = ClassifierModel::build(&raw).unwrap();
        assert_eq!(model.categories(), vec!["A"]);
        assert_eq!(model.prior("A"), Some(1.0));
        assert_eq!(model.prior("B"), None);
        assert!(model.likelihood_table("B").is_none());

        let probs = model.classify_tokens(&["w"]).unwrap();
        assert_eq!(probs.len(), 1);
        assert!(close(probs["A"], 1.0));
    }

    #[test]
    fn test_all_key_is_not_reported_as_dropped() {
        assert!(categories_without_words(&pos_neg()).is_empty());

        let mut raw = pos_neg();
        raw.category_totals.insert("meh".into(), 2);
        assert_eq!(categories_without_words(&raw), vec!["meh"]);
    }

    #[test]
    fn test_every_prior_category_has_likelihoods() {
        let mut raw = pos_neg();
        raw.category_totals.insert("meh".into(), 2);
        let model = ClassifierModel::build(&raw).unwrap();
        for cat in model.prior_table().keys() {
            assert!(model.likelihood_table(cat).is_some(), "{cat} has no likelihood table");
        }
        assert!(model.prior("meh").is_none());
    }

    #[test]
    fn test_empty_word_table_is_a_data_error() {
        let mut raw = pos_neg();
        raw.word_counts.insert("pos".into(), CountTable::new());
        let err = ClassifierModel::build(&raw).unwrap_err();
        assert!(matches!(err, PredictorError::Data(DataError::ZeroTotal { ref table }) if table == "pos"));
    }

    #[test]
    fn test_missing_unk_fails_at_build() {
        let mut raw = pos_neg();
        raw.word_counts.insert("pos".into(), table(&[("good", 3)]));
        let err = ClassifierModel::build(&raw).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::Data(DataError::MissingUnknown { ref category }) if category == "pos"
        ));
    }

    #[test]
    fn test_category_without_total_fails_at_build() {
        let mut raw = pos_neg();
        raw.word_counts.insert("meh".into(), table(&[("ok", 1), ("UNK", 1)]));
        let err = ClassifierModel::build(&raw).unwrap_err();
        assert!(matches!(err, PredictorError::Data(DataError::MissingTotal { .. })));
    }

    #[test]
    fn test_zero_prior_total_is_a_data_error() {
        let mut raw = pos_neg();
        raw.category_totals = table(&[("pos", 0), ("neg", 0)]);
        let err = ClassifierModel::build(&raw).unwrap_err();
        assert!(matches!(err, PredictorError::Data(DataError::ZeroTotal { .. })));
    }

    #[test]
    fn test_no_categories() {
        let raw = RawCounts {
            category_totals: table(&[("A", 1)]),
            word_counts: HashMap::new(),
        };
        let err = ClassifierModel::build(&raw).unwrap_err();
        assert!(matches!(err, PredictorError::MissingData(MissingDataError::NoCategories)));
    }

    #[test]
    fn test_posterior_sums_to_one_and_is_repeatable() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        let tokenizer = WordTokenizer::new();
        let text = "Good good BAD, and something else entirely";

        let first = model.classify(&tokenizer, text).unwrap();
        let second = model.classify(&tokenizer, text).unwrap();
        assert_eq!(first, second);
        assert!(close(first.values().sum::<f64>(), 1.0));
        assert!(first.values().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_empty_input_returns_prior() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        let probs = model.classify_tokens::<&str>(&[]).unwrap();
        assert!(close(probs["pos"], 0.5));
    }

    #[test]
    fn test_underflow_is_a_numeric_error() {
        let model = ClassifierModel::build(&pos_neg()).unwrap();
        let tokens = vec!["novel"; 2000];
        let err = model.classify_tokens(&tokens).unwrap_err();
        assert!(matches!(err, PredictorError::Numeric(NumericError::DegenerateScores { sum }) if sum == 0.0));
    }

    #[test]
    fn test_rank_orders_and_breaks_ties_by_name() {
        let dist: BTreeMap<Category, f64> = [("b".to_string(), 0.25), ("c".to_string(), 0.5), ("a".to_string(), 0.25)]
            .into_iter()
            .collect();
        let ranked = rank(&dist);
        let names: Vec<&str> = ranked.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(ranked[0].to_string(), "Category: \"c\" - 50.00% chance");
    }
}
