// File: src/core/distribution.rs
use crate::error::DataError;
use std::collections::HashMap;

/// An immutable log-probability distribution over string keys.
#[derive(Debug, Clone, PartialEq)]
pub struct LogProbTable {
    entries: HashMap<String, f64>,
}

impl LogProbTable {
    /// Normalizes counts into log-probabilities: `ln(c) - ln(sum of counts)`.
    /// `name` only labels errors.
    ///
    /// An empty or all-zero table is an error, as is any present key with a
    /// zero count.
    pub fn from_counts<'a, I>(name: &str, counts: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let counts: Vec<(&String, u64)> = counts.into_iter().map(|(k, &c)| (k, c)).collect();

        // u128 so huge upstream totals cannot wrap.
        let total: u128 = counts.iter().map(|&(_, c)| c as u128).sum();
        if total == 0 {
            return Err(DataError::ZeroTotal { table: name.to_string() });
        }
        let lg_total = (total as f64).ln();

        let mut entries = HashMap::with_capacity(counts.len());
        for (key, count) in counts {
            if count == 0 {
                return Err(DataError::ZeroCount {
                    table: name.to_string(),
                    key: key.clone(),
                });
            }
            entries.insert(key.clone(), (count as f64).ln() - lg_total);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, f64)> {
        self.entries.iter().map(|(k, &v)| (k, v))
    }

    /// Sum of the linear-scale probabilities; 1 up to rounding.
    pub fn linear_sum(&self) -> f64 {
        self.entries.values().map(|lp| lp.exp()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|&(k, c)| (k.to_string(), c)).collect()
    }

    #[test]
    fn test_normalizes_to_one() {
        let table = LogProbTable::from_counts("t", &counts(&[("a", 3), ("b", 1), ("UNK", 1)])).unwrap();
        assert!((table.linear_sum() - 1.0).abs() < 1e-9);
        assert!((table.get("a").unwrap() - (3.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!(table.iter().all(|(_, lp)| lp <= 0.0 && lp.is_finite()));
    }

    #[test]
    fn test_single_key_is_certain() {
        let table = LogProbTable::from_counts("t", &counts(&[("only", 42)])).unwrap();
        assert_eq!(table.get("only"), Some(0.0));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = LogProbTable::from_counts("empty", &HashMap::<String, u64>::new()).unwrap_err();
        assert_eq!(err, DataError::ZeroTotal { table: "empty".into() });
    }

    #[test]
    fn test_zero_count_is_an_error() {
        let err = LogProbTable::from_counts("t", &counts(&[("a", 2), ("b", 0)])).unwrap_err();
        assert_eq!(err, DataError::ZeroCount { table: "t".into(), key: "b".into() });
    }

    #[test]
    fn test_all_zero_reports_zero_total() {
        let err = LogProbTable::from_counts("t", &counts(&[("a", 0)])).unwrap_err();
        assert!(matches!(err, DataError::ZeroTotal { .. }));
    }
}
