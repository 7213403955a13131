//! Exact cost of a full run, in hash comparisons.

use std::fmt;

use crate::candidates::candidate_count;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Estimate {
    Exact(u128),
    /// The count does not fit in a `u128`.
    Overflow,
}

impl Estimate {
    pub fn exact(self) -> Option<u128> {
        match self {
            Estimate::Exact(total) => Some(total),
            Estimate::Overflow => None,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Exact(total) => write!(f, "{}", group_thousands(*total)),
            Estimate::Overflow => f.write_str("astronomically large"),
        }
    }
}

/// Total comparisons for `words` inputs, `separators` separators and one
/// entry per target holding how many algorithms were guessed for it.
pub fn estimate_attempts(words: usize, separators: usize, guesses: &[usize]) -> Estimate {
    let per_target = guesses
        .iter()
        .try_fold(0u128, |sum, &count| sum.checked_add(count as u128));
    let total = candidate_count(words, separators)
        .zip(per_target)
        .and_then(|(candidates, per_target)| candidates.checked_mul(per_target));
    match total {
        Some(total) => Estimate::Exact(total),
        None => Estimate::Overflow,
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{Candidates, SEPARATORS};

    #[test]
    fn matches_brute_force_count() {
        let words: Vec<String> = ["a", "b", "c"].iter().map(|w| w.to_string()).collect();
        let guesses = [1, 3, 2];
        let counted = Candidates::new(&words, &SEPARATORS).count() as u128
            * guesses.iter().sum::<usize>() as u128;
        assert_eq!(counted, 15 * 6 * 6);
        assert_eq!(
            estimate_attempts(words.len(), SEPARATORS.len(), &guesses),
            Estimate::Exact(counted)
        );
    }

    #[test]
    fn no_targets_or_words_cost_nothing() {
        assert_eq!(estimate_attempts(5, 6, &[]), Estimate::Exact(0));
        assert_eq!(estimate_attempts(0, 6, &[1, 2]), Estimate::Exact(0));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(estimate_attempts(34, 6, &[1]), Estimate::Overflow);
        assert_eq!(estimate_attempts(40, 6, &[1]), Estimate::Overflow);
        assert_eq!(estimate_attempts(40, 6, &[1]).exact(), None);
        assert_eq!(Estimate::Overflow.to_string(), "astronomically large");
    }

    #[test]
    fn display_groups_digits() {
        assert_eq!(Estimate::Exact(0).to_string(), "0");
        assert_eq!(Estimate::Exact(999).to_string(), "999");
        assert_eq!(Estimate::Exact(1_000).to_string(), "1,000");
        assert_eq!(Estimate::Exact(7_812_368_064).to_string(), "7,812,368,064");
    }
}
