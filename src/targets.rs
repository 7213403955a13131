//! Target digests with their guessed algorithms.

use std::collections::HashSet;

use crate::algorithm::{guess, Algorithm};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Lowercase hex digest as supplied.
    pub hex: String,
    pub bytes: Vec<u8>,
    pub algorithms: Vec<Algorithm>,
}

/// Deduplicated targets, split into those with at least one algorithm guess
/// and those whose algorithm could not be determined.
#[derive(Clone, Debug, Default)]
pub struct TargetSet {
    targets: Vec<Target>,
    undetermined: Vec<String>,
}

impl TargetSet {
    pub fn new<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut set = Self::default();
        for hash in hashes {
            let hex = hash.as_ref().trim().to_ascii_lowercase();
            if hex.is_empty() || !seen.insert(hex.clone()) {
                continue;
            }
            let algorithms = guess(&hex);
            match hex::decode(&hex) {
                Ok(bytes) if !algorithms.is_empty() => set.targets.push(Target {
                    hex,
                    bytes,
                    algorithms,
                }),
                _ => {
                    log::debug!("no algorithm matches {hex}");
                    set.undetermined.push(hex);
                }
            }
        }
        set
    }

    /// Targets that take part in the search.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Hashes excluded from the search because no algorithm fits them.
    pub fn undetermined(&self) -> &[String] {
        &self.undetermined
    }

    /// Number of guessed algorithms per target, for the cost estimate.
    pub fn guess_counts(&self) -> Vec<usize> {
        self.targets.iter().map(|t| t.algorithms.len()).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len() + self.undetermined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
