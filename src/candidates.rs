//! Lazy enumeration of joined word permutations.
//!
//! Candidates are produced by subset size ascending, then by permutation in
//! lexicographic order of word indices, then by separator.

/// Separators tried between the words of every permutation, in order.
pub const SEPARATORS: [&str; 6] = ["", " ", "-", "_", ":", "|"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub text: String,
    pub separator: &'a str,
    /// Number of words joined into `text`.
    pub size: usize,
}

/// Iterator over every (permutation, separator) candidate of a word list.
///
/// Finite and deterministic; build a new one (or clone a fresh one) to restart.
#[derive(Clone, Debug)]
pub struct Candidates<'a> {
    words: &'a [String],
    separators: &'a [&'a str],
    // Current permutation as word indices. Empty once exhausted.
    indices: Vec<usize>,
    separator: usize,
}

impl<'a> Candidates<'a> {
    pub fn new(words: &'a [String], separators: &'a [&'a str]) -> Self {
        let indices = if words.is_empty() || separators.is_empty() {
            Vec::new()
        } else {
            vec![0]
        };
        Self {
            words,
            separators,
            indices,
            separator: 0,
        }
    }

    fn join(&self, separator: &str) -> String {
        let mut text = String::new();
        for (pos, &index) in self.indices.iter().enumerate() {
            if pos > 0 {
                text.push_str(separator);
            }
            text.push_str(&self.words[index]);
        }
        text
    }

    fn advance(&mut self) {
        self.separator += 1;
        if self.separator < self.separators.len() {
            return;
        }
        self.separator = 0;
        if next_permutation(&mut self.indices, self.words.len()) {
            return;
        }
        let size = self.indices.len() + 1;
        if size <= self.words.len() {
            self.indices = (0..size).collect();
        } else {
            self.indices.clear();
        }
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.indices.is_empty() {
            return None;
        }
        let separator = self.separators[self.separator];
        let candidate = Candidate {
            text: self.join(separator),
            separator,
            size: self.indices.len(),
        };
        self.advance();
        Some(candidate)
    }
}

/// Steps `indices` to the next r-permutation of `0..n` in lexicographic order.
///
/// Returns false, leaving `indices` untouched, when it is already the last one.
fn next_permutation(indices: &mut [usize], n: usize) -> bool {
    for pos in (0..indices.len()).rev() {
        let prefix = &indices[..pos];
        let bumped = (indices[pos] + 1..n).find(|value| !prefix.contains(value));
        if let Some(value) = bumped {
            indices[pos] = value;
            let mut fill = 0;
            for slot in pos + 1..indices.len() {
                while indices[..slot].contains(&fill) {
                    fill += 1;
                }
                indices[slot] = fill;
            }
            return true;
        }
    }
    false
}

/// Closed form of `sum(P(n, r) for r in 1..=n) * separators`.
///
/// `None` when the count does not fit in a `u128`.
pub fn candidate_count(words: usize, separators: usize) -> Option<u128> {
    let mut perms: u128 = 1;
    let mut total: u128 = 0;
    for r in 1..=words {
        perms = perms.checked_mul((words - r + 1) as u128)?;
        total = total.checked_add(perms)?;
    }
    total.checked_mul(separators as u128)
}
