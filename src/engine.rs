//! The cracking loop: enumerate candidates, hash, compare, stop once every
//! target is matched.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    algorithm::{gen_hash, Algorithm},
    candidates::{Candidate, Candidates, SEPARATORS},
    estimate::{estimate_attempts, Estimate},
    progress::Progress,
    targets::{Target, TargetSet},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Report every single comparison instead of periodic progress.
    pub verbose: bool,
    /// Candidates hashed together on the rayon pool. 1 hashes strictly one
    /// candidate at a time.
    pub chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            chunk_size: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Init,
    Enumerating,
    /// Every valid target was matched. Terminal.
    AllMatched,
    /// Enumeration finished with valid targets left unmatched. Terminal.
    Exhausted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::AllMatched | RunState::Exhausted)
    }
}

/// One comparison of a candidate digest against a target.
#[derive(Clone, Copy, Debug)]
pub struct Attempt<'a> {
    pub index: u64,
    pub total: Estimate,
    pub target: &'a str,
    pub algorithm: Algorithm,
    pub separator: &'a str,
    pub candidate: &'a str,
    pub digest: &'a [u8],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub target: String,
    pub algorithm: Algorithm,
    pub separator: String,
    pub candidate: String,
    /// Index of the comparison that hit.
    pub attempt: u64,
}

/// Receives run events as they happen. All methods default to no-ops.
pub trait Observer {
    fn on_attempt(&mut self, _attempt: &Attempt<'_>) {}

    fn on_progress(&mut self, _progress: &Progress) {}

    fn on_match(&mut self, _found: &Match) {}
}

impl Observer for () {}

/// Mutable state of a single run, owned by the caller.
#[derive(Debug)]
pub struct RunContext {
    state: RunState,
    started: Instant,
    attempts: u64,
    digests: u64,
    candidates: u64,
    matched: Vec<bool>,
    pending: usize,
    matches: Vec<Match>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            state: RunState::Init,
            started: Instant::now(),
            attempts: 0,
            digests: 0,
            candidates: 0,
            matched: Vec::new(),
            pending: 0,
            matches: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Target comparisons performed so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Digests actually computed so far.
    pub fn digests(&self) -> u64 {
        self.digests
    }

    /// Candidates scanned so far.
    pub fn candidates(&self) -> u64 {
        self.candidates
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn begin(&mut self, targets: usize) {
        *self = Self::new();
        self.matched = vec![false; targets];
        self.pending = targets;
        self.transition(RunState::Enumerating);
    }

    fn transition(&mut self, next: RunState) {
        log::debug!("run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Summary {
    NoMatches,
    AllFound,
    Partial { unmatched: Vec<String> },
}

/// Outcome of a finished run.
#[derive(Clone, Debug)]
pub struct Report {
    pub state: RunState,
    pub total: Estimate,
    pub matches: Vec<Match>,
    /// Valid targets left unmatched.
    pub unmatched: Vec<String>,
    /// Targets excluded up front because no algorithm fits them.
    pub undetermined: Vec<String>,
    pub attempts: u64,
    pub digests: u64,
    pub candidates: u64,
    pub elapsed: Duration,
}

impl Report {
    pub fn summary(&self) -> Summary {
        if self.matches.is_empty() {
            Summary::NoMatches
        } else if self.unmatched.is_empty() {
            Summary::AllFound
        } else {
            Summary::Partial {
                unmatched: self.unmatched.clone(),
            }
        }
    }
}

pub struct Engine<'a> {
    words: &'a [String],
    separators: &'a [&'a str],
    targets: &'a TargetSet,
    config: EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(words: &'a [String], targets: &'a TargetSet, config: EngineConfig) -> Self {
        Self {
            words,
            separators: &SEPARATORS,
            targets,
            config,
        }
    }

    pub fn with_separators(mut self, separators: &'a [&'a str]) -> Self {
        self.separators = separators;
        self
    }

    /// Comparisons a run needs if no target is ever matched.
    pub fn total(&self) -> Estimate {
        estimate_attempts(
            self.words.len(),
            self.separators.len(),
            &self.targets.guess_counts(),
        )
    }

    /// Runs the search to a terminal state. `ctx` is reset first.
    pub fn run(&self, ctx: &mut RunContext, observer: &mut dyn Observer) -> Report {
        let targets = self.targets.targets();
        let total = self.total();
        ctx.begin(targets.len());

        if self.words.is_empty() || self.separators.is_empty() {
            ctx.transition(RunState::Exhausted);
        } else if targets.is_empty() {
            ctx.transition(RunState::AllMatched);
        } else {
            let finished = self.search(ctx, total, observer);
            ctx.transition(finished);
        }

        Report {
            state: ctx.state,
            total,
            matches: ctx.matches.clone(),
            unmatched: targets
                .iter()
                .zip(&ctx.matched)
                .filter(|(_, matched)| !**matched)
                .map(|(target, _)| target.hex.clone())
                .collect(),
            undetermined: self.targets.undetermined().to_vec(),
            attempts: ctx.attempts,
            digests: ctx.digests,
            candidates: ctx.candidates,
            elapsed: ctx.elapsed(),
        }
    }

    fn search(
        &self,
        ctx: &mut RunContext,
        total: Estimate,
        observer: &mut dyn Observer,
    ) -> RunState {
        let chunk_size = self.config.chunk_size.max(1);
        let mut candidates = Candidates::new(self.words, self.separators);

        loop {
            let chunk: Vec<Candidate<'_>> = candidates.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                return RunState::Exhausted;
            }

            let algorithms = self.pending_algorithms(ctx);
            let digests: Vec<Vec<Vec<u8>>> = if chunk.len() > 1 {
                chunk
                    .par_iter()
                    .map(|candidate| hash_all(&candidate.text, &algorithms))
                    .collect()
            } else {
                chunk
                    .iter()
                    .map(|candidate| hash_all(&candidate.text, &algorithms))
                    .collect()
            };
            ctx.digests += (chunk.len() * algorithms.len()) as u64;

            // Results are scanned in enumeration order, so the earliest
            // candidate wins even when hashed out of order.
            for (candidate, digests) in chunk.iter().zip(&digests) {
                ctx.candidates += 1;
                if self.scan(ctx, candidate, &algorithms, digests, total, observer) {
                    return RunState::AllMatched;
                }
                if !self.config.verbose {
                    observer.on_progress(&Progress::new(ctx.attempts, total, ctx.elapsed()));
                }
            }
        }
    }

    /// Algorithms guessed for at least one unmatched target, deduplicated.
    fn pending_algorithms(&self, ctx: &RunContext) -> Vec<Algorithm> {
        let mut algorithms = Vec::new();
        for (target, matched) in self.targets.targets().iter().zip(&ctx.matched) {
            if *matched {
                continue;
            }
            for algorithm in &target.algorithms {
                if !algorithms.contains(algorithm) {
                    algorithms.push(*algorithm);
                }
            }
        }
        algorithms
    }

    /// Compares one candidate against every unmatched target. Returns true
    /// once the last target is matched.
    fn scan(
        &self,
        ctx: &mut RunContext,
        candidate: &Candidate<'_>,
        algorithms: &[Algorithm],
        digests: &[Vec<u8>],
        total: Estimate,
        observer: &mut dyn Observer,
    ) -> bool {
        for (index, target) in self.targets.targets().iter().enumerate() {
            if ctx.matched[index] {
                continue;
            }
            for algorithm in &target.algorithms {
                let Some(slot) = algorithms.iter().position(|a| a == algorithm) else {
                    continue;
                };
                let digest = &digests[slot];
                ctx.attempts += 1;
                if self.config.verbose {
                    observer.on_attempt(&Attempt {
                        index: ctx.attempts,
                        total,
                        target: &target.hex,
                        algorithm: *algorithm,
                        separator: candidate.separator,
                        candidate: &candidate.text,
                        digest,
                    });
                }
                if *digest == target.bytes {
                    self.record(ctx, index, target, *algorithm, candidate, observer);
                    if ctx.pending == 0 {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }

    fn record(
        &self,
        ctx: &mut RunContext,
        index: usize,
        target: &Target,
        algorithm: Algorithm,
        candidate: &Candidate<'_>,
        observer: &mut dyn Observer,
    ) {
        let found = Match {
            target: target.hex.clone(),
            algorithm,
            separator: candidate.separator.to_string(),
            candidate: candidate.text.clone(),
            attempt: ctx.attempts,
        };
        log::debug!(
            "{} matched by {:?} ({algorithm}) at attempt {}",
            found.target,
            found.candidate,
            found.attempt
        );
        ctx.matched[index] = true;
        ctx.pending -= 1;
        observer.on_match(&found);
        ctx.matches.push(found);
    }
}

fn hash_all(text: &str, algorithms: &[Algorithm]) -> Vec<Vec<u8>> {
    algorithms
        .iter()
        .map(|algorithm| gen_hash(text.as_bytes(), *algorithm))
        .collect()
}
