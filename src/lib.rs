//! Recover pre-images of hex digests by hashing every permutation of a word
//! list joined with common separators.

pub mod algorithm;
pub mod candidates;
pub mod engine;
pub mod estimate;
pub mod loader;
pub mod progress;
pub mod targets;

pub use algorithm::{gen_hash, guess, Algorithm};
pub use candidates::{candidate_count, Candidate, Candidates, SEPARATORS};
pub use engine::{
    Attempt, Engine, EngineConfig, Match, Observer, Report, RunContext, RunState, Summary,
};
pub use estimate::{estimate_attempts, Estimate};
pub use progress::{format_clock, Progress, TerminalReporter};
pub use targets::{Target, TargetSet};
