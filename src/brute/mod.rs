//! Parallel brute-force evaluation.
//!
//! Consumes the lazy sequence of a [`SearchSpace`](crate::search::SearchSpace)
//! in batches, scores each batch on the rayon pool, and reduces to the
//! single best valid lineup on the calling thread.
//!
//! Ties are broken by higher total floor, then by the lexicographically
//! smaller candidate-id sequence, so the answer is identical for any
//! worker count or batch size. A lineup that fails to score is counted
//! and skipped; it never aborts the run.

mod config;
mod runner;

pub use config::BruteForceConfig;
pub use runner::{BruteForceResult, BruteForceRunner, BruteForceStats};
