//! Store tests module.
//!
//! - Property tests: proptest-based checks of the reducer laws
//! - Scenario tests: multi-step edit sequences and replays

mod scenarios;
