//! Alert Engine
//!
//! - `ladder`: pure first-match-wins decision from raw alert and proximity
//! - `debounce`: evaluation cadence and change-only speech
//! - `monitor`: the foreground loop tying both to a presentation sink

pub mod debounce;
pub mod ladder;
pub mod monitor;

pub use debounce::{EvaluationCadence, SpeechDebouncer};
pub use ladder::{decide, decide_with_threshold, AlertPolicy};
pub use monitor::AlertMonitor;
