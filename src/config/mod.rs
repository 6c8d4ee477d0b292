//! Pipeline Configuration Module
//!
//! Provides the sensor node and monitor tunables loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `THIRD_EYE_CONFIG` environment variable (path to TOML file)
//! 2. `third_eye.toml` in the current working directory
//! 3. Built-in defaults (reference constants in [`defaults`])
//!
//! The loaded [`PipelineConfig`] is passed explicitly to whatever needs it;
//! there is no global instance.

mod pipeline_config;
pub mod defaults;

pub use pipeline_config::*;
