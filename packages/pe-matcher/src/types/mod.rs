//! Data types shared across the pipeline stages.

pub mod config;
pub mod fund;
pub mod lenient;
pub mod matching;
pub mod page;
pub mod pipeline;
pub mod profile;
