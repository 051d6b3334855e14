//! Business logic services.
//!
//! This module contains the Jira and Tempo clients, the report builder and
//! the pipeline that chains them together.
//!
//! Services take the run configuration as an explicit argument and hold no
//! global state, so each stage can be tested on its own.

pub mod http;
pub mod jira_client;
pub mod pipeline;
pub mod report;
pub mod tempo_client;

pub use pipeline::{Pipeline, PipelineState};
pub use report::Report;
