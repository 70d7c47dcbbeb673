//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ToolError`]: the error taxonomy every tool call reports through
//! - [`upstream::normalize_api_error`]: maps rule engine error payloads onto it

pub mod error;
pub mod upstream;
