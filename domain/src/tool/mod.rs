//! Tool domain module
//!
//! Pure definitions of the tool surface offered to agents: what each tool is
//! called, which arguments it takes and what an invocation produces.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolOutput   │
//! │ (catalog)    │    │ (invocation) │    │ (result)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: ordered catalog of tool definitions
//! - [`ToolDefinition`]: name, description and parameters of one tool
//! - [`ToolCall`]: an invocation request with JSON arguments
//! - [`ToolOutput`]: success payload or [`ToolError`](crate::core::error::ToolError)
//! - [`ToolValidator`]: argument checks performed before dispatch
//! - [`FetchPolicy`]: failure handling for multi-fetch operations
//!
//! No I/O happens here. Execution lives in the application layer's
//! dispatcher, against a `RuleEngine` port.

pub mod entities;
pub mod policy;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use policy::FetchPolicy;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::ToolOutput;
