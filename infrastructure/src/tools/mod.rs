//! Tool surface adapters
//!
//! The tool catalog itself lives in the application layer; this module
//! advertises it.

mod schema;

pub use schema::JsonSchemaToolConverter;
