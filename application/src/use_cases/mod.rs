//! Use cases (application services)
//!
//! One use case per group of tools, plus the dispatcher that routes a tool
//! call to them.

pub mod calculate;
pub mod dispatch;
pub mod explore;
pub mod validate_situation;

#[cfg(test)]
pub(crate) mod testing;
