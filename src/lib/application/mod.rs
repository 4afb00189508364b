//! # Application Module
//!
//! ## Submodules
//!
//! - [`agent`] - Prompt-directed tool loop for a single query
//! - [`stdio`] - Line-oriented chat on stdin/stdout
//! - [`tooling`] - Tool session seam and the MCP stdio process client

pub mod agent;
pub mod stdio;
pub mod tooling;
