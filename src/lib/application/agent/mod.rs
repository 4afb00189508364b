//! # Agent Module
//!
//! Runs a single query through the prompt-directed tool loop.
//!
//! ## Turn flow
//!
//! 1. Render the system and task prompts with the current tool catalogue
//! 2. Ask the model for a proposal and extract fenced ```json tool calls
//! 3. With no calls, the proposal is the answer
//! 4. Otherwise run each call in order, embed the results in a follow-up
//!    prompt and return the second completion verbatim

mod controller;
mod dispatcher;
mod errors;
mod extractor;
mod models;
mod prompt;


pub use controller::TurnController;
pub use dispatcher::dispatch_tool_calls;
pub use errors::{AgentError, ExtractError, ToolError};
pub use extractor::extract_tool_calls;
pub use models::{TurnOutcome, TurnPhase, TurnSettings};
pub use prompt::{PromptBuilder, PromptTemplates, TurnPrompt, render_catalog, render_template};
