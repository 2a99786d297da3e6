//! Agent system: an LLM-driven loop that answers questions, calling
//! schema-validated tools (retrieval over the video description) as the
//! model requests.

mod runner;
mod schema;
mod tools;

pub use runner::{Agent, AgentResponse, AgentState, ToolCallRecord, DEFAULT_MAX_TURNS};
pub use schema::{FieldKind, SchemaField, ToolSchema};
pub use tools::{RetrievalTool, Tool, ToolRegistry, ToolSpec, RETRIEVE_TOOL};
