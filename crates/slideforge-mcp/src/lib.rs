//! MCP (Model Context Protocol) server for slideforge.
//!
//! Exposes deck generation, outline, recommendation, slide rendering and
//! validation tools to AI assistants over JSON-RPC on stdio.

pub mod arguments;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use handlers::ToolHandler;
pub use server::McpServer;
