//! ticktick-mcp - MCP server for the TickTick task service
//!
//! Exposes the unified client as consolidated, action-routed tools with
//! Markdown/JSON rendering and a fixed response-size budget.

pub mod format;
pub mod handlers;
pub mod help;
pub mod params;
pub mod server;

pub use server::TickTickMcpServer;
