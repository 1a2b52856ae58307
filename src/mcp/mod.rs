//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the catalog operations to AI assistants over the MCP
//! specification: the scan-and-reconcile operation, the snapshot query, and
//! the translation-editing tools.
//!
//! ## Module Structure
//!
//! - `helpers`: Gateway construction and DTO mapping
//! - `server`: Main MCP server implementation
//! - `types`: MCP-specific type definitions

mod helpers;
mod server;
pub mod types;

pub use server::{LingotMcpServer, run_server};
