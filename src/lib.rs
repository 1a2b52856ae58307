//! Lingot - translation catalog manager
//!
//! Lingot is a CLI tool and library for maintaining a catalog of translatable
//! strings extracted from JS/TS source code. It scans a source tree for
//! translation invocations, creates catalog keys for new strings, marks keys
//! unused when they disappear, and revives them when they come back - all
//! without ever touching the translations attached to a key.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scan-and-reconcile engine (scanner, reconciler, store, gateway)
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
