//! MCP gateway for a portfolio REST API.
//!
//! Speaks a subset of the Model Context Protocol (`initialize`, `tools/list`,
//! `tools/call`) over JSON-RPC 2.0 and turns tool calls into requests against
//! a remote REST backend holding projects and skills. Only tools in the
//! configured visibility set can be listed or called.

pub mod backend;
pub mod config;
pub mod context;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod transport;
