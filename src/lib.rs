//! Exposes the wttr.in console weather service as MCP tools over
//! newline-delimited JSON-RPC on stdin/stdout.

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod tools;
pub mod weather;
