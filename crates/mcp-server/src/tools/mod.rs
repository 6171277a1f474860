//! MCP tools for Schematic billing data.

pub(crate) mod args;
pub(crate) mod catalog;
mod dispatch;
pub(crate) mod resolve;
pub(crate) mod schemas;
pub(crate) mod text;
pub(crate) mod values;

pub use dispatch::{ApiHandle, SchematicService};
