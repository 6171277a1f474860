//! Request types for every tool.
//!
//! The `JsonSchema` derive feeds `tools/list`; argument validation goes through
//! [`crate::tools::args::FromArgs`] and never trusts the declared schema.

pub(crate) mod company;
pub(crate) mod entitlements;
pub(crate) mod features;
pub(crate) mod overrides;
pub(crate) mod plans;

use rmcp::schemars;

use super::args::{Args, FromArgs};
use crate::error::ToolResult;

/// Arguments for tools that take none.
#[derive(Debug, Default, schemars::JsonSchema)]
pub struct EmptyRequest {}

impl FromArgs for EmptyRequest {
    fn from_args(_args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {})
    }
}
