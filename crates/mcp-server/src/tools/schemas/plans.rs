use rmcp::schemars;

use crate::error::ToolResult;
use crate::tools::args::{Args, FromArgs};

#[derive(Debug, Clone, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct PlanLookup {
    #[schemars(description = "Schematic plan ID (takes precedence over plan_name)")]
    pub plan_id: Option<String>,

    #[schemars(description = "Plan name (exact match)")]
    pub plan_name: Option<String>,
}

impl FromArgs for PlanLookup {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            plan_id: args.optional_str("plan_id")?,
            plan_name: args.optional_str("plan_name")?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct CreatePlanRequest {
    #[schemars(description = "Name of the new plan")]
    pub name: String,

    #[schemars(description = "Optional plan description")]
    pub description: Option<String>,
}

impl FromArgs for CreatePlanRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            name: args.required_str("name")?,
            description: args.optional_str("description")?,
        })
    }
}
