use rmcp::schemars;

use super::features::FeatureLookup;
use super::plans::PlanLookup;
use crate::error::ToolResult;
use crate::tools::args::{Args, FromArgs};

#[derive(Debug, schemars::JsonSchema)]
pub struct PlanEntitlementsRequest {
    #[serde(flatten)]
    pub plan: PlanLookup,
}

impl FromArgs for PlanEntitlementsRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            plan: PlanLookup::from_args(args)?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct EntitlementInput {
    #[serde(flatten)]
    pub feature: FeatureLookup,

    #[schemars(
        description = "Value: boolean features take 'on'/'off' (default 'on'); event and trait features need a number or 'unlimited'"
    )]
    pub value: Option<String>,
}

impl FromArgs for EntitlementInput {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            feature: FeatureLookup::from_args(args)?,
            value: args.optional_str("value")?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct AddEntitlementsRequest {
    #[serde(flatten)]
    pub plan: PlanLookup,

    #[schemars(description = "Entitlements to add, processed in order")]
    pub entitlements: Vec<EntitlementInput>,
}

impl FromArgs for AddEntitlementsRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        let plan = PlanLookup::from_args(args)?;
        let entitlements = args
            .required_objects("entitlements")?
            .iter()
            .map(EntitlementInput::from_args)
            .collect::<ToolResult<Vec<_>>>()?;
        Ok(Self { plan, entitlements })
    }
}
