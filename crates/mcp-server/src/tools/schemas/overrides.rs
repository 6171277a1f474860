use rmcp::schemars;

use super::company::CompanyLookup;
use super::features::FeatureLookup;
use crate::error::ToolResult;
use crate::tools::args::{Args, FromArgs};

/// Filter overrides by company, feature, or both.
#[derive(Debug, schemars::JsonSchema)]
pub struct ListOverridesRequest {
    #[serde(flatten)]
    pub company: CompanyLookup,

    #[serde(flatten)]
    pub feature: FeatureLookup,
}

impl FromArgs for ListOverridesRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            company: CompanyLookup::from_args(args)?,
            feature: FeatureLookup::from_args(args)?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct SetOverrideRequest {
    #[serde(flatten)]
    pub company: CompanyLookup,

    #[serde(flatten)]
    pub feature: FeatureLookup,

    #[schemars(
        description = "Override value: 'on'/'off'/'true'/'false', 'unlimited', or a number (event and trait features only)"
    )]
    pub value: String,
}

impl FromArgs for SetOverrideRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            company: CompanyLookup::from_args(args)?,
            feature: FeatureLookup::from_args(args)?,
            value: args.required_str("value")?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct RemoveOverrideRequest {
    #[serde(flatten)]
    pub company: CompanyLookup,

    #[serde(flatten)]
    pub feature: FeatureLookup,
}

impl FromArgs for RemoveOverrideRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            company: CompanyLookup::from_args(args)?,
            feature: FeatureLookup::from_args(args)?,
        })
    }
}
