use rmcp::schemars;
use schematic_api::FeatureType;

use crate::error::{ToolError, ToolResult};
use crate::tools::args::{Args, FromArgs};

#[derive(Debug, Clone, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct FeatureLookup {
    #[schemars(description = "Schematic feature ID (takes precedence over feature_name)")]
    pub feature_id: Option<String>,

    #[schemars(description = "Feature name or flag key (exact match)")]
    pub feature_name: Option<String>,
}

impl FeatureLookup {
    pub fn is_empty(&self) -> bool {
        self.feature_id.is_none() && self.feature_name.is_none()
    }
}

impl FromArgs for FeatureLookup {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            feature_id: args.optional_str("feature_id")?,
            feature_name: args.optional_str("feature_name")?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct CreateFeatureRequest {
    #[schemars(description = "Feature name; converted to Title Case if needed")]
    pub name: String,

    #[schemars(description = "Feature type: 'boolean' or 'event' ('trait' features must be created in the Schematic app)")]
    pub feature_type: String,

    #[schemars(description = "Optional feature description")]
    pub description: Option<String>,

    #[schemars(description = "Event name to meter; required when feature_type is 'event'")]
    pub event_subtype: Option<String>,
}

impl CreateFeatureRequest {
    pub fn kind(&self) -> ToolResult<FeatureType> {
        FeatureType::parse(&self.feature_type).ok_or_else(|| {
            ToolError::invalid(format!(
                "Invalid feature_type '{}': expected boolean, event, or trait",
                self.feature_type
            ))
        })
    }
}

impl FromArgs for CreateFeatureRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            name: args.required_str("name")?,
            feature_type: args.required_str("feature_type")?,
            description: args.optional_str("description")?,
            event_subtype: args.optional_str("event_subtype")?,
        })
    }
}
