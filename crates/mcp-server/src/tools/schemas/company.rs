use rmcp::schemars;

use crate::error::ToolResult;
use crate::tools::args::{Args, FromArgs};

/// Ways to identify a company. The first populated field wins, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct CompanyLookup {
    #[schemars(description = "Schematic company ID (takes precedence over every other field)")]
    pub company_id: Option<String>,

    #[schemars(description = "Stripe customer ID linked to the company (e.g. cus_...)")]
    pub stripe_customer_id: Option<String>,

    #[schemars(description = "Name of a custom company key; requires custom_value")]
    pub custom_key: Option<String>,

    #[schemars(description = "Value of the custom company key; requires custom_key")]
    pub custom_value: Option<String>,

    #[schemars(description = "Company name to search for (must match exactly one company)")]
    pub company_name: Option<String>,
}

impl CompanyLookup {
    pub fn is_empty(&self) -> bool {
        self.company_id.is_none()
            && self.stripe_customer_id.is_none()
            && self.custom_key.is_none()
            && self.custom_value.is_none()
            && self.company_name.is_none()
    }
}

impl FromArgs for CompanyLookup {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            company_id: args.optional_str("company_id")?,
            stripe_customer_id: args.optional_str("stripe_customer_id")?,
            custom_key: args.optional_str("custom_key")?,
            custom_value: args.optional_str("custom_value")?,
            company_name: args.optional_str("company_name")?,
        })
    }
}

#[derive(Debug, schemars::JsonSchema)]
pub struct LinkStripeRequest {
    #[schemars(description = "Stripe customer ID to find the Schematic company for")]
    pub stripe_customer_id: String,
}

impl FromArgs for LinkStripeRequest {
    fn from_args(args: &Args<'_>) -> ToolResult<Self> {
        Ok(Self {
            stripe_customer_id: args.required_str("stripe_customer_id")?,
        })
    }
}
