use rmcp::model::{JsonObject, Tool};
use rmcp::schemars::{self, JsonSchema};
use serde_json::Value;
use std::sync::Arc;

use super::schemas::company::{CompanyLookup, LinkStripeRequest};
use super::schemas::entitlements::{AddEntitlementsRequest, PlanEntitlementsRequest};
use super::schemas::features::CreateFeatureRequest;
use super::schemas::overrides::{ListOverridesRequest, RemoveOverrideRequest, SetOverrideRequest};
use super::schemas::plans::{CreatePlanRequest, PlanLookup};
use super::schemas::EmptyRequest;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) summary: &'static str,
    pub(crate) schema: fn() -> JsonObject,
}

pub(crate) const TOOL_CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "get_company",
        summary: "Company details: name, id, plan, trial end, and keys.",
        schema: schema_of::<CompanyLookup>,
    },
    ToolDescriptor {
        name: "get_company_plan",
        summary: "The plan a company is currently on.",
        schema: schema_of::<CompanyLookup>,
    },
    ToolDescriptor {
        name: "get_company_trial_info",
        summary: "Whether a company is in a trial, when it ends, and days remaining.",
        schema: schema_of::<CompanyLookup>,
    },
    ToolDescriptor {
        name: "count_companies_on_plan",
        summary: "Number of companies on a plan.",
        schema: schema_of::<PlanLookup>,
    },
    ToolDescriptor {
        name: "link_stripe_to_schematic",
        summary: "Find the Schematic company linked to a Stripe customer ID.",
        schema: schema_of::<LinkStripeRequest>,
    },
    ToolDescriptor {
        name: "list_company_overrides",
        summary: "List overrides by company, feature, or both.",
        schema: schema_of::<ListOverridesRequest>,
    },
    ToolDescriptor {
        name: "set_company_override",
        summary: "Override a feature's value for one company (on/off, a number, or unlimited).",
        schema: schema_of::<SetOverrideRequest>,
    },
    ToolDescriptor {
        name: "remove_company_override",
        summary: "Remove a company's override for a feature.",
        schema: schema_of::<RemoveOverrideRequest>,
    },
    ToolDescriptor {
        name: "list_plans",
        summary: "All plans with their company counts.",
        schema: schema_of::<EmptyRequest>,
    },
    ToolDescriptor {
        name: "create_plan",
        summary: "Create a plan.",
        schema: schema_of::<CreatePlanRequest>,
    },
    ToolDescriptor {
        name: "list_plan_entitlements",
        summary: "Features a plan grants and their values.",
        schema: schema_of::<PlanEntitlementsRequest>,
    },
    ToolDescriptor {
        name: "add_entitlements_to_plan",
        summary: "Grant one or more features to a plan, in order. Stops at the first failing entry; earlier entries stay and are listed in the error's `committed` data.",
        schema: schema_of::<AddEntitlementsRequest>,
    },
    ToolDescriptor {
        name: "list_features",
        summary: "All features with their type and flag key.",
        schema: schema_of::<EmptyRequest>,
    },
    ToolDescriptor {
        name: "create_feature",
        summary: "Create a boolean or event feature together with its flag.",
        schema: schema_of::<CreateFeatureRequest>,
    },
];

fn schema_of<T: JsonSchema>() -> JsonObject {
    let schema = schemars::SchemaGenerator::default().into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(Value::Object(object)) => object,
        _ => {
            let mut object = JsonObject::new();
            object.insert("type".to_string(), Value::String("object".to_string()));
            object
        }
    }
}

pub(crate) fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOL_CATALOG.iter().find(|tool| tool.name == name)
}

pub(crate) fn tools() -> Vec<Tool> {
    TOOL_CATALOG
        .iter()
        .map(|tool| Tool::new(tool.name, tool.summary, Arc::new((tool.schema)())))
        .collect()
}

pub(crate) fn tool_instructions() -> String {
    let mut lines = vec![
        "Schematic tools for companies, plans, features, entitlements, and overrides.".to_string(),
        "Identify a company by company_id, stripe_customer_id, custom_key + custom_value, or company_name (highest priority wins).".to_string(),
        "Features are matched by feature_id or by exact name or flag key; plans by plan_id or exact name.".to_string(),
        "Tools:".to_string(),
    ];
    for tool in TOOL_CATALOG {
        lines.push(format!("- {}: {}", tool.name, tool.summary));
    }
    lines.join("\n")
}
