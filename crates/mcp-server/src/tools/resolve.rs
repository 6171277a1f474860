//! Turn loosely specified identifiers into exactly one company, plan, or feature.

use schematic_api::pagination::{all_companies, all_features, all_plans};
use schematic_api::{BillingApi, Company, CompanyFilter, Feature, Plan, STRIPE_CUSTOMER_KEY};
use std::collections::BTreeMap;

use super::schemas::company::CompanyLookup;
use super::schemas::features::FeatureLookup;
use super::schemas::plans::PlanLookup;
use crate::error::{ToolError, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompanySelector<'a> {
    Id(&'a str),
    StripeCustomer(&'a str),
    CustomKey { key: &'a str, value: &'a str },
    Name(&'a str),
}

/// Pick the highest-priority populated field: id, Stripe id, custom key pair, name.
pub(crate) fn company_selector(lookup: &CompanyLookup) -> ToolResult<CompanySelector<'_>> {
    if let Some(id) = lookup.company_id.as_deref() {
        return Ok(CompanySelector::Id(id));
    }
    if let Some(customer) = lookup.stripe_customer_id.as_deref() {
        return Ok(CompanySelector::StripeCustomer(customer));
    }
    match (lookup.custom_key.as_deref(), lookup.custom_value.as_deref()) {
        (Some(key), Some(value)) => return Ok(CompanySelector::CustomKey { key, value }),
        (Some(_), None) | (None, Some(_)) => {
            return Err(ToolError::invalid(
                "custom_key and custom_value must be provided together",
            ))
        }
        (None, None) => {}
    }
    if let Some(name) = lookup.company_name.as_deref() {
        return Ok(CompanySelector::Name(name));
    }
    Err(ToolError::invalid(
        "Identify the company with one of: company_id, stripe_customer_id, custom_key + custom_value, or company_name",
    ))
}

pub(crate) async fn resolve_company(
    api: &dyn BillingApi,
    lookup: &CompanyLookup,
) -> ToolResult<Company> {
    match company_selector(lookup)? {
        CompanySelector::Id(id) => Ok(api.get_company(id).await?),
        CompanySelector::StripeCustomer(customer) => {
            lookup_by_key(api, STRIPE_CUSTOMER_KEY, customer).await
        }
        CompanySelector::CustomKey { key, value } => lookup_by_key(api, key, value).await,
        CompanySelector::Name(name) => {
            let filter = CompanyFilter {
                q: Some(name.to_string()),
            };
            let mut matches = all_companies(api, &filter).await?;
            match matches.len() {
                0 => Err(ToolError::not_found(format!(
                    "No company found matching '{name}'"
                ))),
                1 => Ok(matches.remove(0)),
                _ => Err(ToolError::AmbiguousMatch {
                    entity: "companies",
                    query: name.to_string(),
                    matches: matches.iter().map(|c| c.label().to_string()).collect(),
                }),
            }
        }
    }
}

async fn lookup_by_key(api: &dyn BillingApi, key: &str, value: &str) -> ToolResult<Company> {
    let mut keys = BTreeMap::new();
    keys.insert(key.to_string(), value.to_string());
    match api.lookup_company(&keys).await {
        Ok(company) => Ok(company),
        Err(err) if err.is_not_found() => Err(ToolError::not_found(format!(
            "No company found with {key} '{value}'"
        ))),
        Err(err) => Err(err.into()),
    }
}

type FeatureMatcher = fn(&Feature, &str) -> bool;

fn matches_feature_name(feature: &Feature, query: &str) -> bool {
    feature.name == query
}

fn matches_flag_key(feature: &Feature, query: &str) -> bool {
    feature.flag_key() == Some(query)
}

/// Evaluated in order for each feature; exact equality only.
const FEATURE_MATCHERS: [FeatureMatcher; 2] = [matches_feature_name, matches_flag_key];

pub(crate) async fn resolve_feature(
    api: &dyn BillingApi,
    lookup: &FeatureLookup,
) -> ToolResult<Feature> {
    if let Some(id) = lookup.feature_id.as_deref() {
        return Ok(api.get_feature(id).await?);
    }
    let Some(name) = lookup.feature_name.as_deref() else {
        return Err(ToolError::invalid(
            "Identify the feature with feature_id or feature_name",
        ));
    };

    all_features(api)
        .await?
        .into_iter()
        .find(|feature| FEATURE_MATCHERS.iter().any(|matches| matches(feature, name)))
        .ok_or_else(|| ToolError::not_found(format!("No feature found matching '{name}'")))
}

pub(crate) async fn resolve_plan(api: &dyn BillingApi, lookup: &PlanLookup) -> ToolResult<Plan> {
    if let Some(id) = lookup.plan_id.as_deref() {
        return Ok(api.get_plan(id).await?);
    }
    let Some(name) = lookup.plan_name.as_deref() else {
        return Err(ToolError::invalid("Identify the plan with plan_id or plan_name"));
    };

    all_plans(api)
        .await?
        .into_iter()
        .find(|plan| plan.name == name)
        .ok_or_else(|| ToolError::not_found(format!("No plan found matching '{name}'")))
}
