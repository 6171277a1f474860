use schematic_api::pagination::all_company_overrides;
use schematic_api::{BillingApi, Company, CreateCompanyOverride, Feature, OverrideFilter};

use crate::error::{ToolError, ToolResult};
use crate::tools::resolve::{resolve_company, resolve_feature};
use crate::tools::schemas::overrides::{
    ListOverridesRequest, RemoveOverrideRequest, SetOverrideRequest,
};
use crate::tools::text::{labelled, plural, TextBuilder};
use crate::tools::values::override_value;

fn company_label(company: &Company) -> String {
    labelled(&company.name, &company.id)
}

fn feature_label(feature: &Feature) -> String {
    labelled(&feature.name, &feature.id)
}

pub(in crate::tools::dispatch) async fn list_company_overrides(
    api: &dyn BillingApi,
    request: ListOverridesRequest,
) -> ToolResult<String> {
    let company = if request.company.is_empty() {
        None
    } else {
        Some(resolve_company(api, &request.company).await?)
    };
    let feature = if request.feature.is_empty() {
        None
    } else {
        Some(resolve_feature(api, &request.feature).await?)
    };

    let scope = match (&company, &feature) {
        (Some(c), Some(f)) => format!("company {} and feature {}", company_label(c), feature_label(f)),
        (Some(c), None) => format!("company {}", company_label(c)),
        (None, Some(f)) => format!("feature {}", feature_label(f)),
        (None, None) => {
            return Err(ToolError::invalid(
                "Provide a company, a feature, or both to list overrides",
            ))
        }
    };

    let filter = OverrideFilter {
        company_id: company.as_ref().map(|c| c.id.clone()),
        feature_id: feature.as_ref().map(|f| f.id.clone()),
    };
    let overrides = all_company_overrides(api, &filter).await?;
    if overrides.is_empty() {
        return Ok(format!("No overrides found for {scope}."));
    }

    let mut doc = TextBuilder::new(&format!(
        "{} for {scope}:",
        plural(overrides.len(), "override", "overrides")
    ));
    for entry in &overrides {
        doc.push_item(&format!(
            "{} = {} (company {})",
            entry.feature_label(),
            entry.value,
            entry.company_id
        ));
    }
    Ok(doc.finish())
}

pub(in crate::tools::dispatch) async fn set_company_override(
    api: &dyn BillingApi,
    request: SetOverrideRequest,
) -> ToolResult<String> {
    let company = resolve_company(api, &request.company).await?;
    let feature = resolve_feature(api, &request.feature).await?;
    let parsed = override_value(&request.value, &feature)?;

    let created = api
        .create_company_override(&CreateCompanyOverride {
            company_id: company.id.clone(),
            feature_id: feature.id.clone(),
            value: parsed.value,
        })
        .await?;

    let mut doc = TextBuilder::new(&format!(
        "Set override for company {}: {} = {}",
        company_label(&company),
        feature_label(&feature),
        created.value
    ));
    doc.push_field("Override ID", &created.id);
    if parsed.defaulted {
        doc.push_note(&format!(
            "'{}' is not on/off, true/false, unlimited, or a number; stored as on",
            request.value
        ));
    }
    Ok(doc.finish())
}

pub(in crate::tools::dispatch) async fn remove_company_override(
    api: &dyn BillingApi,
    request: RemoveOverrideRequest,
) -> ToolResult<String> {
    let company = resolve_company(api, &request.company).await?;
    let feature = resolve_feature(api, &request.feature).await?;

    let filter = OverrideFilter {
        company_id: Some(company.id.clone()),
        feature_id: Some(feature.id.clone()),
    };
    let existing = all_company_overrides(api, &filter).await?;
    if existing.is_empty() {
        return Ok(format!(
            "No override for feature {} on company {}; nothing to remove.",
            feature_label(&feature),
            company_label(&company)
        ));
    }

    let mut removed = Vec::with_capacity(existing.len());
    for entry in &existing {
        api.delete_company_override(&entry.id).await?;
        removed.push(format!("{} (was {})", entry.id, entry.value));
    }

    let mut doc = TextBuilder::new(&format!(
        "Removed {} for feature {} on company {}:",
        plural(removed.len(), "override", "overrides"),
        feature_label(&feature),
        company_label(&company)
    ));
    for line in &removed {
        doc.push_item(line);
    }
    Ok(doc.finish())
}
