use schematic_api::pagination::all_plan_entitlements;
use schematic_api::{BillingApi, CreatePlanEntitlement, EntitlementFilter, Plan};

use crate::error::{ToolError, ToolResult};
use crate::tools::resolve::{resolve_feature, resolve_plan};
use crate::tools::schemas::entitlements::{
    AddEntitlementsRequest, EntitlementInput, PlanEntitlementsRequest,
};
use crate::tools::text::{labelled, plural, TextBuilder};
use crate::tools::values::entitlement_value;

pub(in crate::tools::dispatch) async fn list_plan_entitlements(
    api: &dyn BillingApi,
    request: PlanEntitlementsRequest,
) -> ToolResult<String> {
    let plan = resolve_plan(api, &request.plan).await?;
    let plan_label = labelled(&plan.name, &plan.id);

    let filter = EntitlementFilter {
        plan_id: Some(plan.id.clone()),
        feature_id: None,
    };
    let entitlements = all_plan_entitlements(api, &filter).await?;
    if entitlements.is_empty() {
        return Ok(format!("Plan {plan_label} has no entitlements."));
    }

    let mut doc = TextBuilder::new(&format!(
        "Plan {plan_label} grants {}:",
        plural(entitlements.len(), "entitlement", "entitlements")
    ));
    for entitlement in &entitlements {
        doc.push_item(&format!(
            "{}: {}",
            entitlement.feature_label(),
            entitlement.value
        ));
    }
    Ok(doc.finish())
}

async fn add_entitlement(
    api: &dyn BillingApi,
    plan: &Plan,
    entry: &EntitlementInput,
) -> ToolResult<String> {
    let feature = resolve_feature(api, &entry.feature).await?;
    let value = entitlement_value(entry.value.as_deref(), &feature)?;
    let created = api
        .create_plan_entitlement(&CreatePlanEntitlement {
            plan_id: plan.id.clone(),
            feature_id: feature.id.clone(),
            value,
        })
        .await?;
    log::debug!("entitlement {} added to plan {}", created.id, plan.id);
    Ok(format!("{}: {}", labelled(&feature.name, &feature.id), created.value))
}

/// Entries are written one at a time; an entry that fails stops the batch and leaves the
/// earlier ones in place. Those are reported with the failure.
pub(in crate::tools::dispatch) async fn add_entitlements_to_plan(
    api: &dyn BillingApi,
    request: AddEntitlementsRequest,
) -> ToolResult<String> {
    let plan = resolve_plan(api, &request.plan).await?;

    let mut added = Vec::with_capacity(request.entitlements.len());
    for entry in &request.entitlements {
        match add_entitlement(api, &plan, entry).await {
            Ok(line) => added.push(line),
            Err(err) if added.is_empty() => return Err(err),
            Err(err) => {
                log::warn!(
                    "add_entitlements_to_plan stopped on plan {} after {}: {}",
                    plan.id,
                    plural(added.len(), "committed entitlement", "committed entitlements"),
                    added.join("; ")
                );
                return Err(ToolError::PartiallyApplied {
                    source: Box::new(err),
                    committed: added,
                });
            }
        }
    }

    let mut doc = TextBuilder::new(&format!(
        "Added {} to plan {}:",
        plural(added.len(), "entitlement", "entitlements"),
        labelled(&plan.name, &plan.id)
    ));
    for line in &added {
        doc.push_item(line);
    }
    Ok(doc.finish())
}
