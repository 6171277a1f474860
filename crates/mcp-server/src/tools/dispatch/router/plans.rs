use schematic_api::pagination::all_plans;
use schematic_api::{BillingApi, CreatePlan};

use crate::error::ToolResult;
use crate::tools::resolve::resolve_plan;
use crate::tools::schemas::plans::{CreatePlanRequest, PlanLookup};
use crate::tools::text::{labelled, plural, TextBuilder};

pub(in crate::tools::dispatch) async fn count_companies_on_plan(
    api: &dyn BillingApi,
    lookup: PlanLookup,
) -> ToolResult<String> {
    let plan = resolve_plan(api, &lookup).await?;
    let count = usize::try_from(plan.company_count).unwrap_or(usize::MAX);
    Ok(format!(
        "Plan {} has {}.",
        labelled(&plan.name, &plan.id),
        plural(count, "company", "companies")
    ))
}

pub(in crate::tools::dispatch) async fn list_plans(api: &dyn BillingApi) -> ToolResult<String> {
    let plans = all_plans(api).await?;
    if plans.is_empty() {
        return Ok("No plans found.".to_string());
    }

    let mut doc = TextBuilder::new(&format!("Plans ({}):", plans.len()));
    for plan in &plans {
        let count = usize::try_from(plan.company_count).unwrap_or(usize::MAX);
        doc.push_item(&format!(
            "{}: {}",
            labelled(&plan.name, &plan.id),
            plural(count, "company", "companies")
        ));
    }
    Ok(doc.finish())
}

pub(in crate::tools::dispatch) async fn create_plan(
    api: &dyn BillingApi,
    request: CreatePlanRequest,
) -> ToolResult<String> {
    let body = CreatePlan::new(request.name, request.description.unwrap_or_default());
    let plan = api.create_plan(&body).await?;

    let mut doc = TextBuilder::new(&format!(
        "Created plan {}",
        labelled(&plan.name, &plan.id)
    ));
    if !plan.description.is_empty() {
        doc.push_field("Description", &plan.description);
    }
    Ok(doc.finish())
}
