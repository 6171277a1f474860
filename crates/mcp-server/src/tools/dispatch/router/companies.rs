use chrono::{DateTime, SecondsFormat, Utc};
use schematic_api::{BillingApi, Company};

use crate::error::ToolResult;
use crate::tools::resolve::resolve_company;
use crate::tools::schemas::company::{CompanyLookup, LinkStripeRequest};
use crate::tools::text::{labelled, TextBuilder};

const SECONDS_PER_DAY: i64 = 86_400;

fn company_label(company: &Company) -> String {
    labelled(&company.name, &company.id)
}

fn plan_label(company: &Company) -> Option<String> {
    company
        .plan
        .as_ref()
        .map(|plan| labelled(&plan.name, &plan.id))
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(in crate::tools::dispatch) async fn get_company(
    api: &dyn BillingApi,
    lookup: CompanyLookup,
) -> ToolResult<String> {
    let company = resolve_company(api, &lookup).await?;

    let mut doc = TextBuilder::new(&format!("Company: {}", company_label(&company)));
    doc.push_field(
        "Plan",
        plan_label(&company).as_deref().unwrap_or("none"),
    );
    if let Some(status) = company
        .billing_subscription
        .as_ref()
        .and_then(|sub| sub.status.as_deref())
    {
        doc.push_field("Subscription status", status);
    }
    if let Some(trial_end) = company.trial_end() {
        doc.push_field("Trial ends", &format_instant(trial_end));
    }
    if company.keys.is_empty() {
        doc.push_field("Keys", "none");
    } else {
        doc.push_line("Keys:");
        for key in &company.keys {
            doc.push_item(&format!("{}: {}", key.key, key.value));
        }
    }
    Ok(doc.finish())
}

pub(in crate::tools::dispatch) async fn get_company_plan(
    api: &dyn BillingApi,
    lookup: CompanyLookup,
) -> ToolResult<String> {
    let company = resolve_company(api, &lookup).await?;
    Ok(match plan_label(&company) {
        Some(plan) => format!("Company {} is on plan {plan}.", company_label(&company)),
        None => format!("Company {} is not on any plan.", company_label(&company)),
    })
}

pub(in crate::tools::dispatch) async fn get_company_trial_info(
    api: &dyn BillingApi,
    lookup: CompanyLookup,
) -> ToolResult<String> {
    let company = resolve_company(api, &lookup).await?;
    Ok(describe_trial(&company, Utc::now()))
}

/// Days are rounded up, so a trial ending later today still has one day left.
fn describe_trial(company: &Company, now: DateTime<Utc>) -> String {
    let label = company_label(company);
    let Some(trial_end) = company.trial_end() else {
        return format!("Company {label} has no trial.");
    };

    let remaining = (trial_end - now).num_seconds();
    if remaining <= 0 {
        let mut doc = TextBuilder::new(&format!("Company {label} is not in an active trial."));
        doc.push_field("Trial ended", &format_instant(trial_end));
        return doc.finish();
    }

    let days = (remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    let mut doc = TextBuilder::new(&format!("Company {label} is in an active trial."));
    doc.push_field("Trial ends", &format_instant(trial_end));
    doc.push_field("Days remaining", &days.to_string());
    doc.finish()
}

pub(in crate::tools::dispatch) async fn link_stripe_to_schematic(
    api: &dyn BillingApi,
    request: LinkStripeRequest,
) -> ToolResult<String> {
    let lookup = CompanyLookup {
        stripe_customer_id: Some(request.stripe_customer_id.clone()),
        ..CompanyLookup::default()
    };
    let company = resolve_company(api, &lookup).await?;

    let mut doc = TextBuilder::new(&format!(
        "Stripe customer {} is linked to Schematic company {}.",
        request.stripe_customer_id,
        company_label(&company)
    ));
    doc.push_field("Company ID", &company.id);
    doc.push_field("Company name", company.label());
    Ok(doc.finish())
}
