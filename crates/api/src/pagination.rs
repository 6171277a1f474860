//! Offset pagination over Schematic list endpoints.

use std::future::Future;

use crate::client::BillingApi;
use crate::error::Result;
use crate::models::{
    Company, CompanyFilter, CompanyOverride, EntitlementFilter, Feature, OverrideFilter, Plan,
    PlanEntitlement,
};

/// Items requested per list call.
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn first() -> Self {
        Self {
            limit: PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Drive `fetch` until a page comes back shorter than [`PAGE_SIZE`].
///
/// There is no "has more" signal: a short page is the last page. When the total is an
/// exact multiple of the page size the final request returns zero items. The first page
/// error aborts the whole collection.
pub async fn collect_all<T, E, F, Fut>(mut fetch: F) -> std::result::Result<Vec<T>, E>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<T>, E>>,
{
    let mut items = Vec::new();
    let mut page = Page::first();
    loop {
        let batch = fetch(page).await?;
        let returned = batch.len();
        items.extend(batch);
        if returned < PAGE_SIZE {
            break;
        }
        page.offset += returned;
    }
    Ok(items)
}

pub async fn all_companies(api: &dyn BillingApi, filter: &CompanyFilter) -> Result<Vec<Company>> {
    collect_all(|page| api.list_companies(filter, page)).await
}

pub async fn all_plans(api: &dyn BillingApi) -> Result<Vec<Plan>> {
    collect_all(|page| api.list_plans(page)).await
}

pub async fn all_features(api: &dyn BillingApi) -> Result<Vec<Feature>> {
    collect_all(|page| api.list_features(page)).await
}

pub async fn all_plan_entitlements(
    api: &dyn BillingApi,
    filter: &EntitlementFilter,
) -> Result<Vec<PlanEntitlement>> {
    collect_all(|page| api.list_plan_entitlements(filter, page)).await
}

pub async fn all_company_overrides(
    api: &dyn BillingApi,
    filter: &OverrideFilter,
) -> Result<Vec<CompanyOverride>> {
    collect_all(|page| api.list_company_overrides(filter, page)).await
}
