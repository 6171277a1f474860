use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{ApiError, Result};
use crate::models::{
    Company, CompanyFilter, CompanyOverride, CreateCompanyOverride, CreateFeature, CreateFlag,
    CreatePlan, CreatePlanEntitlement, EntitlementFilter, Feature, Flag, OverrideFilter, Plan,
    PlanEntitlement,
};
use crate::pagination::Page;

pub const DEFAULT_BASE_URL: &str = "https://api.schematichq.com";
const API_KEY_HEADER: &str = "X-Schematic-Api-Key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations the MCP tools need from Schematic.
///
/// Every call is a single request; pagination is driven by the caller through
/// [`crate::pagination::collect_all`].
#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn get_company(&self, company_id: &str) -> Result<Company>;
    async fn list_companies(&self, filter: &CompanyFilter, page: Page) -> Result<Vec<Company>>;
    /// Exact-match lookup by one or more company keys (e.g. `stripe_customer_id`).
    async fn lookup_company(&self, keys: &BTreeMap<String, String>) -> Result<Company>;

    async fn get_plan(&self, plan_id: &str) -> Result<Plan>;
    async fn list_plans(&self, page: Page) -> Result<Vec<Plan>>;
    async fn create_plan(&self, body: &CreatePlan) -> Result<Plan>;

    async fn get_feature(&self, feature_id: &str) -> Result<Feature>;
    async fn list_features(&self, page: Page) -> Result<Vec<Feature>>;
    async fn create_feature(&self, body: &CreateFeature) -> Result<Feature>;

    async fn create_flag(&self, body: &CreateFlag) -> Result<Flag>;

    async fn list_plan_entitlements(
        &self,
        filter: &EntitlementFilter,
        page: Page,
    ) -> Result<Vec<PlanEntitlement>>;
    async fn create_plan_entitlement(&self, body: &CreatePlanEntitlement)
        -> Result<PlanEntitlement>;

    async fn list_company_overrides(
        &self,
        filter: &OverrideFilter,
        page: Page,
    ) -> Result<Vec<CompanyOverride>>;
    async fn create_company_override(
        &self,
        body: &CreateCompanyOverride,
    ) -> Result<CompanyOverride>;
    async fn delete_company_override(&self, override_id: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`BillingApi`].
#[derive(Clone, Debug)]
pub struct HttpBillingApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpBillingApi {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("schematic-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(envelope.data)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        log::debug!("GET {path} {query:?}");
        self.send(self.request(Method::GET, path).query(query)).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        log::debug!("POST {path}");
        self.send(self.request(Method::POST, path).json(body)).await
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
            ..
        })
        | Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    }
}

fn page_query(page: Page) -> Vec<(String, String)> {
    vec![
        ("limit".to_string(), page.limit.to_string()),
        ("offset".to_string(), page.offset.to_string()),
    ]
}

fn push_opt(query: &mut Vec<(String, String)>, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.clone()));
    }
}

#[async_trait]
impl BillingApi for HttpBillingApi {
    async fn get_company(&self, company_id: &str) -> Result<Company> {
        self.get(&format!("/companies/{company_id}"), &[]).await
    }

    async fn list_companies(&self, filter: &CompanyFilter, page: Page) -> Result<Vec<Company>> {
        let mut query = page_query(page);
        push_opt(&mut query, "q", filter.q.as_ref());
        self.get("/companies", &query).await
    }

    async fn lookup_company(&self, keys: &BTreeMap<String, String>) -> Result<Company> {
        let query: Vec<(String, String)> = keys
            .iter()
            .map(|(key, value)| (format!("keys[{key}]"), value.clone()))
            .collect();
        self.get("/companies/lookup", &query).await
    }

    async fn get_plan(&self, plan_id: &str) -> Result<Plan> {
        self.get(&format!("/plans/{plan_id}"), &[]).await
    }

    async fn list_plans(&self, page: Page) -> Result<Vec<Plan>> {
        self.get("/plans", &page_query(page)).await
    }

    async fn create_plan(&self, body: &CreatePlan) -> Result<Plan> {
        self.post("/plans", body).await
    }

    async fn get_feature(&self, feature_id: &str) -> Result<Feature> {
        self.get(&format!("/features/{feature_id}"), &[]).await
    }

    async fn list_features(&self, page: Page) -> Result<Vec<Feature>> {
        self.get("/features", &page_query(page)).await
    }

    async fn create_feature(&self, body: &CreateFeature) -> Result<Feature> {
        self.post("/features", body).await
    }

    async fn create_flag(&self, body: &CreateFlag) -> Result<Flag> {
        self.post("/flags", body).await
    }

    async fn list_plan_entitlements(
        &self,
        filter: &EntitlementFilter,
        page: Page,
    ) -> Result<Vec<PlanEntitlement>> {
        let mut query = page_query(page);
        push_opt(&mut query, "plan_id", filter.plan_id.as_ref());
        push_opt(&mut query, "feature_id", filter.feature_id.as_ref());
        self.get("/plan-entitlements", &query).await
    }

    async fn create_plan_entitlement(
        &self,
        body: &CreatePlanEntitlement,
    ) -> Result<PlanEntitlement> {
        self.post("/plan-entitlements", body).await
    }

    async fn list_company_overrides(
        &self,
        filter: &OverrideFilter,
        page: Page,
    ) -> Result<Vec<CompanyOverride>> {
        let mut query = page_query(page);
        push_opt(&mut query, "company_id", filter.company_id.as_ref());
        push_opt(&mut query, "feature_id", filter.feature_id.as_ref());
        self.get("/company-overrides", &query).await
    }

    async fn create_company_override(
        &self,
        body: &CreateCompanyOverride,
    ) -> Result<CompanyOverride> {
        self.post("/company-overrides", body).await
    }

    async fn delete_company_override(&self, override_id: &str) -> Result<()> {
        let path = format!("/company-overrides/{override_id}");
        log::debug!("DELETE {path}");
        let response = self.request(Method::DELETE, &path).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}
