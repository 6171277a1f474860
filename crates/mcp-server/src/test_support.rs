//! In-memory [`BillingApi`] for handler and resolver tests.

use async_trait::async_trait;
use schematic_api::{
    ApiError, BillingApi, Company, CompanyFilter, CompanyKey, CompanyOverride,
    CreateCompanyOverride, CreateFeature, CreateFlag, CreatePlan, CreatePlanEntitlement,
    EntitlementFilter, EntitlementValue, Feature, FeatureRef, FeatureType, Flag, OverrideFilter,
    Page, Plan, PlanEntitlement, PlanRef, Result,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    companies: Vec<Company>,
    plans: Vec<Plan>,
    features: Vec<Feature>,
    entitlements: Vec<PlanEntitlement>,
    overrides: Vec<CompanyOverride>,
    calls: Vec<String>,
    next_id: usize,
    fail_flags: bool,
}

impl FakeState {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_new{}", self.next_id)
    }

    fn feature_ref(&self, feature_id: &str) -> Option<FeatureRef> {
        self.features
            .iter()
            .find(|f| f.id == feature_id)
            .map(|f| FeatureRef {
                id: f.id.clone(),
                name: f.name.clone(),
            })
    }
}

/// Fake upstream. Misses answer with a 404 status error, like the real API.
#[derive(Default)]
pub(crate) struct FakeBillingApi {
    state: Mutex<FakeState>,
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not found".to_string(),
    }
}

fn page_of<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    items.iter().skip(page.offset).take(page.limit).cloned().collect()
}

impl FakeBillingApi {
    pub(crate) fn with_company(self, company: Company) -> Self {
        self.state.lock().unwrap().companies.push(company);
        self
    }

    pub(crate) fn with_plan(self, plan: Plan) -> Self {
        self.state.lock().unwrap().plans.push(plan);
        self
    }

    pub(crate) fn with_feature(self, feature: Feature) -> Self {
        self.state.lock().unwrap().features.push(feature);
        self
    }

    pub(crate) fn with_override(self, company_id: &str, feature_id: &str, value: EntitlementValue) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.id("co");
            let feature = state.feature_ref(feature_id);
            state.overrides.push(CompanyOverride {
                id,
                company_id: company_id.to_string(),
                feature_id: feature_id.to_string(),
                feature,
                value,
            });
        }
        self
    }

    /// Make every `create_flag` call fail with a 409.
    pub(crate) fn failing_flags(self) -> Self {
        self.state.lock().unwrap().fail_flags = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn overrides(&self) -> Vec<CompanyOverride> {
        self.state.lock().unwrap().overrides.clone()
    }

    pub(crate) fn entitlements(&self) -> Vec<PlanEntitlement> {
        self.state.lock().unwrap().entitlements.clone()
    }

    pub(crate) fn features(&self) -> Vec<Feature> {
        self.state.lock().unwrap().features.clone()
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl BillingApi for FakeBillingApi {
    async fn get_company(&self, company_id: &str) -> Result<Company> {
        let state = self.record(format!("get_company {company_id}"));
        state
            .companies
            .iter()
            .find(|c| c.id == company_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn list_companies(&self, filter: &CompanyFilter, page: Page) -> Result<Vec<Company>> {
        let state = self.record(format!("list_companies offset={}", page.offset));
        let matching: Vec<Company> = state
            .companies
            .iter()
            .filter(|c| match filter.q.as_deref() {
                Some(q) => c.name.to_lowercase().contains(&q.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn lookup_company(&self, keys: &BTreeMap<String, String>) -> Result<Company> {
        let rendered: Vec<String> = keys.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let state = self.record(format!("lookup_company {}", rendered.join(",")));
        state
            .companies
            .iter()
            .find(|c| keys.iter().all(|(k, v)| c.key(k) == Some(v.as_str())))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn get_plan(&self, plan_id: &str) -> Result<Plan> {
        let state = self.record(format!("get_plan {plan_id}"));
        state
            .plans
            .iter()
            .find(|p| p.id == plan_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn list_plans(&self, page: Page) -> Result<Vec<Plan>> {
        let state = self.record(format!("list_plans offset={}", page.offset));
        Ok(page_of(&state.plans, page))
    }

    async fn create_plan(&self, body: &CreatePlan) -> Result<Plan> {
        let mut state = self.record(format!("create_plan {}", body.name));
        let plan = Plan {
            id: state.id("plan"),
            name: body.name.clone(),
            description: body.description.clone(),
            company_count: 0,
        };
        state.plans.push(plan.clone());
        Ok(plan)
    }

    async fn get_feature(&self, feature_id: &str) -> Result<Feature> {
        let state = self.record(format!("get_feature {feature_id}"));
        state
            .features
            .iter()
            .find(|f| f.id == feature_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn list_features(&self, page: Page) -> Result<Vec<Feature>> {
        let state = self.record(format!("list_features offset={}", page.offset));
        Ok(page_of(&state.features, page))
    }

    async fn create_feature(&self, body: &CreateFeature) -> Result<Feature> {
        let mut state = self.record(format!("create_feature {}", body.name));
        let feature = Feature {
            id: state.id("feat"),
            name: body.name.clone(),
            description: body.description.clone(),
            feature_type: body.feature_type,
            event_subtype: body.event_subtype.clone(),
            flags: Vec::new(),
        };
        state.features.push(feature.clone());
        Ok(feature)
    }

    async fn create_flag(&self, body: &CreateFlag) -> Result<Flag> {
        let mut state = self.record(format!("create_flag {}", body.key));
        if state.fail_flags {
            return Err(ApiError::Status {
                status: 409,
                message: format!("flag key '{}' already exists", body.key),
            });
        }
        let flag = Flag {
            id: state.id("flag"),
            key: body.key.clone(),
            name: body.name.clone(),
            feature_id: Some(body.feature_id.clone()),
            default_value: body.default_value,
        };
        if let Some(feature) = state.features.iter_mut().find(|f| f.id == body.feature_id) {
            feature.flags.push(flag.clone());
        }
        Ok(flag)
    }

    async fn list_plan_entitlements(
        &self,
        filter: &EntitlementFilter,
        page: Page,
    ) -> Result<Vec<PlanEntitlement>> {
        let state = self.record(format!("list_plan_entitlements offset={}", page.offset));
        let matching: Vec<PlanEntitlement> = state
            .entitlements
            .iter()
            .filter(|e| filter.plan_id.as_ref().map_or(true, |id| &e.plan_id == id))
            .filter(|e| filter.feature_id.as_ref().map_or(true, |id| &e.feature_id == id))
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn create_plan_entitlement(&self, body: &CreatePlanEntitlement) -> Result<PlanEntitlement> {
        let mut state = self.record(format!(
            "create_plan_entitlement {} {} {}",
            body.plan_id, body.feature_id, body.value
        ));
        let entitlement = PlanEntitlement {
            id: state.id("pe"),
            plan_id: body.plan_id.clone(),
            feature_id: body.feature_id.clone(),
            feature: state.feature_ref(&body.feature_id),
            value: body.value,
        };
        state.entitlements.push(entitlement.clone());
        Ok(entitlement)
    }

    async fn list_company_overrides(
        &self,
        filter: &OverrideFilter,
        page: Page,
    ) -> Result<Vec<CompanyOverride>> {
        let state = self.record(format!("list_company_overrides offset={}", page.offset));
        let matching: Vec<CompanyOverride> = state
            .overrides
            .iter()
            .filter(|o| filter.company_id.as_ref().map_or(true, |id| &o.company_id == id))
            .filter(|o| filter.feature_id.as_ref().map_or(true, |id| &o.feature_id == id))
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn create_company_override(&self, body: &CreateCompanyOverride) -> Result<CompanyOverride> {
        let mut state = self.record(format!(
            "create_company_override {} {} {}",
            body.company_id, body.feature_id, body.value
        ));
        let created = CompanyOverride {
            id: state.id("co"),
            company_id: body.company_id.clone(),
            feature_id: body.feature_id.clone(),
            feature: state.feature_ref(&body.feature_id),
            value: body.value,
        };
        state.overrides.push(created.clone());
        Ok(created)
    }

    async fn delete_company_override(&self, override_id: &str) -> Result<()> {
        let mut state = self.record(format!("delete_company_override {override_id}"));
        let before = state.overrides.len();
        state.overrides.retain(|o| o.id != override_id);
        if state.overrides.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

pub(crate) fn company(id: &str, name: &str, keys: &[(&str, &str)]) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        plan: None,
        billing_subscription: None,
        keys: keys
            .iter()
            .map(|(key, value)| CompanyKey {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn company_on_plan(id: &str, name: &str, plan: &Plan) -> Company {
    Company {
        plan: Some(PlanRef {
            id: plan.id.clone(),
            name: plan.name.clone(),
        }),
        ..company(id, name, &[])
    }
}

pub(crate) fn plan(id: &str, name: &str, company_count: u64) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        company_count,
    }
}

pub(crate) fn feature(id: &str, name: &str, feature_type: FeatureType) -> Feature {
    Feature {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        feature_type,
        event_subtype: None,
        flags: Vec::new(),
    }
}

pub(crate) fn feature_with_flag(id: &str, name: &str, feature_type: FeatureType, key: &str) -> Feature {
    Feature {
        flags: vec![Flag {
            id: format!("flag_{id}"),
            key: key.to_string(),
            name: name.to_string(),
            feature_id: Some(id.to_string()),
            default_value: false,
        }],
        ..feature(id, name, feature_type)
    }
}
