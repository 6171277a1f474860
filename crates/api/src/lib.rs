//! Schematic REST client
//!
//! Thin typed client for the parts of the Schematic API that the MCP server exposes:
//! companies, plans, features, flags, plan entitlements and company overrides.
//!
//! ## Modules
//!
//! - [`client`] - the [`BillingApi`] seam and its reqwest implementation
//! - [`models`] - wire models, including the tagged [`EntitlementValue`]
//! - [`pagination`] - offset pagination driven to completion

pub mod client;
pub mod error;
pub mod models;
pub mod pagination;

pub use client::{BillingApi, HttpBillingApi, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use models::{
    BillingSubscription, Company, CompanyFilter, CompanyKey, CompanyOverride,
    CreateCompanyOverride, CreateFeature, CreateFlag, CreatePlan, CreatePlanEntitlement,
    EntitlementFilter, EntitlementValue, Feature, FeatureRef, FeatureType, Flag, OverrideFilter,
    Plan, PlanEntitlement, PlanRef, STRIPE_CUSTOMER_KEY,
};
pub use pagination::{collect_all, Page, PAGE_SIZE};
