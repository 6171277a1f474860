//! Wire models for the Schematic REST API.
//!
//! Only the fields the MCP tools read or write are modelled; everything else in the
//! responses is ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Company key used to link a Schematic company to its Stripe customer.
pub const STRIPE_CUSTOMER_KEY: &str = "stripe_customer_id";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub plan: Option<PlanRef>,
    #[serde(default)]
    pub billing_subscription: Option<BillingSubscription>,
    #[serde(default)]
    pub keys: Vec<CompanyKey>,
}

impl Company {
    /// Display name, or the id when the company has no name.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn key(&self, name: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|k| k.key == name)
            .map(|k| k.value.as_str())
    }

    pub fn trial_end(&self) -> Option<DateTime<Utc>> {
        self.billing_subscription
            .as_ref()
            .and_then(|sub| sub.trial_end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyKey {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BillingSubscription {
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trial_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Boolean,
    Event,
    Trait,
}

impl FeatureType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Event => "event",
            Self::Trait => "trait",
        }
    }

    /// Event and trait features carry a magnitude; boolean features only toggle.
    pub fn accepts_numeric(self) -> bool {
        matches!(self, Self::Event | Self::Trait)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "boolean" => Some(Self::Boolean),
            "event" => Some(Self::Event),
            "trait" => Some(Self::Trait),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub feature_type: FeatureType,
    #[serde(default)]
    pub event_subtype: Option<String>,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl Feature {
    pub fn flag_key(&self) -> Option<&str> {
        self.flags.first().map(|flag| flag.key.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flag {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub feature_id: Option<String>,
    #[serde(default)]
    pub default_value: bool,
}

/// Minimal feature shape embedded in entitlement and override responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A plan entitlement or company override value.
///
/// On the wire this is `value_type` plus one of `value_bool` / `value_numeric`; exactly
/// the field matching the tag is ever populated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "WireValue", into = "WireValue")]
pub enum EntitlementValue {
    Boolean(bool),
    Numeric(i64),
    Unlimited,
}

impl EntitlementValue {
    pub fn value_type(self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Numeric(_) => "numeric",
            Self::Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for EntitlementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(true) => f.write_str("on"),
            Self::Boolean(false) => f.write_str("off"),
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireValue {
    value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_bool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_numeric: Option<i64>,
}

impl TryFrom<WireValue> for EntitlementValue {
    type Error = String;

    fn try_from(wire: WireValue) -> Result<Self, Self::Error> {
        match wire.value_type.as_str() {
            "boolean" => wire
                .value_bool
                .map(Self::Boolean)
                .ok_or_else(|| "boolean value without value_bool".to_string()),
            "numeric" => wire
                .value_numeric
                .map(Self::Numeric)
                .ok_or_else(|| "numeric value without value_numeric".to_string()),
            "unlimited" => Ok(Self::Unlimited),
            other => Err(format!("unsupported value_type '{other}'")),
        }
    }
}

impl From<EntitlementValue> for WireValue {
    fn from(value: EntitlementValue) -> Self {
        let value_type = value.value_type().to_string();
        match value {
            EntitlementValue::Boolean(b) => Self {
                value_type,
                value_bool: Some(b),
                value_numeric: None,
            },
            EntitlementValue::Numeric(n) => Self {
                value_type,
                value_bool: None,
                value_numeric: Some(n),
            },
            EntitlementValue::Unlimited => Self {
                value_type,
                value_bool: None,
                value_numeric: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntitlement {
    pub id: String,
    pub plan_id: String,
    pub feature_id: String,
    #[serde(default)]
    pub feature: Option<FeatureRef>,
    #[serde(flatten)]
    pub value: EntitlementValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyOverride {
    pub id: String,
    pub company_id: String,
    pub feature_id: String,
    #[serde(default)]
    pub feature: Option<FeatureRef>,
    #[serde(flatten)]
    pub value: EntitlementValue,
}

impl CompanyOverride {
    pub fn feature_label(&self) -> &str {
        match self.feature.as_ref() {
            Some(feature) if !feature.name.trim().is_empty() => &feature.name,
            _ => &self.feature_id,
        }
    }
}

impl PlanEntitlement {
    pub fn feature_label(&self) -> &str {
        match self.feature.as_ref() {
            Some(feature) if !feature.name.trim().is_empty() => &feature.name,
            _ => &self.feature_id,
        }
    }
}

// ============================================================================
// Request bodies and filters
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePlan {
    pub name: String,
    pub description: String,
    pub plan_type: String,
}

impl CreatePlan {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            plan_type: "plan".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateFeature {
    pub name: String,
    pub description: String,
    pub feature_type: FeatureType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_subtype: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateFlag {
    pub key: String,
    pub name: String,
    pub description: String,
    pub feature_id: String,
    pub flag_type: String,
    pub default_value: bool,
}

impl CreateFlag {
    /// Boolean flag, off by default, attached to `feature_id`.
    pub fn boolean(
        key: impl Into<String>,
        name: impl Into<String>,
        feature_id: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            key: key.into(),
            description: format!("Flag for {name}"),
            name,
            feature_id: feature_id.into(),
            flag_type: "boolean".to_string(),
            default_value: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePlanEntitlement {
    pub plan_id: String,
    pub feature_id: String,
    #[serde(flatten)]
    pub value: EntitlementValue,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateCompanyOverride {
    pub company_id: String,
    pub feature_id: String,
    #[serde(flatten)]
    pub value: EntitlementValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Free-text search over company names.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementFilter {
    pub plan_id: Option<String>,
    pub feature_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideFilter {
    pub company_id: Option<String>,
    pub feature_id: Option<String>,
}
