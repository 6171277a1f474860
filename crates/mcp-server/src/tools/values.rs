//! Value parsing policies for overrides and entitlements, plus feature naming rules.

use schematic_api::{EntitlementValue, Feature, FeatureType};

use crate::error::{ToolError, ToolResult};

const UNLIMITED: &str = "unlimited";

fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" => Some(true),
        "off" | "false" => Some(false),
        _ => None,
    }
}

fn is_unlimited(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(UNLIMITED)
}

/// Any finite decimal literal, whole or not, including ones too large for `i64`.
fn is_numeric_literal(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn whole_number(raw: &str, feature: &Feature) -> ToolResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        ToolError::invalid(format!(
            "{}; value must be a whole number that fits in 64 bits, got '{raw}'",
            described(feature)
        ))
    })
}

fn described(feature: &Feature) -> String {
    let article = match feature.feature_type {
        FeatureType::Event => "an",
        FeatureType::Boolean | FeatureType::Trait => "a",
    };
    format!("Feature '{}' is {article} {} feature", feature.name, feature.feature_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OverrideValue {
    pub(crate) value: EntitlementValue,
    /// The input matched no known form and fell back to boolean on.
    pub(crate) defaulted: bool,
}

/// Override values try, in order: boolean literal, `unlimited`, number. Only text that is not
/// a number at all falls back to boolean on.
pub(crate) fn override_value(raw: &str, feature: &Feature) -> ToolResult<OverrideValue> {
    let parsed = |value| OverrideValue {
        value,
        defaulted: false,
    };

    if let Some(b) = parse_bool_literal(raw) {
        return Ok(parsed(EntitlementValue::Boolean(b)));
    }
    if is_unlimited(raw) {
        return Ok(parsed(EntitlementValue::Unlimited));
    }
    if is_numeric_literal(raw) {
        if !feature.feature_type.accepts_numeric() {
            return Err(ToolError::invalid(format!(
                "{}; numeric values are only allowed for event or trait features",
                described(feature)
            )));
        }
        let n = whole_number(raw, feature)?;
        return Ok(parsed(EntitlementValue::Numeric(n)));
    }

    Ok(OverrideValue {
        value: EntitlementValue::Boolean(true),
        defaulted: true,
    })
}

/// Boolean features default to on; event and trait features need an explicit number or
/// `unlimited`.
pub(crate) fn entitlement_value(raw: Option<&str>, feature: &Feature) -> ToolResult<EntitlementValue> {
    match feature.feature_type {
        FeatureType::Boolean => match raw {
            None => Ok(EntitlementValue::Boolean(true)),
            Some(raw) => parse_bool_literal(raw)
                .map(EntitlementValue::Boolean)
                .ok_or_else(|| {
                    ToolError::invalid(format!(
                        "{}; value must be on/off or true/false, got '{raw}'",
                        described(feature)
                    ))
                }),
        },
        FeatureType::Event | FeatureType::Trait => {
            let Some(raw) = raw else {
                return Err(ToolError::invalid(format!(
                    "{}; provide a numeric value or 'unlimited'",
                    described(feature)
                )));
            };
            if is_unlimited(raw) {
                return Ok(EntitlementValue::Unlimited);
            }
            if !is_numeric_literal(raw) {
                return Err(ToolError::invalid(format!(
                    "{}; value must be a number or 'unlimited', got '{raw}'",
                    described(feature)
                )));
            }
            whole_number(raw, feature).map(EntitlementValue::Numeric)
        }
    }
}

/// Capitalize the first letter of every word; the rest of each word is kept as typed.
pub(crate) fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flag key derived from a feature name: lowercase ASCII words joined by `_`.
pub(crate) fn flag_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_end_matches('_').to_string()
}
