use schematic_api::pagination::all_features;
use schematic_api::{BillingApi, CreateFeature, CreateFlag, FeatureType};

use crate::error::{ToolError, ToolResult};
use crate::tools::schemas::features::CreateFeatureRequest;
use crate::tools::text::{labelled, TextBuilder};
use crate::tools::values::{flag_key, title_case};

pub(in crate::tools::dispatch) async fn list_features(api: &dyn BillingApi) -> ToolResult<String> {
    let features = all_features(api).await?;
    if features.is_empty() {
        return Ok("No features found.".to_string());
    }

    let mut doc = TextBuilder::new(&format!("Features ({}):", features.len()));
    for feature in &features {
        let flag = match feature.flag_key() {
            Some(key) => format!("flag {key}"),
            None => "no flag".to_string(),
        };
        doc.push_item(&format!(
            "{}: {}, {flag}",
            labelled(&feature.name, &feature.id),
            feature.feature_type
        ));
    }
    Ok(doc.finish())
}

pub(in crate::tools::dispatch) async fn create_feature(
    api: &dyn BillingApi,
    request: CreateFeatureRequest,
) -> ToolResult<String> {
    let kind = request.kind()?;
    if kind == FeatureType::Trait {
        return Err(ToolError::invalid(
            "Trait features cannot be created here; create them in the Schematic app, then use this server to manage their entitlements and overrides",
        ));
    }
    if kind == FeatureType::Event && request.event_subtype.is_none() {
        return Err(ToolError::invalid(
            "event_subtype is required when feature_type is 'event'",
        ));
    }

    let name = title_case(&request.name);
    let feature = api
        .create_feature(&CreateFeature {
            name: name.clone(),
            description: request.description.clone().unwrap_or_default(),
            feature_type: kind,
            event_subtype: request
                .event_subtype
                .clone()
                .filter(|_| kind == FeatureType::Event),
        })
        .await?;

    let mut doc = TextBuilder::new(&format!(
        "Created {kind} feature {}",
        labelled(&feature.name, &feature.id)
    ));
    if let Some(event) = feature.event_subtype.as_deref() {
        doc.push_field("Event", event);
    }

    let key = flag_key(&name);
    let flag_problem = if key.is_empty() {
        log::warn!("feature {} has no characters usable in a flag key", feature.id);
        Some(format!(
            "Feature created without a flag: '{name}' has no ASCII letters or digits to build a flag key from"
        ))
    } else {
        match api
            .create_flag(&CreateFlag::boolean(key.clone(), name.clone(), feature.id.clone()))
            .await
        {
            Ok(flag) => {
                doc.push_field("Flag", &flag.key);
                None
            }
            Err(err) => {
                log::warn!("flag {key} for feature {} not created: {err}", feature.id);
                Some(format!(
                    "Feature created, but flag '{key}' could not be created: {err}"
                ))
            }
        }
    };

    if name != request.name {
        doc.push_note(&format!(
            "Name converted to title case: '{}' -> '{name}'",
            request.name
        ));
    }
    if let Some(problem) = flag_problem {
        doc.push_warning(&problem);
    }
    Ok(doc.finish())
}
