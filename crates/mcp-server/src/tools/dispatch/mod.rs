//! MCP tool dispatch for the Schematic server.
//!
//! Every `tools/call` lands in [`SchematicService::dispatch`], which routes by name to a
//! handler in [`router`] and turns the handler's [`ToolError`] into one `ErrorData` shape.

mod router;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use schematic_api::BillingApi;
use std::sync::Arc;

use super::args::parse;
use super::catalog;
use crate::error::{ToolError, ToolResult};

/// The upstream client, or the reason there is none.
#[derive(Clone)]
pub enum ApiHandle {
    Ready(Arc<dyn BillingApi>),
    /// Tools stay listable; every call fails with this message.
    Unconfigured(String),
}

impl ApiHandle {
    fn api(&self) -> ToolResult<&dyn BillingApi> {
        match self {
            Self::Ready(api) => Ok(api.as_ref()),
            Self::Unconfigured(reason) => Err(ToolError::ConfigurationMissing(reason.clone())),
        }
    }
}

#[derive(Clone)]
pub struct SchematicService {
    api: ApiHandle,
}

impl SchematicService {
    pub fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        log::debug!("tool call: {name}");
        match self.route(name, arguments.as_ref()).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => {
                log::warn!("tool {name} failed ({}): {err}", err.kind());
                Err(err.into_error_data())
            }
        }
    }

    async fn route(&self, name: &str, args: Option<&JsonObject>) -> ToolResult<String> {
        if catalog::find(name).is_none() {
            return Err(ToolError::UnknownTool(name.to_string()));
        }
        let api = self.api.api()?;

        match name {
            "get_company" => router::companies::get_company(api, parse(args)?).await,
            "get_company_plan" => router::companies::get_company_plan(api, parse(args)?).await,
            "get_company_trial_info" => {
                router::companies::get_company_trial_info(api, parse(args)?).await
            }
            "link_stripe_to_schematic" => {
                router::companies::link_stripe_to_schematic(api, parse(args)?).await
            }
            "count_companies_on_plan" => {
                router::plans::count_companies_on_plan(api, parse(args)?).await
            }
            "list_plans" => {
                parse::<super::schemas::EmptyRequest>(args)?;
                router::plans::list_plans(api).await
            }
            "create_plan" => router::plans::create_plan(api, parse(args)?).await,
            "list_plan_entitlements" => {
                router::entitlements::list_plan_entitlements(api, parse(args)?).await
            }
            "add_entitlements_to_plan" => {
                router::entitlements::add_entitlements_to_plan(api, parse(args)?).await
            }
            "list_features" => {
                parse::<super::schemas::EmptyRequest>(args)?;
                router::features::list_features(api).await
            }
            "create_feature" => router::features::create_feature(api, parse(args)?).await,
            "list_company_overrides" => {
                router::overrides::list_company_overrides(api, parse(args)?).await
            }
            "set_company_override" => {
                router::overrides::set_company_override(api, parse(args)?).await
            }
            "remove_company_override" => {
                router::overrides::remove_company_override(api, parse(args)?).await
            }
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}

impl ServerHandler for SchematicService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(catalog::tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}
