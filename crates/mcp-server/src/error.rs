use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use schematic_api::ApiError;
use serde_json::json;
use thiserror::Error;

pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Every failure a tool call can produce.
///
/// The `Display` output is the message the caller sees; [`ToolError::into_error_data`]
/// never rewrites it.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Multiple {entity} match '{query}': {}. Use a more specific identifier.", .matches.join(", "))]
    AmbiguousMatch {
        entity: &'static str,
        query: String,
        matches: Vec<String>,
    },

    #[error("{0}")]
    ConfigurationMissing(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The API's own message; the HTTP status travels in `data.status`.
    #[error("{}", upstream_message(.0))]
    Upstream(#[from] ApiError),

    /// A multi-step write stopped partway. Reads exactly like `source`; the steps already
    /// written travel in `data.committed`.
    #[error("{source}")]
    PartiallyApplied {
        source: Box<ToolError>,
        committed: Vec<String>,
    },

    /// Already in protocol shape; forwarded untouched.
    #[error("{}", .0.message)]
    Protocol(ErrorData),
}

fn upstream_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::AmbiguousMatch { .. } => "ambiguous_match",
            Self::ConfigurationMissing(_) => "configuration_missing",
            Self::UnknownTool(_) => "unknown_tool",
            Self::Upstream(_) => "upstream_failure",
            Self::Protocol(_) => "protocol",
            Self::PartiallyApplied { source, .. } => source.kind(),
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::INVALID_PARAMS,
            Self::UnknownTool(_) => ErrorCode::METHOD_NOT_FOUND,
            Self::NotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
            Self::PartiallyApplied { source, .. } => source.code(),
            _ => ErrorCode::INTERNAL_ERROR,
        }
    }

    pub fn into_error_data(self) -> ErrorData {
        if let Self::Protocol(data) = self {
            return data;
        }
        if let Self::PartiallyApplied { source, committed } = self {
            let mut data = source.into_error_data();
            let details = data.data.get_or_insert_with(|| json!({}));
            if let Some(object) = details.as_object_mut() {
                object.insert("committed".to_string(), json!(committed));
            }
            return data;
        }
        let code = self.code();
        let mut data = json!({ "kind": self.kind() });
        if let Self::AmbiguousMatch { matches, .. } = &self {
            data["matches"] = json!(matches);
        }
        if let Self::Upstream(err) = &self {
            if let Some(status) = err.status() {
                data["status"] = json!(status);
            }
        }
        ErrorData::new(code, self.to_string(), Some(data))
    }
}

impl From<ErrorData> for ToolError {
    fn from(data: ErrorData) -> Self {
        Self::Protocol(data)
    }
}

impl From<ToolError> for ErrorData {
    fn from(err: ToolError) -> Self {
        err.into_error_data()
    }
}
