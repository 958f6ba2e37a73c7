use serde::{Deserialize, Serialize};

use crate::query::{ResultRecord, SearchInput};
use crate::schema::{FieldDescriptor, SearchConfig};

/// Search request body
///
/// ```json
/// {
///   "config_id": 1,
///   "content_type_id": 2,
///   "search_data": {
///     "name": "lamp",
///     "status": "active",
///     "category": ["1", "3"],
///     "created_min": "01.01.2024"
///   },
///   "limit": 10
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequestApi {
    pub config_id: u64,
    pub content_type_id: u32,
    #[serde(default)]
    pub search_data: SearchInput,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub order_by: Option<String>,
}

/// Successful search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<ResultRecord>,
    pub total: u64,
    pub has_more: bool,
    pub show_count: bool,
    pub search_id: String,
}

/// Choice list for one field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoicesResponse {
    pub success: bool,
    pub choices: Vec<ChoiceItem>,
    pub field_type: String,
}

/// One (value, label) pair on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub value: String,
    pub label: String,
}

/// Panel view: a configuration plus its visible fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelResponse {
    pub success: bool,
    pub config: SearchConfig,
    pub fields: Vec<FieldDescriptor>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
