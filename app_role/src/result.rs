use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 统一响应结构
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: 200, message: "ok".to_string(), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        Self { code: 200, message: "ok".to_string(), data: None }
    }
}
