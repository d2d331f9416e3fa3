use crate::entitys::role_entity::{RoleEntity, deserialize_role_code, serialize_role_code};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 创建角色请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleDto {
    /// 角色名称
    #[schema(example = "Admin")]
    #[validate(
        required(message = "roleName is required"),
        length(min = 1, message = "roleName is required")
    )]
    pub role_name: Option<String>,
    /// 角色编码，数值或数字字符串
    #[schema(example = 1)]
    #[serde(default, deserialize_with = "deserialize_role_code")]
    #[validate(required(message = "roleCode is required"))]
    pub role_code: Option<f64>,
}

/// 修改角色请求体，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleDto {
    #[schema(example = "Editor")]
    #[validate(length(min = 1, message = "roleName is required"))]
    pub role_name: Option<String>,
    #[schema(example = 2)]
    #[serde(default, deserialize_with = "deserialize_role_code")]
    pub role_code: Option<f64>,
}

/// 角色响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    /// ObjectId 十六进制字符串
    #[schema(example = "66f1c0a3e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub role_name: String,
    #[serde(serialize_with = "serialize_role_code")]
    pub role_code: f64,
}

impl From<RoleEntity> for RoleDto {
    fn from(role: RoleEntity) -> Self {
        Self { id: role.id.to_hex(), role_name: role.role_name, role_code: role.role_code }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_code(value: serde_json::Value) -> Result<Option<f64>, serde_json::Error> {
        serde_json::from_value::<CreateRoleDto>(json!({ "roleName": "Admin", "roleCode": value }))
            .map(|dto| dto.role_code)
    }

    #[test]
    fn test_accepted_code_forms() {
        assert_eq!(parse_code(json!(1)).unwrap(), Some(1.0));
        assert_eq!(parse_code(json!(-3)).unwrap(), Some(-3.0));
        assert_eq!(parse_code(json!(1.5)).unwrap(), Some(1.5));
        assert_eq!(parse_code(json!(2.0)).unwrap(), Some(2.0));
        assert_eq!(parse_code(json!(1e3)).unwrap(), Some(1000.0));
        assert_eq!(parse_code(json!("12")).unwrap(), Some(12.0));
        assert_eq!(parse_code(json!(" 4.25 ")).unwrap(), Some(4.25));
    }

    #[test]
    fn test_absent_code_forms() {
        assert_eq!(parse_code(json!(null)).unwrap(), None);
        assert_eq!(parse_code(json!("")).unwrap(), None);
        let dto: CreateRoleDto = serde_json::from_value(json!({ "roleName": "Admin" })).unwrap();
        assert_eq!(dto.role_code, None);
    }

    #[test]
    fn test_rejected_code_forms() {
        for bad in [json!("one"), json!("NaN"), json!("inf"), json!(true), json!([1]), json!({})] {
            assert!(parse_code(bad.clone()).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_integral_codes_render_as_integers() {
        let dto = RoleDto { id: "x".into(), role_name: "Admin".into(), role_code: 2.0 };
        assert_eq!(serde_json::to_value(&dto).unwrap()["roleCode"], json!(2));
        let dto = RoleDto { role_code: 1.5, ..dto };
        assert_eq!(serde_json::to_value(&dto).unwrap()["roleCode"], json!(1.5));
    }
}
