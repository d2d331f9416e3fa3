use common::index_trait::MongoIndexModelProvider;
use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use mongodb::bson::Bson;
use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 集合名（模型名 Role 的复数小写形式）
pub const ROLE_COLLECTION: &str = "roles";
pub const FIELD_ROLE_NAME: &str = "roleName";
pub const FIELD_ROLE_CODE: &str = "roleCode";
pub const ROLE_NAME_INDEX: &str = "role_name_unique";
pub const ROLE_CODE_INDEX: &str = "role_code_unique";

/// 2^53，超过后 f64 不再能精确表示每个整数
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 角色信息，名称与编码均全局唯一，由集合上的唯一索引保证
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[serde(rename_all = "camelCase")]
#[mongo_index(fields("roleName"), unique, name("role_name_unique"))]
#[mongo_index(fields("roleCode"), unique, name("role_code_unique"))]
pub struct RoleEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 角色名称（如 "Admin"）
    pub role_name: String,
    /// 角色编码，任意有限数值；整数按 int64 存储，其余按 double
    #[serde(serialize_with = "serialize_role_code")]
    pub role_code: f64,
}

impl RoleEntity {
    pub fn new(role_name: String, role_code: f64) -> Self {
        Self { id: ObjectId::new(), role_name, role_code }
    }
}

/// 部分更新，None 表示不修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolePatch {
    pub role_name: Option<String>,
    pub role_code: Option<f64>,
}

impl RolePatch {
    pub fn is_empty(&self) -> bool {
        self.role_name.is_none() && self.role_code.is_none()
    }

    pub fn apply(&self, role: &mut RoleEntity) {
        if let Some(ref name) = self.role_name {
            role.role_name = name.clone();
        }
        if let Some(code) = self.role_code {
            role.role_code = code;
        }
    }
}

fn as_integer(code: f64) -> Option<i64> {
    (code.fract() == 0.0 && code.abs() < MAX_SAFE_INTEGER).then_some(code as i64)
}

/// 编码的存储形式；MongoDB 索引按数值比较，int64 与 double 的 1 视为同一个值
pub fn role_code_bson(code: f64) -> Bson {
    match as_integer(code) {
        Some(n) => Bson::Int64(n),
        None => Bson::Double(code),
    }
}

/// 整数编码输出为整数（`2` 而不是 `2.0`）
pub fn serialize_role_code<S: Serializer>(code: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_integer(*code) {
        Some(n) => serializer.serialize_i64(n),
        None => serializer.serialize_f64(*code),
    }
}

/// 请求中的编码：数值或数字字符串（去除首尾空白，空串视为未提供），拒绝 NaN / Infinity
pub fn deserialize_role_code<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    deserializer.deserialize_any(RoleCodeVisitor)
}

struct RoleCodeVisitor;

impl RoleCodeVisitor {
    fn finite<E: de::Error>(code: f64) -> Result<Option<f64>, E> {
        if code.is_finite() {
            Ok(Some(code))
        } else {
            Err(E::custom(format!("roleCode must be a finite number, got {}", code)))
        }
    }
}

impl<'de> Visitor<'de> for RoleCodeVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Self::finite(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(code) => Self::finite(code),
            Err(_) => Err(E::custom(format!("roleCode is not a number: {:?}", v))),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(RoleCodeVisitor)
    }
}
