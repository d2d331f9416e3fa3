pub mod memory_role_repository;
pub mod mongo_role_repository;

use crate::entitys::role_entity::{RoleEntity, RolePatch};
use async_trait::async_trait;
use common::errors::AppError;
use mongodb::bson::oid::ObjectId;

pub use memory_role_repository::MemoryRoleRepository;
pub use mongo_role_repository::MongoRoleRepository;

/// 角色存储
///
/// 写操作违反 roleName / roleCode 唯一约束时返回 `AppError::Conflict`。
/// 未命中的 id 以 `None` / `false` 返回，由服务层转换为 `NotFound`。
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn insert(&self, role: &RoleEntity) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<RoleEntity>, AppError>;
    async fn find_by_name(&self, role_name: &str) -> Result<Option<RoleEntity>, AppError>;
    async fn find_by_code(&self, role_code: f64) -> Result<Option<RoleEntity>, AppError>;
    /// 按 `_id` 升序（即创建顺序）
    async fn list(&self) -> Result<Vec<RoleEntity>, AppError>;
    async fn update(
        &self,
        id: &ObjectId,
        patch: &RolePatch,
    ) -> Result<Option<RoleEntity>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

pub(crate) fn conflict(field: &str) -> AppError {
    AppError::Conflict(format!("{} already exists", field))
}
