use crate::dto::role_dto::{CreateRoleDto, UpdateRoleDto};
use crate::entitys::role_entity::{RoleEntity, RolePatch};
use crate::repository::RoleRepository;
use common::errors::AppError;
use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

/// 角色服务：参数校验 + 存储访问，唯一性由存储层保证
#[derive(Clone)]
pub struct RoleService {
    repo: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(repo: Arc<dyn RoleRepository>) -> Self {
        Self { repo }
    }

    /// 添加新角色
    pub async fn create(&self, dto: &CreateRoleDto) -> Result<RoleEntity, AppError> {
        dto.validate()?;
        let role_name = dto.role_name.clone().ok_or_else(|| required("roleName"))?;
        let role_code = dto.role_code.ok_or_else(|| required("roleCode"))?;

        let role = RoleEntity::new(role_name, role_code);
        if let Err(e) = self.repo.insert(&role).await {
            warn!("create role {}({}) failed: {}", role.role_name, role.role_code, e);
            return Err(e);
        }
        info!("role created: {} {}({})", role.id, role.role_name, role.role_code);
        Ok(role)
    }

    pub async fn get(&self, id: &str) -> Result<RoleEntity, AppError> {
        let oid = parse_id(id)?;
        self.repo.find_by_id(&oid).await?.ok_or_else(|| not_found(id))
    }

    /// 获取所有角色列表
    pub async fn list(&self) -> Result<Vec<RoleEntity>, AppError> {
        self.repo.list().await
    }

    pub async fn find_by_name(&self, role_name: &str) -> Result<Option<RoleEntity>, AppError> {
        self.repo.find_by_name(role_name).await
    }

    pub async fn find_by_code(&self, role_code: f64) -> Result<Option<RoleEntity>, AppError> {
        self.repo.find_by_code(role_code).await
    }

    /// 修改角色；未提供任何字段时返回当前记录
    pub async fn update(&self, id: &str, dto: &UpdateRoleDto) -> Result<RoleEntity, AppError> {
        let oid = parse_id(id)?;
        dto.validate()?;
        let patch = RolePatch { role_name: dto.role_name.clone(), role_code: dto.role_code };

        match self.repo.update(&oid, &patch).await {
            Ok(Some(role)) => {
                if !patch.is_empty() {
                    info!("role updated: {} {}({})", role.id, role.role_name, role.role_code);
                }
                Ok(role)
            }
            Ok(None) => Err(not_found(id)),
            Err(e) => {
                warn!("update role {} failed: {}", id, e);
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_id(id)?;
        if !self.repo.delete(&oid).await? {
            return Err(not_found(id));
        }
        info!("role deleted: {}", id);
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("invalid role id: {}", id)))
}

fn required(field: &str) -> AppError {
    AppError::Validation(format!("{} is required", field))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("role {}", id))
}
