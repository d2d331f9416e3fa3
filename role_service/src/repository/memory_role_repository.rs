use crate::entitys::role_entity::{FIELD_ROLE_CODE, FIELD_ROLE_NAME, RoleEntity, RolePatch};
use crate::repository::{RoleRepository, conflict};
use async_trait::async_trait;
use common::errors::AppError;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// 进程内角色存储，按 `_id` 有序，在写锁内模拟 roleName / roleCode 两个唯一索引
///
/// 编码按数值比较，与 MongoDB 索引一致（`2` 与 `2.0` 视为同一个值）。
#[derive(Debug, Default)]
pub struct MemoryRoleRepository {
    roles: RwLock<BTreeMap<ObjectId, RoleEntity>>,
}

impl MemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(
    roles: &BTreeMap<ObjectId, RoleEntity>,
    candidate: &RoleEntity,
) -> Result<(), AppError> {
    for other in roles.values().filter(|r| r.id != candidate.id) {
        if other.role_name == candidate.role_name {
            return Err(conflict(FIELD_ROLE_NAME));
        }
        if other.role_code == candidate.role_code {
            return Err(conflict(FIELD_ROLE_CODE));
        }
    }
    Ok(())
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn insert(&self, role: &RoleEntity) -> Result<(), AppError> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.id) {
            return Err(conflict("_id"));
        }
        check_unique(&roles, role)?;
        roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<RoleEntity>, AppError> {
        Ok(self.roles.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, role_name: &str) -> Result<Option<RoleEntity>, AppError> {
        Ok(self.roles.read().await.values().find(|r| r.role_name == role_name).cloned())
    }

    async fn find_by_code(&self, role_code: f64) -> Result<Option<RoleEntity>, AppError> {
        Ok(self.roles.read().await.values().find(|r| r.role_code == role_code).cloned())
    }

    async fn list(&self) -> Result<Vec<RoleEntity>, AppError> {
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: &RolePatch,
    ) -> Result<Option<RoleEntity>, AppError> {
        let mut roles = self.roles.write().await;
        let Some(current) = roles.get(id) else {
            return Ok(None);
        };
        let mut updated = current.clone();
        patch.apply(&mut updated);
        check_unique(&roles, &updated)?;
        roles.insert(*id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        Ok(self.roles.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unique_name_and_code() {
        let repo = MemoryRoleRepository::new();
        repo.insert(&RoleEntity::new("Admin".into(), 1.0)).await.unwrap();

        let err = repo.insert(&RoleEntity::new("Admin".into(), 2.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains(FIELD_ROLE_NAME)));

        let err = repo.insert(&RoleEntity::new("Editor".into(), 1.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains(FIELD_ROLE_CODE)));

        repo.insert(&RoleEntity::new("Editor".into(), 2.0)).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fractional_codes_are_distinct_values() {
        let repo = MemoryRoleRepository::new();
        repo.insert(&RoleEntity::new("One".into(), 1.0)).await.unwrap();
        repo.insert(&RoleEntity::new("OneAndHalf".into(), 1.5)).await.unwrap();

        let err = repo.insert(&RoleEntity::new("Dup".into(), 1.5)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains(FIELD_ROLE_CODE)));
        let found = repo.find_by_code(1.5).await.unwrap().unwrap();
        assert_eq!(found.role_name, "OneAndHalf");
    }

    #[tokio::test]
    async fn test_update_keeps_own_values_and_rejects_others() {
        let repo = MemoryRoleRepository::new();
        let admin = RoleEntity::new("Admin".into(), 1.0);
        let editor = RoleEntity::new("Editor".into(), 2.0);
        repo.insert(&admin).await.unwrap();
        repo.insert(&editor).await.unwrap();

        // 自身原值不算冲突
        let same = RolePatch { role_name: Some("Admin".into()), role_code: Some(1.0) };
        assert_eq!(repo.update(&admin.id, &same).await.unwrap(), Some(admin.clone()));

        let steal_code = RolePatch { role_name: None, role_code: Some(2.0) };
        let result = repo.update(&admin.id, &steal_code).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.find_by_id(&admin.id).await.unwrap(), Some(admin));
        assert_eq!(repo.find_by_id(&editor.id).await.unwrap(), Some(editor));
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let repo = MemoryRoleRepository::new();
        let id = ObjectId::new();
        let rename = RolePatch { role_name: Some("X".into()), role_code: None };
        assert_eq!(repo.find_by_id(&id).await.unwrap(), None);
        assert_eq!(repo.update(&id, &rename).await.unwrap(), None);
        assert!(!repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let repo = MemoryRoleRepository::new();
        for (i, name) in ["Viewer", "Admin", "Editor"].iter().enumerate() {
            repo.insert(&RoleEntity::new(name.to_string(), i as f64)).await.unwrap();
        }
        let roles = repo.list().await.unwrap();
        let names: Vec<String> = roles.into_iter().map(|r| r.role_name).collect();
        assert_eq!(names, vec!["Viewer", "Admin", "Editor"]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_same_name() {
        let repo = Arc::new(MemoryRoleRepository::new());
        let mut handles = vec![];
        for code in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(&RoleEntity::new("Admin".into(), code as f64)).await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
