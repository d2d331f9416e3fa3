use crate::entitys::role_entity::{
    FIELD_ROLE_CODE, FIELD_ROLE_NAME, ROLE_CODE_INDEX, ROLE_COLLECTION, ROLE_NAME_INDEX,
    RoleEntity, RolePatch, role_code_bson,
};
use crate::repository::{RoleRepository, conflict};
use async_trait::async_trait;
use common::errors::AppError;
use common::index_trait::MongoIndexModelProvider;
use common::index_util::ensure_indexes;
use common::repository_util::{BaseRepository, Repository, duplicate_key_message};
use mongodb::Database;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};

#[derive(Debug)]
pub struct MongoRoleRepository {
    pub dao: BaseRepository<RoleEntity>,
}

impl MongoRoleRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection(ROLE_COLLECTION);
        Self { dao: BaseRepository::new(collection) }
    }

    /// 创建 roleName / roleCode 唯一索引，返回新建索引数
    pub async fn ensure_indexes(&self) -> Result<usize, AppError> {
        ensure_indexes(&self.dao.collection, RoleEntity::index_models()).await
    }
}

/// 唯一索引冲突转换为 Conflict，并指出冲突字段
fn map_write_error(err: mongodb::error::Error) -> AppError {
    match duplicate_key_message(&err) {
        Some(message) => conflict(duplicate_field(message)),
        None => AppError::Mongo(err),
    }
}

/// 从 E11000 错误信息中识别冲突字段
fn duplicate_field(message: &str) -> &'static str {
    if message.contains(ROLE_NAME_INDEX) || message.contains(FIELD_ROLE_NAME) {
        FIELD_ROLE_NAME
    } else if message.contains(ROLE_CODE_INDEX) || message.contains(FIELD_ROLE_CODE) {
        FIELD_ROLE_CODE
    } else {
        "_id"
    }
}

fn patch_to_set(patch: &RolePatch) -> Document {
    let mut set = Document::new();
    if let Some(ref name) = patch.role_name {
        set.insert(FIELD_ROLE_NAME, name.as_str());
    }
    if let Some(code) = patch.role_code {
        set.insert(FIELD_ROLE_CODE, role_code_bson(code));
    }
    set
}

#[async_trait]
impl RoleRepository for MongoRoleRepository {
    async fn insert(&self, role: &RoleEntity) -> Result<(), AppError> {
        self.dao.insert(role).await.map_err(map_write_error)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<RoleEntity>, AppError> {
        Ok(self.dao.find_by_id(id).await?)
    }

    async fn find_by_name(&self, role_name: &str) -> Result<Option<RoleEntity>, AppError> {
        Ok(self.dao.find_one(doc! { FIELD_ROLE_NAME: role_name }).await?)
    }

    async fn find_by_code(&self, role_code: f64) -> Result<Option<RoleEntity>, AppError> {
        // 数值比较，int32 / int64 / double 存储的同值编码都能命中
        Ok(self.dao.find_one(doc! { FIELD_ROLE_CODE: role_code }).await?)
    }

    async fn list(&self) -> Result<Vec<RoleEntity>, AppError> {
        Ok(self.dao.query(doc! {}, doc! { "_id": 1 }).await?)
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: &RolePatch,
    ) -> Result<Option<RoleEntity>, AppError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        self.dao
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": patch_to_set(patch) })
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let deleted = self.dao.delete_one(doc! { "_id": *id }).await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_from_server_message() {
        let by_name = concat!(
            "E11000 duplicate key error collection: role_registry.roles ",
            r#"index: role_name_unique dup key: { roleName: "Admin" }"#,
        );
        let by_code = concat!(
            "E11000 duplicate key error collection: role_registry.roles ",
            "index: role_code_unique dup key: { roleCode: 1 }",
        );
        let by_id = concat!(
            "E11000 duplicate key error collection: role_registry.roles ",
            "index: _id_ dup key: { _id: ObjectId('66f1c0a3e4b0a1b2c3d4e5f6') }",
        );
        assert_eq!(duplicate_field(by_name), FIELD_ROLE_NAME);
        assert_eq!(duplicate_field(by_code), FIELD_ROLE_CODE);
        assert_eq!(duplicate_field(by_id), "_id");
    }

    #[test]
    fn test_patch_to_set() {
        let patch = RolePatch { role_name: Some("Editor".into()), role_code: Some(2.0) };
        assert_eq!(patch_to_set(&patch), doc! { "roleName": "Editor", "roleCode": 2_i64 });

        let patch = RolePatch { role_name: None, role_code: Some(3.5) };
        assert_eq!(patch_to_set(&patch), doc! { "roleCode": 3.5 });
    }
}
