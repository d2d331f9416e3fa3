use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, Result, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// MongoDB 唯一索引冲突错误码
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[async_trait]
pub trait Repository<T> {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<T>>;
    async fn insert(&self, entity: &T) -> Result<()>;
    async fn find_one(&self, filter: Document) -> Result<Option<T>>;
    async fn query(&self, filter: Document, sort: Document) -> Result<Vec<T>>;
    /// 更新单条记录并返回更新后的文档，未命中返回 None
    async fn find_one_and_update(&self, filter: Document, update: Document) -> Result<Option<T>>;
    async fn delete_one(&self, filter: Document) -> Result<u64>;
}

#[derive(Debug)]
pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
    _marker: PhantomData<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection, _marker: Default::default() }
    }
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<T>> {
        self.find_one(doc! { "_id": *id }).await
    }

    async fn insert(&self, entity: &T) -> Result<()> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.collection.find_one(filter).await
    }

    async fn query(&self, filter: Document, sort: Document) -> Result<Vec<T>> {
        let cursor = self.collection.find(filter).sort(sort).await?;
        cursor.try_collect().await
    }

    async fn find_one_and_update(&self, filter: Document, update: Document) -> Result<Option<T>> {
        self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
    }

    async fn delete_one(&self, filter: Document) -> Result<u64> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}

/// 唯一索引冲突时返回服务端错误信息（包含冲突的 key），其他错误返回 None
pub fn duplicate_key_message(err: &mongodb::error::Error) -> Option<&str> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
            Some(e.message.as_str())
        }
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => Some(e.message.as_str()),
        _ => None,
    }
}
