use mongodb::IndexModel;

/// 实体声明的集合索引，通常由 `mongo_macro::MongoIndexModelProvider` 派生
pub trait MongoIndexModelProvider {
    fn index_models() -> Vec<IndexModel>;
}
