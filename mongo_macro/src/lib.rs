extern crate proc_macro;

mod mongo_index_macro;

use proc_macro::TokenStream;

/// 根据 `#[mongo_index(...)]` 属性生成 `MongoIndexModelProvider` 实现
///
/// ```ignore
/// #[derive(MongoIndexModelProvider)]
/// #[mongo_index(fields("roleName"), unique, name("role_name_unique"))]
/// #[mongo_index(fields("roleCode"), unique, name("role_code_unique"))]
/// pub struct RoleEntity { /* ... */ }
/// ```
///
/// 每个 `mongo_index` 属性对应一个索引；调用方需要引入 `MongoIndexModelProvider` trait。
#[proc_macro_derive(MongoIndexModelProvider, attributes(mongo_index))]
pub fn mongo_index_model_provider(input: TokenStream) -> TokenStream {
    mongo_index_macro::expand_index_model_provider(input)
}
