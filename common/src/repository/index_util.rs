use crate::errors::AppError;
use log::{error, info};
use mongodb::error::{ErrorKind, Result};
use mongodb::{Collection, IndexModel};

/// 集合不存在时 listIndexes 返回的错误码
pub const NAMESPACE_NOT_FOUND_CODE: i32 = 26;

/// 确保集合上存在声明的索引，已存在（按名称）的跳过
///
/// 集合尚未创建时视为没有索引，createIndexes 会顺带创建集合。
/// 唯一索引创建失败（例如集合中已有重复数据）时返回错误，由调用方决定是否中止启动。
pub async fn ensure_indexes<T: Send + Sync>(
    coll: &Collection<T>,
    target_list: Vec<IndexModel>,
) -> std::result::Result<usize, AppError> {
    let existing = existing_index_names(coll.list_index_names().await)?;
    let mut created = 0;

    for target in missing_indexes(&existing, target_list) {
        match coll.create_index(target.clone()).await {
            Ok(res) => {
                info!("✅ 创建索引成功: {} -> {}", coll.name(), res.index_name);
                created += 1;
            }
            Err(e) => {
                error!("❌ 创建索引失败: {} {}: {:?}", coll.name(), target.keys, e);
                return Err(e.into());
            }
        }
    }
    Ok(created)
}

/// listIndexes 结果：集合不存在按空列表处理
pub fn existing_index_names(listed: Result<Vec<String>>) -> Result<Vec<String>> {
    match listed {
        Err(e) if is_namespace_not_found(&e) => Ok(vec![]),
        other => other,
    }
}

fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(e) if e.code == NAMESPACE_NOT_FOUND_CODE)
}

/// 过滤掉同名索引已存在的目标；未命名的索引总是提交给服务端（createIndexes 幂等）
pub fn missing_indexes(existing: &[String], target_list: Vec<IndexModel>) -> Vec<IndexModel> {
    target_list
        .into_iter()
        .filter(|target| {
            let name = target.options.as_ref().and_then(|o| o.name.as_deref());
            !matches!(name, Some(name) if existing.iter().any(|n| n == name))
        })
        .collect()
}
