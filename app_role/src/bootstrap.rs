use common::config::{DatabaseConfig, StoreEngine, SysConfig};
use common::db::init_db;
use common::errors::AppError;
use log::{LevelFilter, info, warn};
use role_service::repository::{MemoryRoleRepository, MongoRoleRepository, RoleRepository};
use std::str::FromStr;
use std::sync::Arc;

pub fn init_log(sys: &SysConfig) -> Result<(), AppError> {
    let level = LevelFilter::from_str(&sys.log_level).map_err(|e| {
        AppError::Internal(format!("invalid sys.log_level {:?}: {}", sys.log_level, e))
    })?;
    env_logger::Builder::new().filter(None, level).init();
    Ok(())
}

/// 按配置的存储引擎构建角色存储；Mongo 引擎启动时确保唯一索引存在
pub async fn build_repository(
    config: &DatabaseConfig,
) -> Result<Arc<dyn RoleRepository>, AppError> {
    match config.engine {
        StoreEngine::Mongo => {
            let db = init_db(config).await?;
            let repo = MongoRoleRepository::new(&db);
            let created = repo.ensure_indexes().await?;
            info!("role indexes ready, {} created", created);
            Ok(Arc::new(repo))
        }
        StoreEngine::Memory => {
            warn!("using in-memory role store, data is lost on restart");
            Ok(Arc::new(MemoryRoleRepository::new()))
        }
    }
}
