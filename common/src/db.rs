use crate::config::DatabaseConfig;
use crate::errors::AppError;
use log::info;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// 创建 MongoDB 连接并返回数据库句柄（连接池由驱动维护）
pub async fn init_db(config: &DatabaseConfig) -> Result<Database, AppError> {
    let options = ClientOptions::parse(&config.url).await?;
    let client = Client::with_options(options)?;
    info!("MongoDB connected, database: {}", config.db_name);
    Ok(client.database(&config.db_name))
}
