use crate::errors::AppError;
use config::{Config, Environment, Map};
use serde::Deserialize;

/// 应用配置（TOML 文件 + `APP_` 前缀环境变量）
///
/// 环境变量形如 `APP_<SECTION>__<KEY>`：前缀后接单个 `_`，层级之间用 `__`，
/// 因此键名里的下划线保持原样，例如 `APP_DATABASE__DB_NAME=roles`、`APP_SERVER__PORT=9000`。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
    pub sys: Option<SysConfig>,
}

impl AppConfig {
    /// 加载配置文件，进程环境变量优先级更高
    pub fn new(file: &str) -> Result<Self, AppError> {
        Self::load(file, None)
    }

    /// `env` 为 None 时读取进程环境变量，否则只使用给定的变量表
    pub fn load(file: &str, env: Option<Map<String, String>>) -> Result<Self, AppError> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(true))
            .add_source(env_source().source(env))
            .build()?;
        Ok(config.try_deserialize::<AppConfig>()?)
    }

    pub fn get_database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }
    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("APP").prefix_separator("_").separator("__")
}

/// 存储引擎
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreEngine {
    #[default]
    Mongo,
    /// 进程内存储，重启即丢失
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub db_name: String,
    #[serde(default)]
    pub engine: StoreEngine,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            db_name: "role_registry".to_string(),
            engine: StoreEngine::Mongo,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    //全局日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("role-config.toml");
        fs::write(
            &path,
            r#"
[database]
url = "mongodb://db.internal:27017"
db_name = "roles_test"
engine = "memory"

[server]
host = "127.0.0.1"
port = 9100

[sys]
log_level = "debug"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(path.to_str().unwrap(), Some(Map::new())).unwrap();
        let db = cfg.get_database();
        assert_eq!(db.url, "mongodb://db.internal:27017");
        assert_eq!(db.db_name, "roles_test");
        assert_eq!(db.engine, StoreEngine::Memory);
        assert_eq!(cfg.get_server().port, 9100);
        assert_eq!(cfg.get_sys().log_level, "debug");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.toml");
        fs::write(&path, "[database]\nurl = \"mongodb://localhost:27017\"\ndb_name = \"x\"\n")
            .unwrap();

        let cfg = AppConfig::load(path.to_str().unwrap(), Some(Map::new())).unwrap();
        assert_eq!(cfg.get_database().engine, StoreEngine::Mongo);
        assert_eq!(cfg.get_server().port, 8080);
        assert_eq!(cfg.get_sys().log_level, "info");
    }

    #[test]
    fn test_env_overrides_keep_underscored_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("role-config.toml");
        fs::write(
            &path,
            r#"
[database]
url = "mongodb://localhost:27017"
db_name = "role_registry"

[server]
host = "0.0.0.0"
port = 8080
"#,
        )
        .unwrap();

        let env = Map::from([
            ("APP_DATABASE__DB_NAME".to_string(), "roles_from_env".to_string()),
            ("APP_DATABASE__ENGINE".to_string(), "memory".to_string()),
            ("APP_SERVER__PORT".to_string(), "9000".to_string()),
            ("APP_SYS__LOG_LEVEL".to_string(), "warn".to_string()),
            ("OTHER_SERVER__PORT".to_string(), "1".to_string()),
        ]);
        let cfg = AppConfig::load(path.to_str().unwrap(), Some(env)).unwrap();
        let db = cfg.get_database();
        assert_eq!(db.db_name, "roles_from_env");
        assert_eq!(db.engine, StoreEngine::Memory);
        assert_eq!(db.url, "mongodb://localhost:27017");
        assert_eq!(cfg.get_server().port, 9000);
        assert_eq!(cfg.get_server().host, "0.0.0.0");
        assert_eq!(cfg.get_sys().log_level, "warn");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::new("/nonexistent/role-config.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
