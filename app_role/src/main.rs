use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use app_role::bootstrap::{build_repository, init_log};
use app_role::handlers;
use common::config::AppConfig;
use common::errors::AppError;
use log::warn;
use role_service::RoleService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    // 读取配置文件，默认当前目录 role-config.toml
    let config_file = std::env::args().nth(1).unwrap_or_else(|| "role-config.toml".to_string());
    let app_cfg = AppConfig::new(&config_file)?;
    init_log(&app_cfg.get_sys())?;

    let repo = build_repository(&app_cfg.get_database()).await?;
    let role_service = web::Data::new(RoleService::new(repo));

    let server = app_cfg.get_server();
    let address_and_port = format!("{}:{}", server.host, server.port);
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(role_service.clone())
            // 配置 控制器
            .configure(handlers::configure)
    })
    // 允许 10 分钟超时
    .keep_alive(actix_web::http::KeepAlive::Timeout(std::time::Duration::from_secs(600)))
    .bind(address_and_port)?
    .run()
    .await?;
    Ok(())
}
