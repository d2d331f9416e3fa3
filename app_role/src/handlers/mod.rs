use actix_web::web;
use common::errors::AppError;

pub mod common_handler;
pub mod role_handler;
pub mod swagger;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // 请求体解析失败与业务校验失败使用同一错误结构
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );
    common_handler::configure(cfg);
    role_handler::configure(cfg);
    swagger::configure(cfg);
}
