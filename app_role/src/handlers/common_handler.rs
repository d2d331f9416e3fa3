use crate::result::ApiResponse;
use actix_web::{Responder, get, web};
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status);
}
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "服务存活", body = ApiResponse<String>)
    )
)]
#[get("/status")]
pub async fn status() -> Result<impl Responder, AppError> {
    Ok(web::Json(ApiResponse::ok("up".to_string())))
}
