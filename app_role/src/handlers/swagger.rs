use crate::handlers::common_handler::*;
use crate::handlers::role_handler::*;
use crate::result::ApiResponse;
use actix_web::{HttpResponse, Responder, get, web};
use common::errors::AppError;
use role_service::dto::role_dto::{CreateRoleDto, RoleDto, UpdateRoleDto};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status,
        //角色-管理
        role_create,
        role_list,
        role_info,
        role_update,
        role_delete,
    ),
    components(schemas(
        ApiResponse<String>,
        ApiResponse<RoleDto>,
        CreateRoleDto,
        UpdateRoleDto,
        RoleDto,
    )),
    tags(
        (name = "角色管理", description = "Role 增删改查")
    )
)]
struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/openapi.json")]
async fn openapi_json() -> Result<impl Responder, AppError> {
    let json = ApiDoc::openapi().to_json()?;
    Ok(HttpResponse::Ok().content_type("application/json").body(json))
}
