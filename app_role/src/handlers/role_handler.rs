use crate::result::ApiResponse;
use actix_web::{Responder, delete, get, post, put, web};
use common::errors::AppError;
use role_service::RoleService;
use role_service::dto::role_dto::{CreateRoleDto, RoleDto, UpdateRoleDto};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // list 需在 {id} 之前注册
    cfg.service(role_list);
    cfg.service(role_create);
    cfg.service(role_info);
    cfg.service(role_update);
    cfg.service(role_delete);
}

#[utoipa::path(
    post,
    path = "/role",
    summary = "创建角色",
    tag = "角色管理",
    request_body = CreateRoleDto,
    responses(
        (status = 200, description = "创建成功", body = ApiResponse<RoleDto>),
        (status = 400, description = "roleName / roleCode 缺失"),
        (status = 409, description = "roleName / roleCode 已存在")
    )
)]
#[post("/role")]
pub async fn role_create(
    service: web::Data<RoleService>,
    dto: web::Json<CreateRoleDto>,
) -> Result<impl Responder, AppError> {
    let role = service.create(&dto).await?;
    Ok(web::Json(ApiResponse::ok(RoleDto::from(role))))
}

#[utoipa::path(
    get,
    path = "/role/list",
    summary = "角色列表",
    tag = "角色管理",
    responses(
        (status = 200, description = "按创建顺序", body = ApiResponse<Vec<RoleDto>>)
    )
)]
#[get("/role/list")]
pub async fn role_list(service: web::Data<RoleService>) -> Result<impl Responder, AppError> {
    let roles: Vec<RoleDto> = service.list().await?.into_iter().map(RoleDto::from).collect();
    Ok(web::Json(ApiResponse::ok(roles)))
}

#[utoipa::path(
    get,
    path = "/role/{id}",
    summary = "角色详情",
    tag = "角色管理",
    params(("id" = String, Path, description = "角色 ID")),
    responses(
        (status = 200, description = "角色信息", body = ApiResponse<RoleDto>),
        (status = 404, description = "角色不存在")
    )
)]
#[get("/role/{id}")]
pub async fn role_info(
    service: web::Data<RoleService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let role = service.get(&id.into_inner()).await?;
    Ok(web::Json(ApiResponse::ok(RoleDto::from(role))))
}

#[utoipa::path(
    put,
    path = "/role/{id}",
    summary = "修改角色",
    tag = "角色管理",
    params(("id" = String, Path, description = "角色 ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "修改后的角色", body = ApiResponse<RoleDto>),
        (status = 404, description = "角色不存在"),
        (status = 409, description = "roleName / roleCode 已存在")
    )
)]
#[put("/role/{id}")]
pub async fn role_update(
    service: web::Data<RoleService>,
    id: web::Path<String>,
    dto: web::Json<UpdateRoleDto>,
) -> Result<impl Responder, AppError> {
    let role = service.update(&id.into_inner(), &dto).await?;
    Ok(web::Json(ApiResponse::ok(RoleDto::from(role))))
}

#[utoipa::path(
    delete,
    path = "/role/{id}",
    summary = "删除角色",
    tag = "角色管理",
    params(("id" = String, Path, description = "角色 ID")),
    responses(
        (status = 200, description = "删除成功", body = ApiResponse<String>),
        (status = 404, description = "角色不存在")
    )
)]
#[delete("/role/{id}")]
pub async fn role_delete(
    service: web::Data<RoleService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    service.delete(&id.into_inner()).await?;
    Ok(web::Json(ApiResponse::empty()))
}
