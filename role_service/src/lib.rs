pub mod dto;
pub mod entitys;
pub mod repository;
pub mod service;

pub use service::role_service::RoleService;
