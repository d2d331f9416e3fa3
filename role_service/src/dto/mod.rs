pub mod role_dto;
