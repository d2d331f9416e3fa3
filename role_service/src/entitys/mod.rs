pub mod role_entity;
