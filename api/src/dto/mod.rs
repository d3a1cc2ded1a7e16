pub mod auth_dto;

pub use auth_dto::{AuthResponseDto, LoginRequest, RegisterRequest, UserResponse};
