//! Repository interfaces (ports) consumed by the use-case services.

pub mod user;

pub use user::{MockUserRepository, UserCommandRepository, UserQueryRepository};
