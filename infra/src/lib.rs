//! # ShopEasy Infrastructure
//!
//! Concrete adapters for the ports defined in `se_core`: MySQL-backed
//! user persistence and connection pool management.

pub mod database;

pub use database::{create_pool, MySqlUserRepository};
