//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed
//!   to the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to the
//!   per-port error enums.

mod diesel_login_service;
mod diesel_recipe_repository;
mod diesel_stats_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_login_service::DieselLoginService;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_stats_repository::DieselStatsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
