//! HTTP request handlers.

pub mod health;
pub mod tenants;

pub use health::{database_health_handler, health_handler, liveness_handler, readiness_handler};
pub use tenants::{
    create_handler, delete_handler, get_handler, hierarchy_handler, list_handler, update_handler,
};
