#![doc = "The `taskkeeper` library crate."]
#![doc = ""]
#![doc = "User accounts and per-user tasks over HTTP. Callers log in for an opaque session"]
#![doc = "token; sessions and tasks are never physically deleted but tombstoned through a"]
#![doc = "`validTill` timestamp. The binary (`main.rs`) wires configuration, storage and the"]
#![doc = "actix-web server around the pieces declared here."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
