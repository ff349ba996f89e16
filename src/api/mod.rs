//! Backend access: base-origin resolution and the REST client.

pub mod base;
pub mod client;

pub use self::base::{ApiEndpoints, MACHINE_INFO_ROUTE, TODOS_ROUTE, resolve_api_base};
pub use self::client::{ApiClient, ApiError};
