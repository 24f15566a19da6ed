pub mod database;
pub mod http;
pub mod observability;

pub use database::*;
pub use http::*;
pub use observability::*;
