pub mod manager;
pub mod sqlite;

pub use manager::{connect_case_store, run_migrations};
pub use sqlite::SqliteCaseRepository;
