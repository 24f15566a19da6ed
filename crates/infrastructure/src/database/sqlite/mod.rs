pub mod sqlite_case_repository;

pub use sqlite_case_repository::SqliteCaseRepository;
