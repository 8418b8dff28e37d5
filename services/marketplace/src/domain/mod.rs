pub mod record;
pub mod repository;
pub mod sort;
pub mod types;
