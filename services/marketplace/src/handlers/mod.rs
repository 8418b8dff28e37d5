pub mod dashboard;
pub mod extract;
pub mod health;
pub mod listing;
pub mod resources;
pub mod session;
pub mod views;
