//! sea-orm entities for the marketplace database.

pub mod artist_profiles;
pub mod availabilities;
pub mod bookings;
pub mod organizations;
pub mod payments;
pub mod reviews;
pub mod service_categories;
pub mod services;
pub mod users;
