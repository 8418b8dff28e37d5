//! Principal fixtures.

use stagehand_domain::policy::Principal;
use stagehand_domain::user::UserRole;
use uuid::Uuid;

pub fn admin() -> Principal {
    Principal::new(Uuid::now_v7(), UserRole::Admin, None)
}

/// An artist whose profile id is `profile_id`.
pub fn artist(profile_id: Uuid) -> Principal {
    Principal::new(Uuid::now_v7(), UserRole::Artist, Some(profile_id))
}

/// An artist that has not been provisioned a profile yet.
pub fn artist_without_profile() -> Principal {
    Principal::new(Uuid::now_v7(), UserRole::Artist, None)
}

pub fn customer() -> Principal {
    Principal::new(Uuid::now_v7(), UserRole::Customer, None)
}
