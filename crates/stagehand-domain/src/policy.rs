//! Authorization matrix.
//!
//! Two plain functions over plain data:
//!
//! - [`can`] decides whether a principal may perform an [`Action`] on a
//!   resource class (no instance) or on a concrete instance described by its
//!   [`Ownership`] facts.
//! - [`scope`] yields the row predicate a list query must apply for that
//!   principal.
//!
//! Admins short-circuit to allow-all. Everything not granted is denied.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserRole;

/// The acting identity resolved from a bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: UserRole,
    /// The caller's own artist profile, if one has been provisioned.
    pub artist_profile_id: Option<Uuid>,
}

impl Principal {
    pub fn new(user_id: Uuid, role: UserRole, artist_profile_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            artist_profile_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_artist(&self) -> bool {
        self.role == UserRole::Artist
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Destroy,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::Read, Self::Create, Self::Update, Self::Destroy];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    ArtistProfile,
    Service,
    ServiceCategory,
    Availability,
    Booking,
    Payment,
    Review,
    Organization,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        Self::User,
        Self::ArtistProfile,
        Self::Service,
        Self::ServiceCategory,
        Self::Availability,
        Self::Booking,
        Self::Payment,
        Self::Review,
        Self::Organization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::ArtistProfile => "ArtistProfile",
            Self::Service => "Service",
            Self::ServiceCategory => "ServiceCategory",
            Self::Availability => "Availability",
            Self::Booking => "Booking",
            Self::Payment => "Payment",
            Self::Review => "Review",
            Self::Organization => "Organization",
        }
    }

    /// Readable by everyone, including anonymous callers.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Organization | Self::ServiceCategory)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership facts of one instance. Fields that do not apply to a resource
/// type stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ownership {
    pub id: Uuid,
    /// Owning user: the user itself for `User`, the profile owner for
    /// `ArtistProfile`.
    pub user_id: Option<Uuid>,
    /// Receiving artist profile.
    pub artist_profile_id: Option<Uuid>,
    /// Customer user of a booking or review.
    pub customer_id: Option<Uuid>,
}

/// Row predicate for list queries and instance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    /// `user_id == _`
    User(Uuid),
    /// `artist_profile_id == _`
    ArtistProfile(Uuid),
    /// `customer_id == _`
    Customer(Uuid),
    Nothing,
}

impl Scope {
    /// Scope over rows of one artist profile. An artist without a profile
    /// owns nothing yet.
    pub fn for_profile(profile_id: Option<Uuid>) -> Self {
        profile_id.map_or(Self::Nothing, Self::ArtistProfile)
    }

    pub fn admits(&self, instance: &Ownership) -> bool {
        match *self {
            Self::All => true,
            Self::User(id) => instance.user_id == Some(id),
            Self::ArtistProfile(id) => instance.artist_profile_id == Some(id),
            Self::Customer(id) => instance.customer_id == Some(id),
            Self::Nothing => false,
        }
    }
}

/// Which listing a scoped query serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    Default,
    /// Public discovery listing; unrestricted for every authenticated role.
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    Always,
    Owned(Scope),
}

fn grant(p: &Principal, action: Action, kind: ResourceKind) -> Option<Grant> {
    use Action::*;
    use ResourceKind::*;
    use UserRole::{Artist, Customer};

    let me = Scope::User(p.user_id);
    let own_profile = Scope::for_profile(p.artist_profile_id);

    let grant = match (p.role, kind, action) {
        (_, Organization | ServiceCategory, Read) => Grant::Always,
        (Artist | Customer, User, _) => Grant::Owned(me),

        (Artist, ArtistProfile, _) => Grant::Owned(me),
        (Artist, Service, Read) => Grant::Always,
        (Artist, Service, _) => Grant::Owned(own_profile),
        // An artist may book another artist's service like any customer.
        (Artist, Booking, Create) => Grant::Always,
        (Artist, Booking, Read | Update) => Grant::Owned(own_profile),
        (Artist, Review, Read) => Grant::Owned(own_profile),
        (Artist, Availability, _) => Grant::Owned(own_profile),

        (Customer, Booking | Review, _) => Grant::Owned(Scope::Customer(p.user_id)),
        (Customer, ArtistProfile | Service, Read) => Grant::Always,

        _ => return None,
    };
    Some(grant)
}

/// Decide whether `principal` may perform `action` on `kind`.
///
/// With `instance == None` this is the class-level check: it passes when some
/// rule for the action could apply. With an instance, ownership predicates
/// are evaluated against it.
pub fn can(
    principal: Option<&Principal>,
    action: Action,
    kind: ResourceKind,
    instance: Option<&Ownership>,
) -> bool {
    let Some(p) = principal else {
        return action == Action::Read && kind.is_public();
    };
    if p.is_admin() {
        return true;
    }
    match grant(p, action, kind) {
        None => false,
        Some(Grant::Always) => true,
        Some(Grant::Owned(scope)) => instance.is_none_or(|o| scope.admits(o)),
    }
}

/// Row predicate a list of `kind` must apply for `principal`.
pub fn scope(principal: Option<&Principal>, kind: ResourceKind, listing: Listing) -> Scope {
    use ResourceKind::*;
    use UserRole::{Admin, Artist, Customer};

    let Some(p) = principal else {
        return if kind.is_public() {
            Scope::All
        } else {
            Scope::Nothing
        };
    };

    match (p.role, kind) {
        (Admin, _) => Scope::All,
        (_, Organization | ServiceCategory) => Scope::All,
        (Artist | Customer, User) => Scope::User(p.user_id),

        (Artist, Service) if listing == Listing::Browse => Scope::All,
        (Artist, Service | Booking | Review | Availability) => {
            Scope::for_profile(p.artist_profile_id)
        }
        (Artist, ArtistProfile) => Scope::User(p.user_id),

        (Customer, Booking | Review) => Scope::Customer(p.user_id),
        (Customer, ArtistProfile | Service) => Scope::All,

        _ => Scope::Nothing,
    }
}
