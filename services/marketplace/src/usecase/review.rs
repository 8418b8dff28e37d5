use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Principal, ResourceKind};

use crate::domain::record::Record;
use crate::domain::repository::{Repository, ReviewLookup};
use crate::domain::types::{ArtistProfile, Booking, Review, User};
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, present};

pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewParams {
    pub booking_id: Option<Uuid>,
    /// Admin only; inferred from the booking otherwise.
    pub artist_profile_id: Option<Uuid>,
    /// Admin only; inferred from the booking otherwise.
    pub customer_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

fn check_rating(errors: &mut ValidationErrors, rating: Option<i32>) {
    errors.check(
        rating.is_none_or(|r| RATING_RANGE.contains(&r)),
        "rating",
        "must be between 1 and 5",
    );
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewUseCase<R> {
    pub repo: R,
}

impl<R> CreateReviewUseCase<R>
where
    R: Repository<Review>
        + Repository<Booking>
        + Repository<ArtistProfile>
        + Repository<User>
        + ReviewLookup,
{
    /// Profile and customer come from the booking unless an admin overrides
    /// them, so a customer can only review their own booking.
    pub async fn execute(
        &self,
        principal: &Principal,
        params: ReviewParams,
    ) -> Result<Review, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Review, None)?;

        let mut errors = ValidationErrors::new();
        let booking = match params.booking_id {
            Some(id) => Repository::<Booking>::find_by_id(&self.repo, id).await?,
            None => None,
        };
        match &booking {
            None => errors.add("booking", "must exist"),
            Some(b) => {
                let reviewed = self.repo.find_review_for_booking(b.id).await?.is_some();
                errors.check(!reviewed, "booking", "has already been taken");
            }
        }

        let admin = principal.is_admin();
        let artist_profile_id = match params.artist_profile_id.filter(|_| admin) {
            Some(id) => {
                let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, id)
                    .await?
                    .is_some();
                errors.check(exists, "artist_profile", "must exist");
                Some(id)
            }
            None => booking.as_ref().map(|b| b.artist_profile_id),
        };
        let customer_id = match params.customer_id.filter(|_| admin) {
            Some(id) => {
                let exists = Repository::<User>::find_by_id(&self.repo, id).await?.is_some();
                errors.check(exists, "customer", "must exist");
                Some(id)
            }
            None => booking.as_ref().map(|b| b.customer_id),
        };

        errors.check(params.rating.is_some(), "rating", "can't be blank");
        check_rating(&mut errors, params.rating);

        let (Some(booking), Some(artist_profile_id), Some(customer_id), Some(rating)) =
            (booking, artist_profile_id, customer_id, params.rating)
        else {
            return Err(errors.into());
        };

        let now = Utc::now();
        let review = Review {
            id: Uuid::now_v7(),
            booking_id: booking.id,
            artist_profile_id,
            customer_id,
            rating,
            comment: present(params.comment),
            created_at: now,
            updated_at: now,
        };
        authorize(
            Some(principal),
            Action::Create,
            ResourceKind::Review,
            Some(&review.ownership()),
        )?;
        errors.into_result()?;

        Repository::<Review>::insert(&self.repo, &review).await?;
        Ok(review)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewUseCase<R> {
    pub repo: R,
}

impl<R> UpdateReviewUseCase<R>
where
    R: Repository<Review> + Repository<ArtistProfile> + Repository<User>,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: ReviewParams,
    ) -> Result<Review, MarketplaceError> {
        let mut review: Review =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let admin = principal.is_admin();
        let artist_profile_id = params.artist_profile_id.filter(|_| admin);
        let customer_id = params.customer_id.filter(|_| admin);
        if let Some(id) = artist_profile_id {
            let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, id)
                .await?
                .is_some();
            errors.check(exists, "artist_profile", "must exist");
        }
        if let Some(id) = customer_id {
            let exists = Repository::<User>::find_by_id(&self.repo, id).await?.is_some();
            errors.check(exists, "customer", "must exist");
        }
        check_rating(&mut errors, params.rating);
        errors.into_result()?;

        review.artist_profile_id = artist_profile_id.unwrap_or(review.artist_profile_id);
        review.customer_id = customer_id.unwrap_or(review.customer_id);
        review.rating = params.rating.unwrap_or(review.rating);
        if params.comment.is_some() {
            review.comment = present(params.comment);
        }
        review.updated_at = Utc::now();
        Repository::<Review>::update(&self.repo, &review).await?;
        Ok(review)
    }
}
