use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use stagehand_core::health::healthz;
use stagehand_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::types::{
    ArtistProfile, Availability, Booking, Organization, Payment, Review, Service,
    ServiceCategory, User,
};
use crate::handlers::{
    dashboard::{admin_dashboard, artist_dashboard, dashboard},
    health::readyz,
    resources::{
        artist_availability, artist_bookings, browse_services, create_artist_profile,
        create_availability, create_booking, create_organization, create_payment, create_review,
        create_service, create_service_category, create_user, destroy, index, index_users,
        my_bookings, show, update_artist_profile, update_availability, update_booking,
        update_organization, update_payment, update_review, update_service,
        update_service_category, update_user,
    },
    session::{login, logout, me, signup, update_password},
};
use crate::state::AppState;

fn api() -> Router<AppState> {
    Router::new()
        // Session
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", delete(logout))
        .route("/me", get(me))
        .route("/password/update", patch(update_password))
        // Dashboards
        .route("/dashboard", get(dashboard))
        .route("/dashboard/admin", get(admin_dashboard))
        .route("/dashboard/artist", get(artist_dashboard))
        // Users
        .route("/users", get(index_users).post(create_user))
        .route(
            "/users/{id}",
            get(show::<User>)
                .patch(update_user)
                .put(update_user)
                .delete(destroy::<User>),
        )
        // Artist profiles
        .route(
            "/artist_profiles",
            get(index::<ArtistProfile>).post(create_artist_profile),
        )
        .route(
            "/artist_profiles/{id}",
            get(show::<ArtistProfile>)
                .patch(update_artist_profile)
                .put(update_artist_profile)
                .delete(destroy::<ArtistProfile>),
        )
        .route("/artists/{artist_id}/availability", get(artist_availability))
        // Services
        .route("/services", get(index::<Service>).post(create_service))
        .route("/services/browse", get(browse_services))
        .route(
            "/services/{id}",
            get(show::<Service>)
                .patch(update_service)
                .put(update_service)
                .delete(destroy::<Service>),
        )
        // Service categories
        .route(
            "/service_categories",
            get(index::<ServiceCategory>).post(create_service_category),
        )
        .route(
            "/service_categories/{id}",
            get(show::<ServiceCategory>)
                .patch(update_service_category)
                .put(update_service_category)
                .delete(destroy::<ServiceCategory>),
        )
        // Availabilities
        .route(
            "/availabilities",
            get(index::<Availability>).post(create_availability),
        )
        .route(
            "/availabilities/{id}",
            get(show::<Availability>)
                .patch(update_availability)
                .put(update_availability)
                .delete(destroy::<Availability>),
        )
        // Bookings
        .route("/bookings", get(index::<Booking>).post(create_booking))
        .route("/bookings/my_bookings", get(my_bookings))
        .route("/bookings/artist_bookings", get(artist_bookings))
        .route(
            "/bookings/{id}",
            get(show::<Booking>)
                .patch(update_booking)
                .put(update_booking)
                .delete(destroy::<Booking>),
        )
        // Payments
        .route("/payments", get(index::<Payment>).post(create_payment))
        .route(
            "/payments/{id}",
            get(show::<Payment>)
                .patch(update_payment)
                .put(update_payment)
                .delete(destroy::<Payment>),
        )
        // Reviews
        .route("/reviews", get(index::<Review>).post(create_review))
        .route(
            "/reviews/{id}",
            get(show::<Review>)
                .patch(update_review)
                .put(update_review)
                .delete(destroy::<Review>),
        )
        // Organizations
        .route(
            "/organizations",
            get(index::<Organization>).post(create_organization),
        )
        .route(
            "/organizations/{id}",
            get(show::<Organization>)
                .patch(update_organization)
                .put(update_organization)
                .delete(destroy::<Organization>),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api/v1", api())
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
