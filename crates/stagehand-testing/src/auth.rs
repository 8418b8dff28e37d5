//! Bearer headers for tests that go through the real extractor.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use stagehand_auth_types::token::issue_access_token;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "stagehand-test-secret";

/// Identity a test request claims to be.
pub struct MockAuth {
    pub user_id: Uuid,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    /// A freshly signed one-hour token.
    pub fn token(&self) -> String {
        issue_access_token(self.user_id, &self.secret, 3600)
            .expect("sign test token")
            .token
    }

    /// `Authorization: Bearer <token>` header value.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).expect("ascii token")
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}
