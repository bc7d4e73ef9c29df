use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::api::error::ApiError;

/// Header carrying the username supplied by the identity provider.
pub const USER_HEADER: &str = "x-user";

/// The requesting user's key, taken from the `X-User` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKey(pub String);

impl UserKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for UserKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| UserKey(value.to_string()))
            .ok_or(ApiError::MissingUser);
        ready(user)
    }
}
