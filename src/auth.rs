//! Identity forwarded by the upstream auth gateway.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

fn header<'a>(req: &'a HttpRequest, name: &str) -> Result<&'a str, AppError> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))
}

fn actor_from_request(req: &HttpRequest) -> Result<Actor, AppError> {
    let id = header(req, USER_ID_HEADER)?
        .parse::<Uuid>()
        .map_err(|_| AppError::Unauthorized(format!("invalid {USER_ID_HEADER} header")))?;
    let role = header(req, USER_ROLE_HEADER)?
        .parse::<Role>()
        .map_err(|_| AppError::Unauthorized(format!("invalid {USER_ROLE_HEADER} header")))?;
    Ok(Actor::new(id, role))
}

impl FromRequest for Actor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(actor_from_request(req))
    }
}
