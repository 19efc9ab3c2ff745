pub mod auth;
pub mod entity;

pub use auth::{AuthFailure, ErrorBody, FailureResponse, TokenRejection};
pub use entity::NotFoundError;
