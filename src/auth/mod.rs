pub mod authenticator;
pub mod cookie;
pub mod jwt;
pub mod principal;

pub use authenticator::{AuthResult, RequestAuthenticator};
pub use cookie::CookieReader;
pub use principal::UserIdentity;
