use std::collections::HashMap;

use axum_extra::extract::cookie::CookieJar;

/// Read access to the cookies of an inbound request.
///
/// The authenticator only needs a lookup by name, so anything that can
/// answer that (an axum [`CookieJar`], a plain map in tests) qualifies.
pub trait CookieReader {
    fn cookie(&self, name: &str) -> Option<&str>;
}

impl CookieReader for CookieJar {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.value())
    }
}

impl CookieReader for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
