use serde::{Deserialize, Serialize};

/// The authenticated principal.
///
/// Looked up by the `id` claim of a verified token. The record is owned by
/// the user store; this crate only ever reads it.
///
/// # Example
///
/// ```rust
/// use session_guard::auth::UserIdentity;
///
/// let user = UserIdentity::new("u1", "Alice");
/// assert_eq!(user.name, "Alice");
/// assert!(user.email.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
