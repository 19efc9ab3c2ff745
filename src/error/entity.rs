use thiserror::Error;

/// A requested entity does not exist in the backing store.
///
/// Used by the authenticator when a verified token references a principal
/// that has since been deleted (or never existed). The display form is the
/// exact message sent to clients.
///
/// # Example
/// ```
/// use session_guard::error::entity::NotFoundError;
///
/// let err = NotFoundError::new("User");
/// assert_eq!(err.to_string(), "User not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Name of the missing entity (e.g. `"User"`)
    pub entity: &'static str,
}

impl NotFoundError {
    pub fn new(entity: &'static str) -> Self {
        Self { entity }
    }

    /// Shorthand for the principal lookup miss.
    pub fn user() -> Self {
        Self::new("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format_is_entity_followed_by_not_found() {
        let err = NotFoundError::new("Location");
        assert_eq!(err.to_string(), "Location not found");
    }

    #[test]
    fn user_shorthand_matches_client_message() {
        assert_eq!(NotFoundError::user().to_string(), "User not found");
        assert_eq!(NotFoundError::user().entity, "User");
    }
}
