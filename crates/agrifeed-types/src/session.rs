use serde::{Deserialize, Serialize};

/// The current viewer's authentication-like state.
///
/// `username` is present iff `is_active`. Login is a local flag; nothing here
/// is a credential.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_active: bool,
    pub username: Option<String>,
    pub profile_image: Option<String>,
}

impl Session {
    /// A logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session for `username`.
    pub fn active(username: impl Into<String>, profile_image: Option<String>) -> Self {
        Self {
            is_active: true,
            username: Some(username.into()),
            profile_image,
        }
    }

    /// The active username, if logged in.
    pub fn username(&self) -> Option<&str> {
        if self.is_active {
            self.username.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_identity() {
        let s = Session::anonymous();
        assert!(!s.is_active);
        assert!(s.username().is_none());
        assert!(s.profile_image.is_none());
    }

    #[test]
    fn active_exposes_username() {
        let s = Session::active("alice", Some("file:///a.png".into()));
        assert!(s.is_active);
        assert_eq!(s.username(), Some("alice"));
        assert_eq!(s.profile_image.as_deref(), Some("file:///a.png"));
    }

    #[test]
    fn inactive_session_hides_stale_username() {
        let s = Session {
            is_active: false,
            username: Some("ghost".into()),
            profile_image: None,
        };
        assert!(s.username().is_none());
    }
}
