use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
    pub picture_url: Option<String>,
    pub subject_id: String,
}

/// Session cache entry: who logged in, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSession {
    pub user: UserIdentity,
    pub logged_in_at: DateTime<Utc>,
}

impl CachedSession {
    pub fn new(user: UserIdentity) -> Self {
        Self {
            user,
            logged_in_at: Utc::now(),
        }
    }

    /// Valid only while `now - logged_in_at < ttl`
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.logged_in_at) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserIdentity {
        UserIdentity {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            picture_url: None,
            subject_id: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_session_validity_window() {
        let session = CachedSession::new(user());
        let ttl = Duration::minutes(10);

        assert!(session.is_valid_at(session.logged_in_at, ttl));
        assert!(session.is_valid_at(session.logged_in_at + Duration::minutes(9), ttl));
        assert!(!session.is_valid_at(session.logged_in_at + Duration::minutes(10), ttl));
        assert!(!session.is_valid_at(session.logged_in_at + Duration::hours(2), ttl));
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = CachedSession::new(user());
        let json = serde_json::to_string(&session).unwrap();
        let back: CachedSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
