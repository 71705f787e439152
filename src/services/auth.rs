use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::{
    db::SessionStore,
    error::{AppError, AppResult},
    models::{CachedSession, UserIdentity},
    services::identity::IdentityVerifier,
};

/// Login state for the single flow session.
///
/// The session cache is read once at startup; afterwards the in-memory copy is the
/// source of truth and the store is only written on login, logout and expiry.
pub struct AuthService {
    verifier: Arc<dyn IdentityVerifier>,
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    current: RwLock<Option<CachedSession>>,
}

impl AuthService {
    /// Restores a cached login if it is still inside the validity window
    pub async fn restore(
        verifier: Arc<dyn IdentityVerifier>,
        store: Arc<dyn SessionStore>,
        ttl: Duration,
    ) -> AppResult<Self> {
        let cached = store.load().await?;

        let current = match cached {
            Some(session) if is_fresh(&session, ttl) => {
                tracing::info!(subject = %session.user.subject_id, "Restored cached session");
                Some(session)
            }
            Some(_) => {
                tracing::info!("Discarding expired cached session");
                store.clear().await?;
                None
            }
            None => None,
        };

        Ok(Self {
            verifier,
            store,
            ttl,
            current: RwLock::new(current),
        })
    }

    pub async fn login(&self, token: Option<&str>) -> AppResult<UserIdentity> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or_else(|| {
            AppError::InvalidInput("No token provided".to_string())
        })?;

        let user = self.verifier.verify(token).await?;
        let session = CachedSession::new(user.clone());

        self.store.save(&session, self.ttl.as_secs().max(1)).await?;
        *self.current.write().await = Some(session);

        tracing::info!(subject = %user.subject_id, "User logged in");

        Ok(user)
    }

    pub async fn logout(&self) -> AppResult<()> {
        *self.current.write().await = None;
        self.store.clear().await?;
        tracing::info!("User logged out");
        Ok(())
    }

    /// The logged-in user; an expired session is removed and reported as unauthorized
    pub async fn current_user(&self) -> AppResult<UserIdentity> {
        let mut current = self.current.write().await;

        let state = current
            .as_ref()
            .map(|session| (is_fresh(session, self.ttl), session.user.clone()));

        match state {
            Some((true, user)) => Ok(user),
            Some((false, _)) => {
                *current = None;
                drop(current);
                self.store.clear().await?;
                tracing::info!("Session expired");
                Err(AppError::Unauthorized("Session expired".to_string()))
            }
            None => Err(AppError::Unauthorized("Not logged in".to_string())),
        }
    }
}

fn is_fresh(session: &CachedSession, ttl: Duration) -> bool {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    session.is_valid_at(Utc::now(), ttl)
}
