use crate::error::VaultError;
use crate::service::sessions_actor::SessionsHandle;
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Proof that a client passed the member gate.
///
/// The server keeps no record of it and cannot revoke it: the client stores the
/// unlocked flag itself and re-locks only by clearing that storage. This is a
/// screen against casual discovery, not an authentication boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberUnlock {
    ok: bool,
}

/// Password checks for the member gate and the admin gate.
///
/// Both gates fail closed: an empty configured secret rejects every password.
#[derive(Clone)]
pub struct AccessGate {
    admin_password: Arc<str>,
    member_password: Arc<str>,
}

impl AccessGate {
    pub fn new(admin_password: impl Into<Arc<str>>, member_password: impl Into<Arc<str>>) -> Self {
        let gate = Self {
            admin_password: admin_password.into(),
            member_password: member_password.into(),
        };
        if gate.admin_password.is_empty() {
            warn!("admin password not configured; admin login is disabled");
        }
        if gate.member_password.is_empty() {
            warn!("member password not configured; member unlock is disabled");
        }
        gate
    }

    pub fn check_member(&self, password: &str) -> Result<MemberUnlock, VaultError> {
        if secret_matches(&self.member_password, password) {
            info!("member gate unlocked");
            Ok(MemberUnlock { ok: true })
        } else {
            info!("member gate rejected attempt");
            Err(VaultError::AuthRejected)
        }
    }

    /// On success a new admin session is registered and its token returned.
    pub async fn check_admin(
        &self,
        password: &str,
        sessions: &SessionsHandle,
    ) -> Result<String, VaultError> {
        if !secret_matches(&self.admin_password, password) {
            info!("admin login rejected");
            return Err(VaultError::AuthRejected);
        }
        let token = sessions.issue().await?;
        info!("admin login succeeded");
        Ok(token)
    }
}

fn secret_matches(configured: &str, submitted: &str) -> bool {
    !configured.is_empty() && bool::from(configured.as_bytes().ct_eq(submitted.as_bytes()))
}
