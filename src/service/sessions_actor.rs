use crate::error::VaultError;

use base64::Engine;
use rand::{RngCore, rngs::OsRng};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::collections::HashSet;
use tracing::{debug, info};

/// Random bytes per session token (128 bits).
const TOKEN_BYTES: usize = 16;

/// Messages handled by the session registry actor.
#[derive(Debug)]
pub enum SessionsMessage {
    /// Remember a freshly minted token. Replies false if it was already live.
    Register(String, RpcReplyPort<bool>),
    /// Membership check.
    Validate(String, RpcReplyPort<bool>),
    /// Forget a token. Replies whether it was present.
    Revoke(String, RpcReplyPort<bool>),
    /// Number of live sessions.
    Count(RpcReplyPort<usize>),
}

/// Handle for interacting with the session registry.
///
/// The token set lives only in process memory: a restart signs every admin out.
#[derive(Clone)]
pub struct SessionsHandle {
    actor: ActorRef<SessionsMessage>,
}

impl SessionsHandle {
    /// Issue a new admin session token.
    pub async fn issue(&self) -> Result<String, VaultError> {
        loop {
            let token = generate_token()?;
            let fresh = ractor::call!(self.actor, SessionsMessage::Register, token.clone())
                .map_err(|e| VaultError::RegistryError(format!("Register RPC failed: {e}")))?;
            if fresh {
                return Ok(token);
            }
        }
    }

    /// True only for a token that was issued and not revoked since.
    pub async fn validate(&self, token: impl AsRef<str>) -> Result<bool, VaultError> {
        ractor::call!(
            self.actor,
            SessionsMessage::Validate,
            token.as_ref().to_string()
        )
        .map_err(|e| VaultError::RegistryError(format!("Validate RPC failed: {e}")))
    }

    /// Revoke a token. Absent or already revoked tokens are a no-op.
    pub async fn revoke(&self, token: impl AsRef<str>) -> Result<(), VaultError> {
        ractor::call!(
            self.actor,
            SessionsMessage::Revoke,
            token.as_ref().to_string()
        )
        .map(|_| ())
        .map_err(|e| VaultError::RegistryError(format!("Revoke RPC failed: {e}")))
    }

    pub async fn active_count(&self) -> Result<usize, VaultError> {
        ractor::call!(self.actor, SessionsMessage::Count)
            .map_err(|e| VaultError::RegistryError(format!("Count RPC failed: {e}")))
    }
}

struct SessionsActor;

#[ractor::async_trait]
impl Actor for SessionsActor {
    type Msg = SessionsMessage;
    type State = HashSet<String>;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _arguments: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        Ok(HashSet::new())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SessionsMessage::Register(token, rp) => {
                let fresh = state.insert(token);
                if fresh {
                    info!(active = state.len(), "admin session issued");
                }
                let _ = rp.send(fresh);
            }
            SessionsMessage::Validate(token, rp) => {
                let _ = rp.send(state.contains(&token));
            }
            SessionsMessage::Revoke(token, rp) => {
                let removed = state.remove(&token);
                if removed {
                    info!(active = state.len(), "admin session revoked");
                } else {
                    debug!("revoke for unknown session ignored");
                }
                let _ = rp.send(removed);
            }
            SessionsMessage::Count(rp) => {
                let _ = rp.send(state.len());
            }
        }
        Ok(())
    }
}

fn generate_token() -> Result<String, VaultError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| VaultError::RegistryError(format!("failed to generate session token: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Spawn a fresh, empty session registry and return its handle.
pub async fn spawn() -> Result<SessionsHandle, VaultError> {
    let (actor, _jh) = Actor::spawn(None, SessionsActor, ())
        .await
        .map_err(|e| VaultError::RegistryError(format!("failed to spawn SessionsActor: {e}")))?;
    Ok(SessionsHandle { actor })
}
