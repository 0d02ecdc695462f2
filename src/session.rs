//! Auth session lifecycle.
//!
//! The session is an explicit object injected where it is needed, never a
//! module-level singleton. `login` installs the bearer token on the API
//! client and persists token + profile to the credential store; `restore`
//! rehydrates them at startup; `logout` zeroizes the token and deletes the
//! persisted copy. A 401/403 from any backend call goes through
//! `force_logout`: the local session must never outlive the token.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::api::ApiClient;
use crate::error::StorageError;
use crate::storage::{CredentialStore, KEY_AUTH_TOKEN, KEY_PERFIL};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// User role as reported by the backend. Ordering matters: each role may do
/// everything the roles below it may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Cliente,
    Empleado,
    Administrador,
}

impl Rol {
    /// Parse the backend's role string, case-insensitively. Unknown strings
    /// map to the least-privileged role.
    pub fn parse(raw: &str) -> Rol {
        match raw.trim().to_lowercase().as_str() {
            "administrador" | "admin" => Rol::Administrador,
            "empleado" | "mesero" => Rol::Empleado,
            "cliente" => Rol::Cliente,
            other => {
                warn!(rol = other, "unknown role from backend, treating as cliente");
                Rol::Cliente
            }
        }
    }
}

/// Signed-in user profile, persisted alongside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfil {
    pub usuario: String,
    pub rol: Rol,
}

/// An active session: token plus profile.
#[derive(Clone)]
pub struct Sesion {
    token: String,
    pub perfil: Perfil,
}

impl std::fmt::Debug for Sesion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token material stays out of logs.
        f.debug_struct("Sesion")
            .field("perfil", &self.perfil)
            .finish_non_exhaustive()
    }
}

impl Sesion {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Drop for Sesion {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Owns the current session and its durable copy.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    current: Mutex<Option<Sesion>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            current: Mutex::new(None),
        }
    }

    /// Install a fresh session after a successful backend login: set the
    /// bearer token on the API client and persist token + profile.
    pub fn login(
        &self,
        api: &ApiClient,
        token: &str,
        perfil: Perfil,
    ) -> Result<(), StorageError> {
        api.set_token(token);
        self.store.set(KEY_AUTH_TOKEN, token)?;
        let perfil_json = serde_json::to_string(&perfil)
            .map_err(|e| StorageError::CorruptProfile(e.to_string()))?;
        self.store.set(KEY_PERFIL, &perfil_json)?;

        info!(usuario = %perfil.usuario, rol = ?perfil.rol, "session started");
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(Sesion {
            token: token.to_string(),
            perfil,
        });
        Ok(())
    }

    /// Tear the session down: clear the client token, zeroize the in-memory
    /// copy, and delete the persisted credentials.
    pub fn logout(&self, api: &ApiClient) -> Result<(), StorageError> {
        api.clear_token();
        {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            // Zeroized by Sesion::drop.
            *current = None;
        }
        self.store.delete(KEY_AUTH_TOKEN)?;
        self.store.delete(KEY_PERFIL)?;
        info!("session ended");
        Ok(())
    }

    /// React to an `ApiError::Unauthorized`: the token is expired or revoked
    /// server-side, so the local session must not survive.
    pub fn force_logout(&self, api: &ApiClient, reason: &str) {
        warn!(reason, "forcing logout");
        if let Err(e) = self.logout(api) {
            warn!(error = %e, "failed to clear persisted session during forced logout");
        }
    }

    /// Rehydrate a persisted session at startup, installing the token on the
    /// API client. Returns the restored profile, or `None` when no session
    /// (or a corrupt one) is stored.
    pub fn restore(&self, api: &ApiClient) -> Option<Perfil> {
        let token = self.store.get(KEY_AUTH_TOKEN)?;
        let perfil_json = self.store.get(KEY_PERFIL)?;
        let perfil: Perfil = match serde_json::from_str(&perfil_json) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "stored profile is corrupt, discarding session");
                let _ = self.store.delete(KEY_AUTH_TOKEN);
                let _ = self.store.delete(KEY_PERFIL);
                return None;
            }
        };

        api.set_token(&token);
        info!(usuario = %perfil.usuario, "session restored from storage");
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(Sesion {
            token,
            perfil: perfil.clone(),
        });
        Some(perfil)
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Sesion> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Whether the signed-in user holds at least `rol`.
    pub fn tiene_rol(&self, rol: Rol) -> bool {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.perfil.rol >= rol)
            .unwrap_or(false)
    }
}
