//! Auth endpoints.

use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::session::{Perfil, Rol, SessionManager};

/// Sign in against the backend and install the session.
pub async fn login(
    api: &ApiClient,
    sesiones: &SessionManager,
    usuario: &str,
    password: &str,
) -> Result<Perfil, ApiError> {
    let req = LoginRequest {
        usuario: usuario.to_string(),
        password: password.to_string(),
    };
    let resp: LoginResponse = api.post("/api/auth/login", &req).await?;

    let perfil = Perfil {
        usuario: resp.usuario,
        rol: Rol::parse(&resp.rol),
    };
    sesiones
        .login(api, &resp.token, perfil.clone())
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    info!(usuario = %perfil.usuario, "login succeeded");
    Ok(perfil)
}

/// Whether a username is free to register.
///
/// The backend inverts the usual convention: `GET /api/auth/usuario/{name}`
/// answers 200 when the name is TAKEN and 404 when it is AVAILABLE. This
/// adapter hides that from call sites and returns a plain boolean; any other
/// failure propagates as a server error.
pub async fn usuario_disponible(api: &ApiClient, usuario: &str) -> Result<bool, ApiError> {
    let existente: Option<serde_json::Value> = api
        .get_optional(&format!("/api/auth/usuario/{usuario}"))
        .await?;
    Ok(existente.is_none())
}
