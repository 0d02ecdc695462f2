//! Error taxonomy for the terminal library.
//!
//! Three layers: transport/backend failures (`ApiError`), credential storage
//! failures (`StorageError`), and workflow-level failures (`WorkflowError`).
//! Messages are user-facing in register; call sites log the structured detail
//! via `tracing` before surfacing them.

use thiserror::Error;

/// Failures talking to the Comanda backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach the backend at {url}")]
    Connect { url: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("invalid backend URL: {url}")]
    InvalidUrl { url: String },

    /// 401 or 403: the bearer token is missing, expired, or lacks the role.
    /// The session layer reacts with a forced logout.
    #[error("session expired or not authorized")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("backend error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("invalid response from backend: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Map a `reqwest::Error` into the friendly taxonomy, mirroring the
    /// connect/timeout/builder distinction the UI messages rely on.
    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_connect() {
            return ApiError::Connect {
                url: url.to_string(),
            };
        }
        if err.is_timeout() {
            return ApiError::Timeout {
                url: url.to_string(),
            };
        }
        if err.is_builder() {
            return ApiError::InvalidUrl {
                url: url.to_string(),
            };
        }
        ApiError::Network(err.to_string())
    }
}

/// Failures reading or writing the durable credential store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("credential store error for key {key}: {message}")]
    Backend { key: String, message: String },

    #[error("stored profile is corrupt: {0}")]
    CorruptProfile(String),
}

/// A single field-level validation failure. Validation errors block
/// submission before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{campo}: {motivo}")]
pub struct ValidationError {
    /// Field name as shown to the operator.
    pub campo: String,
    /// Human-readable reason.
    pub motivo: String,
}

impl ValidationError {
    pub fn new(campo: impl Into<String>, motivo: impl Into<String>) -> Self {
        Self {
            campo: campo.into(),
            motivo: motivo.into(),
        }
    }
}

/// Failures of the order/reservation workflow itself.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A checkout is already in flight; the duplicate click is ignored.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("no client selected for this flow")]
    MissingClient,

    #[error("this flow requires an employee before checkout")]
    MissingEmployee,

    #[error("this flow requires a linked reservation before checkout")]
    MissingReservation,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("flow flag {0} is not recognized")]
    UnknownFlow(i64),

    /// A route-carried identifier failed integer revalidation.
    #[error("route parameter {nombre} is not a valid id: {valor}")]
    BadRouteParam { nombre: String, valor: String },

    #[error("action {accion} is not available in flow {flujo}")]
    ActionUnavailable { accion: String, flujo: String },

    #[error("cannot move from {desde} to {hasta}")]
    InvalidTransition { desde: String, hasta: String },

    #[error("reservation {id} cannot change state from {desde} to {hasta}")]
    IllegalReservationState {
        id: i64,
        desde: String,
        hasta: String,
    },

    #[error(transparent)]
    Validacion(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A step after sale creation failed. The sale already exists on the
    /// backend; `revertida` records whether the compensating delete worked.
    #[error("checkout failed after sale {venta_id} was created (rolled back: {revertida}): {causa}")]
    PartialCheckout {
        venta_id: i64,
        revertida: bool,
        causa: Box<WorkflowError>,
    },
}
