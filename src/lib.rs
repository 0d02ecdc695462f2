//! Comanda POS, the terminal-side library for the Comanda restaurant backend.
//!
//! Implements everything the browser front end does below the rendering
//! layer: the authenticated REST collaborators, the durable auth session,
//! role-gated route resolution, the sale draft (cart), per-screen validation
//! rules, the reservation date/time correction, and the multi-step
//! order/reservation workflow with its serialized checkout orchestration.
//!
//! The workflow is the heart of the crate: [`workflow::SesionFlujo`] holds
//! the flow context, draft cart, and current step as one explicit object,
//! and [`checkout`] runs the dependent backend calls (sale → attend link →
//! reservation update) strictly in sequence, with a single-flight guard and
//! a compensating rollback when a later step fails.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod api;
pub mod cart;
pub mod checkout;
pub mod datetime;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod validation;
pub mod workflow;

pub use api::ApiClient;
pub use cart::Carrito;
pub use checkout::Desenlace;
pub use error::{ApiError, StorageError, ValidationError, WorkflowError};
pub use session::{Perfil, Rol, SessionManager};
pub use workflow::{AccionCheckout, ContextoFlujo, Flujo, Paso, SesionFlujo};

/// Initialise the tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter. Safe to call once per process; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
