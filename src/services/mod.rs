//! Typed REST collaborators over the Comanda backend, one module per
//! resource. All of them go through [`crate::api::ApiClient`]; none of them
//! retries or compensates; orchestration concerns live in
//! [`crate::checkout`].

pub mod atender;
pub mod auth;
pub mod catalogo;
pub mod reservaciones;
pub mod ventas;
