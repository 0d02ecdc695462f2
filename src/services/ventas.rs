//! Sales endpoints.

use tracing::info;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{LineaVenta, Venta, VentaCreada, VentaRequest};

/// Create a sale. Generates a fresh idempotency key per submission so a
/// manual retry after a timeout cannot double-charge.
pub async fn crear(
    api: &ApiClient,
    id_cliente: i64,
    productos: Vec<LineaVenta>,
    id_reserva: Option<i64>,
) -> Result<VentaCreada, ApiError> {
    let req = VentaRequest {
        id_cliente,
        productos,
        id_reserva,
        id_solicitud: Uuid::new_v4().to_string(),
    };
    let creada: VentaCreada = api.post("/api/ventas/guardar", &req).await?;
    info!(
        venta_id = creada.idventa,
        total = creada.totalventa,
        cliente_id = id_cliente,
        "sale created"
    );
    Ok(creada)
}

pub async fn listar(api: &ApiClient) -> Result<Vec<Venta>, ApiError> {
    api.get("/api/ventas/listar").await
}

pub async fn buscar(api: &ApiClient, id: i64) -> Result<Venta, ApiError> {
    api.get(&format!("/api/ventas/buscaid/{id}")).await
}

/// Delete a sale. Only used as the compensating action when a later checkout
/// step fails after the sale already exists server-side.
pub async fn anular(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let _: serde_json::Value = api.delete(&format!("/api/ventas/eliminar/{id}")).await?;
    info!(venta_id = id, "sale rolled back");
    Ok(())
}
