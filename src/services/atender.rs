//! Attend-link endpoint: records which employee served a sale. One record
//! per sale, created right after the sale and never mutated.

use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::Atender;

pub async fn crear(api: &ApiClient, id_empleado: i64, id_venta: i64) -> Result<(), ApiError> {
    let registro = Atender {
        id_empleado,
        id_venta,
    };
    let _: serde_json::Value = api.post("/api/atender/guardar", &registro).await?;
    info!(empleado_id = id_empleado, venta_id = id_venta, "attend link created");
    Ok(())
}
