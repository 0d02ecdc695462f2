//! Reservation endpoints.
//!
//! The backend only supports full-object PUTs, so every status change is a
//! read-modify-write: re-fetch the current record, mutate, PUT it back. The
//! date/time correction lives here and only here: form values are shifted
//! on save and unshifted on load, never at call sites.

use tracing::info;

use crate::api::ApiClient;
use crate::datetime;
use crate::error::{ApiError, WorkflowError};
use crate::models::{EstadoReserva, Reservacion};

/// Fetch a reservation with its `fecha`/`hora` converted back to form values.
pub async fn buscar(api: &ApiClient, id: i64) -> Result<Reservacion, ApiError> {
    let mut reserva: Reservacion = api.get(&format!("/api/reservaciones/buscaid/{id}")).await?;
    if let Ok(combinado) = datetime::combinar(&reserva.fecha, &reserva.hora) {
        let (fecha, hora) = datetime::separar(datetime::backend_a_formulario(combinado));
        reserva.fecha = fecha;
        reserva.hora = hora;
    }
    Ok(reserva)
}

/// Fetch a reservation exactly as stored, without the form-side correction.
/// Used by the read-modify-write path so a round trip does not double-shift.
async fn buscar_cruda(api: &ApiClient, id: i64) -> Result<Reservacion, ApiError> {
    api.get(&format!("/api/reservaciones/buscaid/{id}")).await
}

pub async fn listar(api: &ApiClient) -> Result<Vec<Reservacion>, ApiError> {
    api.get("/api/reservaciones/listar").await
}

/// Create a reservation from form values, applying the date correction.
pub async fn guardar(api: &ApiClient, reserva: &Reservacion) -> Result<Reservacion, ApiError> {
    let mut corregida = reserva.clone();
    aplicar_correccion(&mut corregida)?;
    let creada: Reservacion = api.post("/api/reservaciones/guardar", &corregida).await?;
    info!(reserva_id = creada.id, "reservation created");
    Ok(creada)
}

/// Update a reservation from form values (full-object PUT).
pub async fn actualizar(api: &ApiClient, reserva: &Reservacion) -> Result<(), ApiError> {
    let mut corregida = reserva.clone();
    aplicar_correccion(&mut corregida)?;
    let _: serde_json::Value = api
        .put(
            &format!("/api/reservaciones/actualizar/{}", corregida.id),
            &corregida,
        )
        .await?;
    info!(reserva_id = reserva.id, "reservation updated");
    Ok(())
}

/// Change only the status: re-fetch the current record, verify the
/// transition is legal, and PUT the full object back with the new status.
/// The stored `fecha`/`hora` pass through untouched.
pub async fn cambiar_estado(
    api: &ApiClient,
    id: i64,
    destino: EstadoReserva,
) -> Result<Reservacion, WorkflowError> {
    let mut actual = buscar_cruda(api, id).await?;

    if !actual.estado.puede_pasar_a(destino) {
        return Err(WorkflowError::IllegalReservationState {
            id,
            desde: actual.estado.nombre().to_string(),
            hasta: destino.nombre().to_string(),
        });
    }

    let desde = actual.estado;
    actual.estado = destino;
    let _: serde_json::Value = api
        .put(&format!("/api/reservaciones/actualizar/{id}"), &actual)
        .await
        .map_err(WorkflowError::Api)?;
    info!(
        reserva_id = id,
        desde = desde.nombre(),
        hasta = destino.nombre(),
        "reservation status changed"
    );
    Ok(actual)
}

/// Delete a reservation. By convention only pending reservations may be
/// cancelled; the backend does not enforce this, so it is checked here.
pub async fn eliminar(api: &ApiClient, id: i64) -> Result<(), WorkflowError> {
    let actual = buscar_cruda(api, id).await?;
    if actual.estado != EstadoReserva::Pendiente {
        return Err(WorkflowError::IllegalReservationState {
            id,
            desde: actual.estado.nombre().to_string(),
            hasta: "eliminada".to_string(),
        });
    }
    let _: serde_json::Value = api
        .delete(&format!("/api/reservaciones/eliminar/{id}"))
        .await
        .map_err(WorkflowError::Api)?;
    info!(reserva_id = id, "reservation deleted");
    Ok(())
}

fn aplicar_correccion(reserva: &mut Reservacion) -> Result<(), ApiError> {
    let combinado = datetime::combinar(&reserva.fecha, &reserva.hora)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let (fecha, hora) = datetime::separar(datetime::formulario_a_backend(combinado));
    reserva.fecha = fecha;
    reserva.hora = hora;
    Ok(())
}
