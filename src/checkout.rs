//! Checkout orchestration.
//!
//! Each checkout action is a short chain of dependent backend calls issued
//! strictly in sequence, since every payload needs the previous response
//! (the generated sale id above all). The workflow session's single-flight flag
//! guards against duplicate submission from a second click while a request
//! is in flight.
//!
//! When a step after sale creation fails, the sale already exists
//! server-side. A best-effort compensating delete runs and the surfaced
//! error reports the sale id and whether the rollback worked.

use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::error::WorkflowError;
use crate::models::{EstadoReserva, Reservacion};
use crate::services::{atender, reservaciones, ventas};
use crate::validation;
use crate::workflow::{AccionCheckout, Flujo, Paso, SesionFlujo};

/// How a checkout action resolved. The caller navigates accordingly; a
/// failure leaves the session on the cart screen with the draft intact so
/// the operator may retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Desenlace {
    /// Base flow: sale created, move on to assign employee and table. The
    /// sale id travels in the URL of that screen.
    AsignarServicio { venta_id: i64 },
    /// Reservation flow, "add and continue": sale recorded, reservation in
    /// progress, back to product selection with an empty cart.
    VentaAgregada { venta_id: i64 },
    /// Reservation flow, "confirm and close": sale recorded, reservation
    /// completed.
    PedidoCerrado { venta_id: i64 },
    /// Employee flow: sale recorded, done.
    VentaRegistrada { venta_id: i64 },
    /// Base flow, second step: employee/table assigned, reservation created.
    ServicioAsignado { venta_id: i64, reserva_id: i64 },
    /// Draft discarded without any network call.
    Cancelado,
}

/// Run a checkout action from the cart screen.
pub async fn ejecutar(
    api: &ApiClient,
    sesion: &mut SesionFlujo,
    accion: AccionCheckout,
) -> Result<Desenlace, WorkflowError> {
    sesion.puede_ejecutar(accion)?;
    sesion.marcar_envio()?;
    let resultado = ejecutar_interno(api, sesion, accion).await;
    sesion.terminar_envio();
    if let Err(ref e) = resultado {
        error!(accion = accion.nombre(), error = %e, "checkout failed");
    }
    resultado
}

async fn ejecutar_interno(
    api: &ApiClient,
    sesion: &mut SesionFlujo,
    accion: AccionCheckout,
) -> Result<Desenlace, WorkflowError> {
    if accion == AccionCheckout::Cancelar {
        sesion.vaciar_carrito();
        sesion.avanzar_a(Paso::Finalizado);
        info!("checkout cancelled, draft discarded");
        return Ok(Desenlace::Cancelado);
    }

    let contexto = sesion.contexto().clone();
    // puede_ejecutar already proved these are present.
    let cliente_id = contexto.cliente_id.ok_or(WorkflowError::MissingClient)?;
    let id_reserva = if contexto.flujo.requiere_reserva() {
        contexto.reserva_id
    } else {
        None
    };

    let venta = ventas::crear(api, cliente_id, sesion.carrito().como_lineas_venta(), id_reserva)
        .await
        .map_err(WorkflowError::Api)?;

    match (contexto.flujo, accion) {
        (Flujo::VentaBase, AccionCheckout::Confirmar) => {
            // Employee and table come later; nothing else to do yet.
            sesion.avanzar_a(Paso::AsignarServicio {
                venta_id: venta.idventa,
            });
            Ok(Desenlace::AsignarServicio {
                venta_id: venta.idventa,
            })
        }

        (Flujo::VentaConEmpleado, AccionCheckout::Confirmar) => {
            let empleado_id = contexto.empleado_id.ok_or(WorkflowError::MissingEmployee)?;
            if let Err(e) = atender::crear(api, empleado_id, venta.idventa).await {
                return Err(compensar(api, venta.idventa, WorkflowError::Api(e)).await);
            }
            sesion.vaciar_carrito();
            sesion.avanzar_a(Paso::Finalizado);
            Ok(Desenlace::VentaRegistrada {
                venta_id: venta.idventa,
            })
        }

        (Flujo::ConReserva | Flujo::ContinuarReserva, accion) => {
            let empleado_id = contexto.empleado_id.ok_or(WorkflowError::MissingEmployee)?;
            let reserva_id = contexto
                .reserva_id
                .ok_or(WorkflowError::MissingReservation)?;

            if let Err(e) = atender::crear(api, empleado_id, venta.idventa).await {
                return Err(compensar(api, venta.idventa, WorkflowError::Api(e)).await);
            }

            let destino = match accion {
                AccionCheckout::AgregarYContinuar => EstadoReserva::EnCurso,
                AccionCheckout::ConfirmarYCerrar => EstadoReserva::Completada,
                otra => {
                    return Err(WorkflowError::ActionUnavailable {
                        accion: otra.nombre().to_string(),
                        flujo: contexto.flujo.nombre().to_string(),
                    })
                }
            };
            if let Err(e) = reservaciones::cambiar_estado(api, reserva_id, destino).await {
                return Err(compensar(api, venta.idventa, e).await);
            }

            sesion.vaciar_carrito();
            if accion == AccionCheckout::AgregarYContinuar {
                // Next sale on the same reservation starts from the product
                // list with a fresh draft.
                sesion.avanzar_a(Paso::SeleccionProductos);
                Ok(Desenlace::VentaAgregada {
                    venta_id: venta.idventa,
                })
            } else {
                sesion.avanzar_a(Paso::Finalizado);
                Ok(Desenlace::PedidoCerrado {
                    venta_id: venta.idventa,
                })
            }
        }

        (flujo, accion) => Err(WorkflowError::ActionUnavailable {
            accion: accion.nombre().to_string(),
            flujo: flujo.nombre().to_string(),
        }),
    }
}

/// Second step of the base flow: the sale exists, now record who served it
/// and seat the client (an attend link plus a reservation, created in
/// sequence).
pub async fn asignar_servicio(
    api: &ApiClient,
    sesion: &mut SesionFlujo,
    empleado_id: i64,
    mesa_id: i64,
    fecha: &str,
    hora: &str,
    ahora: NaiveDateTime,
) -> Result<Desenlace, WorkflowError> {
    let Paso::AsignarServicio { venta_id } = sesion.paso() else {
        return Err(WorkflowError::InvalidTransition {
            desde: "fuera del paso de asignación".to_string(),
            hasta: "asignar servicio".to_string(),
        });
    };
    validation::fecha_reserva_valida(fecha, hora, ahora)?;
    let cliente_id = sesion
        .contexto()
        .cliente_id
        .ok_or(WorkflowError::MissingClient)?;

    sesion.marcar_envio()?;
    let resultado = asignar_servicio_interno(
        api, venta_id, cliente_id, empleado_id, mesa_id, fecha, hora,
    )
    .await;
    sesion.terminar_envio();

    match resultado {
        Ok(reserva_id) => {
            sesion.vaciar_carrito();
            sesion.avanzar_a(Paso::Finalizado);
            Ok(Desenlace::ServicioAsignado {
                venta_id,
                reserva_id,
            })
        }
        Err(e) => {
            error!(venta_id, error = %e, "service assignment failed");
            if matches!(e, WorkflowError::PartialCheckout { revertida: true, .. }) {
                // The sale was rolled back, so the assignment target no
                // longer exists. Back to the cart with the draft intact;
                // confirming again creates a fresh sale.
                sesion.avanzar_a(Paso::Carrito);
            }
            Err(e)
        }
    }
}

async fn asignar_servicio_interno(
    api: &ApiClient,
    venta_id: i64,
    cliente_id: i64,
    empleado_id: i64,
    mesa_id: i64,
    fecha: &str,
    hora: &str,
) -> Result<i64, WorkflowError> {
    if let Err(e) = atender::crear(api, empleado_id, venta_id).await {
        return Err(compensar(api, venta_id, WorkflowError::Api(e)).await);
    }

    let reserva = Reservacion {
        id: 0, // assigned by the backend
        id_cliente: cliente_id,
        id_mesa: mesa_id,
        fecha: fecha.to_string(),
        hora: hora.to_string(),
        estado: EstadoReserva::EnCurso,
    };
    match reservaciones::guardar(api, &reserva).await {
        Ok(creada) => Ok(creada.id),
        Err(e) => Err(compensar(api, venta_id, WorkflowError::Api(e)).await),
    }
}

/// Best-effort rollback of an orphaned sale after a later step failed.
async fn compensar(api: &ApiClient, venta_id: i64, causa: WorkflowError) -> WorkflowError {
    warn!(venta_id, causa = %causa, "rolling back sale after partial checkout");
    let revertida = match ventas::anular(api, venta_id).await {
        Ok(()) => true,
        Err(e) => {
            error!(venta_id, error = %e, "compensating sale delete failed, orphan remains");
            false
        }
    };
    WorkflowError::PartialCheckout {
        venta_id,
        revertida,
        causa: Box::new(causa),
    }
}
