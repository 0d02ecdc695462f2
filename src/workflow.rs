//! Order/reservation workflow state machine.
//!
//! The multi-step "build a sale" flow is an explicit session object instead
//! of state threaded through route parameters: context (who/what flow),
//! draft cart, current step, and the single-flight submission guard all live
//! in [`SesionFlujo`]. Transition methods reject anything the current step
//! does not allow and never lose the cart. Network orchestration for the
//! checkout actions lives in [`crate::checkout`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cart::Carrito;
use crate::error::WorkflowError;
use crate::models::Reservacion;

// ---------------------------------------------------------------------------
// Flow flags
// ---------------------------------------------------------------------------

/// Which branch of the sale flow is running. Carried as an integer in the
/// route and revalidated at every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flujo {
    /// Direct sale; employee and table are assigned after the sale exists.
    VentaBase,
    /// Sale against an existing reservation; employee chosen up front.
    ConReserva,
    /// Direct sale with the employee chosen at creation.
    VentaConEmpleado,
    /// "Same client" shortcut: continue an existing reservation, deriving
    /// the client from it instead of re-prompting. Normalizes to
    /// `ConReserva` once hydrated.
    ContinuarReserva,
}

impl Flujo {
    pub fn codigo(self) -> i64 {
        match self {
            Flujo::VentaBase => 0,
            Flujo::ConReserva => 1,
            Flujo::VentaConEmpleado => 2,
            Flujo::ContinuarReserva => 3,
        }
    }

    pub fn nombre(self) -> &'static str {
        match self {
            Flujo::VentaBase => "venta base",
            Flujo::ConReserva => "con reserva",
            Flujo::VentaConEmpleado => "venta con empleado",
            Flujo::ContinuarReserva => "continuar reserva",
        }
    }

    /// Whether the employee must be resolved before checkout.
    pub fn requiere_empleado(self) -> bool {
        !matches!(self, Flujo::VentaBase)
    }

    /// Whether a linked reservation id must be present.
    pub fn requiere_reserva(self) -> bool {
        matches!(self, Flujo::ConReserva | Flujo::ContinuarReserva)
    }
}

impl TryFrom<i64> for Flujo {
    type Error = WorkflowError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Flujo::VentaBase),
            1 => Ok(Flujo::ConReserva),
            2 => Ok(Flujo::VentaConEmpleado),
            3 => Ok(Flujo::ContinuarReserva),
            other => Err(WorkflowError::UnknownFlow(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Flow context
// ---------------------------------------------------------------------------

/// Identifiers resolved so far. Which ones are mandatory depends on the
/// flow flag; `validar_para_checkout` enforces that before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextoFlujo {
    pub flujo: Flujo,
    pub cliente_id: Option<i64>,
    pub empleado_id: Option<i64>,
    pub reserva_id: Option<i64>,
}

impl ContextoFlujo {
    pub fn nuevo(flujo: Flujo) -> Self {
        Self {
            flujo,
            cliente_id: None,
            empleado_id: None,
            reserva_id: None,
        }
    }

    /// Rebuild the context from route parameters, parsing every identifier
    /// as an integer. Anything that does not parse is rejected; route
    /// strings are untrusted.
    pub fn desde_ruta(params: &HashMap<String, String>) -> Result<Self, WorkflowError> {
        fn entero(
            params: &HashMap<String, String>,
            nombre: &str,
        ) -> Result<Option<i64>, WorkflowError> {
            match params.get(nombre) {
                None => Ok(None),
                Some(raw) => raw
                    .trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| WorkflowError::BadRouteParam {
                        nombre: nombre.to_string(),
                        valor: raw.clone(),
                    }),
            }
        }

        let flujo_raw = entero(params, "flujo")?.ok_or(WorkflowError::BadRouteParam {
            nombre: "flujo".to_string(),
            valor: String::new(),
        })?;
        Ok(Self {
            flujo: Flujo::try_from(flujo_raw)?,
            cliente_id: entero(params, "cliente")?,
            empleado_id: entero(params, "empleado")?,
            reserva_id: entero(params, "reserva")?,
        })
    }

    /// Enforce the per-flow mandatory identifiers. A failure here blocks the
    /// checkout action locally; no request is issued.
    pub fn validar_para_checkout(&self) -> Result<(), WorkflowError> {
        if self.cliente_id.is_none() {
            return Err(WorkflowError::MissingClient);
        }
        if self.flujo.requiere_empleado() && self.empleado_id.is_none() {
            return Err(WorkflowError::MissingEmployee);
        }
        if self.flujo.requiere_reserva() && self.reserva_id.is_none() {
            return Err(WorkflowError::MissingReservation);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Steps and checkout actions
// ---------------------------------------------------------------------------

/// Screen-level state of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paso {
    SeleccionCliente,
    SeleccionEmpleado,
    SeleccionProductos,
    Carrito,
    /// Post-sale step of the base flow: the sale exists, employee and table
    /// are assigned now. Carries the new sale id (it appears in the URL).
    AsignarServicio { venta_id: i64 },
    Finalizado,
}

impl Paso {
    fn nombre(self) -> &'static str {
        match self {
            Paso::SeleccionCliente => "selección de cliente",
            Paso::SeleccionEmpleado => "selección de empleado",
            Paso::SeleccionProductos => "selección de productos",
            Paso::Carrito => "carrito",
            Paso::AsignarServicio { .. } => "asignar servicio",
            Paso::Finalizado => "finalizado",
        }
    }
}

/// Checkout actions offered on the cart screen. Which ones apply depends on
/// the flow flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccionCheckout {
    /// Base and employee flows: create the sale.
    Confirmar,
    /// Reservation flow: add this sale and return to product selection with
    /// an empty cart for the next sale on the same reservation.
    AgregarYContinuar,
    /// Reservation flow: add this sale and close the reservation out.
    ConfirmarYCerrar,
    /// Discard the draft; no network call.
    Cancelar,
}

impl AccionCheckout {
    pub fn nombre(self) -> &'static str {
        match self {
            AccionCheckout::Confirmar => "confirmar",
            AccionCheckout::AgregarYContinuar => "agregar y continuar",
            AccionCheckout::ConfirmarYCerrar => "confirmar y cerrar",
            AccionCheckout::Cancelar => "cancelar",
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow session
// ---------------------------------------------------------------------------

/// The explicit workflow session: everything the old implementation threaded
/// through navigation state, in one typed place.
#[derive(Debug, Clone)]
pub struct SesionFlujo {
    contexto: ContextoFlujo,
    carrito: Carrito,
    paso: Paso,
    en_envio: bool,
}

impl SesionFlujo {
    /// Start a fresh flow at client selection.
    pub fn iniciar(flujo: Flujo) -> Self {
        Self {
            contexto: ContextoFlujo::nuevo(flujo),
            carrito: Carrito::new(),
            paso: Paso::SeleccionCliente,
            en_envio: false,
        }
    }

    /// Start the "continue this reservation" shortcut: client and
    /// reservation come from the existing record, the employee is already
    /// resolved, and the flow behaves as `ConReserva` from here on. Client
    /// and employee selection are skipped entirely.
    pub fn continuar_reserva(reserva: &Reservacion, empleado_id: i64) -> Self {
        Self {
            contexto: ContextoFlujo {
                flujo: Flujo::ConReserva,
                cliente_id: Some(reserva.id_cliente),
                empleado_id: Some(empleado_id),
                reserva_id: Some(reserva.id),
            },
            carrito: Carrito::new(),
            paso: Paso::SeleccionProductos,
            en_envio: false,
        }
    }

    /// Rehydrate a session from route-carried state (context + cart), e.g.
    /// after a keep-shopping round trip.
    pub fn hidratar(contexto: ContextoFlujo, carrito: Carrito, paso: Paso) -> Self {
        Self {
            contexto,
            carrito,
            paso,
            en_envio: false,
        }
    }

    pub fn contexto(&self) -> &ContextoFlujo {
        &self.contexto
    }

    pub fn carrito(&self) -> &Carrito {
        &self.carrito
    }

    /// Mutable access to the draft, only while a product screen is active.
    pub fn carrito_mut(&mut self) -> Result<&mut Carrito, WorkflowError> {
        match self.paso {
            Paso::SeleccionProductos | Paso::Carrito => Ok(&mut self.carrito),
            otro => Err(WorkflowError::InvalidTransition {
                desde: otro.nombre().to_string(),
                hasta: "modificar carrito".to_string(),
            }),
        }
    }

    pub fn paso(&self) -> Paso {
        self.paso
    }

    pub fn en_envio(&self) -> bool {
        self.en_envio
    }

    fn transicion_invalida(&self, hasta: &str) -> WorkflowError {
        WorkflowError::InvalidTransition {
            desde: self.paso.nombre().to_string(),
            hasta: hasta.to_string(),
        }
    }

    // -- transitions --------------------------------------------------------

    pub fn elegir_cliente(&mut self, cliente_id: i64) -> Result<Paso, WorkflowError> {
        if self.paso != Paso::SeleccionCliente {
            return Err(self.transicion_invalida("selección de cliente"));
        }
        self.contexto.cliente_id = Some(cliente_id);
        // Base flow picks the employee after the sale; a context that
        // already carries a resolved employee skips the prompt too.
        self.paso = if self.contexto.flujo.requiere_empleado()
            && self.contexto.empleado_id.is_none()
        {
            Paso::SeleccionEmpleado
        } else {
            Paso::SeleccionProductos
        };
        Ok(self.paso)
    }

    pub fn elegir_empleado(&mut self, empleado_id: i64) -> Result<Paso, WorkflowError> {
        if self.paso != Paso::SeleccionEmpleado {
            return Err(self.transicion_invalida("selección de empleado"));
        }
        self.contexto.empleado_id = Some(empleado_id);
        self.paso = Paso::SeleccionProductos;
        Ok(self.paso)
    }

    pub fn ir_a_carrito(&mut self) -> Result<Paso, WorkflowError> {
        if self.paso != Paso::SeleccionProductos {
            return Err(self.transicion_invalida("carrito"));
        }
        self.paso = Paso::Carrito;
        Ok(self.paso)
    }

    /// Back from the cart to the product list. The draft survives the round
    /// trip untouched.
    pub fn seguir_comprando(&mut self) -> Result<Paso, WorkflowError> {
        if self.paso != Paso::Carrito {
            return Err(self.transicion_invalida("selección de productos"));
        }
        self.paso = Paso::SeleccionProductos;
        Ok(self.paso)
    }

    // -- checkout gating ----------------------------------------------------

    /// Checkout actions offered for this flow.
    pub fn acciones_disponibles(&self) -> &'static [AccionCheckout] {
        match self.contexto.flujo {
            Flujo::VentaBase | Flujo::VentaConEmpleado => {
                &[AccionCheckout::Confirmar, AccionCheckout::Cancelar]
            }
            Flujo::ConReserva | Flujo::ContinuarReserva => &[
                AccionCheckout::AgregarYContinuar,
                AccionCheckout::ConfirmarYCerrar,
                AccionCheckout::Cancelar,
            ],
        }
    }

    /// Whether `accion` may fire right now. Failing this blocks the action
    /// with no network call.
    pub fn puede_ejecutar(&self, accion: AccionCheckout) -> Result<(), WorkflowError> {
        if self.paso != Paso::Carrito {
            return Err(self.transicion_invalida(accion.nombre()));
        }
        if !self.acciones_disponibles().contains(&accion) {
            return Err(WorkflowError::ActionUnavailable {
                accion: accion.nombre().to_string(),
                flujo: self.contexto.flujo.nombre().to_string(),
            });
        }
        if accion == AccionCheckout::Cancelar {
            return Ok(());
        }
        self.contexto.validar_para_checkout()?;
        if self.carrito.esta_vacio() {
            return Err(WorkflowError::EmptyCart);
        }
        Ok(())
    }

    // -- used by checkout orchestration -------------------------------------

    pub(crate) fn marcar_envio(&mut self) -> Result<(), WorkflowError> {
        if self.en_envio {
            return Err(WorkflowError::SubmissionInFlight);
        }
        self.en_envio = true;
        Ok(())
    }

    pub(crate) fn terminar_envio(&mut self) {
        self.en_envio = false;
    }

    pub(crate) fn avanzar_a(&mut self, paso: Paso) {
        self.paso = paso;
    }

    /// Empty the draft for the next sale on the same reservation.
    pub(crate) fn vaciar_carrito(&mut self) {
        self.carrito = Carrito::new();
    }
}
