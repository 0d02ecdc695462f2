//! Wire types for the Comanda backend.
//!
//! Field names follow the backend's Spanish JSON shapes. The backend is not
//! consistent about casing (requests are camelCase, some responses are
//! all-lowercase), so serde aliases cover the variants that appear on the
//! wire.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[serde(alias = "idcliente", alias = "idCliente")]
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Empleado {
    #[serde(alias = "idempleado", alias = "idEmpleado")]
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesa {
    #[serde(alias = "idmesa", alias = "idMesa")]
    pub id: i64,
    pub numero: i64,
    pub capacidad: i64,
    #[serde(default)]
    pub ubicacion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    #[serde(alias = "idproducto", alias = "idProducto")]
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

/// One product line inside a sale request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineaVenta {
    pub id_producto: i64,
    pub cantidad: u32,
}

/// Body for `POST /api/ventas/guardar`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaRequest {
    pub id_cliente: i64,
    pub productos: Vec<LineaVenta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_reserva: Option<i64>,
    /// Client-generated idempotency key; the backend deduplicates retried
    /// submissions on it.
    pub id_solicitud: String,
}

/// Response from sale creation. The backend answers in all-lowercase.
#[derive(Debug, Clone, Deserialize)]
pub struct VentaCreada {
    #[serde(alias = "idVenta")]
    pub idventa: i64,
    #[serde(alias = "totalVenta")]
    pub totalventa: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    #[serde(alias = "idventa")]
    pub id: i64,
    #[serde(alias = "idcliente")]
    pub id_cliente: i64,
    #[serde(default, alias = "idreserva")]
    pub id_reserva: Option<i64>,
    #[serde(alias = "totalventa")]
    pub total: f64,
}

/// Body for `POST /api/atender/guardar`: records which employee served a
/// sale. Created once per sale, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atender {
    pub id_empleado: i64,
    pub id_venta: i64,
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

/// Reservation lifecycle state as stored by the backend (integer codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum EstadoReserva {
    Pendiente,
    Completada,
    EnCurso,
}

impl EstadoReserva {
    pub fn codigo(self) -> i64 {
        match self {
            EstadoReserva::Pendiente => 0,
            EstadoReserva::Completada => 1,
            EstadoReserva::EnCurso => 2,
        }
    }

    pub fn nombre(self) -> &'static str {
        match self {
            EstadoReserva::Pendiente => "pendiente",
            EstadoReserva::Completada => "completada",
            EstadoReserva::EnCurso => "en curso",
        }
    }

    /// Legal status transitions: a sale started against a pending reservation
    /// moves it to in-progress, further sales keep it in-progress, and both
    /// pending and in-progress reservations may be closed out.
    pub fn puede_pasar_a(self, destino: EstadoReserva) -> bool {
        use EstadoReserva::*;
        matches!(
            (self, destino),
            (Pendiente, EnCurso)
                | (EnCurso, EnCurso)
                | (EnCurso, Completada)
                | (Pendiente, Completada)
        )
    }
}

impl TryFrom<i64> for EstadoReserva {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EstadoReserva::Pendiente),
            1 => Ok(EstadoReserva::Completada),
            2 => Ok(EstadoReserva::EnCurso),
            other => Err(format!("unknown reservation state code {other}")),
        }
    }
}

impl From<EstadoReserva> for i64 {
    fn from(e: EstadoReserva) -> i64 {
        e.codigo()
    }
}

/// Full reservation record. Updates are full-object PUTs, so every status
/// change must round-trip the complete record (read-modify-write).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservacion {
    #[serde(alias = "idreserva", alias = "idReserva")]
    pub id: i64,
    #[serde(alias = "idcliente")]
    pub id_cliente: i64,
    #[serde(alias = "idmesa")]
    pub id_mesa: i64,
    /// Calendar date, `YYYY-MM-DD`.
    pub fecha: String,
    /// Wall-clock time, `HH:MM`.
    pub hora: String,
    pub estado: EstadoReserva,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub usuario: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub usuario: String,
    pub rol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_reserva_roundtrips_integer_codes() {
        for code in 0..=2 {
            let estado = EstadoReserva::try_from(code).expect("valid code");
            assert_eq!(estado.codigo(), code);
        }
        assert!(EstadoReserva::try_from(7).is_err());
    }

    #[test]
    fn estado_reserva_transitions() {
        use EstadoReserva::*;
        assert!(Pendiente.puede_pasar_a(EnCurso));
        assert!(Pendiente.puede_pasar_a(Completada));
        assert!(EnCurso.puede_pasar_a(EnCurso));
        assert!(EnCurso.puede_pasar_a(Completada));
        assert!(!Completada.puede_pasar_a(EnCurso));
        assert!(!Completada.puede_pasar_a(Pendiente));
        assert!(!EnCurso.puede_pasar_a(Pendiente));
    }

    #[test]
    fn reservacion_accepts_lowercase_backend_fields() {
        let raw = r#"{
            "idreserva": 9,
            "idcliente": 4,
            "idmesa": 2,
            "fecha": "2026-08-30",
            "hora": "21:00",
            "estado": 0
        }"#;
        let r: Reservacion = serde_json::from_str(raw).expect("parse");
        assert_eq!(r.id, 9);
        assert_eq!(r.estado, EstadoReserva::Pendiente);
    }

    #[test]
    fn venta_request_omits_missing_reservation() {
        let req = VentaRequest {
            id_cliente: 1,
            productos: vec![LineaVenta {
                id_producto: 5,
                cantidad: 2,
            }],
            id_reserva: None,
            id_solicitud: "abc".into(),
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert!(json.get("idReserva").is_none());
        assert_eq!(json["idCliente"], 1);
        assert_eq!(json["productos"][0]["idProducto"], 5);
    }
}
