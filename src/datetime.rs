//! Reservation date/time correction.
//!
//! Values typed into the reservation form are shifted before being persisted
//! and shifted back when loaded for editing: +1 day and −6 hours on the way
//! to the backend, the exact inverse on the way back. The shift is applied
//! as one combined `NaiveDateTime` computation so the hour arithmetic rolls
//! over into the adjacent day correctly (02:00 − 6 h → 20:00 the previous
//! day). Only `services::reservaciones` calls these; nothing else in the
//! crate does its own reservation date math.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;

/// Net offset from form value to backend value: +1 day − 6 hours.
fn desplazamiento() -> Duration {
    Duration::days(1) - Duration::hours(6)
}

/// Shift an edit-form value into the value the backend stores.
pub fn formulario_a_backend(dt: NaiveDateTime) -> NaiveDateTime {
    dt + desplazamiento()
}

/// Inverse of [`formulario_a_backend`]: load a backend value into the form.
pub fn backend_a_formulario(dt: NaiveDateTime) -> NaiveDateTime {
    dt - desplazamiento()
}

/// Parse the backend's split `fecha` (`YYYY-MM-DD`) and `hora` (`HH:MM`,
/// seconds tolerated) fields into one combined value.
pub fn combinar(fecha: &str, hora: &str) -> Result<NaiveDateTime, ValidationError> {
    let fecha = NaiveDate::parse_from_str(fecha.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::new("fecha", "formato esperado YYYY-MM-DD"))?;
    let hora = NaiveTime::parse_from_str(hora.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(hora.trim(), "%H:%M:%S"))
        .map_err(|_| ValidationError::new("hora", "formato esperado HH:MM"))?;
    Ok(fecha.and_time(hora))
}

/// Split a combined value back into the backend's `fecha`/`hora` fields.
pub fn separar(dt: NaiveDateTime) -> (String, String) {
    (
        dt.format("%Y-%m-%d").to_string(),
        dt.format("%H:%M").to_string(),
    )
}
