//! Form-level validation rules.
//!
//! These run before any network call: a failing rule blocks submission and
//! is shown inline next to the field. The current time is always passed in
//! by the caller so date rules are deterministic under test.

use chrono::NaiveDateTime;

use crate::datetime;
use crate::error::ValidationError;

/// Required textual field: trimmed, non-empty.
pub fn requerido(campo: &str, valor: &str) -> Result<(), ValidationError> {
    if valor.trim().is_empty() {
        return Err(ValidationError::new(campo, "este campo es obligatorio"));
    }
    Ok(())
}

/// Numeric field (price, capacity, table number): must parse to a strictly
/// positive number.
pub fn numero_positivo(campo: &str, valor: &str) -> Result<f64, ValidationError> {
    let n: f64 = valor
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(campo, "debe ser un número"))?;
    if !n.is_finite() || n <= 0.0 {
        return Err(ValidationError::new(campo, "debe ser un número positivo"));
    }
    Ok(n)
}

/// Password confirmation: byte-for-byte equality, no trimming.
pub fn confirmacion_password(password: &str, confirmacion: &str) -> Result<(), ValidationError> {
    if password.as_bytes() != confirmacion.as_bytes() {
        return Err(ValidationError::new(
            "confirmacion",
            "las contraseñas no coinciden",
        ));
    }
    Ok(())
}

/// Reservation date rule: the date must not be in the past; when it is
/// today, the time must not be earlier than the current time.
pub fn fecha_reserva_valida(
    fecha: &str,
    hora: &str,
    ahora: NaiveDateTime,
) -> Result<(), ValidationError> {
    let pedida = datetime::combinar(fecha, hora)?;
    if pedida.date() < ahora.date() {
        return Err(ValidationError::new("fecha", "la fecha ya pasó"));
    }
    if pedida.date() == ahora.date() && pedida.time() < ahora.time() {
        return Err(ValidationError::new("hora", "la hora ya pasó"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ahora() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-08-24T12:00", "%Y-%m-%dT%H:%M").expect("now")
    }

    #[test]
    fn requerido_rejects_whitespace_only() {
        assert!(requerido("nombre", "   ").is_err());
        assert!(requerido("nombre", "Ana").is_ok());
    }

    #[test]
    fn numero_positivo_rejects_zero_negative_and_text() {
        assert!(numero_positivo("precio", "0").is_err());
        assert!(numero_positivo("precio", "-3").is_err());
        assert!(numero_positivo("precio", "abc").is_err());
        assert!(numero_positivo("precio", "NaN").is_err());
        assert_eq!(numero_positivo("precio", " 12.50 ").expect("parse"), 12.5);
    }

    #[test]
    fn confirmacion_password_is_exact() {
        assert!(confirmacion_password("secreta", "secreta").is_ok());
        assert!(confirmacion_password("secreta", "Secreta").is_err());
        assert!(confirmacion_password("secreta", "secreta ").is_err());
    }

    #[test]
    fn fecha_reserva_rejects_past_date() {
        assert!(fecha_reserva_valida("2026-08-23", "23:00", ahora()).is_err());
    }

    #[test]
    fn fecha_reserva_today_requires_future_time() {
        assert!(fecha_reserva_valida("2026-08-24", "11:59", ahora()).is_err());
        assert!(fecha_reserva_valida("2026-08-24", "12:00", ahora()).is_ok());
        assert!(fecha_reserva_valida("2026-08-24", "20:30", ahora()).is_ok());
    }

    #[test]
    fn fecha_reserva_future_date_ignores_time() {
        assert!(fecha_reserva_valida("2026-08-25", "00:01", ahora()).is_ok());
    }
}
