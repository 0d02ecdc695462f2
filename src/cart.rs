//! In-memory sale draft (cart).
//!
//! The cart is plain owned data carried inside the workflow session: it has
//! no store of its own and must survive a "keep shopping" round trip to the
//! product list and back. Product ids are unique within the cart; re-adding
//! a product merges quantities. The total is recomputed on demand, never
//! cached.

use serde::{Deserialize, Serialize};

use crate::models::{LineaVenta, Producto};

/// One line of the draft: a product at the price it had when added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaCarrito {
    pub id_producto: i64,
    pub nombre: String,
    pub precio_unitario: f64,
    pub cantidad: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Carrito {
    lineas: Vec<LineaCarrito>,
}

impl Carrito {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lineas(&self) -> &[LineaCarrito] {
        &self.lineas
    }

    pub fn esta_vacio(&self) -> bool {
        self.lineas.is_empty()
    }

    /// Add `cantidad` units of a product. If the product is already in the
    /// cart the quantities are summed; the line order and the original unit
    /// price are preserved. Zero quantity is ignored.
    pub fn agregar(&mut self, producto: &Producto, cantidad: u32) {
        if cantidad == 0 {
            return;
        }
        if let Some(linea) = self
            .lineas
            .iter_mut()
            .find(|l| l.id_producto == producto.id)
        {
            linea.cantidad += cantidad;
            return;
        }
        self.lineas.push(LineaCarrito {
            id_producto: producto.id,
            nombre: producto.nombre.clone(),
            precio_unitario: producto.precio,
            cantidad,
        });
    }

    /// Remove an entire line by position. Returns false when the index is
    /// out of range (the cart is left untouched).
    pub fn quitar(&mut self, indice: usize) -> bool {
        if indice >= self.lineas.len() {
            return false;
        }
        self.lineas.remove(indice);
        true
    }

    /// Replace a line's quantity. A non-positive or oversized quantity, or
    /// an out-of-range index, is a no-op: invalid input must never corrupt
    /// the draft.
    pub fn fijar_cantidad(&mut self, indice: usize, cantidad: i64) {
        if cantidad < 1 {
            return;
        }
        let Ok(cantidad) = u32::try_from(cantidad) else {
            return;
        };
        if let Some(linea) = self.lineas.get_mut(indice) {
            linea.cantidad = cantidad;
        }
    }

    /// Current total: Σ unit price × quantity over all lines.
    pub fn total(&self) -> f64 {
        self.lineas
            .iter()
            .map(|l| l.precio_unitario * f64::from(l.cantidad))
            .sum()
    }

    /// Project the draft into the sale-request line shape.
    pub fn como_lineas_venta(&self) -> Vec<LineaVenta> {
        self.lineas
            .iter()
            .map(|l| LineaVenta {
                id_producto: l.id_producto,
                cantidad: l.cantidad,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i64, nombre: &str, precio: f64) -> Producto {
        Producto {
            id,
            nombre: nombre.to_string(),
            precio,
            categoria: None,
            descripcion: None,
        }
    }

    #[test]
    fn adding_same_product_twice_merges_quantities() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 2);
        carrito.agregar(&producto(1, "Tacos", 10.0), 1);

        assert_eq!(carrito.lineas().len(), 1);
        assert_eq!(carrito.lineas()[0].cantidad, 3);
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 2);
        carrito.agregar(&producto(2, "Agua", 5.0), 1);

        assert_eq!(carrito.total(), 25.0);
    }

    #[test]
    fn total_holds_after_mixed_mutations() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 2);
        carrito.agregar(&producto(2, "Agua", 5.0), 3);
        carrito.agregar(&producto(3, "Flan", 7.5), 1);
        carrito.fijar_cantidad(1, 2);
        assert!(carrito.quitar(0));

        let esperado: f64 = carrito
            .lineas()
            .iter()
            .map(|l| l.precio_unitario * f64::from(l.cantidad))
            .sum();
        assert_eq!(carrito.total(), esperado);
        assert_eq!(carrito.total(), 5.0 * 2.0 + 7.5);
    }

    #[test]
    fn fijar_cantidad_ignores_invalid_input() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 2);
        let antes = carrito.clone();

        carrito.fijar_cantidad(0, 0);
        carrito.fijar_cantidad(0, -3);
        carrito.fijar_cantidad(9, 5);

        assert_eq!(carrito, antes);
    }

    #[test]
    fn fijar_cantidad_rejects_values_beyond_u32() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 2);
        let antes = carrito.clone();

        // Positive but does not fit in u32; a truncating cast would zero
        // the line and with it the total.
        carrito.fijar_cantidad(0, 1i64 << 32);
        carrito.fijar_cantidad(0, i64::MAX);

        assert_eq!(carrito, antes);
        assert_eq!(carrito.lineas()[0].cantidad, 2);
        assert_eq!(carrito.total(), 20.0);
    }

    #[test]
    fn quitar_removes_whole_line() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 4);
        assert!(carrito.quitar(0));
        assert!(carrito.esta_vacio());
        assert!(!carrito.quitar(0));
    }

    #[test]
    fn merged_line_keeps_original_unit_price() {
        let mut carrito = Carrito::new();
        carrito.agregar(&producto(1, "Tacos", 10.0), 1);
        // Price changed in the catalog between adds; the draft keeps the
        // price the operator saw first.
        carrito.agregar(&producto(1, "Tacos", 12.0), 1);

        assert_eq!(carrito.lineas()[0].precio_unitario, 10.0);
        assert_eq!(carrito.lineas()[0].cantidad, 2);
    }
}
