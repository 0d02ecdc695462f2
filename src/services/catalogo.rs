//! Catalog CRUD: products, clients, employees, tables. These back the plain
//! list/create/edit screens; none of them carries workflow state.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Cliente, Empleado, Mesa, Producto};

// ---------------------------------------------------------------------------
// Productos
// ---------------------------------------------------------------------------

pub async fn listar_productos(api: &ApiClient) -> Result<Vec<Producto>, ApiError> {
    api.get("/api/producto/listar").await
}

pub async fn buscar_producto(api: &ApiClient, id: i64) -> Result<Producto, ApiError> {
    api.get(&format!("/api/producto/buscaid/{id}")).await
}

pub async fn guardar_producto(api: &ApiClient, producto: &Producto) -> Result<Producto, ApiError> {
    api.post("/api/producto/guardar", producto).await
}

pub async fn actualizar_producto(api: &ApiClient, producto: &Producto) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .put(&format!("/api/producto/actualizar/{}", producto.id), producto)
        .await?;
    Ok(())
}

pub async fn eliminar_producto(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let _: serde_json::Value = api.delete(&format!("/api/producto/eliminar/{id}")).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Clientes
// ---------------------------------------------------------------------------

pub async fn listar_clientes(api: &ApiClient) -> Result<Vec<Cliente>, ApiError> {
    api.get("/api/clientes/listar").await
}

pub async fn buscar_cliente(api: &ApiClient, id: i64) -> Result<Cliente, ApiError> {
    api.get(&format!("/api/clientes/buscaid/{id}")).await
}

pub async fn guardar_cliente(api: &ApiClient, cliente: &Cliente) -> Result<Cliente, ApiError> {
    api.post("/api/clientes/guardar", cliente).await
}

pub async fn actualizar_cliente(api: &ApiClient, cliente: &Cliente) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .put(&format!("/api/clientes/actualizar/{}", cliente.id), cliente)
        .await?;
    Ok(())
}

pub async fn eliminar_cliente(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let _: serde_json::Value = api.delete(&format!("/api/clientes/eliminar/{id}")).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Empleados
// ---------------------------------------------------------------------------

pub async fn listar_empleados(api: &ApiClient) -> Result<Vec<Empleado>, ApiError> {
    api.get("/api/empleados/listar").await
}

pub async fn buscar_empleado(api: &ApiClient, id: i64) -> Result<Empleado, ApiError> {
    api.get(&format!("/api/empleados/buscaid/{id}")).await
}

pub async fn guardar_empleado(api: &ApiClient, empleado: &Empleado) -> Result<Empleado, ApiError> {
    api.post("/api/empleados/guardar", empleado).await
}

pub async fn actualizar_empleado(api: &ApiClient, empleado: &Empleado) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .put(&format!("/api/empleados/actualizar/{}", empleado.id), empleado)
        .await?;
    Ok(())
}

pub async fn eliminar_empleado(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let _: serde_json::Value = api.delete(&format!("/api/empleados/eliminar/{id}")).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Mesas
// ---------------------------------------------------------------------------

pub async fn listar_mesas(api: &ApiClient) -> Result<Vec<Mesa>, ApiError> {
    api.get("/api/mesas/listar").await
}

pub async fn buscar_mesa(api: &ApiClient, id: i64) -> Result<Mesa, ApiError> {
    api.get(&format!("/api/mesas/buscaid/{id}")).await
}

pub async fn guardar_mesa(api: &ApiClient, mesa: &Mesa) -> Result<Mesa, ApiError> {
    api.post("/api/mesas/guardar", mesa).await
}

pub async fn actualizar_mesa(api: &ApiClient, mesa: &Mesa) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .put(&format!("/api/mesas/actualizar/{}", mesa.id), mesa)
        .await?;
    Ok(())
}

pub async fn eliminar_mesa(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let _: serde_json::Value = api.delete(&format!("/api/mesas/eliminar/{id}")).await?;
    Ok(())
}
