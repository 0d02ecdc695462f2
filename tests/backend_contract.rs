//! Contract tests for the REST collaborators against a mock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use comanda_pos::api::ApiClient;
use comanda_pos::error::ApiError;
use comanda_pos::models::EstadoReserva;
use comanda_pos::services::{auth, reservaciones};
use comanda_pos::session::{Rol, SessionManager};
use comanda_pos::storage::MemoryStore;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).expect("client")
}

// ---------------------------------------------------------------------------
// Username availability (inverted 200/404 contract)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn username_lookup_200_means_taken() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/usuario/ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usuario": "ana"})))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let disponible = auth::usuario_disponible(&api, "ana").await.expect("lookup");
    assert!(!disponible, "200 from the backend means the name is taken");
}

#[tokio::test]
async fn username_lookup_404_means_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/usuario/nueva"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let disponible = auth::usuario_disponible(&api, "nueva").await.expect("lookup");
    assert!(disponible, "404 from the backend means the name is free");
}

#[tokio::test]
async fn username_lookup_server_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/usuario/ana"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = auth::usuario_disponible(&api, "ana").await.expect_err("error");
    assert!(matches!(err, ApiError::Backend { status: 500, .. }));
}

// ---------------------------------------------------------------------------
// Login and bearer token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_installs_bearer_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-abc",
            "usuario": "ana",
            "rol": "Empleado"
        })))
        .mount(&server)
        .await;
    // The reservation fetch must carry the token from the login.
    Mock::given(method("GET"))
        .and(path("/api/reservaciones/buscaid/9"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "idCliente": 4, "idMesa": 2,
            "fecha": "2026-08-31", "hora": "15:00", "estado": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let sesiones = SessionManager::new(Arc::new(MemoryStore::new()));
    let perfil = auth::login(&api, &sesiones, "ana", "secreta").await.expect("login");
    assert_eq!(perfil.rol, Rol::Empleado);
    assert!(sesiones.is_authenticated());

    reservaciones::buscar(&api, 9).await.expect("authorized fetch");
}

#[tokio::test]
async fn unauthorized_response_forces_logout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservaciones/buscaid/9"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let sesiones = SessionManager::new(Arc::new(MemoryStore::new()));
    sesiones
        .login(
            &api,
            "tok-old",
            comanda_pos::session::Perfil {
                usuario: "ana".into(),
                rol: Rol::Empleado,
            },
        )
        .expect("login");

    let err = reservaciones::buscar(&api, 9).await.expect_err("expired");
    assert!(matches!(err, ApiError::Unauthorized));

    // What the UI layer does on Unauthorized: the forced-logout path.
    sesiones.force_logout(&api, "token expired");
    assert!(!sesiones.is_authenticated());
}

// ---------------------------------------------------------------------------
// Reservation read-modify-write and date correction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_change_refetches_before_put_and_keeps_stored_datetime() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservaciones/buscaid/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "idCliente": 4, "idMesa": 2,
            "fecha": "2026-08-31", "hora": "15:00", "estado": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Full-object PUT: same fecha/hora, only the status moves to in-progress.
    Mock::given(method("PUT"))
        .and(path("/api/reservaciones/actualizar/9"))
        .and(body_partial_json(json!({
            "idCliente": 4,
            "fecha": "2026-08-31",
            "hora": "15:00",
            "estado": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let actualizada = reservaciones::cambiar_estado(&api, 9, EstadoReserva::EnCurso)
        .await
        .expect("status change");
    assert_eq!(actualizada.estado, EstadoReserva::EnCurso);
}

#[tokio::test]
async fn illegal_status_transition_is_rejected_without_put() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservaciones/buscaid/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "idCliente": 4, "idMesa": 2,
            "fecha": "2026-08-31", "hora": "15:00", "estado": 1
        })))
        .mount(&server)
        .await;
    // No PUT mock mounted: a PUT would fail the test with an unexpected
    // request error.

    let api = client_for(&server);
    let err = reservaciones::cambiar_estado(&api, 9, EstadoReserva::EnCurso)
        .await
        .expect_err("completed reservations are closed");
    assert!(matches!(
        err,
        comanda_pos::error::WorkflowError::IllegalReservationState { .. }
    ));
}

#[tokio::test]
async fn saving_a_reservation_applies_the_date_correction() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    // Form value 2024-03-10 23:30 must be stored as 2024-03-11 17:30
    // (+1 day, -6 hours, single combined computation).
    Mock::given(method("POST"))
        .and(path("/api/reservaciones/guardar"))
        .and(body_partial_json(json!({
            "fecha": "2024-03-11",
            "hora": "17:30"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12, "idCliente": 4, "idMesa": 2,
            "fecha": "2024-03-11", "hora": "17:30", "estado": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let reserva = comanda_pos::models::Reservacion {
        id: 0,
        id_cliente: 4,
        id_mesa: 2,
        fecha: "2024-03-10".into(),
        hora: "23:30".into(),
        estado: EstadoReserva::Pendiente,
    };
    let creada = reservaciones::guardar(&api, &reserva).await?;
    assert_eq!(creada.id, 12);
    Ok(())
}

#[tokio::test]
async fn loading_a_reservation_applies_the_inverse_correction() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservaciones/buscaid/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12, "idCliente": 4, "idMesa": 2,
            "fecha": "2024-03-11", "hora": "17:30", "estado": 0
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let reserva = reservaciones::buscar(&api, 12).await?;
    assert_eq!(reserva.fecha, "2024-03-10");
    assert_eq!(reserva.hora, "23:30");
    Ok(())
}
