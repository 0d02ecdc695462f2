//! Role-gated route resolution.
//!
//! Maps URL paths to screens with a minimum role per path. Unauthenticated
//! navigation to a gated path redirects to login; an authenticated user
//! below the required role is sent home instead of shown the screen.

use crate::session::{Rol, Sesion};

/// Screens of the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pantalla {
    Inicio,
    Login,
    Clientes,
    Empleados,
    Mesas,
    Productos,
    Ventas,
    Reservaciones,
    FlujoVenta,
}

/// Path prefix → (screen, minimum role). Longest prefixes first so
/// `/ventas/nueva` wins over `/ventas`.
const RUTAS: &[(&str, Pantalla, Option<Rol>)] = &[
    ("/login", Pantalla::Login, None),
    ("/clientes", Pantalla::Clientes, Some(Rol::Empleado)),
    ("/empleados", Pantalla::Empleados, Some(Rol::Administrador)),
    ("/mesas", Pantalla::Mesas, Some(Rol::Administrador)),
    ("/productos", Pantalla::Productos, Some(Rol::Empleado)),
    ("/ventas/nueva", Pantalla::FlujoVenta, Some(Rol::Empleado)),
    ("/ventas", Pantalla::Ventas, Some(Rol::Empleado)),
    ("/reservaciones", Pantalla::Reservaciones, Some(Rol::Cliente)),
    ("/", Pantalla::Inicio, None),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Allow(Pantalla),
    RedirectLogin,
    RedirectHome,
    NotFound,
}

/// Resolve a navigation against the current session.
pub fn resolve(path: &str, sesion: Option<&Sesion>) -> RouteOutcome {
    let path = path.trim();
    let path = if path.is_empty() { "/" } else { path };

    let entry = RUTAS.iter().find(|(prefix, _, _)| {
        if *prefix == "/" {
            path == "/"
        } else {
            path == *prefix || path.starts_with(&format!("{prefix}/"))
        }
    });

    let Some((_, pantalla, rol_minimo)) = entry else {
        return RouteOutcome::NotFound;
    };

    match rol_minimo {
        None => RouteOutcome::Allow(*pantalla),
        Some(requerido) => match sesion {
            None => RouteOutcome::RedirectLogin,
            Some(s) if s.perfil.rol >= *requerido => RouteOutcome::Allow(*pantalla),
            Some(_) => RouteOutcome::RedirectHome,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Perfil;

    fn sesion(rol: Rol) -> Sesion {
        // Only role gating matters here; the token is irrelevant.
        let perfil = Perfil {
            usuario: "test".into(),
            rol,
        };
        sesion_con(perfil)
    }

    fn sesion_con(perfil: Perfil) -> Sesion {
        // Sesion has no public constructor on purpose; build one through the
        // manager so tests exercise the real path.
        use crate::api::ApiClient;
        use crate::session::SessionManager;
        use crate::storage::MemoryStore;
        use std::sync::Arc;

        let api = ApiClient::new("http://localhost:9").expect("client");
        let mgr = SessionManager::new(Arc::new(MemoryStore::new()));
        mgr.login(&api, "tok", perfil).expect("login");
        mgr.current().expect("session")
    }

    #[test]
    fn unauthenticated_gated_path_redirects_to_login() {
        assert_eq!(resolve("/ventas", None), RouteOutcome::RedirectLogin);
        assert_eq!(resolve("/empleados", None), RouteOutcome::RedirectLogin);
    }

    #[test]
    fn underprivileged_user_is_sent_home() {
        let cliente = sesion(Rol::Cliente);
        assert_eq!(resolve("/empleados", Some(&cliente)), RouteOutcome::RedirectHome);
        assert_eq!(resolve("/ventas", Some(&cliente)), RouteOutcome::RedirectHome);
        // But reservations are open to clients.
        assert_eq!(
            resolve("/reservaciones", Some(&cliente)),
            RouteOutcome::Allow(Pantalla::Reservaciones)
        );
    }

    #[test]
    fn admin_reaches_everything() {
        let admin = sesion(Rol::Administrador);
        for path in ["/clientes", "/empleados", "/mesas", "/productos", "/ventas"] {
            assert!(matches!(resolve(path, Some(&admin)), RouteOutcome::Allow(_)));
        }
    }

    #[test]
    fn longest_prefix_wins() {
        let emp = sesion(Rol::Empleado);
        assert_eq!(
            resolve("/ventas/nueva", Some(&emp)),
            RouteOutcome::Allow(Pantalla::FlujoVenta)
        );
        assert_eq!(
            resolve("/ventas/17", Some(&emp)),
            RouteOutcome::Allow(Pantalla::Ventas)
        );
    }

    #[test]
    fn open_paths_need_no_session() {
        assert_eq!(resolve("/login", None), RouteOutcome::Allow(Pantalla::Login));
        assert_eq!(resolve("/", None), RouteOutcome::Allow(Pantalla::Inicio));
        assert_eq!(resolve("", None), RouteOutcome::Allow(Pantalla::Inicio));
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(resolve("/nada", None), RouteOutcome::NotFound);
    }
}
