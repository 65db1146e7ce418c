//! HTTP server
//!
//! One resource family per entity kind with a uniform surface:
//! list, get-by-id, search, insert, update, delete. Brands additionally
//! expose `/marcas/buscar` (name-only lookup). Error bodies are plain
//! text; the status mapping for the whole API lives in [`error_reply`].

use axum::{
    Router,
    http::StatusCode,
    routing::get,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::Error;
use crate::storage::CatalogStore;

pub mod marcas;
pub mod fichas;
pub mod carros;
pub mod acessorios;

/// Server state
///
/// The store sits behind an async mutex: each request holds it for its
/// whole unit of work, so the count/page pair of a search and the
/// resolve-then-write pair of a mutation observe one consistent snapshot.
pub struct AppState {
    pub store: Mutex<CatalogStore>,
    /// Deployment-time base address used for `nextPage` links
    pub base_url: String,
}

pub async fn start_server(port: u16, database_path: PathBuf, base_url: String) -> anyhow::Result<()> {
    let store = CatalogStore::open(&database_path)?;
    let state = Arc::new(AppState { store: Mutex::new(store), base_url });

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🚗 Catálogo running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full route table
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/marcas", get(marcas::get_all).post(marcas::insert))
        .route("/marcas/search", get(marcas::search))
        .route("/marcas/buscar", get(marcas::buscar))
        .route(
            "/marcas/{id}",
            get(marcas::get_by_id).put(marcas::update).delete(marcas::delete),
        )
        .route("/fichas-marca", get(fichas::get_all).post(fichas::insert))
        .route("/fichas-marca/search", get(fichas::search))
        .route(
            "/fichas-marca/{id}",
            get(fichas::get_by_id).put(fichas::update).delete(fichas::delete),
        )
        .route("/carros", get(carros::get_all).post(carros::insert))
        .route("/carros/search", get(carros::search))
        .route(
            "/carros/{id}",
            get(carros::get_by_id).put(carros::update).delete(carros::delete),
        )
        .route("/acessorios", get(acessorios::get_all).post(acessorios::insert))
        .route("/acessorios/search", get(acessorios::search))
        .route(
            "/acessorios/{id}",
            get(acessorios::get_by_id).put(acessorios::update).delete(acessorios::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a domain error to its HTTP reply.
///
/// Validation, unresolved references and duplicate names are 400;
/// missing path targets 404 with an empty body; blocked deletes 409 with
/// the dependent count in the text; everything else is a 500.
pub(crate) fn error_reply(err: Error) -> (StatusCode, String) {
    let status = match &err {
        Error::Validation(_) | Error::ReferenceNotFound { .. } | Error::DuplicateName(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::NotFound => StatusCode::NOT_FOUND,
        Error::DependencyConflict(_) => StatusCode::CONFLICT,
        Error::Storage(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = if status == StatusCode::NOT_FOUND { String::new() } else { err.to_string() };
    (status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reply_mapping() {
        let (status, body) = error_reply(Error::ReferenceNotFound { kind: "Marca", id: 999 });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Marca com id 999 não existe");

        let (status, body) = error_reply(Error::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        let (status, body) = error_reply(Error::DependencyConflict(2));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, "Não é possível deletar o acessório. Existem 2 carro(s) vinculado(s).");
    }
}
