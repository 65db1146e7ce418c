//! Vehicle resource family
//!
//! Create and update run the same pipeline: field validation, then
//! reference resolution (brand first, accessories second), then one
//! transactional write. A failed resolution leaves nothing behind.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use crate::Error;
use crate::guard::{DeleteCheck, DeleteGuard};
use crate::model::{Carro, CarroPayload};
use crate::query::{SearchEngine, SearchParams, profiles};
use crate::resolver::RefResolver;
use crate::server::{AppState, error_reply};

/// Search envelope for vehicles
#[derive(Serialize)]
pub struct SearchCarroResponse {
    #[serde(rename = "Carros")]
    pub carros: Vec<Carro>,
    #[serde(rename = "TotalCarros")]
    pub total_carros: i64,
    #[serde(rename = "TotalPages")]
    pub total_pages: i64,
    #[serde(rename = "HasMore")]
    pub has_more: bool,
    #[serde(rename = "NextPage")]
    pub next_page: String,
}

pub async fn get_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Carro>>, (StatusCode, String)> {
    let store = state.store.lock().await;
    store.list_carros().map(Json).map_err(error_reply)
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Carro>, (StatusCode, String)> {
    let store = state.store.lock().await;
    match store.get_carro(id).map_err(error_reply)? {
        Some(carro) => Ok(Json(carro)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchCarroResponse>, (StatusCode, String)> {
    let store = state.store.lock().await;
    let outcome = SearchEngine::new(&store)
        .run(&profiles::CARROS, &params, &state.base_url)
        .map_err(error_reply)?;

    let mut carros = Vec::with_capacity(outcome.ids.len());
    for id in &outcome.ids {
        if let Some(carro) = store.get_carro(*id).map_err(error_reply)? {
            carros.push(carro);
        }
    }

    Ok(Json(SearchCarroResponse {
        carros,
        total_carros: outcome.total,
        total_pages: outcome.total_pages,
        has_more: outcome.has_more,
        next_page: outcome.next_page,
    }))
}

pub async fn insert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CarroPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    payload.validate().map_err(error_reply)?;

    let mut store = state.store.lock().await;
    let refs = RefResolver::new(&store).resolve(&payload).map_err(error_reply)?;
    store
        .insert_carro(&payload, refs.marca_id(), &refs.acessorio_ids())
        .map_err(error_reply)?;
    Ok(StatusCode::CREATED)
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<CarroPayload>,
) -> Result<Json<Carro>, (StatusCode, String)> {
    let mut store = state.store.lock().await;
    if store.get_carro(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    payload.validate().map_err(error_reply)?;

    let refs = RefResolver::new(&store).resolve(&payload).map_err(error_reply)?;
    store
        .update_carro(id, &payload, refs.marca_id(), &refs.acessorio_ids())
        .map_err(error_reply)?;
    match store.get_carro(id).map_err(error_reply)? {
        Some(carro) => Ok(Json(carro)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.store.lock().await;
    if store.get_carro(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    match DeleteGuard::new(&store).check_carro(id).map_err(error_reply)? {
        DeleteCheck::Blocked { dependentes } => {
            Err(error_reply(Error::DependencyConflict(dependentes)))
        }
        DeleteCheck::Allowed => {
            // join rows are cleared inside the same transaction as the row delete
            store.delete_carro(id).map_err(error_reply)?;
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
