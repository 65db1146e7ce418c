//! Accessory resource family

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use crate::Error;
use crate::guard::{DeleteCheck, DeleteGuard};
use crate::model::Acessorio;
use crate::query::{SearchEngine, SearchParams, profiles};
use crate::server::{AppState, error_reply};

/// Search envelope for accessories
#[derive(Serialize)]
pub struct SearchAcessorioResponse {
    #[serde(rename = "Acessorios")]
    pub acessorios: Vec<Acessorio>,
    #[serde(rename = "TotalAcessorios")]
    pub total_acessorios: i64,
    #[serde(rename = "TotalPages")]
    pub total_pages: i64,
    #[serde(rename = "HasMore")]
    pub has_more: bool,
    #[serde(rename = "NextPage")]
    pub next_page: String,
}

pub async fn get_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Acessorio>>, (StatusCode, String)> {
    let store = state.store.lock().await;
    store.list_acessorios().map(Json).map_err(error_reply)
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Acessorio>, (StatusCode, String)> {
    let store = state.store.lock().await;
    match store.get_acessorio(id).map_err(error_reply)? {
        Some(acessorio) => Ok(Json(acessorio)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchAcessorioResponse>, (StatusCode, String)> {
    let store = state.store.lock().await;
    let outcome = SearchEngine::new(&store)
        .run(&profiles::ACESSORIOS, &params, &state.base_url)
        .map_err(error_reply)?;

    let mut acessorios = Vec::with_capacity(outcome.ids.len());
    for id in &outcome.ids {
        if let Some(acessorio) = store.get_acessorio(*id).map_err(error_reply)? {
            acessorios.push(acessorio);
        }
    }

    Ok(Json(SearchAcessorioResponse {
        acessorios,
        total_acessorios: outcome.total,
        total_pages: outcome.total_pages,
        has_more: outcome.has_more,
        next_page: outcome.next_page,
    }))
}

pub async fn insert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Acessorio>,
) -> Result<StatusCode, (StatusCode, String)> {
    payload.validate().map_err(error_reply)?;
    let store = state.store.lock().await;
    store.insert_acessorio(&payload).map_err(error_reply)?;
    Ok(StatusCode::CREATED)
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<Acessorio>,
) -> Result<Json<Acessorio>, (StatusCode, String)> {
    let store = state.store.lock().await;
    if store.get_acessorio(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    payload.validate().map_err(error_reply)?;
    store.update_acessorio(id, &payload).map_err(error_reply)?;
    match store.get_acessorio(id).map_err(error_reply)? {
        Some(acessorio) => Ok(Json(acessorio)),
        None => Err(error_reply(Error::NotFound)),
    }
}

/// Delete is refused with a 409 while any car still references the
/// accessory; the body names the dependent count.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let store = state.store.lock().await;
    if store.get_acessorio(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    match DeleteGuard::new(&store).check_acessorio(id).map_err(error_reply)? {
        DeleteCheck::Blocked { dependentes } => {
            Err(error_reply(Error::DependencyConflict(dependentes)))
        }
        DeleteCheck::Allowed => {
            store.delete_acessorio(id).map_err(error_reply)?;
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
