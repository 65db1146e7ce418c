//! Brand profile resource family
//!
//! Profiles normally ride along with their brand, but the collection also
//! supports standalone CRUD and search.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use crate::Error;
use crate::guard::{DeleteCheck, DeleteGuard};
use crate::model::FichaMarca;
use crate::query::{SearchEngine, SearchParams, profiles};
use crate::server::{AppState, error_reply};

/// Search envelope for brand profiles
#[derive(Serialize)]
pub struct SearchFichaResponse {
    #[serde(rename = "Fichas")]
    pub fichas: Vec<FichaMarca>,
    #[serde(rename = "TotalFichas")]
    pub total_fichas: i64,
    #[serde(rename = "TotalPages")]
    pub total_pages: i64,
    #[serde(rename = "HasMore")]
    pub has_more: bool,
    #[serde(rename = "NextPage")]
    pub next_page: String,
}

pub async fn get_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FichaMarca>>, (StatusCode, String)> {
    let store = state.store.lock().await;
    store.list_fichas().map(Json).map_err(error_reply)
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<FichaMarca>, (StatusCode, String)> {
    let store = state.store.lock().await;
    match store.get_ficha(id).map_err(error_reply)? {
        Some(ficha) => Ok(Json(ficha)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchFichaResponse>, (StatusCode, String)> {
    let store = state.store.lock().await;
    let outcome = SearchEngine::new(&store)
        .run(&profiles::FICHAS, &params, &state.base_url)
        .map_err(error_reply)?;

    let mut fichas = Vec::with_capacity(outcome.ids.len());
    for id in &outcome.ids {
        if let Some(ficha) = store.get_ficha(*id).map_err(error_reply)? {
            fichas.push(ficha);
        }
    }

    Ok(Json(SearchFichaResponse {
        fichas,
        total_fichas: outcome.total,
        total_pages: outcome.total_pages,
        has_more: outcome.has_more,
        next_page: outcome.next_page,
    }))
}

pub async fn insert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FichaMarca>,
) -> Result<(StatusCode, Json<FichaMarca>), (StatusCode, String)> {
    payload.validate().map_err(error_reply)?;
    let store = state.store.lock().await;
    let created = store.insert_ficha(&payload).map_err(error_reply)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<FichaMarca>,
) -> Result<Json<FichaMarca>, (StatusCode, String)> {
    let store = state.store.lock().await;
    if store.get_ficha(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    payload.validate().map_err(error_reply)?;
    store.update_ficha(id, &payload).map_err(error_reply)?;
    match store.get_ficha(id).map_err(error_reply)? {
        Some(ficha) => Ok(Json(ficha)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.store.lock().await;
    if store.get_ficha(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    match DeleteGuard::new(&store).check_ficha(id).map_err(error_reply)? {
        DeleteCheck::Blocked { dependentes } => {
            Err(error_reply(Error::DependencyConflict(dependentes)))
        }
        DeleteCheck::Allowed => {
            store.delete_ficha(id).map_err(error_reply)?;
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
