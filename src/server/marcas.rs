//! Brand resource family

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::Error;
use crate::guard::{DeleteCheck, DeleteGuard};
use crate::model::Marca;
use crate::query::{SearchEngine, SearchParams, profiles};
use crate::server::{AppState, error_reply};

/// Search envelope for brands
#[derive(Serialize)]
pub struct SearchMarcaResponse {
    #[serde(rename = "Marcas")]
    pub marcas: Vec<Marca>,
    #[serde(rename = "TotalMarcas")]
    pub total_marcas: i64,
    #[serde(rename = "TotalPages")]
    pub total_pages: i64,
    #[serde(rename = "HasMore")]
    pub has_more: bool,
    #[serde(rename = "NextPage")]
    pub next_page: String,
}

#[derive(Deserialize)]
pub struct BuscarParams {
    pub nome: Option<String>,
}

pub async fn get_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Marca>>, (StatusCode, String)> {
    let store = state.store.lock().await;
    store.list_marcas().map(Json).map_err(error_reply)
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Marca>, (StatusCode, String)> {
    let store = state.store.lock().await;
    match store.get_marca(id).map_err(error_reply)? {
        Some(marca) => Ok(Json(marca)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchMarcaResponse>, (StatusCode, String)> {
    let store = state.store.lock().await;
    let outcome = SearchEngine::new(&store)
        .run(&profiles::MARCAS, &params, &state.base_url)
        .map_err(error_reply)?;

    let mut marcas = Vec::with_capacity(outcome.ids.len());
    for id in &outcome.ids {
        if let Some(marca) = store.get_marca(*id).map_err(error_reply)? {
            marcas.push(marca);
        }
    }

    Ok(Json(SearchMarcaResponse {
        marcas,
        total_marcas: outcome.total,
        total_pages: outcome.total_pages,
        has_more: outcome.has_more,
        next_page: outcome.next_page,
    }))
}

/// Name-only lookup; the parameter is mandatory, unlike `/search`
pub async fn buscar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BuscarParams>,
) -> Result<Json<Vec<Marca>>, (StatusCode, String)> {
    let nome = match params.nome.as_deref() {
        Some(nome) if !nome.trim().is_empty() => nome,
        _ => {
            return Err((StatusCode::BAD_REQUEST, "O parâmetro 'nome' é obrigatório.".to_string()));
        }
    };
    let store = state.store.lock().await;
    store.find_marcas_by_name(nome).map(Json).map_err(error_reply)
}

pub async fn insert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Marca>,
) -> Result<(StatusCode, Json<Marca>), (StatusCode, String)> {
    payload.validate().map_err(error_reply)?;

    let mut store = state.store.lock().await;
    if store.marca_name_taken(&payload.nome_da_marca, None).map_err(error_reply)? {
        return Err(error_reply(Error::DuplicateName(payload.nome_da_marca.clone())));
    }

    let created = store.insert_marca(&payload).map_err(error_reply)?;
    tracing::debug!(id = created.id, "brand created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<Marca>,
) -> Result<Json<Marca>, (StatusCode, String)> {
    let mut store = state.store.lock().await;
    if store.get_marca(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    payload.validate().map_err(error_reply)?;
    if store.marca_name_taken(&payload.nome_da_marca, Some(id)).map_err(error_reply)? {
        return Err(error_reply(Error::DuplicateName(payload.nome_da_marca.clone())));
    }

    store.update_marca(id, &payload).map_err(error_reply)?;
    match store.get_marca(id).map_err(error_reply)? {
        Some(marca) => Ok(Json(marca)),
        None => Err(error_reply(Error::NotFound)),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.store.lock().await;
    if store.get_marca(id).map_err(error_reply)?.is_none() {
        return Err(error_reply(Error::NotFound));
    }
    match DeleteGuard::new(&store).check_marca(id).map_err(error_reply)? {
        DeleteCheck::Blocked { dependentes } => {
            Err(error_reply(Error::DependencyConflict(dependentes)))
        }
        DeleteCheck::Allowed => {
            store.delete_marca(id).map_err(error_reply)?;
            tracing::debug!(id, "brand deleted with owned cars and profile");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
