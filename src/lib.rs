//! # Catalogo - Relational vehicle catalog service
//!
//! HTTP resource collections for brands, brand profiles, vehicles and
//! accessories, backed by SQLite.
//!
//! Catalogo provides:
//! - CRUD resource families with a uniform JSON surface
//! - A generic search/sort/pagination engine shared by all entity kinds
//! - Relationship resolution for vehicle payloads (brand + accessory ids)
//! - Referential-integrity checks that block or cascade deletes
//! - SQLite-backed storage with ownership cascades handled in transactions

pub mod model;
pub mod validate;
pub mod storage;
pub mod query;
pub mod resolver;
pub mod guard;
pub mod server;
pub mod config;

// Re-exports for convenient access
pub use model::{Acessorio, Carro, CarroPayload, FichaMarca, Marca};
pub use storage::CatalogStore;

/// Result type alias for Catalogo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Catalogo operations
///
/// The first five variants are per-request API outcomes; their `Display`
/// texts are the response bodies the service emits and are part of the
/// wire contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{kind} com id {id} não existe")]
    ReferenceNotFound { kind: &'static str, id: i64 },

    #[error("Já existe uma marca com esse nome: {0}")]
    DuplicateName(String),

    #[error("registro não encontrado")]
    NotFound,

    #[error("Não é possível deletar o acessório. Existem {0} carro(s) vinculado(s).")]
    DependencyConflict(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
