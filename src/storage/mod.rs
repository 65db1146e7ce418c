//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - marcas(id, nome_da_marca, nome_completo_empresa, data_de_fundacao, pais_de_origem, perfil_id)
//! - fichas_marca(id, historia, fundadores, premios_conquistados)
//! - carros(id, modelo, descricao, ano_fabricacao, avaliacao, cilindradas, marca_id)
//! - acessorios(id, nome, descricao)
//! - carro_acessorio(carro_id, acessorio_id)
//!
//! Ownership edges (brand → profile, brand → cars) are enforced here:
//! cascade and orphan cleanup run inside the same transaction as the
//! triggering write.

pub mod schema;
pub mod sqlite;

pub use sqlite::{CatalogStore, Filter, StoreStats};
