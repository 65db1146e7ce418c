//! Entity models
//!
//! The four catalog entities plus the inbound vehicle payload. JSON field
//! names follow the public API (`nomeDaMarca`, `anoFabricacao`, ...) via
//! serde renames; struct fields stay snake_case.

pub mod marca;
pub mod ficha;
pub mod carro;
pub mod acessorio;

pub use marca::Marca;
pub use ficha::FichaMarca;
pub use carro::{Carro, CarroPayload, EntityRef};
pub use acessorio::Acessorio;
