//! Brand profile entity

use serde::{Deserialize, Serialize};
use crate::Result;
use crate::validate::{self, Rule};

/// Narrative profile attached 1:1 to a brand.
///
/// The owning brand is tracked by the `marcas.perfil_id` column and is never
/// serialized from here. Normal flow creates a profile nested inside a brand,
/// but the resource family also allows standalone CRUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FichaMarca {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub historia: String,
    #[serde(default)]
    pub fundadores: Option<String>,
    #[serde(rename = "premiosConquistados", default)]
    pub premios_conquistados: Option<String>,
}

impl FichaMarca {
    pub fn validate(&self) -> Result<()> {
        validate::evaluate(&[Rule::NonBlank {
            value: &self.historia,
            message: "A história da marca não pode ser vazia",
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historia_required() {
        let ficha = FichaMarca {
            id: None,
            historia: " ".to_string(),
            fundadores: None,
            premios_conquistados: None,
        };
        assert!(ficha.validate().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let ficha: FichaMarca = serde_json::from_str(
            r#"{"historia": "Fundada em 1899", "premiosConquistados": "Carro do Ano"}"#,
        )
        .unwrap();
        assert_eq!(ficha.premios_conquistados.as_deref(), Some("Carro do Ano"));
        assert!(ficha.validate().is_ok());
    }
}
