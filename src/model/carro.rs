//! Vehicle entity and its inbound payload

use serde::{Deserialize, Serialize};
use crate::Result;
use crate::validate::{self, Rule};
use super::{Acessorio, Marca};

/// A car record as served outward: the brand reference is hydrated into the
/// full brand (profile included) and the accessory set is always present.
#[derive(Debug, Clone, Serialize)]
pub struct Carro {
    pub id: Option<i64>,
    pub modelo: String,
    pub descricao: String,
    #[serde(rename = "anoFabricacao")]
    pub ano_fabricacao: i32,
    pub avaliacao: f64,
    pub cilindradas: i32,
    pub marca: Option<Marca>,
    pub acessorios: Vec<Acessorio>,
}

/// A relationship reference carrying only an id.
///
/// Clients may send the full related object; everything except `id` is
/// ignored here and re-read from the store during resolution.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: Option<i64>,
}

/// Inbound vehicle body for create and update.
///
/// `marca` and `acessorios` are id references resolved against the store
/// before anything is persisted; `acessorios` entries may be JSON null.
/// Missing numeric fields deserialize as zero and are left to the range
/// rules.
#[derive(Debug, Clone, Deserialize)]
pub struct CarroPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(rename = "anoFabricacao", default)]
    pub ano_fabricacao: i32,
    #[serde(default)]
    pub avaliacao: f64,
    #[serde(default)]
    pub cilindradas: i32,
    #[serde(default)]
    pub marca: Option<EntityRef>,
    #[serde(default)]
    pub acessorios: Option<Vec<Option<EntityRef>>>,
}

impl CarroPayload {
    pub fn validate(&self) -> Result<()> {
        validate::evaluate(&[
            Rule::NonBlank {
                value: &self.modelo,
                message: "O modelo não pode ser vazio",
            },
            Rule::CharsBetween {
                value: &self.modelo,
                min: 1,
                max: 200,
                message: "O modelo deve ter entre 1 e 200 caracteres",
            },
            Rule::NonBlank {
                value: &self.descricao,
                message: "A descrição é obrigatória",
            },
            Rule::MaxChars {
                value: &self.descricao,
                max: 2000,
                message: "A descrição deve ter no máximo 2000 caracteres",
            },
            Rule::AtLeast {
                value: self.ano_fabricacao as i64,
                min: 1900,
                message: "Ano de fabricação inválido",
            },
            Rule::MinFloat {
                value: self.avaliacao,
                min: 0.0,
                message: "Avaliação mínima é 0.0",
            },
            Rule::MaxFloat {
                value: self.avaliacao,
                max: 10.0,
                message: "Avaliação máxima é 10.0",
            },
            Rule::AtLeast {
                value: self.cilindradas as i64,
                min: 0,
                message: "Cilindradas não podem ser negativas",
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> CarroPayload {
        CarroPayload {
            id: None,
            modelo: "Uno".to_string(),
            descricao: "Compacto urbano".to_string(),
            ano_fabricacao: 1995,
            avaliacao: 7.5,
            cilindradas: 1000,
            marca: None,
            acessorios: None,
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(sample_payload().validate().is_ok());
    }

    #[test]
    fn test_year_lower_bound() {
        let mut payload = sample_payload();
        payload.ano_fabricacao = 1899;
        assert!(payload.validate().is_err());
        payload.ano_fabricacao = 1900;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_rating_bounds_inclusive() {
        let mut payload = sample_payload();
        payload.avaliacao = 0.0;
        assert!(payload.validate().is_ok());
        payload.avaliacao = 10.0;
        assert!(payload.validate().is_ok());
        payload.avaliacao = 10.1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_negative_displacement_rejected() {
        let mut payload = sample_payload();
        payload.cilindradas = -1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_missing_fields_fail_validation_not_parsing() {
        // absent modelo/ano default to ""/0 and surface as rule violations
        let payload: CarroPayload = serde_json::from_str(r#"{"descricao": "x"}"#).unwrap();
        let err = payload.validate().unwrap_err().to_string();
        assert!(err.contains("O modelo não pode ser vazio"));
        assert!(err.contains("Ano de fabricação inválido"));
    }

    #[test]
    fn test_reference_list_accepts_nulls_and_full_objects() {
        let json = r#"{
            "modelo": "Uno", "descricao": "x", "anoFabricacao": 1995,
            "marca": {"id": 3, "nomeDaMarca": "Fiat"},
            "acessorios": [null, {"id": 7}, {"id": 0}, {}]
        }"#;
        let payload: CarroPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.marca.unwrap().id, Some(3));
        let refs = payload.acessorios.unwrap();
        assert_eq!(refs.len(), 4);
        assert!(refs[0].is_none());
        assert_eq!(refs[1].unwrap().id, Some(7));
    }
}
