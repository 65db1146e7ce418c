//! Brand entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::validate::{self, Rule};
use super::FichaMarca;

/// A vehicle manufacturer.
///
/// Owns at most one [`FichaMarca`] (serialized as `perfil`, cascade deleted
/// with the brand) and a list of vehicles that is deliberately not
/// serialized; vehicles point back at the brand instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marca {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nomeDaMarca", default)]
    pub nome_da_marca: String,
    #[serde(rename = "nomeCompletoEmpresa", default)]
    pub nome_completo_empresa: Option<String>,
    #[serde(rename = "dataDeFundacao", default)]
    pub data_de_fundacao: Option<NaiveDate>,
    #[serde(rename = "paisDeOrigem", default)]
    pub pais_de_origem: String,
    #[serde(default)]
    pub perfil: Option<FichaMarca>,
}

impl Marca {
    /// Field constraints; the nested profile is validated by its own
    /// resource family, not here.
    pub fn validate(&self) -> Result<()> {
        validate::evaluate(&[
            Rule::NonBlank {
                value: &self.nome_da_marca,
                message: "O nome da marca não pode ser vazio",
            },
            Rule::CharsBetween {
                value: &self.nome_da_marca,
                min: 2,
                max: 100,
                message: "O nome da marca deve ter entre 2 e 100 caracteres",
            },
            Rule::PastDate {
                value: self.data_de_fundacao,
                message: "A data de fundação deve ser no passado",
            },
            Rule::NonBlank {
                value: &self.pais_de_origem,
                message: "O país de origem é obrigatório",
            },
            Rule::MaxChars {
                value: &self.pais_de_origem,
                max: 80,
                message: "O país de origem deve ter no máximo 80 caracteres",
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_marca(nome: &str) -> Marca {
        Marca {
            id: None,
            nome_da_marca: nome.to_string(),
            nome_completo_empresa: Some("Fiat S.p.A.".to_string()),
            data_de_fundacao: NaiveDate::from_ymd_opt(1899, 7, 11),
            pais_de_origem: "Itália".to_string(),
            perfil: None,
        }
    }

    #[test]
    fn test_valid_marca() {
        assert!(sample_marca("Fiat").validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(sample_marca("F").validate().is_err());
        assert!(sample_marca(&"x".repeat(101)).validate().is_err());
        assert!(sample_marca(&"x".repeat(100)).validate().is_ok());
    }

    #[test]
    fn test_founding_date_must_be_past() {
        let mut marca = sample_marca("Fiat");
        marca.data_de_fundacao = Some(chrono::Local::now().date_naive());
        assert!(marca.validate().is_err());
        marca.data_de_fundacao = None;
        assert!(marca.validate().is_ok());
    }

    #[test]
    fn test_country_required() {
        let mut marca = sample_marca("Fiat");
        marca.pais_de_origem = "".to_string();
        assert!(marca.validate().is_err());
    }

    #[test]
    fn test_wire_format_roundtrip() {
        let json = r#"{
            "nomeDaMarca": "Fiat",
            "dataDeFundacao": "1899-07-11",
            "paisDeOrigem": "Itália",
            "perfil": {"historia": "Fundada em Turim."}
        }"#;
        let marca: Marca = serde_json::from_str(json).unwrap();
        assert_eq!(marca.nome_da_marca, "Fiat");
        assert_eq!(marca.data_de_fundacao, NaiveDate::from_ymd_opt(1899, 7, 11));
        assert!(marca.perfil.is_some());

        let out = serde_json::to_value(&marca).unwrap();
        assert_eq!(out["nomeDaMarca"], "Fiat");
        assert_eq!(out["dataDeFundacao"], "1899-07-11");
    }
}
