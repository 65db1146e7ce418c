//! Accessory entity

use serde::{Deserialize, Serialize};
use crate::Result;
use crate::validate::{self, Rule};

/// An optional feature attachable to many vehicles through the join
/// relation. Deleting one is refused while any vehicle still references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acessorio {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl Acessorio {
    pub fn validate(&self) -> Result<()> {
        validate::evaluate(&[Rule::NonBlank {
            value: &self.nome,
            message: "O nome do acessório não pode ser vazio",
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nome_required() {
        let acessorio = Acessorio { id: None, nome: "".to_string(), descricao: None };
        assert!(acessorio.validate().is_err());
    }

    #[test]
    fn test_descricao_optional() {
        let acessorio = Acessorio {
            id: None,
            nome: "Teto solar".to_string(),
            descricao: None,
        };
        assert!(acessorio.validate().is_ok());
    }
}
