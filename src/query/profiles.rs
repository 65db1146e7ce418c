//! Per-entity-kind search profiles
//!
//! A profile pins down the three things that differ between resource
//! families: the table, the URL path segment for `nextPage` links, the
//! sort-field allow-list (wire name → column), and how a free-text query
//! becomes a WHERE fragment. Everything else lives once in the engine.

use rusqlite::types::Value;
use crate::storage::Filter;

/// Search configuration for one entity kind
pub struct SearchProfile {
    pub table: &'static str,
    pub path: &'static str,
    /// Allow-listed sort fields as (wire name, column) pairs
    pub sort_fields: &'static [(&'static str, &'static str)],
    pub filter: fn(&str) -> Filter,
}

impl SearchProfile {
    /// Resolve a requested sort field against the allow-list.
    /// Unknown fields silently fall back to the primary key.
    pub fn sort_column(&self, requested: &str) -> &'static str {
        self.sort_fields
            .iter()
            .find(|(name, _)| *name == requested)
            .map(|(_, column)| *column)
            .unwrap_or("id")
    }
}

/// Brands: substring match on name or country of origin
pub const MARCAS: SearchProfile = SearchProfile {
    table: "marcas",
    path: "marcas",
    sort_fields: &[
        ("id", "id"),
        ("nomeDaMarca", "nome_da_marca"),
        ("paisDeOrigem", "pais_de_origem"),
        ("dataDeFundacao", "data_de_fundacao"),
    ],
    filter: marca_filter,
};

/// Cars: numeric queries hit year/displacement exactly, anything else is a
/// substring match on the model name only
pub const CARROS: SearchProfile = SearchProfile {
    table: "carros",
    path: "carros",
    sort_fields: &[
        ("id", "id"),
        ("modelo", "modelo"),
        ("anoFabricacao", "ano_fabricacao"),
        ("avaliacao", "avaliacao"),
        ("cilindradas", "cilindradas"),
    ],
    filter: carro_filter,
};

/// Accessories: substring match on name or description
pub const ACESSORIOS: SearchProfile = SearchProfile {
    table: "acessorios",
    path: "acessorios",
    sort_fields: &[("id", "id"), ("nome", "nome"), ("descricao", "descricao")],
    filter: acessorio_filter,
};

/// Brand profiles: substring match on history or founders
pub const FICHAS: SearchProfile = SearchProfile {
    table: "fichas_marca",
    path: "fichas-marca",
    sort_fields: &[("id", "id"), ("historia", "historia"), ("fundadores", "fundadores")],
    filter: ficha_filter,
};

fn like_pattern(q: &str) -> Value {
    Value::Text(format!("%{}%", q.to_lowercase()))
}

fn marca_filter(q: &str) -> Filter {
    Filter::new(
        "LOWER(nome_da_marca) LIKE ?1 OR LOWER(pais_de_origem) LIKE ?1",
        vec![like_pattern(q)],
    )
}

fn carro_filter(q: &str) -> Filter {
    // numerals beyond i32 are treated as model-name text
    match q.parse::<i32>() {
        Ok(numero) => Filter::new(
            "ano_fabricacao = ?1 OR cilindradas = ?1",
            vec![Value::Integer(numero as i64)],
        ),
        Err(_) => Filter::new("LOWER(modelo) LIKE ?1", vec![like_pattern(q)]),
    }
}

fn acessorio_filter(q: &str) -> Filter {
    Filter::new("LOWER(nome) LIKE ?1 OR LOWER(descricao) LIKE ?1", vec![like_pattern(q)])
}

fn ficha_filter(q: &str) -> Filter {
    Filter::new("LOWER(historia) LIKE ?1 OR LOWER(fundadores) LIKE ?1", vec![like_pattern(q)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_fallback_to_primary_key() {
        assert_eq!(CARROS.sort_column("modelo"), "modelo");
        assert_eq!(CARROS.sort_column("anoFabricacao"), "ano_fabricacao");
        assert_eq!(CARROS.sort_column("preco"), "id");
        // allow-list matching is exact, not case-folded
        assert_eq!(CARROS.sort_column("Modelo"), "id");
    }

    #[test]
    fn test_carro_filter_numeric_vs_text() {
        let numeric = carro_filter("1995");
        assert_eq!(numeric.clause.as_deref(), Some("ano_fabricacao = ?1 OR cilindradas = ?1"));

        let text = carro_filter("uno");
        assert_eq!(text.clause.as_deref(), Some("LOWER(modelo) LIKE ?1"));

        // past i32 range: treated as text
        let overflow = carro_filter("99999999999");
        assert_eq!(overflow.clause.as_deref(), Some("LOWER(modelo) LIKE ?1"));
    }
}
