//! Generic search/pagination engine
//!
//! Turns a (query, sort, direction, page, size) tuple into one filtered
//! count plus one filtered, sorted page of row ids. Out-of-range input is
//! repaired, never rejected: unknown sort fields fall back to the primary
//! key, any direction other than "desc" sorts ascending, negative pages
//! clamp to 0 and sizes clamp to at least 1.

use serde::Deserialize;
use crate::Result;
use crate::storage::{CatalogStore, Filter};
use super::profiles::SearchProfile;

/// Query-string parameters of a `/search` request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_sort() -> String {
    "id".to_string()
}

fn default_direction() -> String {
    "asc".to_string()
}

fn default_size() -> i64 {
    4
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            q: None,
            sort: default_sort(),
            direction: default_direction(),
            page: 0,
            size: default_size(),
        }
    }
}

/// One page of matching ids plus the envelope metadata
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub ids: Vec<i64>,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
    pub next_page: String,
}

/// Search engine over the catalog store
pub struct SearchEngine<'a> {
    store: &'a CatalogStore,
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Run a search for one entity kind.
    ///
    /// Issues a count and a page fetch over the same filter; totals always
    /// describe the filtered, unpaged set. `base_url` is deployment
    /// configuration and only feeds the `nextPage` link.
    pub fn run(
        &self,
        profile: &SearchProfile,
        params: &SearchParams,
        base_url: &str,
    ) -> Result<SearchOutcome> {
        let column = profile.sort_column(&params.sort);
        let descending = params.direction.eq_ignore_ascii_case("desc");
        let page = params.page.max(0);
        let size = params.size.max(1);

        let filter = match params.q.as_deref() {
            Some(q) if !q.trim().is_empty() => (profile.filter)(q),
            _ => Filter::none(),
        };

        let total = self.store.filtered_count(profile.table, &filter)?;
        let ids = self
            .store
            .filtered_page_ids(profile.table, &filter, column, descending, size, page * size)?;

        let total_pages = if total == 0 { 0 } else { (total + size - 1) / size };
        let has_more = page < total_pages - 1;
        let next_page = if has_more {
            format!(
                "{}/{}/search?q={}&page={}&size={}",
                base_url,
                profile.path,
                params.q.as_deref().unwrap_or(""),
                page + 1,
                size
            )
        } else {
            String::new()
        };

        Ok(SearchOutcome { ids, total, total_pages, has_more, next_page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Acessorio, CarroPayload};
    use crate::query::profiles;

    const BASE: &str = "http://localhost:8080";

    fn carro(modelo: &str, ano: i32, cilindradas: i32) -> CarroPayload {
        CarroPayload {
            id: None,
            modelo: modelo.to_string(),
            descricao: "-".to_string(),
            ano_fabricacao: ano,
            avaliacao: 5.0,
            cilindradas,
            marca: None,
            acessorios: None,
        }
    }

    fn seeded_store() -> CatalogStore {
        let mut store = CatalogStore::open_in_memory().unwrap();
        store.insert_carro(&carro("Uno 1995 Edition", 2010, 1000), None, &[]).unwrap();
        store.insert_carro(&carro("Palio", 1995, 1242), None, &[]).unwrap();
        store.insert_carro(&carro("Tempra", 1992, 1995), None, &[]).unwrap();
        store.insert_carro(&carro("Marea", 1998, 1747), None, &[]).unwrap();
        store.insert_carro(&carro("Coupe", 1994, 1995), None, &[]).unwrap();
        store
    }

    fn params(q: Option<&str>) -> SearchParams {
        SearchParams { q: q.map(str::to_string), ..SearchParams::default() }
    }

    #[test]
    fn test_blank_query_pages_everything() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let outcome = engine.run(&profiles::CARROS, &params(None), BASE).unwrap();
        assert_eq!(outcome.total, 5);
        assert_eq!(outcome.total_pages, 2);
        assert_eq!(outcome.ids, vec![1, 2, 3, 4]);
        assert!(outcome.has_more);

        let blank = engine.run(&profiles::CARROS, &params(Some("   ")), BASE).unwrap();
        assert_eq!(blank.total, 5);
    }

    #[test]
    fn test_numeric_query_matches_year_or_displacement_only() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        // 1995 as year (Palio) and as displacement (Tempra, Coupe);
        // "Uno 1995 Edition" matches on neither, model text is ignored
        let outcome = engine.run(&profiles::CARROS, &params(Some("1995")), BASE).unwrap();
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_text_query_matches_model_substring() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let outcome = engine.run(&profiles::CARROS, &params(Some("PAL")), BASE).unwrap();
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.ids, vec![2]);
    }

    #[test]
    fn test_unknown_sort_equals_primary_key_order() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let by_id = engine.run(&profiles::CARROS, &params(None), BASE).unwrap();
        let unknown = engine
            .run(
                &profiles::CARROS,
                &SearchParams { sort: "potencia".to_string(), ..params(None) },
                BASE,
            )
            .unwrap();
        assert_eq!(by_id.ids, unknown.ids);
    }

    #[test]
    fn test_direction_is_desc_only_on_case_insensitive_match() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let desc = engine
            .run(
                &profiles::CARROS,
                &SearchParams { direction: "DeSc".to_string(), ..params(None) },
                BASE,
            )
            .unwrap();
        assert_eq!(desc.ids, vec![5, 4, 3, 2]);

        for direction in ["asc", "descending", "down", ""] {
            let outcome = engine
                .run(
                    &profiles::CARROS,
                    &SearchParams { direction: direction.to_string(), ..params(None) },
                    BASE,
                )
                .unwrap();
            assert_eq!(outcome.ids[0], 1, "direction {:?} must sort ascending", direction);
        }
    }

    #[test]
    fn test_page_past_the_end_keeps_totals() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let outcome = engine
            .run(&profiles::CARROS, &SearchParams { page: 7, ..params(None) }, BASE)
            .unwrap();
        assert!(outcome.ids.is_empty());
        assert_eq!(outcome.total, 5);
        assert_eq!(outcome.total_pages, 2);
        assert!(!outcome.has_more);
        assert_eq!(outcome.next_page, "");
    }

    #[test]
    fn test_negative_page_clamps_to_zero() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let outcome = engine
            .run(&profiles::CARROS, &SearchParams { page: -3, ..params(None) }, BASE)
            .unwrap();
        assert_eq!(outcome.ids, vec![1, 2, 3, 4]);
        assert!(outcome.has_more);
    }

    #[test]
    fn test_next_page_link_carries_query_page_and_size() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let first = engine.run(&profiles::CARROS, &params(None), BASE).unwrap();
        assert_eq!(first.next_page, "http://localhost:8080/carros/search?q=&page=1&size=4");

        let last = engine
            .run(&profiles::CARROS, &SearchParams { page: 1, ..params(None) }, BASE)
            .unwrap();
        assert_eq!(last.ids, vec![5]);
        assert!(!last.has_more);
        assert_eq!(last.next_page, "");

        let filtered = engine
            .run(
                &profiles::CARROS,
                &SearchParams { size: 2, ..params(Some("1995")) },
                BASE,
            )
            .unwrap();
        assert_eq!(filtered.next_page, "http://localhost:8080/carros/search?q=1995&page=1&size=2");
    }

    #[test]
    fn test_size_clamps_to_one() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let outcome = engine
            .run(&profiles::CARROS, &SearchParams { size: 0, ..params(None) }, BASE)
            .unwrap();
        assert_eq!(outcome.ids.len(), 1);
        assert_eq!(outcome.total_pages, 5);
    }

    #[test]
    fn test_empty_store_has_zero_pages() {
        let store = CatalogStore::open_in_memory().unwrap();
        let engine = SearchEngine::new(&store);

        let outcome = engine.run(&profiles::ACESSORIOS, &params(None), BASE).unwrap();
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.total_pages, 0);
        assert!(!outcome.has_more);
    }

    #[test]
    fn test_accessory_search_covers_name_and_description() {
        let store = CatalogStore::open_in_memory().unwrap();
        store
            .insert_acessorio(&Acessorio {
                id: None,
                nome: "Teto solar".to_string(),
                descricao: Some("Abertura elétrica".to_string()),
            })
            .unwrap();
        store
            .insert_acessorio(&Acessorio {
                id: None,
                nome: "Bancos de couro".to_string(),
                descricao: None,
            })
            .unwrap();

        let engine = SearchEngine::new(&store);
        let by_desc = engine.run(&profiles::ACESSORIOS, &params(Some("elétrica")), BASE).unwrap();
        assert_eq!(by_desc.ids, vec![1]);

        let by_name = engine.run(&profiles::ACESSORIOS, &params(Some("couro")), BASE).unwrap();
        assert_eq!(by_name.ids, vec![2]);
    }
}
