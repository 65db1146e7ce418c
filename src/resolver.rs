//! Relationship resolution for vehicle payloads
//!
//! Inbound car bodies reference their brand and accessories by id only.
//! Before anything is written, every reference is resolved against the
//! store; a single unknown id rejects the whole request. Resolution order
//! is brand first, then accessories.

use std::collections::BTreeSet;
use crate::{Error, Result};
use crate::model::{Acessorio, CarroPayload, Marca};
use crate::storage::CatalogStore;

/// Fully-resolved relationships of a car payload, ready to persist
#[derive(Debug, Clone)]
pub struct ResolvedRefs {
    pub marca: Option<Marca>,
    pub acessorios: Vec<Acessorio>,
}

impl ResolvedRefs {
    pub fn marca_id(&self) -> Option<i64> {
        self.marca.as_ref().and_then(|m| m.id)
    }

    pub fn acessorio_ids(&self) -> Vec<i64> {
        self.acessorios.iter().filter_map(|a| a.id).collect()
    }
}

/// Resolves id references against the catalog store
pub struct RefResolver<'a> {
    store: &'a CatalogStore,
}

impl<'a> RefResolver<'a> {
    /// Create a new resolver
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Resolve the brand and accessory references of a payload.
    ///
    /// A payload without a brand id clears the car's brand, also on update
    /// (full-replace semantics). Accessory entries that are null or carry
    /// id 0 are skipped without error; the resolved set replaces the car's
    /// previous set entirely, duplicates collapsing into one.
    pub fn resolve(&self, payload: &CarroPayload) -> Result<ResolvedRefs> {
        let marca = match payload.marca.as_ref().and_then(|r| r.id) {
            Some(id) => match self.store.get_marca(id)? {
                Some(marca) => Some(marca),
                None => {
                    tracing::debug!(id, "rejecting car payload: unknown brand");
                    return Err(Error::ReferenceNotFound { kind: "Marca", id });
                }
            },
            None => None,
        };

        let mut seen = BTreeSet::new();
        let mut acessorios = Vec::new();
        if let Some(refs) = &payload.acessorios {
            for reference in refs.iter().flatten() {
                let Some(id) = reference.id.filter(|id| *id != 0) else {
                    continue;
                };
                if !seen.insert(id) {
                    continue;
                }
                match self.store.get_acessorio(id)? {
                    Some(acessorio) => acessorios.push(acessorio),
                    None => {
                        tracing::debug!(id, "rejecting car payload: unknown accessory");
                        return Err(Error::ReferenceNotFound { kind: "Acessório", id });
                    }
                }
            }
        }

        Ok(ResolvedRefs { marca, acessorios })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityRef, FichaMarca};

    fn payload_with(marca: Option<i64>, acessorios: Vec<Option<i64>>) -> CarroPayload {
        CarroPayload {
            id: None,
            modelo: "Uno".to_string(),
            descricao: "-".to_string(),
            ano_fabricacao: 1995,
            avaliacao: 5.0,
            cilindradas: 1000,
            marca: marca.map(|id| EntityRef { id: Some(id) }),
            acessorios: Some(
                acessorios.into_iter().map(|id| id.map(|id| EntityRef { id: Some(id) })).collect(),
            ),
        }
    }

    fn store_with_marca() -> (CatalogStore, i64) {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let marca = store
            .insert_marca(&Marca {
                id: None,
                nome_da_marca: "Fiat".to_string(),
                nome_completo_empresa: None,
                data_de_fundacao: None,
                pais_de_origem: "Itália".to_string(),
                perfil: Some(FichaMarca {
                    id: None,
                    historia: "Fundada em Turim.".to_string(),
                    fundadores: None,
                    premios_conquistados: None,
                }),
            })
            .unwrap();
        let id = marca.id.unwrap();
        (store, id)
    }

    #[test]
    fn test_missing_brand_reference_clears() {
        let (store, _) = store_with_marca();
        let resolved = RefResolver::new(&store).resolve(&payload_with(None, vec![])).unwrap();
        assert!(resolved.marca.is_none());
        assert_eq!(resolved.marca_id(), None);
    }

    #[test]
    fn test_brand_resolves_with_profile() {
        let (store, marca_id) = store_with_marca();
        let resolved =
            RefResolver::new(&store).resolve(&payload_with(Some(marca_id), vec![])).unwrap();
        let marca = resolved.marca.unwrap();
        assert_eq!(marca.id, Some(marca_id));
        assert!(marca.perfil.is_some());
    }

    #[test]
    fn test_unknown_brand_rejected_naming_id() {
        let (store, _) = store_with_marca();
        let err = RefResolver::new(&store).resolve(&payload_with(Some(999), vec![])).unwrap_err();
        assert_eq!(err.to_string(), "Marca com id 999 não existe");
    }

    #[test]
    fn test_null_and_zero_accessory_entries_skipped() {
        let (store, _) = store_with_marca();
        let acessorio = store
            .insert_acessorio(&Acessorio {
                id: None,
                nome: "Teto solar".to_string(),
                descricao: None,
            })
            .unwrap();

        let payload = payload_with(None, vec![None, Some(0), acessorio.id]);
        let resolved = RefResolver::new(&store).resolve(&payload).unwrap();
        assert_eq!(resolved.acessorio_ids(), vec![acessorio.id.unwrap()]);
    }

    #[test]
    fn test_duplicate_accessory_ids_collapse() {
        let (store, _) = store_with_marca();
        let acessorio = store
            .insert_acessorio(&Acessorio {
                id: None,
                nome: "Teto solar".to_string(),
                descricao: None,
            })
            .unwrap();
        let id = acessorio.id.unwrap();

        let resolved =
            RefResolver::new(&store).resolve(&payload_with(None, vec![Some(id), Some(id)])).unwrap();
        assert_eq!(resolved.acessorios.len(), 1);
    }

    #[test]
    fn test_one_unknown_accessory_rejects_everything() {
        let (mut store, _) = store_with_marca();
        let valid = store
            .insert_acessorio(&Acessorio {
                id: None,
                nome: "Teto solar".to_string(),
                descricao: None,
            })
            .unwrap()
            .id
            .unwrap();

        let payload = payload_with(None, vec![Some(valid), Some(777)]);
        let err = RefResolver::new(&store).resolve(&payload).unwrap_err();
        assert_eq!(err.to_string(), "Acessório com id 777 não existe");

        // nothing was persisted for the valid half
        store.insert_carro(&payload_with(None, vec![]), None, &[]).unwrap();
        assert_eq!(store.count_carros_with_acessorio(valid).unwrap(), 0);
    }
}
