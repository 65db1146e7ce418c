//! SQLite storage implementation

use std::path::Path;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter, types::Value};
use crate::{Error, Result};
use crate::model::{Acessorio, Carro, CarroPayload, FichaMarca, Marca};
use super::schema;

/// Dynamic WHERE fragment plus its bound values.
///
/// Clauses use `?1`-style placeholders; the paging primitive appends its
/// own unnumbered LIMIT/OFFSET parameters after them.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub clause: Option<String>,
    pub args: Vec<Value>,
}

impl Filter {
    /// Match-everything filter
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(clause: impl Into<String>, args: Vec<Value>) -> Self {
        Self { clause: Some(clause.into()), args }
    }
}

/// SQLite-backed storage for the vehicle catalog
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Generic Filter/Sort/Page Primitives ==========

    /// Count rows of `table` matching `filter`
    pub fn filtered_count(&self, table: &str, filter: &Filter) -> Result<i64> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", table);
        if let Some(clause) = &filter.clause {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
        let count = self
            .conn
            .query_row(&sql, params_from_iter(filter.args.iter()), |row| row.get(0))?;
        Ok(count)
    }

    /// One sorted page of matching row ids
    ///
    /// `order_column` must come from a per-kind allow-list; it is spliced
    /// into the statement text.
    pub fn filtered_page_ids(
        &self,
        table: &str,
        filter: &Filter,
        order_column: &str,
        descending: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<i64>> {
        let mut sql = format!("SELECT id FROM {}", table);
        if let Some(clause) = &filter.clause {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_column);
        sql.push_str(if descending { " DESC" } else { " ASC" });
        sql.push_str(" LIMIT ? OFFSET ?");

        let mut args = filter.args.clone();
        args.push(Value::Integer(limit));
        args.push(Value::Integer(offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(args), |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(ids)
    }

    // ========== Marca Operations ==========

    /// Insert a brand (and its nested profile) in one transaction
    pub fn insert_marca(&mut self, marca: &Marca) -> Result<Marca> {
        let tx = self.conn.transaction()?;
        let perfil_id = match &marca.perfil {
            Some(ficha) => {
                tx.execute(
                    "INSERT INTO fichas_marca (historia, fundadores, premios_conquistados) VALUES (?1, ?2, ?3)",
                    params![ficha.historia, ficha.fundadores, ficha.premios_conquistados],
                )?;
                Some(tx.last_insert_rowid())
            }
            None => None,
        };
        tx.execute(
            r#"
            INSERT INTO marcas (nome_da_marca, nome_completo_empresa, data_de_fundacao, pais_de_origem, perfil_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                marca.nome_da_marca,
                marca.nome_completo_empresa,
                marca.data_de_fundacao.map(|d| d.to_string()),
                marca.pais_de_origem,
                perfil_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        self.get_marca(id)?.ok_or(Error::NotFound)
    }

    /// Get a brand by id, profile hydrated
    pub fn get_marca(&self, id: i64) -> Result<Option<Marca>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, nome_da_marca, nome_completo_empresa, data_de_fundacao, pais_de_origem, perfil_id FROM marcas WHERE id = ?1",
                [id],
                |row| self.row_to_marca(row),
            )
            .optional()?;
        match row {
            Some(row) => Ok(Some(self.hydrate_marca(row)?)),
            None => Ok(None),
        }
    }

    /// List all brands ordered by id
    pub fn list_marcas(&self) -> Result<Vec<Marca>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nome_da_marca, nome_completo_empresa, data_de_fundacao, pais_de_origem, perfil_id FROM marcas ORDER BY id",
        )?;
        let rows: Vec<MarcaRow> = stmt
            .query_map([], |row| self.row_to_marca(row))?
            .filter_map(|r| r.ok())
            .collect();
        rows.into_iter().map(|row| self.hydrate_marca(row)).collect()
    }

    /// Full update of a brand's scalar fields plus owned-profile handling:
    /// a nested profile is written in place (or created), an absent one
    /// orphan-deletes the existing profile row.
    pub fn update_marca(&mut self, id: i64, marca: &Marca) -> Result<()> {
        let tx = self.conn.transaction()?;
        let current_perfil_id: Option<i64> =
            tx.query_row("SELECT perfil_id FROM marcas WHERE id = ?1", [id], |row| row.get(0))?;

        let perfil_id = match (&marca.perfil, current_perfil_id) {
            (Some(ficha), Some(pid)) => {
                tx.execute(
                    "UPDATE fichas_marca SET historia = ?1, fundadores = ?2, premios_conquistados = ?3 WHERE id = ?4",
                    params![ficha.historia, ficha.fundadores, ficha.premios_conquistados, pid],
                )?;
                Some(pid)
            }
            (Some(ficha), None) => {
                tx.execute(
                    "INSERT INTO fichas_marca (historia, fundadores, premios_conquistados) VALUES (?1, ?2, ?3)",
                    params![ficha.historia, ficha.fundadores, ficha.premios_conquistados],
                )?;
                Some(tx.last_insert_rowid())
            }
            (None, Some(pid)) => {
                tx.execute("DELETE FROM fichas_marca WHERE id = ?1", [pid])?;
                None
            }
            (None, None) => None,
        };

        tx.execute(
            r#"
            UPDATE marcas
            SET nome_da_marca = ?1, nome_completo_empresa = ?2, data_de_fundacao = ?3, pais_de_origem = ?4, perfil_id = ?5
            WHERE id = ?6
            "#,
            params![
                marca.nome_da_marca,
                marca.nome_completo_empresa,
                marca.data_de_fundacao.map(|d| d.to_string()),
                marca.pais_de_origem,
                perfil_id,
                id,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Cascade delete: owned cars (and their join rows), the owned profile,
    /// then the brand itself. Returns false when the brand does not exist.
    pub fn delete_marca(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let perfil_id: Option<Option<i64>> = tx
            .query_row("SELECT perfil_id FROM marcas WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        let Some(perfil_id) = perfil_id else {
            return Ok(false);
        };

        tx.execute(
            "DELETE FROM carro_acessorio WHERE carro_id IN (SELECT id FROM carros WHERE marca_id = ?1)",
            [id],
        )?;
        tx.execute("DELETE FROM carros WHERE marca_id = ?1", [id])?;
        if let Some(pid) = perfil_id {
            tx.execute("DELETE FROM fichas_marca WHERE id = ?1", [pid])?;
        }
        tx.execute("DELETE FROM marcas WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(true)
    }

    /// Case-insensitive uniqueness probe for the brand name; `exclude_id`
    /// skips the row being updated.
    pub fn marca_name_taken(&self, nome: &str, exclude_id: Option<i64>) -> Result<bool> {
        let count: i64 = match exclude_id {
            Some(id) => self.conn.query_row(
                "SELECT COUNT(*) FROM marcas WHERE LOWER(nome_da_marca) = LOWER(?1) AND id != ?2",
                params![nome, id],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM marcas WHERE LOWER(nome_da_marca) = LOWER(?1)",
                params![nome],
                |row| row.get(0),
            )?,
        };
        Ok(count > 0)
    }

    /// Case-insensitive substring search on the brand name
    pub fn find_marcas_by_name(&self, nome: &str) -> Result<Vec<Marca>> {
        let pattern = format!("%{}%", nome.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT id, nome_da_marca, nome_completo_empresa, data_de_fundacao, pais_de_origem, perfil_id FROM marcas WHERE LOWER(nome_da_marca) LIKE ?1 ORDER BY id",
        )?;
        let rows: Vec<MarcaRow> = stmt
            .query_map([pattern], |row| self.row_to_marca(row))?
            .filter_map(|r| r.ok())
            .collect();
        rows.into_iter().map(|row| self.hydrate_marca(row)).collect()
    }

    /// Helper to convert a row into the brand's base columns
    fn row_to_marca(&self, row: &rusqlite::Row) -> rusqlite::Result<MarcaRow> {
        let data: Option<String> = row.get(3)?;
        let data_de_fundacao = data
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
                })
            })
            .transpose()?;
        Ok(MarcaRow {
            id: row.get(0)?,
            nome_da_marca: row.get(1)?,
            nome_completo_empresa: row.get(2)?,
            data_de_fundacao,
            pais_de_origem: row.get(4)?,
            perfil_id: row.get(5)?,
        })
    }

    fn hydrate_marca(&self, row: MarcaRow) -> Result<Marca> {
        let perfil = match row.perfil_id {
            Some(pid) => self.get_ficha(pid)?,
            None => None,
        };
        Ok(Marca {
            id: Some(row.id),
            nome_da_marca: row.nome_da_marca,
            nome_completo_empresa: row.nome_completo_empresa,
            data_de_fundacao: row.data_de_fundacao,
            pais_de_origem: row.pais_de_origem,
            perfil,
        })
    }

    // ========== FichaMarca Operations ==========

    /// Insert a standalone brand profile
    pub fn insert_ficha(&self, ficha: &FichaMarca) -> Result<FichaMarca> {
        self.conn.execute(
            "INSERT INTO fichas_marca (historia, fundadores, premios_conquistados) VALUES (?1, ?2, ?3)",
            params![ficha.historia, ficha.fundadores, ficha.premios_conquistados],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_ficha(id)?.ok_or(Error::NotFound)
    }

    /// Get a brand profile by id
    pub fn get_ficha(&self, id: i64) -> Result<Option<FichaMarca>> {
        self.conn
            .query_row(
                "SELECT id, historia, fundadores, premios_conquistados FROM fichas_marca WHERE id = ?1",
                [id],
                |row| self.row_to_ficha(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all brand profiles ordered by id
    pub fn list_fichas(&self) -> Result<Vec<FichaMarca>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, historia, fundadores, premios_conquistados FROM fichas_marca ORDER BY id",
        )?;
        let fichas = stmt
            .query_map([], |row| self.row_to_ficha(row))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(fichas)
    }

    /// Overwrite the three text fields of a profile
    pub fn update_ficha(&self, id: i64, ficha: &FichaMarca) -> Result<()> {
        self.conn.execute(
            "UPDATE fichas_marca SET historia = ?1, fundadores = ?2, premios_conquistados = ?3 WHERE id = ?4",
            params![ficha.historia, ficha.fundadores, ficha.premios_conquistados, id],
        )?;
        Ok(())
    }

    /// Independent profile delete: the owning brand's reference is cleared,
    /// the brand itself survives.
    pub fn delete_ficha(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        tx.execute("UPDATE marcas SET perfil_id = NULL WHERE perfil_id = ?1", [id])?;
        let deleted = tx.execute("DELETE FROM fichas_marca WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    /// Helper to convert a row to a FichaMarca
    fn row_to_ficha(&self, row: &rusqlite::Row) -> rusqlite::Result<FichaMarca> {
        Ok(FichaMarca {
            id: Some(row.get(0)?),
            historia: row.get(1)?,
            fundadores: row.get(2)?,
            premios_conquistados: row.get(3)?,
        })
    }

    // ========== Carro Operations ==========

    /// Insert a car with its resolved brand id and accessory ids; the row
    /// and its join rows land in one transaction.
    pub fn insert_carro(
        &mut self,
        payload: &CarroPayload,
        marca_id: Option<i64>,
        acessorio_ids: &[i64],
    ) -> Result<Carro> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO carros (modelo, descricao, ano_fabricacao, avaliacao, cilindradas, marca_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                payload.modelo,
                payload.descricao,
                payload.ano_fabricacao,
                payload.avaliacao,
                payload.cilindradas,
                marca_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        for acessorio_id in acessorio_ids {
            tx.execute(
                "INSERT OR IGNORE INTO carro_acessorio (carro_id, acessorio_id) VALUES (?1, ?2)",
                params![id, acessorio_id],
            )?;
        }
        tx.commit()?;
        self.get_carro(id)?.ok_or(Error::NotFound)
    }

    /// Get a car by id, brand and accessory set hydrated
    pub fn get_carro(&self, id: i64) -> Result<Option<Carro>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, modelo, descricao, ano_fabricacao, avaliacao, cilindradas, marca_id FROM carros WHERE id = ?1",
                [id],
                |row| self.row_to_carro(row),
            )
            .optional()?;
        match row {
            Some(row) => Ok(Some(self.hydrate_carro(row)?)),
            None => Ok(None),
        }
    }

    /// List all cars ordered by id
    pub fn list_carros(&self) -> Result<Vec<Carro>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, modelo, descricao, ano_fabricacao, avaliacao, cilindradas, marca_id FROM carros ORDER BY id",
        )?;
        let rows: Vec<CarroRow> = stmt
            .query_map([], |row| self.row_to_carro(row))?
            .filter_map(|r| r.ok())
            .collect();
        rows.into_iter().map(|row| self.hydrate_carro(row)).collect()
    }

    /// Full update: scalar fields, brand reference, and complete
    /// replacement of the accessory join rows.
    pub fn update_carro(
        &mut self,
        id: i64,
        payload: &CarroPayload,
        marca_id: Option<i64>,
        acessorio_ids: &[i64],
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            UPDATE carros
            SET modelo = ?1, descricao = ?2, ano_fabricacao = ?3, avaliacao = ?4, cilindradas = ?5, marca_id = ?6
            WHERE id = ?7
            "#,
            params![
                payload.modelo,
                payload.descricao,
                payload.ano_fabricacao,
                payload.avaliacao,
                payload.cilindradas,
                marca_id,
                id,
            ],
        )?;
        tx.execute("DELETE FROM carro_acessorio WHERE carro_id = ?1", [id])?;
        for acessorio_id in acessorio_ids {
            tx.execute(
                "INSERT OR IGNORE INTO carro_acessorio (carro_id, acessorio_id) VALUES (?1, ?2)",
                params![id, acessorio_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a car, clearing its join rows first so no orphans remain
    pub fn delete_carro(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM carro_acessorio WHERE carro_id = ?1", [id])?;
        let deleted = tx.execute("DELETE FROM carros WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    /// Accessory set of a car, ordered by accessory id
    pub fn carro_acessorios(&self, carro_id: i64) -> Result<Vec<Acessorio>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT a.id, a.nome, a.descricao
            FROM acessorios a
            JOIN carro_acessorio ca ON ca.acessorio_id = a.id
            WHERE ca.carro_id = ?1
            ORDER BY a.id
            "#,
        )?;
        let acessorios = stmt
            .query_map([carro_id], |row| self.row_to_acessorio(row))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(acessorios)
    }

    /// Number of cars still referencing an accessory
    pub fn count_carros_with_acessorio(&self, acessorio_id: i64) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM carro_acessorio WHERE acessorio_id = ?1",
            [acessorio_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Helper to convert a row into the car's base columns
    fn row_to_carro(&self, row: &rusqlite::Row) -> rusqlite::Result<CarroRow> {
        Ok(CarroRow {
            id: row.get(0)?,
            modelo: row.get(1)?,
            descricao: row.get(2)?,
            ano_fabricacao: row.get(3)?,
            avaliacao: row.get(4)?,
            cilindradas: row.get(5)?,
            marca_id: row.get(6)?,
        })
    }

    fn hydrate_carro(&self, row: CarroRow) -> Result<Carro> {
        let marca = match row.marca_id {
            Some(mid) => self.get_marca(mid)?,
            None => None,
        };
        let acessorios = self.carro_acessorios(row.id)?;
        Ok(Carro {
            id: Some(row.id),
            modelo: row.modelo,
            descricao: row.descricao,
            ano_fabricacao: row.ano_fabricacao,
            avaliacao: row.avaliacao,
            cilindradas: row.cilindradas,
            marca,
            acessorios,
        })
    }

    // ========== Acessorio Operations ==========

    /// Insert an accessory
    pub fn insert_acessorio(&self, acessorio: &Acessorio) -> Result<Acessorio> {
        self.conn.execute(
            "INSERT INTO acessorios (nome, descricao) VALUES (?1, ?2)",
            params![acessorio.nome, acessorio.descricao],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_acessorio(id)?.ok_or(Error::NotFound)
    }

    /// Get an accessory by id
    pub fn get_acessorio(&self, id: i64) -> Result<Option<Acessorio>> {
        self.conn
            .query_row(
                "SELECT id, nome, descricao FROM acessorios WHERE id = ?1",
                [id],
                |row| self.row_to_acessorio(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all accessories ordered by id
    pub fn list_acessorios(&self) -> Result<Vec<Acessorio>> {
        let mut stmt =
            self.conn.prepare("SELECT id, nome, descricao FROM acessorios ORDER BY id")?;
        let acessorios = stmt
            .query_map([], |row| self.row_to_acessorio(row))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(acessorios)
    }

    /// Overwrite an accessory's fields
    pub fn update_acessorio(&self, id: i64, acessorio: &Acessorio) -> Result<()> {
        self.conn.execute(
            "UPDATE acessorios SET nome = ?1, descricao = ?2 WHERE id = ?3",
            params![acessorio.nome, acessorio.descricao, id],
        )?;
        Ok(())
    }

    /// Delete an accessory row; the caller is responsible for the
    /// dependency check (`guard::DeleteGuard`) before calling this.
    pub fn delete_acessorio(&self, id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM acessorios WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Helper to convert a row to an Acessorio
    fn row_to_acessorio(&self, row: &rusqlite::Row) -> rusqlite::Result<Acessorio> {
        Ok(Acessorio {
            id: Some(row.get(0)?),
            nome: row.get(1)?,
            descricao: row.get(2)?,
        })
    }

    // ========== Statistics ==========

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            marcas: self.count_table("marcas")?,
            fichas: self.count_table("fichas_marca")?,
            carros: self.count_table("carros")?,
            acessorios: self.count_table("acessorios")?,
            vinculos: self.count_table("carro_acessorio")?,
        })
    }

    fn count_table(&self, table: &str) -> Result<i64> {
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Base columns of a brand row before profile hydration
struct MarcaRow {
    id: i64,
    nome_da_marca: String,
    nome_completo_empresa: Option<String>,
    data_de_fundacao: Option<NaiveDate>,
    pais_de_origem: String,
    perfil_id: Option<i64>,
}

/// Base columns of a car row before relationship hydration
struct CarroRow {
    id: i64,
    modelo: String,
    descricao: String,
    ano_fabricacao: i32,
    avaliacao: f64,
    cilindradas: i32,
    marca_id: Option<i64>,
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub marcas: i64,
    pub fichas: i64,
    pub carros: i64,
    pub acessorios: i64,
    pub vinculos: i64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Marcas: {}", self.marcas)?;
        writeln!(f, "  Fichas de marca: {}", self.fichas)?;
        writeln!(f, "  Carros: {}", self.carros)?;
        writeln!(f, "  Acessórios: {}", self.acessorios)?;
        writeln!(f, "  Vínculos carro/acessório: {}", self.vinculos)
    }
}
