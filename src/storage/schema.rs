//! Database schema definitions

/// SQL to create the brands table
pub const CREATE_MARCAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS marcas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome_da_marca TEXT NOT NULL,
    nome_completo_empresa TEXT,
    data_de_fundacao TEXT,
    pais_de_origem TEXT NOT NULL,
    perfil_id INTEGER
)
"#;

/// SQL to create the brand profiles table
pub const CREATE_FICHAS_MARCA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS fichas_marca (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    historia TEXT NOT NULL,
    fundadores TEXT,
    premios_conquistados TEXT
)
"#;

/// SQL to create the cars table
pub const CREATE_CARROS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS carros (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    modelo TEXT NOT NULL,
    descricao TEXT NOT NULL,
    ano_fabricacao INTEGER NOT NULL,
    avaliacao REAL NOT NULL,
    cilindradas INTEGER NOT NULL,
    marca_id INTEGER
)
"#;

/// SQL to create the accessories table
pub const CREATE_ACESSORIOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS acessorios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    descricao TEXT
)
"#;

/// SQL to create the car/accessory join table
/// Composite key keeps the relation a set; neither side owns the other
pub const CREATE_CARRO_ACESSORIO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS carro_acessorio (
    carro_id INTEGER NOT NULL,
    acessorio_id INTEGER NOT NULL,
    PRIMARY KEY (carro_id, acessorio_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_marcas_nome ON marcas(nome_da_marca)",
    "CREATE INDEX IF NOT EXISTS idx_carros_marca ON carros(marca_id)",
    "CREATE INDEX IF NOT EXISTS idx_carro_acessorio_acessorio ON carro_acessorio(acessorio_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_MARCAS_TABLE,
        CREATE_FICHAS_MARCA_TABLE,
        CREATE_CARROS_TABLE,
        CREATE_ACESSORIOS_TABLE,
        CREATE_CARRO_ACESSORIO_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
