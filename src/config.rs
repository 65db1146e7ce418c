use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Deployment configuration (`catalogo.toml`).
///
/// Every field is optional; CLI flags win over the file, the file wins
/// over the defaults below. `base_url` is the public address written into
/// search `nextPage` links.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogoConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub fn default_config_path() -> PathBuf {
    PathBuf::from("catalogo.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("catalogo.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<CatalogoConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: CatalogoConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &CatalogoConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogo.toml");

        let config = CatalogoConfig {
            database: Some("data/catalogo.db".to_string()),
            port: Some(9090),
            base_url: Some("https://catalogo.example.com".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.port, Some(9090));
        assert_eq!(loaded.base_url.as_deref(), Some("https://catalogo.example.com"));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogo.toml");

        write_config(&path, &CatalogoConfig::default(), false).unwrap();
        assert!(write_config(&path, &CatalogoConfig::default(), false).is_err());
        assert!(write_config(&path, &CatalogoConfig::default(), true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_ensure_db_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested/dir/catalogo.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().exists());
    }
}
