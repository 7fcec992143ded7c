//! Database path resolution.
//!
//! The analytical database is opened read-only and never created, so its path
//! is taken as given. The memory database is written to; relative paths land
//! under `~/.quarry` and the parent directory is created on demand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve the analytical database path: the CLI flag wins over settings.
#[must_use]
pub fn resolve_data_db_path(cli_db_path: Option<PathBuf>, configured: &str) -> PathBuf {
    cli_db_path.unwrap_or_else(|| PathBuf::from(configured))
}

/// Resolve the memory database path using `$HOME`.
pub fn resolve_memory_db_path(configured: &str) -> Result<PathBuf> {
    resolve_memory_db_path_for_home(configured, &quarry_settings::quarry_home())
}

/// Resolve the memory database path against a specific Quarry home.
///
/// Split out for deterministic testing without mutating process env.
pub fn resolve_memory_db_path_for_home(configured: &str, quarry_home: &Path) -> Result<PathBuf> {
    let configured = Path::new(configured);
    let path = if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        quarry_home.join(configured)
    };

    if path.is_dir() {
        anyhow::bail!("Invalid memory db path '{}': is a directory", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create memory DB directory: {}", parent.display())
        })?;
    }
    Ok(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins() {
        let resolved = resolve_data_db_path(Some(PathBuf::from("/data/bi.sqlite")), "enterprise_bi_db.sqlite");
        assert_eq!(resolved, PathBuf::from("/data/bi.sqlite"));
        assert_eq!(
            resolve_data_db_path(None, "enterprise_bi_db.sqlite"),
            PathBuf::from("enterprise_bi_db.sqlite")
        );
    }

    #[test]
    fn relative_memory_path_lands_under_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join(".quarry");
        let resolved = resolve_memory_db_path_for_home("state/memory.db", &home).unwrap();
        assert_eq!(resolved, home.join("state").join("memory.db"));
        assert!(home.join("state").is_dir());
        assert!(!resolved.exists());
    }

    #[test]
    fn absolute_memory_path_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("elsewhere").join("memory.db");
        let resolved =
            resolve_memory_db_path_for_home(target.to_str().unwrap(), Path::new("/unused")).unwrap();
        assert_eq!(resolved, target);
        assert!(tmp.path().join("elsewhere").is_dir());
    }

    #[test]
    fn directory_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_memory_db_path_for_home(tmp.path().to_str().unwrap(), Path::new("/unused"))
            .unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}
