use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::settings::recent_path;

pub const MAX_RECENT: usize = 10;

/// Read the stored list as-is. A missing or corrupt sidecar is an empty
/// list, never an error.
pub fn load_from(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Stored entries whose files still exist. Stale entries are skipped here
/// but stay in storage.
pub fn usable_from(path: &Path) -> Vec<PathBuf> {
    load_from(path)
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect()
}

/// Record a successful load: most recent first, no duplicates, capped.
pub fn push_to(sidecar: &Path, file: &Path) -> Result<()> {
    let entry = std::fs::canonicalize(file)
        .unwrap_or_else(|_| file.to_path_buf())
        .to_string_lossy()
        .to_string();
    let mut paths = load_from(sidecar);
    paths.retain(|p| p != &entry);
    paths.insert(0, entry);
    paths.truncate(MAX_RECENT);

    if let Some(parent) = sidecar.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&paths).unwrap_or_else(|_| "[]".to_string());
    std::fs::write(sidecar, format!("{json}\n"))?;
    Ok(())
}

pub fn load() -> Vec<String> {
    load_from(&recent_path())
}

pub fn usable() -> Vec<PathBuf> {
    usable_from(&recent_path())
}

pub fn push(file: &Path) -> Result<()> {
    push_to(&recent_path(), file)
}

/// Most recently loaded file that still exists.
pub fn latest() -> Option<PathBuf> {
    usable().into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_mru_first_and_deduped() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("recent.json");
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        std::fs::write(&a, "x").unwrap();
        std::fs::write(&b, "x").unwrap();

        push_to(&sidecar, &a).unwrap();
        push_to(&sidecar, &b).unwrap();
        push_to(&sidecar, &a).unwrap();

        let stored = load_from(&sidecar);
        assert_eq!(stored.len(), 2);
        assert!(stored[0].ends_with("a.csv"));
        assert!(stored[1].ends_with("b.csv"));
    }

    #[test]
    fn test_list_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("recent.json");
        for i in 0..15 {
            let f = dir.path().join(format!("f{i}.csv"));
            std::fs::write(&f, "x").unwrap();
            push_to(&sidecar, &f).unwrap();
        }
        let stored = load_from(&sidecar);
        assert_eq!(stored.len(), MAX_RECENT);
        assert!(stored[0].ends_with("f14.csv"));
    }

    #[test]
    fn test_corrupt_sidecar_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("recent.json");
        std::fs::write(&sidecar, "{ not json at all").unwrap();
        assert!(load_from(&sidecar).is_empty());
    }

    #[test]
    fn test_stale_paths_skipped_but_kept_in_storage() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("recent.json");
        let gone = dir.path().join("gone.csv");
        let kept = dir.path().join("kept.csv");
        std::fs::write(&gone, "x").unwrap();
        std::fs::write(&kept, "x").unwrap();
        push_to(&sidecar, &kept).unwrap();
        push_to(&sidecar, &gone).unwrap();
        std::fs::remove_file(&gone).unwrap();

        let usable = usable_from(&sidecar);
        assert_eq!(usable.len(), 1);
        assert!(usable[0].ends_with("kept.csv"));
        // Storage untouched
        assert_eq!(load_from(&sidecar).len(), 2);
    }
}
