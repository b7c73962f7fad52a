//! CLI Configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use leadops_common::LeadOpsConfig;

/// `~/.leadops/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".leadops").join("config.toml"))
}

/// Effective configuration.
///
/// An explicit path that does not exist falls back to the defaults with a
/// warning; so does a missing default file (silently). A file that exists
/// but does not parse is an error.
pub fn load(explicit: Option<&Path>) -> Result<LeadOpsConfig> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(LeadOpsConfig::default());
        }
        Some(path) => path.to_path_buf(),
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(LeadOpsConfig::default()),
        },
    };

    LeadOpsConfig::load(&path).with_context(|| format!("invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_explicit_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, LeadOpsConfig::default());
    }

    #[test]
    fn test_explicit_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[throttling]\nmin_delay_minutes = 12").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.throttling.min_delay_minutes, 12);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dedup]\ndelete_batch_size = 0").unwrap();

        let err = load(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config file"));
    }
}
