use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TsaError};

/// Resolves which hosts this run administers.
pub struct ServerList;

impl ServerList {
    /// Hostnames from the command line, then from the server file if one
    /// was given. With neither, falls back to the default per-user file
    /// when it exists.
    pub fn resolve(cli_servers: &[String], file: Option<&Path>) -> Result<Vec<String>> {
        let mut hosts: Vec<String> = cli_servers.to_vec();

        if let Some(path) = file {
            hosts.extend(Self::read_file(path)?);
        } else if hosts.is_empty() {
            if let Some(default) = Self::default_file() {
                if default.exists() {
                    hosts.extend(Self::read_file(&default)?);
                }
            }
        }

        Ok(hosts)
    }

    /// One hostname per line; blank lines and `#` comments are skipped.
    pub fn read_file(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| {
            TsaError::ServerFileError(format!("{}: {}", path.display(), e))
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// `$TSA_HOME/servers`, else `~/.tsadmin/servers`. `None` when no home
    /// directory can be located.
    pub fn default_file() -> Option<PathBuf> {
        if let Ok(tsa_home) = std::env::var("TSA_HOME") {
            return Some(PathBuf::from(tsa_home).join("servers"));
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".tsadmin").join("servers"))
    }
}
