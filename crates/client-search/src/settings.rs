//! Search configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::loader::DEFAULT_DATA_FILE;

/// Configuration values for the client search tool.
///
/// Values come from `CLIENT_SEARCH_*` environment variables and any
/// discovered configuration file. A `--file-path` flag on the command line
/// takes precedence over everything here.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLIENT_SEARCH")]
pub struct SearchSettings {
    /// Optional override for the client data file.
    pub data_file: Option<PathBuf>,
}

impl SearchSettings {
    /// Loads settings, falling back to defaults when loading fails.
    #[must_use]
    pub fn load_or_default() -> Self {
        match Self::load_from_iter([OsString::from("client-search")]) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "search settings unavailable; using defaults");
                Self::default()
            }
        }
    }

    /// Return the configured data file, falling back to the default.
    ///
    /// Paths that are not valid UTF-8 are ignored.
    #[must_use]
    pub fn data_file(&self) -> Utf8PathBuf {
        self.data_file
            .clone()
            .and_then(|path| {
                Utf8PathBuf::from_path_buf(path)
                    .map_err(|rejected| {
                        warn!(path = %rejected.display(), "data file path is not UTF-8; ignoring");
                    })
                    .ok()
            })
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_FILE))
    }
}
