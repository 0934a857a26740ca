//! INI file configuration adapter.
//!
//! Values left blank in the file (`key =`) read as unset, so a checked-in
//! template can list every key and let the environment fill the secrets.

use crate::domain::error::TruefundedError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Label used in parse errors for INI text that did not come from disk.
const INLINE_SOURCE: &str = "<inline>";

pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TruefundedError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| TruefundedError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        tracing::debug!(file = %path.display(), sections = ini.sections().len(), "loaded config file");
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, TruefundedError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| TruefundedError::ConfigParse {
                file: INLINE_SOURCE.to_string(),
                reason,
            })?;
        Ok(Self { ini })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
