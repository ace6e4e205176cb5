use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::{StorageBackend, StorageKey};
use crate::errors::{LedgerError, Result};

const TMP_SUFFIX: &str = "tmp";

/// File-per-key backend: each storage key lives in `<key>.json` under the
/// data directory. Writes go through a temp file and rename so a crash never
/// leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn commit(&mut self, entries: &[(StorageKey, String)]) -> Result<()> {
        for (key, value) in entries {
            let path = self.key_path(*key);
            let tmp = tmp_path(&path);
            write_atomic(&tmp, value)?;
            fs::rename(&tmp, &path)?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|base| base.join("dompet"))
        .ok_or_else(|| LedgerError::Storage("no platform data directory available".into()))
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
