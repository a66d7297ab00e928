//! Files the CLI reads and writes between invocations

use feeder_core::data::FormStore;
use feeder_core::schema::{load_schema, FeederSchema};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub type CliResult<T> = Result<T, Box<dyn Error>>;

pub fn schema(path: &Path) -> CliResult<FeederSchema> {
    Ok(load_schema(path)?)
}

/// Form store saved as JSON; a missing file is an empty store
pub fn load_store(path: &Path) -> CliResult<FormStore> {
    if !path.exists() {
        log::debug!("No data file at {}, starting empty", path.display());
        return Ok(FormStore::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn save_store(path: &Path, store: &FormStore) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(store)?)?;
    log::info!("Saved form data to {}", path.display());
    Ok(())
}

/// Pasted text from a file, or stdin when no file is given
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
