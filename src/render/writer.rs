// Output sink: a file when a target path is given, stdout otherwise

use crate::extractors::base::ExtractError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn write_output(target: Option<&Path>, text: &str) -> Result<(), ExtractError> {
    match target {
        Some(path) => {
            let write_error = |source| ExtractError::Write {
                target: path.display().to_string(),
                source,
            };
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
            fs::write(path, text).map_err(write_error)?;
            tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| ExtractError::Write {
                    target: "<stdout>".to_string(),
                    source,
                })?;
        }
    }
    Ok(())
}
