//! Optional decorative assets.
//!
//! The motif file is a JSON animation blob shown on the About view. It is
//! purely cosmetic: a missing or unparsable file is treated as absent,
//! never as an error.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the motif asset if it exists and parses; `None` otherwise.
pub fn load_motif<P: AsRef<Path>>(path: P) -> Option<Value> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "Motif asset not present, skipping");
        return None;
    }

    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Motif asset unparsable, skipping");
                None
            }
        },
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Motif asset unreadable, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_motif_is_none() {
        assert!(load_motif("no/such/motif.json").is_none());
    }

    #[test]
    fn test_valid_motif_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"v": "5.7.4", "fr": 30}}"#).unwrap();

        let motif = load_motif(file.path()).unwrap();
        assert_eq!(motif["fr"], 30);
    }

    #[test]
    fn test_garbage_motif_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        assert!(load_motif(file.path()).is_none());
    }
}
