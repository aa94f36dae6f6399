use std::fs;
use std::path::{Path, PathBuf};

use immo_calc_core::persistence::{
    CalculationStore, InMemoryStore, SaveRequest, SavedCalculation, SavedCalculationSummary,
};
use immo_calc_core::{CalcResult, ImmoCalcError};

/// Saved calculations kept in a single JSON file (an array of records).
///
/// The whole file is read on open and rewritten after every change.
pub struct JsonFileStore {
    path: PathBuf,
    records: InMemoryStore,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> CalcResult<Self> {
        let path = path.into();
        let mut records = InMemoryStore::new();

        if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                ImmoCalcError::Storage(format!("failed to read '{}': {}", path.display(), e))
            })?;
            if !contents.trim().is_empty() {
                let saved: Vec<SavedCalculation> = serde_json::from_str(&contents)?;
                for record in saved {
                    records.insert(record)?;
                }
            }
        }

        tracing::debug!(path = %path.display(), records = records.len(), "store opened");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> CalcResult<()> {
        let mut saved: Vec<&SavedCalculation> = self.records.records().collect();
        saved.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let json = serde_json::to_string_pretty(&saved)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ImmoCalcError::Storage(format!(
                        "failed to create '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Write next to the target, then swap, so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            ImmoCalcError::Storage(format!("failed to write '{}': {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            ImmoCalcError::Storage(format!("failed to replace '{}': {}", self.path.display(), e))
        })
    }
}

impl CalculationStore for JsonFileStore {
    fn save(&mut self, request: SaveRequest) -> CalcResult<SavedCalculation> {
        let record = self.records.save(request)?;
        self.flush()?;
        Ok(record)
    }

    fn get(&self, id: &str) -> CalcResult<Option<SavedCalculation>> {
        self.records.get(id)
    }

    fn get_by_share_token(&self, token: &str) -> CalcResult<Option<SavedCalculation>> {
        self.records.get_by_share_token(token)
    }

    fn list(&self) -> CalcResult<Vec<SavedCalculationSummary>> {
        self.records.list()
    }

    fn delete(&mut self, id: &str) -> CalcResult<bool> {
        let removed = self.records.delete(id)?;
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immo_calc_core::calculation::CalculationInput;
    use immo_calc_core::hidden_costs::HiddenCostInput;
    use rust_decimal_macros::dec;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("immo-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("saved.json")
    }

    fn request() -> SaveRequest {
        SaveRequest {
            name: Some("Altbau Leipzig".into()),
            calculation: CalculationInput::HiddenCosts(HiddenCostInput {
                property_price: dec!(250000),
                state_code: "SN".into(),
                ..HiddenCostInput::default()
            }),
            share: true,
        }
    }

    #[test]
    fn test_records_survive_reopen() {
        let path = scratch_path("reopen");
        let saved = {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.save(request()).unwrap()
        };

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(&saved.id).unwrap(), Some(saved.clone()));
        let token = saved.share_token.clone().unwrap();
        assert_eq!(store.get_by_share_token(&token).unwrap().unwrap().id, saved.id);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_persists() {
        let path = scratch_path("delete");
        let mut store = JsonFileStore::open(&path).unwrap();
        let saved = store.save(request()).unwrap();
        assert!(store.delete(&saved.id).unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.list().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let path = scratch_path("missing");
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(ImmoCalcError::SerializationError(_))
        ));
    }
}
