//! Flat-file price store: one `<id> | <price_text>` record per line

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::shared::errors::StoreError;
use crate::shared::types::{Listing, PriceRecords};

const DELIMITER: char = '|';

pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full table. A missing file is an empty table.
    pub fn load(&self) -> Result<PriceRecords, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_records(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(PriceRecords::new()),
            Err(source) => Err(StoreError::Read {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }

    /// Overlay `sent` on the current table and rewrite it in full.
    /// Later duplicates of an id win.
    pub fn save(&self, sent: &[Listing]) -> Result<PriceRecords, StoreError> {
        let mut records = self.load()?;
        for listing in sent {
            records.insert(
                listing.id.trim().to_string(),
                listing.price_text.trim().to_string(),
            );
        }

        self.write(&render_records(&records))?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(records)
    }

    // Write a sibling temp file then rename over the store.
    fn write(&self, content: &str) -> Result<(), StoreError> {
        let err = |source: std::io::Error| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(err)?;
        fs::rename(&tmp, &self.path).map_err(err)
    }
}

/// Lines without the delimiter are skipped.
pub fn parse_records(content: &str) -> PriceRecords {
    content
        .lines()
        .filter_map(|line| line.trim().split_once(DELIMITER))
        .map(|(id, price)| (id.trim().to_string(), price.trim().to_string()))
        .collect()
}

pub fn render_records(records: &PriceRecords) -> String {
    records
        .iter()
        .map(|(id, price)| format!("{} {} {}\n", id, DELIMITER, price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn listing(id: &str, price: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: String::new(),
            price_text: price.to_string(),
            image_url: String::new(),
            link: String::new(),
        }
    }

    fn store_in(dir: &TempDir) -> PriceStore {
        PriceStore::new(dir.path().join("send_products.txt"))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let records = parse_records("B01 | 999 TL\nnot a record\n\nB02|1.234,56 TL\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records["B01"], "999 TL");
        assert_eq!(records["B02"], "1.234,56 TL");
    }

    #[test]
    fn test_split_on_first_delimiter() {
        let records = parse_records("B01 | 999 | TL\n");
        assert_eq!(records["B01"], "999 | TL");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&[listing("B01", "999 TL"), listing("B02", "1.234,56 TL")])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["B01"], "999 TL");
        assert_eq!(loaded["B02"], "1.234,56 TL");
    }

    #[test]
    fn test_save_overlays_existing_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "B01 | 999 TL\nB02 | 500 TL\n").unwrap();

        store
            .save(&[listing("B02", "450 TL"), listing("B03", "100 TL"), listing("B03", "90 TL")])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded["B01"], "999 TL");
        assert_eq!(loaded["B02"], "450 TL");
        assert_eq!(loaded["B03"], "90 TL");
        assert!(!dir.path().join("send_products.txt.tmp").exists());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[listing("B01", "999 TL")]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "B01 | 999 TL\n");
    }
}
