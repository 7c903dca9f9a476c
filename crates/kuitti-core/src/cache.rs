//! Structured-data cache of extracted receipt items.
//!
//! Items are stored as CSV with a `name,quantity,price` header, in receipt
//! order, with prices as plain decimals. The file is derived data: it can
//! always be regenerated from the raw receipt text.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CacheError, KuittiError};
use crate::models::receipt::ItemRecord;
use crate::receipt::rules::parse_price;
use crate::Result;

/// One CSV row.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRow {
    name: String,
    quantity: String,
    price: String,
}

/// Column names of the cache file.
const HEADER: [&str; 3] = ["name", "quantity", "price"];

/// Write items as CSV to any writer. The header is written even without items.
pub fn write_items<W: Write>(writer: W, items: &[ItemRecord]) -> std::result::Result<(), CacheError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;

    for item in items {
        wtr.serialize(CacheRow {
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            price: item.price.to_string(),
        })?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Read items from CSV produced by [`write_items`].
pub fn read_items<R: Read>(reader: R) -> Result<Vec<ItemRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut items = Vec::new();

    for (i, row) in rdr.deserialize::<CacheRow>().enumerate() {
        let row = row.map_err(CacheError::from)?;
        let name = row.name.trim();

        if name.is_empty() {
            return Err(KuittiError::Cache(CacheError::InvalidRow {
                row: i + 1,
                reason: "empty item name".to_string(),
            }));
        }

        let price = parse_price(&row.price)?;
        items.push(ItemRecord::new(name, row.quantity, price));
    }

    Ok(items)
}

/// Write the cache file, replacing any previous content.
///
/// Items go to a temporary file next to `path` that is renamed over it once
/// complete, so a failed write never leaves a truncated cache behind.
pub fn write_cache(path: &Path, items: &[ItemRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_items(BufWriter::new(tmp.as_file_mut()), items)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} items to {}", items.len(), path.display());
    Ok(())
}

/// Read a cache file.
pub fn read_cache(path: &Path) -> Result<Vec<ItemRecord>> {
    let file = File::open(path)?;
    let items = read_items(file)?;
    debug!("Read {} items from {}", items.len(), path.display());
    Ok(items)
}
