//! Where the application blob lives: browser `localStorage` in the app, an
//! in-memory map for tests. Also the JSON import/export format.

use anyhow::{Context, bail};

use crate::model::AppData;
use crate::settings::STORAGE_KEY;

pub trait Persistence {
    /// Stored data, or an empty blob when nothing readable is stored.
    fn load(&self) -> AppData;
    fn save(&mut self, data: &AppData) -> anyhow::Result<()>;
}

/// Browser `localStorage` under [`STORAGE_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl Persistence for LocalStore {
    fn load(&self) -> AppData {
        let Some(raw) = Self::storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) else {
            return AppData::default();
        };
        match parse_import(&raw) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("stored data unreadable, starting empty: {err:#}");
                AppData::default()
            }
        }
    }

    fn save(&mut self, data: &AppData) -> anyhow::Result<()> {
        let Some(storage) = Self::storage() else {
            bail!("localStorage is not available");
        };
        let json = serde_json::to_string(data).context("serializing application data")?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| anyhow::anyhow!("localStorage write rejected: {e:?}"))
    }
}

/// Keeps the blob as serialized JSON so loads go through the same parsing path.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    json: Option<String>,
    /// Make every write fail, as a full or blocked storage would.
    pub fail_writes: bool,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_data(data: &AppData) -> Self {
        Self {
            json: serde_json::to_string(data).ok(),
            ..Self::default()
        }
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> AppData {
        self.json
            .as_deref()
            .and_then(|raw| parse_import(raw).ok())
            .unwrap_or_default()
    }

    fn save(&mut self, data: &AppData) -> anyhow::Result<()> {
        if self.fail_writes {
            bail!("storage quota exceeded");
        }
        self.json = Some(serde_json::to_string(data).context("serializing application data")?);
        self.writes += 1;
        Ok(())
    }
}

/// Parse an exported blob. Missing optional fields take their defaults and
/// zone settings are normalized; nothing is touched on error.
pub fn parse_import(raw: &str) -> anyhow::Result<AppData> {
    let data: AppData =
        serde_json::from_str(raw).context("file is not a virtual tabletop export")?;
    Ok(data)
}

pub fn export_json(data: &AppData) -> anyhow::Result<String> {
    serde_json::to_string_pretty(data).context("serializing export")
}

pub fn export_file_name(year: u32, month: u32, day: u32) -> String {
    format!("virtual-tabletop-export-{year:04}-{month:02}-{day:02}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Zone;

    #[test]
    fn memory_store_round_trips() {
        let mut data = AppData::default();
        data.zones.push(Zone::new("z1".into(), "Cave".into()));
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), AppData::default());
        store.save(&data).unwrap();
        assert_eq!(store.load(), data);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn failed_write_keeps_old_data() {
        let mut store = MemoryStore::with_data(&AppData::default());
        store.fail_writes = true;
        let mut data = AppData::default();
        data.zones.push(Zone::new("z1".into(), "Cave".into()));
        assert!(store.save(&data).is_err());
        assert!(store.load().zones.is_empty());
    }

    #[test]
    fn export_name_is_dated() {
        assert_eq!(export_file_name(2024, 3, 7), "virtual-tabletop-export-2024-03-07.json");
    }

    #[test]
    fn garbage_import_is_an_error() {
        let err = parse_import("{ not json").unwrap_err();
        assert!(format!("{err:#}").contains("virtual tabletop export"));
    }
}
