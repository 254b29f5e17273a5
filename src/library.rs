// Zone and character bookkeeping on the whole-application blob.
use crate::model::{AppData, Character, CharacterKind, Zone};

impl AppData {
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// New zone with default grid settings. Blank names are rejected.
    pub fn create_zone(&mut self, name: &str, id: String) -> Option<&Zone> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.zones.push(Zone::new(id, name.to_string()));
        log::info!("created zone {name}");
        self.zones.last()
    }

    pub fn delete_zone(&mut self, id: &str) -> bool {
        let before = self.zones.len();
        self.zones.retain(|z| z.id != id);
        self.zones.len() != before
    }

    /// Replace the zone with the same id, or append it.
    pub fn upsert_zone(&mut self, zone: Zone) {
        match self.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn create_character(
        &mut self,
        name: &str,
        kind: CharacterKind,
        image_url: Option<&str>,
        id: String,
    ) -> Option<&Character> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let image_url = image_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        self.characters.push(Character {
            id,
            name: name.to_string(),
            kind,
            image_url,
        });
        self.characters.last()
    }

    /// Tokens that referenced the character stay on their boards as orphans.
    pub fn delete_character(&mut self, id: &str) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.id != id);
        self.characters.len() != before
    }
}
