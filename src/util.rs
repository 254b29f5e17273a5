// Browser-side helpers: console logging, clock, and localStorage access.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::settings::{EditorPreferences, PREFERENCES_KEY};

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Milliseconds since the epoch; seeds new entity ids.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Local calendar date as (year, month, day).
pub fn today() -> (u32, u32, u32) {
    let date = js_sys::Date::new_0();
    (date.get_full_year(), date.get_month() + 1, date.get_date())
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn load_preferences() -> EditorPreferences {
    local_storage()
        .and_then(|s| s.get_item(PREFERENCES_KEY).ok().flatten())
        .map(|raw| EditorPreferences::from_json(&raw))
        .unwrap_or_default()
}

pub fn save_preferences(prefs: &EditorPreferences) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(prefs) {
        Ok(json) => {
            if storage.set_item(PREFERENCES_KEY, &json).is_err() {
                log::warn!("could not store editor preferences");
            }
        }
        Err(err) => log::warn!("could not serialize editor preferences: {err}"),
    }
}
