//! SQLite-backed key-value store.
//!
//! Holds the small amount of state the hub remembers between sessions:
//! - the last requested timer duration
//! - the task checklist
//! - the selected theme
//!
//! Values are JSON (or a bare string for the theme) keyed by name.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::data_dir;
use crate::checklist::TaskList;
use crate::error::{DatabaseError, Result};
use crate::sinks::InputSource;
use crate::theme::Theme;
use crate::timer::RequestedDuration;

pub const KEY_TIMER_INPUTS: &str = "timer_inputs";
pub const KEY_TASKS: &str = "task_tracker_tasks";
pub const KEY_THEME: &str = "theme";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `<data_dir>/devhub.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("devhub.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv_get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)
    }

    // ── Typed records ────────────────────────────────────────────────

    /// Last saved timer inputs; all zero if nothing was saved.
    pub fn load_timer_inputs(&self) -> Result<RequestedDuration> {
        Ok(self.get_json(KEY_TIMER_INPUTS)?.unwrap_or_default())
    }

    pub fn save_timer_inputs(&self, inputs: &RequestedDuration) -> Result<()> {
        self.set_json(KEY_TIMER_INPUTS, inputs)
    }

    pub fn load_tasks(&self) -> Result<TaskList> {
        Ok(self.get_json(KEY_TASKS)?.unwrap_or_default())
    }

    pub fn save_tasks(&self, tasks: &TaskList) -> Result<()> {
        self.set_json(KEY_TASKS, tasks)
    }

    /// Saved theme. Anything other than a recognised name reads as dark.
    pub fn load_theme(&self) -> Result<Theme> {
        let theme = match self.kv_get(KEY_THEME)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!("ignoring stored theme: {e}");
                Theme::Dark
            }),
            None => Theme::Dark,
        };
        Ok(theme)
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.kv_set(KEY_THEME, theme.as_str())
    }
}

/// Input source backed by the store.
///
/// Reads the saved inputs each time a run starts, so edits made between
/// runs are picked up.
pub struct StoredInputs<'a> {
    store: &'a Store,
}

impl<'a> StoredInputs<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn set(&self, inputs: &RequestedDuration) -> Result<()> {
        self.store.save_timer_inputs(inputs)
    }
}

impl InputSource for StoredInputs<'_> {
    fn requested_duration(&self) -> RequestedDuration {
        self.store.load_timer_inputs().unwrap_or_else(|e| {
            warn!("could not read timer inputs: {e}");
            RequestedDuration::default()
        })
    }
}
