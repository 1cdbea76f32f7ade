//! Event persistence contract, JSON codec and storage adapters.
//!
//! # Responsibility
//! - Define `EventPersistence`, the key-value collaborator of the event store.
//! - Encode `EventsByDate` as one JSON document keyed by `YYYY-MM-DD`.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - The whole mapping lives under a single storage key.
//! - Decoding validates every event and rejects overlapping windows,
//!   duplicate ids and non-canonical date keys.
//! - Logs carry counts and durations only, never titles or descriptions.

use crate::db::DbError;
use crate::model::date_key::{date_key, parse_date_key};
use crate::model::event::Event;
use crate::repo::events_by_date::EventsByDate;
use crate::schedule::overlap::find_conflict;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage key holding the serialized mapping.
pub const DEFAULT_STORAGE_KEY: &str = "calendarEvents";

pub type PersistResult<T> = Result<T, PersistenceError>;

/// Failure reading or writing the persisted mapping.
#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Stored text exists but is not a valid event document.
    InvalidData(String),
    /// The collaborator refused the operation.
    Unavailable(String),
    /// Writes are held back because the stored document could not be read.
    Suspended,
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode events: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted events: {message}"),
            Self::Unavailable(message) => write!(f, "event storage unavailable: {message}"),
            Self::Suspended => write!(
                f,
                "saving is suspended because the stored events could not be read"
            ),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) | Self::Suspended => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value collaborator holding the whole `EventsByDate` mapping.
pub trait EventPersistence {
    /// Reads the stored mapping; `Ok(None)` when nothing was ever saved.
    fn load(&self) -> PersistResult<Option<EventsByDate>>;
    /// Replaces the stored mapping with `events`.
    fn save(&self, events: &EventsByDate) -> PersistResult<()>;
}

impl<P: EventPersistence + ?Sized> EventPersistence for &P {
    fn load(&self) -> PersistResult<Option<EventsByDate>> {
        (**self).load()
    }

    fn save(&self, events: &EventsByDate) -> PersistResult<()> {
        (**self).save(events)
    }
}

/// Serializes the mapping as a JSON object keyed by date key.
pub fn encode_events(events: &EventsByDate) -> PersistResult<String> {
    let document = events
        .iter()
        .map(|(date, events)| (date_key(date), events))
        .collect::<BTreeMap<_, _>>();
    serde_json::to_string(&document).map_err(PersistenceError::Encode)
}

/// Parses and validates a JSON event document.
///
/// Dates mapped to an empty list are dropped.
pub fn decode_events(text: &str) -> PersistResult<EventsByDate> {
    let document: BTreeMap<String, Vec<Event>> = serde_json::from_str(text)
        .map_err(|err| PersistenceError::InvalidData(format!("malformed document: {err}")))?;

    let mut mapping = EventsByDate::new();
    let mut seen_ids = HashSet::new();
    for (key, events) in document {
        let date = parse_date_key(&key).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid date key `{key}`"))
        })?;

        for event in events {
            event.validate_on(date).map_err(|err| {
                PersistenceError::InvalidData(format!("event {} under {key}: {err}", event.id))
            })?;
            if !seen_ids.insert(event.id) {
                return Err(PersistenceError::InvalidData(format!(
                    "duplicate event id {}",
                    event.id
                )));
            }
            if let Some(existing) = find_conflict(mapping.events_on(date), event.window(), None) {
                return Err(PersistenceError::InvalidData(format!(
                    "event {} overlaps event {} under {key}",
                    event.id, existing.id
                )));
            }
            mapping.push(date, event);
        }
    }
    Ok(mapping)
}

/// SQLite-backed persistence over the `kv_store` table.
pub struct SqliteEventPersistence<'conn> {
    conn: &'conn Connection,
    storage_key: String,
}

impl<'conn> SqliteEventPersistence<'conn> {
    /// Uses `DEFAULT_STORAGE_KEY`; `conn` must come from `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_storage_key(conn, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(conn: &'conn Connection, storage_key: impl Into<String>) -> Self {
        Self {
            conn,
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn read_text(&self) -> PersistResult<Option<String>> {
        let text = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.storage_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(text)
    }

    fn write_text(&self, text: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.storage_key.as_str(), text],
        )?;
        Ok(())
    }
}

impl EventPersistence for SqliteEventPersistence<'_> {
    fn load(&self) -> PersistResult<Option<EventsByDate>> {
        let started_at = Instant::now();
        let result = self
            .read_text()
            .and_then(|text| text.as_deref().map(decode_events).transpose());

        match &result {
            Ok(Some(events)) => info!(
                "event=events_load module=persistence status=ok dates={} events={} duration_ms={}",
                events.dates().count(),
                events.event_count(),
                started_at.elapsed().as_millis()
            ),
            Ok(None) => info!(
                "event=events_load module=persistence status=empty duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=events_load module=persistence status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    fn save(&self, events: &EventsByDate) -> PersistResult<()> {
        let started_at = Instant::now();
        let result = encode_events(events).and_then(|text| self.write_text(&text));

        match &result {
            Ok(()) => info!(
                "event=events_save module=persistence status=ok dates={} events={} duration_ms={}",
                events.dates().count(),
                events.event_count(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=events_save module=persistence status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

/// In-process persistence holding the encoded document text.
///
/// Round-trips through the same codec as the SQLite adapter, so it is a
/// faithful substitute for in-memory-only operation and tests.
#[derive(Debug, Default)]
pub struct MemoryEventPersistence {
    slot: RefCell<Option<String>>,
}

impl MemoryEventPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `text` already stored, whether valid or not.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(text.into())),
        }
    }

    /// Snapshot of the stored document text.
    pub fn text(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl EventPersistence for MemoryEventPersistence {
    fn load(&self) -> PersistResult<Option<EventsByDate>> {
        self.slot.borrow().as_deref().map(decode_events).transpose()
    }

    fn save(&self, events: &EventsByDate) -> PersistResult<()> {
        let text = encode_events(events)?;
        *self.slot.borrow_mut() = Some(text);
        Ok(())
    }
}
