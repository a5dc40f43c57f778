//! Local persistence for leads.
//!
//! Each profile (one audience being worked, e.g. `trainers`) lives in its
//! own `SQLite` file under the storage root:
//!
//! ```text
//! <root>/
//!   trainers.sqlite
//!   event-planners.sqlite
//! ```
//!
//! A profile database holds one `lead` row per lead and one `outreach` row
//! per recorded cadence slot. Profiles spring into existence on the first
//! write; read operations on a profile that was never written to fail with
//! [`StorageError::ProfileNotFound`].

mod lead;
mod outreach;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("invalid profile name: {0} (use letters, digits, '-' and '_')")]
    InvalidProfile(String),

    #[error("lead not found: {0}")]
    LeadNotFound(Uuid),

    #[error("lead has no outreach recorded: {0}")]
    NoOutreach(Uuid),

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS lead (
        id             TEXT PRIMARY KEY,
        name           TEXT NOT NULL,
        location       TEXT,
        utc_offset     INTEGER,
        email          TEXT,
        whatsapp       TEXT,
        instagram_url  TEXT,
        linkedin_url   TEXT,
        facebook_url   TEXT,
        website_url    TEXT,
        source         TEXT NOT NULL,
        audience       TEXT,
        follower_count INTEGER,
        platforms      TEXT NOT NULL,
        status         TEXT NOT NULL,
        next_follow_up_platform TEXT,
        next_follow_up_at       TEXT,
        added_at       TEXT NOT NULL,
        added_via      TEXT NOT NULL,
        last_updated   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS outreach (
        lead_id    TEXT NOT NULL REFERENCES lead (id),
        day_number INTEGER NOT NULL,
        platform   TEXT NOT NULL,
        outcome    TEXT NOT NULL,
        sent_at    TEXT NOT NULL,
        UNIQUE (lead_id, day_number)
    );
";

/// Local `SQLite`-backed storage, one database file per profile.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.cadence/profiles/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cadence").join("profiles"))
    }

    /// Lists profile names by scanning for `.sqlite` files in the root.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let mut profiles = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(profiles),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("sqlite") {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                profiles.push(name.to_string());
            }
        }
        profiles.sort();
        Ok(profiles)
    }

    fn db_path(&self, profile: &str) -> Result<PathBuf> {
        validate_profile(profile)?;
        Ok(self.root.join(format!("{profile}.sqlite")))
    }

    /// Opens an existing profile database.
    fn open_db(&self, profile: &str) -> Result<Connection> {
        let path = self.db_path(profile)?;
        if !path.exists() {
            return Err(StorageError::ProfileNotFound(profile.to_string()));
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Opens a profile database, creating the file and schema if needed.
    fn open_or_create_db(&self, profile: &str) -> Result<Connection> {
        let conn = Connection::open(self.db_path(profile)?)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }
}

/// Profile names become file names, so only a conservative character set
/// is allowed.
fn validate_profile(profile: &str) -> Result<()> {
    let ok = !profile.is_empty()
        && profile
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidProfile(profile.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn list_profiles_empty_when_root_missing() {
        let dir = TempDir::new().unwrap();
        let storage = Storage {
            root: dir.path().join("nowhere"),
        };

        assert!(storage.list_profiles().unwrap().is_empty());
    }

    #[test]
    fn list_profiles_names_sqlite_files_sorted() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("profiles")).unwrap();

        storage.open_or_create_db("trainers").unwrap();
        storage.open_or_create_db("event-planners").unwrap();
        fs::write(storage.root.join("notes.txt"), "ignored").unwrap();

        let profiles = storage.list_profiles().unwrap();
        assert_eq!(profiles, vec!["event-planners", "trainers"]);
    }

    #[test]
    fn rejects_unsafe_profile_names() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("profiles")).unwrap();

        let err = storage.open_db("../escape").unwrap_err();
        assert!(matches!(err, StorageError::InvalidProfile(_)));

        let err = storage.open_db("").unwrap_err();
        assert!(matches!(err, StorageError::InvalidProfile(_)));
    }

    #[test]
    fn open_db_requires_an_existing_profile() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("profiles")).unwrap();

        let err = storage.open_db("trainers").unwrap_err();
        assert!(matches!(err, StorageError::ProfileNotFound(_)));
    }
}
