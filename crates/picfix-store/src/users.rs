//! SQLite-backed accounts and saved-image log.

use std::path::{Path, PathBuf};

use picfix_core::EditLog;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::hash::hash_secret;

/// Questions offered at registration.
pub const SECURITY_QUESTIONS: [&str; 3] = [
    "What is your mother's maiden name?",
    "What was the name of your first pet?",
    "What is your favorite book?",
];

const DB_DIR: &str = "picfix";
const DB_FILE: &str = "picfix.db";

/// Where [`UserStore::open_default`] keeps its database:
///
/// - Linux: ~/.local/share/picfix/picfix.db
/// - macOS: ~/Library/Application Support/picfix/picfix.db
/// - Windows: %APPDATA%\picfix\picfix.db
///
/// Falls back to the home directory, then the working directory.
pub fn default_db_path() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(DB_DIR);
    path.push(DB_FILE);
    path
}

/// User credentials plus the record of which user saved which image.
#[derive(Debug)]
pub struct UserStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl UserStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened user database");

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// A private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open the database at [`default_db_path`].
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_db_path())
    }

    /// Database file, or None for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                username            TEXT PRIMARY KEY,
                password            TEXT NOT NULL,
                security_question   TEXT NOT NULL,
                security_answer     TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS images (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                image_path          TEXT NOT NULL,
                username            TEXT NOT NULL,
                FOREIGN KEY (username) REFERENCES users (username)
            );
            CREATE INDEX IF NOT EXISTS idx_images_username ON images(username);",
        )?;
        debug!("User database schema initialized");
        Ok(())
    }

    /// Create an account. Returns false, leaving the existing row alone,
    /// when the username is taken.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        security_question: &str,
        security_answer: &str,
    ) -> Result<bool, StoreError> {
        let result = self.conn.execute(
            "INSERT INTO users (username, password, security_question, security_answer)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                username,
                hash_secret(password),
                security_question,
                hash_secret(security_answer)
            ],
        );

        match result {
            Ok(_) => {
                info!(username, "Registered user");
                Ok(true)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                debug!(username, "Username already taken");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Check a username/password pair.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;

        let ok = stored.is_some_and(|digest| digest == hash_secret(password));
        debug!(username, ok, "Authentication attempt");
        Ok(ok)
    }

    /// The security question chosen by `username`, or None for an unknown user.
    pub fn security_question(&self, username: &str) -> Result<Option<String>, StoreError> {
        let question: Option<String> = self
            .conn
            .query_row(
                "SELECT security_question FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;
        Ok(question)
    }

    /// Replace the password if `security_answer` matches. Returns false for
    /// a wrong answer or an unknown user.
    pub fn reset_password(
        &self,
        username: &str,
        security_answer: &str,
        new_password: &str,
    ) -> Result<bool, StoreError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT security_answer FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(digest) if digest == hash_secret(security_answer) => {
                self.conn.execute(
                    "UPDATE users SET password = ?1 WHERE username = ?2",
                    params![hash_secret(new_password), username],
                )?;
                info!(username, "Password reset");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove every account and every saved-image record.
    pub fn delete_all_users(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch("DELETE FROM users; DELETE FROM images;")?;
        info!("Deleted all users and image history");
        Ok(())
    }

    /// Number of registered accounts.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    /// Append a saved-image record.
    pub fn add_image_edit(&self, image_path: &str, username: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO images (image_path, username) VALUES (?1, ?2)",
            params![image_path, username],
        )?;
        debug!(image_path, username, "Recorded image edit");
        Ok(())
    }

    /// Paths saved by `username`, oldest first.
    pub fn user_images(&self, username: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT image_path FROM images WHERE username = ?1 ORDER BY id")?;
        let paths = stmt
            .query_map(params![username], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(paths)
    }

    #[cfg(test)]
    fn stored_password(&self, username: &str) -> Option<String> {
        self.conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }
}

impl EditLog for UserStore {
    type Error = StoreError;

    fn record_edit(&mut self, image_path: &str, username: &str) -> Result<(), Self::Error> {
        self.add_image_edit(image_path, username)
    }

    fn list_edits(&self, username: &str) -> Result<Vec<String>, Self::Error> {
        self.user_images(username)
    }
}

#[cfg(test)]
mod tests {
    use picfix_core::{Raster, Session};
    use tempfile::TempDir;

    use super::*;

    fn store_with_alice() -> UserStore {
        let store = UserStore::open_in_memory().unwrap();
        assert!(store
            .register("alice", "secret", SECURITY_QUESTIONS[1], "Rex")
            .unwrap());
        store
    }

    #[test]
    fn test_register_and_authenticate() {
        let store = store_with_alice();
        assert!(store.authenticate("alice", "secret").unwrap());
        assert!(!store.authenticate("alice", "Secret").unwrap());
        assert!(!store.authenticate("bob", "secret").unwrap());
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[test]
    fn test_secrets_are_stored_as_digests() {
        let store = store_with_alice();
        assert_eq!(
            store.stored_password("alice").unwrap(),
            hash_secret("secret")
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_credentials() {
        let store = store_with_alice();
        let before = store.stored_password("alice");

        assert!(!store
            .register("alice", "other", SECURITY_QUESTIONS[0], "Smith")
            .unwrap());

        assert_eq!(store.stored_password("alice"), before);
        assert!(store.authenticate("alice", "secret").unwrap());
        assert!(!store.authenticate("alice", "other").unwrap());
        assert_eq!(
            store.security_question("alice").unwrap().as_deref(),
            Some(SECURITY_QUESTIONS[1])
        );
    }

    #[test]
    fn test_security_question_lookup() {
        let store = store_with_alice();
        assert_eq!(
            store.security_question("alice").unwrap(),
            Some(SECURITY_QUESTIONS[1].to_string())
        );
        assert_eq!(store.security_question("nobody").unwrap(), None);
    }

    #[test]
    fn test_reset_password() {
        let store = store_with_alice();

        assert!(!store.reset_password("alice", "Max", "newpass").unwrap());
        assert!(store.authenticate("alice", "secret").unwrap());

        assert!(store.reset_password("alice", "Rex", "newpass").unwrap());
        assert!(store.authenticate("alice", "newpass").unwrap());
        assert!(!store.authenticate("alice", "secret").unwrap());

        assert!(!store.reset_password("nobody", "Rex", "x").unwrap());
    }

    #[test]
    fn test_edit_log_order_and_scope() {
        let mut store = store_with_alice();
        store.record_edit("/tmp/a.png", "alice").unwrap();
        store.record_edit("/tmp/b.jpg", "bob").unwrap();
        store.record_edit("/tmp/c.bmp", "alice").unwrap();

        assert_eq!(
            store.list_edits("alice").unwrap(),
            vec!["/tmp/a.png".to_string(), "/tmp/c.bmp".to_string()]
        );
        assert_eq!(store.list_edits("bob").unwrap(), vec!["/tmp/b.jpg".to_string()]);
        assert!(store.list_edits("carol").unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_users_clears_both_tables() {
        let mut store = store_with_alice();
        store.record_edit("/tmp/a.png", "alice").unwrap();

        store.delete_all_users().unwrap();
        assert_eq!(store.user_count().unwrap(), 0);
        assert!(!store.authenticate("alice", "secret").unwrap());
        assert!(store.list_edits("alice").unwrap().is_empty());

        // Name is free again
        assert!(store
            .register("alice", "again", SECURITY_QUESTIONS[2], "Dune")
            .unwrap());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("picfix.db");

        {
            let mut store = UserStore::open(&path).unwrap();
            assert_eq!(store.path(), Some(path.as_path()));
            store
                .register("alice", "secret", SECURITY_QUESTIONS[0], "Smith")
                .unwrap();
            store.record_edit("/tmp/a.png", "alice").unwrap();
        }

        let store = UserStore::open(&path).unwrap();
        assert!(store.authenticate("alice", "secret").unwrap());
        assert_eq!(store.list_edits("alice").unwrap(), vec!["/tmp/a.png".to_string()]);
    }

    #[test]
    fn test_session_save_records_in_store() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("edited.png");

        let mut store = store_with_alice();
        let mut session = Session::default();
        session.load_raster(Raster::filled(3, 3, [255, 0, 0, 255]), None).unwrap();
        session.sepia().unwrap();

        let report = session.save(&image_path, "alice", &mut store).unwrap();
        assert!(report.warning.is_none());
        assert_eq!(
            store.list_edits("alice").unwrap(),
            vec![image_path.to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_default_path_shape() {
        let path = default_db_path();
        assert!(path.ends_with("picfix/picfix.db"));
    }
}
