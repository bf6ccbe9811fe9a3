//! The file-backed credential store.
//!
//! [`PasswordStore`] owns the in-memory credential mapping, the backing
//! file path, and the freshness state of the cache. The cache has two
//! states, stale (initial) and fresh: [`load`](PasswordStore::load) moves
//! it to fresh by re-reading the file whenever the cache is stale or the
//! file's modification time no longer matches the recorded one, and every
//! mutation drops it back to stale so the next read re-derives truth from
//! disk instead of trusting the just-written snapshot. The mtime comparison
//! is what makes writes by other processes visible between invocations.
//!
//! Mutations never append: the whole mapping is rewritten through the
//! record serializer, so the file cannot accumulate duplicate keys no
//! matter how often a user is re-created.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::codec::{Base64Codec, Codec};
use crate::error::StoreResult;
use crate::hash::{Hasher, Pbkdf2Hasher};
use crate::records;

/// Cached, file-backed mapping from identity tokens to hash tokens.
///
/// # Example
///
/// ```rust,no_run
/// # use passfile_store::PasswordStore;
/// # fn example() -> passfile_store::StoreResult<()> {
/// let mut store = PasswordStore::new("users.passwd");
///
/// store.create_user("alice", "secret1")?;
/// assert!(store.verify_user("alice", "secret1")?);
///
/// for user in store.list_users()? {
///     println!("{user}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct PasswordStore<C: Codec = Base64Codec, H: Hasher = Pbkdf2Hasher> {
    /// Path of the backing file. The file may not exist yet; that is the
    /// empty store.
    path: PathBuf,
    /// In-memory mapping, meaningful only while `cache_valid` is true.
    cache: BTreeMap<String, String>,
    /// Modification time observed at the last cache fill. `None` means the
    /// file did not exist then.
    cached_mtime: Option<SystemTime>,
    /// Whether `cache` matches the file contents as of `cached_mtime`.
    cache_valid: bool,
    codec: C,
    hasher: H,
}

impl PasswordStore {
    /// Open a store on `path` with the default Base64 codec and PBKDF2
    /// hasher. The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_parts(path, Base64Codec, Pbkdf2Hasher)
    }
}

impl<C: Codec, H: Hasher> PasswordStore<C, H> {
    /// Open a store on `path` with explicit codec and hasher backends.
    pub fn with_parts(path: impl Into<PathBuf>, codec: C, hasher: H) -> Self {
        Self {
            path: path.into(),
            cache: BTreeMap::new(),
            cached_mtime: None,
            cache_valid: false,
            codec,
            hasher,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cache back to stale. The next [`load`](Self::load)
    /// re-reads the file regardless of its modification time.
    pub fn invalidate_cache(&mut self) {
        self.cache_valid = false;
    }

    /// Return the current credential mapping, re-reading the backing file
    /// only when the cache is stale or the file's modification time has
    /// changed since it was filled. A missing file is the empty store.
    pub fn load(&mut self) -> StoreResult<&BTreeMap<String, String>> {
        let mtime = self.mtime()?;
        if !self.cache_valid || mtime != self.cached_mtime {
            self.cache = self.read_from_disk()?;
            self.cached_mtime = mtime;
            self.cache_valid = true;
            debug!(
                path = %self.path.display(),
                records = self.cache.len(),
                "cache filled from disk"
            );
        }
        Ok(&self.cache)
    }

    /// Insert or overwrite the record for `username`.
    ///
    /// Re-registration is not an error: the new hash token replaces the old
    /// one. The full mapping is re-read from disk, updated, and written
    /// back, then the cache is invalidated.
    pub fn create_user(&mut self, username: &str, password: &str) -> StoreResult<()> {
        let identity = self.codec.encode(username);
        let salt = self.hasher.generate_salt()?;
        let hash = self.hasher.encode(password, &salt)?;

        let mut records = self.read_from_disk()?;
        records.insert(identity.clone(), hash);
        self.write_to_disk(&records)?;
        self.invalidate_cache();

        info!(user = %identity, path = %self.path.display(), "user created");
        Ok(())
    }

    /// Check `password` against the stored hash for `username`, resolving
    /// the mapping through the cache.
    ///
    /// An unknown user is a normal negative result (`Ok(false)`), never an
    /// error.
    pub fn verify_user(&mut self, username: &str, password: &str) -> StoreResult<bool> {
        let identity = self.codec.encode(username);
        self.load()?;
        Self::check_password(&self.hasher, &self.cache, &identity, password)
    }

    /// Check `password` against the stored hash for `username`, reading
    /// the file directly. The cache is neither consulted nor updated;
    /// this is for callers that need disk-fresh state regardless of
    /// in-process cache age.
    pub fn verify_user_fresh(&self, username: &str, password: &str) -> StoreResult<bool> {
        let identity = self.codec.encode(username);
        let records = self.read_from_disk()?;
        Self::check_password(&self.hasher, &records, &identity, password)
    }

    /// Remove the record for `username`, if present.
    ///
    /// Always works from a fresh read of the file, never the cache, so a
    /// stale snapshot cannot cause the wrong mapping to be written back.
    /// Deleting an absent user is a no-op with a logged warning.
    pub fn delete_user(&mut self, username: &str) -> StoreResult<()> {
        let identity = self.codec.encode(username);

        let mut records = self.read_from_disk()?;
        match records.remove(&identity) {
            Some(_) => {
                self.write_to_disk(&records)?;
                info!(user = %identity, path = %self.path.display(), "user deleted");
            }
            None => {
                warn!(user = %identity, "user not found, nothing to delete");
            }
        }
        self.invalidate_cache();
        Ok(())
    }

    /// Alias of [`delete_user`](Self::delete_user).
    pub fn remove_user(&mut self, username: &str) -> StoreResult<()> {
        self.delete_user(username)
    }

    /// Return every stored username, decoded, in ascending identity-token
    /// order. Reads the file directly and leaves the cache untouched.
    pub fn list_users(&self) -> StoreResult<Vec<String>> {
        let records = self.read_from_disk()?;
        let mut users = Vec::with_capacity(records.len());
        for identity in records.keys() {
            users.push(self.codec.decode(identity)?);
        }
        Ok(users)
    }

    /// Shared lookup + hash check behind both verify paths.
    fn check_password(
        hasher: &H,
        records: &BTreeMap<String, String>,
        identity: &str,
        password: &str,
    ) -> StoreResult<bool> {
        let Some(hash_token) = records.get(identity) else {
            warn!(user = %identity, "user not found");
            return Ok(false);
        };

        let verified = hasher.verify(hash_token, password)?;
        if verified {
            info!(user = %identity, "user verified");
        } else {
            warn!(user = %identity, "user not verified");
        }
        Ok(verified)
    }

    /// Current modification time of the backing file, `None` if it does
    /// not exist.
    fn mtime(&self) -> StoreResult<Option<SystemTime>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse the backing file into a mapping. A missing file is the empty
    /// store, not an error.
    fn read_from_disk(&self) -> StoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => records::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the whole backing file from `records`.
    fn write_to_disk(&self, records: &BTreeMap<String, String>) -> StoreResult<()> {
        fs::write(&self.path, records::format(records))?;

        // Credential material: restrict the file to the owning user.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────
