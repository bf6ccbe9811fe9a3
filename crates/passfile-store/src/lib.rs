//! # passfile-store
//!
//! Flat-file credential store for passfile.
//!
//! Persists `username -> password-hash` pairs as a plain text file, one
//! `identity_token:hash_token` record per line, with a freshness-cached
//! load path keyed on the file's modification time. Built for simple
//! authentication (basic-auth style gateways) where a full identity
//! service is overkill.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  PasswordStore (cache + operations)     │
//! ├─────────────────────────────────────────┤
//! │  records (parse / format)               │
//! ├─────────────────────────────────────────┤
//! │  Codec (base64)   Hasher (PBKDF2, ring) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use passfile_store::PasswordStore;
//!
//! let mut store = PasswordStore::new("users.passwd");
//! store.create_user("alice", "secret1")?;
//! assert!(store.verify_user("alice", "secret1")?);
//! ```
//!
//! Single-threaded and synchronous by design: every operation is a small,
//! bounded, blocking file read or rewrite. There is no cross-process
//! locking: concurrent writers race with last-rewrite-wins semantics,
//! and the only cross-process signal is the mtime comparison on load.

pub mod action;
pub mod codec;
pub mod error;
pub mod hash;
pub mod records;
pub mod store;

// ── re-exports ───────────────────────────────────────────────────────

pub use action::Action;
pub use codec::{Base64Codec, Codec};
pub use error::{StoreError, StoreResult};
pub use hash::{Hasher, Pbkdf2Hasher};
pub use store::PasswordStore;
