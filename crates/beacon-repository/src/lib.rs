//! Persistence layer for beacon
//!
//! This crate owns the canonical artifact collections (rules, cards,
//! presentations, glossary entries) and the admin settings, and persists
//! them through a scoped key/value store.
//!
//! # Features
//!
//! - **Key/value seam**: [`KeyValueStore`] with in-memory and JSON-file backends
//! - **Artifact store**: create/update/delete/toggle with validation, whole-collection writes
//! - **Derived glossary index**: rebuilt and persisted in the same write as the entries
//! - **Change notification**: a refresh broadcast after every successful save
//! - **Export/import**: JSON document with wholesale-replace and settings merge
//!
//! # Quick Start
//!
//! ```no_run
//! use beacon_core::Rule;
//! use beacon_repository::{ArtifactStore, MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut store = ArtifactStore::new(Arc::new(MemoryStore::new()));
//!     store.load().await?;
//!
//!     let rule = store
//!         .create(Rule::new("Renewal", "deals", "Offer the renewal bundle"))
//!         .await?;
//!     println!("Created rule: {}", rule.meta.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! The store assumes a single writer. Every save writes the whole
//! collection, so a second writer working from a stale copy silently
//! overwrites changes made in between.

pub mod clock;
pub mod error;
pub mod file_system;
pub mod id;
pub mod keys;
pub mod memory;
pub mod notify;
pub mod store;
pub mod traits;
pub mod transfer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RepositoryError, RepositoryResult};
pub use file_system::FileStore;
pub use id::{IdGenerator, SequenceIdGenerator, TimestampIdGenerator, UuidIdGenerator};
pub use memory::MemoryStore;
pub use notify::{BroadcastNotifier, ChangeEvent, ChangeNotifier, NoopNotifier};
pub use store::{ArtifactStore, StoreState, StoredArtifact};
pub use traits::{KeyValueStore, StoreMap};
pub use transfer::{ExportDocument, ImportDocument, ImportSummary};
