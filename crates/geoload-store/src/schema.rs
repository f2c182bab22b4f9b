//! Schema versioning for the cache layout.
//!
//! The version lives under [`SCHEMA_KEY`] in the default tree as a
//! big-endian `u32`. A store without it is either brand new or predates
//! versioning (treated as version 0).

use tracing::info;

use crate::error::{Result, StorageError};

/// Current layout version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) const SCHEMA_KEY: &[u8] = b"schema_version";

pub(crate) const FILES_TREE: &str = "files";

pub(crate) fn read_version(db: &sled::Db) -> Result<Option<u32>> {
    let Some(raw) = db.get(SCHEMA_KEY)? else {
        return Ok(None);
    };
    let bytes: [u8; 4] = raw[..]
        .try_into()
        .map_err(|_| StorageError::MalformedSchema(raw.len()))?;
    Ok(Some(u32::from_be_bytes(bytes)))
}

pub(crate) fn write_version(db: &sled::Db, version: u32) -> Result<()> {
    db.insert(SCHEMA_KEY, version.to_be_bytes().to_vec())?;
    Ok(())
}

/// Bring the store at `db` up to [`SCHEMA_VERSION`].
///
/// Repeated calls against an up-to-date store do nothing.
pub(crate) fn ensure(db: &sled::Db, files: &sled::Tree) -> Result<()> {
    let found = match read_version(db)? {
        Some(version) => version,
        None if files.is_empty() => {
            write_version(db, SCHEMA_VERSION)?;
            info!(version = SCHEMA_VERSION, "initialized cache schema");
            return Ok(());
        }
        None => 0,
    };

    if found > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    for from in found..SCHEMA_VERSION {
        migrate_step(from, files)?;
        write_version(db, from + 1)?;
        info!(from, to = from + 1, "migrated cache schema");
    }

    Ok(())
}

/// One version bump. Steps either keep entries intact or clear the tree;
/// there is no partial-entry migration.
fn migrate_step(from: u32, files: &sled::Tree) -> Result<()> {
    // Unversioned layouts store records we cannot decode.
    if from == 0 {
        files.clear()?;
    }
    Ok(())
}
