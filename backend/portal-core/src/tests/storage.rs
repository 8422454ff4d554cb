use crate::error::StorageError;
use crate::storage::{FileStorage, MemoryStorage, Storage, TOKEN_KEY, USERS_KEY};

use tempfile::TempDir;

#[test]
fn given_memory_storage_when_set_get_remove_then_behaves_like_a_map() {
    let mut storage = MemoryStorage::new();

    storage.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

    // Removing twice is fine
    storage.remove(TOKEN_KEY).unwrap();
}

/// **VALUE**: Values written by one FileStorage are visible to a fresh one.
///
/// **WHY THIS MATTERS**: This is what lets a restart keep the visitor logged in.
///
/// **BUG THIS CATCHES**: Would catch writes that only land in the temp file because
/// the rename was skipped or pointed at the wrong path.
#[test]
fn given_file_storage_when_reopened_then_previous_values_survive() {
    // GIVEN: A storage with two keys written
    let dir = TempDir::new().unwrap();
    let mut first = FileStorage::open(dir.path()).unwrap();
    first.set(TOKEN_KEY, "abc.def.ghi").unwrap();
    first.set(USERS_KEY, "[]").unwrap();

    // WHEN: Opening the same directory again
    let second = FileStorage::open(dir.path()).unwrap();

    // THEN: Both values are there and no temp file is left behind
    assert_eq!(second.get(TOKEN_KEY).unwrap().as_deref(), Some("abc.def.ghi"));
    assert_eq!(second.get(USERS_KEY).unwrap().as_deref(), Some("[]"));
    assert!(!second.path().with_extension("json.tmp").exists());
}

#[test]
fn given_missing_data_dir_when_opened_then_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");

    let storage = FileStorage::open(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn given_file_storage_when_key_removed_then_other_keys_remain() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::open(dir.path()).unwrap();
    storage.set(TOKEN_KEY, "t").unwrap();
    storage.set(USERS_KEY, "[]").unwrap();

    storage.remove(TOKEN_KEY).unwrap();

    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USERS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn given_corrupt_storage_file_when_read_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    std::fs::write(storage.path(), "{ not json").unwrap();

    let result = storage.get(TOKEN_KEY);

    assert!(matches!(result, Err(StorageError::ParseError { .. })));
}
