// Unit tests for SessionContext.
// The storage is inspected directly to check what would survive a restart.

use crate::error::SessionError;
use crate::session::SessionContext;
use crate::storage::{FileStorage, MemoryStorage, Storage, TOKEN_KEY, USERS_KEY};

use models::UserRecord;
use tempfile::TempDir;

/// **VALUE**: set_session and clear_session keep memory and storage in step.
///
/// **WHY THIS MATTERS**: The gate reads memory, a restart reads storage. If they
/// disagree, a logged-out visitor comes back logged in after a restart.
///
/// **BUG THIS CATCHES**: Would catch clear_session forgetting the storage key.
#[test]
fn given_token_when_session_set_then_cleared_then_memory_and_storage_agree() {
    // GIVEN: An empty session
    let mut session = SessionContext::hydrate(MemoryStorage::new()).unwrap();
    assert!(!session.is_logged_in());

    // WHEN: Setting a session
    session.set_session("abc.def.ghi").unwrap();

    // THEN: Logged in, and storage holds the token
    assert!(session.is_logged_in());
    assert_eq!(session.token(), Some("abc.def.ghi"));
    assert_eq!(
        session.storage().get(TOKEN_KEY).unwrap().as_deref(),
        Some("abc.def.ghi")
    );

    // WHEN: Clearing it
    session.clear_session().unwrap();

    // THEN: Both are gone
    assert!(!session.is_logged_in());
    assert_eq!(session.token(), None);
    assert_eq!(session.storage().get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn given_persisted_token_when_hydrated_then_session_is_restored() {
    let storage = MemoryStorage::new().with_entry(TOKEN_KEY, "persisted.token.value");

    let session = SessionContext::hydrate(storage).unwrap();

    assert!(session.is_logged_in());
    assert_eq!(session.token(), Some("persisted.token.value"));
}

#[test]
fn given_empty_token_when_session_set_then_session_is_cleared() {
    let storage = MemoryStorage::new().with_entry(TOKEN_KEY, "old");
    let mut session = SessionContext::hydrate(storage).unwrap();

    session.set_session("").unwrap();

    assert!(!session.is_logged_in());
    assert!(!session.storage().contains_key(TOKEN_KEY));
}

#[test]
fn given_users_when_cached_then_read_back_in_order() {
    let mut session = SessionContext::hydrate(MemoryStorage::new()).unwrap();
    let users = vec![
        UserRecord::new("bob", "admin", ["changeBackground"]),
        UserRecord::new("carol", "user", Vec::<String>::new()),
    ];

    session.cache_users(&users).unwrap();

    assert_eq!(session.cached_users().unwrap(), Some(users));
}

#[test]
fn given_no_cache_when_users_read_then_returns_none() {
    let session = SessionContext::hydrate(MemoryStorage::new()).unwrap();

    assert_eq!(session.cached_users().unwrap(), None);
}

/// **BUG THIS CATCHES**: A `null` cache used to reach the renderer and crash it.
/// It must come back as CorruptCache.
#[test]
fn given_null_cache_when_users_read_then_returns_corrupt_cache_error() {
    let storage = MemoryStorage::new().with_entry(USERS_KEY, "null");
    let session = SessionContext::hydrate(storage).unwrap();

    let result = session.cached_users();

    assert!(matches!(result, Err(SessionError::CorruptCache { .. })));
}

#[test]
fn given_token_changed_by_another_writer_when_reloaded_then_memory_follows() {
    let dir = TempDir::new().unwrap();
    let mut first = SessionContext::hydrate(FileStorage::open(dir.path()).unwrap()).unwrap();
    let mut second = SessionContext::hydrate(FileStorage::open(dir.path()).unwrap()).unwrap();

    first.set_session("first.token.value").unwrap();
    assert_eq!(second.token(), None);

    second.reload().unwrap();
    assert_eq!(second.token(), Some("first.token.value"));

    first.clear_session().unwrap();
    second.reload().unwrap();
    assert!(!second.is_logged_in());
}
