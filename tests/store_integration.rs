//! Store integration tests
//!
//! Exercises the full-table and sharded stores together with the lock
//! registry and id allocator, the way an embedding service would use them.

use std::fs;
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use tempfile::TempDir;

use tapstore::domain::{shard_file, table_file, Account, Entity, Group, Invitation, Tap};
use tapstore::storage::{
    IdAllocator, LockRegistry, ShardStore, StoreError, TableStore, TABLE_CAPACITY,
};

fn account(email: &str) -> Account {
    Account::with_email(email)
}

#[test]
fn distinct_keys_coexist_and_resolve() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    let a = account("a@b.se");
    let b = account("b@b.se");
    store.save(&a).unwrap();
    store.save(&b).unwrap();

    let all = store.read_all::<Account>().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(store.read(&a).unwrap().email, "a@b.se");
    assert_eq!(store.read(&b).unwrap().email, "b@b.se");
}

#[test]
fn saving_an_existing_key_replaces_without_growth() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    store.save(&account("a@b.se")).unwrap();

    let mut updated = account("a@b.se");
    updated.tag = Some("alice".into());
    store.save(&updated).unwrap();

    let all = store.read_all::<Account>().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].tag.as_deref(), Some("alice"));
}

#[test]
fn deleting_an_absent_key_is_not_found_and_harmless() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    store.save(&account("a@b.se")).unwrap();

    let err = store.delete(&account("ghost@b.se")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.read_all::<Account>().unwrap().len(), 1);
}

#[test]
fn clear_drops_the_file_and_reads_recreate_it() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    store.save(&account("a@b.se")).unwrap();
    store.clear::<Account>().unwrap();

    assert!(!store.table_path::<Account>().exists());
    assert!(store.read_all::<Account>().unwrap().is_empty());
    assert!(store.table_path::<Account>().is_file());
}

#[test]
fn capacity_is_enforced_at_2500() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    let full: Vec<Account> = (0..TABLE_CAPACITY)
        .map(|i| account(&format!("user{i}@b.se")))
        .collect();
    fs::write(
        store.table_path::<Account>(),
        serde_json::to_vec_pretty(&full).unwrap(),
    )
    .unwrap();

    let err = store.save(&account("overflow@b.se")).unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { .. }));
    assert_eq!(store.read_all::<Account>().unwrap().len(), TABLE_CAPACITY);
}

#[test]
fn locked_read_modify_write_sequences_do_not_lose_updates() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TableStore::new(dir.path()));
    let locks = Arc::new(LockRegistry::new());

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let store = Arc::clone(&store);
            let locks = Arc::clone(&locks);
            thread::spawn(move || {
                locks.with_table(&table_file::<Account>(), || {
                    // Deliberately re-read inside the critical section; the
                    // lock is what makes this sequence safe.
                    let before = store.read_all::<Account>().unwrap();
                    store.save(&account(&format!("writer{i}@b.se"))).unwrap();
                    let after = store.read_all::<Account>().unwrap();
                    assert_eq!(after.len(), before.len() + 1);
                })
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let all = store.read_all::<Account>().unwrap();
    assert_eq!(all.len(), 2);
    assert!(store.exists(&account("writer0@b.se")).unwrap());
    assert!(store.exists(&account("writer1@b.se")).unwrap());
}

#[test]
fn concurrent_group_creation_under_lock_yields_unique_ids() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TableStore::new(dir.path()));
    let locks = Arc::new(LockRegistry::new());
    let ids = Arc::new(IdAllocator::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            let locks = Arc::clone(&locks);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                locks.with_table(&table_file::<Group>(), || {
                    let group = Group {
                        id: ids.next_id::<Group>(&store).unwrap(),
                        name: format!("group {i}"),
                        emoji: "👍".into(),
                        ..Group::default()
                    };
                    store.save(&group).unwrap();
                })
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut keys: Vec<String> = store
        .read_all::<Group>()
        .unwrap()
        .iter()
        .map(Entity::key)
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 4);
}

#[test]
fn shard_appends_accumulate_in_order_with_duplicates() {
    let dir = TempDir::new().unwrap();
    let shards = ShardStore::new(dir.path());

    let tap = Tap::new(9, account("a@b.se"));
    shards.append(&tap).unwrap();
    shards.append(&tap).unwrap();
    shards.append(&Tap::new(9, account("b@b.se"))).unwrap();

    let log = shards.read_shard(&Tap::for_group(9)).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].user.email, "a@b.se");
    assert_eq!(log[1].user.email, "a@b.se");
    assert_eq!(log[2].user.email, "b@b.se");
}

#[test]
fn shards_do_not_leak_into_the_full_table() {
    let dir = TempDir::new().unwrap();
    let tables = TableStore::new(dir.path());
    let shards = ShardStore::new(dir.path());

    shards.append(&Tap::new(1, account("a@b.se"))).unwrap();
    shards.append(&Tap::new(2, account("a@b.se"))).unwrap();

    // The full taps table is a separate document from any shard.
    assert!(tables.read_all::<Tap>().unwrap().is_empty());
    assert_eq!(shards.read_shard(&Tap::for_group(1)).unwrap().len(), 1);
}

#[test]
fn clearing_an_uncreated_shard_succeeds() {
    let dir = TempDir::new().unwrap();
    let shards = ShardStore::new(dir.path());

    shards.clear_shard(&Tap::for_group(404)).unwrap();
}

#[test]
fn invitation_compound_keys_separate_groups() {
    let dir = TempDir::new().unwrap();
    let store = TableStore::new(dir.path());

    store.save(&Invitation::new(1, "fika", "a@b.se")).unwrap();
    store.save(&Invitation::new(2, "lunch", "a@b.se")).unwrap();

    assert_eq!(store.read_all::<Invitation>().unwrap().len(), 2);
    store.delete(&Invitation::new(1, "", "a@b.se")).unwrap();

    let remaining = store.read_all::<Invitation>().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].group_id, 2);
}

#[test]
fn lock_names_match_physical_files() {
    // The same string keys the registry and names the file, for full tables
    // and shards alike.
    let tap = Tap::new(5, account("a@b.se"));
    assert_eq!(table_file::<Account>(), "accounts.json");
    assert_eq!(shard_file(&tap), "taps-5.json");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Saving any sequence of keyed values leaves one record per distinct
    /// key, in first-insertion order, each holding the last value saved.
    #[test]
    fn save_converges_to_last_write_per_key(
        writes in proptest::collection::vec((0u8..8, "[a-z]{1,8}"), 1..24)
    ) {
        let dir = TempDir::new().unwrap();
        let store = TableStore::new(dir.path());

        let mut model: Vec<(u8, String)> = Vec::new();
        for (key, value) in &writes {
            let invitation = Invitation::new(u64::from(*key), value.clone(), "p@b.se");
            store.save(&invitation).unwrap();

            match model.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value.clone(),
                None => model.push((*key, value.clone())),
            }
        }

        let stored: Vec<(u8, String)> = store
            .read_all::<Invitation>()
            .unwrap()
            .into_iter()
            .map(|i| (i.group_id as u8, i.group_name))
            .collect();
        prop_assert_eq!(stored, model);
    }
}
