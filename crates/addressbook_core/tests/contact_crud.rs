use std::collections::HashSet;
use std::path::PathBuf;

use addressbook_core::{
    AddressBookService, Contact, JsonFlatFileRepository, NewContact, RepoError, Repository,
};
use tempfile::TempDir;
use uuid::Uuid;

fn backing_file(dir: &TempDir) -> PathBuf {
    dir.path().join("contacts.json")
}

async fn open_repo(dir: &TempDir) -> JsonFlatFileRepository<Contact> {
    JsonFlatFileRepository::open(backing_file(dir)).await.unwrap()
}

fn david() -> Contact {
    Contact::new("David", "Platt", "01913478234", "david.platt@corrie.co.uk")
}

#[tokio::test]
async fn insert_and_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let id = repo.insert(david()).await.unwrap();

    let loaded = repo.get_by_id(id).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.first_name, "David");
    assert_eq!(loaded.last_name, "Platt");
    assert_eq!(loaded.phone, "01913478234");
    assert_eq!(loaded.email, "david.platt@corrie.co.uk");
}

#[tokio::test]
async fn insert_discards_caller_supplied_id() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let supplied = Uuid::new_v4();
    let contact = Contact::with_id(supplied, "Ken", "Barlow", "019134784929", "ken@corrie.co.uk");
    let assigned = repo.insert(contact).await.unwrap();

    assert_ne!(assigned, supplied);
    assert!(matches!(
        repo.get_by_id(supplied),
        Err(RepoError::NotFound(id)) if id == supplied
    ));
    assert_eq!(repo.get_by_id(assigned).unwrap().first_name, "Ken");
}

#[test]
fn id_allocation_has_no_collisions_over_ten_thousand_records() {
    let ids: HashSet<_> = (0..10_000)
        .map(|n| Contact::new(format!("First{n}"), "Last", "0191", "a@b.c").id)
        .collect();
    assert_eq!(ids.len(), 10_000);
}

#[tokio::test]
async fn sequential_inserts_assign_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let mut ids = HashSet::new();
    for _ in 0..50 {
        ids.insert(repo.insert(david()).await.unwrap());
    }
    assert_eq!(ids.len(), 50);
    assert_eq!(repo.get_all().len(), 50);
}

#[tokio::test]
async fn get_all_preserves_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let first = repo.insert(david()).await.unwrap();
    let second = repo
        .insert(Contact::new("Jason", "Grimshaw", "01913478123", "jason@corrie.co.uk"))
        .await
        .unwrap();
    let third = repo
        .insert(Contact::new("Rita", "Sullivan", "01913478555", "rita@corrie.co.uk"))
        .await
        .unwrap();

    let ids: Vec<_> = repo.get_all().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[tokio::test]
async fn get_by_id_missing_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;
    repo.insert(david()).await.unwrap();

    let missing = Uuid::new_v4();
    assert!(matches!(
        repo.get_by_id(missing),
        Err(RepoError::NotFound(id)) if id == missing
    ));
}

#[tokio::test]
async fn update_replaces_payload_and_keeps_identity() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let id = repo.insert(david()).await.unwrap();
    let updated = Contact::with_id(
        id,
        "Davide",
        "Platts",
        "011213478234",
        "david.platt@eastenders.co.uk",
    );
    repo.update(&updated).await.unwrap();

    let all = repo.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].first_name, "Davide");
    assert_eq!(all[0].last_name, "Platts");
    assert_eq!(all[0].phone, "011213478234");
    assert_eq!(all[0].email, "david.platt@eastenders.co.uk");
}

#[tokio::test]
async fn update_missing_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;
    repo.insert(david()).await.unwrap();
    let before = repo.get_all();

    let stray = Contact::new("Nobody", "Here", "0", "no@where");
    let err = repo.update(&stray).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == stray.id));
    assert_eq!(repo.get_all(), before);
}

#[tokio::test]
async fn delete_removes_only_the_requested_record() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;

    let keep_a = repo.insert(david()).await.unwrap();
    let doomed = repo
        .insert(Contact::new("Jason", "Grimshaw", "01913478123", "jason@corrie.co.uk"))
        .await
        .unwrap();
    let keep_b = repo
        .insert(Contact::new("Ken", "Barlow", "019134784929", "ken@corrie.co.uk"))
        .await
        .unwrap();

    repo.delete(doomed).await.unwrap();

    let ids: Vec<_> = repo.get_all().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![keep_a, keep_b]);
    assert!(matches!(repo.get_by_id(doomed), Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn delete_missing_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&dir).await;
    repo.insert(david()).await.unwrap();
    let before = repo.get_all();

    let missing = Uuid::new_v4();
    let err = repo.delete(missing).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
    assert_eq!(repo.get_all(), before);
}

#[tokio::test]
async fn service_opens_from_data_options() {
    let dir = tempfile::tempdir().unwrap();
    let options = addressbook_core::DataOptions {
        contacts_path: backing_file(&dir),
    };

    let service = AddressBookService::open(&options).await.unwrap();
    assert!(service.list_contacts().is_empty());
}

#[tokio::test]
async fn service_wraps_repository_calls() {
    let dir = tempfile::tempdir().unwrap();
    let service = AddressBookService::new(open_repo(&dir).await);

    let id = service
        .create_contact(NewContact {
            first_name: "Steve".into(),
            last_name: "McDonald".into(),
            phone: "01913478555".into(),
            email: "steve.mcdonald@corrie.co.uk".into(),
        })
        .await
        .unwrap();

    let fetched = service.get_contact(id).unwrap();
    assert_eq!(fetched.first_name, "Steve");
    assert_eq!(service.list_contacts().len(), 1);

    let mut renamed = fetched.clone();
    renamed.last_name = "MacDonald".into();
    service.update_contact(&renamed).await.unwrap();
    assert_eq!(service.get_contact(id).unwrap().last_name, "MacDonald");

    service.delete_contact(id).await.unwrap();
    assert!(service.list_contacts().is_empty());
}
