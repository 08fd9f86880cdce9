use std::collections::HashSet;
use std::sync::Arc;

use addressbook_core::{Contact, JsonFlatFileRepository, Repository};

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_inserts_are_serialized_without_lost_updates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let repo = Arc::new(
        JsonFlatFileRepository::<Contact>::open(path.clone())
            .await
            .unwrap(),
    );

    let mut tasks = Vec::new();
    for n in 0..16 {
        let repo = Arc::clone(&repo);
        tasks.push(tokio::spawn(async move {
            repo.insert(Contact::new(
                format!("First{n}"),
                format!("Last{n}"),
                format!("0191{n}"),
                format!("person{n}@corrie.co.uk"),
            ))
            .await
            .unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 16);
    assert_eq!(repo.get_all().len(), 16);

    // The backing file reflects the final serialized state.
    let reopened = JsonFlatFileRepository::<Contact>::open(path).await.unwrap();
    let persisted: HashSet<_> = reopened.get_all().into_iter().map(|c| c.id).collect();
    assert_eq!(persisted, ids);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_insert_and_delete_both_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let repo = Arc::new(
        JsonFlatFileRepository::<Contact>::open(path.clone())
            .await
            .unwrap(),
    );

    let seeded = repo
        .insert(Contact::new("David", "Platt", "01913478234", "david@corrie.co.uk"))
        .await
        .unwrap();

    let deleter = {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move { repo.delete(seeded).await })
    };
    let inserter = {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
            repo.insert(Contact::new("Ken", "Barlow", "019134784929", "ken@corrie.co.uk"))
                .await
        })
    };

    deleter.await.unwrap().unwrap();
    let inserted = inserter.await.unwrap().unwrap();

    // Whatever the interleaving, both mutations land: the seeded record is
    // gone and the inserted one is the sole survivor.
    let survivors: Vec<_> = repo.get_all();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, inserted);

    let reopened = JsonFlatFileRepository::<Contact>::open(path).await.unwrap();
    let persisted = reopened.get_all();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, inserted);
}
