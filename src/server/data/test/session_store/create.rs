use super::*;

/// Tests that a session holding only the issuing timestamp is not written.
///
/// Expected: Ok with no rows in the session table
#[tokio::test]
async fn skips_anonymous_session() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let mut anonymous = record(&[(SESSION_ISSUED_AT, json!(1_700_000_000))]);
    store.create(&mut anonymous).await?;

    assert_eq!(row_count(&database).await, 0);

    Ok(())
}

/// Tests that a populated session is persisted and can be loaded back.
///
/// Expected: Ok with the payload returned by `load`
#[tokio::test]
async fn persists_populated_session() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let mut populated = record(&[
        (SESSION_ISSUED_AT, json!(1_700_000_000)),
        ("user", json!({ "id": 42 })),
    ]);
    store.create(&mut populated).await?;

    assert_eq!(row_count(&database).await, 1);
    let loaded = store.load(&populated.id).await?.unwrap();
    assert_eq!(loaded.data.get("user"), Some(&json!({ "id": 42 })));
    assert_eq!(
        loaded.expiry_date.unix_timestamp(),
        populated.expiry_date.unix_timestamp()
    );

    Ok(())
}

/// Tests that a colliding id is replaced before insert.
///
/// Expected: Ok with the record re-keyed and the existing row untouched
#[tokio::test]
async fn regenerates_colliding_id() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let mut populated = record(&[("user", json!(1))]);
    let taken = populated.id;
    factory::session::SessionFactory::new(database.connection().unwrap())
        .id(taken.to_string())
        .data(json!({ "user": 2 }))
        .build()
        .await
        .unwrap();

    store.create(&mut populated).await?;

    assert_ne!(populated.id, taken);
    assert_eq!(row_count(&database).await, 2);
    let existing = store.load(&taken).await?.unwrap();
    assert_eq!(existing.data.get("user"), Some(&json!(2)));

    Ok(())
}

/// Tests that writes fail while no connection is attached.
///
/// Expected: Err(session_store::Error::Backend)
#[tokio::test]
async fn fails_without_connection() {
    let store = DatabaseSessionStore::new(Database::new());

    let mut populated = record(&[("user", json!(1))]);
    let result = store.create(&mut populated).await;

    assert!(matches!(result, Err(session_store::Error::Backend(_))));
}
