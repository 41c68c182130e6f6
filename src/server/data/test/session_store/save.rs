use super::*;

/// Tests that saving updates the stored payload.
///
/// Expected: Ok with the new payload loaded back
#[tokio::test]
async fn updates_existing_session() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let mut session = record(&[("step", json!("welcome"))]);
    store.create(&mut session).await?;

    session.data.insert("step".to_string(), json!("profile"));
    store.save(&session).await?;

    assert_eq!(row_count(&database).await, 1);
    let loaded = store.load(&session.id).await?.unwrap();
    assert_eq!(loaded.data.get("step"), Some(&json!("profile")));

    Ok(())
}

/// Tests that removing every collaborator key deletes the row.
///
/// Expected: Ok with no rows left
#[tokio::test]
async fn removes_session_emptied_to_bookkeeping() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let mut session = record(&[
        (SESSION_ISSUED_AT, json!(1_700_000_000)),
        ("user", json!(9)),
    ]);
    store.create(&mut session).await?;
    assert_eq!(row_count(&database).await, 1);

    session.data.remove("user");
    store.save(&session).await?;

    assert_eq!(row_count(&database).await, 0);

    Ok(())
}

/// Tests deleting through the store.
///
/// Expected: Ok with the session no longer loadable
#[tokio::test]
async fn deletes_session() -> Result<(), session_store::Error> {
    let (store, _database) = store_with_database().await;

    let mut session = record(&[("user", json!(3))]);
    store.create(&mut session).await?;

    store.delete(&session.id).await?;

    assert!(store.load(&session.id).await?.is_none());

    Ok(())
}
