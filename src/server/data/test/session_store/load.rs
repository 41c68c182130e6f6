use super::*;

/// Tests that expired rows are not loaded.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_expired_session() -> Result<(), session_store::Error> {
    let (store, database) = store_with_database().await;

    let id = Id::default();
    factory::session::SessionFactory::new(database.connection().unwrap())
        .id(id.to_string())
        .expired()
        .build()
        .await
        .unwrap();

    assert!(store.load(&id).await?.is_none());

    Ok(())
}

/// Tests that an unknown id loads nothing.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), session_store::Error> {
    let (store, _database) = store_with_database().await;

    assert!(store.load(&Id::default()).await?.is_none());

    Ok(())
}

/// Tests that a row whose payload is not an object fails to decode.
///
/// Expected: Err(session_store::Error::Decode)
#[tokio::test]
async fn rejects_malformed_payload() {
    let (store, database) = store_with_database().await;

    let id = Id::default();
    factory::session::SessionFactory::new(database.connection().unwrap())
        .id(id.to_string())
        .data(json!(["not", "an", "object"]))
        .build()
        .await
        .unwrap();

    let result = store.load(&id).await;

    assert!(matches!(result, Err(session_store::Error::Decode(_))));
}
