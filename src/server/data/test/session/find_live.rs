use super::*;

/// Tests finding a session that has not expired.
///
/// Expected: Ok(Some) with the stored payload
#[tokio::test]
async fn returns_live_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::session::SessionFactory::new(db)
        .id("live")
        .data(json!({ "user": 7 }))
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let session = repo.find_live("live", Utc::now().timestamp()).await?;

    assert!(session.is_some());
    assert_eq!(session.unwrap().data, json!({ "user": 7 }));

    Ok(())
}

/// Tests that expired sessions are treated as absent.
///
/// Expected: Ok(None) even though the row still exists
#[tokio::test]
async fn ignores_expired_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::session::SessionFactory::new(db)
        .id("stale")
        .expired()
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let session = repo.find_live("stale", Utc::now().timestamp()).await?;

    assert!(session.is_none());
    assert!(repo.exists("stale").await?);

    Ok(())
}

/// Tests looking up an id that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SessionRepository::new(db);
    let session = repo.find_live("missing", Utc::now().timestamp()).await?;

    assert!(session.is_none());
    assert!(!repo.exists("missing").await?);

    Ok(())
}
