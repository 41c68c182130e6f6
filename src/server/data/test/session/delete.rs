use super::*;

/// Tests deleting a stored session.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_existing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::create_session(db).await?;

    let repo = SessionRepository::new(db);
    let deleted = repo.delete(&session.id).await?;

    assert!(deleted);
    assert!(!repo.exists(&session.id).await?);

    Ok(())
}

/// Tests deleting an id that was never stored.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SessionRepository::new(db);
    let deleted = repo.delete("missing").await?;

    assert!(!deleted);

    Ok(())
}
