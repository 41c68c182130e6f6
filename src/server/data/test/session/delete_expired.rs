use super::*;

/// Tests purging expired sessions.
///
/// Verifies that only rows whose expiry has passed are removed.
///
/// Expected: Ok(2) with the live session untouched
#[tokio::test]
async fn removes_only_expired_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::session::SessionFactory::new(db).expired().build().await?;
    factory::session::SessionFactory::new(db).expired().build().await?;
    let live = factory::create_session(db).await?;

    let repo = SessionRepository::new(db);
    let removed = repo.delete_expired(Utc::now().timestamp()).await?;

    assert_eq!(removed, 2);
    assert_eq!(entity::prelude::Session::find().count(db).await?, 1);
    assert!(repo.exists(&live.id).await?);

    Ok(())
}
