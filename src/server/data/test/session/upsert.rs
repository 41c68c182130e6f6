use super::*;

/// Tests inserting a new session.
///
/// Expected: Ok with the row stored and created_at equal to updated_at
#[tokio::test]
async fn inserts_new_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let expiry_date = Utc::now().timestamp() + 3600;

    let repo = SessionRepository::new(db);
    repo.upsert(UpsertSessionParam {
        id: "fresh".to_string(),
        data: json!({ "step": "welcome" }),
        expiry_date,
    })
    .await?;

    let stored = entity::prelude::Session::find_by_id("fresh".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.data, json!({ "step": "welcome" }));
    assert_eq!(stored.expiry_date, expiry_date);
    assert_eq!(stored.created_at, stored.updated_at);

    Ok(())
}

/// Tests replacing the payload of an existing session.
///
/// Verifies that a second upsert with the same id overwrites payload and expiry
/// without creating a second row or touching created_at.
///
/// Expected: Ok with one row holding the new payload
#[tokio::test]
async fn replaces_existing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::session::SessionFactory::new(db)
        .id("existing")
        .data(json!({ "step": "welcome" }))
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let new_expiry = original.expiry_date + 600;
    repo.upsert(UpsertSessionParam {
        id: "existing".to_string(),
        data: json!({ "step": "profile" }),
        expiry_date: new_expiry,
    })
    .await?;

    let stored = entity::prelude::Session::find_by_id("existing".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.data, json!({ "step": "profile" }));
    assert_eq!(stored.expiry_date, new_expiry);
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(entity::prelude::Session::find().count(db).await?, 1);

    Ok(())
}
