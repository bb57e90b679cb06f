use anyhow::Result;
use products_hr::{Employee, EmployeeGateway, SeaOrmEmployeeGateway};
use sea_orm::SqlErr;
use suite_tests::{deep, ritesh, sqlite_pool};

async fn gateway() -> Result<SeaOrmEmployeeGateway> {
    Ok(SeaOrmEmployeeGateway::new(sqlite_pool().await?))
}

#[tokio::test]
async fn insert_assigns_positive_ids() -> Result<()> {
    let gw = gateway().await?;
    let first = gw.insert(ritesh()).await?;
    let second = gw.insert(deep()).await?;
    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert_eq!(first.first_name, "Ritesh");
    Ok(())
}

#[tokio::test]
async fn lookups_by_id_email_and_name() -> Result<()> {
    let gw = gateway().await?;
    let saved = gw.insert(ritesh()).await?;

    assert_eq!(gw.find_by_id(saved.id).await?, Some(saved.clone()));
    assert_eq!(gw.find_by_id(saved.id + 100).await?, None);
    assert_eq!(
        gw.find_by_email("riteshsingh893@gmail.com").await?,
        Some(saved.clone())
    );
    assert_eq!(gw.find_by_email("nobody@example.com").await?, None);
    assert_eq!(gw.find_by_name("Ritesh", "Singh").await?, vec![saved]);
    assert!(gw.find_by_name("Ritesh", "Sharma").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn find_all_is_ordered_by_id() -> Result<()> {
    let gw = gateway().await?;
    assert!(gw.find_all().await?.is_empty());
    let a = gw.insert(ritesh()).await?;
    let b = gw.insert(deep()).await?;
    assert_eq!(gw.find_all().await?, vec![a, b]);
    Ok(())
}

#[tokio::test]
async fn update_replaces_the_row() -> Result<()> {
    let gw = gateway().await?;
    let saved = gw.insert(ritesh()).await?;
    let changed = Employee {
        first_name: "Ram".into(),
        email: "rit@gmail.com".into(),
        ..saved.clone()
    };
    assert_eq!(gw.update(changed.clone()).await?, Some(changed.clone()));
    assert_eq!(gw.find_by_id(saved.id).await?, Some(changed));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_row_is_none() -> Result<()> {
    let gw = gateway().await?;
    assert_eq!(gw.update(ritesh().with_id(404)).await?, None);
    Ok(())
}

#[tokio::test]
async fn delete_is_a_no_op_for_missing_rows() -> Result<()> {
    let gw = gateway().await?;
    let saved = gw.insert(ritesh()).await?;
    gw.delete_by_id(saved.id).await?;
    gw.delete_by_id(saved.id).await?;
    assert_eq!(gw.find_by_id(saved.id).await?, None);
    Ok(())
}

#[tokio::test]
async fn unique_index_rejects_duplicate_email() -> Result<()> {
    let gw = gateway().await?;
    gw.insert(ritesh()).await?;
    let err = gw
        .insert(products_hr::NewEmployee::new(
            "Someone",
            "Else",
            "riteshsingh893@gmail.com",
        ))
        .await
        .expect_err("unique index should reject the second row");
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
    assert_eq!(gw.find_all().await?.len(), 1);
    Ok(())
}
