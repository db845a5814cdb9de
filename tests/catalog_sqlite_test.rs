/// SQLite catalog tests against a temporary database file

use pictureframe::catalog::{CatalogAccessor, CatalogError, SqliteCatalog};
use pictureframe::slideshow::RotationState;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::path::Path;

async fn create_catalog(path: &Path, rows: &[(i64, &str, &str)]) {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE images (name TEXT, path TEXT, http TEXT, idx INTEGER PRIMARY KEY, orientation TEXT, ext TEXT)",
    )
    .execute(&mut conn)
    .await
    .unwrap();

    for (idx, name, orientation) in rows {
        sqlx::query(
            "INSERT INTO images (name, path, http, idx, orientation, ext) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(*name)
        .bind(format!("/photos/{}", name))
        .bind(format!("http://frame.local/static/{}", name))
        .bind(*idx)
        .bind(*orientation)
        .bind("jpg")
        .execute(&mut conn)
        .await
        .unwrap();
    }

    conn.close().await.unwrap();
}

#[tokio::test]
async fn test_count_and_indices() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("imagesDB");
    create_catalog(
        &db,
        &[(9, "c.jpg", "landscape"), (3, "a.jpg", "portrait"), (7, "b.jpg", "landscape")],
    )
    .await;

    let catalog = SqliteCatalog::new(&db, "/static");
    assert_eq!(catalog.count_records().await.unwrap(), 3);
    assert_eq!(catalog.list_valid_indices().await.unwrap(), vec![3, 7, 9]);
}

#[tokio::test]
async fn test_get_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("imagesDB");
    create_catalog(&db, &[(3, "a.jpg", "portrait")]).await;

    let catalog = SqliteCatalog::new(&db, "/static/");
    let record = catalog.get_record(3).await.unwrap();
    assert_eq!(record.idx, 3);
    assert_eq!(record.name, "a.jpg");
    assert_eq!(record.path, "/static/a.jpg");
    assert_eq!(record.http, "http://frame.local/static/a.jpg");
    assert_eq!(record.orientation, "portrait");
    assert_eq!(record.ext, "jpg");
}

#[tokio::test]
async fn test_missing_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("imagesDB");
    create_catalog(&db, &[(3, "a.jpg", "portrait")]).await;

    let catalog = SqliteCatalog::new(&db, "/static");
    match catalog.get_record(4).await {
        Err(CatalogError::NotFound(4)) => {}
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = SqliteCatalog::new(dir.path().join("absent.db"), "/static");

    match catalog.count_records().await {
        Err(CatalogError::Open(_)) => {}
        other => panic!("expected open error, got {:?}", other),
    }

    // an unreadable catalog still yields a usable, empty rotation
    let rotation = RotationState::load(&catalog).await;
    assert!(rotation.is_empty());
    assert_eq!(rotation.current_index(), None);
}

#[tokio::test]
async fn test_rotation_over_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("imagesDB");
    create_catalog(
        &db,
        &[(3, "a.jpg", "portrait"), (7, "b.jpg", "landscape"), (9, "c.jpg", "landscape")],
    )
    .await;

    let catalog = SqliteCatalog::new(&db, "/static");
    let rotation = RotationState::load(&catalog).await;
    assert_eq!(rotation.current_index(), Some(3));

    let mut names = Vec::new();
    for _ in 0..3 {
        let step = rotation.advance().unwrap();
        names.push(catalog.get_record(step.index).await.unwrap().name);
    }
    assert_eq!(names, vec!["b.jpg", "c.jpg", "a.jpg"]);
}
