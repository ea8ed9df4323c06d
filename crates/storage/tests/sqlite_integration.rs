use flashmaster_core::model::{CardId, MasterySet};
use storage::repository::{MASTERED_IDS_KEY, MasteryRepository};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_mastery_set() {
    let repo = connect("memdb_roundtrip").await;

    let mastered = MasterySet::from_ids(vec![CardId::new("b"), CardId::new("a")]);
    repo.save_mastered(&mastered).await.unwrap();

    let loaded = repo.load_mastered().await.unwrap();
    assert_eq!(loaded, mastered);
}

#[tokio::test]
async fn sqlite_absent_key_loads_as_empty_set() {
    let repo = connect("memdb_absent").await;

    let loaded = repo.load_mastered().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn sqlite_save_replaces_previous_value() {
    let repo = connect("memdb_replace").await;

    let first = MasterySet::from_ids(vec![CardId::new("a"), CardId::new("b")]);
    repo.save_mastered(&first).await.unwrap();

    let second = MasterySet::from_ids(vec![CardId::new("c")]);
    repo.save_mastered(&second).await.unwrap();

    let loaded = repo.load_mastered().await.unwrap();
    assert_eq!(loaded, second);
}

#[tokio::test]
async fn sqlite_clear_removes_the_entry() {
    let repo = connect("memdb_clear").await;

    let mastered = MasterySet::from_ids(vec![CardId::new("a")]);
    repo.save_mastered(&mastered).await.unwrap();
    repo.clear_mastered().await.unwrap();

    let row = sqlx::query("SELECT value FROM app_state WHERE key = ?1")
        .bind(MASTERED_IDS_KEY)
        .fetch_optional(repo.pool())
        .await
        .unwrap();
    assert!(row.is_none());

    let loaded = repo.load_mastered().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn sqlite_corrupt_value_loads_as_empty_set() {
    let repo = connect("memdb_corrupt").await;

    sqlx::query("INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind(MASTERED_IDS_KEY)
        .bind("not valid json")
        .bind("2026-01-01T00:00:00Z")
        .execute(repo.pool())
        .await
        .unwrap();

    let loaded = repo.load_mastered().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_idempotent").await;
    repo.migrate().await.expect("second migrate");

    let mastered = MasterySet::from_ids(vec![CardId::new("a")]);
    repo.save_mastered(&mastered).await.unwrap();
    assert_eq!(repo.load_mastered().await.unwrap(), mastered);
}
