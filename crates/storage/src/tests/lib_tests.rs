use super::*;

#[tokio::test]
async fn save_assigns_increasing_ids_from_one() {
    let storage = Storage::new();
    let a = storage.save(ItemParams::new("testA", 10000, 10)).await;
    let b = storage.save(ItemParams::new("testB", 20000, 20)).await;
    assert_eq!(a.id, ItemId(1));
    assert_eq!(b.id, ItemId(2));

    let all = storage.find_all().await;
    assert_eq!(all, vec![a, b]);
}

#[tokio::test]
async fn find_by_id_returns_saved_record() {
    let storage = Storage::new();
    let saved = storage.save(ItemParams::new("widget", 0, -3)).await;
    let found = storage.find_by_id(saved.id).await.expect("item");
    assert_eq!(found, saved);
    assert_eq!(found.quantity, -3);
}

#[tokio::test]
async fn find_by_id_unknown_returns_none() {
    let storage = Storage::new();
    storage.save(ItemParams::new("testA", 10000, 10)).await;
    assert!(storage.find_by_id(ItemId(999)).await.is_none());
    assert!(storage.find_by_id(ItemId(0)).await.is_none());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id_and_position() {
    let storage = Storage::new();
    let a = storage.save(ItemParams::new("testA", 10000, 10)).await;
    let b = storage.save(ItemParams::new("testB", 20000, 20)).await;

    let updated = storage
        .update(a.id, ItemParams::new("testA-x", 9999, 1))
        .await
        .expect("update");
    assert_eq!(updated.id, a.id);

    let found = storage.find_by_id(a.id).await.expect("item");
    assert_eq!(found.params(), ItemParams::new("testA-x", 9999, 1));
    assert_eq!(storage.find_by_id(b.id).await.expect("item"), b);

    let all = storage.find_all().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, a.id);
    assert_eq!(all[1], b);
}

#[tokio::test]
async fn update_unknown_id_fails_without_side_effects() {
    let storage = Storage::new();
    storage.save(ItemParams::new("testA", 10000, 10)).await;
    let err = storage
        .update(ItemId(42), ItemParams::new("ghost", 1, 1))
        .await
        .expect_err("should fail");
    assert_eq!(err, StorageError::NotFound(ItemId(42)));
    assert_eq!(storage.count().await, 1);
}

#[tokio::test]
async fn ids_are_not_reused_after_updates() {
    let storage = Storage::new();
    let a = storage.save(ItemParams::new("a", 1, 1)).await;
    storage
        .update(a.id, ItemParams::new("a2", 2, 2))
        .await
        .expect("update");
    let b = storage.save(ItemParams::new("b", 1, 1)).await;
    assert_eq!(b.id, ItemId(2));
}

#[tokio::test]
async fn clones_share_records() {
    let storage = Storage::new();
    let other = storage.clone();
    let saved = storage.save(ItemParams::new("shared", 5, 5)).await;
    assert_eq!(other.find_by_id(saved.id).await, Some(saved));
}

#[tokio::test]
async fn health_check_succeeds_for_fresh_and_used_store() {
    let storage = Storage::new();
    storage.health_check().await.expect("health check");
    storage.save(ItemParams::new("a", 1, 1)).await;
    storage.health_check().await.expect("health check");
}
