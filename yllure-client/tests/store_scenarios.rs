// yllure-client/tests/store_scenarios.rs
// Store 行为测试: 过滤、心愿单持久化、会话生命周期

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use yllure_client::storage::{
    AUTH_TOKEN_KEY, StorageError, StorageResult, USER_STORAGE_KEY, WISHLIST_STORAGE_KEY,
};
use yllure_client::{
    ApiRequest, ApiResponse, ApiService, AppContext, AuthMode, CatalogStore, ClientConfig,
    ClientError, ClientResult, Dress, DressFilters, FallbackClient, FileStore, KeyValueStore,
    MemoryStore, MockClient, RemoteClient, SessionState, Size, UserStore, WishlistStore,
};

fn dress(id: &str, name: &str, size: Size, available: bool) -> Dress {
    let now = Utc::now();
    Dress {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} for rent", name),
        price: Decimal::from(100),
        size,
        available,
        front_image: "https://cdn.example.com/f.jpg".to_string(),
        back_image: "https://cdn.example.com/b.jpg".to_string(),
        featured: false,
        created_at: now,
        updated_at: now,
    }
}

fn mock_api(dresses: Vec<Dress>) -> Arc<ApiService> {
    let mock = MockClient::new()
        .with_dresses(dresses)
        .with_latency(Duration::ZERO);
    Arc::new(ApiService::new(Arc::new(mock)))
}

/// Counts calls and always fails
#[derive(Default)]
struct DownBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteClient for DownBackend {
    async fn send(&self, _request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::Status {
            status: 502,
            body: "bad gateway".into(),
        })
    }
}

/// Serves the same dress under a new name after the first call
#[derive(Default)]
struct Renaming {
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteClient for Renaming {
    async fn send(&self, _request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        let name = match self.calls.fetch_add(1, Ordering::SeqCst) {
            0 => "Original Name",
            _ => "Renamed",
        };
        let items = vec![dress("1", name, Size::M, true)];
        Ok(ApiResponse::ok(serde_json::to_value(items)?))
    }
}

/// Well-formed envelope, payload of the wrong shape
struct WrongShape;

#[async_trait]
impl RemoteClient for WrongShape {
    async fn send(&self, _request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        Ok(ApiResponse::ok(serde_json::json!([{ "id": 1 }])))
    }
}

/// Reads work, writes fail
struct BrokenDisk;

#[async_trait]
impl KeyValueStore for BrokenDisk {
    async fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }
    async fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk full".into()))
    }
    async fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk full".into()))
    }
}

// ========== Catalog ==========

#[tokio::test]
async fn test_available_filter_scenario() {
    let catalog = CatalogStore::new(mock_api(vec![
        dress("a", "Satin Slip", Size::M, true),
        dress("b", "Lace Sheath", Size::S, true),
        dress("c", "Tulle Ballgown", Size::L, false),
    ]));
    catalog.fetch_all().await;

    catalog.apply_filters(&DressFilters::new().with_available(true));

    let ids: Vec<_> = catalog.filtered_items().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_search_gown_scenario() {
    let catalog = CatalogStore::new(mock_api(vec![
        dress("1", "Elegant Evening Gown", Size::M, true),
        dress("2", "Classic Cocktail Dress", Size::S, true),
    ]));
    catalog.fetch_all().await;

    catalog.search("gown").await;

    let names: Vec<_> = catalog.filtered_items().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Elegant Evening Gown"]);
}

#[tokio::test]
async fn test_empty_filters_is_identity() {
    let catalog = CatalogStore::new(mock_api(vec![
        dress("x", "Zebra Print", Size::Xl, false),
        dress("y", "Yellow Sundress", Size::Xs, true),
    ]));
    catalog.fetch_all().await;

    catalog.apply_filters(&DressFilters::default());

    assert_eq!(catalog.filtered_items(), catalog.items());
}

#[tokio::test]
async fn test_backend_down_yields_empty_catalog_without_fallback() {
    let backend = Arc::new(DownBackend::default());
    let catalog = CatalogStore::new(Arc::new(ApiService::new(backend.clone())));

    catalog.fetch_all().await;
    catalog.search("gown").await;

    assert!(catalog.items().is_empty());
    assert!(catalog.filtered_items().is_empty());
    assert!(!catalog.is_loading());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_wrong_payload_shape_serves_mock_catalog() {
    let mock = Arc::new(MockClient::new().with_latency(Duration::ZERO));
    let client = Arc::new(FallbackClient::new(Arc::new(WrongShape), mock));
    let catalog = CatalogStore::new(Arc::new(ApiService::new(client)));

    catalog.fetch_all().await;

    assert_eq!(catalog.items().len(), 3);
    assert_eq!(catalog.filtered_items().len(), 3);
}

#[tokio::test]
async fn test_filters_never_touch_network() {
    let backend = Arc::new(DownBackend::default());
    let catalog = CatalogStore::new(Arc::new(ApiService::new(backend.clone())));

    catalog.apply_filters(&DressFilters::new().with_size(Size::M).with_search("silk"));
    catalog.reset_filters();

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

// ========== Wishlist ==========

#[tokio::test]
async fn test_add_twice_is_idempotent() {
    let storage = Arc::new(MemoryStore::new());
    let wishlist = WishlistStore::new(storage.clone());
    let item = dress("1", "Elegant Evening Gown", Size::M, true);

    assert!(wishlist.add(item.clone()).await);
    let after_first = storage.snapshot(WISHLIST_STORAGE_KEY);

    assert!(!wishlist.add(item).await);
    assert_eq!(wishlist.len(), 1);
    assert_eq!(storage.snapshot(WISHLIST_STORAGE_KEY), after_first);
}

#[tokio::test]
async fn test_add_then_remove_round_trip() {
    let storage = Arc::new(MemoryStore::new());
    let wishlist = WishlistStore::new(storage.clone());
    wishlist.add(dress("keep", "Keeper", Size::S, true)).await;
    let before = wishlist.items();

    wishlist.add(dress("tmp", "Temporary", Size::L, true)).await;
    assert!(wishlist.contains("tmp"));
    assert!(wishlist.remove("tmp").await);

    assert_eq!(wishlist.items(), before);
    let persisted: Vec<Dress> =
        serde_json::from_str(&storage.snapshot(WISHLIST_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(persisted, before);
}

#[tokio::test]
async fn test_storage_failure_does_not_block_mutation() {
    let wishlist = WishlistStore::new(Arc::new(BrokenDisk));

    assert!(wishlist.add(dress("1", "Gown", Size::M, true)).await);
    assert!(wishlist.contains("1"));

    wishlist.clear().await;
    assert!(!wishlist.contains("1"));
}

#[tokio::test]
async fn test_wishlist_copies_survive_catalog_refresh() {
    let backend = Arc::new(Renaming::default());
    let catalog = CatalogStore::new(Arc::new(ApiService::new(backend.clone())));
    let wishlist = WishlistStore::new(Arc::new(MemoryStore::new()));

    catalog.fetch_all().await;
    assert_eq!(catalog.items()[0].name, "Original Name");
    wishlist.add(catalog.items()[0].clone()).await;

    catalog.fetch_all().await;

    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    assert_eq!(catalog.items()[0].name, "Renamed");
    assert_eq!(wishlist.items()[0].name, "Original Name");
}

#[tokio::test]
async fn test_concurrent_adds_all_persist() {
    let storage = Arc::new(MemoryStore::new());
    let wishlist = Arc::new(WishlistStore::new(storage.clone()));

    let mut handles = Vec::new();
    for i in 0..10 {
        let wishlist = wishlist.clone();
        handles.push(tokio::spawn(async move {
            wishlist.add(dress(&i.to_string(), "Dress", Size::M, true)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let persisted: Vec<Dress> =
        serde_json::from_str(&storage.snapshot(WISHLIST_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 10);
}

// ========== Session ==========

#[tokio::test]
async fn test_empty_credentials_never_call_backend() {
    let backend = Arc::new(DownBackend::default());
    let api = Arc::new(ApiService::new(backend.clone()));
    let user = UserStore::new(api, Arc::new(MemoryStore::new()), AuthMode::Remote);

    assert!(!user.login("", "pw").await);
    assert!(!user.login("a@example.com", "").await);

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(!user.error().unwrap().is_empty());
}

#[tokio::test]
async fn test_remote_login_failure_sets_error() {
    let api = Arc::new(ApiService::new(Arc::new(DownBackend::default())));
    let user = UserStore::new(api, Arc::new(MemoryStore::new()), AuthMode::Remote);

    assert!(!user.login("a@example.com", "pw").await);

    assert_eq!(user.state(), SessionState::Errored);
    assert!(!user.is_authenticated());
    assert!(user.error().is_some());
}

#[tokio::test]
async fn test_logout_clears_even_when_remote_fails() {
    let storage = Arc::new(MemoryStore::new());
    let backend = Arc::new(DownBackend::default());
    let user = UserStore::new(
        Arc::new(ApiService::new(backend.clone())),
        storage.clone(),
        AuthMode::Remote,
    );

    storage
        .set_item(USER_STORAGE_KEY, &serde_json::json!({
            "id": "1",
            "name": "User",
            "email": "a@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }).to_string())
        .await
        .unwrap();
    storage.set_item(AUTH_TOKEN_KEY, "\"tok\"").await.unwrap();
    user.load_session().await;
    assert!(user.is_authenticated());

    user.logout().await;

    assert!(backend.calls.load(Ordering::SeqCst) >= 2);
    assert!(!user.is_authenticated());
    assert_eq!(user.state(), SessionState::Anonymous);
    assert!(storage.snapshot(USER_STORAGE_KEY).is_none());
    assert!(storage.snapshot(AUTH_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_failed_login_leaves_no_session_after_restart() {
    let storage = Arc::new(MemoryStore::new());
    let user = UserStore::new(mock_api(Vec::new()), storage.clone(), AuthMode::Demo);
    assert!(user.login("old@example.com", "pw").await);
    assert!(!user.login("new@example.com", " ").await);

    let restarted = UserStore::new(mock_api(Vec::new()), storage, AuthMode::Demo);
    restarted.load_session().await;

    assert!(restarted.user().is_none());
    assert_eq!(restarted.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_logout_survives_storage_failure() {
    let user = UserStore::new(mock_api(Vec::new()), Arc::new(BrokenDisk), AuthMode::Demo);
    assert!(user.login("a@example.com", "pw").await);

    user.logout().await;

    assert!(!user.is_authenticated());
}

// ========== App context ==========

#[tokio::test]
async fn test_restore_from_disk_after_restart() {
    let temp_dir = TempDir::new().unwrap();
    let config = ClientConfig::new("http://127.0.0.1:1")
        .with_force_mock(true)
        .with_mock_latency(0);

    {
        let app = AppContext::new(config.clone(), Arc::new(FileStore::new(temp_dir.path()))).unwrap();
        app.catalog.fetch_all().await;
        assert!(app.user.login("ana@example.com", "pw").await);
        app.wishlist.add(app.catalog.items()[0].clone()).await;
        assert!(app.profile_photo.save("file:///ana.jpg").await);
    }

    let app = AppContext::new(config, Arc::new(FileStore::new(temp_dir.path()))).unwrap();
    assert_eq!(app.user.state(), SessionState::Anonymous);

    app.restore().await;

    assert_eq!(app.user.user().unwrap().email, "ana@example.com");
    assert!(app.wishlist.contains("1"));
    assert_eq!(app.profile_photo.photo().as_deref(), Some("file:///ana.jpg"));
}
