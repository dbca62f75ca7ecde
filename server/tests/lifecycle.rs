//! Start/stop the server on a real socket and talk to it over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use todo_server::config::ServerConfig;
use todo_server::handlers::AppState;
use todo_server::repository::{MemoryRepository, Repository};
use todo_server::{build_state, router, Server};

fn any_port() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

fn empty_app(static_dir: &std::path::Path) -> axum::Router {
    router(AppState::new(Arc::new(MemoryRepository::new())), static_dir)
}

#[tokio::test]
async fn test_start_returns_root_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new(empty_app(dir.path()));

    let url = server.start(any_port()).await.unwrap();
    let addr = server.local_addr().unwrap();
    assert_eq!(url, format!("http://{}", addr));
    assert!(!url.ends_with('/'));
    assert_ne!(addr.port(), 0);

    server.stop(Duration::from_millis(100)).await;
    assert!(!server.is_running());
}

#[tokio::test]
async fn test_create_list_delete_round() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new(empty_app(dir.path()));
    let url = server.start(any_port()).await.unwrap();
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/items/new", url))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("data=%7B%22ID%22%3A%22newitem%22%2C%22Text%22%3A%22call%20mom%22%2C%22Priority%22%3A1%7D")
        .send()
        .await
        .unwrap();
    assert!(created.status().is_success());

    let body = client.get(format!("{}/items", url)).send().await.unwrap().text().await.unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["Text"], "call mom");
    assert_eq!(items[0]["Priority"], 1);

    let id = items[0]["ID"].as_str().unwrap().replace(':', "%3A");
    let deleted = client.get(format!("{}/items/{}", url, id)).send().await.unwrap();
    assert!(deleted.status().is_success());

    let body = client.get(format!("{}/items", url)).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "[]");

    server.stop(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_restart_stops_previous_instance() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new(empty_app(dir.path()));

    server.start(any_port()).await.unwrap();
    let first = server.local_addr().unwrap();
    server.start(any_port()).await.unwrap();
    let second = server.local_addr().unwrap();
    assert_ne!(first, second);

    let old = reqwest::get(format!("http://{}/items", first)).await;
    assert!(old.is_err());

    server.stop(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_stop_when_not_running_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new(empty_app(dir.path()));
    server.stop(Duration::from_millis(10)).await;
    assert!(server.local_addr().is_none());
}

#[tokio::test]
async fn test_sample_data_and_sqlite_state() {
    let memory = build_state(&ServerConfig::default()).await.unwrap();
    assert_eq!(memory.repo.list().await.unwrap().len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        storage: todo_server::config::StorageKind::Sqlite,
        persist_dir: Some(dir.path().join("nested")),
        ..ServerConfig::default()
    };
    let sqlite = build_state(&config).await.unwrap();
    assert!(sqlite.repo.list().await.unwrap().is_empty());
    assert!(config.database_path().unwrap().exists());
}

#[tokio::test]
async fn test_sqlite_ids_continue_after_stored_items() {
    use chrono::{Duration as ChronoDuration, Utc};
    use todo_server::domain::Item;
    use todo_server::repository::{SqliteRepository, DATABASE_FILE};

    let dir = tempfile::tempdir().unwrap();
    let stored_at = Utc::now() + ChronoDuration::days(1);
    {
        let repo = SqliteRepository::open(&dir.path().join(DATABASE_FILE)).unwrap();
        let item = Item::new("stored".to_string(), "from last run".to_string(), 0, stored_at);
        repo.create(&item).await.unwrap();
    }

    let config = ServerConfig {
        storage: todo_server::config::StorageKind::Sqlite,
        persist_dir: Some(dir.path().to_path_buf()),
        ..ServerConfig::default()
    };
    let state = build_state(&config).await.unwrap();
    let (created_at, _) = state.ids.next(Utc::now());
    assert!(created_at > stored_at);
}
