// tests/post_api_tests.rs

use blog_backend::{config::Config, models::post::Post, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Spawns the app on a random port against a fresh in-memory database.
/// Returns the base URL and the pool shared with the running app, so
/// tests can seed and inspect rows directly.
async fn spawn_app() -> (String, SqlitePool) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    // A single connection keeps the in-memory database alive and shared
    // between the server and the test body.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        server_port: 0,
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

async fn seed_post(pool: &SqlitePool, id: i64, title: &str, article: &str) {
    sqlx::query("INSERT INTO posts (id, title, article, created_date) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(title)
        .bind(article)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_comment(pool: &SqlitePool, id: i64, parent_comment_id: i64, nesting_level: i64, post_id: i64) {
    sqlx::query(
        "INSERT INTO comments (id, author, body, parent_comment_id, nesting_level, post_id, created_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(format!("author {}", id))
    .bind("a comment")
    .bind(parent_comment_id)
    .bind(nesting_level)
    .bind(post_id)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .unwrap();
}

async fn fetch_post(pool: &SqlitePool, id: i64) -> Option<Post> {
    sqlx::query_as::<_, Post>(
        "SELECT id, title, article, created_date, updated_date FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn get_post_returns_404_for_missing_post() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/v1/post?id=1", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_post_persists_and_is_fetchable() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/v1/post/create", address))
        .json(&serde_json::json!({
            "title": "First post",
            "article": "Hello from the other side"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);

    let fetched = client
        .get(format!("{}/api/v1/post?id=1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status().as_u16(), 200);

    let body: serde_json::Value = fetched.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "First post");
    assert_eq!(body["count_of_comments"], 0);
    assert!(body["updated_date"].is_null());
}

#[tokio::test]
async fn create_post_fails_validation() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Empty title must be rejected before anything is written
    let response = client
        .post(format!("{}/api/v1/post/create", address))
        .json(&serde_json::json!({
            "title": "",
            "article": "article"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn update_post_overwrites_fields_and_stamps_updated_date() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_post(&pool, 1, "title", "big article").await;

    let response = client
        .put(format!("{}/api/v1/post/update", address))
        .json(&serde_json::json!({
            "id": 1,
            "new_title": "Title",
            "new_article": "Big article"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 204);

    let post = fetch_post(&pool, 1).await.unwrap();
    assert_eq!(post.title, "Title");
    assert_eq!(post.article, "Big article");
    assert!(post.updated_date.is_some());
}

#[tokio::test]
async fn update_post_keeps_absent_fields() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_post(&pool, 1, "title", "big article").await;

    let response = client
        .put(format!("{}/api/v1/post/update", address))
        .json(&serde_json::json!({
            "id": 1,
            "new_title": "Renamed"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 204);

    let post = fetch_post(&pool, 1).await.unwrap();
    assert_eq!(post.title, "Renamed");
    assert_eq!(post.article, "big article");
}

#[tokio::test]
async fn update_post_returns_404_for_missing_post() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/api/v1/post/update", address))
        .json(&serde_json::json!({
            "id": 1,
            "new_title": "Title",
            "new_article": "Big article"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn remove_post_deletes_row_and_cascades_to_comments() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_post(&pool, 1, "title", "big article").await;
    seed_comment(&pool, 1, 0, 0, 1).await;
    seed_comment(&pool, 2, 1, 1, 1).await;

    let response = client
        .delete(format!("{}/api/v1/post/remove?id=1", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 204);

    let fetched = client
        .get(format!("{}/api/v1/post?id=1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status().as_u16(), 404);

    let fetched_comments = client
        .get(format!(
            "{}/api/v1/comment/fetch?post_id=1&nesting_level=0",
            address
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched_comments.status().as_u16(), 404);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn remove_post_returns_404_for_missing_post() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/api/v1/post/remove?id=1", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn get_post_counts_all_comments_including_deleted() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_post(&pool, 1, "title", "big article").await;
    seed_comment(&pool, 1, 0, 0, 1).await;
    seed_comment(&pool, 2, 1, 1, 1).await;
    seed_comment(&pool, 3, 0, 0, 1).await;

    // Soft-delete one of them; it still belongs to the collection
    let removed = client
        .delete(format!("{}/api/v1/comment/remove?id=2", address))
        .send()
        .await
        .unwrap();
    assert_eq!(removed.status().as_u16(), 204);

    let body: serde_json::Value = client
        .get(format!("{}/api/v1/post?id=1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count_of_comments"], 3);
}
