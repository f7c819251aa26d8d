//! HttpTodoService against a mock server

use serde_json::json;
use todo_core::{HttpTodoService, RemoteError, TodoService};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_todos_sends_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("_limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
            {"userId": 1, "id": 2, "title": "quis ut nam facilis", "completed": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpTodoService::new(server.uri());
    let todos = service.fetch_todos(2).await.unwrap();

    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].title, "delectus aut autem");
    assert!(todos[1].completed);
    assert!(todos.iter().all(|t| !t.optimistic));
}

#[tokio::test]
async fn test_fetch_todos_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let service = HttpTodoService::new(server.uri());
    let err = service.fetch_todos(10).await.unwrap_err();

    assert!(matches!(err, RemoteError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_fetch_todos_bad_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let service = HttpTodoService::new(server.uri());
    let err = service.fetch_todos(10).await.unwrap_err();

    assert!(matches!(err, RemoteError::Decode(_)));
}

#[tokio::test]
async fn test_add_todo_posts_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(json!({"title": "Write report", "completed": false, "userId": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 201, "title": "Write report", "completed": false, "userId": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpTodoService::new(server.uri());
    let created = service.add_todo("Write report").await.unwrap();

    assert_eq!(created.id, 201);
    assert_eq!(created.title, "Write report");
    assert!(!created.optimistic);
}

#[tokio::test]
async fn test_add_todo_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = HttpTodoService::new(server.uri());
    let err = service.add_todo("x").await.unwrap_err();

    assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    assert!(err.to_string().contains("HTTP 404"));
}
