use std::net::TcpListener;
use std::time::Duration;

use bookshelf::api::{ApiError, Credentials, HttpLibraryClient, LibraryApi, Role};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> HttpLibraryClient {
    HttpLibraryClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn reader_json() -> serde_json::Value {
    json!({
        "card_number": 12345,
        "surname": "Иванов",
        "name": "Иван",
        "patronymic": "Иванович",
        "role": "Читатель",
        "address": "ул. Ленина, 1",
        "phone": "+7 900 000-00-00"
    })
}

/// A port nothing is listening on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_sends_card_number_and_decodes_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "card_number": 12345 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Вход выполнен",
            "user": reader_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .login(Credentials::new(12345))
        .await
        .unwrap();

    assert!(response.success);
    let user = response.user.unwrap();
    assert_eq!(user.card_number, 12345);
    assert_eq!(user.role, Role::Reader);
    assert_eq!(user.display_name(), "Иван Иванович");
}

#[tokio::test]
async fn test_login_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Читатель не найден"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        HttpLibraryClient::new(&format!("{}/", mock_server.uri()), Duration::from_secs(5))
            .unwrap();
    let response = client.login(Credentials::new(1)).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.message, "Читатель не найден");
    assert!(response.user.is_none());
}

#[tokio::test]
async fn test_login_error_status_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Неверный номер билета"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login(Credentials::new(7))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            message: Some("Неверный номер билета".to_string()),
        }
    );
}

#[tokio::test]
async fn test_login_error_status_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login(Credentials::new(7))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: None,
        }
    );
}

#[tokio::test]
async fn test_login_garbage_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login(Credentials::new(7))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { status: 200, .. }));
}

#[tokio::test]
async fn test_login_unreachable_server_is_network_error() {
    let client = HttpLibraryClient::new(&closed_port_url(), Duration::from_secs(2)).unwrap();

    let err = client.login(Credentials::new(7)).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_login_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = HttpLibraryClient::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.login(Credentials::new(7)).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

// ============================================================================
// Reader Books
// ============================================================================

#[tokio::test]
async fn test_fetch_books_decodes_wire_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/12345/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "code": "B-001",
                "author": "А.С. Пушкин",
                "name": "Евгений Онегин",
                "year_publication": 1833,
                "sign_novelty_and_annotations": "Роман в стихах"
            },
            {
                "code": "B-002",
                "author": "Л.Н. Толстой",
                "name": "Война и мир",
                "year_publication": 1869,
                "sign_novelty_and_annotations": ""
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let books = client_for(&mock_server)
        .fetch_reader_books(12345)
        .await
        .unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Евгений Онегин");
    assert_eq!(books[0].year_published, 1833);
    assert_eq!(books[0].novelty_annotation, "Роман в стихах");
    assert_eq!(books[1].code, "B-002");
}

#[tokio::test]
async fn test_fetch_books_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/12345/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let books = client_for(&mock_server)
        .fetch_reader_books(12345)
        .await
        .unwrap();

    assert!(books.is_empty());
}

#[tokio::test]
async fn test_fetch_books_not_found_uses_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/999/books"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Билет не найден" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_reader_books(999)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: Some("Билет не найден".to_string()),
        }
    );
}

#[tokio::test]
async fn test_fetch_books_validation_detail_array_is_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/1/books"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["path", "card_number"], "msg": "bad" }]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_reader_books(1)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            message: None,
        }
    );
}
