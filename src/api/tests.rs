use super::*;
use crate::web::MockTransport;
use serde_json::json;
use tripdiary_shared::protocol::{
    AddDiaryRequest, DiaryDraft, ListDiariesRequest, LoginRequest, SpotRequest,
};
use tripdiary_shared::{ALL_USERS, UserProfile};

const BASE: &str = "http://localhost:8000";

// =========================================================
// 辅助函数
// =========================================================

fn create_client(session: SessionStore) -> ApiClient<MockTransport> {
    ApiClient::new(BASE, MockTransport::new()).with_interceptor(BearerAuth::new(session))
}

fn spot_json() -> serde_json::Value {
    json!({
        "name": "Paris",
        "description": "city of light",
        "location": "France",
        "coordinates": {"latitude": 48.85, "longitude": 2.35},
        "rating": 4.8,
        "popularity": 100,
        "tags": ["city"],
        "price_range": "$$$",
        "open_hours": {"weekday": "9-18", "weekend": "10-20"}
    })
}

// =========================================================
// Bearer 注入
// =========================================================

#[tokio::test]
async fn test_no_token_means_no_authorization_header() {
    let session = SessionStore::new();
    let client = create_client(session);
    client
        .transport()
        .mock_response(&format!("{}/spots/Paris", BASE), 200, spot_json());

    client
        .call(&SpotRequest {
            name: "Paris".to_string(),
        })
        .await
        .unwrap();

    let sent = client.transport().last_request().unwrap();
    assert_eq!(sent.header("Authorization"), None);
}

#[tokio::test]
async fn test_token_is_attached_as_bearer_header() {
    let session = SessionStore::new();
    session.set_token(Some("abc123".to_string()));
    let client = create_client(session);
    client
        .transport()
        .mock_response(&format!("{}/spots/Paris", BASE), 200, spot_json());

    client
        .call(&SpotRequest {
            name: "Paris".to_string(),
        })
        .await
        .unwrap();

    let sent = client.transport().last_request().unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer abc123"));
}

#[tokio::test]
async fn test_token_is_read_on_every_request() {
    let session = SessionStore::new();
    let client = create_client(session);
    let url = format!("{}/spots/Paris", BASE);
    client.transport().mock_response(&url, 200, spot_json());
    let req = SpotRequest {
        name: "Paris".to_string(),
    };

    client.call(&req).await.unwrap();
    session.sign_in(
        UserProfile {
            id: 1,
            username: "alice".to_string(),
            ..UserProfile::default()
        },
        Some("t1".to_string()),
    );
    client.call(&req).await.unwrap();
    session.logout();
    client.call(&req).await.unwrap();

    let requests = client.transport().requests.borrow();
    let headers: Vec<Option<&str>> = requests.iter().map(|r| r.header("Authorization")).collect();
    assert_eq!(headers, vec![None, Some("Bearer t1"), None]);
}

#[tokio::test]
async fn test_empty_token_is_treated_as_absent() {
    let session = SessionStore::new();
    session.set_token(Some(String::new()));
    let client = create_client(session);

    let req = client.build(&SpotRequest {
        name: "Paris".to_string(),
    });
    let _ = client.execute(req.unwrap()).await;

    let sent = client.transport().last_request().unwrap();
    assert!(!sent.headers.contains_key("Authorization"));
}

#[test]
fn test_bearer_auth_only_touches_authorization_header() {
    let session = SessionStore::new();
    session.set_token(Some("abc123".to_string()));

    let req = HttpRequest::new("http://x/y", tripdiary_shared::protocol::HttpMethod::Post)
        .with_header("Content-Type", "application/json")
        .with_body("{}".to_string());
    let out = BearerAuth::new(session).on_request(req.clone()).unwrap();

    assert_eq!(out.url, req.url);
    assert_eq!(out.body, req.body);
    assert_eq!(out.header("Content-Type"), Some("application/json"));
    assert_eq!(out.headers.len(), 2);
}

// =========================================================
// 错误传递
// =========================================================

#[tokio::test]
async fn test_interceptor_error_is_propagated_unchanged() {
    let client = ApiClient::new(BASE, MockTransport::new()).with_interceptor(
        |_req: HttpRequest| -> Result<HttpRequest, HttpError> {
            Err(HttpError::RequestBuild("boom".to_string()))
        },
    );

    let result = client
        .call(&SpotRequest {
            name: "Paris".to_string(),
        })
        .await;

    assert_eq!(result.unwrap_err(), HttpError::RequestBuild("boom".to_string()));
    // 请求未发出
    assert!(client.transport().requests.borrow().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_propagated_unchanged() {
    let client = create_client(SessionStore::new());
    *client.transport().fail_with.borrow_mut() =
        Some(HttpError::Network("connection refused".to_string()));

    let result = client
        .call(&SpotRequest {
            name: "Paris".to_string(),
        })
        .await;

    assert_eq!(
        result.unwrap_err(),
        HttpError::Network("connection refused".to_string())
    );
}

#[tokio::test]
async fn test_non_success_status_carries_backend_detail() {
    let client = create_client(SessionStore::new());
    client.transport().mock_response(
        &format!("{}/users/login", BASE),
        400,
        json!({"detail": "密码错误"}),
    );

    let result = client
        .call(&LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    assert_eq!(
        result.unwrap_err(),
        HttpError::Status {
            status: 400,
            detail: "密码错误".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let client = create_client(SessionStore::new());
    client
        .transport()
        .mock_response(&format!("{}/spots/Paris", BASE), 200, json!({"name": 1}));

    let result = client
        .call(&SpotRequest {
            name: "Paris".to_string(),
        })
        .await;

    assert!(matches!(result, Err(HttpError::Decode(_))));
}

// =========================================================
// 请求构建
// =========================================================

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:8000/", MockTransport::new());
    assert_eq!(client.base_url(), "http://localhost:8000");

    let req = client
        .build(&SpotRequest {
            name: "Paris".to_string(),
        })
        .unwrap();
    assert_eq!(req.url, "http://localhost:8000/spots/Paris");
}

#[test]
fn test_get_request_has_query_and_no_body() {
    let client = create_client(SessionStore::new());
    let req = client.build(&ListDiariesRequest::for_user(ALL_USERS)).unwrap();

    assert_eq!(
        req.url,
        "http://localhost:8000/diaries/__all__?sort_key=id&sort_order=desc"
    );
    assert_eq!(req.body, None);
    assert_eq!(req.header("Content-Type"), None);
}

#[test]
fn test_post_request_serializes_json_body() {
    let client = create_client(SessionStore::new());
    let req = client
        .build(&AddDiaryRequest::new(DiaryDraft {
            username: "alice".to_string(),
            title: "西湖".to_string(),
            content: "好看".to_string(),
            ..Default::default()
        }))
        .unwrap();

    assert_eq!(req.url, "http://localhost:8000/diaries");
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"username": "alice", "title": "西湖", "content": "好看"})
    );
}

#[test]
fn test_relative_base_for_proxied_client() {
    let client = ApiClient::new("/AIGen", MockTransport::new());
    let req = client
        .build(&tripdiary_shared::protocol::VideoStatusRequest::default())
        .unwrap();
    assert_eq!(req.url, "/AIGen/check_video_status");
}
