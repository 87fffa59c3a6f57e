use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{Value, json};

use catalog_admin::{
    ApiError, CatalogApi, CatalogConfig, CatalogStore, RemoteCatalogClient, StoreError,
};
use catalog_products::{FilterOverrides, ProductFilter, ProductId};

const TOKEN: &str = "test-token";
const LIST_PATH: &str = "/management/product/item/list";
const STATUS_PATH: &str = "/management/product/item/changeitemstatus";
const CREATE_PATH: &str = "/management/product/item/add";

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<HashMap<String, (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Stand-in for the management API, bound to an ephemeral port.
struct MockApi {
    base_url: String,
    state: MockState,
    handle: tokio::task::JoinHandle<()>,
}

impl MockApi {
    async fn spawn(replies: &[(&str, StatusCode, &str)]) -> Self {
        let state = MockState {
            replies: Arc::new(
                replies
                    .iter()
                    .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
                    .collect(),
            ),
            requests: Arc::default(),
        };

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    fn store(&self) -> CatalogStore {
        CatalogStore::with_api(self.client())
    }

    fn client(&self) -> RemoteCatalogClient {
        let config = CatalogConfig::new(&self.base_url, TOKEN).unwrap();
        RemoteCatalogClient::new(&config)
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match state.replies.get(&path) {
        Some((status, reply)) => {
            (*status, [(header::CONTENT_TYPE, "application/json")], reply.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn page_123() -> String {
    json!({"success": true, "data": {"current_page": 1, "data": [
        {"id": "1", "name": "Kopi", "is_active": true, "price": 15000},
        {"id": "2", "name": "Teh", "is_active": true},
        {"id": "3", "name": "Susu", "is_active": true}
    ]}})
    .to_string()
}

#[tokio::test]
async fn list_sends_cursor_with_auth_and_loads_page() {
    let api = MockApi::spawn(&[(LIST_PATH, StatusCode::OK, page_123().as_str())]).await;
    let store = api.store();

    let count = store.fetch_products(FilterOverrides::new()).await.unwrap();

    assert_eq!(count, 3);
    let products = store.products().await;
    assert_eq!(products[0].name(), "Kopi");
    assert_eq!(products[0].as_json()["price"], json!(15000));

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, LIST_PATH);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        requests[0].body,
        json!({"search": "", "page_count": 10, "active": 1, "page": 1})
    );
}

#[tokio::test]
async fn bulk_status_sends_pipe_joined_ids() {
    let api = MockApi::spawn(&[
        (LIST_PATH, StatusCode::OK, page_123().as_str()),
        (STATUS_PATH, StatusCode::OK, r#"{"status":"success"}"#),
    ])
    .await;
    let store = api.store();
    store.fetch_products(FilterOverrides::new()).await.unwrap();

    let touched = store
        .bulk_update_status(&[ProductId::from("1"), ProductId::from("2")], false)
        .await
        .unwrap();

    assert_eq!(touched, 2);
    let requests = api.requests();
    let status_call = requests.iter().find(|r| r.path == STATUS_PATH).unwrap();
    assert_eq!(status_call.body, json!({"id_barang": "1|2", "status": "OFF"}));

    let flags: Vec<bool> = store.products().await.iter().map(|p| p.is_active()).collect();
    assert_eq!(flags, vec![false, false, true]);
}

#[tokio::test]
async fn single_status_stringifies_numeric_id() {
    let api = MockApi::spawn(&[(STATUS_PATH, StatusCode::OK, r#"{"success":true}"#)]).await;
    let store = api.store();

    store.update_product_status(&ProductId::from(17), true).await.unwrap();

    assert_eq!(api.requests()[0].body, json!({"id_barang": "17", "status": "ON"}));
    assert_eq!(store.error().await, None);
}

#[tokio::test]
async fn create_inserts_widget_at_front() {
    let api = MockApi::spawn(&[
        (LIST_PATH, StatusCode::OK, page_123().as_str()),
        (CREATE_PATH, StatusCode::OK, r#"{"data":{"id":"99"}}"#),
    ])
    .await;
    let store = api.store();
    store.fetch_products(FilterOverrides::new()).await.unwrap();

    let response = store.create_product(json!({"name": "Widget"})).await.unwrap();

    assert_eq!(response, json!({"data": {"id": "99"}}));
    let products = store.products().await;
    assert_eq!(products.len(), 4);
    assert_eq!(products[0].id(), Some(&ProductId::from("99")));
    assert_eq!(products[0].name(), "Widget");
    assert!(products[0].is_active());

    let create_call = api.requests().into_iter().find(|r| r.path == CREATE_PATH).unwrap();
    assert_eq!(create_call.body, json!({"name": "Widget"}));
}

#[tokio::test]
async fn non_success_status_with_json_body_is_not_a_transport_error() {
    let api = MockApi::spawn(&[
        (LIST_PATH, StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#),
        (STATUS_PATH, StatusCode::BAD_REQUEST, r#"{"success":false,"message":"Invalid id"}"#),
    ])
    .await;

    let body = api.client().list_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(body, json!({"message": "boom"}));

    let store = api.store();
    assert_eq!(store.fetch_products(FilterOverrides::new()).await.unwrap(), 0);
    assert_eq!(store.error().await, None);

    let err = store
        .update_product_status(&ProductId::from("1"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected(_)));
    assert_eq!(store.error().await.as_deref(), Some("Invalid id"));
}

#[tokio::test]
async fn non_json_body_is_a_parse_failure() {
    let api =
        MockApi::spawn(&[(STATUS_PATH, StatusCode::OK, "<html>gateway timeout</html>")]).await;
    let store = api.store();

    let err = store
        .update_product_status(&ProductId::from("1"), true)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Transport(ApiError::Parse(_))));
    assert!(store.error().await.unwrap().starts_with("parse error"));
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = CatalogConfig::new(format!("http://{}", addr), TOKEN).unwrap();
    let store = CatalogStore::with_api(RemoteCatalogClient::new(&config));

    let err = store.fetch_products(FilterOverrides::new()).await.unwrap_err();

    assert!(matches!(err, StoreError::Transport(ApiError::Network(_))));
    assert!(store.error().await.unwrap().starts_with("network error"));
    assert!(store.products().await.is_empty());
}
