//! Integration tests for paged requests.
//!
//! The mock server answers with `Link` (or `X-Next`/`X-Last`) headers that
//! point back at itself, so the iterator walks real relation URIs.

use github_api::clients::{CursorState, HttpError, PageError};
use github_api::{ClientConfig, HttpClient, PagedRequest};
use serde::Deserialize;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(ClientConfig::from_base_url(&server.uri()).unwrap()).unwrap()
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

/// Mounts three pages of two items each under `/api/v3/items`.
async fn mount_three_pages(server: &MockServer) {
    let base = format!("{}/api/v3/items", server.uri());
    let link = |next: u32| {
        format!(
            r#"<{base}?page={next}&per_page=2>; rel="next", <{base}?page=3&per_page=2>; rel="last", <{base}?page=1&per_page=2>; rel="first""#
        )
    };

    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link(2).as_str())
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link(3).as_str())
                .set_body_json(json!([{"id": 3}, {"id": 4}])),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{base}?page=2&per_page=2>; rel="prev""#).as_str(),
                )
                .set_body_json(json!([{"id": 5}])),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_iterator_follows_link_headers() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server);
    let request = PagedRequest::builder("/items").page_size(2).build().unwrap();
    let mut pages = client.page_iterator::<Item>(request);
    assert_eq!(pages.state(), CursorState::Unstarted);

    let first = pages.next_page().await.unwrap();
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(pages.state(), CursorState::HasNext);
    assert_eq!(pages.next_page_number(), Some(2));
    assert_eq!(pages.last_page_number(), Some(3));
    assert!(pages.links().first.is_some());

    let second = pages.next_page().await.unwrap();
    assert_eq!(ids(&second), vec![3, 4]);
    assert_eq!(pages.next_page_number(), Some(3));

    let third = pages.next_page().await.unwrap();
    assert_eq!(ids(&third), vec![5]);
    assert!(!pages.has_next());
    assert_eq!(pages.state(), CursorState::Exhausted);
    assert!(pages.links().prev.is_some());

    assert!(matches!(
        pages.next_page().await,
        Err(PageError::Exhausted)
    ));
}

#[tokio::test]
async fn test_get_all_concatenates_pages_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server);
    let request = PagedRequest::builder("/items").page_size(2).build().unwrap();
    let items: Vec<Item> = assert_ok!(client.get_all(request).await);
    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_single_page_is_exhausted_after_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/user/repos"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("type", "owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 9}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = PagedRequest::builder("/user/repos")
        .param("type", "owner")
        .build()
        .unwrap();
    let mut pages = client.page_iterator::<Item>(request);

    assert_eq!(ids(&pages.next_page().await.unwrap()), vec![9]);
    assert!(!pages.has_next());
    assert_eq!(pages.next_page_number(), None);
    assert_eq!(pages.last_page_number(), None);
}

#[tokio::test]
async fn test_fallback_next_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next", "/api/v3/items?page=2")
                .insert_header("X-Last", "/api/v3/items?page=2")
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pages = client.page_iterator::<Item>(PagedRequest::builder("/items").build().unwrap());

    assert_eq!(ids(&pages.next_page().await.unwrap()), vec![1]);
    assert_eq!(pages.next_page_number(), Some(2));
    assert_eq!(pages.last_page_number(), Some(2));

    assert_eq!(ids(&pages.next_page().await.unwrap()), vec![2]);
    assert!(!pages.has_next());
}

#[tokio::test]
async fn test_failed_page_leaves_cursor_unchanged() {
    let server = MockServer::start().await;
    let next = format!("<{}/api/v3/items?page=2>; rel=\"next\"", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pages = client.page_iterator::<Item>(PagedRequest::builder("/items").build().unwrap());
    pages.next_page().await.unwrap();

    let error = assert_err!(pages.next_page().await);
    assert!(matches!(error, PageError::Fetch { page: 2, .. }));
    assert!(matches!(
        error.cause(),
        Some(HttpError::Status { status: 502, .. })
    ));
    assert!(pages.has_next());
    assert_eq!(pages.state(), CursorState::HasNext);
    assert_eq!(pages.next_page_number(), Some(2));

    // Retrying fetches the same page.
    assert_eq!(ids(&pages.next_page().await.unwrap()), vec![2]);
    assert!(!pages.has_next());
}

#[tokio::test]
async fn test_get_all_returns_original_cause() {
    let server = MockServer::start().await;
    let next = format!("<{}/api/v3/items?page=2>; rel=\"next\"", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", next.as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Server Error"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = assert_err!(
        client
            .get_all::<Item>(PagedRequest::builder("/items").build().unwrap())
            .await
    );
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "500: Server Error");
}

#[tokio::test]
async fn test_resource_key_selects_wrapped_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/search/repositories"))
        .and(query_param("q", "tetris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [{"id": 3081286}, {"id": 1234}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = PagedRequest::builder("/search/repositories")
        .param("q", "tetris")
        .resource_key("items")
        .build()
        .unwrap();
    let items: Vec<Item> = client.get_all(request).await.unwrap();
    assert_eq!(ids(&items), vec![3_081_286, 1234]);
}

#[tokio::test]
async fn test_explicit_page_parameter_is_not_overwritten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/items"))
        .and(query_param("page", "5"))
        .and(query_param("per_page", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 50}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = PagedRequest::builder("/items")
        .param("page", 5)
        .param("per_page", 30)
        .build()
        .unwrap();
    let items: Vec<Item> = client.get_all(request).await.unwrap();
    assert_eq!(ids(&items), vec![50]);
}
