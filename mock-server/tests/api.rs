use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Account, Currency, Page, API_KEY, API_SECRET};
use tower::ServiceExt;

fn authorization() -> String {
    format!("Key {API_KEY}:{API_SECRET}")
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, authorization())
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, authorization())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_authorization_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/version/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_secret_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/version/")
                .header(http::header::AUTHORIZATION, format!("Key {API_KEY}:nope"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- version / currencies ---

#[tokio::test]
async fn version_reports_fixed_string() {
    let resp = app().oneshot(get("/version/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["version"], "1.2.3");
}

#[tokio::test]
async fn currencies_require_universe_flag() {
    let resp = app().oneshot(get("/currencies/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let none: Vec<Currency> = body_json(resp).await;
    assert!(none.is_empty());

    let resp = app().oneshot(get("/currencies/?universe=1")).await.unwrap();
    let all: Vec<Currency> = body_json(resp).await;
    assert_eq!(all, mock_server::currencies());
}

// --- accounts ---

#[tokio::test]
async fn create_account_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/accounts/",
            r#"{"name":"Savings","currency":"EUR"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let account: Account = body_json(resp).await;
    assert_eq!(account.name, "Savings");
    assert_eq!(account.currency, "EUR");
}

#[tokio::test]
async fn create_account_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/accounts/", r#"{"name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_unknown_account_returns_404() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/accounts/00000000-0000-0000-0000-000000000000/")
                .header(http::header::AUTHORIZATION, authorization())
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_page_size_returns_400() {
    let resp = app().oneshot(get("/accounts/?page_size=all")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failing_route_returns_500() {
    let resp = app().oneshot(get("/failing/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_bytes(resp).await, "upstream exploded");
}

// --- pagination vs. unpaginated listing ---

#[tokio::test]
async fn accounts_paginate_unless_page_size_is_zero() {
    use tower::Service;

    let mut app = app().into_service();

    for (name, currency) in [("A", "USD"), ("B", "EUR"), ("C", "USD")] {
        let body = format!(r#"{{"name":"{name}","currency":"{currency}"}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/accounts/", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // default listing is paginated
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/accounts/"))
        .await
        .unwrap();
    let page: Page<Account> = body_json(resp).await;
    assert_eq!(page.count, 3);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.next, Some(2));

    // second page holds the remainder
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/accounts/?page=2"))
        .await
        .unwrap();
    let page: Page<Account> = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "C");
    assert_eq!(page.next, None);

    // page_size=0 returns everything as a bare array, in creation order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/accounts/?page_size=0"))
        .await
        .unwrap();
    let all: Vec<Account> = body_json(resp).await;
    let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);

    // filters apply to the unpaginated listing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/accounts/?currency=USD&page_size=0"))
        .await
        .unwrap();
    let usd: Vec<Account> = body_json(resp).await;
    assert_eq!(usd.len(), 2);

    // delete one, then it is gone
    let id = all[1].id;
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/accounts/{id}/"))
                .header(http::header::AUTHORIZATION, authorization())
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/accounts/?page_size=0"))
        .await
        .unwrap();
    let remaining: Vec<Account> = body_json(resp).await;
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|a| a.id != id));
}

// --- bulk and malformed bodies ---

#[tokio::test]
async fn entries_require_unpaginated_listing() {
    let resp = app().oneshot(get("/entries/?count=3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(get("/entries/?count=3&page_size=0"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Vec<mock_server::Entry> = body_json(resp).await;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].id, "entry-0000002");
    assert_eq!(entries[0].memo.len(), mock_server::ENTRY_MEMO_LEN);
}

#[tokio::test]
async fn garbled_body_is_not_utf8() {
    let resp = app().oneshot(get("/garbled/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body, mock_server::GARBLED_BODY);
    assert!(std::str::from_utf8(&body).is_err());
}
