use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// Credentials every request must present.
pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

pub const VERSION: &str = "1.2.3";

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 2;

/// Length of the generated memo on every `/entries/` record.
pub const ENTRY_MEMO_LEN: usize = 120;

/// Body of `/garbled/`: JSON-shaped, but not valid UTF-8.
pub const GARBLED_BODY: &[u8] = b"{\"version\":\"1.\xff\"}";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub decimals: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub currency: String,
}

/// Generated ledger entry, used to serve arbitrarily large collections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub memo: String,
}

#[derive(Deserialize)]
pub struct CreateAccount {
    pub name: String,
    pub currency: String,
}

/// Paginated listing, returned unless `page_size=0` is requested.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<usize>,
    pub results: Vec<T>,
}

pub type Db = Arc<RwLock<Vec<Account>>>;

pub fn currencies() -> Vec<Currency> {
    [("USD", "US Dollar", 2), ("EUR", "Euro", 2), ("BTC", "Bitcoin", 8)]
        .into_iter()
        .map(|(code, name, decimals)| Currency {
            code: code.to_string(),
            name: name.to_string(),
            decimals,
        })
        .collect()
}

/// Rejects requests without `Authorization: Key <key>:<secret>`.
pub struct Authorized;

impl<S: Send + Sync> FromRequestParts<S> for Authorized {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let expected = format!("Key {API_KEY}:{API_SECRET}");
        match parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(value) if value == expected => Ok(Authorized),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/version/", get(version))
        .route("/currencies/", get(list_currencies))
        .route("/accounts/", get(list_accounts).post(create_account))
        .route("/accounts/{id}/", delete(delete_account))
        .route("/entries/", get(list_entries))
        .route("/broken/", get(broken))
        .route("/garbled/", get(garbled))
        .route("/failing/", get(failing).post(failing).delete(failing))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn version(_: Authorized) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "version": VERSION }))
}

async fn list_currencies(
    _: Authorized,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Currency>> {
    if query.get("universe").map(String::as_str) == Some("1") {
        Json(currencies())
    } else {
        Json(Vec::new())
    }
}

async fn list_accounts(
    _: Authorized,
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, StatusCode> {
    let accounts = db.read().await;
    let matching: Vec<Account> = accounts
        .iter()
        .filter(|a| query.get("currency").map_or(true, |c| *c == a.currency))
        .cloned()
        .collect();

    let page_size = match query.get("page_size") {
        Some(raw) => raw.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DEFAULT_PAGE_SIZE,
    };
    if page_size == 0 {
        return Ok(Json(matching).into_response());
    }

    let page = match query.get("page") {
        Some(raw) => raw.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST)?.max(1),
        None => 1,
    };
    let count = matching.len();
    let results: Vec<Account> = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    let next = (page * page_size < count).then_some(page + 1);
    Ok(Json(Page { count, next, results }).into_response())
}

async fn create_account(
    _: Authorized,
    State(db): State<Db>,
    Json(input): Json<CreateAccount>,
) -> (StatusCode, Json<Account>) {
    let account = Account {
        id: Uuid::new_v4(),
        name: input.name,
        currency: input.currency,
    };
    debug!(id = %account.id, "account created");
    db.write().await.push(account.clone());
    (StatusCode::CREATED, Json(account))
}

async fn delete_account(
    _: Authorized,
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    let mut accounts = db.write().await;
    let before = accounts.len();
    accounts.retain(|a| a.id != id);
    if accounts.len() == before {
        return StatusCode::NOT_FOUND;
    }
    debug!(%id, "account deleted");
    StatusCode::NO_CONTENT
}

/// `count` entries, unpaginated only. Anything but `page_size=0` is a 400.
async fn list_entries(
    _: Authorized,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Entry>>, StatusCode> {
    if query.get("page_size").map(String::as_str) != Some("0") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let count = match query.get("count") {
        Some(raw) => raw.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => 0,
    };
    let memo = "m".repeat(ENTRY_MEMO_LEN);
    let entries = (0..count)
        .map(|n| Entry {
            id: format!("entry-{n:07}"),
            memo: memo.clone(),
        })
        .collect();
    Ok(Json(entries))
}

async fn garbled(_: Authorized) -> (StatusCode, &'static [u8]) {
    (StatusCode::OK, GARBLED_BODY)
}

async fn broken(_: Authorized) -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>definitely not json</html>")
}

async fn failing(_: Authorized) -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}
