//! Thin client for the platform's remote document store.
//!
//! Documents are flat JSON objects addressed by collection and id. The
//! session token, when present, rides along as a bearer header; access
//! control itself is the platform's concern.

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;
use gloo_net::http::{Request, RequestBuilder};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct QueryHit {
    pub id: String,
    pub data: Map<String, Value>,
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_session_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn doc_url(collection: &str, id: &str) -> String {
    api_url(&format!("/api/store/{collection}/{id}"))
}

/// Fetches one document. A missing document is `Ok(None)`, not an error.
pub async fn get_doc(collection: &str, id: &str) -> Result<Option<Map<String, Value>>, String> {
    let response = with_auth(Request::get(&doc_url(collection, id)))
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Map<String, Value>>()
        .await
        .map(Some)
        .map_err(|e| format!("Failed to parse response: {e}"))
}

/// Creates or fully replaces a document.
pub async fn put_doc(collection: &str, id: &str, data: &Map<String, Value>) -> Result<(), String> {
    let response = with_auth(Request::put(&doc_url(collection, id)))
        .json(data)
        .map_err(|e| format!("Failed to serialize request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Merges fields into an existing document, leaving unlisted fields alone.
pub async fn patch_doc(collection: &str, id: &str, data: &Map<String, Value>) -> Result<(), String> {
    let response = with_auth(Request::patch(&doc_url(collection, id)))
        .json(data)
        .map_err(|e| format!("Failed to serialize request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Removes a single (possibly nested, dot-separated) field from a document.
pub async fn delete_field(collection: &str, id: &str, field_path: &str) -> Result<(), String> {
    let url = api_url(&format!(
        "/api/store/{collection}/{id}/fields/{}",
        urlencoding::encode(field_path)
    ));
    let response = with_auth(Request::delete(&url))
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Finds documents whose `field` equals `value`.
pub async fn query_eq(collection: &str, field: &str, value: &str) -> Result<Vec<QueryHit>, String> {
    let url = api_url(&format!(
        "/api/store/{collection}?field={}&value={}",
        urlencoding::encode(field),
        urlencoding::encode(value)
    ));
    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<QueryHit>>()
        .await
        .map_err(|e| format!("Failed to parse response: {e}"))
}
