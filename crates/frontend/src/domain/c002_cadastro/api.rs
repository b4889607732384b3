use crate::shared::data::docstore;
use contracts::domain::cadastro::{has_foreign_match, UNIQUE_FIELDS};
use serde_json::{Map, Value};

const COLLECTION: &str = "clientes";

/// Fetches the client record for a uid, if one was saved before.
pub async fn load_cliente(uid: &str) -> Result<Option<Map<String, Value>>, String> {
    docstore::get_doc(COLLECTION, uid).await
}

/// Writes the client record with merge semantics — fields absent from this
/// save (like the documents map) stay untouched.
pub async fn save_cliente(uid: &str, record: &Map<String, Value>) -> Result<(), String> {
    docstore::patch_doc(COLLECTION, uid, record).await
}

/// Checks the unique fields against other client records. Returns the first
/// field owned by a different document, or `None` when the write may
/// proceed.
pub async fn find_conflicting_field(
    record: &Map<String, Value>,
    own_uid: &str,
) -> Result<Option<&'static str>, String> {
    for &field in UNIQUE_FIELDS {
        let Some(value) = record
            .get(field)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
        else {
            continue;
        };
        let hits = docstore::query_eq(COLLECTION, field, value).await?;
        if has_foreign_match(hits.iter().map(|hit| hit.id.as_str()), own_uid) {
            return Ok(Some(field));
        }
    }
    Ok(None)
}
