use crate::shared::data::docstore;
use contracts::domain::custeio::record::new_record_id;
use serde_json::{Map, Value};

const COLLECTION: &str = "custeio";

/// Fetches a previously submitted application by id.
pub async fn load_record(id: &str) -> Result<Option<Map<String, Value>>, String> {
    docstore::get_doc(COLLECTION, id).await
}

/// Creates a new application or updates the existing one, mutually
/// exclusively. Returns the record id either way.
pub async fn submit_record(
    record: Map<String, Value>,
    existing_id: Option<&str>,
) -> Result<String, String> {
    match existing_id {
        Some(id) => {
            docstore::patch_doc(COLLECTION, id, &record).await?;
            Ok(id.to_string())
        }
        None => {
            let id = new_record_id();
            docstore::put_doc(COLLECTION, &id, &record).await?;
            Ok(id)
        }
    }
}
