use crate::shared::data::docstore;
use contracts::domain::documentos::{
    delete_field_path, partition_documentos, DocumentosPartition, FIELD_DOCUMENTOS,
};

const COLLECTION: &str = "clientes";

/// Loads the client's document map and partitions it against the required
/// list. A client without a record simply has everything pending.
pub async fn load_partition(cliente_id: &str) -> Result<DocumentosPartition, String> {
    let record = docstore::get_doc(COLLECTION, cliente_id).await?;
    let documentos = record
        .as_ref()
        .and_then(|r| r.get(FIELD_DOCUMENTOS))
        .and_then(|v| v.as_object());
    Ok(match documentos {
        Some(map) => partition_documentos(map),
        None => partition_documentos(&serde_json::Map::new()),
    })
}

/// Rejects a submitted document: removes its nested entry so it returns to
/// the pending list.
pub async fn reject_documento(cliente_id: &str, doc_name: &str) -> Result<(), String> {
    docstore::delete_field(COLLECTION, cliente_id, &delete_field_path(doc_name)).await
}
