//! Client-registration ("coleta de dados") record helpers.
//!
//! The registration flow writes one document per client, keyed by the
//! identity-provider uid, with merge semantics. Email and phone must be
//! unique across clients; a match on another document id blocks the write.

use serde_json::{Map, Value};

pub const FIELD_TIPO: &str = "tipo";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_DATA_INCLUSAO: &str = "data_inclusao";
pub const FIELD_CRIADO_POR: &str = "criado_por";

pub const TIPO_CLIENTE: &str = "cliente";
pub const STATUS_INACTIVE: &str = "inactive";

/// Fields checked for cross-client uniqueness before a write.
pub const UNIQUE_FIELDS: &[&str] = &["email", "contato"];

/// Merges the fixed registration fields into a collected record.
pub fn stamp_cliente(record: &mut Map<String, Value>, criado_por: &str, data_inclusao: &str) {
    record.insert(FIELD_TIPO.into(), Value::String(TIPO_CLIENTE.into()));
    record.insert(FIELD_STATUS.into(), Value::String(STATUS_INACTIVE.into()));
    record.insert(
        FIELD_DATA_INCLUSAO.into(),
        Value::String(data_inclusao.into()),
    );
    record.insert(FIELD_CRIADO_POR.into(), Value::String(criado_por.into()));
}

/// True when a uniqueness query matched a document other than the client's
/// own — the client re-saving its own email/phone is not a conflict.
pub fn has_foreign_match<'a>(matched_ids: impl IntoIterator<Item = &'a str>, own_id: &str) -> bool {
    matched_ids.into_iter().any(|id| id != own_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamping_adds_the_fixed_fields() {
        let mut rec = Map::new();
        rec.insert("nome".into(), Value::String("Maria".into()));
        stamp_cliente(&mut rec, "maria@ex.com", "2026-02-03T10:00:00Z");
        assert_eq!(rec[FIELD_TIPO], Value::String("cliente".into()));
        assert_eq!(rec[FIELD_STATUS], Value::String("inactive".into()));
        assert_eq!(rec[FIELD_CRIADO_POR], Value::String("maria@ex.com".into()));
    }

    #[test]
    fn own_document_is_not_a_conflict() {
        assert!(!has_foreign_match(["uid-1"], "uid-1"));
        assert!(has_foreign_match(["uid-1", "uid-2"], "uid-1"));
        assert!(!has_foreign_match([], "uid-1"));
    }
}
