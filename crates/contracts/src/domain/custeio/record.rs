//! Flat remote-record layout and the reconciliation logic around it.
//!
//! A stored record is one flat field-name → value map covering every
//! section, the selection lists, and a fixed set of workflow fields. Saving
//! flattens the wizard state into that shape; loading partitions it back
//! into per-section snapshots. Old records may lack the explicit selection
//! lists, in which case annual cultures are inferred from the
//! `_cultura_anual_` marker in field names, in first-seen stored order
//! (`serde_json` runs with `preserve_order`, so stored order is iteration
//! order).

use serde_json::{Map, Value};

use super::forms::{CultureKind, FieldValue, FormSnapshot};
use super::schema::ANNUAL_CULTURE_MARKER;
use super::selection::SelectionList;

pub const FIELD_STATUS: &str = "status";
pub const FIELD_STATUS_DOCUMENTACAO: &str = "status_documentacao";
pub const FIELD_STATUS_SOLICITACAO: &str = "status_solicitacao";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_CLIENTE_ID: &str = "cliente_id";
pub const FIELD_ADDED_BY: &str = "addedBy";

pub const FIELD_SELECAO_ANUAIS: &str = "selecao_culturas_anuais";
pub const FIELD_SELECAO_PERENES: &str = "selecao_culturas_perenes";

pub const STATUS_INACTIVE: &str = "inactive";
pub const STATUS_DOC_PENDENTE: &str = "pendente";
pub const STATUS_SOLICITACAO_AGUARDANDO: &str = "aguardando";

const WORKFLOW_FIELDS: &[&str] = &[
    FIELD_STATUS,
    FIELD_STATUS_DOCUMENTACAO,
    FIELD_STATUS_SOLICITACAO,
    FIELD_CREATED_AT,
    FIELD_CLIENTE_ID,
    FIELD_ADDED_BY,
];

/// Fresh document id for a first submit. Ids are minted client-side, the
/// way the store SDK does, so a retry after a failed write reuses the id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Authorship metadata merged into every submitted record.
#[derive(Debug, Clone)]
pub struct WorkflowStamp {
    pub cliente_id: String,
    pub added_by: String,
    pub created_at: String,
}

pub fn field_to_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Flag(b) => Value::Bool(*b),
        FieldValue::Text(s) => Value::String(s.clone()),
    }
}

/// Scalar conversion back from a stored value. Numbers come back as text,
/// the shape a form control reports. Arrays and objects have no field
/// counterpart and are skipped by callers.
pub fn value_to_field(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Bool(b) => Some(FieldValue::Flag(*b)),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Number(n) => Some(FieldValue::Text(n.to_string())),
        _ => None,
    }
}

/// Copies a snapshot's fields into the flat record, overwriting collisions.
pub fn snapshot_into_record(record: &mut Map<String, Value>, snapshot: &FormSnapshot) {
    for (name, value) in snapshot {
        record.insert(name.clone(), field_to_value(value));
    }
}

/// Writes both selection lists as explicit array fields.
pub fn attach_selections(
    record: &mut Map<String, Value>,
    annual: &SelectionList,
    perennial: &SelectionList,
) {
    let as_array = |list: &SelectionList| {
        Value::Array(list.iter().map(|n| Value::String(n.to_string())).collect())
    };
    record.insert(FIELD_SELECAO_ANUAIS.to_string(), as_array(annual));
    record.insert(FIELD_SELECAO_PERENES.to_string(), as_array(perennial));
}

/// Merges the fixed workflow fields into a record about to be submitted.
pub fn stamp_record(record: &mut Map<String, Value>, stamp: &WorkflowStamp) {
    record.insert(FIELD_STATUS.into(), Value::String(STATUS_INACTIVE.into()));
    record.insert(
        FIELD_STATUS_DOCUMENTACAO.into(),
        Value::String(STATUS_DOC_PENDENTE.into()),
    );
    record.insert(
        FIELD_STATUS_SOLICITACAO.into(),
        Value::String(STATUS_SOLICITACAO_AGUARDANDO.into()),
    );
    record.insert(FIELD_CREATED_AT.into(), Value::String(stamp.created_at.clone()));
    record.insert(FIELD_CLIENTE_ID.into(), Value::String(stamp.cliente_id.clone()));
    record.insert(FIELD_ADDED_BY.into(), Value::String(stamp.added_by.clone()));
}

/// A loaded record split back into restorable pieces.
#[derive(Debug, Clone, Default)]
pub struct PartitionedRecord {
    /// Fields belonging to the top-level form (everything that is not a
    /// culture field, a selection list, or workflow metadata).
    pub plain: FormSnapshot,
    pub annual_selection: SelectionList,
    pub perennial_selection: SelectionList,
    /// Per-culture snapshots in selection-list order, annual first.
    pub cultures: Vec<(CultureKind, String, FormSnapshot)>,
}

/// Recovers the annual selection from field names when no explicit list was
/// stored: every field carrying the marker names its culture as the prefix,
/// first key seen wins the position.
pub fn infer_annual_cultures(record: &Map<String, Value>) -> SelectionList {
    let mut list = SelectionList::new();
    for key in record.keys() {
        if let Some(pos) = key.find(ANNUAL_CULTURE_MARKER) {
            if pos > 0 {
                list.push(&key[..pos]);
            }
        }
    }
    list
}

fn explicit_selection(record: &Map<String, Value>, field: &str) -> Option<SelectionList> {
    let names = record.get(field)?.as_array()?;
    Some(SelectionList::from_names(
        names.iter().filter_map(|v| v.as_str()),
    ))
}

/// True when `key` is `<culture>_<suffix>` for this culture. The underscore
/// check keeps "Café" from claiming "Café Arábica_municipio".
fn belongs_to(key: &str, culture: &str) -> bool {
    key.strip_prefix(culture)
        .is_some_and(|rest| rest.starts_with('_'))
}

/// Splits a loaded record into the top-level snapshot, the selection lists,
/// and one snapshot per listed culture. Explicit selection lists win;
/// the annual list falls back to marker inference for old records.
pub fn partition_record(record: &Map<String, Value>) -> PartitionedRecord {
    let annual_selection = explicit_selection(record, FIELD_SELECAO_ANUAIS)
        .unwrap_or_else(|| infer_annual_cultures(record));
    let perennial_selection =
        explicit_selection(record, FIELD_SELECAO_PERENES).unwrap_or_default();

    let mut cultures: Vec<(CultureKind, String, FormSnapshot)> = annual_selection
        .iter()
        .map(|name| (CultureKind::Annual, name.to_string(), FormSnapshot::new()))
        .chain(
            perennial_selection
                .iter()
                .map(|name| (CultureKind::Perennial, name.to_string(), FormSnapshot::new())),
        )
        .collect();

    let mut plain = FormSnapshot::new();
    for (key, value) in record {
        if WORKFLOW_FIELDS.contains(&key.as_str())
            || key == FIELD_SELECAO_ANUAIS
            || key == FIELD_SELECAO_PERENES
        {
            continue;
        }
        let Some(field) = value_to_field(value) else {
            continue;
        };
        // Longest matching culture prefix claims the field.
        let mut owner: Option<&mut FormSnapshot> = None;
        let mut owner_len = 0;
        for (_, name, snapshot) in cultures.iter_mut() {
            if belongs_to(key, name) && name.len() > owner_len {
                owner_len = name.len();
                owner = Some(snapshot);
            }
        }
        if let Some(snapshot) = owner {
            snapshot.insert(key.clone(), field);
            continue;
        }
        plain.insert(key.clone(), field);
    }

    PartitionedRecord {
        plain,
        annual_selection,
        perennial_selection,
        cultures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn infers_annual_cultures_in_first_seen_order() {
        let rec = record(&[
            ("nome", Value::String("Produtor".into())),
            ("Milho_cultura_anual_area_plantio", Value::String("80".into())),
            ("Trigo_cultura_anual_area_plantio", Value::String("40".into())),
            ("Milho_cultura_anual_municipio", Value::String("Cascavel".into())),
        ]);
        let list = infer_annual_cultures(&rec);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Milho", "Trigo"]);
    }

    #[test]
    fn explicit_selection_wins_over_inference() {
        let rec = record(&[
            (
                FIELD_SELECAO_ANUAIS,
                Value::Array(vec![Value::String("Soja".into())]),
            ),
            ("Milho_cultura_anual_area_plantio", Value::String("80".into())),
        ]);
        let part = partition_record(&rec);
        assert_eq!(part.annual_selection.iter().collect::<Vec<_>>(), vec!["Soja"]);
        // The orphaned Milho field has no listed culture, so it stays plain.
        assert!(part.plain.contains_key("Milho_cultura_anual_area_plantio"));
    }

    #[test]
    fn partitions_culture_fields_including_legacy_history_names() {
        let rec = record(&[
            ("propriedade_nome", Value::String("Fazenda Santa Fé".into())),
            ("Soja_cultura_anual_area_plantio", Value::String("120".into())),
            ("Soja_hist_3anos_ha", Value::String("100".into())),
            ("num_secundarias", Value::String("0".into())),
        ]);
        let part = partition_record(&rec);
        assert_eq!(part.annual_selection.iter().collect::<Vec<_>>(), vec!["Soja"]);
        let (kind, name, snapshot) = &part.cultures[0];
        assert_eq!(*kind, CultureKind::Annual);
        assert_eq!(name, "Soja");
        assert_eq!(
            snapshot.get("Soja_cultura_anual_area_plantio"),
            Some(&FieldValue::Text("120".into()))
        );
        assert_eq!(
            snapshot.get("Soja_hist_3anos_ha"),
            Some(&FieldValue::Text("100".into()))
        );
        assert!(part.plain.contains_key("propriedade_nome"));
        assert!(part.plain.contains_key("num_secundarias"));
    }

    #[test]
    fn longest_culture_prefix_wins() {
        let rec = record(&[
            (
                FIELD_SELECAO_PERENES,
                Value::Array(vec![
                    Value::String("Café".into()),
                    Value::String("Café Arábica".into()),
                ]),
            ),
            ("Café_municipio", Value::String("Patrocínio".into())),
            ("Café Arábica_municipio", Value::String("Franca".into())),
        ]);
        let part = partition_record(&rec);
        let find = |name: &str| {
            part.cultures
                .iter()
                .find(|(_, n, _)| n == name)
                .map(|(_, _, s)| s.clone())
                .unwrap()
        };
        assert!(find("Café").contains_key("Café_municipio"));
        assert!(!find("Café").contains_key("Café Arábica_municipio"));
        assert!(find("Café Arábica").contains_key("Café Arábica_municipio"));
    }

    #[test]
    fn workflow_fields_stay_out_of_the_plain_snapshot() {
        let mut rec = record(&[("nome", Value::String("Produtor".into()))]);
        stamp_record(
            &mut rec,
            &WorkflowStamp {
                cliente_id: "uid-1".into(),
                added_by: "p@ex.com".into(),
                created_at: "2026-01-01T00:00:00Z".into(),
            },
        );
        assert_eq!(rec[FIELD_STATUS], Value::String(STATUS_INACTIVE.into()));
        assert_eq!(
            rec[FIELD_STATUS_SOLICITACAO],
            Value::String(STATUS_SOLICITACAO_AGUARDANDO.into())
        );
        let part = partition_record(&rec);
        assert_eq!(part.plain.len(), 1);
        assert!(part.plain.contains_key("nome"));
    }

    #[test]
    fn flattening_a_snapshot_keeps_scalar_shapes() {
        let mut snapshot = FormSnapshot::new();
        snapshot.insert("atividade_cultura_anual".into(), true.into());
        snapshot.insert("valor_credito".into(), "150000".into());
        let mut rec = Map::new();
        snapshot_into_record(&mut rec, &snapshot);
        assert_eq!(rec["atividade_cultura_anual"], Value::Bool(true));
        assert_eq!(rec["valor_credito"], Value::String("150000".into()));
        // And numbers stored by other writers come back as text.
        assert_eq!(
            value_to_field(&Value::Number(42.into())),
            Some(FieldValue::Text("42".into()))
        );
    }

    #[test]
    fn attaching_selections_writes_explicit_arrays() {
        let mut rec = Map::new();
        attach_selections(
            &mut rec,
            &SelectionList::from_names(["Soja", "Milho"]),
            &SelectionList::new(),
        );
        assert_eq!(
            rec[FIELD_SELECAO_ANUAIS],
            Value::Array(vec![
                Value::String("Soja".into()),
                Value::String("Milho".into())
            ])
        );
        assert_eq!(rec[FIELD_SELECAO_PERENES], Value::Array(vec![]));
    }
}
