use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Field values and snapshots
// ============================================================================

/// Scalar state of a single form control.
///
/// Checkboxes and radios carry their checked state, every other control its
/// current string value (numbers included — they travel as strings, the way
/// the DOM reports them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    /// Checked state for checkbox/radio restore. Text values are never
    /// interpreted as checked.
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Field-name → value mapping for one section instance.
///
/// A `BTreeMap` keeps serialization deterministic, so persisting a freshly
/// loaded store reproduces the cached bytes exactly.
pub type FormSnapshot = BTreeMap<String, FieldValue>;

// ============================================================================
// Activities
// ============================================================================

/// Top-level rural-production categories a producer can select.
///
/// The string form is the human-readable label — it doubles as checkbox
/// value and section key, matching the records already in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    CulturaAnual,
    CulturaPerene,
    AgriculturaGeral,
    BovinoCorte,
    BovinoLeite,
    PecuariaGeral,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::CulturaAnual => "Cultura Anual",
            Activity::CulturaPerene => "Cultura Perene",
            Activity::AgriculturaGeral => "Agricultura Geral",
            Activity::BovinoCorte => "Bovino de Corte",
            Activity::BovinoLeite => "Bovino de Leite",
            Activity::PecuariaGeral => "Pecuária Geral",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|a| a.as_str() == s)
    }

    /// Checkbox field name on the activities step (`atividade_` + slug).
    pub fn field_name(&self) -> &'static str {
        match self {
            Activity::CulturaAnual => "atividade_cultura_anual",
            Activity::CulturaPerene => "atividade_cultura_perene",
            Activity::AgriculturaGeral => "atividade_agricultura_geral",
            Activity::BovinoCorte => "atividade_bovino_corte",
            Activity::BovinoLeite => "atividade_bovino_leite",
            Activity::PecuariaGeral => "atividade_pecuaria_geral",
        }
    }

    pub fn all() -> [Activity; 6] {
        [
            Activity::CulturaAnual,
            Activity::CulturaPerene,
            Activity::AgriculturaGeral,
            Activity::BovinoCorte,
            Activity::BovinoLeite,
            Activity::PecuariaGeral,
        ]
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Culture kinds
// ============================================================================

/// The two crop families that spawn per-culture sub-forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CultureKind {
    Annual,
    Perennial,
}

impl CultureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CultureKind::Annual => "annual",
            CultureKind::Perennial => "perennial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "annual" => Some(CultureKind::Annual),
            "perennial" => Some(CultureKind::Perennial),
            _ => None,
        }
    }
}

// ============================================================================
// Form identity
// ============================================================================

/// Reserved store slots for the selection bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Annual,
    Perennial,
    Secundarias,
}

impl SelectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionKey::Annual => "annual",
            SelectionKey::Perennial => "perennial",
            SelectionKey::Secundarias => "secundarias",
        }
    }

    pub fn for_kind(kind: CultureKind) -> Self {
        match kind {
            CultureKind::Annual => SelectionKey::Annual,
            CultureKind::Perennial => SelectionKey::Perennial,
        }
    }
}

/// Namespaced key under which one section's values are saved and restored.
///
/// Culture ids form their own namespace; activity sections and the reserved
/// selection slots share the other one. Removal of a section never deletes
/// its slot — toggling a culture off and back on resumes from the last save.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormId {
    Activity(Activity),
    Culture { kind: CultureKind, name: String },
    Selection(SelectionKey),
}

impl FormId {
    pub fn culture(kind: CultureKind, name: impl Into<String>) -> Self {
        FormId::Culture {
            kind,
            name: name.into(),
        }
    }

    /// True for ids living in the culture namespace of the store.
    pub fn is_culture(&self) -> bool {
        matches!(self, FormId::Culture { .. })
    }

    pub fn as_string(&self) -> String {
        match self {
            FormId::Activity(a) => format!("activity:{}", a.as_str()),
            FormId::Culture { kind, name } => format!("culture:{}:{}", kind.as_str(), name),
            FormId::Selection(key) => format!("selection:{}", key.as_str()),
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        if let Some(rest) = s.strip_prefix("culture:") {
            let (kind, name) = rest
                .split_once(':')
                .ok_or_else(|| format!("malformed culture id: {s}"))?;
            let kind =
                CultureKind::from_str(kind).ok_or_else(|| format!("unknown culture kind: {kind}"))?;
            if name.is_empty() {
                return Err(format!("empty culture name: {s}"));
            }
            return Ok(FormId::culture(kind, name));
        }
        if let Some(name) = s.strip_prefix("activity:") {
            let activity =
                Activity::from_str(name).ok_or_else(|| format!("unknown activity: {name}"))?;
            return Ok(FormId::Activity(activity));
        }
        if let Some(key) = s.strip_prefix("selection:") {
            return match key {
                "annual" => Ok(FormId::Selection(SelectionKey::Annual)),
                "perennial" => Ok(FormId::Selection(SelectionKey::Perennial)),
                "secundarias" => Ok(FormId::Selection(SelectionKey::Secundarias)),
                _ => Err(format!("unknown selection key: {key}")),
            };
        }
        Err(format!("unrecognized form id: {s}"))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_untagged_serde() {
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::Flag(true));
        let text: FieldValue = serde_json::from_str("\"120\"").unwrap();
        assert_eq!(text, FieldValue::Text("120".into()));
        assert_eq!(serde_json::to_string(&FieldValue::Flag(false)).unwrap(), "false");
    }

    #[test]
    fn activity_round_trip() {
        for a in Activity::all() {
            assert_eq!(Activity::from_str(a.as_str()), Some(a));
        }
        assert_eq!(Activity::from_str("Suinocultura"), None);
    }

    #[test]
    fn form_id_round_trip() {
        let ids = [
            FormId::Activity(Activity::BovinoCorte),
            FormId::culture(CultureKind::Annual, "Soja"),
            FormId::culture(CultureKind::Perennial, "Café Arábica"),
            FormId::Selection(SelectionKey::Annual),
            FormId::Selection(SelectionKey::Secundarias),
        ];
        for id in ids {
            assert_eq!(FormId::from_string(&id.as_string()).unwrap(), id);
        }
    }

    #[test]
    fn form_id_rejects_junk() {
        assert!(FormId::from_string("cultura-Soja").is_err());
        assert!(FormId::from_string("culture:annual:").is_err());
        assert!(FormId::from_string("culture:biennial:Soja").is_err());
        assert!(FormId::from_string("selection:general").is_err());
        assert!(FormId::from_string("activity:Desconhecida").is_err());
    }

    #[test]
    fn culture_names_may_contain_colons_in_suffix() {
        // Only the first two segments are structural.
        let id = FormId::from_string("culture:annual:Milho:Safrinha").unwrap();
        assert_eq!(id, FormId::culture(CultureKind::Annual, "Milho:Safrinha"));
    }

    #[test]
    fn namespace_classification() {
        assert!(FormId::culture(CultureKind::Annual, "Soja").is_culture());
        assert!(!FormId::Activity(Activity::CulturaAnual).is_culture());
        assert!(!FormId::Selection(SelectionKey::Annual).is_culture());
    }
}
