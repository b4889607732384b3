use super::forms::{FieldValue, FormSnapshot};

/// Ordered list of culture names currently chosen for one culture kind.
///
/// Order is selection order and is what rehydration replays. Duplicates are
/// rejected at the edge so the list can never drift from the rendered
/// sections it mirrors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionList {
    names: Vec<String>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Appends a name; returns false (and leaves the list untouched) if it
    /// is already present.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes a name; returns false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.names.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Stores the list as an ordinary snapshot (`"0"` → first name, ...)
    /// so it rides the same persistence path as every other section.
    pub fn to_snapshot(&self) -> FormSnapshot {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i.to_string(), FieldValue::Text(name.clone())))
            .collect()
    }

    /// Rebuilds the list from a stored snapshot. Keys are numeric indices;
    /// they are ordered numerically (the snapshot map sorts them as text,
    /// which would put "10" before "2"). Non-numeric keys are ignored.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let mut indexed: Vec<(usize, &str)> = snapshot
            .iter()
            .filter_map(|(key, value)| {
                let idx = key.parse::<usize>().ok()?;
                Some((idx, value.as_text()?))
            })
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        let mut list = SelectionList::new();
        for (_, name) in indexed {
            list.push(name);
        }
        list
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = SelectionList::new();
        for name in names {
            list.push(name);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_duplicates() {
        let mut list = SelectionList::new();
        assert!(list.push("Soja"));
        assert!(list.push("Milho"));
        assert!(!list.push("Soja"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Soja", "Milho"]);
    }

    #[test]
    fn remove_keeps_order() {
        let mut list = SelectionList::from_names(["Soja", "Milho", "Trigo"]);
        assert!(list.remove("Milho"));
        assert!(!list.remove("Milho"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Soja", "Trigo"]);
    }

    #[test]
    fn snapshot_round_trip_preserves_order_past_ten_entries() {
        let names: Vec<String> = (0..12).map(|i| format!("Cultura {i}")).collect();
        let list = SelectionList::from_names(names.clone());
        let restored = SelectionList::from_snapshot(&list.to_snapshot());
        assert_eq!(restored.iter().collect::<Vec<_>>(), names);
    }

    #[test]
    fn from_snapshot_ignores_foreign_keys() {
        let mut snapshot = SelectionList::from_names(["Soja"]).to_snapshot();
        snapshot.insert("note".into(), "not an index".into());
        snapshot.insert("1".into(), true.into());
        let restored = SelectionList::from_snapshot(&snapshot);
        assert_eq!(restored.iter().collect::<Vec<_>>(), vec!["Soja"]);
    }
}
