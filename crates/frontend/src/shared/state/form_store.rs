//! FormStateStore owns every section snapshot and selection list for the
//! duration of a wizard session. Section managers read and write through it
//! and never keep copies.
//!
//! The store is split into two namespaces — activity sections (plus the
//! reserved selection slots) and culture sections — each mirrored into its
//! own localStorage entry on every save. The durable cache is a derived
//! projection: cache failures are logged and swallowed, in-memory state
//! stays the source of truth for the session.

use contracts::domain::custeio::forms::{FormId, FormSnapshot, SelectionKey};
use contracts::domain::custeio::selection::SelectionList;
use std::collections::BTreeMap;
use web_sys::Storage;

const ATIVIDADES_KEY: &str = "custeio_form_atividades";
const CULTURAS_KEY: &str = "custeio_form_culturas";

type Namespace = BTreeMap<String, FormSnapshot>;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read_namespace(storage: &Storage, key: &str) -> Namespace {
    let Some(json) = storage.get_item(key).ok().flatten() else {
        return Namespace::new();
    };
    match serde_json::from_str(&json) {
        Ok(namespace) => namespace,
        Err(e) => {
            log::warn!("discarding corrupt cache entry {key}: {e}");
            Namespace::new()
        }
    }
}

fn write_namespace(storage: &Storage, key: &str, namespace: &Namespace) {
    match serde_json::to_string(namespace) {
        Ok(json) => {
            if let Err(e) = storage.set_item(key, &json) {
                log::warn!("failed to write {key} to localStorage: {e:?}");
            }
        }
        Err(e) => log::warn!("failed to serialize {key}: {e}"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormStateStore {
    atividades: Namespace,
    culturas: Namespace,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads both namespaces from the durable cache. Missing or corrupt
    /// entries leave empty defaults; this never fails.
    pub fn load() -> Self {
        let mut store = Self::new();
        if let Some(storage) = local_storage() {
            store.atividades = read_namespace(&storage, ATIVIDADES_KEY);
            store.culturas = read_namespace(&storage, CULTURAS_KEY);
        }
        store
    }

    fn namespace(&self, id: &FormId) -> &Namespace {
        if id.is_culture() {
            &self.culturas
        } else {
            &self.atividades
        }
    }

    fn namespace_mut(&mut self, id: &FormId) -> &mut Namespace {
        if id.is_culture() {
            &mut self.culturas
        } else {
            &mut self.atividades
        }
    }

    /// Overwrites the snapshot under `id` and mirrors both namespaces into
    /// the durable cache inline. Synchronous to callers; cache failures are
    /// non-fatal.
    pub fn save(&mut self, id: &FormId, snapshot: FormSnapshot) {
        self.namespace_mut(id).insert(id.as_string(), snapshot);
        self.persist();
    }

    /// Stored snapshot, or an empty one. Never fails.
    pub fn get(&self, id: &FormId) -> FormSnapshot {
        self.namespace(id)
            .get(&id.as_string())
            .cloned()
            .unwrap_or_default()
    }

    pub fn persist(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        write_namespace(&storage, ATIVIDADES_KEY, &self.atividades);
        write_namespace(&storage, CULTURAS_KEY, &self.culturas);
    }

    /// Full reset: wipes memory and removes both cache entries. Only the
    /// explicit user reset calls this, followed by a page reload.
    pub fn clear(&mut self) {
        self.atividades.clear();
        self.culturas.clear();
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(ATIVIDADES_KEY);
            let _ = storage.remove_item(CULTURAS_KEY);
        }
    }

    pub fn selection(&self, key: SelectionKey) -> SelectionList {
        SelectionList::from_snapshot(&self.get(&FormId::Selection(key)))
    }

    pub fn set_selection(&mut self, key: SelectionKey, list: &SelectionList) {
        self.save(&FormId::Selection(key), list.to_snapshot());
    }
}
