//! Reconciliation between the wizard and the remote document store.
//!
//! Loading seeds the form state store and rebuilds the dynamic tree from a
//! stored record; submitting flattens the current DOM state into a record
//! and creates or updates it. The durable local cache is written before any
//! remote call, so a failed submit never loses entered data.

use leptos::prelude::*;

use super::autosave;
use super::context::WizardContext;
use super::sections;
use crate::domain::c001_custeio::api;
use crate::shared::dom_forms;
use contracts::domain::custeio::forms::{FieldValue, FormId, SelectionKey};
use contracts::domain::custeio::record::{
    attach_selections, partition_record, snapshot_into_record, stamp_record, WorkflowStamp,
};
use contracts::system::auth::UserInfo;
use serde_json::Map;
use web_sys::Element;

pub const FORM_ID: &str = "custeio-form";

fn form_root() -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(FORM_ID)
}

/// Record id carried in the page URL (`?id=...`), meaning "edit this
/// application". Absent id is new-record mode.
pub fn record_id_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("id").filter(|id| !id.is_empty())
}

/// Fetches the record and rehydrates: plain fields through the restorer,
/// selection lists and per-culture snapshots into the store, then the
/// dynamic tree is rebuilt from the restored checkboxes and counts.
pub async fn rehydrate(ctx: &WizardContext) -> Result<(), String> {
    let Some(id) = ctx.record_id.get_untracked() else {
        return Ok(());
    };
    let Some(record) = api::load_record(&id).await? else {
        log::info!("record {id} not found, starting empty");
        return Ok(());
    };

    let partitioned = partition_record(&record);

    {
        let mut store = ctx.store.borrow_mut();
        for (kind, name, snapshot) in &partitioned.cultures {
            if !snapshot.is_empty() {
                store.save(&FormId::culture(*kind, name.clone()), snapshot.clone());
            }
        }
        store.set_selection(SelectionKey::Annual, &partitioned.annual_selection);
        store.set_selection(SelectionKey::Perennial, &partitioned.perennial_selection);
    }

    let Some(form) = form_root() else {
        return Err("wizard form is not mounted".to_string());
    };
    dom_forms::restore(&form, &partitioned.plain);
    sections::sync_activities(ctx);

    if let Some(count) = partitioned
        .plain
        .get("num_secundarias")
        .and_then(FieldValue::as_text)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
    {
        sections::set_secondary_count(ctx, count);
        // The rebuilt sub-sections take their values from the record, not
        // from whatever the local cache last saw.
        dom_forms::restore(&form, &partitioned.plain);
        sections::save_secundarias(ctx);
    }

    log::info!("record {id} rehydrated");
    Ok(())
}

/// Flattens the current form state into a record, stamps the workflow
/// fields, and creates or updates remotely. The store (and with it the
/// durable cache) is brought current first, whatever the remote outcome.
pub async fn submit(ctx: &WizardContext, user: &UserInfo) -> Result<String, String> {
    autosave::save_all_rendered(ctx);

    let Some(form) = form_root() else {
        return Err("wizard form is not mounted".to_string());
    };

    let mut record = Map::new();
    snapshot_into_record(&mut record, &dom_forms::collect(&form));
    {
        let store = ctx.store.borrow();
        attach_selections(
            &mut record,
            &store.selection(SelectionKey::Annual),
            &store.selection(SelectionKey::Perennial),
        );
    }
    stamp_record(
        &mut record,
        &WorkflowStamp {
            cliente_id: user.uid.clone(),
            added_by: user.author(),
            created_at: chrono::Utc::now().to_rfc3339(),
        },
    );

    let existing = ctx.record_id.get_untracked();
    let id = api::submit_record(record, existing.as_deref()).await?;
    ctx.record_id.set(Some(id.clone()));
    Ok(id)
}
