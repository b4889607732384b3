use crate::shared::state::form_store::FormStateStore;
use crate::shared::step_nav::StepNavigator;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const TOTAL_STEPS: usize = 6;

/// Everything one wizard session owns: the form state store, the per-field
/// debounce timers, step tracking and submit state. Constructed once per
/// mount and threaded explicitly into the section manager and autosave
/// wiring instead of living as ambient globals.
#[derive(Clone)]
pub struct WizardContext {
    pub store: Rc<RefCell<FormStateStore>>,
    /// One pending timer per field key; replacing a slot cancels only that
    /// field's timer.
    pub debouncers: Rc<RefCell<HashMap<String, Timeout>>>,
    pub steps: StepNavigator,
    pub busy: RwSignal<bool>,
    /// Id of the remote record being edited; `None` means new-record mode.
    pub record_id: RwSignal<Option<String>>,
}

impl WizardContext {
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(FormStateStore::load())),
            debouncers: Rc::new(RefCell::new(HashMap::new())),
            steps: StepNavigator::new(TOTAL_STEPS),
            busy: RwSignal::new(false),
            record_id: RwSignal::new(None),
        }
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new()
    }
}
