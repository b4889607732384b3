use leptos::prelude::*;

/// Tracks the active step of a multi-step form.
///
/// Visibility is derived reactively by the owning view; this type only owns
/// the index and the forward gate protocol. `go_to` is unconditional —
/// out-of-range targets are a caller bug, not something handled here.
#[derive(Clone, Copy)]
pub struct StepNavigator {
    current: RwSignal<usize>,
    total: usize,
}

impl StepNavigator {
    pub fn new(total: usize) -> Self {
        Self {
            current: RwSignal::new(0),
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Reactive check used for per-panel visibility.
    pub fn is_active(&self, index: usize) -> bool {
        self.current.get() == index
    }

    pub fn is_last(&self) -> bool {
        self.current.get() + 1 == self.total
    }

    pub fn progress_label(&self) -> String {
        format!("Etapa {} de {}", self.current.get() + 1, self.total)
    }

    pub fn go_to(&self, index: usize) {
        self.current.set(index);
    }

    /// Backward moves are always unconditional.
    pub fn back(&self) {
        let current = self.current.get_untracked();
        if current > 0 {
            self.current.set(current - 1);
        }
    }

    /// Runs the gate for the current step and advances only on `Ok`. The
    /// error message is returned to the caller, which decides how to show
    /// it (blocking notice or inline marks already rendered by the gate).
    pub fn try_next(&self, gate: impl Fn(usize) -> Result<(), String>) -> Result<(), String> {
        let current = self.current.get_untracked();
        gate(current)?;
        self.go_to(current + 1);
        Ok(())
    }
}
