use super::{Slot, Surface};

/// A triggering control held in its loading state.
///
/// Construction disables the control and swaps its label for `loading_label`;
/// drop re-enables it and puts the original label back, on every exit path.
pub struct LoadingControl<'a> {
    surface: &'a dyn Surface,
    slot: Slot,
    original_label: String,
}

impl<'a> LoadingControl<'a> {
    pub fn engage(surface: &'a dyn Surface, slot: Slot, loading_label: &str) -> Self {
        let original_label = surface.read_text(slot);
        surface.set_enabled(slot, false);
        surface.set_text(slot, loading_label);
        Self { surface, slot, original_label }
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }
}

impl Drop for LoadingControl<'_> {
    fn drop(&mut self) {
        self.surface.set_enabled(self.slot, true);
        self.surface.set_text(self.slot, &self.original_label);
    }
}

#[cfg(test)]
#[path = "control_test.rs"]
mod control_test;
