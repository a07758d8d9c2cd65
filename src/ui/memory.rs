//! In-memory surface.
//!
//! Keeps every slot's text, visibility, enabled flag and tone in a map.
//! Used by tests to assert on what the controller painted, and by
//! [`super::terminal::TerminalSurface`] as its backing store.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use super::{Notice, RichText, Slot, Surface, Tone};

/// Snapshot of one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotState {
    pub text: String,
    /// Set when the slot last received formatted text.
    pub rich: Option<RichText>,
    pub visible: bool,
    pub enabled: bool,
    pub tone: Tone,
}

impl SlotState {
    fn fresh(slot: Slot) -> Self {
        Self { text: slot.default_label().to_owned(), rich: None, visible: true, enabled: true, tone: Tone::Neutral }
    }
}

#[derive(Default)]
struct Inner {
    slots: HashMap<Slot, SlotState>,
    notices: Vec<(Instant, Notice)>,
    focused: Option<Slot>,
    confirm_replies: VecDeque<bool>,
    prompts: Vec<String>,
}

pub struct MemorySurface {
    inner: Mutex<Inner>,
    confirm_default: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Every slot visible and enabled, showing its default label.
    #[must_use]
    pub fn new() -> Self {
        let slots = Slot::ALL.iter().map(|&slot| (slot, SlotState::fresh(slot))).collect();
        Self { inner: Mutex::new(Inner { slots, ..Inner::default() }), confirm_default: true }
    }

    /// Answer confirmations with `reply` unless a scripted reply is queued.
    #[must_use]
    pub fn with_confirm_default(mut self, reply: bool) -> Self {
        self.confirm_default = reply;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn update(&self, slot: Slot, apply: impl FnOnce(&mut SlotState)) {
        let mut inner = self.lock();
        apply(inner.slots.entry(slot).or_insert_with(|| SlotState::fresh(slot)));
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> SlotState {
        self.lock().slots.get(&slot).cloned().unwrap_or_else(|| SlotState::fresh(slot))
    }

    #[must_use]
    pub fn text(&self, slot: Slot) -> String {
        self.slot(slot).text
    }

    #[must_use]
    pub fn rich(&self, slot: Slot) -> Option<RichText> {
        self.slot(slot).rich
    }

    #[must_use]
    pub fn is_visible(&self, slot: Slot) -> bool {
        self.slot(slot).visible
    }

    #[must_use]
    pub fn is_enabled(&self, slot: Slot) -> bool {
        self.slot(slot).enabled
    }

    #[must_use]
    pub fn tone(&self, slot: Slot) -> Tone {
        self.slot(slot).tone
    }

    #[must_use]
    pub fn focused(&self) -> Option<Slot> {
        self.lock().focused
    }

    /// Notices raised so far, oldest first. Expired ones are dropped each
    /// time a new notice arrives.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.iter().map(|(_, notice)| notice.clone()).collect()
    }

    /// Notices still within their lifetime at `now`.
    #[must_use]
    pub fn active_notices(&self, now: Instant) -> Vec<Notice> {
        self.lock()
            .notices
            .iter()
            .filter(|(raised, notice)| now.saturating_duration_since(*raised) < notice.ttl)
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    /// Queue the reply for the next confirmation prompt.
    pub fn script_confirm(&self, reply: bool) {
        self.lock().confirm_replies.push_back(reply);
    }

    /// Confirmation prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }
}

impl Surface for MemorySurface {
    fn read_text(&self, slot: Slot) -> String {
        self.text(slot)
    }

    fn set_text(&self, slot: Slot, text: &str) {
        self.update(slot, |state| {
            text.clone_into(&mut state.text);
            state.rich = None;
        });
    }

    fn set_rich_text(&self, slot: Slot, text: &RichText) {
        self.update(slot, |state| {
            state.text = text.to_plain();
            state.rich = Some(text.clone());
        });
    }

    fn set_visible(&self, slot: Slot, visible: bool) {
        self.update(slot, |state| state.visible = visible);
    }

    fn set_enabled(&self, slot: Slot, enabled: bool) {
        self.update(slot, |state| state.enabled = enabled);
    }

    fn set_tone(&self, slot: Slot, tone: Tone) {
        self.update(slot, |state| state.tone = tone);
    }

    fn focus(&self, slot: Slot) {
        self.lock().focused = Some(slot);
    }

    fn notify(&self, notice: Notice) {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.notices.retain(|(raised, old)| now.saturating_duration_since(*raised) < old.ttl);
        inner.notices.push((now, notice));
    }

    fn confirm(&self, prompt: &str) -> bool {
        let mut inner = self.lock();
        inner.prompts.push(prompt.to_owned());
        inner.confirm_replies.pop_front().unwrap_or(self.confirm_default)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;
