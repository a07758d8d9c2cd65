//! Host-facing UI seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller addresses a fixed set of named [`Slot`]s and only through
//! the [`Surface`] capabilities. A browser host maps slots to DOM elements;
//! [`memory::MemorySurface`] keeps them in memory; [`terminal::TerminalSurface`]
//! prints them.

pub mod control;
pub mod markup;
pub mod memory;
pub mod terminal;

use std::time::Duration;

pub use control::LoadingControl;
pub use markup::RichText;

use crate::state::MeterTier;

// =============================================================================
// SLOTS
// =============================================================================

/// Named UI elements the controller reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    SignInButton,
    UserMenu,
    UserName,
    LoginModal,
    UsernameInput,
    PasswordInput,
    LoginButton,
    LoginError,
    AiSection,
    QuestionInput,
    AskButton,
    AnswerArea,
    ContextWarning,
    ContextMeter,
    ContextDetail,
    ClearContextButton,
}

impl Slot {
    pub const ALL: [Slot; 16] = [
        Slot::SignInButton,
        Slot::UserMenu,
        Slot::UserName,
        Slot::LoginModal,
        Slot::UsernameInput,
        Slot::PasswordInput,
        Slot::LoginButton,
        Slot::LoginError,
        Slot::AiSection,
        Slot::QuestionInput,
        Slot::AskButton,
        Slot::AnswerArea,
        Slot::ContextWarning,
        Slot::ContextMeter,
        Slot::ContextDetail,
        Slot::ClearContextButton,
    ];

    /// Text a freshly rendered page shows in this slot.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::SignInButton => "Sign in",
            Self::LoginButton => "Log in",
            Self::AskButton => "Ask AI",
            Self::ClearContextButton => "Clear context",
            Self::ContextWarning => "Older messages were trimmed to fit the context window.",
            Self::ContextMeter => "0%",
            _ => "",
        }
    }
}

// =============================================================================
// PRESENTATION VALUES
// =============================================================================

/// Semantic coloring applied to a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Critical,
}

impl From<MeterTier> for Tone {
    fn from(tier: MeterTier) -> Self {
        match tier {
            MeterTier::Normal => Self::Success,
            MeterTier::Warning => Self::Warning,
            MeterTier::Critical => Self::Critical,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Short-lived message shown independently of inline slot text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    /// How long the host keeps it on screen.
    pub ttl: Duration,
}

// =============================================================================
// SURFACE
// =============================================================================

/// Capabilities the controller needs from the page, per named slot.
pub trait Surface: Send + Sync {
    fn read_text(&self, slot: Slot) -> String;

    fn set_text(&self, slot: Slot, text: &str);

    /// Replace the slot's content with formatted text.
    fn set_rich_text(&self, slot: Slot, text: &RichText);

    fn set_visible(&self, slot: Slot, visible: bool);

    fn set_enabled(&self, slot: Slot, enabled: bool);

    fn set_tone(&self, slot: Slot, tone: Tone);

    fn focus(&self, slot: Slot);

    fn notify(&self, notice: Notice);

    /// Ask the user a yes/no question. `false` means declined.
    fn confirm(&self, prompt: &str) -> bool;
}
