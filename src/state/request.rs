use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

/// The request/response interactions the controller drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    Login,
    AskAi,
    ClearContext,
    ContextInfo,
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::AskAi => "ask-ai",
            Self::ClearContext => "clear-context",
            Self::ContextInfo => "context-info",
        };
        f.write_str(name)
    }
}

/// Tracks which interactions are pending. At most one instance of each
/// interaction may be in flight; different interactions may overlap.
#[derive(Debug, Default)]
pub struct RequestTracker {
    pending: Mutex<HashSet<Interaction>>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `interaction` pending. Returns `None` if it already is.
    pub fn begin(&self, interaction: Interaction) -> Option<PendingToken<'_>> {
        let inserted = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(interaction);
        // A token built for a refused begin would release the live one on drop.
        inserted.then(|| PendingToken { tracker: self, interaction })
    }

    #[must_use]
    pub fn is_pending(&self, interaction: Interaction) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains(&interaction)
    }
}

/// Held for the lifetime of one pending interaction; dropping it returns the
/// interaction to idle.
#[derive(Debug)]
pub struct PendingToken<'a> {
    tracker: &'a RequestTracker,
    interaction: Interaction,
}

impl PendingToken<'_> {
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }
}

impl Drop for PendingToken<'_> {
    fn drop(&mut self) {
        self.tracker
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&self.interaction);
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
