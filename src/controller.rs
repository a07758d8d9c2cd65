//! Session & chat controller.
//!
//! DESIGN
//! ======
//! Four interactions (login, ask-AI, clear-context, context refresh), each a
//! single backend round trip with a fixed before/after contract on the page:
//!
//! 1. Local validation; failures never reach the network.
//! 2. Mark the interaction pending and put the triggering control into its
//!    loading state.
//! 3. Await the backend.
//! 4. Paint the outcome (success, server rejection, transport failure).
//! 5. Restore the control and return to idle.
//!
//! Steps 2 and 5 are RAII guards ([`PendingToken`], [`LoadingControl`]) so
//! the restore runs on every exit path, including a host dropping the
//! future mid-flight.
//!
//! TRADE-OFFS
//! ==========
//! Only re-entry of the *same* interaction is refused. Different interactions
//! may overlap; whichever resolves last repaints the meter.
//!
//! Every operation returns `Err` after the page already shows the failure.
//! The error is informational for the host; nothing here is fatal.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{DEFAULT_SESSION_USER, DeskConfig};
use crate::net::Backend;
use crate::net::types::{ApiError, AskRequest, LoginRequest};
use crate::state::{AuthState, ChatExchange, ContextUsage, Interaction, PendingToken, RequestTracker};
use crate::ui::markup::render_reply;
use crate::ui::{LoadingControl, Notice, NoticeKind, Slot, Surface, Tone};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_SIGNING_IN: &str = "Signing in...";
pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_CONNECTION_ERROR: &str = "Server connection error";
pub const MSG_ENTER_QUESTION: &str = "Enter a question for the AI";
pub const MSG_PROCESSING: &str = "Processing...";
pub const MSG_ANALYZING: &str = "Analyzing your question...";
pub const MSG_AI_ERROR: &str = "An error occurred";
pub const MSG_AI_REQUEST_FAILED: &str = "AI request failed";
pub const MSG_NETWORK_INLINE: &str = "Network error. Check your connection.";
pub const MSG_NETWORK: &str = "Network error";
pub const MSG_CONFIRM_CLEAR: &str = "Clear the conversation context?";
pub const MSG_CLEARING: &str = "Clearing...";
pub const MSG_CONTEXT_CLEARED: &str = "Context cleared";
pub const MSG_CLEAR_FAILED: &str = "Could not clear context";

// =============================================================================
// ERROR
// =============================================================================

/// Why an interaction did not succeed. The page already reflects it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// Required input missing; no request was made.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// The backend answered and refused.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// The request failed in transit or the reply was unreadable.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The same interaction is still pending.
    #[error("{0} already pending")]
    Busy(Interaction),

    /// The user declined a confirmation.
    #[error("declined by user")]
    Declined,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct Controller {
    backend: Arc<dyn Backend>,
    surface: Arc<dyn Surface>,
    config: DeskConfig,
    auth: Mutex<AuthState>,
    usage: Mutex<ContextUsage>,
    exchange: Mutex<Option<ChatExchange>>,
    requests: RequestTracker,
}

impl Controller {
    /// Wire the controller to its host and paint the initial page state:
    /// sign-in vs. chat visibility from the session flag, modal closed,
    /// answer area and trimmed warning hidden, meter at zero.
    pub fn new(backend: Arc<dyn Backend>, surface: Arc<dyn Surface>, config: DeskConfig) -> Self {
        let auth = if config.initially_authenticated {
            AuthState::authenticated(config.session_user.as_deref().unwrap_or(DEFAULT_SESSION_USER))
                .unwrap_or_default()
        } else {
            AuthState::anonymous()
        };

        let controller = Self {
            backend,
            surface,
            config,
            auth: Mutex::new(auth.clone()),
            usage: Mutex::new(ContextUsage::default()),
            exchange: Mutex::new(None),
            requests: RequestTracker::new(),
        };

        controller.show_auth(&auth);
        let surface = controller.surface();
        surface.set_visible(Slot::LoginModal, false);
        surface.set_visible(Slot::AnswerArea, false);
        surface.set_visible(Slot::ContextWarning, false);
        controller.paint_meter(ContextUsage::default());

        info!(authenticated = auth.is_authenticated(), base_url = %controller.config.base_url, "controller: ready");
        controller
    }

    fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    #[must_use]
    pub fn auth(&self) -> AuthState {
        lock(&self.auth).clone()
    }

    #[must_use]
    pub fn context_usage(&self) -> ContextUsage {
        *lock(&self.usage)
    }

    #[must_use]
    pub fn last_exchange(&self) -> Option<ChatExchange> {
        lock(&self.exchange).clone()
    }

    #[must_use]
    pub fn is_pending(&self, interaction: Interaction) -> bool {
        self.requests.is_pending(interaction)
    }

    fn begin(&self, interaction: Interaction) -> Result<PendingToken<'_>, InteractionError> {
        self.requests.begin(interaction).ok_or_else(|| {
            debug!(%interaction, "interaction already pending");
            InteractionError::Busy(interaction)
        })
    }

    fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        self.surface().notify(Notice { message: message.into(), kind, ttl: self.config.notice_ttl });
    }

    // =========================================================================
    // LOGIN
    // =========================================================================

    pub fn open_login(&self) {
        self.surface().set_visible(Slot::LoginModal, true);
        self.surface().focus(Slot::UsernameInput);
    }

    pub fn close_login(&self) {
        self.surface().set_visible(Slot::LoginModal, false);
        self.surface().set_text(Slot::LoginError, "");
    }

    /// Sign in with `username` / `password`, using `trigger` as the busy
    /// control.
    pub async fn submit_login(&self, trigger: Slot, username: &str, password: &str) -> Result<(), InteractionError> {
        let surface = self.surface();
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            surface.set_text(Slot::LoginError, MSG_FILL_ALL_FIELDS);
            return Err(InteractionError::Validation(MSG_FILL_ALL_FIELDS));
        }

        let _pending = self.begin(Interaction::Login)?;
        let _control = LoadingControl::engage(surface, trigger, MSG_SIGNING_IN);

        let request_id = Uuid::new_v4();
        info!(%request_id, user = %username, "login: submitting");

        let request = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let refusal = match self.backend.login(&request).await {
            Ok(resp) if resp.success => {
                let Some(auth) = AuthState::authenticated(username) else {
                    return Err(InteractionError::Validation(MSG_FILL_ALL_FIELDS));
                };
                self.close_login();
                *lock(&self.auth) = auth.clone();
                self.show_auth(&auth);
                self.notify(NoticeKind::Success, format!("Welcome, {username}!"));
                surface.set_text(Slot::UsernameInput, "");
                surface.set_text(Slot::PasswordInput, "");
                info!(%request_id, user = %username, "login: succeeded");
                return Ok(());
            }
            Ok(resp) => non_blank(resp.error),
            Err(e) if e.is_transport() => {
                error!(%request_id, error = %e, "login: transport failure");
                self.show_login_error(MSG_CONNECTION_ERROR);
                return Err(InteractionError::Transport(e.to_string()));
            }
            Err(e) => e.server_message().map(str::to_owned),
        };

        let message = refusal.unwrap_or_else(|| MSG_LOGIN_FAILED.to_owned());
        warn!(%request_id, error = %message, "login: rejected");
        self.show_login_error(&message);
        Err(InteractionError::Rejected(message))
    }

    fn show_login_error(&self, message: &str) {
        self.surface().set_text(Slot::LoginError, message);
        self.notify(NoticeKind::Error, message);
    }

    fn show_auth(&self, auth: &AuthState) {
        let surface = self.surface();
        let signed_in = auth.is_authenticated();
        surface.set_visible(Slot::AiSection, signed_in);
        surface.set_visible(Slot::SignInButton, !signed_in);
        surface.set_visible(Slot::UserMenu, signed_in);
        surface.set_text(Slot::UserName, auth.username());
    }

    // =========================================================================
    // ASK AI
    // =========================================================================

    /// Send `message` to the assistant, using `trigger` as the busy control.
    pub async fn ask_ai(&self, trigger: Slot, message: &str) -> Result<(), InteractionError> {
        let surface = self.surface();
        let question = message.trim();
        if question.is_empty() {
            self.notify(NoticeKind::Error, MSG_ENTER_QUESTION);
            surface.focus(Slot::QuestionInput);
            return Err(InteractionError::Validation(MSG_ENTER_QUESTION));
        }

        let _pending = self.begin(Interaction::AskAi)?;
        let _control = LoadingControl::engage(surface, trigger, MSG_PROCESSING);

        surface.set_tone(Slot::AnswerArea, Tone::Neutral);
        surface.set_text(Slot::AnswerArea, MSG_ANALYZING);
        surface.set_visible(Slot::AnswerArea, true);
        surface.set_visible(Slot::ContextWarning, false);

        let mut exchange = ChatExchange::asked(question);
        *lock(&self.exchange) = Some(exchange.clone());

        let request_id = Uuid::new_v4();
        info!(%request_id, question_len = question.len(), "ask-ai: submitting");

        let request = AskRequest { message: question.to_owned() };
        match self.backend.ask_ai(&request).await {
            Ok(resp) => {
                surface.set_rich_text(Slot::AnswerArea, &render_reply(&resp.reply));
                if resp.context_warning {
                    surface.set_visible(Slot::ContextWarning, true);
                }
                info!(
                    %request_id,
                    reply_len = resp.reply.len(),
                    context_size = ?resp.context_size,
                    trimmed = resp.context_warning,
                    "ask-ai: answered"
                );
                exchange.resolve_answer(resp.reply);
                *lock(&self.exchange) = Some(exchange);

                match resp.context_size {
                    Some(size) => {
                        let usage =
                            ContextUsage::from_size(size, self.config.context_capacity).with_trimmed(resp.context_warning);
                        self.apply_usage(usage);
                    }
                    None => {
                        if let Ok(usage) = self.refresh_context_info(None).await {
                            if resp.context_warning {
                                self.apply_usage(usage.with_trimmed(true));
                            }
                        }
                    }
                }
                Ok(())
            }
            Err(e) if e.is_transport() => {
                error!(%request_id, error = %e, "ask-ai: transport failure");
                self.show_answer_error(MSG_NETWORK_INLINE);
                self.notify(NoticeKind::Error, MSG_NETWORK);
                exchange.resolve_error(MSG_NETWORK_INLINE.to_owned());
                *lock(&self.exchange) = Some(exchange);
                Err(InteractionError::Transport(e.to_string()))
            }
            Err(e) => {
                let inline = e.server_message().unwrap_or(MSG_AI_ERROR).to_owned();
                warn!(%request_id, error = %e, message = %inline, "ask-ai: rejected");
                self.show_answer_error(&inline);
                self.notify(NoticeKind::Error, e.server_message().unwrap_or(MSG_AI_REQUEST_FAILED));
                exchange.resolve_error(inline.clone());
                *lock(&self.exchange) = Some(exchange);
                Err(InteractionError::Rejected(inline))
            }
        }
    }

    fn show_answer_error(&self, message: &str) {
        self.surface().set_tone(Slot::AnswerArea, Tone::Critical);
        self.surface().set_text(Slot::AnswerArea, message);
    }

    /// Empty the question `input` and hide the answer area. No request.
    pub fn clear_answer(&self, input: Slot) {
        let surface = self.surface();
        surface.set_text(input, "");
        surface.set_tone(Slot::AnswerArea, Tone::Neutral);
        surface.set_text(Slot::AnswerArea, "");
        surface.set_visible(Slot::AnswerArea, false);
        surface.focus(input);
    }

    // =========================================================================
    // CONTEXT
    // =========================================================================

    /// Drop the backend conversation context after the user confirms.
    pub async fn clear_context(&self, trigger: Slot) -> Result<(), InteractionError> {
        let surface = self.surface();
        let _pending = self.begin(Interaction::ClearContext)?;
        if !surface.confirm(MSG_CONFIRM_CLEAR) {
            info!("clear-context: declined");
            return Err(InteractionError::Declined);
        }

        let _control = LoadingControl::engage(surface, trigger, MSG_CLEARING);
        let request_id = Uuid::new_v4();
        info!(%request_id, "clear-context: submitting");

        match self.backend.clear_context().await {
            Ok(resp) => {
                self.apply_usage(ContextUsage::default());
                surface.set_visible(Slot::ContextWarning, false);
                let message = non_blank(resp.message).unwrap_or_else(|| MSG_CONTEXT_CLEARED.to_owned());
                self.notify(NoticeKind::Success, message);
                info!(%request_id, "clear-context: done");
                Ok(())
            }
            Err(e) if e.is_transport() => {
                error!(%request_id, error = %e, "clear-context: transport failure");
                self.notify(NoticeKind::Error, MSG_CONNECTION_ERROR);
                Err(InteractionError::Transport(e.to_string()))
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(MSG_CLEAR_FAILED).to_owned();
                warn!(%request_id, error = %e, "clear-context: rejected");
                self.notify(NoticeKind::Error, message.clone());
                Err(InteractionError::Rejected(message))
            }
        }
    }

    /// Update the meter. With `explicit_size` the percentage is computed
    /// locally; otherwise `/context-info` is asked. A failed fetch leaves the
    /// meter as it was and shows nothing to the user.
    pub async fn refresh_context_info(&self, explicit_size: Option<u64>) -> Result<ContextUsage, InteractionError> {
        if let Some(size) = explicit_size {
            let usage = ContextUsage::from_size(size, self.config.context_capacity);
            self.apply_usage(usage);
            return Ok(usage);
        }

        let _pending = self.begin(Interaction::ContextInfo)?;
        match self.backend.context_info().await {
            Ok(info) => {
                let usage = ContextUsage::from_server(info.context_size, info.percentage);
                debug!(size = usage.size, percentage = usage.percentage, "context-info: refreshed");
                self.apply_usage(usage);
                Ok(usage)
            }
            Err(e) => {
                debug!(error = %e, "context-info: refresh failed, keeping last meter");
                Err(classify(e))
            }
        }
    }

    fn apply_usage(&self, usage: ContextUsage) {
        *lock(&self.usage) = usage;
        self.paint_meter(usage);
    }

    fn paint_meter(&self, usage: ContextUsage) {
        let surface = self.surface();
        surface.set_text(Slot::ContextMeter, &format!("{}%", usage.percentage));
        surface.set_text(Slot::ContextDetail, &format!("{}/{}", usage.size, self.config.context_capacity));
        surface.set_tone(Slot::ContextMeter, usage.tier().into());
    }
}

fn classify(err: ApiError) -> InteractionError {
    if err.is_transport() {
        InteractionError::Transport(err.to_string())
    } else {
        InteractionError::Rejected(err.server_message().map_or_else(|| err.to_string(), str::to_owned))
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
