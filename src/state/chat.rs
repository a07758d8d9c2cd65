/// One ask-AI round trip. Overwritten by the next question; the backend
/// keeps the real history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatExchange {
    pub question: String,
    outcome: Option<Result<String, String>>,
}

impl ChatExchange {
    /// An exchange whose request is still in flight.
    #[must_use]
    pub fn asked(question: &str) -> Self {
        Self { question: question.to_owned(), outcome: None }
    }

    pub fn resolve_answer(&mut self, answer: String) {
        self.outcome = Some(Ok(answer));
    }

    pub fn resolve_error(&mut self, message: String) {
        self.outcome = Some(Err(message));
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok()).map(String::as_str)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err()).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;
