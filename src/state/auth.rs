/// Who the page believes is signed in.
///
/// Fields are private so a user name exists exactly when the session is
/// authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    username: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { username: None }
    }

    /// Authenticated state for `username`. Returns `None` for a blank name.
    #[must_use]
    pub fn authenticated(username: &str) -> Option<Self> {
        let name = username.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self { username: Some(name.to_owned()) })
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Empty when anonymous.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
