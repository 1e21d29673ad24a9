//! Shared application state between the frame loop and the views

use crate::models::{Account, UsageDisplay};

/// Central state rendered by the dashboard views
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Accounts known to the backend store
    pub accounts: Vec<Account>,
    /// Id of the currently active account
    pub current_account_id: Option<String>,
    /// Latest usage snapshot for the current account
    pub usage: Option<UsageDisplay>,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    /// The currently active account, if it is in the list
    pub fn current_account(&self) -> Option<&Account> {
        self.current_account_id
            .as_ref()
            .and_then(|id| self.accounts.iter().find(|a| &a.id == id))
    }

    /// Whether the current account's authorization has expired
    pub fn current_is_invalid(&self) -> bool {
        self.current_account().map(|a| a.invalid).unwrap_or(false)
    }
}

/// Per-session flags and transient messages
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// A usage refresh is in flight
    pub usage_loading: bool,
    /// Last usage fetch error, verbatim from the bridge
    pub usage_error: Option<String>,
    /// Transient status line (switch/export results)
    pub status: Option<String>,
    /// Last error message (if any)
    pub last_error: Option<String>,
}

impl RuntimeState {
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_account_lookup() {
        let mut state = SharedAppState::default();
        state.accounts = vec![
            Account::new("a", "a@example.com"),
            Account::new("b", "b@example.com"),
        ];
        assert!(state.current_account().is_none());

        state.current_account_id = Some("b".to_string());
        assert_eq!(state.current_account().unwrap().name, "b@example.com");
        assert!(!state.current_is_invalid());

        state.accounts[1].invalid = true;
        assert!(state.current_is_invalid());
    }
}
