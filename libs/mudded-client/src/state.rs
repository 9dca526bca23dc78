/// Client-side projection of on-chain state. Eventually consistent: every
/// field is re-derived from the ledger, never treated as authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub connected: bool,
    pub presale_started: bool,
    pub presale_ended: bool,
    pub loading: bool,
    pub is_owner: bool,
    pub minted_count: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            connected: false,
            presale_started: false,
            presale_ended: false,
            loading: false,
            is_owner: false,
            minted_count: "0".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Connected,
    PresaleStarted(bool),
    PresaleEnded(bool),
    Loading(bool),
    Owner(bool),
    MintedCount(String),
}

impl AppState {
    /// All mutation goes through here; each update touches exactly one field.
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Connected => self.connected = true,
            Update::PresaleStarted(started) => self.presale_started = started,
            Update::PresaleEnded(ended) => self.presale_ended = ended,
            Update::Loading(loading) => self.loading = loading,
            Update::Owner(is_owner) => self.is_owner = is_owner,
            Update::MintedCount(count) => self.minted_count = count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected_with_zero_minted() {
        let state = AppState::default();
        assert!(!state.connected);
        assert!(!state.loading);
        assert_eq!(state.minted_count, "0");
    }

    #[test]
    fn each_update_touches_only_its_field() {
        let mut state = AppState::default();
        state.apply(Update::Connected);
        let before = state.clone();

        state.apply(Update::PresaleStarted(true));
        assert!(state.presale_started);
        assert_eq!(state.presale_ended, before.presale_ended);
        assert_eq!(state.is_owner, before.is_owner);
        assert_eq!(state.minted_count, before.minted_count);

        state.apply(Update::MintedCount("7".to_owned()));
        assert_eq!(state.minted_count, "7");
        assert!(state.presale_started);
    }

    #[test]
    fn updates_are_idempotent() {
        let mut a = AppState::default();
        let mut b = AppState::default();
        a.apply(Update::Loading(true));
        b.apply(Update::Loading(true));
        b.apply(Update::Loading(true));
        assert_eq!(a, b);
    }
}
