use std::fmt;

use crate::state::AppState;

pub const MAX_SUPPLY: u32 = 20;

/// The six mutually exclusive things the UI can offer the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    ConnectWallet,
    Loading,
    StartPresale,
    PresaleNotStarted,
    PresaleMint,
    PublicMint,
}

/// Pure derivation of the current affordance, in strict priority order.
/// Mutates nothing.
pub fn render(state: &AppState) -> Affordance {
    if !state.connected {
        return Affordance::ConnectWallet;
    }
    if state.loading {
        return Affordance::Loading;
    }
    if state.is_owner && !state.presale_started {
        return Affordance::StartPresale;
    }
    if !state.presale_started {
        return Affordance::PresaleNotStarted;
    }
    if !state.presale_ended {
        return Affordance::PresaleMint;
    }
    Affordance::PublicMint
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectWallet => write!(f, "Connect your wallet  [type 'connect']"),
            Self::Loading => write!(f, "Loading..."),
            Self::StartPresale => write!(f, "Start Presale!  [type 'start']"),
            Self::PresaleNotStarted => write!(f, "Presale hasn't started!"),
            Self::PresaleMint => write!(
                f,
                "Presale has started! If your address is whitelisted, mint a Mudded NFT  [type 'mint']"
            ),
            Self::PublicMint => write!(f, "Public Mint  [type 'mint']"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(
        connected: bool,
        loading: bool,
        is_owner: bool,
        presale_started: bool,
        presale_ended: bool,
    ) -> AppState {
        AppState {
            connected,
            loading,
            is_owner,
            presale_started,
            presale_ended,
            minted_count: "0".to_owned(),
        }
    }

    #[test]
    fn disconnected_always_asks_to_connect() {
        for loading in [false, true] {
            for is_owner in [false, true] {
                let s = state(false, loading, is_owner, true, true);
                assert_eq!(render(&s), Affordance::ConnectWallet);
            }
        }
    }

    #[test]
    fn loading_overrides_everything_once_connected() {
        for is_owner in [false, true] {
            for started in [false, true] {
                for ended in [false, true] {
                    let s = state(true, true, is_owner, started, ended);
                    assert_eq!(render(&s), Affordance::Loading);
                }
            }
        }
    }

    #[test]
    fn owner_may_start_an_unstarted_presale() {
        let s = state(true, false, true, false, false);
        assert_eq!(render(&s), Affordance::StartPresale);
    }

    #[test]
    fn non_owner_sees_not_started_notice() {
        let s = state(true, false, false, false, false);
        assert_eq!(render(&s), Affordance::PresaleNotStarted);
    }

    #[test]
    fn active_presale_offers_presale_mint_even_to_owner() {
        for is_owner in [false, true] {
            let s = state(true, false, is_owner, true, false);
            assert_eq!(render(&s), Affordance::PresaleMint);
        }
    }

    #[test]
    fn ended_presale_offers_public_mint() {
        for is_owner in [false, true] {
            let s = state(true, false, is_owner, true, true);
            assert_eq!(render(&s), Affordance::PublicMint);
        }
    }

    #[test]
    fn every_flag_combination_yields_exactly_one_affordance() {
        for bits in 0u8..32 {
            let s = state(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            );
            let expected = if !s.connected {
                Affordance::ConnectWallet
            } else if s.loading {
                Affordance::Loading
            } else if s.is_owner && !s.presale_started {
                Affordance::StartPresale
            } else if !s.presale_started {
                Affordance::PresaleNotStarted
            } else if !s.presale_ended {
                Affordance::PresaleMint
            } else {
                Affordance::PublicMint
            };
            assert_eq!(render(&s), expected);
        }
    }
}
