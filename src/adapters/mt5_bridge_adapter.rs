//! MT5 account bridge.
//!
//! No bridge service is wired up yet: every lookup answers with the same
//! demo figures, whatever credentials were supplied.

use async_trait::async_trait;

use crate::domain::account::{AccountCredentials, AccountSnapshot};
use crate::domain::error::TruefundedError;
use crate::ports::account_bridge_port::AccountBridgePort;

pub const STUB_BALANCE: f64 = 100_000.0;
pub const STUB_PROFIT: f64 = 1_250.0;

#[derive(Debug, Default, Clone)]
pub struct StubMt5Bridge;

impl StubMt5Bridge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccountBridgePort for StubMt5Bridge {
    async fn fetch_account(
        &self,
        credentials: &AccountCredentials,
    ) -> Result<AccountSnapshot, TruefundedError> {
        // TODO: call the MT5 manager API once the bridge host and its auth scheme are chosen.
        tracing::debug!(login = %credentials.login, "account lookup answered by stub bridge");
        Ok(AccountSnapshot {
            balance: STUB_BALANCE,
            profit: STUB_PROFIT,
        })
    }
}
