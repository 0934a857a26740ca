//! Trading account bridge port trait.

use async_trait::async_trait;

use crate::domain::account::{AccountCredentials, AccountSnapshot};
use crate::domain::error::TruefundedError;

#[async_trait]
pub trait AccountBridgePort {
    async fn fetch_account(
        &self,
        credentials: &AccountCredentials,
    ) -> Result<AccountSnapshot, TruefundedError>;
}
