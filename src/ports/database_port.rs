//! Hosted database port trait.

use async_trait::async_trait;

use crate::domain::error::TruefundedError;
use crate::domain::payout::NewPayoutRequest;
use crate::domain::user::User;

#[async_trait]
pub trait DatabasePort {
    async fn insert_payout_request(&self, request: &NewPayoutRequest)
    -> Result<(), TruefundedError>;

    /// Every row of the `users` table, unfiltered.
    async fn list_users(&self) -> Result<Vec<User>, TruefundedError>;
}
