//! Payment provider port trait.

use async_trait::async_trait;

use crate::domain::checkout::CheckoutSession;
use crate::domain::error::TruefundedError;

#[async_trait]
pub trait PaymentPort {
    /// Creates a hosted checkout session and returns its redirect URL.
    async fn create_checkout_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<String, TruefundedError>;
}
