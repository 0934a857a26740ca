//! Payout request records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Rejected,
}

/// Insert payload for the `payout_requests` table.
///
/// Only [`NewPayoutRequest::pending`] builds one, so every request this
/// system writes starts out pending. Approval happens outside the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayoutRequest {
    pub user_id: String,
    pub amount: f64,
    status: PayoutStatus,
}

impl NewPayoutRequest {
    pub fn pending(user_id: impl Into<String>, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            status: PayoutStatus::Pending,
        }
    }

    pub fn status(&self) -> PayoutStatus {
        self.status
    }
}
