//! Trading account credentials and the figures the bridge reports back.

use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize)]
pub struct AccountCredentials {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: f64,
    pub profit: f64,
}

impl AccountSnapshot {
    /// Balance before the reported profit.
    pub fn starting_balance(&self) -> f64 {
        self.balance - self.profit
    }

    /// Profit as a percentage of the starting balance.
    pub fn return_pct(&self) -> f64 {
        let start = self.starting_balance();
        if start > 0.0 {
            self.profit / start * 100.0
        } else {
            0.0
        }
    }
}
