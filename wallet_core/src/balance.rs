//! Balance tracking against the ledger.

use std::sync::Arc;

use hbar_types::{AccountId, Tinybar};
use tokio::sync::RwLock;

use crate::error::EngineError;
use crate::host::EngineHost;
use crate::ledger::LedgerClient;
use crate::local_data::WalletLocalData;
use crate::poll_loop::CancelToken;

/// Queries the account balance and publishes it to the wallet-local state.
///
/// The only writer of `total_balances`. Cheap to clone; clones share the same
/// ledger, host and state.
#[derive(Clone)]
pub struct BalanceTracker {
    account: AccountId,
    currency_code: String,
    ledger: Arc<dyn LedgerClient>,
    host: Arc<dyn EngineHost>,
    local_data: Arc<RwLock<WalletLocalData>>,
}

impl BalanceTracker {
    pub fn new(
        account: AccountId,
        currency_code: impl Into<String>,
        ledger: Arc<dyn LedgerClient>,
        host: Arc<dyn EngineHost>,
        local_data: Arc<RwLock<WalletLocalData>>,
    ) -> Self {
        Self {
            account,
            currency_code: currency_code.into(),
            ledger,
            host,
            local_data,
        }
    }

    /// Fetch the balance and publish it. Errors are returned, not retried.
    pub async fn refresh_balance(&self) -> Result<Tinybar, EngineError> {
        let balance = self.fetch_balance().await?;
        self.apply_balance(balance).await;
        Ok(balance)
    }

    /// Query the ledger without touching local state.
    pub async fn fetch_balance(&self) -> Result<Tinybar, EngineError> {
        self.ledger
            .account_balance(&self.account)
            .await
            .inspect_err(|e| {
                tracing::warn!(account = %self.account, error = %e, "balance query failed")
            })
    }

    /// Store `balance` and notify the host. Every call notifies, changed or not.
    pub async fn apply_balance(&self, balance: Tinybar) {
        self.publish(balance, None).await;
    }

    /// As [`apply_balance`](Self::apply_balance), but nothing happens once
    /// `cancel` has fired. Returns whether the balance was published.
    pub async fn apply_balance_unless_cancelled(
        &self,
        balance: Tinybar,
        cancel: &CancelToken,
    ) -> bool {
        self.publish(balance, Some(cancel)).await
    }

    async fn publish(&self, balance: Tinybar, cancel: Option<&CancelToken>) -> bool {
        let balance = balance.to_string();
        let mut data = self.local_data.write().await;
        if cancel.is_some_and(CancelToken::is_cancelled) {
            tracing::debug!(account = %self.account, %balance, "engine stopped, balance dropped");
            return false;
        }
        tracing::debug!(account = %self.account, %balance, "got balance");
        data.total_balances.insert(self.currency_code.clone(), balance.clone());
        // notified under the lock; stopping takes the same lock
        self.host.on_balance_changed(&self.currency_code, &balance);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Receipt;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedBalance(u64);

    #[async_trait]
    impl LedgerClient for FixedBalance {
        async fn account_balance(&self, _account: &AccountId) -> Result<Tinybar, EngineError> {
            Ok(Tinybar::new(self.0))
        }

        async fn submit(&self, _signed_bytes: &[u8]) -> Result<Receipt, EngineError> {
            Err(EngineError::Network("read-only".into()))
        }
    }

    #[derive(Default)]
    struct Notifications(Mutex<Vec<String>>);

    impl EngineHost for Notifications {
        fn on_balance_changed(&self, _currency_code: &str, balance: &str) {
            self.0.lock().unwrap().push(balance.to_string());
        }
    }

    fn tracker(balance: u64) -> (BalanceTracker, Arc<Notifications>) {
        let host = Arc::new(Notifications::default());
        let tracker = BalanceTracker::new(
            AccountId::from_num(2),
            "HBAR",
            Arc::new(FixedBalance(balance)),
            host.clone(),
            Arc::new(RwLock::new(WalletLocalData::new("0.0.2"))),
        );
        (tracker, host)
    }

    #[tokio::test]
    async fn refresh_stores_and_notifies() {
        let (tracker, host) = tracker(42);
        assert_eq!(tracker.refresh_balance().await.unwrap(), Tinybar::new(42));
        assert_eq!(tracker.local_data.read().await.balance("HBAR"), Some("42"));
        assert_eq!(*host.0.lock().unwrap(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn cancelled_result_is_not_published() {
        let (tracker, host) = tracker(42);
        let applied = tracker
            .apply_balance_unless_cancelled(Tinybar::new(42), &CancelToken::fixed(true))
            .await;

        assert!(!applied);
        assert_eq!(tracker.local_data.read().await.balance("HBAR"), None);
        assert!(host.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn live_result_is_published() {
        let (tracker, host) = tracker(0);
        assert!(
            tracker
                .apply_balance_unless_cancelled(Tinybar::new(9), &CancelToken::fixed(false))
                .await
        );
        assert_eq!(tracker.local_data.read().await.balance("HBAR"), Some("9"));
        assert_eq!(host.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancel_waits_for_a_publish_in_progress() {
        let (tracker, _host) = tracker(0);
        let (cancel, rx) = tokio::sync::watch::channel(false);
        let token = CancelToken::from_receiver(rx);

        // a stopper holding the state lock cancels before the publish can check
        let guard = tracker.local_data.write().await;
        let publish = {
            let tracker = tracker.clone();
            let token = token.clone();
            tokio::spawn(async move {
                tracker
                    .apply_balance_unless_cancelled(Tinybar::new(5), &token)
                    .await
            })
        };
        tokio::task::yield_now().await;
        cancel.send_replace(true);
        drop(guard);

        assert!(!publish.await.unwrap());
        assert_eq!(tracker.local_data.read().await.balance("HBAR"), None);
    }
}
