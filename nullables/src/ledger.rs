//! Nullable ledger: an in-memory network that settles transfers.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hbar_types::{AccountId, Tinybar};
use hbar_wallet_core::{EngineError, LedgerClient, Receipt, SignedTransaction, STATUS_SUCCESS};

/// An in-memory ledger.
///
/// Submitted transactions are verified and settled: the sender pays amount plus
/// fee, the recipient receives the amount. Failures can be injected.
#[derive(Default)]
pub struct NullLedger {
    state: Mutex<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    balances: HashMap<AccountId, Tinybar>,
    seen: HashSet<String>,
    submitted: Vec<Vec<u8>>,
    balance_queries: usize,
    balance_error: Option<String>,
    submit_error: Option<String>,
    balance_delay: Option<Duration>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, account: AccountId, balance: Tinybar) {
        self.state.lock().unwrap().balances.insert(account, balance);
    }

    pub fn balance_of(&self, account: &AccountId) -> Tinybar {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Make balance queries fail with a network error until cleared with `None`.
    pub fn fail_balance_queries(&self, message: Option<&str>) {
        self.state.lock().unwrap().balance_error = message.map(str::to_string);
    }

    /// Make submissions fail with a network error until cleared with `None`.
    pub fn fail_submissions(&self, message: Option<&str>) {
        self.state.lock().unwrap().submit_error = message.map(str::to_string);
    }

    /// Delay each balance answer, to hold a query in flight.
    pub fn set_balance_delay(&self, delay: Option<Duration>) {
        self.state.lock().unwrap().balance_delay = delay;
    }

    /// Raw bytes of every submission that reached the ledger.
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn balance_queries(&self) -> usize {
        self.state.lock().unwrap().balance_queries
    }

    fn settle(state: &mut LedgerState, signed_bytes: &[u8]) -> Receipt {
        let receipt = |transaction_id: String, status: &str| Receipt {
            transaction_id,
            status: status.to_string(),
        };

        let Ok(signed) = SignedTransaction::from_bytes(signed_bytes) else {
            return receipt(String::new(), "INVALID_TRANSACTION_BODY");
        };
        let Ok(body) = signed.body() else {
            return receipt(String::new(), "INVALID_TRANSACTION_BODY");
        };
        let txid = body.transaction_id.to_string();

        if !signed.verify() {
            return receipt(txid, "INVALID_SIGNATURE");
        }
        if !state.seen.insert(txid.clone()) {
            return receipt(txid, "DUPLICATE_TRANSACTION");
        }

        let balance_of =
            |account: &AccountId| state.balances.get(account).copied().unwrap_or_default();
        let Some(remaining) = body
            .amount
            .checked_add(body.fee)
            .and_then(|cost| balance_of(&body.sender).checked_sub(cost))
        else {
            return receipt(txid, "INSUFFICIENT_PAYER_BALANCE");
        };
        let Some(credited) = balance_of(&body.recipient).checked_add(body.amount) else {
            return receipt(txid, "INVALID_ACCOUNT_AMOUNTS");
        };

        state.balances.insert(body.sender, remaining);
        state.balances.insert(body.recipient, credited);
        receipt(txid, STATUS_SUCCESS)
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn account_balance(&self, account: &AccountId) -> Result<Tinybar, EngineError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.balance_queries += 1;
            state.balance_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock().unwrap();
        if let Some(message) = &state.balance_error {
            return Err(EngineError::Network(message.clone()));
        }
        Ok(state.balances.get(account).copied().unwrap_or_default())
    }

    async fn submit(&self, signed_bytes: &[u8]) -> Result<Receipt, EngineError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.submit_error {
            return Err(EngineError::Network(message.clone()));
        }
        state.submitted.push(signed_bytes.to_vec());
        Ok(Self::settle(&mut state, signed_bytes))
    }
}
