//! Engine lifecycle: start, stop, resync, and the spend pipeline entry points.
//!
//! ```text
//! Stopped ──start──▶ Starting ──▶ Running ──stop──▶ Stopped
//!                       ▲            │
//!                       └─Resyncing◀─┘ resync
//! ```
//!
//! Lifecycle transitions are serialized by the poll-loop lock, so a concurrent
//! `start`/`stop`/`resync` never interleave. Spends do not take that lock: a
//! spend in flight is not affected by stop or resync.

use std::sync::Arc;

use hbar_types::{AccountId, KeyPair, PrivateKey, Tinybar};
use tokio::sync::{watch, Mutex, RwLock};

use crate::balance::BalanceTracker;
use crate::broadcaster;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::host::EngineHost;
use crate::ledger::LedgerClient;
use crate::local_data::{OtherData, WalletLocalData};
use crate::poll_loop::PollLoop;
use crate::record::{SpendInfo, TransactionRecord};
use crate::signer;
use crate::transaction_builder::TransactionBuilder;

/// Poll-loop name of the balance refresh.
pub const BALANCE_TASK: &str = "updateBalance";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Starting,
    Running,
    Resyncing,
}

/// Transaction engine for one wallet: one funding account, one private key.
pub struct HbarEngine {
    account: AccountId,
    keys: KeyPair,
    config: EngineConfig,
    builder: TransactionBuilder,
    tracker: BalanceTracker,
    ledger: Arc<dyn LedgerClient>,
    host: Arc<dyn EngineHost>,
    clock: Arc<dyn Clock>,
    local_data: Arc<RwLock<WalletLocalData>>,
    state: watch::Sender<EngineState>,
    poll_loop: Mutex<PollLoop>,
}

impl HbarEngine {
    pub fn new(
        account: AccountId,
        private_key: PrivateKey,
        config: EngineConfig,
        ledger: Arc<dyn LedgerClient>,
        host: Arc<dyn EngineHost>,
        local_data: WalletLocalData,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let keys = hbar_crypto::keypair_from_private(private_key);
        let builder = TransactionBuilder::new(account, &config)?;
        let local_data = Arc::new(RwLock::new(local_data));
        let tracker = BalanceTracker::new(
            account,
            config.currency_code.clone(),
            Arc::clone(&ledger),
            Arc::clone(&host),
            Arc::clone(&local_data),
        );
        let (state, _) = watch::channel(EngineState::Stopped);

        tracing::info!(%account, "engine created");
        Ok(Self {
            account,
            keys,
            config,
            builder,
            tracker,
            ledger,
            host,
            clock: Arc::new(SystemClock),
            local_data,
            state,
            poll_loop: Mutex::new(PollLoop::new()),
        })
    }

    /// Replace the wall clock used for valid-start timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Fetch the balance once, then keep polling it.
    ///
    /// Starting a running engine is a no-op. If the first balance query fails
    /// the engine returns to `Stopped` and the error is returned.
    pub async fn start_engine(&self) -> Result<(), EngineError> {
        let mut poll_loop = self.poll_loop.lock().await;
        if self.state() == EngineState::Running {
            return Ok(());
        }
        self.start_locked(&mut poll_loop).await
    }

    /// Stop polling. Idempotent; in-flight calls finish but are not applied.
    pub async fn kill_engine(&self) {
        let mut poll_loop = self.poll_loop.lock().await;
        self.stop_locked(&mut poll_loop).await;
    }

    /// Stop, reset local sync state, and start from scratch.
    pub async fn resync_blockchain(&self) -> Result<(), EngineError> {
        let mut poll_loop = self.poll_loop.lock().await;
        tracing::info!(account = %self.account, "resyncing");
        self.stop_locked(&mut poll_loop).await;
        self.state.send_replace(EngineState::Resyncing);
        {
            let mut data = self.local_data.write().await;
            data.total_balances.clear();
            data.other_data = OtherData::default();
        }
        self.start_locked(&mut poll_loop).await
    }

    async fn start_locked(&self, poll_loop: &mut PollLoop) -> Result<(), EngineError> {
        tracing::info!(account = %self.account, "starting engine");
        self.state.send_replace(EngineState::Starting);

        if let Err(e) = self.tracker.refresh_balance().await {
            tracing::error!(account = %self.account, error = %e, "engine start failed");
            self.state.send_replace(EngineState::Stopped);
            return Err(e);
        }

        poll_loop.add_to_loop(
            BALANCE_TASK,
            self.config.poll_interval(),
            self.tracker.clone(),
        );
        self.host.on_engine_started();
        self.state.send_replace(EngineState::Running);
        Ok(())
    }

    async fn stop_locked(&self, poll_loop: &mut PollLoop) {
        // pollers check their cancel token under this lock
        let _data = self.local_data.write().await;
        poll_loop.cancel_all();
        if self.state.send_replace(EngineState::Stopped) != EngineState::Stopped {
            tracing::info!(account = %self.account, "engine stopped");
        }
    }

    pub fn state(&self) -> EngineState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Watch lifecycle transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<EngineState> {
        self.state.subscribe()
    }

    // ── Balance ─────────────────────────────────────────────────────────

    /// Query and publish the balance now, outside the poll schedule.
    pub async fn update_balance(&self) -> Result<Tinybar, EngineError> {
        self.tracker.refresh_balance().await
    }

    /// Stored balance for the engine's currency, if one has been fetched.
    pub async fn balance(&self) -> Option<String> {
        self.local_data
            .read()
            .await
            .balance(&self.config.currency_code)
            .map(str::to_string)
    }

    /// Snapshot of the wallet-local state, for the host to persist.
    pub async fn local_data(&self) -> WalletLocalData {
        self.local_data.read().await.clone()
    }

    // ── Spend pipeline ──────────────────────────────────────────────────

    /// Validate a spend request and build its unsigned record.
    pub fn make_spend(&self, spend: &SpendInfo) -> Result<TransactionRecord, EngineError> {
        self.builder
            .build_spend(spend, self.clock.now())
            .inspect_err(|e| tracing::warn!(account = %self.account, error = %e, "spend rejected"))
    }

    pub fn sign_tx(&self, record: &TransactionRecord) -> Result<TransactionRecord, EngineError> {
        signer::sign_transaction(record, &self.keys.private)
    }

    pub async fn broadcast_tx(
        &self,
        record: &TransactionRecord,
    ) -> Result<TransactionRecord, EngineError> {
        broadcaster::broadcast(self.ledger.as_ref(), record).await
    }

    // ── Keys ────────────────────────────────────────────────────────────

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn currency_code(&self) -> &str {
        &self.config.currency_code
    }

    /// DER hex of the private key. Callers own wiping the copy.
    pub fn display_private_seed(&self) -> String {
        self.keys.private.to_der_hex().as_str().to_owned()
    }

    pub fn display_public_seed(&self) -> String {
        self.keys.public.to_string()
    }
}
