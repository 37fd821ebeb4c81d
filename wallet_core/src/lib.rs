//! Wallet engine for HBAR.
//!
//! Provides everything a host wallet needs for one account:
//! - Spend validation and unsigned transfer building
//! - Signing with the wallet's Ed25519 key
//! - Broadcasting through a ledger client
//! - Balance polling and wallet-local state
//! - Engine lifecycle (start, stop, resync)
//!
//! ```text
//! make_spend ──▶ sign_tx ──▶ broadcast_tx
//!  (builder)     (signer)    (broadcaster)
//! ```

pub mod balance;
pub mod broadcaster;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod ledger;
pub mod local_data;
pub mod node_client;
pub mod payload;
pub mod plugin;
pub mod poll_loop;
pub mod record;
pub mod signer;
pub mod transaction_builder;

pub use balance::BalanceTracker;
pub use clock::{Clock, SystemClock};
pub use config::{EngineConfig, FeeDisplay};
pub use engine::{EngineState, HbarEngine, BALANCE_TASK};
pub use error::{EngineError, ErrorKind};
pub use host::EngineHost;
pub use ledger::{LedgerClient, Receipt, STATUS_SUCCESS};
pub use local_data::{OtherData, WalletLocalData};
pub use node_client::GatewayClient;
pub use payload::{SignedTransaction, TransferBody};
pub use plugin::{
    create_private_key, derive_public_key, import_private_key, make_engine, WalletInfo,
    WalletKeys,
};
pub use record::{SpendInfo, SpendTarget, TransactionRecord, SUBMITTED_BLOCK_HEIGHT};
