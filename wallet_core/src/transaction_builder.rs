//! Spend validation and unsigned transfer construction.

use hbar_types::{AccountId, Tinybar, TransactionId, ValidStart};

use crate::config::{EngineConfig, FeeDisplay};
use crate::error::EngineError;
use crate::payload::TransferBody;
use crate::record::{OtherParams, SpendInfo, TransactionRecord};

/// Builds unsigned single-output transfers paid by one account.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    sender: AccountId,
    node_account: AccountId,
    currency_code: String,
    default_fee: Tinybar,
    valid_duration_secs: u64,
    fee_display: FeeDisplay,
}

impl TransactionBuilder {
    pub fn new(sender: AccountId, config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            sender,
            node_account: config.node_account()?,
            currency_code: config.currency_code.clone(),
            default_fee: config.default_fee(),
            valid_duration_secs: config.valid_duration_secs,
            fee_display: config.fee_display,
        })
    }

    pub fn sender(&self) -> AccountId {
        self.sender
    }

    /// Validate `spend` and build the unsigned record for it.
    ///
    /// The valid-start instant `now` also fixes the transaction id and the
    /// record date.
    pub fn build_spend(
        &self,
        spend: &SpendInfo,
        now: ValidStart,
    ) -> Result<TransactionRecord, EngineError> {
        if let Some(code) = &spend.currency_code {
            if code != &self.currency_code {
                return Err(EngineError::UnsupportedCurrency(code.clone()));
            }
        }

        let [target] = spend.spend_targets.as_slice() else {
            return Err(EngineError::InvalidSpendTargets {
                count: spend.spend_targets.len(),
            });
        };

        let amount: Tinybar = target
            .native_amount
            .as_deref()
            .ok_or(EngineError::NoAmountSpecified)?
            .parse()
            .map_err(|_| EngineError::NoAmountSpecified)?;

        let recipient: AccountId = target
            .public_address
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidAddress(target.public_address.clone()))?;

        let fee = match &spend.network_fee_override {
            Some(raw) => raw
                .parse::<Tinybar>()
                .map_err(|_| EngineError::InvalidFee(raw.clone()))?,
            None => self.default_fee,
        };

        let body = self.transfer_body(recipient, amount, fee, now);
        let transfer_tx = body.to_bytes()?;

        let network_fee = match self.fee_display {
            FeeDisplay::Separate => fee.to_string(),
            FeeDisplay::Inferred => "0".to_string(),
        };

        let record = TransactionRecord {
            txid: body.transaction_id.to_string(),
            date: now.as_millis(),
            currency_code: self.currency_code.clone(),
            block_height: 0,
            native_amount: amount.negated(),
            network_fee,
            our_receive_addresses: Vec::new(),
            signed_tx: String::new(),
            other_params: OtherParams {
                from_address: self.sender.to_string(),
                to_address: recipient.to_string(),
                transfer_tx,
                signed_tx: Vec::new(),
                tx_hash: String::new(),
            },
        };

        tracing::info!(
            txid = %record.txid,
            from = %self.sender,
            to = %recipient,
            %amount,
            %fee,
            "built spend"
        );
        Ok(record)
    }

    /// The unsigned transfer of `amount` from the sender to `recipient`.
    pub fn transfer_body(
        &self,
        recipient: AccountId,
        amount: Tinybar,
        fee: Tinybar,
        now: ValidStart,
    ) -> TransferBody {
        TransferBody {
            transaction_id: TransactionId::new(self.sender, now),
            node_account: self.node_account,
            fee,
            valid_duration_secs: self.valid_duration_secs,
            memo: String::new(),
            sender: self.sender,
            recipient,
            amount,
        }
    }
}
