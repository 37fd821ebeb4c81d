//! Submission of signed spends.

use hbar_types::TransactionId;

use crate::error::EngineError;
use crate::ledger::LedgerClient;
use crate::payload::SignedTransaction;
use crate::record::{TransactionRecord, SUBMITTED_BLOCK_HEIGHT};

/// Submit the signed payload on `record` and wait for the network's receipt.
///
/// On success the returned record is marked submitted. On failure the error is
/// logged and returned; the input record is untouched and nothing is retried.
pub async fn broadcast(
    ledger: &dyn LedgerClient,
    record: &TransactionRecord,
) -> Result<TransactionRecord, EngineError> {
    let result = submit(ledger, record).await;
    if let Err(e) = &result {
        tracing::error!(txid = %record.txid, error = %e, "broadcast failed");
    }
    result
}

async fn submit(
    ledger: &dyn LedgerClient,
    record: &TransactionRecord,
) -> Result<TransactionRecord, EngineError> {
    if !record.is_signed() {
        return Err(EngineError::Serialization(format!(
            "transaction {} has not been signed",
            record.txid
        )));
    }
    let signed = SignedTransaction::from_bytes(&record.other_params.signed_tx)?;
    if !signed.is_signed() {
        return Err(EngineError::Serialization(format!(
            "transaction {} carries no signatures",
            record.txid
        )));
    }

    let expected = signed.body()?.transaction_id;

    let receipt = ledger.submit(&record.other_params.signed_tx).await?;
    if !receipt.is_success() {
        return Err(EngineError::Rejected {
            status: receipt.status,
        });
    }
    if receipt.transaction_id.parse::<TransactionId>().ok() != Some(expected) {
        return Err(EngineError::ReceiptMismatch {
            expected: expected.to_string(),
            got: receipt.transaction_id,
        });
    }

    tracing::info!(
        txid = %record.txid,
        tx_hash = %record.other_params.tx_hash,
        status = %receipt.status,
        "spend submitted"
    );
    let mut out = record.clone();
    out.block_height = SUBMITTED_BLOCK_HEIGHT;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::ledger::Receipt;
    use crate::record::SpendInfo;
    use crate::signer::sign_transaction;
    use crate::transaction_builder::TransactionBuilder;
    use async_trait::async_trait;
    use hbar_types::{AccountId, Tinybar, ValidStart};
    use std::sync::Mutex;

    /// Answers every submission with a fixed status and records the bytes.
    ///
    /// The receipt names the submitted transaction unless `receipt_txid` is set.
    struct FixedStatusLedger {
        status: &'static str,
        receipt_txid: Option<&'static str>,
        submitted: Mutex<Vec<Vec<u8>>>,
    }

    impl FixedStatusLedger {
        fn new(status: &'static str) -> Self {
            Self {
                status,
                receipt_txid: None,
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LedgerClient for FixedStatusLedger {
        async fn account_balance(&self, _account: &AccountId) -> Result<Tinybar, EngineError> {
            Ok(Tinybar::ZERO)
        }

        async fn submit(&self, signed_bytes: &[u8]) -> Result<Receipt, EngineError> {
            self.submitted.lock().unwrap().push(signed_bytes.to_vec());
            let transaction_id = match self.receipt_txid {
                Some(txid) => txid.to_string(),
                None => SignedTransaction::from_bytes(signed_bytes)?
                    .body()?
                    .transaction_id
                    .to_string(),
            };
            Ok(Receipt {
                transaction_id,
                status: self.status.to_string(),
            })
        }
    }

    fn signed_record() -> TransactionRecord {
        let kp = hbar_crypto::keypair_from_seed(&[8u8; 32]);
        let record = TransactionBuilder::new(AccountId::from_num(2), &EngineConfig::default())
            .unwrap()
            .build_spend(&SpendInfo::single("0.0.1001", "7"), ValidStart::new(1, 2))
            .unwrap();
        sign_transaction(&record, &kp.private).unwrap()
    }

    #[tokio::test]
    async fn success_sets_submitted_marker() {
        let ledger = FixedStatusLedger::new("SUCCESS");
        let record = signed_record();
        let out = broadcast(&ledger, &record).await.unwrap();

        assert_eq!(out.block_height, SUBMITTED_BLOCK_HEIGHT);
        assert_eq!(record.block_height, 0);
        assert_eq!(ledger.submitted.lock().unwrap().as_slice(), &[record.other_params.signed_tx.clone()]);
    }

    #[tokio::test]
    async fn rejection_is_an_error() {
        let ledger = FixedStatusLedger::new("INSUFFICIENT_PAYER_BALANCE");
        let err = broadcast(&ledger, &signed_record()).await.unwrap_err();
        assert!(matches!(err, EngineError::Rejected { ref status } if status == "INSUFFICIENT_PAYER_BALANCE"));
    }

    #[tokio::test]
    async fn receipt_for_another_transaction_is_an_error() {
        let mut ledger = FixedStatusLedger::new("SUCCESS");
        ledger.receipt_txid = Some("0.0.2@1.3");
        let err = broadcast(&ledger, &signed_record()).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::ReceiptMismatch { ref expected, ref got } if expected == "0.0.2@1.2" && got == "0.0.2@1.3"
        ));

        ledger.receipt_txid = Some("");
        assert!(broadcast(&ledger, &signed_record()).await.is_err());
    }

    #[tokio::test]
    async fn unsigned_record_is_never_submitted() {
        let ledger = FixedStatusLedger::new("SUCCESS");
        let mut record = signed_record();
        record.other_params.signed_tx.clear();
        let err = broadcast(&ledger, &record).await.unwrap_err();
        assert!(matches!(err, EngineError::Serialization(_)));
        assert!(ledger.submitted.lock().unwrap().is_empty());
    }
}
