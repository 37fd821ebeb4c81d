//! Signing of built spends.

use hbar_types::PrivateKey;

use crate::error::EngineError;
use crate::payload::SignedTransaction;
use crate::record::TransactionRecord;

/// Sign the unsigned payload carried on `record`.
///
/// Returns a new record with the signed bytes populated; every other field is
/// copied unchanged. Re-signing an already signed record signs the original
/// body again, so the result is the same.
pub fn sign_transaction(
    record: &TransactionRecord,
    private_key: &PrivateKey,
) -> Result<TransactionRecord, EngineError> {
    let mut signed = SignedTransaction::from_body_bytes(record.other_params.transfer_tx.clone())
        .inspect_err(|e| tracing::error!(txid = %record.txid, error = %e, "cannot sign spend"))?;
    signed.sign(private_key);
    let signed_bytes = signed.to_bytes()?;

    let mut out = record.clone();
    out.signed_tx = hex::encode(&signed_bytes);
    out.other_params.tx_hash = hex::encode(hbar_crypto::transaction_hash(&signed_bytes));
    out.other_params.signed_tx = signed_bytes;

    tracing::debug!(txid = %out.txid, tx_hash = %out.other_params.tx_hash, "signed spend");
    Ok(out)
}
