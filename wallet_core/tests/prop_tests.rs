use std::sync::Arc;

use proptest::prelude::*;

use hbar_nullables::{NullClock, NullHost, NullLedger};
use hbar_types::{AccountId, PrivateKey, Tinybar};
use hbar_wallet_core::{
    EngineConfig, EngineError, HbarEngine, SignedTransaction, SpendInfo, SpendTarget,
    WalletLocalData,
};

fn engine(seed: u8) -> HbarEngine {
    let account = AccountId::from_num(2);
    HbarEngine::new(
        account,
        PrivateKey([seed; 32]),
        EngineConfig::default(),
        Arc::new(NullLedger::new()),
        Arc::new(NullHost::new()),
        WalletLocalData::new(account.to_string()),
    )
    .unwrap()
    .with_clock(Arc::new(NullClock::new(1_700_000_000, 0)))
}

fn target(num: u64, amount: u64) -> SpendTarget {
    SpendTarget {
        public_address: format!("0.0.{num}"),
        native_amount: Some(amount.to_string()),
    }
}

proptest! {
    /// The recorded amount is the requested amount with its sign flipped.
    #[test]
    fn native_amount_is_negated_request(amount in any::<u64>(), recipient in 1u64..) {
        let record = engine(1)
            .make_spend(&SpendInfo::single(format!("0.0.{recipient}"), amount.to_string()))
            .unwrap();
        prop_assert_eq!(record.native_amount, Tinybar::new(amount).negated());
        prop_assert_eq!(record.block_height, 0);
        prop_assert_eq!(record.other_params.to_address, format!("0.0.{recipient}"));
    }

    /// Anything other than exactly one target is rejected.
    #[test]
    fn target_count_must_be_one(count in 0usize..6) {
        prop_assume!(count != 1);
        let spend = SpendInfo {
            spend_targets: (0..count as u64).map(|i| target(1000 + i, 1)).collect(),
            ..SpendInfo::default()
        };
        let result = engine(1).make_spend(&spend);
        let is_invalid_count = matches!(result, Err(EngineError::InvalidSpendTargets { count: c }) if c == count);
        prop_assert!(is_invalid_count);
    }

    /// Signing never changes the economic content of a record, and the signed
    /// bytes carry the body that was built.
    #[test]
    fn signing_preserves_record(amount in any::<u64>(), seed in any::<u8>()) {
        let engine = engine(seed);
        let record = engine.make_spend(&SpendInfo::single("0.0.1001", amount.to_string())).unwrap();
        let signed = engine.sign_tx(&record).unwrap();

        prop_assert_eq!(&signed.txid, &record.txid);
        prop_assert_eq!(&signed.native_amount, &record.native_amount);
        prop_assert_eq!(&signed.network_fee, &record.network_fee);
        prop_assert_eq!(&signed.other_params.transfer_tx, &record.other_params.transfer_tx);

        let tx = SignedTransaction::from_bytes(&signed.other_params.signed_tx).unwrap();
        prop_assert!(tx.verify());
        prop_assert_eq!(tx.body().unwrap().amount, Tinybar::new(amount));
    }

    /// Non-numeric amounts never build a record.
    #[test]
    fn non_digit_amounts_rejected(amount in "[0-9]*[a-z.,-][0-9a-z]*") {
        let result = engine(1).make_spend(&SpendInfo::single("0.0.1001", amount));
        prop_assert!(matches!(result, Err(EngineError::NoAmountSpecified)));
    }
}
