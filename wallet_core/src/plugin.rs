//! Plugin entry points: key import, wallet info handling, engine construction.

use std::sync::Arc;

use hbar_types::{AccountId, HBAR_CURRENCY_INFO};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::HbarEngine;
use crate::error::EngineError;
use crate::host::EngineHost;
use crate::ledger::LedgerClient;
use crate::local_data::WalletLocalData;

/// Key material of one wallet, as the host stores it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletKeys {
    pub hedera_account: String,
    pub hedera_private_key: String,
}

impl std::fmt::Debug for WalletKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletKeys")
            .field("hedera_account", &self.hedera_account)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    #[serde(rename = "type")]
    pub wallet_type: String,
    pub keys: WalletKeys,
}

fn check_wallet_type(wallet_type: &str) -> Result<(), EngineError> {
    let plugin = wallet_type.strip_prefix("wallet:").unwrap_or(wallet_type);
    if plugin == HBAR_CURRENCY_INFO.plugin_name {
        Ok(())
    } else {
        Err(EngineError::InvalidWalletType(wallet_type.to_string()))
    }
}

/// New accounts can only be created on the network itself.
pub fn create_private_key(wallet_type: &str) -> Result<WalletKeys, EngineError> {
    check_wallet_type(wallet_type)?;
    Err(EngineError::AccountCreationUnsupported)
}

/// Import `account:privateKey`.
pub fn import_private_key(input: &str) -> Result<WalletKeys, EngineError> {
    let components: Vec<&str> = input.trim().split(':').collect();
    let [account, private_key] = components.as_slice() else {
        return Err(EngineError::Key(
            "expected <account>:<private key>".to_string(),
        ));
    };

    parse_account(account)?;
    hbar_crypto::parse_private_key(private_key)?;

    Ok(WalletKeys {
        hedera_account: account.to_string(),
        hedera_private_key: private_key.to_string(),
    })
}

/// The wallet's public address: its normalized account id.
///
/// Public keys are not unique on the network, so they are never used as
/// addresses.
pub fn derive_public_key(info: &WalletInfo) -> Result<String, EngineError> {
    check_wallet_type(&info.wallet_type)?;
    Ok(parse_account(&info.keys.hedera_account)?.to_string())
}

fn parse_account(s: &str) -> Result<AccountId, EngineError> {
    s.trim()
        .parse()
        .map_err(|e: hbar_types::TypesError| EngineError::Key(e.to_string()))
}

/// Build an engine for `info`, restoring `local_data` if the host kept any.
pub fn make_engine(
    info: &WalletInfo,
    local_data: Option<WalletLocalData>,
    config: EngineConfig,
    ledger: Arc<dyn LedgerClient>,
    host: Arc<dyn EngineHost>,
) -> Result<HbarEngine, EngineError> {
    check_wallet_type(&info.wallet_type)?;
    let account = parse_account(&info.keys.hedera_account)?;
    let private_key = hbar_crypto::parse_private_key(&info.keys.hedera_private_key)?;

    let mut local_data = local_data.unwrap_or_default();
    local_data.public_key = account.to_string();

    HbarEngine::new(account, private_key, config, ledger, host, local_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "302e020100300506032b6570042204200101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn import_splits_account_and_key() {
        let keys = import_private_key(&format!("0.0.1001:{KEY}")).unwrap();
        assert_eq!(keys.hedera_account, "0.0.1001");
        assert_eq!(keys.hedera_private_key, KEY);
    }

    #[test]
    fn import_rejects_wrong_shape() {
        assert!(import_private_key(KEY).is_err());
        assert!(import_private_key(&format!("0.0.1:{KEY}:extra")).is_err());
        assert!(import_private_key("0.0.1:nothex").is_err());
        assert!(import_private_key(&format!("abc:{KEY}")).is_err());
    }

    #[test]
    fn create_is_never_supported() {
        assert!(matches!(
            create_private_key("wallet:hedera"),
            Err(EngineError::AccountCreationUnsupported)
        ));
        assert!(matches!(
            create_private_key("wallet:bitcoin"),
            Err(EngineError::InvalidWalletType(_))
        ));
    }

    #[test]
    fn public_key_is_normalized_account() {
        let info = WalletInfo {
            wallet_type: "wallet:hedera".into(),
            keys: WalletKeys {
                hedera_account: "1001".into(),
                hedera_private_key: KEY.into(),
            },
        };
        assert_eq!(derive_public_key(&info).unwrap(), "0.0.1001");
    }

    #[test]
    fn debug_hides_private_key() {
        let keys = WalletKeys {
            hedera_account: "0.0.1".into(),
            hedera_private_key: KEY.into(),
        };
        assert!(!format!("{keys:?}").contains(KEY));
    }

    #[test]
    fn wallet_info_json_shape() {
        let info: WalletInfo = serde_json::from_str(&format!(
            r#"{{"type":"wallet:hedera","keys":{{"hederaAccount":"0.0.5","hederaPrivateKey":"{KEY}"}}}}"#
        ))
        .unwrap();
        assert_eq!(info.keys.hedera_account, "0.0.5");
    }
}
