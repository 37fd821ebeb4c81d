//! Currency metadata for the native coin.

use serde::Serialize;

/// A display denomination: `multiplier` tinybars per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Denomination {
    pub name: &'static str,
    pub multiplier: u64,
    pub symbol: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub currency_code: &'static str,
    pub display_name: &'static str,
    pub plugin_name: &'static str,
    pub wallet_type: &'static str,
    pub denominations: &'static [Denomination],
}

pub const HBAR_CURRENCY_INFO: CurrencyInfo = CurrencyInfo {
    currency_code: "HBAR",
    display_name: "Hedera HBAR",
    plugin_name: "hedera",
    wallet_type: "wallet:hedera",
    denominations: &[
        Denomination {
            name: "HBAR",
            multiplier: crate::amount::TINYBARS_PER_HBAR,
            symbol: "ℏ",
        },
        Denomination {
            name: "tHBAR",
            multiplier: 1,
            symbol: "tℏ",
        },
    ],
};
