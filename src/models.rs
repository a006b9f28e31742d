use eyre::{Result, WrapErr};
use serde::Deserialize;
use serde_json::Value;

use crate::access::{lookup, lookup_addresses, lookup_array, lookup_i64, lookup_str};

pub const SATOSHIS_PER_BTC: f64 = 1e8;

/// Satoshi amounts are summed as `i128` so that outputs near `u64::MAX`
/// still add up without wrapping.
pub type Satoshis = i128;

pub fn satoshi_to_btc(satoshi: impl Into<Satoshis>) -> f64 {
    satoshi.into() as f64 / SATOSHIS_PER_BTC
}

pub fn format_btc(satoshi: impl Into<Satoshis>) -> String {
    format!("{:.8}", satoshi_to_btc(satoshi))
}

/// Top-level totals of an address page. These fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressSummary {
    pub final_balance: i64,
    pub total_received: i64,
    pub total_sent: i64,
    pub n_tx: u64,
}

impl AddressSummary {
    pub fn from_page(page: &Value) -> Result<Self> {
        AddressSummary::deserialize(page).wrap_err("address page is missing summary fields")
    }
}

/// Borrowed view over one entry of a page's `txs` array.
#[derive(Debug, Clone, Copy)]
pub struct TxRecord<'a> {
    raw: &'a Value,
}

impl<'a> TxRecord<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn hash(&self) -> &'a str {
        lookup_str(self.raw, &["hash"]).unwrap_or_default()
    }

    pub fn received(&self) -> &'a str {
        lookup_str(self.raw, &["received"]).unwrap_or_default()
    }

    pub fn block_height(&self) -> Option<i64> {
        lookup_i64(self.raw, &["block_height"])
    }

    pub fn inputs(&self) -> &'a [Value] {
        lookup_array(self.raw, &["inputs"])
    }

    pub fn outputs(&self) -> &'a [Value] {
        lookup_array(self.raw, &["outputs"])
    }
}

/// Transactions of a page, in API order.
pub fn page_transactions(page: &Value) -> impl Iterator<Item = TxRecord<'_>> {
    lookup_array(page, &["txs"]).iter().map(TxRecord::new)
}

pub fn has_address(entry: &Value, address: &str) -> bool {
    lookup_addresses(entry).any(|a| a == address)
}

/// Integer `value` of an output, 0 when absent or not an integer.
pub fn output_value(output: &Value) -> Satoshis {
    match lookup(output, &["value"]) {
        Some(v) => v
            .as_i64()
            .map(Satoshis::from)
            .or_else(|| v.as_u64().map(Satoshis::from))
            .unwrap_or(0),
        None => 0,
    }
}

pub fn sum_values<'a>(outputs: impl Iterator<Item = &'a Value>) -> Satoshis {
    outputs
        .map(output_value)
        .fold(0, Satoshis::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSummary {
    pub received: String,
    pub amount: Satoshis,
    /// Recipients for sent transactions, senders for received ones.
    pub counterparts: Vec<String>,
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pub sent: Vec<TxSummary>,
    pub received: Vec<TxSummary>,
}
