use tracing::{debug, info, warn};

use crate::client::{AddressSource, DEFAULT_PAGE_LIMIT};
use crate::access::lookup_addresses;
use crate::models::{has_address, page_transactions, sum_values, History, Satoshis, TxRecord, TxSummary};

pub const DEFAULT_MAX_BATCHES: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct HistoryOptions {
    /// Upper bound on pages fetched.
    pub max_batches: usize,
    pub page_limit: u32,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_batches: DEFAULT_MAX_BATCHES,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Sent(TxSummary),
    Received(TxSummary),
}

/// Decide the direction of `tx` relative to `address` and summarise it.
///
/// A transaction is "sent" when the address spends one of the inputs. The
/// sent amount is whatever leaves for other addresses (change is excluded);
/// the received amount is whatever lands on the address.
pub fn classify(tx: &TxRecord<'_>, address: &str) -> Classified {
    let inputs = tx.inputs();
    let outputs = tx.outputs();
    let is_sending = inputs.iter().any(|input| has_address(input, address));

    let summary = |amount: Satoshis, counterparts: Vec<String>| TxSummary {
        received: tx.received().to_string(),
        amount,
        counterparts,
        hash: tx.hash().to_string(),
    };

    if is_sending {
        let amount = sum_values(outputs.iter().filter(|output| !has_address(output, address)));
        let recipients = outputs
            .iter()
            .flat_map(lookup_addresses)
            .filter(|addr| *addr != address)
            .map(str::to_string)
            .collect();
        Classified::Sent(summary(amount, recipients))
    } else {
        let amount = sum_values(outputs.iter().filter(|output| has_address(output, address)));
        let senders = inputs
            .iter()
            .flat_map(lookup_addresses)
            .map(str::to_string)
            .collect();
        Classified::Received(summary(amount, senders))
    }
}

/// Page backwards through the history of `address`, splitting transactions
/// into sent and received.
///
/// Stops at the first unavailable or empty page, after `max_batches` pages,
/// or right after the first page that contributed a sent transaction.
pub async fn collect_history<S>(source: &S, address: &str, opts: HistoryOptions) -> History
where
    S: AddressSource + ?Sized,
{
    let mut history = History::default();
    let mut before: Option<i64> = None;

    for page_no in 0..opts.max_batches {
        let Some(page) = source.fetch_page(address, before, opts.page_limit).await else {
            warn!(address, page = page_no, "No page data, stopping");
            break;
        };

        let txs: Vec<TxRecord<'_>> = page_transactions(&page).collect();
        let Some(last) = txs.last() else {
            debug!(address, page = page_no, "Empty page, history exhausted");
            break;
        };

        for tx in &txs {
            match classify(tx, address) {
                Classified::Sent(s) => history.sent.push(s),
                Classified::Received(r) => history.received.push(r),
            }
        }

        info!(
            address,
            page = page_no,
            txs = txs.len(),
            sent = history.sent.len(),
            received = history.received.len(),
            "Page processed"
        );

        before = last.block_height();
        if before.is_none() {
            warn!(address, hash = last.hash(), "Last transaction has no block height, stopping");
            break;
        }

        if !history.sent.is_empty() {
            break;
        }
    }

    history
}
