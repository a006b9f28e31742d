use std::io::Write;

use eyre::Result;
use tracing::info;

use crate::access::is_blank;
use crate::client::AddressSource;
use crate::history::{collect_history, HistoryOptions};
use crate::models::{format_btc, AddressSummary, TxSummary};

pub const DEFAULT_DISPLAY_LIMIT: usize = 10;
/// Counterparts printed per transaction before eliding the rest.
pub const MAX_COUNTERPARTS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub history: HistoryOptions,
    /// Transactions printed per direction.
    pub display_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            history: HistoryOptions::default(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

/// "a, b, c" with a trailing "..." when more than three were given.
pub fn format_counterparts(addrs: &[String]) -> String {
    let shown = addrs
        .iter()
        .take(MAX_COUNTERPARTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if addrs.len() > MAX_COUNTERPARTS {
        format!("{shown}...")
    } else {
        shown
    }
}

fn write_section<W: Write>(
    out: &mut W,
    title: &str,
    verb: &str,
    preposition: &str,
    txs: &[TxSummary],
    limit: usize,
) -> std::io::Result<()> {
    writeln!(out, "\n{title}:")?;
    for tx in txs.iter().take(limit) {
        writeln!(out, "Transaction ID: {}", tx.hash)?;
        writeln!(out, "{verb}: {} BTC on {}", format_btc(tx.amount), tx.received)?;
        writeln!(out, "  {preposition}: {}", format_counterparts(&tx.counterparts))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print totals and recent sent/received transactions for `address`.
///
/// If the first page cannot be fetched, or comes back blank (`null`, `{}`
/// and the like), a single line is written and the report ends there. A
/// first page without the summary totals is an error.
pub async fn print_report<S, W>(source: &S, address: &str, opts: ReportOptions, out: &mut W) -> Result<()>
where
    S: AddressSource + ?Sized,
    W: Write,
{
    let first = source
        .fetch_page(address, None, opts.history.page_limit)
        .await
        .filter(|page| !is_blank(page));
    let Some(first) = first else {
        writeln!(out, "Unable to fetch data for address: {address}")?;
        return Ok(());
    };
    let summary = AddressSummary::from_page(&first)?;

    writeln!(out, "Address: {address}")?;
    writeln!(out, "Final Balance: {} BTC", format_btc(summary.final_balance))?;
    writeln!(out, "Total Received: {} BTC", format_btc(summary.total_received))?;
    writeln!(out, "Total Sent: {} BTC", format_btc(summary.total_sent))?;
    writeln!(out, "Number of Transactions: {}", summary.n_tx)?;
    writeln!(out, "\nTransactions:")?;

    let history = collect_history(source, address, opts.history).await;
    info!(
        address,
        sent = history.sent.len(),
        received = history.received.len(),
        "History collected"
    );

    write_section(out, "Sent Transactions", "Sent", "To", &history.sent, opts.display_limit)?;
    write_section(out, "Received Transactions", "Received", "From", &history.received, opts.display_limit)?;
    Ok(())
}
