use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Transaction, TxType};

/// Share of buys (or sells) needed to call a counterparty one-sided.
const DIRECTION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buyer,
    Seller,
    Mixed,
}

/// Everything the tracked wallets did with a single counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub address: String,
    pub tx_count: usize,
    pub volume_sol: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    pub transfer_count: usize,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
    pub direction: Direction,
    /// The counterparty is itself one of the tracked wallets.
    pub is_own_wallet: bool,
}

impl Interaction {
    fn new(address: &str, timestamp: i64, is_own_wallet: bool) -> Self {
        Self {
            address: address.to_string(),
            tx_count: 0,
            volume_sol: 0.0,
            buy_count: 0,
            sell_count: 0,
            transfer_count: 0,
            first_timestamp: timestamp,
            last_timestamp: timestamp,
            direction: Direction::Mixed,
            is_own_wallet,
        }
    }

    pub fn first_seen(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.first_timestamp, 0)
    }

    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_timestamp, 0)
    }
}

/// Classify a counterparty from the tracked wallets' point of view.
pub fn categorize_direction(buy_count: usize, sell_count: usize) -> Direction {
    let total = buy_count + sell_count;
    if total == 0 {
        return Direction::Mixed;
    }
    let buy_ratio = buy_count as f64 / total as f64;
    let sell_ratio = sell_count as f64 / total as f64;
    if buy_ratio >= DIRECTION_THRESHOLD {
        Direction::Buyer
    } else if sell_ratio >= DIRECTION_THRESHOLD {
        Direction::Seller
    } else {
        Direction::Mixed
    }
}

/// Reduce a transaction list into one [`Interaction`] per counterparty.
///
/// Transactions with no tracked side are skipped. A move between two tracked
/// wallets is attributed to the receiving wallet and counts as neither buy
/// nor sell. The result is sorted by transaction count, descending; equal
/// counts keep first-seen order.
pub fn aggregate_interactions(txs: &[Transaction], tracked: &HashSet<String>) -> Vec<Interaction> {
    let mut by_counterparty: IndexMap<String, Interaction> = IndexMap::new();

    for tx in txs {
        let from_tracked = tracked.contains(&tx.from);
        let to_tracked = tracked.contains(&tx.to);

        let (counterparty, is_buy, is_sell) = match (from_tracked, to_tracked) {
            (false, false) => continue,
            (true, true) => (&tx.to, false, false),
            (true, false) => (&tx.to, false, true),
            (false, true) => (&tx.from, true, false),
        };

        let entry = by_counterparty
            .entry(counterparty.clone())
            .or_insert_with(|| {
                Interaction::new(counterparty, tx.timestamp, from_tracked && to_tracked)
            });

        entry.tx_count += 1;
        entry.volume_sol += tx.amount_sol;
        if is_buy {
            entry.buy_count += 1;
        }
        if is_sell {
            entry.sell_count += 1;
        }
        if tx.tx_type == TxType::Transfer {
            entry.transfer_count += 1;
        }
        entry.first_timestamp = entry.first_timestamp.min(tx.timestamp);
        entry.last_timestamp = entry.last_timestamp.max(tx.timestamp);
    }

    let mut interactions: Vec<Interaction> = by_counterparty
        .into_values()
        .map(|mut i| {
            i.direction = categorize_direction(i.buy_count, i.sell_count);
            i
        })
        .collect();

    // `sort_by` is stable: ties stay in first-seen order.
    interactions.sort_by(|a, b| b.tx_count.cmp(&a.tx_count));
    interactions
}

/// Normalized Shannon entropy of the transaction counts, scaled to 0-100.
///
/// Fewer than two counterparties (or no transactions) scores 0; a perfectly
/// even spread scores 100.
pub fn diversity_score(interactions: &[Interaction]) -> u32 {
    let n = interactions.len();
    if n <= 1 {
        return 0;
    }
    let total: usize = interactions.iter().map(|i| i.tx_count).sum();
    if total == 0 {
        return 0;
    }

    let entropy: f64 = interactions
        .iter()
        .filter(|i| i.tx_count > 0)
        .map(|i| {
            let p = i.tx_count as f64 / total as f64;
            -p * p.ln()
        })
        .sum();

    let normalized = entropy / (n as f64).ln();
    (normalized * 100.0).round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionSummary {
    pub total_counterparties: usize,
    pub total_transactions: usize,
    pub total_volume_sol: f64,
    pub top_counterparty: Option<Interaction>,
    pub diversity_score: u32,
}

pub fn build_summary(interactions: &[Interaction]) -> InteractionSummary {
    let mut top: Option<&Interaction> = None;
    for i in interactions {
        if top.is_none_or(|t| i.tx_count > t.tx_count) {
            top = Some(i);
        }
    }

    InteractionSummary {
        total_counterparties: interactions.len(),
        total_transactions: interactions.iter().map(|i| i.tx_count).sum(),
        total_volume_sol: interactions.iter().map(|i| i.volume_sol).sum(),
        top_counterparty: top.cloned(),
        diversity_score: diversity_score(interactions),
    }
}

/// Look-back window for the interaction view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Earliest unix timestamp inside the window, `None` for [`TimeRange::All`].
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<i64> {
        let span = match self {
            TimeRange::Day => Duration::days(1),
            TimeRange::Week => Duration::days(7),
            TimeRange::Month => Duration::days(30),
            TimeRange::All => return None,
        };
        Some((now - span).timestamp())
    }
}

/// Keep the transactions inside `range`, measured back from `now`.
pub fn filter_range(txs: &[Transaction], range: TimeRange, now: DateTime<Utc>) -> Vec<Transaction> {
    match range.cutoff(now) {
        Some(cutoff) => txs.iter().filter(|tx| tx.timestamp >= cutoff).cloned().collect(),
        None => txs.to_vec(),
    }
}
