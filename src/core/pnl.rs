use std::collections::HashSet;

use serde::Serialize;

use super::{Transaction, TxType};

/// Which transaction types count as money out and money in.
#[derive(Debug, Clone, Copy)]
pub struct PnlRules {
    pub spend: &'static [TxType],
    pub earn: &'static [TxType],
}

impl PnlRules {
    /// Main collection: mint price counts as a spend.
    pub const COLLECTION: Self = Self {
        spend: &[TxType::Buy, TxType::Mint],
        earn: &[TxType::Sell],
    };

    /// Geocaches: only marketplace fills. Listings, bids and burns move no SOL.
    pub const GEOCACHE: Self = Self {
        spend: &[TxType::Buy],
        earn: &[TxType::Sell],
    };
}

/// Buy/sell totals for a set of tracked wallets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TradePnl {
    pub spent_sol: f64,
    pub earned_sol: f64,
    pub net_sol: f64,
    pub buy_count: usize,
    pub sell_count: usize,
}

impl TradePnl {
    pub fn trade_count(&self) -> usize {
        self.buy_count + self.sell_count
    }
}

/// Reduce a transaction list into spend/earn totals.
///
/// Transaction types are relative to the tracked wallet, so a transaction
/// only needs to touch the tracked set to be counted.
pub fn trade_pnl(txs: &[Transaction], tracked: &HashSet<String>, rules: PnlRules) -> TradePnl {
    let mut pnl = TradePnl::default();

    for tx in txs.iter().filter(|tx| tx.touches(tracked)) {
        if rules.spend.contains(&tx.tx_type) {
            pnl.spent_sol += tx.amount_sol;
            pnl.buy_count += 1;
        } else if rules.earn.contains(&tx.tx_type) {
            pnl.earned_sol += tx.amount_sol;
            pnl.sell_count += 1;
        }
    }

    pnl.net_sol = pnl.earned_sol - pnl.spent_sol;
    pnl
}
