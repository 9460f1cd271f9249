use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::badges::{self, EarnedBadge, LoserboardStats};
use crate::config::Config;
use crate::core::pnl::{PnlRules, TradePnl, trade_pnl};
use crate::core::tracked_set;
use crate::geocache::{GeocacheStats, geocache_stats};
use crate::interactions::{self, Interaction, InteractionSummary};
use crate::layout::{PositionedBubble, pack_bubbles};
use crate::prep::{AggregatedPrep, prep_for_wallets};
use crate::snapshot::Snapshot;

/// Where the badge list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeSource {
    ExternalFeed,
    Holdings,
}

/// Everything the dashboard renders for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub prep: AggregatedPrep,
    pub collection_pnl: TradePnl,
    pub interactions: Vec<Interaction>,
    pub interaction_summary: InteractionSummary,
    pub bubbles: Vec<PositionedBubble>,
    pub geocache: GeocacheStats,
    pub badge_source: BadgeSource,
    pub badges: Vec<EarnedBadge>,
    pub loserboard: LoserboardStats,
}

/// Run every computation over a snapshot.
pub fn build(snapshot: &Snapshot, config: &Config) -> DashboardReport {
    let tracked = tracked_set(&config.wallets);

    let prep = prep_for_wallets(&config.wallets, &snapshot.assets);
    let collection_pnl = trade_pnl(&snapshot.transactions, &tracked, PnlRules::COLLECTION);

    let in_range = interactions::filter_range(
        &snapshot.transactions,
        config.interactions.range,
        snapshot.generated_at,
    );
    debug!(
        kept = in_range.len(),
        total = snapshot.transactions.len(),
        range = ?config.interactions.range,
        "Filtered transactions by range"
    );
    let interactions = interactions::aggregate_interactions(&in_range, &tracked);
    let interaction_summary = interactions::build_summary(&interactions);
    let bubbles = pack_bubbles(&interactions, &config.layout);

    let geocache = geocache_stats(&snapshot.geocaches, &snapshot.geocache_transactions, &tracked);

    let (badge_source, badges) = match &snapshot.external_badges {
        Some(feed) if config.badges.use_external_feed && !feed.is_empty() => (
            BadgeSource::ExternalFeed,
            badges::earned_from_external(feed, &snapshot.assets, &snapshot.geocaches),
        ),
        _ => (
            BadgeSource::Holdings,
            badges::earned_from_holdings(
                &snapshot.assets,
                &snapshot.geocaches,
                &config.badges.manual_awards,
            ),
        ),
    };
    let loserboard = badges::loserboard_stats(&badges);

    info!(
        daily_prep = prep.total_daily,
        counterparties = interaction_summary.total_counterparties,
        diversity = interaction_summary.diversity_score,
        score = loserboard.total_score,
        tier = ?loserboard.tier,
        source = ?badge_source,
        "Dashboard report built"
    );

    DashboardReport {
        generated_at: snapshot.generated_at,
        prep,
        collection_pnl,
        interactions,
        interaction_summary,
        bubbles,
        geocache,
        badge_source,
        badges,
        loserboard,
    }
}
