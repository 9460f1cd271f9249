use serde::Serialize;

use super::EarnedBadge;

/// Loserboard bracket, ordered by the score needed to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Immortal,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Immortal,
    ];

    pub fn min_points(self) -> u64 {
        match self {
            Tier::Bronze => 40,
            Tier::Silver => 25_000,
            Tier::Gold => 100_000,
            Tier::Platinum => 225_000,
            Tier::Immortal => 400_000,
        }
    }

    /// Highest tier whose minimum is reached. Anything below Bronze's
    /// minimum still sits in Bronze.
    pub fn for_score(score: u64) -> Self {
        Tier::ALL
            .iter()
            .rev()
            .find(|t| score >= t.min_points())
            .copied()
            .unwrap_or(Tier::Bronze)
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => Some(Tier::Immortal),
            Tier::Immortal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoserboardStats {
    pub total_score: u64,
    pub tier: Tier,
    pub next_tier: Option<Tier>,
    /// How far through the current tier, 0.0-1.0. Always 1.0 at the top.
    pub progress: f64,
    pub points_to_next: u64,
    pub badge_count: usize,
}

/// Sum of `points × count` over every earned badge.
pub fn total_score(earned: &[EarnedBadge]) -> u64 {
    earned.iter().map(EarnedBadge::points).sum()
}

pub fn loserboard_stats(earned: &[EarnedBadge]) -> LoserboardStats {
    let total_score = total_score(earned);
    let tier = Tier::for_score(total_score);
    let next_tier = tier.next();

    let (progress, points_to_next) = match next_tier {
        Some(next) => {
            let floor = tier.min_points();
            let span = (next.min_points() - floor) as f64;
            let into = total_score.saturating_sub(floor) as f64;
            (
                (into / span).clamp(0.0, 1.0),
                next.min_points().saturating_sub(total_score),
            )
        }
        None => (1.0, 0),
    };

    LoserboardStats {
        total_score,
        tier,
        next_tier,
        progress,
        points_to_next,
        badge_count: earned.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::catalog;

    fn earned(id: &str, count: u32) -> EarnedBadge {
        EarnedBadge {
            badge: catalog::find(id).unwrap(),
            count,
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::for_score(0), Tier::Bronze);
        assert_eq!(Tier::for_score(24_000), Tier::Bronze);
        assert_eq!(Tier::for_score(25_000), Tier::Silver);
        assert_eq!(Tier::for_score(100_000), Tier::Gold);
        assert_eq!(Tier::for_score(225_000), Tier::Platinum);
        assert_eq!(Tier::for_score(400_000), Tier::Immortal);
        assert_eq!(Tier::for_score(u64::MAX), Tier::Immortal);
    }

    #[test]
    fn thresholds_ascend() {
        assert!(Tier::ALL.windows(2).all(|w| w[0].min_points() < w[1].min_points()));
    }

    #[test]
    fn empty_is_bronze_zero_progress() {
        let stats = loserboard_stats(&[]);
        assert_eq!(stats.total_score, 0);
        assert_eq!(stats.tier, Tier::Bronze);
        assert_eq!(stats.next_tier, Some(Tier::Silver));
        assert_eq!(stats.progress, 0.0);
        assert_eq!(stats.points_to_next, 25_000);
        assert_eq!(stats.badge_count, 0);
    }

    #[test]
    fn stackable_scores_points_times_count() {
        // 3 × 4000 + 40
        let badges = vec![earned("gold-mask", 3), earned("first-bag", 1)];
        let stats = loserboard_stats(&badges);
        assert_eq!(stats.total_score, 12_040);
        assert_eq!(stats.tier, Tier::Bronze);
        let expected = (12_040.0 - 40.0) / (25_000.0 - 40.0);
        assert!((stats.progress - expected).abs() < 1e-9);
        assert_eq!(stats.points_to_next, 12_960);
    }

    #[test]
    fn progress_within_silver() {
        // 50 000 + 37 500, i.e. 62 500 into Silver's 75 000-point range
        let badges = vec![earned("unmasked", 5), earned("rainbow-mask", 5)];
        let stats = loserboard_stats(&badges);
        assert_eq!(stats.total_score, 87_500);
        assert_eq!(stats.tier, Tier::Silver);
        assert!((stats.progress - 62_500.0 / 75_000.0).abs() < 1e-9);
    }

    #[test]
    fn top_tier_is_full() {
        let stats = loserboard_stats(&[earned("unmasked", 50)]);
        assert_eq!(stats.tier, Tier::Immortal);
        assert_eq!(stats.next_tier, None);
        assert_eq!(stats.progress, 1.0);
        assert_eq!(stats.points_to_next, 0);
    }
}
