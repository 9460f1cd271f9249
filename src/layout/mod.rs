use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::interactions::Interaction;

/// π(3 − √5): successive bubbles start their spiral a golden angle apart.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
const MAX_ATTEMPTS: usize = 2000;
/// Angle advanced per one-pixel step outward.
const SPIRAL_STEP: f64 = 0.5;
/// Fallback distance from the centre, as a share of the smaller side.
const FALLBACK_DISTANCE: f64 = 0.4;

/// An interaction placed on the bubble chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBubble {
    #[serde(flatten)]
    pub interaction: Interaction,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Map `value` in `[min, max]` to a radius so bubble area grows with the value.
///
/// Equal bounds return the midpoint radius.
pub fn scale_radius(value: f64, min: f64, max: f64, min_radius: f64, max_radius: f64) -> f64 {
    if max == min {
        return (min_radius + max_radius) / 2.0;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    min_radius + t.sqrt() * (max_radius - min_radius)
}

#[derive(Debug, Clone, Copy)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

impl Circle {
    fn inside(&self, cfg: &LayoutConfig) -> bool {
        self.x - self.r >= 0.0
            && self.x + self.r <= cfg.width
            && self.y - self.r >= 0.0
            && self.y + self.r <= cfg.height
    }

    fn clear_of(&self, other: &Circle, padding: f64) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt() >= self.r + other.r + padding
    }
}

/// Lay out interactions as non-overlapping circles, largest first.
///
/// Only the first `max_bubbles` inputs are considered. Placement is fully
/// deterministic: identical input order yields identical coordinates. Output
/// is in placement order (radius descending, ties in input order).
pub fn pack_bubbles(interactions: &[Interaction], cfg: &LayoutConfig) -> Vec<PositionedBubble> {
    let items = &interactions[..interactions.len().min(cfg.max_bubbles)];
    if items.is_empty() {
        return Vec::new();
    }

    let values: Vec<f64> = items.iter().map(|i| i.tx_count as f64).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut sized: Vec<(&Interaction, f64)> = items
        .iter()
        .zip(&values)
        .map(|(i, v)| (i, scale_radius(*v, min, max, cfg.min_radius, cfg.max_radius)))
        .collect();
    sized.sort_by(|a, b| b.1.total_cmp(&a.1));

    let cx = cfg.width / 2.0;
    let cy = cfg.height / 2.0;
    let mut placed: Vec<Circle> = Vec::with_capacity(sized.len());
    let mut out = Vec::with_capacity(sized.len());

    for (interaction, r) in sized {
        let circle = if placed.is_empty() {
            Circle { x: cx, y: cy, r }
        } else {
            find_slot(&placed, r, cfg)
        };
        placed.push(circle);
        out.push(PositionedBubble {
            interaction: interaction.clone(),
            x: circle.x,
            y: circle.y,
            radius: circle.r,
        });
    }
    out
}

/// Walk an outward spiral from the centre until the circle fits.
fn find_slot(placed: &[Circle], r: f64, cfg: &LayoutConfig) -> Circle {
    let cx = cfg.width / 2.0;
    let cy = cfg.height / 2.0;
    let start = placed.len() as f64 * GOLDEN_ANGLE;

    for attempt in 0..MAX_ATTEMPTS {
        let angle = start + attempt as f64 * SPIRAL_STEP;
        let distance = attempt as f64;
        let candidate = Circle {
            x: cx + distance * angle.cos(),
            y: cy + distance * angle.sin(),
            r,
        };
        if candidate.inside(cfg) && placed.iter().all(|p| candidate.clear_of(p, cfg.padding)) {
            return candidate;
        }
    }

    debug!(
        radius = r,
        placed = placed.len(),
        "no free slot after {MAX_ATTEMPTS} attempts, using fallback position"
    );
    let distance = cfg.width.min(cfg.height) * FALLBACK_DISTANCE;
    Circle {
        x: clamp_axis(cx + distance * start.cos(), r, cfg.width),
        y: clamp_axis(cy + distance * start.sin(), r, cfg.height),
        r,
    }
}

/// Keep a coordinate far enough from both edges; centre it if it cannot fit.
fn clamp_axis(v: f64, r: f64, extent: f64) -> f64 {
    if 2.0 * r > extent {
        return extent / 2.0;
    }
    v.clamp(r, extent - r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::Direction;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-6;

    fn interaction(address: &str, tx_count: usize) -> Interaction {
        Interaction {
            address: address.to_string(),
            tx_count,
            volume_sol: 0.0,
            buy_count: 0,
            sell_count: 0,
            transfer_count: 0,
            first_timestamp: 0,
            last_timestamp: 0,
            direction: Direction::Mixed,
            is_own_wallet: false,
        }
    }

    fn addresses(count: usize) -> Vec<Interaction> {
        (0..count).map(|i| interaction(&format!("w{i}"), i + 1)).collect()
    }

    fn assert_in_bounds(bubbles: &[PositionedBubble], cfg: &LayoutConfig) {
        for b in bubbles {
            let id = &b.interaction.address;
            assert!(b.x - b.radius >= -EPS, "{id} leaves left edge");
            assert!(b.x + b.radius <= cfg.width + EPS, "{id} leaves right edge");
            assert!(b.y - b.radius >= -EPS, "{id} leaves top edge");
            assert!(b.y + b.radius <= cfg.height + EPS, "{id} leaves bottom edge");
        }
    }

    fn assert_valid(bubbles: &[PositionedBubble], cfg: &LayoutConfig) {
        assert_in_bounds(bubbles, cfg);
        for (i, a) in bubbles.iter().enumerate() {
            for b in &bubbles[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                assert!(
                    d >= a.radius + b.radius + cfg.padding - EPS,
                    "{} and {} overlap: d={d}",
                    a.interaction.address,
                    b.interaction.address
                );
            }
        }
    }

    #[test]
    fn radius_endpoints() {
        assert_eq!(scale_radius(1.0, 1.0, 50.0, 16.0, 80.0), 16.0);
        assert_eq!(scale_radius(50.0, 1.0, 50.0, 16.0, 80.0), 80.0);
    }

    #[test]
    fn radius_equal_bounds_is_midpoint() {
        assert_eq!(scale_radius(7.0, 7.0, 7.0, 16.0, 80.0), 48.0);
    }

    #[test]
    fn radius_area_is_linear() {
        // Halfway in value → halfway in area above the minimum.
        let r = scale_radius(50.0, 0.0, 100.0, 0.0, 80.0);
        assert!((r * r - 80.0 * 80.0 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn radius_monotonic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let min = rng.gen_range(0.0..50.0);
            let max = min + rng.gen_range(1.0..500.0);
            let mut values: Vec<f64> = (0..20).map(|_| rng.gen_range(min..=max)).collect();
            values.sort_by(f64::total_cmp);
            let radii: Vec<f64> = values
                .iter()
                .map(|v| scale_radius(*v, min, max, 16.0, 80.0))
                .collect();
            assert!(radii.windows(2).all(|w| w[0] <= w[1]));
            assert!(radii.iter().all(|r| (16.0..=80.0).contains(r)));
        }
    }

    #[test]
    fn empty_input() {
        assert!(pack_bubbles(&[], &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn largest_goes_to_centre() {
        let cfg = LayoutConfig::default();
        let items = vec![interaction("small", 1), interaction("big", 40), interaction("mid", 10)];
        let out = pack_bubbles(&items, &cfg);
        assert_eq!(out[0].interaction.address, "big");
        assert_eq!(out[0].x, 300.0);
        assert_eq!(out[0].y, 250.0);
        assert_eq!(out[0].radius, 80.0);
        assert_eq!(out[2].radius, 16.0);
        assert_valid(&out, &cfg);
    }

    #[test]
    fn truncates_in_input_order() {
        let cfg = LayoutConfig { max_bubbles: 3, ..LayoutConfig::default() };
        let items = addresses(6);
        let out = pack_bubbles(&items, &cfg);
        assert_eq!(out.len(), 3);
        let mut kept: Vec<&str> = out.iter().map(|b| b.interaction.address.as_str()).collect();
        kept.sort();
        assert_eq!(kept, vec!["w0", "w1", "w2"]);
    }

    #[test]
    fn deterministic() {
        let cfg = LayoutConfig::default();
        let items: Vec<Interaction> = (0..25)
            .map(|i| interaction(&format!("w{i}"), (i * 7) % 13 + 1))
            .collect();
        let first = pack_bubbles(&items, &cfg);
        let second = pack_bubbles(&items, &cfg);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.radius.to_bits(), b.radius.to_bits());
        }
    }

    #[test]
    fn random_sparse_layouts_never_overlap() {
        let cfg = LayoutConfig {
            width: 900.0,
            height: 800.0,
            min_radius: 10.0,
            max_radius: 30.0,
            padding: 4.0,
            max_bubbles: 50,
        };
        let mut rng = StdRng::seed_from_u64(0x6d65_6174);
        for round in 0..100 {
            let n = rng.gen_range(1..=30);
            let items: Vec<Interaction> = (0..n)
                .map(|i| interaction(&format!("r{round}-{i}"), rng.gen_range(1..=200)))
                .collect();
            let out = pack_bubbles(&items, &cfg);
            assert_eq!(out.len(), n);
            assert_valid(&out, &cfg);
        }
    }

    #[test]
    fn default_config_light_load() {
        let cfg = LayoutConfig::default();
        let counts = [50, 1, 1, 2, 2, 3, 1, 1];
        let items: Vec<Interaction> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| interaction(&format!("w{i}"), *c))
            .collect();
        let out = pack_bubbles(&items, &cfg);
        assert_eq!(out.len(), counts.len());
        assert_valid(&out, &cfg);
    }

    #[test]
    fn fallback_stays_in_bounds() {
        // Far more area than the box holds, but every circle fits on its own.
        let cfg = LayoutConfig {
            width: 200.0,
            height: 150.0,
            min_radius: 10.0,
            max_radius: 30.0,
            ..LayoutConfig::default()
        };
        let out = pack_bubbles(&addresses(40), &cfg);
        assert_eq!(out.len(), 40);
        assert_in_bounds(&out, &cfg);
    }

    #[test]
    fn overcrowded_still_places_everything() {
        let cfg = LayoutConfig { width: 100.0, height: 100.0, ..LayoutConfig::default() };
        let items = addresses(10);
        let out = pack_bubbles(&items, &cfg);
        assert_eq!(out.len(), 10);
        for b in &out {
            assert!(b.x.is_finite() && b.y.is_finite());
        }
    }
}
