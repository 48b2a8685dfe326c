#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure economy rules: tower prices, upgrade costs and effects, and sale refunds.
//!
//! Every function here is a value transformation without hidden state, so the
//! world can compute a speculative upgrade for display and throw it away.

use balloon_defence_core::{Money, PurchaseError, Tower, UpgradeTrack, BASE_TOWER_COST};

/// Range gained per level of the range track.
pub const RANGE_STEP: f32 = 20.0;

/// Projectile speed gained per level of the fire speed track.
pub const PROJECTILE_SPEED_STEP: f32 = 2.0;

/// Shots per second gained per level of the fire speed track.
pub const FIRE_RATE_STEP: f32 = 0.2;

const REFUND_NUMERATOR: u64 = 3;
const REFUND_DENOMINATOR: u64 = 4;

/// Outcome of a successful upgrade purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradePurchase {
    /// Tower with the upgrade applied.
    pub tower: Tower,
    /// Money charged.
    pub cost: Money,
    /// Money left after the charge.
    pub remaining: Money,
}

/// Price of the next level of `track` for `tower`.
///
/// The price grows linearly: `base_cost * (level + 1)`.
#[must_use]
pub fn upgrade_cost(tower: &Tower, track: UpgradeTrack) -> Money {
    let level = tower.upgrades.level(track);
    track.base_cost().saturating_mul(level.saturating_add(1))
}

/// Returns `tower` with the next level of `track` applied.
///
/// The upgrade price is folded into the tower's accumulated cost so later
/// refunds reflect it. A range upgrade forces the range overlay on.
#[must_use]
pub fn apply_upgrade(tower: &Tower, track: UpgradeTrack) -> Tower {
    let mut upgraded = tower.clone();
    upgraded.cost = tower.cost.saturating_add(upgrade_cost(tower, track));
    upgraded.upgrades = tower.upgrades.incremented(track);

    match track {
        UpgradeTrack::Range => {
            upgraded.range += RANGE_STEP;
            upgraded.range_overlay_visible = true;
        }
        UpgradeTrack::FireSpeed => {
            upgraded.projectile_speed += PROJECTILE_SPEED_STEP;
            upgraded.fire_rate += FIRE_RATE_STEP;
        }
        UpgradeTrack::Piercing => {
            upgraded.piercing = upgraded.piercing.saturating_add(1);
        }
    }

    upgraded
}

/// Money returned when `tower` is sold: three quarters of its cost, rounded down.
#[must_use]
pub fn refund(tower: &Tower) -> Money {
    let scaled = u64::from(tower.cost.get()) * REFUND_NUMERATOR / REFUND_DENOMINATOR;
    Money::new(u32::try_from(scaled).unwrap_or(u32::MAX))
}

/// Deducts `price` from `funds`, refusing when the player cannot afford it.
pub fn charge(funds: Money, price: Money) -> Result<Money, PurchaseError> {
    funds
        .checked_sub(price)
        .ok_or(PurchaseError::InsufficientFunds {
            required: price,
            available: funds,
        })
}

/// Pays for a new base tower, returning the money left.
pub fn purchase_tower(funds: Money) -> Result<Money, PurchaseError> {
    charge(funds, BASE_TOWER_COST)
}

/// Pays for the next level of `track` and produces the upgraded tower.
pub fn purchase_upgrade(
    funds: Money,
    tower: &Tower,
    track: UpgradeTrack,
) -> Result<UpgradePurchase, PurchaseError> {
    let cost = upgrade_cost(tower, track);
    let remaining = charge(funds, cost)?;
    Ok(UpgradePurchase {
        tower: apply_upgrade(tower, track),
        cost,
        remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::TowerId;
    use glam::Vec2;
    use proptest::prelude::*;

    fn base_tower() -> Tower {
        Tower::new(TowerId::new(0), Vec2::new(50.0, 50.0))
    }

    #[test]
    fn first_level_costs_base_price() {
        let tower = base_tower();
        assert_eq!(upgrade_cost(&tower, UpgradeTrack::Range), Money::new(50));
        assert_eq!(upgrade_cost(&tower, UpgradeTrack::FireSpeed), Money::new(75));
        assert_eq!(upgrade_cost(&tower, UpgradeTrack::Piercing), Money::new(100));
    }

    #[test]
    fn range_upgrade_extends_range_and_shows_overlay() {
        let tower = base_tower();
        let upgraded = apply_upgrade(&tower, UpgradeTrack::Range);

        assert_eq!(upgraded.range, tower.range + 20.0);
        assert_eq!(upgraded.cost, Money::new(150));
        assert_eq!(upgraded.upgrades.level(UpgradeTrack::Range), 1);
        assert!(upgraded.range_overlay_visible);
        assert_eq!(upgraded.fire_rate, tower.fire_rate);
        assert_eq!(upgrade_cost(&upgraded, UpgradeTrack::Range), Money::new(100));
    }

    #[test]
    fn fire_speed_upgrade_raises_rate_and_projectile_speed() {
        let tower = base_tower();
        let upgraded = apply_upgrade(&tower, UpgradeTrack::FireSpeed);

        assert_eq!(upgraded.projectile_speed, tower.projectile_speed + 2.0);
        assert!((upgraded.fire_rate - 1.2).abs() < 1e-6);
        assert_eq!(upgraded.cost, Money::new(175));
        assert!(!upgraded.range_overlay_visible);
        assert_eq!(upgraded.range, tower.range);
    }

    #[test]
    fn piercing_upgrade_only_touches_piercing() {
        let tower = base_tower();
        let upgraded = apply_upgrade(&tower, UpgradeTrack::Piercing);

        assert_eq!(upgraded.piercing, 1);
        assert_eq!(upgraded.cost, Money::new(200));
        assert_eq!(upgraded.position, tower.position);
        assert_eq!(upgraded.next_shot_at, tower.next_shot_at);
    }

    #[test]
    fn preview_leaves_original_untouched() {
        let tower = base_tower();
        let snapshot = tower.clone();
        let _preview = apply_upgrade(&tower, UpgradeTrack::Range);
        assert_eq!(tower, snapshot);
    }

    #[test]
    fn refund_rounds_down() {
        let mut tower = base_tower();
        assert_eq!(refund(&tower), Money::new(75));
        tower.cost = Money::new(175);
        assert_eq!(refund(&tower), Money::new(131));
    }

    #[test]
    fn refund_grows_with_upgrades() {
        let tower = base_tower();
        let once = apply_upgrade(&tower, UpgradeTrack::Range);
        let upgraded = apply_upgrade(&once, UpgradeTrack::Range);
        assert_eq!(upgraded.cost, Money::new(250));
        assert_eq!(refund(&upgraded), Money::new(187));
    }

    #[test]
    fn purchase_rejects_insufficient_funds() {
        let tower = base_tower();
        let error = purchase_upgrade(Money::new(99), &tower, UpgradeTrack::Piercing)
            .expect_err("cannot afford");
        assert_eq!(
            error,
            PurchaseError::InsufficientFunds {
                required: Money::new(100),
                available: Money::new(99),
            }
        );
    }

    #[test]
    fn purchase_charges_exact_price() {
        let tower = base_tower();
        let purchase =
            purchase_upgrade(Money::new(100), &tower, UpgradeTrack::Piercing).expect("affordable");
        assert_eq!(purchase.cost, Money::new(100));
        assert_eq!(purchase.remaining, Money::ZERO);
        assert_eq!(purchase.tower.piercing, 1);
    }

    #[test]
    fn tower_purchase_costs_base_price() {
        assert_eq!(purchase_tower(Money::new(500)), Ok(Money::new(400)));
        assert!(purchase_tower(Money::new(99)).is_err());
    }

    fn track_strategy() -> impl Strategy<Value = UpgradeTrack> {
        prop_oneof![
            Just(UpgradeTrack::Range),
            Just(UpgradeTrack::FireSpeed),
            Just(UpgradeTrack::Piercing),
        ]
    }

    proptest! {
        #[test]
        fn upgrade_cost_scales_linearly_with_level(track in track_strategy(), levels in 0u32..20) {
            let mut tower = base_tower();
            for _ in 0..levels {
                tower = apply_upgrade(&tower, track);
            }
            let expected = track.base_cost().get() * (levels + 1);
            prop_assert_eq!(upgrade_cost(&tower, track).get(), expected);
        }

        #[test]
        fn refund_is_three_quarters_rounded_down(cost in 0u32..1_000_000) {
            let mut tower = base_tower();
            tower.cost = Money::new(cost);
            let expected = (f64::from(cost) * 0.75).floor() as u32;
            prop_assert_eq!(refund(&tower).get(), expected);
        }
    }
}
