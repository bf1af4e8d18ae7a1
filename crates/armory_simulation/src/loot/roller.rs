//! Weighted Roller - biased random value внутри [min, max]
//!
//! `u ~ U(0,1)`, `w = u^exponent`, `lerp(min, max, w)`.
//! Exponent > 1 смещает распределение к `min` (rarity curve): чем больше
//! exponent, тем реже выпадают значения у `max`.

use rand::Rng;

use crate::components::{AttachmentModifier, PassiveEffect};
use crate::templates::{AttachmentStatRange, GunStatRange, IntRange, PassiveStatRange, StatRange};

/// Exponent для большинства continuous stats
pub const STAT_EXPONENT: f32 = 2.5;
/// Exponent для bullets-per-shot (сильнее к min)
pub const BULLETS_PER_SHOT_EXPONENT: f32 = 3.0;
/// Exponent для piercing count
pub const PIERCING_EXPONENT: f32 = 2.0;

/// Roll continuous значения. `min > max` трактуется как перевёрнутый range.
pub fn roll_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32, exponent: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };

    let u: f32 = rng.gen();
    let mut w = u.powf(exponent);
    if !w.is_finite() {
        w = 0.0;
    }

    (lo + (hi - lo) * w).clamp(lo, hi)
}

/// То же что `roll_float`, округлённое до ближайшего целого
pub fn roll_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32, exponent: f32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let value = roll_float(rng, lo as f32, hi as f32, exponent).round() as i32;
    value.clamp(lo, hi)
}

impl StatRange {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, exponent: f32) -> f32 {
        roll_float(rng, self.min, self.max, exponent)
    }
}

impl IntRange {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, exponent: f32) -> i32 {
        roll_int(rng, self.min, self.max, exponent)
    }
}

/// Stat range → конкретные значения для одного instance
pub trait RollStats {
    type Rolled;

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Rolled;
}

/// Rolled stats оружия (до раскладки по компонентам)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolledGunStats {
    pub damage: f32,
    pub accuracy: f32,
    pub attack_rate: f32,
    pub recoil_amount: f32,
    pub spread_amount: f32,
    pub reload_time: f32,
    pub ammo_capacity: i32,
    pub durability: i32,
    pub bullets_per_shot: i32,
    pub piercing: i32,
}

impl RollStats for GunStatRange {
    type Rolled = RolledGunStats;

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> RolledGunStats {
        // Порядок roll'ов фиксирован - от него зависит детерминизм по seed
        RolledGunStats {
            damage: self.damage.roll(rng, STAT_EXPONENT),
            accuracy: self.accuracy.roll(rng, STAT_EXPONENT),
            attack_rate: self.attack_rate.roll(rng, STAT_EXPONENT),
            recoil_amount: self.recoil_amount.roll(rng, STAT_EXPONENT),
            spread_amount: self.spread_amount.roll(rng, STAT_EXPONENT),
            reload_time: self.reload_time.roll(rng, STAT_EXPONENT),
            ammo_capacity: self.ammo_capacity.roll(rng, STAT_EXPONENT),
            durability: self.durability.roll(rng, STAT_EXPONENT),
            bullets_per_shot: self.bullets_per_shot.roll(rng, BULLETS_PER_SHOT_EXPONENT),
            piercing: self.piercing.roll(rng, PIERCING_EXPONENT),
        }
    }
}

impl RollStats for AttachmentStatRange {
    type Rolled = AttachmentModifier;

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> AttachmentModifier {
        AttachmentModifier {
            damage: self.damage.roll(rng, STAT_EXPONENT),
            accuracy: self.accuracy.roll(rng, STAT_EXPONENT),
            attack_rate: self.attack_rate.roll(rng, STAT_EXPONENT),
            recoil_amount: self.recoil_amount.roll(rng, STAT_EXPONENT),
            spread_amount: self.spread_amount.roll(rng, STAT_EXPONENT),
            bullets_per_shot: self.bullets_per_shot.roll(rng, BULLETS_PER_SHOT_EXPONENT),
        }
    }
}

impl RollStats for PassiveStatRange {
    type Rolled = PassiveEffect;

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> PassiveEffect {
        PassiveEffect {
            max_health_bonus: self.max_health_bonus.roll(rng, STAT_EXPONENT),
            move_speed_bonus: self.move_speed_bonus.roll(rng, STAT_EXPONENT),
            damage_bonus: self.damage_bonus.roll(rng, STAT_EXPONENT),
            reload_speed_bonus: self.reload_speed_bonus.roll(rng, STAT_EXPONENT),
        }
    }
}
