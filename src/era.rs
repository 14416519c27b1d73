//! Historical eras, quiz tolerances and random year draws.

use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

// --- Era table ---------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EraKey {
    Ancient,
    Medieval,
    EarlyModern,
    Modern,
}

/// Immutable era descriptor. `min..max` is the era's classification range
/// (half-open); random draws use the inclusive `min..=max`.
#[derive(Debug, PartialEq, Eq)]
pub struct Era {
    pub key: EraKey,
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
}

/// Ordered by ascending `max`; each era starts where the previous one ends.
#[rustfmt::skip]
pub static ERAS: [Era; 4] = [
    Era { key: EraKey::Ancient, label: "Ancient", min: -3000, max: 500 },
    Era { key: EraKey::Medieval, label: "Medieval", min: 500, max: 1500 },
    Era { key: EraKey::EarlyModern, label: "Early modern", min: 1500, max: 1900 },
    Era { key: EraKey::Modern, label: "Modern", min: 1900, max: 2025 },
];

/// Tolerance used for keys outside the table.
pub const DEFAULT_TOLERANCE: i64 = 20;

impl EraKey {
    pub const ALL: [EraKey; 4] = [
        EraKey::Ancient,
        EraKey::Medieval,
        EraKey::EarlyModern,
        EraKey::Modern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EraKey::Ancient => "ancient",
            EraKey::Medieval => "medieval",
            EraKey::EarlyModern => "earlymod",
            EraKey::Modern => "modern",
        }
    }

    pub fn era(self) -> &'static Era {
        match self {
            EraKey::Ancient => &ERAS[0],
            EraKey::Medieval => &ERAS[1],
            EraKey::EarlyModern => &ERAS[2],
            EraKey::Modern => &ERAS[3],
        }
    }

    pub fn label(self) -> &'static str {
        self.era().label
    }

    /// Allowed distance (in years) between a guess and the real year.
    pub fn tolerance(self) -> i64 {
        match self {
            EraKey::Ancient => 50,
            EraKey::Medieval => 20,
            EraKey::EarlyModern => 10,
            EraKey::Modern => 5,
        }
    }
}

impl fmt::Display for EraKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EraKey {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EraKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| OverlayError::UnknownEra(s.to_string()))
    }
}

// --- Classification ------------------------------------------------------------

/// Era a year belongs to. Years below the first era count as its first era,
/// years at or past the last boundary as the final era.
pub fn era_for_year(year: i64) -> EraKey {
    ERAS.iter()
        .find(|e| year < e.max)
        .map_or(ERAS[ERAS.len() - 1].key, |e| e.key)
}

pub fn tolerance_for_year(year: i64) -> i64 {
    era_for_year(year).tolerance()
}

/// Tolerance for a string era key, falling back to [`DEFAULT_TOLERANCE`].
pub fn tolerance_for_key(key: &str) -> i64 {
    key.parse::<EraKey>()
        .map_or(DEFAULT_TOLERANCE, EraKey::tolerance)
}

// --- Randomness ------------------------------------------------------------------

/// Uniform year in the era's inclusive bounds.
pub fn random_year_in_era(key: EraKey) -> i64 {
    let era = key.era();
    pick_inclusive(era.min, era.max, random_u32)
}

/// Unbiased draw in `min..=max` by rejection sampling over 32-bit words.
fn pick_inclusive(min: i64, max: i64, mut next: impl FnMut() -> u32) -> i64 {
    debug_assert!(min <= max);
    let span = (max - min + 1) as u64;
    debug_assert!(span <= 1 << 32);
    let words = 1u64 << 32;
    let zone = words - words % span;
    loop {
        let r = u64::from(next());
        if r < zone {
            return min + (r % span) as i64;
        }
    }
}

#[cfg(feature = "rng")]
fn random_u32() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(err) => {
            tracing::debug!(%err, "getrandom failed, using clock LCG");
            clock_lcg()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn random_u32() -> u32 {
    clock_lcg()
}

// Simple linear congruential generator seeded from the clock (not crypto secure).
fn clock_lcg() -> u32 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static STATE: AtomicU64 = AtomicU64::new(0);
    let mut s = STATE.load(Ordering::Relaxed);
    if s == 0 {
        s = clock_seed() | 1;
    }
    s = s
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    STATE.store(s, Ordering::Relaxed);
    (s >> 32) as u32
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64 ^ (js_sys::Date::now() as u64)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_later_era() {
        assert_eq!(era_for_year(499), EraKey::Ancient);
        assert_eq!(era_for_year(500), EraKey::Medieval);
        assert_eq!(era_for_year(1499), EraKey::Medieval);
        assert_eq!(era_for_year(1500), EraKey::EarlyModern);
        assert_eq!(era_for_year(1899), EraKey::EarlyModern);
        assert_eq!(era_for_year(1900), EraKey::Modern);
    }

    #[test]
    fn out_of_table_years_clamp_to_the_ends() {
        assert_eq!(era_for_year(-10_000), EraKey::Ancient);
        assert_eq!(era_for_year(2025), EraKey::Modern);
        assert_eq!(era_for_year(3000), EraKey::Modern);
    }

    #[test]
    fn tolerance_follows_era() {
        assert_eq!(tolerance_for_year(-500), 50);
        assert_eq!(tolerance_for_year(1000), 20);
        assert_eq!(tolerance_for_year(1700), 10);
        assert_eq!(tolerance_for_year(2000), 5);
    }

    #[test]
    fn string_keys_round_trip_and_unknown_keys_fall_back() {
        for key in EraKey::ALL {
            assert_eq!(key.as_str().parse::<EraKey>(), Ok(key));
        }
        assert_eq!(
            "baroque".parse::<EraKey>(),
            Err(OverlayError::UnknownEra("baroque".into()))
        );
        assert_eq!(tolerance_for_key("earlymod"), 10);
        assert_eq!(tolerance_for_key("baroque"), DEFAULT_TOLERANCE);
    }

    #[test]
    fn pick_inclusive_reaches_both_ends() {
        assert_eq!(pick_inclusive(-3000, 500, || 0), -3000);
        assert_eq!(pick_inclusive(-3000, 500, || 3500), 500);
        assert_eq!(pick_inclusive(7, 7, || 123_456), 7);
    }

    #[test]
    fn pick_inclusive_rejects_the_biased_tail() {
        // span 3: zone = 2^32 - (2^32 % 3); u32::MAX lies in the rejected tail.
        let mut draws = vec![2u32, u32::MAX].into_iter().rev();
        assert_eq!(pick_inclusive(0, 2, || draws.next().unwrap()), 2);
    }

    #[test]
    fn clock_lcg_advances() {
        let a = clock_lcg();
        let b = clock_lcg();
        let c = clock_lcg();
        assert!(a != b || b != c);
    }
}
