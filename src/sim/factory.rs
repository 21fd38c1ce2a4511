//! Strategy factory
//!
//! Builds one collision strategy per brick by sampling a weighted
//! distribution. Roughly half of all bricks are plain removals, the rest
//! split evenly between the four special effects and a composition of two.
//!
//! Composition draws both sides from the special kinds, where drawing
//! "compose" again leaves that side unset. A draw with both sides unset is
//! rejected and redrawn; each side still unset afterwards becomes a nested
//! composition of two plain special effects. Nesting therefore never goes
//! deeper than two levels.

use std::collections::BTreeMap;

use rand::Rng;

use super::strategy::CollisionStrategy;

/// Kinds the factory samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrategyKind {
    ExtraPucks,
    ExtraPaddle,
    CameraChange,
    DroppingHeart,
    Compose,
    Remove,
}

impl StrategyKind {
    /// Kinds a composition side is drawn from (everything but `Remove`)
    pub const SPECIAL: [StrategyKind; 5] = [
        StrategyKind::ExtraPucks,
        StrategyKind::ExtraPaddle,
        StrategyKind::CameraChange,
        StrategyKind::DroppingHeart,
        StrategyKind::Compose,
    ];

    /// Kinds a nested composition is drawn from
    pub const PLAIN_SPECIAL: [StrategyKind; 4] = [
        StrategyKind::ExtraPucks,
        StrategyKind::ExtraPaddle,
        StrategyKind::CameraChange,
        StrategyKind::DroppingHeart,
    ];

    /// Map a uniform draw in [0, 1) to a kind
    pub fn from_draw(draw: f64) -> Self {
        if draw > 0.9 {
            StrategyKind::ExtraPucks
        } else if draw > 0.8 {
            StrategyKind::ExtraPaddle
        } else if draw > 0.7 {
            StrategyKind::CameraChange
        } else if draw > 0.6 {
            StrategyKind::DroppingHeart
        } else if draw > 0.5 {
            StrategyKind::Compose
        } else {
            StrategyKind::Remove
        }
    }

    /// Instantiate a plain strategy. `Compose` has no plain form and
    /// resolves to `None` (the "unset" side of a composition).
    pub fn resolve(self) -> Option<CollisionStrategy> {
        match self {
            StrategyKind::ExtraPucks => Some(CollisionStrategy::SpawnExtraPucks),
            StrategyKind::ExtraPaddle => Some(CollisionStrategy::SpawnExtraPaddle),
            StrategyKind::CameraChange => Some(CollisionStrategy::ToggleCamera),
            StrategyKind::DroppingHeart => Some(CollisionStrategy::AddHeart),
            StrategyKind::Remove => Some(CollisionStrategy::Remove),
            StrategyKind::Compose => None,
        }
    }
}

/// Per-level strategy builder
#[derive(Debug, Default)]
pub struct StrategyFactory {
    /// Top-level kinds built so far
    built: BTreeMap<StrategyKind, usize>,
    /// Composition draws rejected because both sides were unset
    rejected: usize,
}

impl StrategyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the strategy for one brick
    pub fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CollisionStrategy {
        let draw: f64 = rng.random();
        self.from_draw(draw, rng)
    }

    /// Build the strategy selected by `draw`. `rng` is only consulted for
    /// compositions.
    pub fn from_draw<R: Rng + ?Sized>(&mut self, draw: f64, rng: &mut R) -> CollisionStrategy {
        let kind = StrategyKind::from_draw(draw);
        *self.built.entry(kind).or_default() += 1;

        match kind.resolve() {
            Some(strategy) => strategy,
            None => self.compose(rng),
        }
    }

    /// Two special strategies, at most one nested composition per side
    pub fn compose<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CollisionStrategy {
        let (first, second) = loop {
            let first = sample(&StrategyKind::SPECIAL, rng).resolve();
            let second = sample(&StrategyKind::SPECIAL, rng).resolve();
            if first.is_some() || second.is_some() {
                break (first, second);
            }
            self.rejected += 1;
        };

        let first = first.unwrap_or_else(|| nested(&mut *rng));
        let second = second.unwrap_or_else(|| nested(&mut *rng));
        CollisionStrategy::compose(first, second)
    }

    /// How many strategies of each top-level kind were built
    pub fn built(&self) -> &BTreeMap<StrategyKind, usize> {
        &self.built
    }

    pub fn log_summary(&self) {
        log::debug!(
            "Built {} brick strategies {:?} ({} composition redraws)",
            self.built.values().sum::<usize>(),
            self.built,
            self.rejected
        );
    }
}

fn sample<R: Rng + ?Sized>(kinds: &[StrategyKind], rng: &mut R) -> StrategyKind {
    kinds[rng.random_range(0..kinds.len())]
}

/// Composition of two plain special strategies
fn nested<R: Rng + ?Sized>(rng: &mut R) -> CollisionStrategy {
    let mut plain = || {
        sample(&StrategyKind::PLAIN_SPECIAL, &mut *rng)
            .resolve()
            .unwrap_or(CollisionStrategy::Remove)
    };
    let first = plain();
    let second = plain();
    CollisionStrategy::compose(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_well_formed(strategy: &CollisionStrategy) {
        let CollisionStrategy::Compose(a, b) = strategy else {
            panic!("expected a composition, got {strategy:?}");
        };
        for side in [a.as_ref(), b.as_ref()] {
            assert_ne!(side, &CollisionStrategy::Remove);
            if let CollisionStrategy::Compose(x, y) = side {
                for inner in [x.as_ref(), y.as_ref()] {
                    assert!(inner.depth() == 0, "nested too deep: {strategy:?}");
                    assert_ne!(inner, &CollisionStrategy::Remove);
                }
            }
        }
        assert!(strategy.depth() <= 2);
    }

    #[test]
    fn test_draw_thresholds() {
        assert_eq!(StrategyKind::from_draw(0.95), StrategyKind::ExtraPucks);
        assert_eq!(StrategyKind::from_draw(0.85), StrategyKind::ExtraPaddle);
        assert_eq!(StrategyKind::from_draw(0.75), StrategyKind::CameraChange);
        assert_eq!(StrategyKind::from_draw(0.65), StrategyKind::DroppingHeart);
        assert_eq!(StrategyKind::from_draw(0.55), StrategyKind::Compose);
        assert_eq!(StrategyKind::from_draw(0.5), StrategyKind::Remove);
        assert_eq!(StrategyKind::from_draw(0.0), StrategyKind::Remove);
        // Boundaries belong to the lower bucket
        assert_eq!(StrategyKind::from_draw(0.9), StrategyKind::ExtraPaddle);
    }

    #[test]
    fn test_draw_of_095_builds_extra_pucks() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut factory = StrategyFactory::new();
        assert_eq!(factory.from_draw(0.95, &mut rng), CollisionStrategy::SpawnExtraPucks);
        assert_eq!(factory.built().get(&StrategyKind::ExtraPucks), Some(&1));
    }

    #[test]
    fn test_compose_is_well_formed() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut factory = StrategyFactory::new();
        let mut saw_nested = false;
        for _ in 0..2000 {
            let strategy = factory.compose(&mut rng);
            assert_well_formed(&strategy);
            saw_nested |= strategy.depth() == 2;
        }
        assert!(saw_nested, "nested compositions should show up in 2000 draws");
        // P(both unset) = 1/25, so 2000 draws reject some
        assert!(factory.rejected > 0);
    }

    #[test]
    fn test_distribution_roughly_matches_weights() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut factory = StrategyFactory::new();
        for _ in 0..10_000 {
            factory.build(&mut rng);
        }
        let removes = factory.built()[&StrategyKind::Remove];
        let pucks = factory.built()[&StrategyKind::ExtraPucks];
        assert!((4500..5500).contains(&removes), "removes = {removes}");
        assert!((700..1300).contains(&pucks), "pucks = {pucks}");
    }

    proptest! {
        #[test]
        fn built_strategies_stay_within_depth_two(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut factory = StrategyFactory::new();
            for _ in 0..64 {
                let strategy = factory.build(&mut rng);
                prop_assert!(strategy.depth() <= 2);
                if strategy.depth() > 0 {
                    assert_well_formed(&strategy);
                }
            }
        }
    }
}
