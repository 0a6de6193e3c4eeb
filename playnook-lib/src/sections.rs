//! Shuffled home-page sections: recommended, VIP, and hot picks.
//!
//! Callers pass the RNG so section contents are reproducible in tests.

use playnook_core::Game;
use rand::Rng;
use rand::seq::SliceRandom;

/// Maximum games shown in the recommended carousel.
pub const RECOMMENDED_PICKS: usize = 10;

/// Maximum games shown in the VIP banner.
pub const VIP_PICKS: usize = 6;

/// Up to [`RECOMMENDED_PICKS`] random recommended games.
pub fn recommended_picks<R: Rng + ?Sized>(games: &[Game], rng: &mut R) -> Vec<Game> {
    picks(games, |g| g.is_recommended, RECOMMENDED_PICKS, rng)
}

/// Up to [`VIP_PICKS`] random VIP games.
pub fn vip_picks<R: Rng + ?Sized>(games: &[Game], rng: &mut R) -> Vec<Game> {
    picks(games, |g| g.vip, VIP_PICKS, rng)
}

/// All hot games in random order.
pub fn shuffled_hot<R: Rng + ?Sized>(games: &[Game], rng: &mut R) -> Vec<Game> {
    picks(games, |g| g.is_hot, usize::MAX, rng)
}

fn picks<R: Rng + ?Sized>(
    games: &[Game],
    pred: impl Fn(&Game) -> bool,
    limit: usize,
    rng: &mut R,
) -> Vec<Game> {
    let mut selected: Vec<Game> = games.iter().filter(|g| pred(g)).cloned().collect();
    selected.shuffle(rng);
    if selected.len() > limit {
        selected.truncate(limit);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Vec<Game> {
        (0..30)
            .map(|i| Game {
                id: format!("g{i}"),
                is_recommended: i % 2 == 0,
                vip: i % 3 == 0,
                is_hot: i % 5 == 0,
                ..Game::default()
            })
            .collect()
    }

    #[test]
    fn test_recommended_picks_capped_and_flagged() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks = recommended_picks(&catalog(), &mut rng);

        assert_eq!(picks.len(), RECOMMENDED_PICKS);
        assert!(picks.iter().all(|g| g.is_recommended));
    }

    #[test]
    fn test_vip_picks_capped_and_flagged() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks = vip_picks(&catalog(), &mut rng);

        assert_eq!(picks.len(), VIP_PICKS);
        assert!(picks.iter().all(|g| g.vip));
    }

    #[test]
    fn test_shuffled_hot_keeps_every_hot_game() {
        let mut rng = StdRng::seed_from_u64(7);
        let all = catalog();
        let hot = shuffled_hot(&all, &mut rng);

        let expected = all.iter().filter(|g| g.is_hot).count();
        assert_eq!(hot.len(), expected);
        assert!(hot.iter().all(|g| g.is_hot));
    }

    #[test]
    fn test_fewer_candidates_than_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let small: Vec<Game> = catalog().into_iter().take(4).collect();
        let picks = recommended_picks(&small, &mut rng);

        assert_eq!(picks.len(), small.iter().filter(|g| g.is_recommended).count());
    }
}
