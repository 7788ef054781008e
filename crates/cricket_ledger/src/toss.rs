//! Coin toss for settling a tied match.

use super::types::Side;
use rand::Rng;
use tracing::{debug, instrument};

/// Picks a side with equal probability.
#[instrument(skip(rng))]
pub fn toss<R: Rng + ?Sized>(rng: &mut R) -> Side {
    let side = if rng.gen_bool(0.5) {
        Side::BattingFirst
    } else {
        Side::Chasing
    };
    debug!(?side, "Coin landed");
    side
}
