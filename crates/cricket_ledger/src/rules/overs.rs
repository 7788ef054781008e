//! Over bookkeeping.

use super::super::types::BALLS_PER_OVER;

/// Index into the over list for the next delivery.
///
/// Uses the legal ball count as it stood before the delivery, so extras
/// and the ball that completes an over share the same index.
pub fn over_index(legal_balls_before: u32) -> usize {
    (legal_balls_before / BALLS_PER_OVER) as usize
}

/// Legal balls left in an innings of `max_legal_balls`.
pub fn balls_remaining(legal_balls: u32, max_legal_balls: u32) -> u32 {
    max_legal_balls.saturating_sub(legal_balls)
}

/// Whether another legal ball may be bowled.
pub fn can_bowl(legal_balls: u32, max_legal_balls: u32) -> bool {
    legal_balls < max_legal_balls
}
