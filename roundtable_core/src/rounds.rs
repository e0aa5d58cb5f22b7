//! Round arithmetic over the message log.
//!
//! A round is one complete cycle in which every slot has produced at least
//! one additional message. The count tolerates slots filled out of order or
//! unevenly: it is the largest `n` such that every slot has spoken at least
//! `n` times.

use crate::message::Message;
use std::collections::HashMap;

/// Number of fully completed rounds.
///
/// Zero while any slot in the configured range has yet to speak. Slots
/// observed outside `[0, spot_count)` (recorded under an older, larger
/// configuration) still participate in the minimum.
#[must_use]
pub fn rounds_completed(messages: &[Message], spot_count: usize) -> usize {
    if messages.is_empty() || spot_count == 0 {
        return 0;
    }

    let mut per_slot: HashMap<usize, usize> = HashMap::new();
    for message in messages {
        *per_slot.entry(message.spot_index).or_insert(0) += 1;
    }

    if per_slot.len() < spot_count {
        return 0;
    }
    per_slot.values().copied().min().unwrap_or(0)
}

/// Whether the configured round cap has been reached.
///
/// `max_rounds == 0` means unlimited, never reached.
#[must_use]
pub fn limit_reached(messages: &[Message], spot_count: usize, max_rounds: usize) -> bool {
    max_rounds > 0 && rounds_completed(messages, spot_count) >= max_rounds
}

/// Rounds left under the cap, `None` when unlimited.
#[must_use]
pub fn rounds_remaining(round_count: usize, max_rounds: usize) -> Option<usize> {
    (max_rounds > 0).then(|| max_rounds.saturating_sub(round_count))
}
