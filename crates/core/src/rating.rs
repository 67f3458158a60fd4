//! Rating tiers: badge class, label, and star breakdown.

use serde::Serialize;

/// CSS badge class for a 0-10 rating.
///
/// `high` for 8+, `medium` for 5-7, `low` below 5.
pub fn rating_class(rating: u8) -> &'static str {
    match rating {
        8.. => "high",
        5..=7 => "medium",
        _ => "low",
    }
}

/// Human-readable tier label for a 0-10 rating.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        9.. => "Masterpiece",
        8 => "Great",
        7 => "Good",
        6 => "Decent",
        5 => "Average",
        4 => "Below Average",
        _ => "Poor",
    }
}

/// Star breakdown over five slots for a 0-10 rating.
///
/// Filled stars are `rating / 2`; an odd rating adds one half star; the
/// remaining slots are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stars {
    pub filled: u8,
    pub half: bool,
    pub empty: u8,
}

/// Compute the [`Stars`] breakdown for a rating.
pub fn stars(rating: u8) -> Stars {
    let filled = rating / 2;
    let half = rating % 2 == 1;
    let empty = 5 - filled - u8::from(half);

    Stars { filled, half, empty }
}
