use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Card identifier: the creation time in epoch milliseconds, as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out time-derived ids that never repeat within a session, even when
/// two cards are created in the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now_ms: f64) -> CardId {
        let ms = if now_ms.is_finite() && now_ms > 0.0 { now_ms as u64 } else { 0 };
        let id = if ms > self.last { ms } else { self.last + 1 };
        self.last = id;
        CardId(id.to_string())
    }
}

/// Glow colour of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    A,
    B,
    C,
}

impl ColorTag {
    pub const ALL: [ColorTag; 3] = [ColorTag::A, ColorTag::B, ColorTag::C];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn glow(self) -> &'static str {
        match self {
            ColorTag::A => "pink",
            ColorTag::B => "blue",
            ColorTag::C => "purple",
        }
    }

    pub fn glow_class(self) -> &'static str {
        match self {
            ColorTag::A => "glow-pink",
            ColorTag::B => "glow-blue",
            ColorTag::C => "glow-purple",
        }
    }

    /// Accent dot colour (CSS hex).
    pub fn accent(self) -> &'static str {
        match self {
            ColorTag::A => "#ff6b9d",
            ColorTag::B => "#4d9fff",
            ColorTag::C => "#b366ff",
        }
    }
}

/// A task card on the board.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub color_tag: ColorTag,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(id: CardId, title: impl Into<String>, color_tag: ColorTag, now_ms: f64) -> Self {
        let created_at = DateTime::from_timestamp_millis(now_ms as i64).unwrap_or_default();
        Self {
            id,
            title: title.into(),
            description: added_on(&created_at),
            color_tag,
            created_at,
        }
    }
}

/// "Added on M/D/YYYY"
fn added_on(created_at: &DateTime<Utc>) -> String {
    format!("Added on {}", created_at.format("%-m/%-d/%Y"))
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id(1_700_000_000_000.0);
        let b = ids.next_id(1_700_000_000_000.0);
        let c = ids.next_id(1_699_999_999_999.0);
        assert_eq!(a.as_str(), "1700000000000");
        assert_eq!(b.as_str(), "1700000000001");
        assert_eq!(c.as_str(), "1700000000002");
    }

    #[test]
    fn ids_follow_the_clock_when_it_moves_forward() {
        let mut ids = IdGenerator::new();
        ids.next_id(1000.0);
        assert_eq!(ids.next_id(5000.0).as_str(), "5000");
    }

    #[test]
    fn description_uses_creation_date() {
        // 2024-03-05T12:00:00Z
        let card = Card::new(CardId::from("1"), "Buy milk", ColorTag::B, 1_709_640_000_000.0);
        assert_eq!(card.description, "Added on 3/5/2024");
        assert_eq!(card.title, "Buy milk");
    }

    #[test]
    fn random_tags_cover_all_variants() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(ColorTag::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn card_serializes_camel_case() {
        let card = Card::new(CardId::from("42"), "Write report", ColorTag::C, 0.0);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["colorTag"], "C");
        assert!(json["createdAt"].is_string());
    }
}
