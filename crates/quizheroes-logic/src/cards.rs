//! Card content — rarity tiers and per-card ability lists.

use crate::abilities::Ability;
use serde::{Deserialize, Serialize};

/// Card rarity tier. Parsed case-insensitively from the stored rarity
/// string; unrecognized strings keep the raw value and sort below common.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Unknown(String),
}

impl Rarity {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "common" => Self::Common,
            "uncommon" => Self::Uncommon,
            "rare" => Self::Rare,
            "epic" => Self::Epic,
            "legendary" => Self::Legendary,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Numeric tier for sorting: 1 (common) through 5 (legendary),
    /// 0 for unrecognized strings.
    pub fn value(&self) -> u32 {
        match self {
            Self::Common => 1,
            Self::Uncommon => 2,
            Self::Rare => 3,
            Self::Epic => 4,
            Self::Legendary => 5,
            Self::Unknown(_) => 0,
        }
    }

    /// Rare, epic, and legendary cards count as rare drops.
    pub fn is_rare(&self) -> bool {
        self.value() >= 3
    }
}

/// A collectible card with its attached abilities. `quantity` tracks
/// copies owned when the card sits in a player collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub card_id: u64,
    pub name: String,
    pub description: String,
    pub category_id: u64,
    /// Raw rarity string; see [`Rarity::parse`].
    pub rarity: String,
    pub quantity: u32,
    pub abilities: Vec<Ability>,
}

impl Card {
    pub fn rarity(&self) -> Rarity {
        Rarity::parse(&self.rarity)
    }

    pub fn is_rare(&self) -> bool {
        self.rarity().is_rare()
    }

    /// Attach an ability, claiming it for this card.
    pub fn add_ability(&mut self, mut ability: Ability) {
        ability.card_id = self.card_id;
        self.abilities.push(ability);
    }

    /// Detach an ability by id. Returns whether anything was removed.
    pub fn remove_ability(&mut self, ability_id: u64) -> bool {
        let before = self.abilities.len();
        self.abilities.retain(|a| a.ability_id != ability_id);
        self.abilities.len() != before
    }

    pub fn increment_quantity(&mut self) {
        self.quantity += 1;
    }

    /// Spend one copy. Returns whether any copies remain.
    pub fn decrement_quantity(&mut self) -> bool {
        self.quantity = self.quantity.saturating_sub(1);
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rarity: &str) -> Card {
        Card {
            card_id: 3,
            name: "Archivist".into(),
            description: String::new(),
            category_id: 1,
            rarity: rarity.into(),
            quantity: 1,
            abilities: Vec::new(),
        }
    }

    fn ability(id: u64) -> Ability {
        Ability {
            ability_id: id,
            card_id: 0,
            name: "Zap".into(),
            description: String::new(),
            effect_type: "damage".into(),
            effect_value: 5,
        }
    }

    #[test]
    fn rarity_values() {
        assert_eq!(Rarity::parse("common").value(), 1);
        assert_eq!(Rarity::parse("Uncommon").value(), 2);
        assert_eq!(Rarity::parse("RARE").value(), 3);
        assert_eq!(Rarity::parse("epic").value(), 4);
        assert_eq!(Rarity::parse("Legendary").value(), 5);
        assert_eq!(Rarity::parse("shiny").value(), 0);
    }

    #[test]
    fn rare_threshold() {
        assert!(!Rarity::parse("common").is_rare());
        assert!(!Rarity::parse("uncommon").is_rare());
        assert!(Rarity::parse("rare").is_rare());
        assert!(Rarity::parse("epic").is_rare());
        assert!(Rarity::parse("legendary").is_rare());
        assert!(!Rarity::parse("shiny").is_rare());
    }

    #[test]
    fn unknown_rarity_keeps_raw() {
        assert_eq!(Rarity::parse("shiny"), Rarity::Unknown("shiny".into()));
    }

    #[test]
    fn ability_attachment_claims_card_id() {
        let mut c = card("rare");
        c.add_ability(ability(9));
        assert_eq!(c.abilities[0].card_id, 3);
        assert!(c.remove_ability(9));
        assert!(!c.remove_ability(9));
    }

    #[test]
    fn quantity_never_underflows() {
        let mut c = card("common");
        c.increment_quantity();
        assert_eq!(c.quantity, 2);
        assert!(c.decrement_quantity());
        assert!(!c.decrement_quantity());
        assert!(!c.decrement_quantity());
        assert_eq!(c.quantity, 0);
    }
}
