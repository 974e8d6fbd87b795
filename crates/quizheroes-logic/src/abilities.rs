//! Ability effect classification and resolution.
//!
//! Card abilities carry a free-form effect type string in content storage.
//! The engine classifies it into a closed set of semantic categories and
//! resolves the effective magnitude against the acting character's
//! attribute bonuses. Unrecognized effect types are never an error: they
//! keep the raw string for diagnostics and resolve with no bonus.

use crate::progression::Character;
use serde::{Deserialize, Serialize};

/// Semantic effect category of a card ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// `damage` or `attack` — scales with strength.
    Attack,
    /// `heal` or `healing` — scales with wisdom.
    Healing,
    /// `buff` — scales with intelligence.
    Buff,
    /// `debuff` — scales with intelligence.
    Debuff,
    /// Anything else. Carries the original string so callers can log it.
    Unclassified(String),
}

impl EffectKind {
    /// Classify a raw effect type string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "damage" | "attack" => Self::Attack,
            "heal" | "healing" => Self::Healing,
            "buff" => Self::Buff,
            "debuff" => Self::Debuff,
            _ => Self::Unclassified(raw.to_string()),
        }
    }
}

/// A card ability as loaded from content storage. Immutable for the
/// duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub ability_id: u64,
    pub card_id: u64,
    pub name: String,
    pub description: String,
    /// Raw effect type string; see [`EffectKind::parse`].
    pub effect_type: String,
    /// Base magnitude. Sign is unconstrained — debuffs may be negative.
    pub effect_value: i32,
}

impl Ability {
    pub fn effect_kind(&self) -> EffectKind {
        EffectKind::parse(&self.effect_type)
    }

    pub fn is_attack(&self) -> bool {
        self.effect_kind() == EffectKind::Attack
    }

    pub fn is_healing(&self) -> bool {
        self.effect_kind() == EffectKind::Healing
    }

    pub fn is_buff(&self) -> bool {
        self.effect_kind() == EffectKind::Buff
    }

    pub fn is_debuff(&self) -> bool {
        self.effect_kind() == EffectKind::Debuff
    }
}

/// Effective magnitude of an ability when used by `character`.
///
/// Attacks add the strength bonus, healing the wisdom bonus, buffs and
/// debuffs the intelligence bonus. Unclassified effects get no bonus and
/// resolve to the flat base value.
pub fn effective_value(ability: &Ability, character: &Character) -> i32 {
    let bonus = match ability.effect_kind() {
        EffectKind::Attack => character.strength_bonus(),
        EffectKind::Healing => character.wisdom_bonus(),
        EffectKind::Buff | EffectKind::Debuff => character.intelligence_bonus(),
        EffectKind::Unclassified(_) => 0,
    };
    ability.effect_value + bonus as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(effect_type: &str, effect_value: i32) -> Ability {
        Ability {
            ability_id: 1,
            card_id: 1,
            name: "Test".into(),
            description: String::new(),
            effect_type: effect_type.into(),
            effect_value,
        }
    }

    fn character() -> Character {
        let mut c = Character::new(1, "Hero");
        c.strength = 15;
        c.wisdom = 10;
        c.intelligence = 25;
        c
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(EffectKind::parse("DAMAGE"), EffectKind::Attack);
        assert_eq!(EffectKind::parse("Attack"), EffectKind::Attack);
        assert_eq!(EffectKind::parse("heal"), EffectKind::Healing);
        assert_eq!(EffectKind::parse("HeAlInG"), EffectKind::Healing);
        assert_eq!(EffectKind::parse("buff"), EffectKind::Buff);
        assert_eq!(EffectKind::parse("DEBUFF"), EffectKind::Debuff);
    }

    #[test]
    fn unknown_kind_keeps_raw_string() {
        assert_eq!(
            EffectKind::parse("mystery"),
            EffectKind::Unclassified("mystery".into())
        );
    }

    #[test]
    fn predicates() {
        assert!(ability("damage", 1).is_attack());
        assert!(ability("attack", 1).is_attack());
        assert!(ability("healing", 1).is_healing());
        assert!(ability("buff", 1).is_buff());
        assert!(ability("debuff", 1).is_debuff());
        assert!(!ability("buff", 1).is_attack());
    }

    #[test]
    fn attack_adds_strength_bonus() {
        // strength 15 → bonus 3
        let v = effective_value(&ability("DAMAGE", 10), &character());
        assert_eq!(v, 13);
    }

    #[test]
    fn healing_adds_wisdom_bonus() {
        let v = effective_value(&ability("heal", 20), &character());
        assert_eq!(v, 22);
    }

    #[test]
    fn buff_and_debuff_add_intelligence_bonus() {
        let c = character();
        assert_eq!(effective_value(&ability("buff", 5), &c), 10);
        assert_eq!(effective_value(&ability("debuff", -5), &c), 0);
    }

    #[test]
    fn unclassified_gets_no_bonus() {
        let v = effective_value(&ability("mystery", 42), &character());
        assert_eq!(v, 42);
    }

    #[test]
    fn negative_base_value_survives_resolution() {
        let v = effective_value(&ability("debuff", -12), &character());
        assert_eq!(v, -7);
    }
}
