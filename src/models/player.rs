//! Player (participant) and skill tier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches, byes and lookups).
pub type PlayerId = Uuid;

/// Self-reported playing level, used to balance event rounds.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Low,
    Medium,
    High,
}

impl SkillLevel {
    /// Numeric weight of the tier (Low=1, Medium=2, High=3).
    pub fn weight(self) -> u32 {
        match self {
            SkillLevel::Low => 1,
            SkillLevel::Medium => 2,
            SkillLevel::High => 3,
        }
    }

    /// Parse a tier name as typed by an organizer (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" | "beginner" => Some(SkillLevel::Low),
            "medium" | "m" | "mid" | "intermediate" => Some(SkillLevel::Medium),
            "high" | "h" | "advanced" => Some(SkillLevel::High),
            _ => None,
        }
    }
}

/// A player on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<SkillLevel>,
    /// Plays normally but is left out of the prize standings.
    #[serde(default)]
    pub prize_exempt: bool,
    /// Event mode only. `None` means active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Player {
    /// Create a new player with the given name. Optional fields start unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nickname: None,
            skill_level: None,
            prize_exempt: false,
            is_active: None,
        }
    }

    pub fn with_skill(mut self, skill: SkillLevel) -> Self {
        self.skill_level = Some(skill);
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn exempt_from_prizes(mut self) -> Self {
        self.prize_exempt = true;
        self
    }

    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }

    /// Flip the active flag; an unset flag counts as active.
    pub fn toggle_active(&mut self) {
        self.is_active = Some(!self.active());
    }

    /// Skill weight used for balancing; unrated players count as Medium.
    pub fn skill_weight(&self) -> u32 {
        self.skill_level.unwrap_or(SkillLevel::Medium).weight()
    }
}
