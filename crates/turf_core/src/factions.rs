//! Faction definitions and identifiers.

use serde::{Deserialize, Serialize};

/// Number of playable factions (excluding [`FactionId::Neutral`]).
pub const FACTION_COUNT: usize = 3;

/// Number of faction slots including the neutral slot at index 0.
///
/// Per-faction vectors are indexed by [`FactionId::id`], so they carry an
/// always-zero slot for `Neutral`.
pub const FACTION_SLOTS: usize = FACTION_COUNT + 1;

/// Unique identifier for factions.
///
/// Wire/storage id is the discriminant: 0 is reserved for "no faction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FactionId {
    /// No faction affiliation.
    Neutral = 0,
    /// Law Enforcement - order through defense and patrols.
    LawEnforcement = 1,
    /// Criminal Syndicate - profit through aggression.
    CriminalSyndicate = 2,
    /// Vigilante - independents playing both sides.
    Vigilante = 3,
}

impl FactionId {
    /// All playable factions in ascending id order.
    pub const ALL: [FactionId; FACTION_COUNT] = [
        FactionId::LawEnforcement,
        FactionId::CriminalSyndicate,
        FactionId::Vigilante,
    ];

    /// Get the numeric id for this faction.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a faction by numeric id.
    ///
    /// Returns `None` for ids outside `0..=3`.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Neutral),
            1 => Some(Self::LawEnforcement),
            2 => Some(Self::CriminalSyndicate),
            3 => Some(Self::Vigilante),
            _ => None,
        }
    }

    /// Whether this is a real faction rather than the neutral slot.
    #[must_use]
    pub const fn is_aligned(self) -> bool {
        !matches!(self, Self::Neutral)
    }

    /// Get the display name for this faction.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Neutral => "Unaffiliated",
            Self::LawEnforcement => "Law Enforcement",
            Self::CriminalSyndicate => "Criminal Syndicate",
            Self::Vigilante => "The Vigilantes",
        }
    }
}

impl Default for FactionId {
    fn default() -> Self {
        Self::Neutral
    }
}
