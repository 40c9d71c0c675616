//! Faction engagement resolution.
//!
//! The resolver never generates randomness: the caller supplies a seed
//! from an external, auditable source and the same seed always replays to
//! the same outcome. The internal mixing step only spreads that seed and
//! the engagement inputs into a small bias factor.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::factions::FactionId;

/// Side of an engagement, used for faction bonus selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatRole {
    /// The initiating side.
    Attacker,
    /// The holding side.
    Defender,
}

/// Winner of a resolved engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictWinner {
    /// Attacker's adjusted strength was strictly greater.
    Attacker,
    /// Defender's adjusted strength was strictly greater.
    Defender,
    /// Adjusted strengths were exactly equal.
    Draw,
}

/// Outcome of a resolved engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictOutcome {
    /// Damage dealt by the attacker.
    pub attacker_damage: u128,
    /// Damage dealt by the defender.
    pub defender_damage: u128,
    /// Side with the strictly greater adjusted strength.
    pub winner: ConflictWinner,
    /// The derived bias factor in `[0, 50)`, exposed for audit trails.
    pub random_factor: u64,
}

/// Faction strength bonus in percent for a given matchup.
///
/// Law Enforcement digs in (defensive bonus), the Syndicate hits first
/// (offensive bonus), and Vigilantes carry a small general edge plus
/// specific matchup bonuses. The matrix is intentionally non-transitive.
#[must_use]
pub const fn faction_strength_bonus_percent(
    faction: FactionId,
    opponent: FactionId,
    role: CombatRole,
) -> u128 {
    match faction {
        FactionId::LawEnforcement => match role {
            CombatRole::Defender => 20,
            CombatRole::Attacker => 0,
        },
        FactionId::CriminalSyndicate => match role {
            CombatRole::Attacker => 20,
            CombatRole::Defender => 0,
        },
        FactionId::Vigilante => {
            let matchup = match opponent {
                FactionId::CriminalSyndicate => 10,
                FactionId::LawEnforcement => 5,
                _ => 0,
            };
            5 + matchup
        }
        FactionId::Neutral => 0,
    }
}

/// Apply the faction bonus matrix to a raw strength value.
pub fn adjusted_strength(
    faction: FactionId,
    opponent: FactionId,
    strength: u128,
    role: CombatRole,
) -> Result<u128> {
    let bonus = faction_strength_bonus_percent(faction, opponent, role);
    strength
        .checked_mul(100 + bonus)
        .ok_or(EngineError::Overflow("strength adjustment"))
        .map(|scaled| scaled / 100)
}

/// One round of splitmix64-style mixing.
fn mix(state: u64, value: u64) -> u64 {
    let mut z = state
        .wrapping_add(value)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive the `[0, 50)` bias factor from the engagement inputs and seed.
fn derive_random_factor(
    attacker: FactionId,
    defender: FactionId,
    attacker_strength: u128,
    defender_strength: u128,
    seed: u64,
) -> u64 {
    let mut state = mix(seed, u64::from(attacker.id()));
    state = mix(state, u64::from(defender.id()));
    state = mix(state, attacker_strength as u64);
    state = mix(state, (attacker_strength >> 64) as u64);
    state = mix(state, defender_strength as u64);
    state = mix(state, (defender_strength >> 64) as u64);
    state % 50
}

fn damage_dealt(own: u128, opponent: u128) -> Result<u128> {
    own.checked_mul(100)
        .ok_or(EngineError::Overflow("conflict damage"))
        .map(|scaled| scaled / (100 + opponent / 2))
}

/// Resolve an attacker/defender engagement into damage and a winner.
///
/// Both strengths are first adjusted by the faction bonus matrix, then the
/// seed-derived factor in `[0, 50)` biases one side by up to 25%: values
/// below 25 boost the attacker by that percentage, the rest boost the
/// defender by `factor - 25`. Damage follows
/// `adjustedOwn * 100 / (100 + adjustedOpponent / 2)` and the winner is
/// the side with the strictly greater adjusted strength.
pub fn resolve_conflict(
    attacker: FactionId,
    defender: FactionId,
    attacker_strength: u128,
    defender_strength: u128,
    randomness_seed: u64,
) -> Result<ConflictOutcome> {
    let mut attacker_adj =
        adjusted_strength(attacker, defender, attacker_strength, CombatRole::Attacker)?;
    let mut defender_adj =
        adjusted_strength(defender, attacker, defender_strength, CombatRole::Defender)?;

    let random_factor = derive_random_factor(
        attacker,
        defender,
        attacker_strength,
        defender_strength,
        randomness_seed,
    );
    if random_factor < 25 {
        let boost = attacker_adj
            .checked_mul(u128::from(random_factor))
            .ok_or(EngineError::Overflow("attacker bias"))?
            / 100;
        attacker_adj += boost;
    } else {
        let boost = defender_adj
            .checked_mul(u128::from(random_factor - 25))
            .ok_or(EngineError::Overflow("defender bias"))?
            / 100;
        defender_adj += boost;
    }

    let attacker_damage = damage_dealt(attacker_adj, defender_adj)?;
    let defender_damage = damage_dealt(defender_adj, attacker_adj)?;

    let winner = if attacker_adj > defender_adj {
        ConflictWinner::Attacker
    } else if defender_adj > attacker_adj {
        ConflictWinner::Defender
    } else {
        ConflictWinner::Draw
    };

    Ok(ConflictOutcome {
        attacker_damage,
        defender_damage,
        winner,
        random_factor,
    })
}
