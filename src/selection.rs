use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Team;

/// Widest allowed gap between the two sides, on the 0-5 star scale.
pub const MAX_RATING_GAP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerLevel {
    Weak,
    Balanced,
    Strong,
}

impl Default for PowerLevel {
    fn default() -> Self {
        PowerLevel::Balanced
    }
}

impl PowerLevel {
    /// Band check against the derived 0-100 rating.
    pub fn contains(self, ovr: u8) -> bool {
        match self {
            PowerLevel::Weak => ovr < 60,
            PowerLevel::Balanced => (60..80).contains(&ovr),
            PowerLevel::Strong => ovr >= 80,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PowerLevel::Weak => PowerLevel::Balanced,
            PowerLevel::Balanced => PowerLevel::Strong,
            PowerLevel::Strong => PowerLevel::Weak,
        }
    }
}

pub fn power_label(level: PowerLevel) -> &'static str {
    match level {
        PowerLevel::Weak => "WEAK (0-59)",
        PowerLevel::Balanced => "BALANCED (60-79)",
        PowerLevel::Strong => "STRONG (80-100)",
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawFilter {
    /// Allowed league names; empty means every league is in play.
    pub leagues: HashSet<String>,
    pub power: PowerLevel,
}

impl DrawFilter {
    pub fn admits(&self, team: &Team) -> bool {
        if !self.leagues.is_empty() && !self.leagues.contains(&team.league) {
            return false;
        }
        self.power.contains(team.ovr())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub home: Team,
    pub away: Team,
}

pub fn eligible<'a>(teams: &'a [Team], filter: &DrawFilter) -> Vec<&'a Team> {
    teams.iter().filter(|team| filter.admits(team)).collect()
}

/// Pick two similar-strength teams from an already filtered pool. The first
/// side is uniform over the pool; the second is uniform over the pool members
/// within [`MAX_RATING_GAP`] stars of the first, excluding the first by id.
pub fn pair_from_pool<R: Rng>(pool: &[&Team], rng: &mut R) -> Option<Matchup> {
    if pool.is_empty() {
        return None;
    }
    let home = pool[rng.gen_range(0..pool.len())];

    let rivals: Vec<&Team> = pool
        .iter()
        .copied()
        .filter(|team| {
            team.id != home.id && (team.overall_rating - home.overall_rating).abs() <= MAX_RATING_GAP
        })
        .collect();
    if rivals.is_empty() {
        return None;
    }
    let away = rivals[rng.gen_range(0..rivals.len())];

    Some(Matchup {
        home: home.clone(),
        away: away.clone(),
    })
}

pub fn draw_matchup<R: Rng>(teams: &[Team], filter: &DrawFilter, rng: &mut R) -> Option<Matchup> {
    let pool = eligible(teams, filter);
    pair_from_pool(&pool, rng)
}
