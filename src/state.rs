use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::catalog::{self, Team};
use crate::selection::{self, DrawFilter, Matchup, PowerLevel};

pub const MAX_HISTORY: usize = 10;

/// Wait before the first card flips, then the extra wait before the second.
pub const FIRST_REVEAL_DELAY: Duration = Duration::from_secs(1);
pub const SECOND_REVEAL_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Picker,
    Browse,
}

#[derive(Debug, Clone)]
pub enum DrawPhase {
    Idle,
    AwaitingFirst {
        matchup: Matchup,
        first_at: Instant,
        second_at: Instant,
    },
    AwaitingSecond {
        matchup: Matchup,
        second_at: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub teams: Vec<Team>,
    pub leagues: Vec<String>,
    pub selected_leagues: HashSet<String>,
    pub power_level: PowerLevel,
    pub screen: Screen,
    pub league_cursor: usize,
    pub browse_selected: usize,
    pub home_card: Option<Team>,
    pub away_card: Option<Team>,
    pub draw: DrawPhase,
    pub history: VecDeque<Matchup>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(teams: Vec<Team>) -> Self {
        let leagues = catalog::league_names(&teams);
        Self {
            teams,
            leagues,
            selected_leagues: HashSet::new(),
            power_level: PowerLevel::default(),
            screen: Screen::Picker,
            league_cursor: 0,
            browse_selected: 0,
            home_card: None,
            away_card: None,
            draw: DrawPhase::Idle,
            history: VecDeque::with_capacity(MAX_HISTORY),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn filter(&self) -> DrawFilter {
        DrawFilter {
            leagues: self.selected_leagues.clone(),
            power: self.power_level,
        }
    }

    pub fn eligible_teams(&self) -> Vec<&Team> {
        let filter = self.filter();
        self.teams
            .iter()
            .filter(|team| filter.admits(team))
            .collect()
    }

    pub fn league_selected(&self, league: &str) -> bool {
        self.selected_leagues.contains(league)
    }

    pub fn toggle_league_under_cursor(&mut self) {
        let Some(league) = self.leagues.get(self.league_cursor) else {
            return;
        };
        if !self.selected_leagues.remove(league) {
            self.selected_leagues.insert(league.clone());
        }
        self.clamp_browse_selection();
    }

    pub fn clear_leagues(&mut self) {
        if self.selected_leagues.is_empty() {
            return;
        }
        self.selected_leagues.clear();
        self.clamp_browse_selection();
        self.push_log("[INFO] League filter cleared");
    }

    pub fn cycle_power(&mut self) {
        self.power_level = self.power_level.next();
        self.clamp_browse_selection();
        self.push_log(format!(
            "[INFO] Power level: {}",
            selection::power_label(self.power_level)
        ));
    }

    pub fn is_drawing(&self) -> bool {
        !matches!(self.draw, DrawPhase::Idle)
    }

    /// Start a draw. A no-op while a reveal is still in flight; the two timers
    /// are fixed once armed and cannot be cancelled.
    pub fn begin_draw<R: Rng>(&mut self, rng: &mut R, now: Instant) {
        if self.is_drawing() {
            return;
        }

        self.home_card = None;
        self.away_card = None;

        let filter = self.filter();
        let pool = selection::eligible(&self.teams, &filter);
        if pool.is_empty() {
            self.push_log("[INFO] No team matches the current filters");
            return;
        }

        let Some(matchup) = selection::pair_from_pool(&pool, rng) else {
            self.push_log("[INFO] No similar-strength opponent in the pool");
            return;
        };

        self.push_log(format!(
            "[INFO] Matchup drawn from {} candidates",
            pool.len()
        ));
        self.draw = DrawPhase::AwaitingFirst {
            matchup,
            first_at: now + FIRST_REVEAL_DELAY,
            second_at: now + FIRST_REVEAL_DELAY + SECOND_REVEAL_DELAY,
        };
    }

    /// Advance the staggered reveal. Driven by the main loop tick.
    pub fn tick(&mut self, now: Instant) {
        match &self.draw {
            DrawPhase::Idle => {}
            DrawPhase::AwaitingFirst {
                matchup,
                first_at,
                second_at,
            } => {
                if now >= *first_at {
                    let matchup = matchup.clone();
                    let second_at = *second_at;
                    self.home_card = Some(matchup.home.clone());
                    self.draw = DrawPhase::AwaitingSecond { matchup, second_at };
                    // Catch up in case the loop stalled past both deadlines.
                    self.tick(now);
                }
            }
            DrawPhase::AwaitingSecond { matchup, second_at } => {
                if now >= *second_at {
                    let matchup = matchup.clone();
                    self.away_card = Some(matchup.away.clone());
                    self.push_log(format!(
                        "[INFO] {} ({}) vs {} ({})",
                        matchup.home.name,
                        matchup.home.ovr(),
                        matchup.away.name,
                        matchup.away.ovr()
                    ));
                    self.record_matchup(matchup);
                    self.draw = DrawPhase::Idle;
                }
            }
        }
    }

    /// Newest first, capped at [`MAX_HISTORY`].
    pub fn record_matchup(&mut self, matchup: Matchup) {
        self.history.push_front(matchup);
        self.history.truncate(MAX_HISTORY);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Picker => {
                let total = self.leagues.len();
                if total == 0 {
                    self.league_cursor = 0;
                    return;
                }
                self.league_cursor = (self.league_cursor + 1) % total;
            }
            Screen::Browse => {
                let total = self.eligible_teams().len();
                if total == 0 {
                    self.browse_selected = 0;
                    return;
                }
                self.browse_selected = (self.browse_selected + 1) % total;
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Picker => {
                let total = self.leagues.len();
                if total == 0 {
                    self.league_cursor = 0;
                    return;
                }
                if self.league_cursor == 0 {
                    self.league_cursor = total - 1;
                } else {
                    self.league_cursor -= 1;
                }
            }
            Screen::Browse => {
                let total = self.eligible_teams().len();
                if total == 0 {
                    self.browse_selected = 0;
                    return;
                }
                if self.browse_selected == 0 {
                    self.browse_selected = total - 1;
                } else {
                    self.browse_selected -= 1;
                }
            }
        }
    }

    fn clamp_browse_selection(&mut self) {
        let total = self.eligible_teams().len();
        if total == 0 {
            self.browse_selected = 0;
        } else if self.browse_selected >= total {
            self.browse_selected = total - 1;
        }
    }
}
