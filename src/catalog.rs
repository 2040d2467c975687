use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_PATH: &str = "data/teams_data.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub league: String,
    /// Star rating on the 0-5 scale, half-star increments in practice.
    pub overall_rating: f32,
    pub stats: TeamStats,
    pub logo: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub attack: f32,
    pub midfield: f32,
    pub defense: f32,
    pub goalkeeper: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TeamsFile {
    teams: Vec<Team>,
}

impl Team {
    /// Overall rating on the 0-100 scale shown in the UI.
    pub fn ovr(&self) -> u8 {
        scale_to_100(self.overall_rating)
    }
}

/// Convert a 0-5 star value to the 0-100 display scale.
pub fn scale_to_100(rating: f32) -> u8 {
    (rating * 20.0).round() as u8
}

pub fn data_path() -> PathBuf {
    env::var("TEAMS_DATA_PATH")
        .ok()
        .filter(|val| !val.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read team catalog {}", path.display()))?;
    parse_teams(&raw).with_context(|| format!("parse team catalog {}", path.display()))
}

pub fn parse_teams(raw: &str) -> Result<Vec<Team>> {
    let file = serde_json::from_str::<TeamsFile>(raw).context("decode teams json")?;
    Ok(file.teams)
}

/// Sorted, de-duplicated league names across the catalog.
pub fn league_names(teams: &[Team]) -> Vec<String> {
    let set: BTreeSet<&str> = teams.iter().map(|t| t.league.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

pub fn format_updated(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return "unknown".to_string();
    }
    if let Some(date) = parse_updated(cleaned) {
        return date.format("%d %b %Y").to_string();
    }
    if cleaned.len() >= 10 {
        return cleaned[..10].to_string();
    }
    cleaned.to_string()
}

fn parse_updated(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S", "%d.%m.%Y", "%d/%m/%Y"];

    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "teams": [
            {
                "id": "arsenal",
                "name": "Arsenal",
                "league": "Premier League",
                "overallRating": 4.5,
                "stats": { "attack": 4.5, "midfield": 4.5, "defense": 4.0, "goalkeeper": 4.5 },
                "logo": "/logos/premier-league/arsenal.png",
                "lastUpdated": "2024-09-27"
            },
            {
                "id": "valencia",
                "name": "Valencia",
                "league": "La Liga",
                "overallRating": 3.0,
                "stats": { "attack": 3.0, "midfield": 3.0, "defense": 3.5, "goalkeeper": 3.5 },
                "logo": "/logos/la-liga/valencia.png",
                "lastUpdated": "2024-09-27"
            }
        ]
    }"#;

    #[test]
    fn parses_camel_case_fields() {
        let teams = parse_teams(SAMPLE).expect("valid sample json");
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id, "arsenal");
        assert_eq!(teams[0].overall_rating, 4.5);
        assert_eq!(teams[0].stats.goalkeeper, 4.5);
        assert_eq!(teams[0].last_updated, "2024-09-27");
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert!(parse_teams("{\"teams\": [{\"id\": 1}]}").is_err());
        assert!(parse_teams("not json").is_err());
    }

    #[test]
    fn ovr_rounds_to_100_scale() {
        let teams = parse_teams(SAMPLE).expect("valid sample json");
        assert_eq!(teams[0].ovr(), 90);
        assert_eq!(teams[1].ovr(), 60);
        assert_eq!(scale_to_100(2.95), 59);
        assert_eq!(scale_to_100(0.0), 0);
        assert_eq!(scale_to_100(5.0), 100);
    }

    #[test]
    fn league_names_sorted_and_deduped() {
        let mut teams = parse_teams(SAMPLE).expect("valid sample json");
        teams.push(teams[0].clone());
        let leagues = league_names(&teams);
        assert_eq!(leagues, vec!["La Liga".to_string(), "Premier League".to_string()]);
    }

    #[test]
    fn updated_label_handles_odd_inputs() {
        assert_eq!(format_updated("2024-09-27"), "27 Sep 2024");
        assert_eq!(format_updated("2024-09-27T18:30:00"), "27 Sep 2024");
        assert_eq!(format_updated(""), "unknown");
        assert_eq!(format_updated("soon"), "soon");
    }
}
