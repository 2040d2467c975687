use std::collections::HashSet;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use fc25_picker::catalog::{Team, TeamStats};
use fc25_picker::selection::{DrawFilter, PowerLevel, draw_matchup, eligible};

fn synthetic_catalog(count: usize) -> Vec<Team> {
    const LEAGUES: [&str; 4] = ["Premier League", "La Liga", "Bundesliga", "Serie A"];

    (0..count)
        .map(|i| {
            let rating = ((i % 11) as f32) * 0.5;
            Team {
                id: format!("team-{i}"),
                name: format!("Team {i}"),
                league: LEAGUES[i % LEAGUES.len()].to_string(),
                overall_rating: rating,
                stats: TeamStats {
                    attack: rating,
                    midfield: rating,
                    defense: rating,
                    goalkeeper: rating,
                },
                logo: format!("/logos/team-{i}.png"),
                last_updated: "2024-09-27".to_string(),
            }
        })
        .collect()
}

fn bench_eligible(c: &mut Criterion) {
    let teams = synthetic_catalog(10_000);
    let filter = DrawFilter {
        leagues: ["Premier League".to_string(), "La Liga".to_string()]
            .into_iter()
            .collect::<HashSet<_>>(),
        power: PowerLevel::Balanced,
    };

    c.bench_function("eligible_10k", |b| {
        b.iter(|| {
            let pool = eligible(black_box(&teams), black_box(&filter));
            black_box(pool.len());
        })
    });
}

fn bench_draw_matchup(c: &mut Criterion) {
    let teams = synthetic_catalog(10_000);
    let filter = DrawFilter {
        leagues: HashSet::new(),
        power: PowerLevel::Strong,
    };
    let mut rng = StdRng::seed_from_u64(99);

    c.bench_function("draw_matchup_10k", |b| {
        b.iter(|| {
            let matchup = draw_matchup(black_box(&teams), black_box(&filter), &mut rng);
            black_box(matchup.is_some());
        })
    });
}

criterion_group!(benches, bench_eligible, bench_draw_matchup);
criterion_main!(benches);
