//! Criterion benchmarks for the per-interaction recompute path.
//!
//! Run with: `cargo bench -p rinkstats-stats`
//!
//! Every filter change rebuilds the whole dashboard from the base tables, so
//! these measure:
//! - Match filtering
//! - Standings with head-to-head tie-breaks
//! - A full `Dashboard::build`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rinkstats_core::domain::{
    CompetitionId, Dataset, Match, MatchId, PlayerId, PlayerStat, Score, SeasonId, TeamId,
};
use rinkstats_stats::standings::compute_standings;
use rinkstats_stats::{Dashboard, DashboardConfig, DashboardRequest, MatchFilter, PointsScheme};

const TEAMS: usize = 12;

/// Round-robin seasons: every team meets every other team home and away.
fn synthetic_dataset(seasons: usize) -> Dataset {
    let mut ds = Dataset::default();
    ds.teams.insert(TeamId::new("T0"), "Mailajoket".to_string());
    for t in 1..TEAMS {
        ds.teams.insert(TeamId::new(format!("T{t}")), format!("Team {t:02}"));
    }
    for p in 0..25 {
        ds.players.insert(PlayerId::new(format!("P{p}")), format!("Player {p:02}"));
    }

    let base = NaiveDate::from_ymd_opt(2014, 9, 1).expect("valid date");
    let mut n = 0u32;
    for s in 0..seasons {
        let season = SeasonId::new((2014 + s).to_string());
        for h in 0..TEAMS {
            for a in 0..TEAMS {
                if h == a {
                    continue;
                }
                n += 1;
                ds.matches.push(Match {
                    id: MatchId::new(format!("M{n}")),
                    season: season.clone(),
                    date: base.checked_add_days(chrono::Days::new(u64::from(n))),
                    competition: Some(CompetitionId::new(format!("C{s}"))),
                    home: TeamId::new(format!("T{h}")),
                    away: TeamId::new(format!("T{a}")),
                    score: Some(Score::new(n % 5, (n / 3) % 4)),
                    venue: None,
                });
            }
        }
        for p in 0..25u32 {
            ds.player_stats.push(PlayerStat {
                id: format!("S{s}-{p}"),
                player: PlayerId::new(format!("P{p}")),
                season: season.clone(),
                team: TeamId::new("T0"),
                match_id: None,
                goals: p % 7,
                assists: p % 5,
                points: p % 7 + p % 5,
                penalty_minutes: p % 3,
                games: Some(20),
            });
        }
    }
    ds
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_filter");
    for seasons in [1, 4, 12] {
        let ds = synthetic_dataset(seasons);
        let filter = MatchFilter::for_team(TeamId::new("T0")).with_seasons([SeasonId::new("2016")]);
        group.bench_with_input(BenchmarkId::from_parameter(seasons), &seasons, |b, _| {
            b.iter(|| black_box(filter.apply(&ds.matches)).len());
        });
    }
    group.finish();
}

fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings");
    for seasons in [1, 4, 12] {
        let ds = synthetic_dataset(seasons);
        let refs: Vec<&Match> = ds.matches.iter().collect();
        let scheme = PointsScheme::default();
        group.bench_with_input(BenchmarkId::from_parameter(seasons), &seasons, |b, _| {
            b.iter(|| compute_standings(black_box(&ds), black_box(&refs), &scheme));
        });
    }
    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let ds = synthetic_dataset(12);
    let config = DashboardConfig::default();
    let dash = Dashboard::new(&ds, &config);
    let request = DashboardRequest {
        filter: MatchFilter::for_team(TeamId::new("T0")),
        ..DashboardRequest::default()
    };
    c.bench_function("dashboard_build_12_seasons", |b| {
        b.iter(|| dash.build(black_box(&request)));
    });
}

criterion_group!(benches, bench_filter, bench_standings, bench_dashboard);
criterion_main!(benches);
