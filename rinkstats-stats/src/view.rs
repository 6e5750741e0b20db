//! View models for the CLI and TUI.
//!
//! The host owns the dataset and the current [`FilterSelection`]. Each
//! change of selection is validated into a [`MatchFilter`] and the whole
//! [`DashboardView`] is recomputed from the base tables. An empty result is
//! a [`ViewState::NoData`], never an error.

use rinkstats_core::domain::{Dataset, Match, SeasonId, TeamId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::enrich::{enrich_matches, MatchView};
use crate::filter::{MatchFilter, Venue};
use crate::leaderboard::{build_leaderboard, period_label, select_stat_rows, LeaderboardEntry, LeaderboardQuery, StatKind};
use crate::roster::{roster_lines, roster_summary, select_roster_rows, RosterLine, RosterSummary};
use crate::standings::{compute_standings, published_tables, PublishedTable, StandingsTable};
use crate::summary::{opponent_records, team_summary, OpponentRecord, TeamSummary};
use crate::trend::{cumulative_trend, TrendMetric, TrendPoint};

pub const NO_DATA: &str = "no data for this selection";

// ─── Selection ──────────────────────────────────────────────────────

/// Filter choices as the user typed or picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub seasons: Vec<String>,
    /// Team id, name or alias.
    pub opponent: Option<String>,
    pub venue: Venue,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() && self.opponent.is_none() && self.venue == Venue::All
    }

    /// Resolve names against the dataset. Seasons not in the data are kept
    /// and simply match nothing.
    pub fn validate(&self, ds: &Dataset, focus: Option<&TeamId>) -> Result<MatchFilter, FilterError> {
        let seasons = self
            .seasons
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(SeasonId::new);

        let opponent = match self.opponent.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(text) => {
                let id = ds
                    .resolve_team(text)
                    .ok_or_else(|| FilterError::UnknownOpponent(text.to_string()))?;
                if focus == Some(&id) {
                    return Err(FilterError::OpponentIsFocus(ds.team_name(&id)));
                }
                Some(id)
            }
        };

        if self.venue != Venue::All && focus.is_none() {
            return Err(FilterError::VenueWithoutTeam);
        }

        Ok(MatchFilter {
            seasons: seasons.collect(),
            team: focus.cloned(),
            opponent,
            venue: self.venue,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown opponent: {0}")]
    UnknownOpponent(String),

    #[error("opponent cannot be the focus team ({0})")]
    OpponentIsFocus(String),

    #[error("home/away filter needs a focus team")]
    VenueWithoutTeam,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<T> {
    pub id: T,
    pub label: String,
}

/// What the filter widgets can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Newest first.
    pub seasons: Vec<Choice<SeasonId>>,
    /// Opponents of the focus team, by name.
    pub opponents: Vec<Choice<TeamId>>,
    pub venues: Vec<Venue>,
}

impl FilterOptions {
    pub fn from_dataset(ds: &Dataset, focus: Option<&TeamId>) -> Self {
        let seasons = ds
            .season_ids()
            .into_iter()
            .map(|id| Choice {
                label: ds.season_label(&id),
                id,
            })
            .collect();
        let opponents = focus
            .map(|team| {
                ds.opponents_of(team)
                    .into_iter()
                    .map(|id| Choice {
                        label: ds.team_name(&id),
                        id,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let venues = if focus.is_some() {
            Venue::ALL.to_vec()
        } else {
            vec![Venue::All]
        };
        Self {
            seasons,
            opponents,
            venues,
        }
    }
}

// ─── View states ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    Ready(T),
    NoData(String),
}

impl<T> ViewState<T> {
    pub fn no_data() -> Self {
        ViewState::NoData(NO_DATA.to_string())
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(v) => Some(v),
            ViewState::NoData(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ViewState::Ready(_) => None,
            ViewState::NoData(msg) => Some(msg.as_str()),
        }
    }
}

impl<T> ViewState<Vec<T>> {
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::no_data()
        } else {
            ViewState::Ready(items)
        }
    }
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 0-based, clamped to the last page.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T: Clone> Paginated<T> {
    pub fn new(all: &[T], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = all.len().div_ceil(page_size).max(1);
        let page = page.min(total_pages - 1);
        let start = page * page_size;
        let end = (start + page_size).min(all.len());
        Self {
            items: all.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
            page,
            page_size,
            total_items: all.len(),
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

/// The full filtered match list, newest first. Exports use this, not a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchListView {
    pub rows: Vec<MatchView>,
}

impl MatchListView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ─── Dashboard ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub filter: MatchFilter,
    pub page: usize,
    pub stat: StatKind,
    pub trend_metric: TrendMetric,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub team: Option<TeamId>,
    pub team_name: Option<String>,
    pub period: String,
    pub filter: MatchFilter,
    pub summary: ViewState<TeamSummary>,
    pub opponents: ViewState<Vec<OpponentRecord>>,
    pub matches: ViewState<Paginated<MatchView>>,
    pub standings: ViewState<Vec<StandingsTable>>,
    pub published: ViewState<Vec<PublishedTable>>,
    pub leaderboard: ViewState<Vec<LeaderboardEntry>>,
    pub rosters: ViewState<RosterSummary>,
    pub roster_lines: ViewState<Vec<RosterLine>>,
    pub trend: ViewState<Vec<TrendPoint>>,
}

/// The configured focus team, if it exists in the workbook. Warns when the
/// name does not resolve.
pub fn resolve_focus(dataset: &Dataset, config: &DashboardConfig) -> Option<TeamId> {
    let name = config.team.name.as_deref()?;
    let found = dataset.resolve_team(name);
    if found.is_none() {
        warn!(team = name, "configured team not found in workbook");
    }
    found
}

/// Read-only facade over a loaded dataset and its config.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    config: &'a DashboardConfig,
    focus: Option<TeamId>,
}

impl<'a> Dashboard<'a> {
    /// Resolves the configured team. An unknown team name disables the team
    /// views rather than failing.
    pub fn new(dataset: &'a Dataset, config: &'a DashboardConfig) -> Self {
        Self::with_focus(dataset, config, resolve_focus(dataset, config))
    }

    /// Use an already resolved focus team. Long-lived hosts resolve once per
    /// loaded workbook with [`resolve_focus`].
    pub fn with_focus(dataset: &'a Dataset, config: &'a DashboardConfig, focus: Option<TeamId>) -> Self {
        Self {
            dataset,
            config,
            focus,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn config(&self) -> &'a DashboardConfig {
        self.config
    }

    pub fn focus(&self) -> Option<&TeamId> {
        self.focus.as_ref()
    }

    pub fn focus_name(&self) -> Option<String> {
        self.focus.as_ref().map(|t| self.dataset.team_name(t))
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_dataset(self.dataset, self.focus())
    }

    pub fn validate(&self, selection: &FilterSelection) -> Result<MatchFilter, FilterError> {
        selection.validate(self.dataset, self.focus())
    }

    pub fn filtered_matches(&self, filter: &MatchFilter) -> Vec<&'a Match> {
        filter.apply(&self.dataset.matches)
    }

    pub fn match_list(&self, filter: &MatchFilter) -> MatchListView {
        let matches = self.filtered_matches(filter);
        let mut rows = enrich_matches(self.dataset, &matches, filter.team.as_ref(), &self.config.points);
        rows.reverse();
        MatchListView { rows }
    }

    pub fn build(&self, req: &DashboardRequest) -> DashboardView {
        let ds = self.dataset;
        let filter = &req.filter;
        let team = filter.team.as_ref();
        let matches = self.filtered_matches(filter);
        let views = enrich_matches(ds, &matches, team, &self.config.points);

        let (summary, opponents, trend) = match team {
            Some(_) if !views.is_empty() => (
                ViewState::Ready(team_summary(&views, self.config.display.form_window)),
                ViewState::from_vec(opponent_records(&views)),
                ViewState::from_vec(cumulative_trend(&views, req.trend_metric)),
            ),
            Some(_) => (ViewState::no_data(), ViewState::no_data(), ViewState::no_data()),
            None => {
                let msg = "no focus team configured".to_string();
                (
                    ViewState::NoData(msg.clone()),
                    ViewState::NoData(msg.clone()),
                    ViewState::NoData(msg),
                )
            }
        };

        let match_page = if views.is_empty() {
            ViewState::no_data()
        } else {
            let newest_first: Vec<MatchView> = views.iter().rev().cloned().collect();
            ViewState::Ready(Paginated::new(&newest_first, req.page, self.config.display.page_size))
        };

        let season_matches = self.filtered_matches(&filter.seasons_only());
        let mut tables = compute_standings(ds, &season_matches, &self.config.points);
        let mut published = published_tables(ds, |s| filter.admits_season(s));
        if let Some(team) = team {
            tables.retain(|t| t.position_of(team).is_some());
            published.retain(|t| t.rows.iter().any(|r| r.team == *team));
        }

        let stat_rows = select_stat_rows(&ds.player_stats, filter, &matches);
        let leaderboard = build_leaderboard(
            ds,
            &stat_rows,
            &LeaderboardQuery {
                stat: req.stat,
                limit: self.config.display.leaderboard_size,
                search: req.search.clone(),
            },
        );

        let roster_rows = select_roster_rows(&ds.rosters, filter);
        let rosters = if roster_rows.is_empty() {
            ViewState::no_data()
        } else {
            ViewState::Ready(roster_summary(ds, &roster_rows, self.config.display.leaderboard_size))
        };

        debug!(
            matches = matches.len(),
            stat_rows = stat_rows.len(),
            roster_rows = roster_rows.len(),
            tables = tables.len(),
            "dashboard recomputed"
        );

        DashboardView {
            team: filter.team.clone(),
            team_name: team.map(|t| ds.team_name(t)),
            period: period_label(ds, &filter.seasons),
            filter: filter.clone(),
            summary,
            opponents,
            matches: match_page,
            standings: ViewState::from_vec(tables),
            published: ViewState::from_vec(published),
            leaderboard: ViewState::from_vec(leaderboard),
            rosters,
            roster_lines: ViewState::from_vec(roster_lines(ds, &roster_rows)),
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{club_dataset, US};

    #[test]
    fn selection_resolves_names_and_aliases() {
        let ds = club_dataset();
        let focus = TeamId::new(US);
        let sel = FilterSelection {
            seasons: vec!["2020".into(), " ".into()],
            opponent: Some("kv".into()),
            venue: Venue::Home,
        };
        let filter = sel.validate(&ds, Some(&focus)).unwrap();
        assert_eq!(filter.opponent, Some(TeamId::new("T2")));
        assert_eq!(filter.seasons.len(), 1);
        assert_eq!(filter.team, Some(focus));
    }

    #[test]
    fn selection_errors() {
        let ds = club_dataset();
        let focus = TeamId::new(US);
        let unknown = FilterSelection {
            opponent: Some("Nobody FC".into()),
            ..FilterSelection::default()
        };
        assert_eq!(
            unknown.validate(&ds, Some(&focus)),
            Err(FilterError::UnknownOpponent("Nobody FC".into()))
        );

        let itself = FilterSelection {
            opponent: Some("Mailajoket".into()),
            ..FilterSelection::default()
        };
        assert!(matches!(
            itself.validate(&ds, Some(&focus)),
            Err(FilterError::OpponentIsFocus(_))
        ));

        let venue = FilterSelection {
            venue: Venue::Away,
            ..FilterSelection::default()
        };
        assert_eq!(venue.validate(&ds, None), Err(FilterError::VenueWithoutTeam));
    }

    #[test]
    fn pagination_clamps_to_last_page() {
        let items: Vec<u32> = (0..45).collect();
        let page = Paginated::new(&items, 9, 20);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, (40..45).collect::<Vec<_>>());
        assert!(!page.has_next());
        assert!(page.has_prev());

        let empty = Paginated::<u32>::new(&[], 0, 20);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn options_list_seasons_and_opponents() {
        let ds = club_dataset();
        let config = DashboardConfig::default();
        let dash = Dashboard::new(&ds, &config);
        let options = dash.options();
        let seasons: Vec<&str> = options.seasons.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(seasons, ["2021", "2020", "2019"]);
        let opponents: Vec<&str> = options.opponents.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(opponents, ["HC Kotka", "Kiekko-Veikot"]);
        assert_eq!(options.venues.len(), 3);
    }

    #[test]
    fn absent_season_renders_no_data() {
        let ds = club_dataset();
        let config = DashboardConfig::default();
        let dash = Dashboard::new(&ds, &config);
        let filter = dash
            .validate(&FilterSelection {
                seasons: vec!["1999".into()],
                ..FilterSelection::default()
            })
            .unwrap();
        let view = dash.build(&DashboardRequest {
            filter,
            ..DashboardRequest::default()
        });
        assert_eq!(view.summary.message(), Some(NO_DATA));
        assert_eq!(view.matches.message(), Some(NO_DATA));
        assert!(!view.standings.is_ready());
        assert!(!view.leaderboard.is_ready());
        assert!(!view.rosters.is_ready());
    }

    #[test]
    fn full_view_for_one_season() {
        let ds = club_dataset();
        let config = DashboardConfig::default();
        let dash = Dashboard::new(&ds, &config);
        let filter = dash
            .validate(&FilterSelection {
                seasons: vec!["2020".into()],
                ..FilterSelection::default()
            })
            .unwrap();
        let view = dash.build(&DashboardRequest {
            filter,
            ..DashboardRequest::default()
        });

        assert_eq!(view.team_name.as_deref(), Some("Mailajoket"));
        assert_eq!(view.period, "2020-2021");
        let page = view.matches.ready().unwrap();
        assert!(page.items.iter().all(|m| m.season.as_str() == "2020"));
        assert!(page.items.windows(2).all(|w| w[0].date >= w[1].date));
        let summary = view.summary.ready().unwrap();
        assert_eq!(summary.record.games as usize, page.total_items - summary.unplayed as usize);
        assert!(view.standings.is_ready());
        assert!(view.leaderboard.is_ready());
    }

    #[test]
    fn unknown_configured_team_disables_team_views() {
        let ds = club_dataset();
        let mut config = DashboardConfig::default();
        config.team.name = Some("Nobody".into());
        let dash = Dashboard::new(&ds, &config);
        assert!(dash.focus().is_none());
        let view = dash.build(&DashboardRequest::default());
        assert_eq!(view.summary.message(), Some("no focus team configured"));
        assert!(view.matches.is_ready());
    }

    #[test]
    fn resolved_focus_is_reused_as_given() {
        let ds = club_dataset();
        let mut config = DashboardConfig::default();
        let club = resolve_focus(&ds, &config);
        assert_eq!(club, ds.resolve_team("Mailajoket"));

        config.team.name = Some("Nobody".into());
        assert_eq!(resolve_focus(&ds, &config), None);

        // The stored focus wins over the (now stale) configured name.
        let dash = Dashboard::with_focus(&ds, &config, club.clone());
        assert_eq!(dash.focus(), club.as_ref());
        assert_eq!(dash.focus_name().as_deref(), Some("Mailajoket"));

        config.team.name = None;
        assert_eq!(resolve_focus(&ds, &config), None);
    }
}
