//! Request lifecycle controller.
//!
//! [`Dashboard`] owns every piece of state that outlives a single fetch: the
//! summary and detail lifecycles, the totals shown at the top of the page and
//! the two detail list panels. Front-ends start requests through it, perform
//! the I/O themselves, and hand the result back together with the token they
//! were given. Completions for any other token are dropped.

use tracing::{debug, info, warn};

use crate::api::{is_supported_detail, CaseStatus};
use crate::error::DashboardError;
use crate::model::{CountrySeries, Summary};
use crate::view::{
    chart_window, detail_rows, ChartView, DetailList, RankedRow, SummaryView, TotalsView,
    CHART_WINDOW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle<T> {
    Idle,
    InFlight(RequestToken),
    Succeeded(T),
    Failed(String),
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Lifecycle<T> {
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight(_))
    }

    pub const fn in_flight_token(&self) -> Option<RequestToken> {
        match self {
            Self::InFlight(token) => Some(*token),
            _ => None,
        }
    }

    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Also fetch deaths and recovered series for the selected country.
    pub breakdown: bool,
    pub chart_window: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            breakdown: false,
            chart_window: CHART_WINDOW,
        }
    }
}

/// A detail fetch the front-end must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: RequestToken,
    pub slug: String,
    pub statuses: Vec<CaseStatus>,
}

/// Series gathered for one detail request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSeries {
    pub confirmed: CountrySeries,
    pub deaths: Option<CountrySeries>,
    pub recovered: Option<CountrySeries>,
}

impl DetailSeries {
    pub fn insert(&mut self, status: CaseStatus, series: CountrySeries) {
        match status {
            CaseStatus::Confirmed => self.confirmed = series,
            CaseStatus::Deaths => self.deaths = Some(series),
            CaseStatus::Recovered => self.recovered = Some(series),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub slug: String,
    pub chart: ChartView,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    options: DashboardOptions,
    next_token: u64,
    summary: Lifecycle<SummaryView>,
    detail: Lifecycle<DetailView>,
    pending_slug: Option<String>,
    totals: TotalsView,
    deaths_list: DetailList,
    recovered_list: DetailList,
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub const fn options(&self) -> DashboardOptions {
        self.options
    }

    pub const fn summary(&self) -> &Lifecycle<SummaryView> {
        &self.summary
    }

    pub const fn detail(&self) -> &Lifecycle<DetailView> {
        &self.detail
    }

    pub const fn totals(&self) -> &TotalsView {
        &self.totals
    }

    pub const fn deaths_list(&self) -> &DetailList {
        &self.deaths_list
    }

    pub const fn recovered_list(&self) -> &DetailList {
        &self.recovered_list
    }

    pub const fn is_detail_loading(&self) -> bool {
        self.detail.is_in_flight()
    }

    pub fn ranked_rows(&self) -> &[RankedRow] {
        self.summary
            .value()
            .map_or(&[], |summary| summary.ranked.as_slice())
    }

    pub fn country_name(&self, slug: &str) -> Option<&str> {
        self.ranked_rows()
            .iter()
            .find(|row| row.slug == slug)
            .map(|row| row.country.as_str())
    }

    /// The slug of the request currently in flight, if any.
    pub fn pending_slug(&self) -> Option<&str> {
        if self.detail.is_in_flight() {
            self.pending_slug.as_deref()
        } else {
            None
        }
    }

    pub fn begin_summary(&mut self) -> Option<RequestToken> {
        if self.summary.is_in_flight() {
            debug!("summary request already in flight");
            return None;
        }

        let token = self.issue_token();
        self.summary = Lifecycle::InFlight(token);
        Some(token)
    }

    /// Returns `false` when the completion was stale and ignored.
    pub fn finish_summary(
        &mut self,
        token: RequestToken,
        result: Result<Summary, DashboardError>,
    ) -> bool {
        if self.summary.in_flight_token() != Some(token) {
            debug!(token = token.id(), "ignoring stale summary completion");
            return false;
        }

        self.summary = match result {
            Ok(summary) => {
                let view = SummaryView::from_summary(summary);
                info!(countries = view.ranked.len(), "summary loaded");
                self.totals = view.totals;
                Lifecycle::Succeeded(view)
            }
            Err(error) => {
                warn!(%error, "summary request failed");
                Lifecycle::Failed(error.to_string())
            }
        };
        true
    }

    /// Starts a detail load for `slug`, or returns `None` when one is already running.
    pub fn select_country(&mut self, slug: &str) -> Option<DetailRequest> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }

        if self.detail.is_in_flight() {
            debug!(pending = ?self.pending_slug, requested = slug, "detail request already in flight");
            return None;
        }

        if !is_supported_detail(slug) {
            warn!(slug, "country detail is only served for a few countries");
        }

        self.restore_world_totals();
        self.deaths_list.clear();
        self.recovered_list.clear();
        self.deaths_list.show_spinner();
        self.recovered_list.show_spinner();

        let token = self.issue_token();
        self.detail = Lifecycle::InFlight(token);
        self.pending_slug = Some(slug.to_string());

        let mut statuses = vec![CaseStatus::Confirmed];
        if self.options.breakdown {
            statuses.extend([CaseStatus::Deaths, CaseStatus::Recovered]);
        }

        Some(DetailRequest {
            token,
            slug: slug.to_string(),
            statuses,
        })
    }

    /// Returns `false` when the completion was stale and ignored.
    pub fn finish_detail(
        &mut self,
        token: RequestToken,
        result: Result<DetailSeries, DashboardError>,
    ) -> bool {
        if self.detail.in_flight_token() != Some(token) {
            debug!(token = token.id(), "ignoring stale detail completion");
            return false;
        }

        self.deaths_list.hide_spinner();
        self.recovered_list.hide_spinner();
        let slug = self.pending_slug.take().unwrap_or_default();

        self.detail = match result {
            Ok(series) => {
                if let Some(mut deaths) = series.deaths {
                    let rows = detail_rows(&mut deaths);
                    if let Some(latest) = rows.first() {
                        self.totals.set(CaseStatus::Deaths, latest.cases);
                    }
                    self.deaths_list.append_rows(rows);
                }
                if let Some(mut recovered) = series.recovered {
                    let rows = detail_rows(&mut recovered);
                    if let Some(latest) = rows.first() {
                        self.totals.set(CaseStatus::Recovered, latest.cases);
                    }
                    self.recovered_list.append_rows(rows);
                }

                let chart = chart_window(&series.confirmed, self.options.chart_window);
                info!(slug = %slug, points = chart.values.len(), "country detail loaded");
                Lifecycle::Succeeded(DetailView { slug, chart })
            }
            Err(error) => {
                warn!(slug = %slug, %error, "country detail request failed");
                self.restore_world_totals();
                Lifecycle::Failed(error.to_string())
            }
        };
        true
    }

    /// Abandons the in-flight detail request; its completion will be ignored.
    pub fn cancel_detail(&mut self) -> bool {
        if !self.detail.is_in_flight() {
            return false;
        }

        self.deaths_list.hide_spinner();
        self.recovered_list.hide_spinner();
        if let Some(slug) = self.pending_slug.take() {
            info!(slug = %slug, "country detail request cancelled");
        }
        self.restore_world_totals();
        self.detail = Lifecycle::Idle;
        true
    }

    /// Drops any per-country override of the totals.
    fn restore_world_totals(&mut self) {
        self.totals = self
            .summary
            .value()
            .map(|summary| summary.totals)
            .unwrap_or_default();
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaseEntry, CountryStat};
    use chrono::{Duration, TimeZone, Utc};

    fn summary(confirmed: &[(&str, u64)]) -> Summary {
        Summary {
            date: Utc.with_ymd_and_hms(2023, 3, 9, 8, 3, 42).unwrap(),
            countries: confirmed
                .iter()
                .map(|(slug, total)| CountryStat {
                    country: slug.to_string(),
                    country_code: String::new(),
                    slug: slug.to_string(),
                    new_confirmed: 0,
                    total_confirmed: *total,
                    new_deaths: 0,
                    total_deaths: 1,
                    new_recovered: 0,
                    total_recovered: 2,
                })
                .collect(),
        }
    }

    fn series(days: u64) -> CountrySeries {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        (0..days)
            .map(|day| CaseEntry {
                cases: 1_000 + day,
                date: start + Duration::days(i64::try_from(day).unwrap_or_default()),
            })
            .collect()
    }

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        let token = dashboard.begin_summary().unwrap();
        dashboard.finish_summary(token, Ok(summary(&[("spain", 5), ("switzerland", 3)])));
        dashboard
    }

    fn transport_error() -> DashboardError {
        DashboardError::transport("http://api.test/api/country/spain", "connection reset")
    }

    #[test]
    fn summary_feeds_totals_and_ranking() {
        let dashboard = loaded();

        assert_eq!(dashboard.totals().confirmed, 8);
        assert_eq!(dashboard.totals().deaths, 2);
        assert_eq!(dashboard.ranked_rows().len(), 2);
        assert_eq!(dashboard.country_name("switzerland"), Some("switzerland"));
    }

    #[test]
    fn summary_is_requested_once_at_a_time() {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        assert!(dashboard.begin_summary().is_some());
        assert!(dashboard.begin_summary().is_none());
    }

    #[test]
    fn summary_failure_is_recorded() {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        let token = dashboard.begin_summary().unwrap();

        assert!(dashboard.finish_summary(token, Err(transport_error())));
        assert!(dashboard.summary().error().is_some_and(|e| e.contains("connection reset")));
        assert!(dashboard.ranked_rows().is_empty());
        assert_eq!(dashboard.totals().confirmed, 0);
    }

    #[test]
    fn empty_summary_renders_zero_totals_and_no_rows() {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        let token = dashboard.begin_summary().unwrap();
        dashboard.finish_summary(token, Ok(summary(&[])));

        assert_eq!(*dashboard.totals(), TotalsView::default());
        assert!(dashboard.ranked_rows().is_empty());
        assert!(dashboard.summary().value().is_some());
    }

    #[test]
    fn second_selection_while_loading_is_a_no_op() {
        let mut dashboard = loaded();

        let first = dashboard.select_country("spain").unwrap();
        let lists_before = (dashboard.deaths_list().clone(), dashboard.recovered_list().clone());

        assert!(dashboard.select_country("switzerland").is_none());
        assert!(dashboard.select_country("spain").is_none());
        assert_eq!(
            (dashboard.deaths_list().clone(), dashboard.recovered_list().clone()),
            lists_before
        );
        assert_eq!(dashboard.pending_slug(), Some("spain"));
        assert_eq!(first.statuses, vec![CaseStatus::Confirmed]);
    }

    #[test]
    fn spinners_show_while_loading_and_leave_exactly_once() {
        let mut dashboard = loaded();
        let request = dashboard.select_country("spain").unwrap();

        assert_eq!(dashboard.deaths_list().spinner_count(), 1);
        assert_eq!(dashboard.recovered_list().spinner_count(), 1);

        let mut detail = DetailSeries::default();
        detail.insert(CaseStatus::Confirmed, series(20));
        assert!(dashboard.finish_detail(request.token, Ok(detail.clone())));
        assert!(!dashboard.finish_detail(request.token, Ok(detail)));

        assert_eq!(dashboard.deaths_list().spinner_count(), 0);
        assert_eq!(dashboard.recovered_list().spinner_count(), 0);
        assert!(dashboard.deaths_list().is_empty());
        assert!(!dashboard.is_detail_loading());

        let view = dashboard.detail().value().unwrap();
        assert_eq!(view.slug, "spain");
        assert_eq!(view.chart.values.len(), 14);
        assert_eq!(view.chart.values.first(), Some(&1_006));
        assert_eq!(view.chart.values.last(), Some(&1_019));
    }

    #[test]
    fn failed_detail_clears_the_guard() {
        let mut dashboard = loaded();
        let request = dashboard.select_country("spain").unwrap();

        assert!(dashboard.finish_detail(request.token, Err(transport_error())));

        assert!(!dashboard.is_detail_loading());
        assert!(dashboard.detail().error().is_some());
        assert!(!dashboard.deaths_list().has_spinner());
        assert!(dashboard.select_country("switzerland").is_some());
    }

    #[test]
    fn cancelled_request_ignores_late_response() {
        let mut dashboard = loaded();
        let stale = dashboard.select_country("spain").unwrap();

        assert!(dashboard.cancel_detail());
        assert!(!dashboard.cancel_detail());
        assert!(!dashboard.recovered_list().has_spinner());

        let fresh = dashboard.select_country("switzerland").unwrap();
        assert_ne!(stale.token, fresh.token);
        assert!(!dashboard.finish_detail(stale.token, Ok(DetailSeries::default())));
        assert!(dashboard.is_detail_loading());
        assert_eq!(dashboard.pending_slug(), Some("switzerland"));
    }

    #[test]
    fn blank_slug_is_ignored() {
        let mut dashboard = loaded();
        assert!(dashboard.select_country("  ").is_none());
        assert!(!dashboard.is_detail_loading());
    }

    #[test]
    fn breakdown_fills_lists_and_country_totals() {
        let mut dashboard = Dashboard::new(DashboardOptions {
            breakdown: true,
            ..DashboardOptions::default()
        });
        let token = dashboard.begin_summary().unwrap();
        dashboard.finish_summary(token, Ok(summary(&[("spain", 5)])));

        let request = dashboard.select_country("spain").unwrap();
        assert_eq!(
            request.statuses,
            vec![CaseStatus::Confirmed, CaseStatus::Deaths, CaseStatus::Recovered]
        );

        let mut detail = DetailSeries::default();
        detail.insert(CaseStatus::Confirmed, series(5));
        detail.insert(CaseStatus::Deaths, series(3));
        detail.insert(CaseStatus::Recovered, Vec::new());
        dashboard.finish_detail(request.token, Ok(detail));

        let deaths: Vec<u64> = dashboard.deaths_list().rows().map(|row| row.cases).collect();
        assert_eq!(deaths, [1_002, 1_001, 1_000]);
        assert_eq!(dashboard.totals().deaths, 1_002);
        assert_eq!(dashboard.totals().recovered, 2);
        assert_eq!(dashboard.recovered_list().rows().count(), 0);
    }

    #[test]
    fn empty_confirmed_series_gives_an_empty_chart() {
        let mut dashboard = loaded();
        let request = dashboard.select_country("spain").unwrap();
        dashboard.finish_detail(request.token, Ok(DetailSeries::default()));

        assert!(dashboard.detail().value().is_some_and(|view| view.chart.is_empty()));
    }
    fn breakdown_dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardOptions {
            breakdown: true,
            ..DashboardOptions::default()
        });
        let token = dashboard.begin_summary().unwrap();
        dashboard.finish_summary(token, Ok(summary(&[("spain", 5), ("switzerland", 3)])));
        dashboard
    }

    fn breakdown_series() -> DetailSeries {
        DetailSeries {
            confirmed: series(5),
            deaths: Some(series(3)),
            recovered: Some(series(2)),
        }
    }

    #[test]
    fn failed_load_after_breakdown_restores_world_totals() {
        let mut dashboard = breakdown_dashboard();
        let world = *dashboard.totals();

        let spain = dashboard.select_country("spain").unwrap();
        dashboard.finish_detail(spain.token, Ok(breakdown_series()));
        assert_eq!(dashboard.totals().deaths, 1_002);

        let switzerland = dashboard.select_country("switzerland").unwrap();
        assert_eq!(*dashboard.totals(), world);
        dashboard.finish_detail(switzerland.token, Err(transport_error()));

        assert_eq!(*dashboard.totals(), world);
        assert_eq!(dashboard.totals().deaths, 2);
    }

    #[test]
    fn cancel_after_breakdown_restores_world_totals() {
        let mut dashboard = breakdown_dashboard();
        let world = *dashboard.totals();

        let spain = dashboard.select_country("spain").unwrap();
        dashboard.finish_detail(spain.token, Ok(breakdown_series()));
        dashboard.select_country("switzerland").unwrap();
        assert!(dashboard.cancel_detail());

        assert_eq!(*dashboard.totals(), world);
    }

    #[test]
    fn breakdown_fetch_failing_midway_clears_guard_and_spinners() {
        let mut dashboard = breakdown_dashboard();
        let request = dashboard.select_country("spain").unwrap();
        assert_eq!(request.statuses.len(), 3);

        let deaths_failure = DashboardError::Status {
            url: "http://api.test/api/country/spain?status=deaths".to_string(),
            status: 404,
        };
        assert!(dashboard.finish_detail(request.token, Err(deaths_failure)));

        assert!(!dashboard.is_detail_loading());
        assert!(dashboard.detail().error().is_some_and(|e| e.contains("status=deaths")));
        assert!(dashboard.deaths_list().is_empty());
        assert!(dashboard.recovered_list().is_empty());
        assert_eq!(dashboard.totals().deaths, 2);
        assert!(dashboard.select_country("switzerland").is_some());
    }
}
