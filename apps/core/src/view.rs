//! View-models derived from fetched documents.
//!
//! Every function here takes decoded records and returns plain data the
//! front-ends paint. None of them assume a non-empty input.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::api::CaseStatus;
use crate::model::{CaseEntry, CountryStat, Summary};

pub const CHART_WINDOW: usize = 14;
pub const CHART_LABEL: &str = "Confirmed for the last two weeks";

const DETAIL_DATE_FORMAT: &str = "%Y-%m-%d";
const CHART_DATE_FORMAT: &str = "%m/%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalsView {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl TotalsView {
    pub fn from_countries(countries: &[CountryStat]) -> Self {
        Self {
            confirmed: total_by_world(countries, CaseStatus::Confirmed),
            deaths: total_by_world(countries, CaseStatus::Deaths),
            recovered: total_by_world(countries, CaseStatus::Recovered),
        }
    }

    pub const fn get(&self, status: CaseStatus) -> u64 {
        match status {
            CaseStatus::Confirmed => self.confirmed,
            CaseStatus::Deaths => self.deaths,
            CaseStatus::Recovered => self.recovered,
        }
    }

    pub fn set(&mut self, status: CaseStatus, value: u64) {
        match status {
            CaseStatus::Confirmed => self.confirmed = value,
            CaseStatus::Deaths => self.deaths = value,
            CaseStatus::Recovered => self.recovered = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub slug: String,
    pub country: String,
    pub confirmed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub cases: u64,
    pub date: DateTime<Utc>,
    pub date_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    pub label: &'static str,
    pub values: Vec<u64>,
    pub labels: Vec<String>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn bounds(&self) -> Option<(u64, u64)> {
        let min = self.values.iter().copied().min()?;
        let max = self.values.iter().copied().max()?;
        Some((min, max))
    }

    /// `(day index, cases)` pairs for a line dataset.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as f64, *value as f64))
            .collect()
    }

    /// Upper x bound; never zero so a single point still gets an axis.
    #[allow(clippy::cast_precision_loss)]
    pub fn x_max(&self) -> f64 {
        self.values.len().saturating_sub(1).max(1) as f64
    }

    /// Value range padded by a tenth of the spread, at least one case each way.
    pub fn y_range(&self) -> (u64, u64) {
        let (min, max) = self.bounds().unwrap_or((0, 0));
        let pad = ((max - min) / 10).max(1);
        (min.saturating_sub(pad), max.saturating_add(pad))
    }

    /// First and last date labels, or the only one.
    pub fn x_labels(&self) -> Vec<String> {
        match self.labels.as_slice() {
            [] => Vec::new(),
            [only] => vec![only.clone()],
            [first, .., last] => vec![first.clone(), last.clone()],
        }
    }

    pub fn y_labels(&self) -> Vec<String> {
        let (low, high) = self.y_range();
        vec![format_count(low), format_count(high)]
    }
}

/// Everything the summary document feeds: totals, ranking and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub totals: TotalsView,
    pub ranked: Vec<RankedRow>,
    pub last_updated: DateTime<Utc>,
}

impl SummaryView {
    pub fn from_summary(mut summary: Summary) -> Self {
        let totals = TotalsView::from_countries(&summary.countries);
        let ranked = rank_by_confirmed(&mut summary.countries);
        Self {
            totals,
            ranked,
            last_updated: summary.date,
        }
    }
}

pub fn total_by_world(countries: &[CountryStat], status: CaseStatus) -> u64 {
    countries
        .iter()
        .fold(0_u64, |total, country| total.saturating_add(country.total(status)))
}

/// Sorts in place by confirmed cases, highest first. Ties keep their input order.
pub fn rank_by_confirmed(countries: &mut [CountryStat]) -> Vec<RankedRow> {
    countries.sort_by(|a, b| b.total_confirmed.cmp(&a.total_confirmed));
    countries
        .iter()
        .map(|country| RankedRow {
            slug: country.slug.clone(),
            country: country.country.clone(),
            confirmed: country.total_confirmed,
        })
        .collect()
}

/// Sorts in place by date, newest first.
pub fn detail_rows(entries: &mut [CaseEntry]) -> Vec<DetailRow> {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
        .iter()
        .map(|entry| DetailRow {
            cases: entry.cases,
            date: entry.date,
            date_label: entry.date.format(DETAIL_DATE_FORMAT).to_string(),
        })
        .collect()
}

/// Takes the trailing `window` entries, keeping chronological order.
pub fn chart_window(series: &[CaseEntry], window: usize) -> ChartView {
    let start = series.len().saturating_sub(window);
    let recent = &series[start..];
    ChartView {
        label: CHART_LABEL,
        values: recent.iter().map(|entry| entry.cases).collect(),
        labels: recent
            .iter()
            .map(|entry| entry.date.format(CHART_DATE_FORMAT).to_string())
            .collect(),
    }
}

pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn format_count(value: u64) -> String {
    value.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    Spinner,
    Row(DetailRow),
}

/// Contents of one detail list panel.
///
/// Mirrors the handful of element operations the page needs: clear, append
/// rows, insert or remove the spinner. The spinner is a single node, so
/// showing it twice never duplicates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailList {
    nodes: Vec<ListNode>,
}

impl DetailList {
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn show_spinner(&mut self) {
        self.nodes.retain(|node| *node != ListNode::Spinner);
        self.nodes.push(ListNode::Spinner);
    }

    /// Returns whether a spinner was present.
    pub fn hide_spinner(&mut self) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| *node != ListNode::Spinner);
        self.nodes.len() != before
    }

    pub fn append_rows(&mut self, rows: impl IntoIterator<Item = DetailRow>) {
        self.nodes.extend(rows.into_iter().map(ListNode::Row));
    }

    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    pub fn rows(&self) -> impl Iterator<Item = &DetailRow> {
        self.nodes.iter().filter_map(|node| match node {
            ListNode::Row(row) => Some(row),
            ListNode::Spinner => None,
        })
    }

    pub fn spinner_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| **node == ListNode::Spinner)
            .count()
    }

    pub fn has_spinner(&self) -> bool {
        self.spinner_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
