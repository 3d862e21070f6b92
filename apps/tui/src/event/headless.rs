use chrono::{Local, TimeZone};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use covid_dashboard_core::view::format_timestamp;
use covid_dashboard_core::{CaseStatus, Dashboard, DashboardOptions, Lifecycle};
use std::fmt::{Display, Write};
use tracing::info;

use crate::client::ApiClient;

const TOP_COUNTRIES: usize = 10;

#[derive(Debug, serde::Serialize)]
struct HeadlessStats {
    last_updated: String,
    confirmed: u64,
    deaths: u64,
    recovered: u64,
    top_countries: Vec<HeadlessCountry>,
    detail: Option<HeadlessDetail>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessCountry {
    rank: usize,
    country: String,
    slug: String,
    confirmed: u64,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessDetail {
    slug: String,
    label: &'static str,
    points: Vec<HeadlessPoint>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessPoint {
    date: String,
    cases: u64,
}

/// Run the dashboard without a UI and print the results
pub async fn run_headless(
    client: &ApiClient,
    options: DashboardOptions,
    json: bool,
    country: Option<&str>,
) -> Result<()> {
    let mut dashboard = Dashboard::new(options);

    let token = dashboard
        .begin_summary()
        .ok_or_else(|| eyre!("Summary request already running"))?;
    let result = client.fetch_summary().await;
    dashboard.finish_summary(token, result);
    if let Some(error) = dashboard.summary().error() {
        return Err(eyre!("Failed to load summary: {error}"));
    }

    if let Some(request) = country.and_then(|slug| dashboard.select_country(slug)) {
        info!(slug = %request.slug, "fetching country detail");
        let result = client.fetch_detail(&request).await;
        dashboard.finish_detail(request.token, result);
        if let Some(error) = dashboard.detail().error() {
            return Err(eyre!("Failed to load {}: {error}", request.slug));
        }
    }

    let stats = build_headless_stats(&dashboard, &Local)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_headless_text(&stats));
    }

    Ok(())
}

fn build_headless_stats<Tz>(dashboard: &Dashboard, tz: &Tz) -> Result<HeadlessStats>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Lifecycle::Succeeded(summary) = dashboard.summary() else {
        return Err(eyre!("Summary has not been loaded"));
    };

    let totals = dashboard.totals();
    let top_countries = summary
        .ranked
        .iter()
        .take(TOP_COUNTRIES)
        .enumerate()
        .map(|(index, row)| HeadlessCountry {
            rank: index + 1,
            country: row.country.clone(),
            slug: row.slug.clone(),
            confirmed: row.confirmed,
        })
        .collect();

    let detail = dashboard.detail().value().map(|detail| HeadlessDetail {
        slug: detail.slug.clone(),
        label: detail.chart.label,
        points: detail
            .chart
            .labels
            .iter()
            .zip(&detail.chart.values)
            .map(|(date, cases)| HeadlessPoint {
                date: date.clone(),
                cases: *cases,
            })
            .collect(),
    });

    Ok(HeadlessStats {
        last_updated: format_timestamp(&summary.last_updated, tz),
        confirmed: totals.get(CaseStatus::Confirmed),
        deaths: totals.get(CaseStatus::Deaths),
        recovered: totals.get(CaseStatus::Recovered),
        top_countries,
        detail,
    })
}

fn render_headless_text(stats: &HeadlessStats) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "\nCOVID-19 Summary");
    let _ = writeln!(out, "================");
    let _ = writeln!(out, "Last updated: {}", stats.last_updated);
    let _ = writeln!(out, "Confirmed: {}", stats.confirmed);
    let _ = writeln!(out, "Deaths: {}", stats.deaths);
    let _ = writeln!(out, "Recovered: {}", stats.recovered);

    let _ = writeln!(out, "\nTop countries:");
    for country in &stats.top_countries {
        let _ = writeln!(
            out,
            "{:>2}. {} | {}",
            country.rank, country.country, country.confirmed
        );
    }

    if let Some(detail) = &stats.detail {
        let _ = writeln!(out, "\n{} ({}):", detail.label, detail.slug);
        for point in &detail.points {
            let _ = writeln!(out, "- {} | {}", point.date, point.cases);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{series, summary};
    use chrono::Utc;
    use covid_dashboard_core::DetailSeries;

    fn loaded_dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        let token = dashboard.begin_summary().unwrap();
        dashboard.finish_summary(token, Ok(summary()));
        dashboard
    }

    #[test]
    fn stats_rank_countries_and_sum_totals() -> Result<()> {
        let stats = build_headless_stats(&loaded_dashboard(), &Utc)?;

        assert_eq!(stats.last_updated, "2023-03-09 08:03:42");
        assert_eq!(stats.confirmed, 8);
        assert_eq!(stats.deaths, 2);
        assert_eq!(stats.top_countries[0].slug, "spain");
        assert_eq!(stats.top_countries[1].rank, 2);
        assert!(stats.detail.is_none());
        Ok(())
    }

    #[test]
    fn stats_include_the_two_week_window() -> Result<()> {
        let mut dashboard = loaded_dashboard();
        let request = dashboard.select_country("spain").unwrap();
        dashboard.finish_detail(
            request.token,
            Ok(DetailSeries {
                confirmed: series(20),
                ..DetailSeries::default()
            }),
        );

        let stats = build_headless_stats(&dashboard, &Utc)?;
        let detail = stats.detail.as_ref().unwrap();
        assert_eq!(detail.points.len(), 14);
        assert_eq!(detail.points[0].date, "02/07");

        let text = render_headless_text(&stats);
        assert!(text.contains("Confirmed for the last two weeks (spain):"));
        assert!(text.contains("- 02/20 | 13019000"));
        Ok(())
    }

    #[test]
    fn text_output_lists_totals_and_countries() -> Result<()> {
        let stats = build_headless_stats(&loaded_dashboard(), &Utc)?;
        let text = render_headless_text(&stats);

        assert!(text.contains("Confirmed: 8"));
        assert!(text.contains(" 1. Spain | 5"));
        assert!(text.contains(" 2. Switzerland | 3"));
        Ok(())
    }

    #[test]
    fn json_output_has_named_fields() -> Result<()> {
        let stats = build_headless_stats(&loaded_dashboard(), &Utc)?;
        let json = serde_json::to_value(&stats)?;

        assert_eq!(json["confirmed"], 8);
        assert_eq!(json["top_countries"][0]["country"], "Spain");
        assert!(json["detail"].is_null());
        Ok(())
    }

    #[test]
    fn stats_need_a_loaded_summary() {
        let dashboard = Dashboard::new(DashboardOptions::default());
        assert!(build_headless_stats(&dashboard, &Utc).is_err());
    }
}
