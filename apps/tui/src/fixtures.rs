use chrono::{Duration, TimeZone, Utc};
use covid_dashboard_core::model::{CaseEntry, CountryStat};
use covid_dashboard_core::{CountrySeries, Summary};

pub fn summary() -> Summary {
    Summary {
        date: Utc.with_ymd_and_hms(2023, 3, 9, 8, 3, 42).unwrap(),
        countries: [("Switzerland", "switzerland", 3), ("Spain", "spain", 5)]
            .into_iter()
            .map(|(country, slug, confirmed)| CountryStat {
                country: country.to_string(),
                country_code: String::new(),
                slug: slug.to_string(),
                new_confirmed: 0,
                total_confirmed: confirmed,
                new_deaths: 0,
                total_deaths: 1,
                new_recovered: 0,
                total_recovered: 0,
            })
            .collect(),
    }
}

pub fn series(days: u64) -> CountrySeries {
    let start = Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap();
    (0..days)
        .map(|day| CaseEntry {
            cases: 13_000_000 + day * 1_000,
            date: start + Duration::days(i64::try_from(day).unwrap_or_default()),
        })
        .collect()
}
