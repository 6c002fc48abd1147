//! Corpus loading.
//!
//! This module reads the two corpus JSON files, resolves their day
//! calendars into typed months and builds the shared
//! [`DashboardContext`]. Any failure here is fatal at startup.

use crate::config::DataConfig;
use crate::context::DashboardContext;
use crate::models::{CalendarMonth, Corpus, CorpusFile, CorpusId, RawCalendar};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a corpus file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Data file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid calendar entry {year}/{month} in {}", .path.display())]
    InvalidCalendarKey {
        path: PathBuf,
        year: String,
        month: String,
    },
}

/// Load both corpora concurrently and build the dashboard context.
pub async fn load_context(data: &DataConfig) -> Result<DashboardContext, DataLoadError> {
    let (macron, poutine) = tokio::try_join!(
        load_corpus(CorpusId::Macron, &data.macron_path),
        load_corpus(CorpusId::Poutine, &data.poutine_path),
    )?;

    Ok(DashboardContext::new(macron, poutine))
}

/// Load a single corpus file.
pub async fn load_corpus(id: CorpusId, path: &Path) -> Result<Corpus, DataLoadError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(DataLoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading {} from {}", id, path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DataLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_corpus(id, path, &content)
}

/// Parse corpus JSON. `path` is only used for error messages.
pub fn parse_corpus(id: CorpusId, path: &Path, content: &str) -> Result<Corpus, DataLoadError> {
    let file: CorpusFile =
        serde_json::from_str(content).map_err(|source| DataLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let calendar = resolve_calendar(&file.data).map_err(|(year, month)| {
        DataLoadError::InvalidCalendarKey {
            path: path.to_path_buf(),
            year,
            month,
        }
    })?;

    let corpus = Corpus {
        id,
        totals: file.metadata.all,
        monthly: file.metadata.month,
        calendar,
    };

    info!(
        "Loaded {}: {} keywords, {} months, {} articles",
        id,
        corpus.totals.keywords.len(),
        corpus.calendar.len(),
        corpus.total_articles()
    );

    Ok(corpus)
}

/// Turn the raw year → month calendar into dated months.
///
/// Returns the offending `(year, month)` keys when a date cannot be built.
fn resolve_calendar(raw: &RawCalendar) -> Result<Vec<CalendarMonth>, (String, String)> {
    let mut months = Vec::new();

    for (year, by_month) in raw {
        for (month, days) in by_month {
            let date = month_start(year, month).ok_or_else(|| (year.clone(), month.clone()))?;
            months.push(CalendarMonth {
                year: year.clone(),
                month: month.clone(),
                date,
                days: *days,
            });
        }
    }

    Ok(months)
}

/// First day of the month named by string keys such as `"2024"`, `"4"` or `"04"`.
fn month_start(year: &str, month: &str) -> Option<NaiveDate> {
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::temporal_series;
    use crate::models::{CorpusSelection, DayEntries, Period, TemporalRecord};
    use crate::test_support::{MACRON_JSON, POUTINE_JSON};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start("2024", "04"), NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(month_start("2024", "4"), NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(month_start("2024", "13"), None);
        assert_eq!(month_start("year", "01"), None);
    }

    #[test]
    fn test_parse_corpus_resolves_calendar() {
        let corpus = parse_corpus(CorpusId::Macron, Path::new("m.json"), MACRON_JSON).unwrap();

        assert_eq!(corpus.calendar.len(), 3);
        assert_eq!(corpus.calendar[0].year, "2024");
        assert_eq!(corpus.calendar[0].month, "11");
        assert_eq!(corpus.calendar[0].days, DayEntries::Days(3));
        assert_eq!(corpus.total_articles(), 6);
        assert_eq!(corpus.totals.keywords["france"], 40);
    }

    #[test]
    fn test_parse_corpus_counts_twelve_days() {
        let days: Vec<String> = (1..=12).map(|d| format!("\"{:02}\": {{}}", d)).collect();
        let json = format!(
            r#"{{"metadata": {{"all": {{}}, "month": {{}}}}, "data": {{"2024": {{"04": {{{}}}}}}}}}"#,
            days.join(", ")
        );

        let corpus = parse_corpus(CorpusId::Poutine, Path::new("p.json"), &json).unwrap();
        assert_eq!(corpus.calendar[0].days.article_count(), 12);

        let macron = parse_corpus(CorpusId::Macron, Path::new("m.json"), MACRON_JSON).unwrap();
        let ctx = DashboardContext::new(macron, corpus);
        let series = temporal_series(
            &ctx,
            CorpusSelection::Single(CorpusId::Poutine),
            &Period::All,
        );
        assert_eq!(
            series,
            vec![TemporalRecord {
                corpus: CorpusId::Poutine,
                year: "2024".to_string(),
                month: "04".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                n_articles: 12,
            }]
        );
    }

    #[test]
    fn test_parse_corpus_rejects_bad_month() {
        let json = r#"{"metadata": {"all": {}}, "data": {"2024": {"avril": {}}}}"#;
        let err = parse_corpus(CorpusId::Macron, Path::new("bad.json"), json).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidCalendarKey { ref month, .. } if month == "avril"));
    }

    #[test]
    fn test_parse_corpus_malformed_json() {
        let err = parse_corpus(CorpusId::Macron, Path::new("bad.json"), "{ not json").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_parse_corpus_requires_sections() {
        let err = parse_corpus(CorpusId::Macron, Path::new("empty.json"), "{}").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_context_from_files() {
        let macron = write_temp(MACRON_JSON);
        let poutine = write_temp(POUTINE_JSON);
        let data = DataConfig {
            macron_path: macron.path().to_path_buf(),
            poutine_path: poutine.path().to_path_buf(),
        };

        let ctx = load_context(&data).await.unwrap();
        assert_eq!(ctx.corpus(CorpusId::Macron).total_articles(), 6);
        assert_eq!(ctx.corpus(CorpusId::Poutine).total_articles(), 6);
    }

    #[tokio::test]
    async fn test_load_context_missing_file() {
        let macron = write_temp(MACRON_JSON);
        let data = DataConfig {
            macron_path: macron.path().to_path_buf(),
            poutine_path: PathBuf::from("/nonexistent/poutine.json"),
        };

        let err = load_context(&data).await.unwrap_err();
        assert!(matches!(err, DataLoadError::Missing { .. }));
    }
}
