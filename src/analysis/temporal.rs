//! Month-level views: article series, monthly counts and the attention heatmap.

use crate::context::DashboardContext;
use crate::models::{Category, CorpusSelection, Heatmap, Period, TemporalRecord};
use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// Articles per month for the selection, filtered by `period`, oldest first.
pub fn temporal_series(
    ctx: &DashboardContext,
    selection: CorpusSelection,
    period: &Period,
) -> Vec<TemporalRecord> {
    let mut records: Vec<TemporalRecord> = ctx
        .corpora(selection)
        .flat_map(|corpus| {
            corpus.calendar.iter().map(move |month| TemporalRecord {
                corpus: corpus.id,
                year: month.year.clone(),
                month: month.month.clone(),
                date: month.date,
                n_articles: month.days.article_count(),
            })
        })
        .collect();

    records.sort_by_key(|r| r.date);
    filter_period(records, period)
}

/// Apply a period filter to a date-sorted series.
///
/// Recent windows are measured back from the latest date of the unfiltered
/// series; an empty series stays empty.
pub fn filter_period(mut records: Vec<TemporalRecord>, period: &Period) -> Vec<TemporalRecord> {
    match period {
        Period::All => {}
        Period::Year(year) => records.retain(|r| &r.year == year),
        Period::Recent { days, .. } => {
            let Some(latest) = records.iter().map(|r| r.date).max() else {
                return Vec::new();
            };
            let cutoff = latest
                .checked_sub_days(Days::new(*days))
                .unwrap_or(NaiveDate::MIN);
            records.retain(|r| r.date >= cutoff);
        }
    }

    records
}

/// Count of `entity` in `category` for a month, summed over the selection.
///
/// Any missing year, month, category or entity counts as 0.
pub fn monthly_count(
    ctx: &DashboardContext,
    selection: CorpusSelection,
    category: Category,
    entity: &str,
    year: &str,
    month: u32,
) -> u64 {
    ctx.corpora(selection)
        .map(|corpus| corpus.monthly_count(category, entity, year, month))
        .sum()
}

/// Keyword count for a month; see [`monthly_count`].
pub fn monthly_keyword_count(
    ctx: &DashboardContext,
    selection: CorpusSelection,
    keyword: &str,
    year: &str,
    month: u32,
) -> u64 {
    monthly_count(ctx, selection, Category::Keywords, keyword, year, month)
}

/// Keyword × month grid of mentions over every year in the month breakdown.
///
/// Only keywords with at least one mention get a row; columns are the
/// `YYYY-MM` months with any mention, ascending. Missing cells are 0.
pub fn attention_heatmap(
    ctx: &DashboardContext,
    selection: CorpusSelection,
    keywords: &[String],
) -> Heatmap {
    let years: BTreeSet<&str> = ctx
        .corpora(selection)
        .flat_map(|corpus| corpus.monthly.keys().map(String::as_str))
        .collect();

    let mut rows: Vec<(String, BTreeMap<String, u64>)> = Vec::new();
    let mut columns: BTreeSet<String> = BTreeSet::new();

    for keyword in keywords {
        let mut cells = BTreeMap::new();

        for year in &years {
            for month in 1..=12 {
                let count = monthly_keyword_count(ctx, selection, keyword, year, month);
                if count > 0 {
                    let column = format!("{}-{:02}", year, month);
                    columns.insert(column.clone());
                    cells.insert(column, count);
                }
            }
        }

        if !cells.is_empty() {
            rows.push((keyword.clone(), cells));
        }
    }

    let columns: Vec<String> = columns.into_iter().collect();
    let cells = rows
        .iter()
        .map(|(_, row)| {
            columns
                .iter()
                .map(|column| row.get(column).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Heatmap {
        rows: rows.into_iter().map(|(keyword, _)| keyword).collect(),
        columns,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CorpusId;
    use crate::test_support::sample_context;

    const MACRON: CorpusSelection = CorpusSelection::Single(CorpusId::Macron);
    const POUTINE: CorpusSelection = CorpusSelection::Single(CorpusId::Poutine);

    fn labels(records: &[TemporalRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.date.format("%Y-%m").to_string())
            .collect()
    }

    fn recent(code: &'static str, days: u64) -> Period {
        Period::Recent { code, days }
    }

    #[test]
    fn test_series_single_corpus() {
        let ctx = sample_context();
        let series = temporal_series(&ctx, MACRON, &Period::All);

        assert_eq!(labels(&series), vec!["2024-11", "2024-12", "2025-01"]);
        assert_eq!(series[0].year, "2024");
        assert_eq!(series[0].month, "11");
        assert_eq!(series[0].n_articles, 3);
        assert!(series.iter().all(|r| r.corpus == CorpusId::Macron));
    }

    #[test]
    fn test_series_combined_is_sorted() {
        let ctx = sample_context();
        let series = temporal_series(&ctx, CorpusSelection::Combined, &Period::All);

        assert_eq!(
            labels(&series),
            vec!["2024-10", "2024-11", "2024-12", "2025-01", "2025-03", "2025-04"]
        );
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(series[0].corpus, CorpusId::Poutine);
    }

    #[test]
    fn test_series_non_mapping_month_counts_zero() {
        let ctx = sample_context();
        let series = temporal_series(&ctx, POUTINE, &Period::All);

        let april = series.iter().find(|r| r.month == "04").unwrap();
        assert_eq!(april.n_articles, 0);
    }

    #[test]
    fn test_series_year_filter() {
        let ctx = sample_context();
        let series = temporal_series(&ctx, CorpusSelection::Combined, &Period::Year("2024".into()));

        assert_eq!(labels(&series), vec!["2024-10", "2024-11", "2024-12"]);
    }

    #[test]
    fn test_series_recent_windows() {
        let ctx = sample_context();

        let last3 = temporal_series(&ctx, CorpusSelection::Combined, &recent("last3", 90));
        assert_eq!(labels(&last3), vec!["2025-01", "2025-03", "2025-04"]);

        let last6 = temporal_series(&ctx, CorpusSelection::Combined, &recent("last6", 180));
        assert_eq!(
            labels(&last6),
            vec!["2024-11", "2024-12", "2025-01", "2025-03", "2025-04"]
        );
    }

    #[test]
    fn test_filter_period_empty_series() {
        assert!(filter_period(Vec::new(), &recent("last6", 180)).is_empty());
        assert!(filter_period(Vec::new(), &Period::All).is_empty());
    }

    #[test]
    fn test_monthly_keyword_count() {
        let ctx = sample_context();

        assert_eq!(monthly_keyword_count(&ctx, MACRON, "france", "2024", 11), 5);
        assert_eq!(monthly_keyword_count(&ctx, MACRON, "france", "2025", 1), 7);
        assert_eq!(monthly_keyword_count(&ctx, POUTINE, "russie", "2025", 3), 2);
        assert_eq!(
            monthly_keyword_count(&ctx, CorpusSelection::Combined, "russie", "2025", 1),
            2
        );
    }

    #[test]
    fn test_monthly_count_missing_paths_are_zero() {
        let ctx = sample_context();

        assert_eq!(monthly_keyword_count(&ctx, MACRON, "france", "1999", 1), 0);
        assert_eq!(monthly_keyword_count(&ctx, MACRON, "france", "2024", 2), 0);
        assert_eq!(monthly_keyword_count(&ctx, MACRON, "absent", "2024", 11), 0);
        assert_eq!(monthly_keyword_count(&ctx, MACRON, "france", "2024", 99), 0);
        assert_eq!(
            monthly_count(&ctx, MACRON, Category::Persons, "macron", "2024", 11),
            0
        );
    }

    #[test]
    fn test_attention_heatmap() {
        let ctx = sample_context();
        let keywords: Vec<String> = ["russie", "france", "otan"]
            .into_iter()
            .map(String::from)
            .collect();

        let heatmap = attention_heatmap(&ctx, CorpusSelection::Combined, &keywords);

        assert_eq!(heatmap.rows, vec!["russie", "france"]);
        assert_eq!(
            heatmap.columns,
            vec!["2024-10", "2024-11", "2024-12", "2025-01", "2025-03"]
        );
        assert_eq!(heatmap.cells[0], vec![1, 0, 0, 2, 2]);
        assert_eq!(heatmap.cells[1], vec![0, 5, 4, 7, 0]);
    }

    #[test]
    fn test_attention_heatmap_without_data() {
        let ctx = sample_context();
        let heatmap = attention_heatmap(&ctx, MACRON, &["otan".to_string()]);
        assert!(heatmap.is_empty());
        assert!(heatmap.columns.is_empty());
    }
}
