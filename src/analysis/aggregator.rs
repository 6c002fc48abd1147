//! Frequency aggregation across corpora.
//!
//! This module merges the corpora's counters, picks the view for a
//! selection and ranks entities.

use crate::context::DashboardContext;
use crate::models::{
    Category, CategoryCounts, CorpusSelection, EntityCounts, Kpis, LocationBar, Period,
    RankedEntity, SelectionError,
};
use std::borrow::Cow;

use super::temporal::temporal_series;

/// Sum two counters; keys of `a` keep their order, new keys of `b` follow.
pub fn merge_counts(a: &EntityCounts, b: &EntityCounts) -> EntityCounts {
    let mut merged = a.clone();

    for (entity, count) in b {
        *merged.entry(entity.clone()).or_insert(0) += count;
    }

    merged
}

/// Combine two corpora category by category.
pub fn combine(a: &CategoryCounts, b: &CategoryCounts) -> CategoryCounts {
    let mut combined = CategoryCounts::default();

    for category in Category::ALL {
        *combined.get_mut(category) = merge_counts(a.get(category), b.get(category));
    }

    combined
}

/// Totals for a selection: borrowed for a single corpus, summed for both.
pub fn corpus_view(ctx: &DashboardContext, selection: CorpusSelection) -> Cow<'_, CategoryCounts> {
    match selection {
        CorpusSelection::Single(id) => Cow::Borrowed(&ctx.corpus(id).totals),
        CorpusSelection::Combined => {
            let mut corpora = ctx.corpora(selection);
            let first = corpora.next().map(|c| c.totals.clone()).unwrap_or_default();
            Cow::Owned(corpora.fold(first, |acc, c| combine(&acc, &c.totals)))
        }
    }
}

/// Totals for a corpus given by name.
pub fn select_corpus<'a>(
    ctx: &'a DashboardContext,
    name: &str,
) -> Result<Cow<'a, CategoryCounts>, SelectionError> {
    let selection: CorpusSelection = name.parse()?;
    Ok(corpus_view(ctx, selection))
}

/// Highest counts first; ties keep input order.
pub fn top_n(counts: &EntityCounts, n: usize) -> Vec<RankedEntity> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedEntity> = counts
        .iter()
        .map(|(entity, count)| RankedEntity::new(entity.clone(), *count))
        .collect();

    ranked.sort_by_key(|e| std::cmp::Reverse(e.count));
    ranked.truncate(n);

    ranked
}

/// Top locations of each corpus in the selection, tagged with the corpus.
pub fn location_comparison(
    ctx: &DashboardContext,
    selection: CorpusSelection,
    n: usize,
) -> Vec<LocationBar> {
    ctx.corpora(selection)
        .flat_map(|corpus| {
            top_n(&corpus.totals.locations, n)
                .into_iter()
                .map(move |e| LocationBar {
                    corpus: corpus.id,
                    entity: e.entity,
                    count: e.count,
                })
        })
        .collect()
}

/// Headline figures: articles and months for the period, unique entities overall.
pub fn kpis(ctx: &DashboardContext, selection: CorpusSelection, period: &Period) -> Kpis {
    let series = temporal_series(ctx, selection, period);
    let total_articles = series.iter().map(|r| r.n_articles).sum();

    let months_covered = match (series.first(), series.last()) {
        (Some(first), Some(last)) => months_between(first.date, last.date),
        _ => 0,
    };

    let view = corpus_view(ctx, selection);

    Kpis {
        total_articles,
        months_covered,
        unique_keywords: view.keywords.len(),
        unique_locations: view.locations.len(),
        unique_organizations: view.organizations.len(),
        unique_persons: view.persons.len(),
    }
}

/// Inclusive month span between two month starts.
fn months_between(start: chrono::NaiveDate, end: chrono::NaiveDate) -> u32 {
    use chrono::Datelike;

    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1;
    span.max(0) as u32
}
