//! One recomputation pass: a filter selection in, every chart description out.

use crate::analysis::{
    actor_flows, actor_network, association_matrix, attention_heatmap, corpus_view, kpis,
    location_comparison, proximity_graph, temporal_series, thematic_rollup, top_n,
};
use crate::config::Config;
use crate::context::DashboardContext;
use crate::models::{
    ActorNetwork, AssociationMatrix, Category, CorpusSelection, FlowDiagram, Heatmap, Kpis,
    LocationBar, Period, ProximityGraph, RankedEntity, SelectionError, TemporalRecord, ThemeNode,
    MAX_TOP_N,
};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Filter values chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub corpus: CorpusSelection,
    pub period: Period,
    pub category: Category,
    pub top_n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl Selection {
    /// Parse raw selection values.
    ///
    /// `top_n` may come from the config file, so it is range-checked here
    /// as well as on the command line.
    pub fn parse(
        corpus: &str,
        period: &str,
        category: &str,
        top_n: usize,
        focus: Option<&str>,
    ) -> Result<Self, SelectionError> {
        if !(1..=MAX_TOP_N).contains(&top_n) {
            return Err(SelectionError::TopNOutOfRange(top_n));
        }

        Ok(Self {
            corpus: corpus.parse()?,
            period: period.parse()?,
            category: category.parse()?,
            top_n,
            focus: focus
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from),
        })
    }
}

/// Every chart of the dashboard for one selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    /// `None` when the selection could not be parsed.
    pub selection: Option<Selection>,
    pub kpis: Kpis,
    /// Top-N of the selected category.
    pub ranking: Vec<RankedEntity>,
    /// Top-N keywords, the choices for the focus word.
    pub keyword_options: Vec<RankedEntity>,
    pub locations: Vec<LocationBar>,
    pub temporal: Vec<TemporalRecord>,
    pub attention: Heatmap,
    pub flows: FlowDiagram,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_network: Option<ProximityGraph>,
    pub actor_network: ActorNetwork,
    pub actors_locations: AssociationMatrix,
    pub themes: Vec<ThemeNode>,
    /// Messages shown in place of empty charts.
    pub notices: Vec<String>,
}

impl Dashboard {
    /// Placeholder dashboard for a selection that could not be parsed.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            notices: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.selection.is_none()
    }
}

/// Build the dashboard for `selection`.
pub fn build<R: Rng + ?Sized>(
    ctx: &DashboardContext,
    selection: &Selection,
    config: &Config,
    rng: &mut R,
) -> Dashboard {
    let corpus = selection.corpus;
    let view = corpus_view(ctx, corpus);
    let mut notices = Vec::new();

    let temporal = temporal_series(ctx, corpus, &selection.period);
    if temporal.is_empty() {
        notices.push(format!(
            "Temporal series: insufficient data for period '{}'",
            selection.period
        ));
    }

    let attention = attention_heatmap(ctx, corpus, &config.heatmap.keywords);
    if attention.is_empty() {
        notices.push("Attention heatmap: insufficient data".to_string());
    }

    let word_network = match selection.focus.as_deref() {
        Some(focus) => {
            let graph = proximity_graph(
                &view.keywords,
                focus,
                config.graph.candidate_pool,
                config.graph.max_neighbors,
            );
            if graph.center_count == 0 {
                notices.push(format!(
                    "Word network: '{}' does not appear in {}",
                    focus, corpus
                ));
            }
            Some(graph)
        }
        None => {
            notices.push("Word network: select a keyword".to_string());
            None
        }
    };

    let themes = thematic_rollup(&config.themes, &view.keywords);
    if themes.is_empty() {
        notices.push("Themes: no theme keyword appears in this corpus".to_string());
    }

    let n_actors = selection.top_n.min(config.matrix.max_actors);
    let n_locations = (selection.top_n.saturating_mul(3) / 5).min(config.matrix.max_locations);
    let actors = top_n(&view.persons, n_actors);
    let locations = top_n(&view.locations, n_locations);
    let actors_locations = association_matrix(&actors, &locations, rng);

    let dashboard = Dashboard {
        selection: Some(selection.clone()),
        kpis: kpis(ctx, corpus, &selection.period),
        ranking: top_n(view.get(selection.category), selection.top_n),
        keyword_options: top_n(&view.keywords, selection.top_n),
        locations: location_comparison(ctx, corpus, config.graph.location_count),
        temporal,
        attention,
        flows: actor_flows(&view, config.graph.flow_size, config.graph.flow_fanout),
        word_network,
        actor_network: actor_network(&view.persons, config.graph.network_size),
        actors_locations,
        themes,
        notices,
    };

    debug!(
        "Dashboard for {} / {}: {} ranked, {} months, {} notices",
        corpus,
        selection.period,
        dashboard.ranking.len(),
        dashboard.temporal.len(),
        dashboard.notices.len()
    );

    dashboard
}
