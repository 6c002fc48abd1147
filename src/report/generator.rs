//! Markdown and JSON dashboard reports.
//!
//! Rendering only: every number comes from the dashboard, nothing is
//! aggregated here.

use crate::dashboard::Dashboard;
use crate::models::{
    ActorNetwork, AssociationMatrix, FlowDiagram, Heatmap, Kpis, LocationBar, ProximityGraph,
    RankedEntity, ReportMetadata, TemporalRecord, ThemeNode,
};
use anyhow::Result;
use serde::Serialize;

/// A dashboard with the metadata of the run that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub dashboard: Dashboard,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let dashboard = &report.dashboard;
    let mut output = String::new();

    output.push_str("# Corpus Dashboard\n\n");
    output.push_str(&generate_metadata_section(&report.metadata, dashboard));
    output.push_str(&generate_notices_section(&dashboard.notices));

    if dashboard.is_placeholder() {
        output.push_str(&generate_footer());
        return output;
    }

    output.push_str(&generate_table_of_contents());
    output.push_str(&generate_kpi_section(&dashboard.kpis));
    output.push_str(&generate_ranking_section(dashboard));
    output.push_str(&generate_themes_section(&dashboard.themes));
    output.push_str(&generate_temporal_section(&dashboard.temporal));
    output.push_str(&generate_heatmap_section(&dashboard.attention));
    output.push_str(&generate_locations_section(&dashboard.locations));
    output.push_str(&generate_flows_section(&dashboard.flows));
    output.push_str(&generate_word_network_section(dashboard.word_network.as_ref()));
    output.push_str(&generate_actor_network_section(&dashboard.actor_network));
    output.push_str(&generate_matrix_section(&dashboard.actors_locations));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn generate_metadata_section(metadata: &ReportMetadata, dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Macron/France data:** `{}`\n", metadata.macron_source));
    section.push_str(&format!("- **Poutine/Russie data:** `{}`\n", metadata.poutine_source));

    if let Some(ref selection) = dashboard.selection {
        section.push_str(&format!("- **Corpus:** {}\n", selection.corpus));
        section.push_str(&format!("- **Period:** {}\n", selection.period));
        section.push_str(&format!("- **Category:** {}\n", selection.category));
        section.push_str(&format!("- **Top N:** {}\n", selection.top_n));
        if let Some(ref focus) = selection.focus {
            section.push_str(&format!("- **Focus word:** {}\n", focus));
        }
    }

    section.push_str(&format!("- **Matrix seed:** {}\n", metadata.seed));
    section.push_str(&format!(
        "- **Computation time:** {:.3}s\n\n",
        metadata.duration_seconds
    ));

    section
}

fn generate_notices_section(notices: &[String]) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let mut section = String::from("## Notices\n\n");
    for notice in notices {
        section.push_str(&format!("> ⚠️ {}\n", notice));
    }
    section.push('\n');

    section
}

fn generate_table_of_contents() -> String {
    let entries = [
        ("Key Figures", "key-figures"),
        ("Top Entities", "top-entities"),
        ("Themes", "themes"),
        ("Articles per Month", "articles-per-month"),
        ("Attention Peaks", "attention-peaks"),
        ("Geography", "geography"),
        ("Actor Flows", "actor-flows"),
        ("Word Network", "word-network"),
        ("Actor Network", "actor-network"),
        ("Actors and Locations", "actors-and-locations"),
    ];

    let mut toc = String::from("## Table of Contents\n\n");
    for (title, anchor) in entries {
        toc.push_str(&format!("- [{}](#{})\n", title, anchor));
    }
    toc.push('\n');

    toc
}

fn generate_kpi_section(kpis: &Kpis) -> String {
    let mut section = String::from("## Key Figures\n\n");

    section.push_str("| Articles | Months | Keywords | Locations | Organizations | Persons |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        kpis.total_articles,
        kpis.months_covered,
        kpis.unique_keywords,
        kpis.unique_locations,
        kpis.unique_organizations,
        kpis.unique_persons
    ));

    section
}

/// Escape a value for use inside a Markdown table cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Ranked entities as a two-column table.
fn ranking_table(entries: &[RankedEntity]) -> String {
    if entries.is_empty() {
        return "_No data._\n\n".to_string();
    }

    let mut table = String::from("| # | Entity | Count |\n|:---:|:---|---:|\n");
    for (i, entry) in entries.iter().enumerate() {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            i + 1,
            escape_cell(&entry.entity),
            entry.count
        ));
    }
    table.push('\n');

    table
}

fn generate_ranking_section(dashboard: &Dashboard) -> String {
    let mut section = String::from("## Top Entities\n\n");

    if let Some(ref selection) = dashboard.selection {
        section.push_str(&format!("### {}\n\n", selection.category.label()));
    }
    section.push_str(&ranking_table(&dashboard.ranking));

    section
}

fn generate_themes_section(themes: &[ThemeNode]) -> String {
    let mut section = String::from("## Themes\n\n");

    if themes.is_empty() {
        section.push_str("_No data._\n\n");
        return section;
    }

    for theme in themes {
        section.push_str(&format!("- **{}** ({})\n", theme.theme, theme.value));
        for keyword in &theme.keywords {
            section.push_str(&format!("  - {}: {}\n", keyword.entity, keyword.count));
        }
    }
    section.push('\n');

    section
}

fn generate_temporal_section(records: &[TemporalRecord]) -> String {
    let mut section = String::from("## Articles per Month\n\n");

    if records.is_empty() {
        section.push_str("_Insufficient data._\n\n");
        return section;
    }

    section.push_str("| Month | Corpus | Articles |\n|:---|:---|---:|\n");
    for record in records {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            record.date.format("%Y-%m"),
            record.corpus,
            record.n_articles
        ));
    }
    section.push('\n');

    section
}

fn generate_heatmap_section(heatmap: &Heatmap) -> String {
    let mut section = String::from("## Attention Peaks\n\n");

    if heatmap.is_empty() {
        section.push_str("_Insufficient data._\n\n");
        return section;
    }

    section.push_str("| Keyword |");
    for column in &heatmap.columns {
        section.push_str(&format!(" {} |", column));
    }
    section.push_str("\n|:---|");
    section.push_str(&"---:|".repeat(heatmap.columns.len()));
    section.push('\n');

    for (keyword, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
        section.push_str(&format!("| {} |", escape_cell(keyword)));
        for cell in cells {
            section.push_str(&format!(" {} |", cell));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

fn generate_locations_section(locations: &[LocationBar]) -> String {
    let mut section = String::from("## Geography\n\n");

    if locations.is_empty() {
        section.push_str("_No data._\n\n");
        return section;
    }

    section.push_str("| Corpus | Location | Mentions |\n|:---|:---|---:|\n");
    for bar in locations {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            bar.corpus,
            escape_cell(&bar.entity),
            bar.count
        ));
    }
    section.push('\n');

    section
}

fn generate_flows_section(flows: &FlowDiagram) -> String {
    let mut section = String::from("## Actor Flows\n\n");

    if flows.links.is_empty() {
        section.push_str("_No data._\n\n");
        return section;
    }

    section.push_str("| Actor | Location | Value |\n|:---|:---|---:|\n");
    for link in &flows.links {
        let source = flows.nodes.get(link.source).map(String::as_str).unwrap_or("?");
        let target = flows.nodes.get(link.target).map(String::as_str).unwrap_or("?");
        section.push_str(&format!(
            "| {} | {} | {:.1} |\n",
            escape_cell(source),
            escape_cell(target),
            link.value
        ));
    }
    section.push('\n');

    section
}

fn generate_word_network_section(graph: Option<&ProximityGraph>) -> String {
    let mut section = String::from("## Word Network\n\n");

    match graph {
        None => section.push_str("_Select a keyword._\n\n"),
        Some(graph) => {
            section.push_str(&format!(
                "Keywords with a frequency close to **{}** ({}):\n\n",
                graph.center, graph.center_count
            ));
            section.push_str(&ranking_table(&graph.neighbors));
        }
    }

    section
}

fn generate_actor_network_section(network: &ActorNetwork) -> String {
    let mut section = String::from("## Actor Network\n\n");

    if network.nodes.is_empty() {
        section.push_str("_No data._\n\n");
        return section;
    }

    section.push_str(&ranking_table(&network.nodes));

    if !network.edges.is_empty() {
        section.push_str("| From | To | Weight |\n|:---|:---|---:|\n");
        for edge in &network.edges {
            section.push_str(&format!(
                "| {} | {} | {:.1} |\n",
                escape_cell(&edge.source),
                escape_cell(&edge.target),
                edge.weight
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_matrix_section(matrix: &AssociationMatrix) -> String {
    let mut section = String::from("## Actors and Locations\n\n");

    if matrix.actors.is_empty() || matrix.locations.is_empty() {
        section.push_str("_No data._\n\n");
        return section;
    }

    section.push_str("| Actor |");
    for location in &matrix.locations {
        section.push_str(&format!(" {} |", escape_cell(location)));
    }
    section.push_str("\n|:---|");
    section.push_str(&"---:|".repeat(matrix.locations.len()));
    section.push('\n');

    for (actor, row) in matrix.actors.iter().zip(&matrix.values) {
        section.push_str(&format!("| {} |", escape_cell(actor)));
        for value in row {
            section.push_str(&format!(" {:.0} |", value));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by CorpusDash*\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dashboard::{build, Selection};
    use crate::test_support::sample_context;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            generated_at: Utc::now(),
            macron_source: "macron.json".to_string(),
            poutine_source: "poutine.json".to_string(),
            seed: 42,
            duration_seconds: 0.01,
        }
    }

    fn create_test_report(focus: Option<&str>) -> Report {
        let ctx = sample_context();
        let selection = Selection::parse("Combined", "all", "locations", 10, focus).unwrap();
        let dashboard = build(&ctx, &selection, &Config::default(), &mut StdRng::seed_from_u64(42));

        Report {
            metadata: metadata(),
            dashboard,
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report(Some("france")));

        assert!(markdown.contains("# Corpus Dashboard"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("- **Corpus:** Combined"));
        assert!(markdown.contains("### Locations"));
        assert!(markdown.contains("| 1 | moscou | 30 |"));
        assert!(markdown.contains("| 2024-10 | Poutine/Russie | 2 |"));
        assert!(markdown.contains("close to **france** (47)"));
        assert!(markdown.contains("- **Matrix seed:** 42"));
        assert!(!markdown.contains("## Notices"));
    }

    #[test]
    fn test_markdown_shows_notices() {
        let markdown = generate_markdown_report(&create_test_report(None));

        assert!(markdown.contains("## Notices"));
        assert!(markdown.contains("select a keyword"));
        assert!(markdown.contains("_Select a keyword._"));
    }

    #[test]
    fn test_markdown_placeholder() {
        let report = Report {
            metadata: metadata(),
            dashboard: Dashboard::invalid("Unknown corpus 'x'"),
        };

        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("Unknown corpus 'x'"));
        assert!(!markdown.contains("## Key Figures"));
        assert!(markdown.contains("CorpusDash"));
    }

    #[test]
    fn test_heatmap_table() {
        let heatmap = Heatmap {
            rows: vec!["russie".to_string()],
            columns: vec!["2024-10".to_string(), "2024-11".to_string()],
            cells: vec![vec![1, 0]],
        };

        let section = generate_heatmap_section(&heatmap);

        assert!(section.contains("| Keyword | 2024-10 | 2024-11 |"));
        assert!(section.contains("|:---|---:|---:|"));
        assert!(section.contains("| russie | 1 | 0 |"));
    }

    #[test]
    fn test_table_cells_escape_pipes() {
        let table = ranking_table(&[RankedEntity::new("a|b", 3)]);
        assert!(table.contains("| 1 | a\\|b | 3 |"));

        let matrix = AssociationMatrix {
            actors: vec!["x|y".to_string()],
            locations: vec!["paris|lyon".to_string()],
            values: vec![vec![2.0]],
        };
        let section = generate_matrix_section(&matrix);
        assert!(section.contains("| Actor | paris\\|lyon |"));
        assert!(section.contains("| x\\|y | 2 |"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report(Some("france"))).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"dashboard\""));
        assert!(json.contains("\"corpus\": \"Combined\""));
        assert!(json.contains("\"period\": \"all\""));
        assert!(json.contains("\"n_articles\""));
        assert!(json.contains("\"word_network\""));
    }
}
