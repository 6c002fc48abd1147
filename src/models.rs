//! Data models for the corpus dashboard.
//!
//! This module contains the corpus structures loaded from disk, the
//! selection types the presentation layer hands in, and the derived
//! views (rankings, series, graphs, matrices) the aggregation layer
//! hands back.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted top-N.
pub const MAX_TOP_N: usize = 100;

/// Entity string to occurrence count, in file order.
pub type EntityCounts = IndexMap<String, u64>;

/// Year → month → per-category counts restricted to that month.
pub type MonthBreakdown = IndexMap<String, IndexMap<String, CategoryCounts>>;

/// Year → month → day calendar as stored on disk.
pub type RawCalendar = IndexMap<String, IndexMap<String, DayEntries>>;

/// A selection value the aggregation layer does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unknown corpus '{0}' (expected Macron/France, Poutine/Russie or Combined)")]
    UnknownCorpus(String),

    #[error("Unknown period '{0}' (expected all, a year such as 2024, last6 or last3)")]
    UnknownPeriod(String),

    #[error("Unknown category '{0}' (expected keywords, locations, organizations or persons)")]
    UnknownCategory(String),

    #[error("Top-N {0} is out of range (expected 1 to {})", MAX_TOP_N)]
    TopNOutOfRange(usize),
}

/// Entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keywords,
    Locations,
    Organizations,
    Persons,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Keywords,
        Category::Locations,
        Category::Organizations,
        Category::Persons,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Keywords => "Keywords",
            Category::Locations => "Locations",
            Category::Organizations => "Organizations",
            Category::Persons => "Persons",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

impl FromStr for Category {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keywords" | "keyword" | "kws" => Ok(Category::Keywords),
            "locations" | "location" | "loc" => Ok(Category::Locations),
            "organizations" | "organization" | "org" => Ok(Category::Organizations),
            "persons" | "person" | "per" => Ok(Category::Persons),
            _ => Err(SelectionError::UnknownCategory(s.to_string())),
        }
    }
}

/// The four category mappings of a corpus (or of a month of it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(rename = "kws", default)]
    pub keywords: EntityCounts,
    #[serde(rename = "loc", default)]
    pub locations: EntityCounts,
    #[serde(rename = "org", default)]
    pub organizations: EntityCounts,
    #[serde(rename = "per", default)]
    pub persons: EntityCounts,
}

impl CategoryCounts {
    /// Counts for one category.
    pub fn get(&self, category: Category) -> &EntityCounts {
        match category {
            Category::Keywords => &self.keywords,
            Category::Locations => &self.locations,
            Category::Organizations => &self.organizations,
            Category::Persons => &self.persons,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut EntityCounts {
        match category {
            Category::Keywords => &mut self.keywords,
            Category::Locations => &mut self.locations,
            Category::Organizations => &mut self.organizations,
            Category::Persons => &mut self.persons,
        }
    }

    /// Count for one entity, 0 when absent.
    pub fn count(&self, category: Category, entity: &str) -> u64 {
        self.get(category).get(entity).copied().unwrap_or(0)
    }
}

/// Articles recorded for one calendar month.
///
/// Resolved once while loading: an object of day keys becomes `Days`,
/// anything else is `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayEntries {
    #[default]
    Absent,
    Days(usize),
}

impl DayEntries {
    /// Number of articles (day entries) in the month.
    pub fn article_count(&self) -> u64 {
        match self {
            DayEntries::Absent => 0,
            DayEntries::Days(n) => *n as u64,
        }
    }
}

impl<'de> Deserialize<'de> for DayEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Object(days) => DayEntries::Days(days.len()),
            _ => DayEntries::Absent,
        })
    }
}

/// `metadata` section of a corpus file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusMetadata {
    #[serde(default)]
    pub all: CategoryCounts,
    #[serde(default)]
    pub month: MonthBreakdown,
}

/// A corpus file exactly as it is laid out on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFile {
    pub metadata: CorpusMetadata,
    pub data: RawCalendar,
}

/// The two named corpora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorpusId {
    #[serde(rename = "Macron/France")]
    Macron,
    #[serde(rename = "Poutine/Russie")]
    Poutine,
}

impl CorpusId {
    pub fn name(&self) -> &'static str {
        match self {
            CorpusId::Macron => "Macron/France",
            CorpusId::Poutine => "Poutine/Russie",
        }
    }
}

impl fmt::Display for CorpusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One month of the article calendar with a validated date.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    /// Year key as written in the file.
    pub year: String,
    /// Month key as written in the file.
    pub month: String,
    /// First day of the month.
    pub date: NaiveDate,
    pub days: DayEntries,
}

/// A loaded, read-only corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub id: CorpusId,
    /// `metadata.all` totals.
    pub totals: CategoryCounts,
    /// `metadata.month` breakdown.
    pub monthly: MonthBreakdown,
    /// `data` calendar in file order.
    pub calendar: Vec<CalendarMonth>,
}

impl Corpus {
    /// Month counts for `year`/`month`, trying the key as written and zero-padded.
    pub fn month_counts(&self, year: &str, month: u32) -> Option<&CategoryCounts> {
        let months = self.monthly.get(year)?;
        months
            .get(&month.to_string())
            .or_else(|| months.get(&format!("{:02}", month)))
    }

    /// Count of `entity` in `category` for a month; 0 for any missing segment.
    pub fn monthly_count(&self, category: Category, entity: &str, year: &str, month: u32) -> u64 {
        self.month_counts(year, month)
            .map(|counts| counts.count(category, entity))
            .unwrap_or(0)
    }

    /// Total number of articles in the calendar.
    pub fn total_articles(&self) -> u64 {
        self.calendar.iter().map(|m| m.days.article_count()).sum()
    }
}

/// Which corpus (or both) a view is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSelection {
    Single(CorpusId),
    Combined,
}

impl CorpusSelection {
    /// Corpora that feed this selection.
    pub fn members(&self) -> &'static [CorpusId] {
        match self {
            CorpusSelection::Single(CorpusId::Macron) => &[CorpusId::Macron],
            CorpusSelection::Single(CorpusId::Poutine) => &[CorpusId::Poutine],
            CorpusSelection::Combined => &[CorpusId::Macron, CorpusId::Poutine],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CorpusSelection::Single(id) => id.name(),
            CorpusSelection::Combined => "Combined",
        }
    }
}

impl fmt::Display for CorpusSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CorpusSelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let matches = |candidates: &[&str]| candidates.iter().any(|c| c.eq_ignore_ascii_case(wanted));

        if matches(&["Macron/France", "macron", "france"]) {
            Ok(CorpusSelection::Single(CorpusId::Macron))
        } else if matches(&["Poutine/Russie", "poutine", "russie"]) {
            Ok(CorpusSelection::Single(CorpusId::Poutine))
        } else if matches(&["Combined", "both"]) {
            Ok(CorpusSelection::Combined)
        } else {
            Err(SelectionError::UnknownCorpus(s.to_string()))
        }
    }
}

impl Serialize for CorpusSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Time-period filter applied to temporal series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    All,
    /// Keep records of this year key.
    Year(String),
    /// Keep records within `days` of the latest date in the series.
    Recent { code: &'static str, days: u64 },
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => write!(f, "all"),
            Period::Year(year) => write!(f, "{}", year),
            Period::Recent { code, .. } => write!(f, "{}", code),
        }
    }
}

impl FromStr for Period {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        match code.to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "last6" => Ok(Period::Recent {
                code: "last6",
                days: 180,
            }),
            "last3" => Ok(Period::Recent {
                code: "last3",
                days: 90,
            }),
            _ if code.len() == 4 && code.chars().all(|c| c.is_ascii_digit()) => {
                Ok(Period::Year(code.to_string()))
            }
            _ => Err(SelectionError::UnknownPeriod(s.to_string())),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntity {
    pub entity: String,
    pub count: u64,
}

impl RankedEntity {
    pub fn new(entity: impl Into<String>, count: u64) -> Self {
        Self {
            entity: entity.into(),
            count,
        }
    }
}

/// Article count for one (corpus, year, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalRecord {
    pub corpus: CorpusId,
    pub year: String,
    pub month: String,
    /// First day of the month.
    pub date: NaiveDate,
    pub n_articles: u64,
}

/// Headline figures for a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total_articles: u64,
    /// Calendar months spanned by the filtered series.
    pub months_covered: u32,
    pub unique_keywords: usize,
    pub unique_locations: usize,
    pub unique_organizations: usize,
    pub unique_persons: usize,
}

/// Location bar tagged with the corpus it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationBar {
    pub corpus: CorpusId,
    pub entity: String,
    pub count: u64,
}

/// Theme node of a thematic rollup, with its non-zero keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeNode {
    pub theme: String,
    pub value: u64,
    pub keywords: Vec<RankedEntity>,
}

/// Keyword × month grid; `cells[row][column]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<String>,
    /// `YYYY-MM` labels, ascending.
    pub columns: Vec<String>,
    pub cells: Vec<Vec<u64>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Center entity and its frequency neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProximityGraph {
    pub center: String,
    pub center_count: u64,
    pub neighbors: Vec<RankedEntity>,
}

/// Weighted edge between two persons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Person network built from frequency proximity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorNetwork {
    pub nodes: Vec<RankedEntity>,
    pub edges: Vec<NetworkEdge>,
}

/// Link of a flow (Sankey) diagram, indices into `FlowDiagram::nodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub nodes: Vec<String>,
    pub links: Vec<FlowLink>,
}

/// Actor × location matrix; `values[actor][location]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssociationMatrix {
    pub actors: Vec<String>,
    pub locations: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Metadata about a rendered dashboard report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub macron_source: String,
    pub poutine_source: String,
    /// Seed used for the association matrix.
    pub seed: u64,
    pub duration_seconds: f64,
}
