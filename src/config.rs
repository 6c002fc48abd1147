//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.corpusdash.toml` files.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".corpusdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Corpus file locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Default filter selections.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Graph sizing.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Actor × location matrix settings.
    #[serde(default)]
    pub matrix: MatrixConfig,

    /// Attention heatmap settings.
    #[serde(default)]
    pub heatmap: HeatmapConfig,

    /// Theme name → representative keywords.
    #[serde(default = "default_themes")]
    pub themes: IndexMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            dashboard: DashboardConfig::default(),
            graph: GraphConfig::default(),
            matrix: MatrixConfig::default(),
            heatmap: HeatmapConfig::default(),
            themes: default_themes(),
        }
    }
}

/// Corpus file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the Macron/France corpus.
    #[serde(default = "default_macron_path")]
    pub macron_path: PathBuf,

    /// Path of the Poutine/Russie corpus.
    #[serde(default = "default_poutine_path")]
    pub poutine_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            macron_path: default_macron_path(),
            poutine_path: default_poutine_path(),
        }
    }
}

fn default_macron_path() -> PathBuf {
    PathBuf::from("fr.sputniknews.africa-2025/data/fr.sputniknews.africa-france-macron.json")
}

fn default_poutine_path() -> PathBuf {
    PathBuf::from("fr.sputniknews.africa-2025/data/fr.sputniknews.africa-russie-poutine.json")
}

/// Default filter selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Corpus name (Macron/France, Poutine/Russie or Combined).
    #[serde(default = "default_corpus")]
    pub corpus: String,

    /// Period code (all, a year, last6, last3).
    #[serde(default = "default_period")]
    pub period: String,

    /// Entity category ranked in the main chart.
    #[serde(default = "default_category")]
    pub category: String,

    /// Size of top-N rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            corpus: default_corpus(),
            period: default_period(),
            category: default_category(),
            top_n: default_top_n(),
        }
    }
}

fn default_corpus() -> String {
    "Combined".to_string()
}

fn default_period() -> String {
    "all".to_string()
}

fn default_category() -> String {
    "keywords".to_string()
}

fn default_top_n() -> usize {
    20
}

/// Graph sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Keywords considered as neighbours of the focus word.
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,

    /// Maximum neighbours of the focus word.
    #[serde(default = "default_max_neighbors")]
    pub max_neighbors: usize,

    /// Persons shown in the actor network.
    #[serde(default = "default_network_size")]
    pub network_size: usize,

    /// Persons and locations in the flow diagram.
    #[serde(default = "default_flow_size")]
    pub flow_size: usize,

    /// Locations each person flows into.
    #[serde(default = "default_flow_fanout")]
    pub flow_fanout: usize,

    /// Locations per corpus in the geography comparison.
    #[serde(default = "default_location_count")]
    pub location_count: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            candidate_pool: default_candidate_pool(),
            max_neighbors: default_max_neighbors(),
            network_size: default_network_size(),
            flow_size: default_flow_size(),
            flow_fanout: default_flow_fanout(),
            location_count: default_location_count(),
        }
    }
}

fn default_candidate_pool() -> usize {
    50
}

fn default_max_neighbors() -> usize {
    10
}

fn default_network_size() -> usize {
    15
}

fn default_flow_size() -> usize {
    8
}

fn default_flow_fanout() -> usize {
    3
}

fn default_location_count() -> usize {
    15
}

/// Actor × location matrix settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Fixed seed for reproducible matrices. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Upper bound on matrix rows.
    #[serde(default = "default_max_actors")]
    pub max_actors: usize,

    /// Upper bound on matrix columns.
    #[serde(default = "default_max_locations")]
    pub max_locations: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_actors: default_max_actors(),
            max_locations: default_max_locations(),
        }
    }
}

impl MatrixConfig {
    /// The configured seed, or a fresh one.
    ///
    /// Fresh seeds stay within `u32` so the logged value can be pasted back
    /// into `[matrix] seed` (TOML integers are signed 64-bit).
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| u64::from(rand::random::<u32>()))
    }
}

fn default_max_actors() -> usize {
    15
}

fn default_max_locations() -> usize {
    10
}

/// Attention heatmap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Keywords tracked month by month.
    #[serde(default = "default_heatmap_keywords")]
    pub keywords: Vec<String>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            keywords: default_heatmap_keywords(),
        }
    }
}

fn default_heatmap_keywords() -> Vec<String> {
    vec![
        "russie",
        "ukraine",
        "france",
        "afrique",
        "poutine",
        "macron",
        "guerre",
        "président",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_themes() -> IndexMap<String, Vec<String>> {
    let themes: [(&str, [&str; 6]); 6] = [
        (
            "Politique",
            ["président", "gouvernement", "ministre", "élection", "politique", "député"],
        ),
        (
            "Géopolitique",
            ["russie", "ukraine", "france", "guerre", "otan", "conflit"],
        ),
        (
            "Afrique",
            ["afrique", "mali", "burkina", "niger", "sahel", "africain"],
        ),
        (
            "Économie",
            ["économie", "budget", "finance", "banque", "euro", "commerce"],
        ),
        (
            "Diplomatie",
            ["diplomatie", "ambassade", "sommet", "rencontre", "accord", "traité"],
        ),
        (
            "Sécurité",
            ["militaire", "armée", "défense", "terrorisme", "sécurité", "police"],
        ),
    ];

    themes
        .into_iter()
        .map(|(theme, keywords)| {
            (
                theme.to_string(),
                keywords.into_iter().map(String::from).collect(),
            )
        })
        .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref path) = args.macron {
            self.data.macron_path = path.clone();
        }
        if let Some(ref path) = args.poutine {
            self.data.poutine_path = path.clone();
        }

        if let Some(ref corpus) = args.corpus {
            self.dashboard.corpus = corpus.clone();
        }
        if let Some(ref period) = args.period {
            self.dashboard.period = period.clone();
        }
        if let Some(ref category) = args.category {
            self.dashboard.category = category.clone();
        }
        if let Some(top_n) = args.top_n {
            self.dashboard.top_n = top_n;
        }

        if let Some(seed) = args.seed {
            self.matrix.seed = Some(seed);
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
