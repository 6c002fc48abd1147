//! Small in-memory corpora shared by the unit tests.

use crate::context::DashboardContext;
use crate::loader::parse_corpus;
use crate::models::{CorpusId, EntityCounts};
use std::path::Path;

pub const MACRON_JSON: &str = r#"{
  "metadata": {
    "all": {
      "kws": {"france": 40, "macron": 30, "président": 12, "russie": 10, "afrique": 8, "ukraine": 5},
      "loc": {"paris": 25, "france": 20, "mali": 6},
      "org": {"onu": 4},
      "per": {"macron": 60, "poutine": 20, "zelensky": 15}
    },
    "month": {
      "2024": {
        "11": {"kws": {"france": 5, "ukraine": 1}},
        "12": {"kws": {"france": 4}}
      },
      "2025": {
        "1": {"kws": {"france": 7, "russie": 2}}
      }
    }
  },
  "data": {
    "2024": {
      "11": {"01": {}, "05": {}, "20": {}},
      "12": {"03": {}}
    },
    "2025": {
      "01": {"02": {}, "09": {}}
    }
  }
}"#;

pub const POUTINE_JSON: &str = r#"{
  "metadata": {
    "all": {
      "kws": {"poutine": 50, "guerre": 9, "france": 7, "russie": 3},
      "loc": {"moscou": 30, "russie": 18, "ukraine": 11},
      "org": {"otan": 9, "onu": 2},
      "per": {"poutine": 80, "macron": 25, "lavrov": 12}
    },
    "month": {
      "2024": {
        "10": {"kws": {"russie": 1, "poutine": 4}}
      },
      "2025": {
        "3": {"kws": {"russie": 2}}
      }
    }
  },
  "data": {
    "2024": {
      "10": {"01": {}, "02": {}}
    },
    "2025": {
      "03": {"04": {}, "05": {}, "06": {}, "07": {}},
      "04": []
    }
  }
}"#;

/// Context built from the two sample corpora above.
pub fn sample_context() -> DashboardContext {
    let macron = parse_corpus(CorpusId::Macron, Path::new("macron.json"), MACRON_JSON)
        .expect("macron sample parses");
    let poutine = parse_corpus(CorpusId::Poutine, Path::new("poutine.json"), POUTINE_JSON)
        .expect("poutine sample parses");
    DashboardContext::new(macron, poutine)
}

/// Entity counts from `(entity, count)` pairs, keeping their order.
pub fn counts(pairs: &[(&str, u64)]) -> EntityCounts {
    pairs
        .iter()
        .map(|(entity, count)| (entity.to_string(), *count))
        .collect()
}
