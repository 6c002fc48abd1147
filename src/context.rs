//! Shared, read-only corpus state.

use crate::models::{Corpus, CorpusId, CorpusSelection};

/// Both corpora, loaded once at startup and handed to every aggregation call.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    macron: Corpus,
    poutine: Corpus,
}

impl DashboardContext {
    /// Build the context. Each corpus must carry its own id.
    pub fn new(macron: Corpus, poutine: Corpus) -> Self {
        debug_assert_eq!(macron.id, CorpusId::Macron);
        debug_assert_eq!(poutine.id, CorpusId::Poutine);
        Self { macron, poutine }
    }

    pub fn corpus(&self, id: CorpusId) -> &Corpus {
        match id {
            CorpusId::Macron => &self.macron,
            CorpusId::Poutine => &self.poutine,
        }
    }

    /// Corpora feeding `selection`, Macron first.
    pub fn corpora(&self, selection: CorpusSelection) -> impl Iterator<Item = &Corpus> + '_ {
        selection.members().iter().map(move |id| self.corpus(*id))
    }
}
