//! # Baseline: Tag Mais Frequente
//!
//! Cada palavra recebe a distribuição $P(tag \mid palavra)$ observada no treino.
//! Palavras nunca vistas usam a distribuição de tags da **primeira ocorrência**
//! de cada tipo de palavra: uma aproximação barata de "como se comportam as
//! palavras raras".
//!
//! Com `restrict_trigrams = true`, as tags cujo trigrama `(tag_{i-2}, tag_{i-1}, tag)`
//! nunca apareceu no treino são descartadas; se nenhuma sobrar, o filtro é
//! ignorado para nunca devolver zero candidatas.

use std::collections::HashSet;

use crate::counter::{Counter, CounterMap};
use crate::sentence::{LabeledLocalContext, LocalContext};
use crate::tags::TagId;

use super::LocalTrigramScorer;

/// Contagens lexicais brutas, compartilhadas pelos dois pontuadores.
#[derive(Debug, Clone, Default)]
pub(crate) struct Lexicon {
    /// `c(palavra, tag)`
    pub words_to_tags: CounterMap<String, TagId>,
    /// `c_unk(tag)`: tag da primeira ocorrência de cada tipo de palavra.
    pub unknown_word_tags: Counter<TagId>,
    /// Trigramas de tags atestados no treino.
    pub seen_trigrams: HashSet<(TagId, TagId, TagId)>,
    /// Número total de posições observadas (inclui as fronteiras).
    pub tokens: usize,
}

impl Lexicon {
    pub fn observe(&mut self, context: &LabeledLocalContext<'_>) {
        let word = context.current_word();
        let tag = context.current_tag;

        // Primeira ocorrência do tipo: contabiliza a tag como "palavra desconhecida".
        // As fronteiras ficam de fora para que uma palavra nova nunca vire </S>.
        if !self.words_to_tags.contains_key(word) && !tag.is_boundary() {
            self.unknown_word_tags.increment(tag, 1.0);
        }

        self.tokens += 1;
        self.words_to_tags.increment(word.to_string(), tag, 1.0);
        self.seen_trigrams.insert((
            context.previous_previous_tag(),
            context.previous_tag(),
            tag,
        ));
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.words_to_tags.contains_key(word)
    }

    /// Tags possíveis para a palavra: as vistas com ela, ou as de palavras desconhecidas.
    pub fn candidate_tags(&self, word: &str) -> Vec<TagId> {
        match self.words_to_tags.counter(word) {
            Some(tags) => tags.keys().copied().collect(),
            None => self.unknown_word_tags.keys().copied().collect(),
        }
    }

    /// Subconjunto de `tags` cujo trigrama com o histórico foi atestado.
    pub fn allowed_following_tags(
        &self,
        tags: &[TagId],
        previous_previous_tag: TagId,
        previous_tag: TagId,
    ) -> HashSet<TagId> {
        tags.iter()
            .copied()
            .filter(|&tag| {
                self.seen_trigrams
                    .contains(&(previous_previous_tag, previous_tag, tag))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MostFrequentTagScorer {
    restrict_trigrams: bool,
    lexicon: Lexicon,
    /// $P(tag \mid palavra)$
    tag_given_word: CounterMap<String, TagId>,
    /// $P(tag \mid desconhecida)$
    unknown_tag_distribution: Counter<TagId>,
}

impl MostFrequentTagScorer {
    pub fn new(restrict_trigrams: bool) -> Self {
        Self {
            restrict_trigrams,
            lexicon: Lexicon::default(),
            tag_given_word: CounterMap::new(),
            unknown_tag_distribution: Counter::new(),
        }
    }
}

impl LocalTrigramScorer for MostFrequentTagScorer {
    fn train(&mut self, contexts: &[LabeledLocalContext<'_>]) {
        self.lexicon = Lexicon::default();
        for context in contexts {
            self.lexicon.observe(context);
        }

        self.tag_given_word = self.lexicon.words_to_tags.clone();
        self.tag_given_word.conditional_normalize();
        self.unknown_tag_distribution = self.lexicon.unknown_word_tags.clone();
        self.unknown_tag_distribution.normalize();

        tracing::info!(
            word_types = self.tag_given_word.len(),
            tokens = self.lexicon.tokens,
            "most-frequent-tag scorer trained"
        );
    }

    fn log_scores(&self, context: &LocalContext<'_>) -> Counter<TagId> {
        let word = context.current_word();
        let distribution = self
            .tag_given_word
            .counter(word)
            .unwrap_or(&self.unknown_tag_distribution);

        let candidates: Vec<TagId> = distribution.keys().copied().collect();
        let allowed = self.lexicon.allowed_following_tags(
            &candidates,
            context.previous_previous_tag,
            context.previous_tag,
        );
        let filter = self.restrict_trigrams && !allowed.is_empty();

        distribution
            .iter()
            .filter(|(tag, _)| !filter || allowed.contains(*tag))
            .map(|(&tag, p)| (tag, p.ln()))
            .collect()
    }
}
