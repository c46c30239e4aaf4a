//! # Etiquetador POS: Orquestrador
//!
//! O [`PosTagger`] conecta as peças:
//!
//! 1. **Treino**: cada sentença etiquetada é fatiada em contextos locais
//!    rotulados (incluindo as posições de fronteira) e entregue ao pontuador.
//! 2. **Etiquetagem**: para uma sentença nova, a treliça é expandida posição a
//!    posição a partir do estado inicial. Cada estado da fronteira é pontuado,
//!    cada tag candidata cria um estado sucessor, e o decodificador escolhe o
//!    melhor caminho.
//! 3. **Pontuação**: `score_tagging` soma as log-probabilidades de uma
//!    etiquetagem específica; $-\infty$ indica uma sequência impossível.
//!
//! ```text
//! posição:    0          1          2          3           4
//!        (<S>,<S>,0) → (<S>,DT,1) → (DT,NN,2) → (NN,VB,3) → (VB,</S>,4) → (</S>,</S>,5)
//! ```

use std::collections::HashSet;

use rayon::prelude::*;

use crate::config::TaggerConfig;
use crate::decoder::{DecoderKind, TrellisDecoder};
use crate::error::Result;
use crate::scorer::LocalTrigramScorer;
use crate::sentence::{extract_labeled_contexts, LabeledLocalContext, LocalContext, TaggedSentence};
use crate::state::State;
use crate::tags::{TagId, TagSet};
use crate::trellis::Trellis;

/// Etiquetador de sentenças: pontuador local + decodificador de treliça.
pub struct PosTagger {
    scorer: Box<dyn LocalTrigramScorer>,
    decoder: DecoderKind,
    tags: TagSet,
}

impl PosTagger {
    pub fn new(scorer: Box<dyn LocalTrigramScorer>, decoder: DecoderKind) -> Self {
        Self {
            scorer,
            decoder,
            tags: TagSet::new(),
        }
    }

    /// Monta pontuador e decodificador a partir da configuração.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(config.scorer.build(config), config.decoder)
    }

    pub fn tag_set(&self) -> &TagSet {
        &self.tags
    }

    pub fn decoder(&self) -> DecoderKind {
        self.decoder
    }

    /// Treina do zero sobre as sentenças etiquetadas.
    pub fn train(&mut self, sentences: &[TaggedSentence]) {
        self.tags = TagSet::new();
        let tag_ids: Vec<Vec<TagId>> = sentences
            .iter()
            .map(|s| s.tags().iter().map(|t| self.tags.intern(t)).collect())
            .collect();

        let contexts: Vec<LabeledLocalContext<'_>> = sentences
            .iter()
            .zip(&tag_ids)
            .flat_map(|(sentence, ids)| extract_labeled_contexts(sentence.words(), ids))
            .collect();

        tracing::info!(
            sentences = sentences.len(),
            contexts = contexts.len(),
            tags = self.tags.len() - 2,
            "training tagger"
        );
        self.scorer.train(&contexts);
    }

    /// Repassa dados de validação ao pontuador.
    ///
    /// Sentenças com tags nunca vistas no treino são ignoradas.
    pub fn validate(&mut self, sentences: &[TaggedSentence]) {
        let known: Vec<(&TaggedSentence, Vec<TagId>)> = sentences
            .iter()
            .filter_map(|s| self.known_tag_ids(s.tags()).map(|ids| (s, ids)))
            .collect();
        if known.len() < sentences.len() {
            tracing::debug!(
                skipped = sentences.len() - known.len(),
                "validation sentences with unseen tags"
            );
        }

        let contexts: Vec<LabeledLocalContext<'_>> = known
            .iter()
            .flat_map(|(sentence, ids)| extract_labeled_contexts(sentence.words(), ids))
            .collect();
        self.scorer.validate(&contexts);
    }

    /// Expande a treliça da sentença a partir do estado inicial.
    ///
    /// A cada uma das `n + 2` posições, os estados da fronteira são pontuados e
    /// cada tag candidata vira uma aresta para `state.next(tag)`.
    pub fn build_trellis(&self, words: &[String]) -> Trellis<State> {
        let start = State::start();
        let stop = State::stop(words.len());
        let mut trellis = Trellis::new(start, stop);
        let mut frontier: HashSet<State> = HashSet::from([start]);

        for position in 0..=words.len() + 1 {
            let mut next_frontier = HashSet::new();
            for state in &frontier {
                if *state == stop {
                    continue;
                }
                let context = LocalContext::new(
                    words,
                    position,
                    state.previous_previous_tag(),
                    state.previous_tag(),
                );
                for (&tag, score) in self.scorer.log_scores(&context).iter() {
                    let next = state.next(tag);
                    trellis.set_transition(*state, next, score);
                    next_frontier.insert(next);
                }
            }
            frontier = next_frontier;
        }

        tracing::debug!(
            words = words.len(),
            states = trellis.num_states(),
            transitions = trellis.num_transitions(),
            "trellis built"
        );
        trellis
    }

    /// Etiqueta uma sentença, devolvendo uma tag por palavra.
    pub fn tag(&self, words: &[String]) -> Result<Vec<String>> {
        let trellis = self.build_trellis(words);
        let path = self.decoder.best_path(&trellis)?;
        let tags = State::to_tag_list(&path);

        // Remove <S> <S> do início e </S> </S> do fim
        let inner = tags.get(2..tags.len().saturating_sub(2)).unwrap_or(&[]);
        Ok(inner
            .iter()
            .map(|&tag| self.tags.label(tag).to_string())
            .collect())
    }

    /// Etiqueta várias sentenças em paralelo; cada uma tem sua própria treliça.
    pub fn tag_all(&self, sentences: &[Vec<String>]) -> Vec<Result<Vec<String>>> {
        sentences.par_iter().map(|words| self.tag(words)).collect()
    }

    /// Log-probabilidade da etiquetagem dada sob o modelo treinado.
    ///
    /// Devolve `f64::NEG_INFINITY` se alguma tag recebe probabilidade zero no
    /// seu contexto (ou nunca foi vista no treino).
    pub fn score_tagging(&self, sentence: &TaggedSentence) -> f64 {
        let Some(tag_ids) = self.known_tag_ids(sentence.tags()) else {
            return f64::NEG_INFINITY;
        };

        let mut log_score = 0.0;
        for labeled in extract_labeled_contexts(sentence.words(), &tag_ids) {
            let scores = self.scorer.log_scores(&labeled.context);
            log_score += scores
                .get(&labeled.current_tag)
                .unwrap_or(f64::NEG_INFINITY);
        }
        log_score
    }

    fn known_tag_ids(&self, tags: &[String]) -> Option<Vec<TagId>> {
        tags.iter().map(|t| self.tags.get(t)).collect()
    }
}
