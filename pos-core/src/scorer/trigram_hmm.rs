//! # HMM de Trigramas com Interpolação Deletada
//!
//! Modelo **generativo** de segunda ordem:
//!
//! - **Transição**: $P(t_i \mid t_{i-2}, t_{i-1})$, suavizada por interpolação
//!   linear com os modelos de bigrama e unigrama:
//!   $$ \hat P = \lambda_1 P(t_i \mid t_{i-2}, t_{i-1}) + \lambda_2 P(t_i \mid t_{i-1}) + \lambda_3 P(t_i) $$
//! - **Emissão**: $P(w_i \mid t_i)$ para palavras conhecidas. Para palavras
//!   desconhecidas usa-se a taxa de "primeira ocorrência" da tag,
//!   $c_{unk}(t) / (N \cdot P(t))$.
//!
//! O score de uma tag é $\log \hat P + \log P(w \mid t)$: produto de
//! probabilidades somado em log-space para evitar underflow.
//!
//! ## Interpolação deletada
//!
//! Os pesos $\lambda$ são estimados sem conjunto de validação: para cada
//! trigrama atestado calculam-se as três estimativas *leave-one-out*
//!
//! ```text
//! A = (c(t1,t2,t3) - 1) / (c(t1,t2,·) - 1)
//! B = (c(t2,t3) - 1)    / (c(t2,·) - 1)
//! C = (c(t3) - 1)       / (N - 1)
//! ```
//!
//! e a contagem do trigrama é creditada ao estimador **estritamente** maior.
//! Qualquer empate (inclusive três zeros) credita o unigrama. Os três totais,
//! normalizados, são $\lambda_1, \lambda_2, \lambda_3$.

use crate::counter::{Counter, CounterMap};
use crate::sentence::{LabeledLocalContext, LocalContext};
use crate::tags::TagId;

use super::most_frequent::Lexicon;
use super::LocalTrigramScorer;

#[derive(Debug, Clone)]
pub struct TrigramHmmScorer {
    restrict_trigrams: bool,
    /// Pesos iniciais, restaurados a cada treino.
    seed_lambdas: (f64, f64),
    /// $(\lambda_1, \lambda_2)$ em uso; $\lambda_3 = 1 - \lambda_1 - \lambda_2$.
    lambdas: (f64, f64),
    deleted_interpolation: bool,
    lexicon: Lexicon,
    /// $P(t)$
    unigram: Counter<TagId>,
    /// $P(t_i \mid t_{i-1})$
    bigram: CounterMap<TagId, TagId>,
    /// $P(t_i \mid t_{i-2}, t_{i-1})$
    trigram: CounterMap<(TagId, TagId), TagId>,
    /// $P(w \mid t)$
    emission: CounterMap<TagId, String>,
}

impl TrigramHmmScorer {
    pub fn new(
        restrict_trigrams: bool,
        lambda1: f64,
        lambda2: f64,
        deleted_interpolation: bool,
    ) -> Self {
        Self {
            restrict_trigrams,
            seed_lambdas: (lambda1, lambda2),
            lambdas: (lambda1, lambda2),
            deleted_interpolation,
            lexicon: Lexicon::default(),
            unigram: Counter::new(),
            bigram: CounterMap::new(),
            trigram: CounterMap::new(),
            emission: CounterMap::new(),
        }
    }

    /// Pesos de interpolação $(\lambda_1, \lambda_2, \lambda_3)$ em uso.
    pub fn lambdas(&self) -> (f64, f64, f64) {
        let (l1, l2) = self.lambdas;
        (l1, l2, 1.0 - l1 - l2)
    }

    /// Estima $(\lambda_1, \lambda_2)$ sobre as contagens **brutas**.
    ///
    /// Devolve `None` se nenhum trigrama foi creditado (corpus vazio).
    fn estimate_lambdas(&self) -> Option<(f64, f64)> {
        let n = self.unigram.total();
        let (mut trigram_credit, mut bigram_credit, mut unigram_credit) = (0.0, 0.0, 0.0);

        for (&(t1, t2), continuations) in self.trigram.iter() {
            let history = continuations.total();
            for (&t3, count) in continuations.iter() {
                let a = leave_one_out(count, history);
                let b = leave_one_out(self.bigram.count(&t2, &t3), self.bigram.row_total(&t2));
                let c = leave_one_out(self.unigram.count(&t3), n);

                if a > b && a > c {
                    trigram_credit += count;
                } else if b > a && b > c {
                    bigram_credit += count;
                } else {
                    unigram_credit += count;
                }
                tracing::trace!(?t1, ?t2, ?t3, a, b, c, "deleted interpolation");
            }
        }

        let total = trigram_credit + bigram_credit + unigram_credit;
        if total == 0.0 {
            return None;
        }
        Some((trigram_credit / total, bigram_credit / total))
    }

    fn interpolated_transition(&self, previous_previous: TagId, previous: TagId, tag: TagId) -> f64 {
        let (l1, l2, l3) = self.lambdas();
        let p = l1 * self.trigram.count(&(previous_previous, previous), &tag)
            + l2 * self.bigram.count(&previous, &tag)
            + l3 * self.unigram.count(&tag);
        p.ln()
    }

    fn unknown_emission(&self, tag: TagId) -> f64 {
        let n = self.lexicon.tokens as f64;
        (self.lexicon.unknown_word_tags.count(&tag) / (n * self.unigram.count(&tag))).ln()
    }
}

/// $(c - 1) / (d - 1)$ com $0/0$ (e denominadores não positivos) valendo 0.
fn leave_one_out(count: f64, total: f64) -> f64 {
    let denominator = total - 1.0;
    if denominator <= 0.0 {
        0.0
    } else {
        (count - 1.0) / denominator
    }
}

impl LocalTrigramScorer for TrigramHmmScorer {
    fn train(&mut self, contexts: &[LabeledLocalContext<'_>]) {
        self.lexicon = Lexicon::default();
        self.unigram = Counter::new();
        self.bigram = CounterMap::new();
        self.trigram = CounterMap::new();
        self.emission = CounterMap::new();
        self.lambdas = self.seed_lambdas;

        // 1. Contagem das frequências brutas
        for context in contexts {
            let tag = context.current_tag;
            let previous = context.previous_tag();
            let previous_previous = context.previous_previous_tag();

            self.lexicon.observe(context);
            self.emission
                .increment(tag, context.current_word().to_string(), 1.0);
            self.trigram
                .increment((previous_previous, previous), tag, 1.0);
            self.bigram.increment(previous, tag, 1.0);
            self.unigram.increment(tag, 1.0);
        }

        // 2. Interpolação deletada (precisa das contagens antes da normalização)
        if self.deleted_interpolation {
            if let Some(lambdas) = self.estimate_lambdas() {
                self.lambdas = lambdas;
            }
        }

        // 3. Normalização: condicionais por histórico, unigrama incondicional
        self.emission.conditional_normalize();
        self.trigram.conditional_normalize();
        self.bigram.conditional_normalize();
        self.unigram.normalize();

        let (l1, l2, l3) = self.lambdas();
        tracing::info!(
            tokens = self.lexicon.tokens,
            word_types = self.lexicon.words_to_tags.len(),
            tags = self.unigram.len(),
            trigrams = self.lexicon.seen_trigrams.len(),
            "trigram HMM trained"
        );
        tracing::debug!(lambda1 = l1, lambda2 = l2, lambda3 = l3, "interpolation weights");
    }

    fn log_scores(&self, context: &LocalContext<'_>) -> Counter<TagId> {
        let word = context.current_word();
        let known = self.lexicon.is_known(word);
        let candidates = self.lexicon.candidate_tags(word);
        let allowed = self.lexicon.allowed_following_tags(
            &candidates,
            context.previous_previous_tag,
            context.previous_tag,
        );
        let filter = self.restrict_trigrams && !allowed.is_empty();

        let mut scores = Counter::new();
        for tag in candidates {
            // Trigrama nunca visto: modelado como impossível, mas ainda pontuado
            if filter && !allowed.contains(&tag) {
                scores.set(tag, f64::NEG_INFINITY);
                continue;
            }
            let transition =
                self.interpolated_transition(context.previous_previous_tag, context.previous_tag, tag);
            let emission = if known {
                self.emission.count(&tag, word).ln()
            } else {
                self.unknown_emission(tag)
            };
            scores.set(tag, transition + emission);
        }
        scores
    }
}
