//! # Pontuadores Locais de Trigramas
//!
//! Um [`LocalTrigramScorer`] é treinado com contextos rotulados e, dado um
//! contexto não rotulado `(palavra, tag_{i-2}, tag_{i-1})`, devolve um
//! [`Counter`] de **log-probabilidades** sobre as tags candidatas.
//!
//! Exponenciando e somando os valores devolvidos obtém-se no máximo 1. Por
//! eficiência, o contador pode conter apenas as tags com probabilidade não nula
//! naquele contexto.
//!
//! | Pontuador                                        | Ideia                                   |
//! |--------------------------------------------------|-----------------------------------------|
//! | [`MostFrequentTagScorer`]                        | $P(tag \mid palavra)$, sem histórico    |
//! | [`TrigramHmmScorer`]                             | Transição interpolada × emissão         |

pub mod most_frequent;
pub mod trigram_hmm;

use serde::{Deserialize, Serialize};

use crate::config::TaggerConfig;
use crate::counter::Counter;
use crate::sentence::{LabeledLocalContext, LocalContext};
use crate::tags::TagId;

pub use most_frequent::MostFrequentTagScorer;
pub use trigram_hmm::TrigramHmmScorer;

/// Atribui log-probabilidades às tags possíveis em um contexto local.
///
/// `Send + Sync` porque o modelo treinado é compartilhado entre threads
/// durante a etiquetagem em lote.
pub trait LocalTrigramScorer: Send + Sync {
    /// Treina do zero; qualquer estado de um treino anterior é descartado.
    fn train(&mut self, contexts: &[LabeledLocalContext<'_>]);

    /// Ajuste opcional de hiperparâmetros em dados de validação.
    fn validate(&mut self, _contexts: &[LabeledLocalContext<'_>]) {}

    /// Log-probabilidade de cada tag candidata no contexto.
    fn log_scores(&self, context: &LocalContext<'_>) -> Counter<TagId>;
}

/// Seleção do pontuador em tempo de configuração.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Baseline: tag mais frequente de cada palavra.
    MostFrequentTag,
    /// HMM de trigramas com interpolação.
    TrigramHmm,
}

impl Default for ScorerKind {
    fn default() -> Self {
        ScorerKind::TrigramHmm
    }
}

impl ScorerKind {
    /// Instancia um pontuador (ainda não treinado) com os parâmetros da configuração.
    pub fn build(&self, config: &TaggerConfig) -> Box<dyn LocalTrigramScorer> {
        match self {
            ScorerKind::MostFrequentTag => {
                Box::new(MostFrequentTagScorer::new(config.restrict_trigrams))
            }
            ScorerKind::TrigramHmm => Box::new(TrigramHmmScorer::new(
                config.restrict_trigrams,
                config.lambda1,
                config.lambda2,
                config.deleted_interpolation,
            )),
        }
    }
}
