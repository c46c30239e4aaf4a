//! # pos-core — Etiquetador Morfossintático (POS) com HMM de Trigramas
//!
//! Este crate implementa um etiquetador de classes gramaticais supervisionado:
//! dado um corpus de sentenças anotadas, aprende um modelo local de trigramas de
//! tags e etiqueta sentenças novas encontrando o melhor caminho numa treliça.
//!
//! ## Arquitetura
//!
//! 1.  **Contextos** ([`sentence`]): cada posição da sentença vira um contexto
//!     local `(palavras, posição, tag_{i-2}, tag_{i-1})`, com fronteiras `<S>`/`</S>`.
//! 2.  **Pontuação local** ([`scorer`]): um [`LocalTrigramScorer`] devolve
//!     log-probabilidades para as tags candidatas de cada contexto.
//!     *   **Baseline** ([`scorer::most_frequent`]): tag mais frequente da palavra.
//!     *   **HMM de trigramas** ([`scorer::trigram_hmm`]): transições interpoladas
//!         e emissões, com tratamento de palavras desconhecidas.
//! 3.  **Treliça** ([`trellis`], [`state`]): grafo dirigido de estados
//!     `(tag_{i-2}, tag_{i-1}, posição)` com arestas pontuadas.
//! 4.  **Decodificação** ([`decoder`]): guloso ou Viterbi sobre a treliça.
//! 5.  **Orquestração** ([`tagger`]): treino, etiquetagem e pontuação de
//!     etiquetagens arbitrárias.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pos_core::{PosTagger, TaggedSentence, TaggerConfig};
//!
//! let corpus = vec![
//!     TaggedSentence::from_pairs(&[("the", "DT"), ("dog", "NN"), ("runs", "VB")]),
//!     TaggedSentence::from_pairs(&[("a", "DT"), ("cat", "NN"), ("sleeps", "VB")]),
//! ];
//!
//! let mut tagger = PosTagger::from_config(&TaggerConfig::default());
//! tagger.train(&corpus);
//!
//! let words: Vec<String> = ["the", "cat", "runs"].iter().map(|w| w.to_string()).collect();
//! let tags = tagger.tag(&words).unwrap();
//! assert_eq!(tags, vec!["DT", "NN", "VB"]);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`tagger`]: Orquestrador que conecta pontuador e decodificador.
//! - [`config`]: Configuração serializável (JSON).
//! - [`evaluation`]: Acurácia sobre dados anotados.
//! - [`corpus`]: Corpus embutido para demonstração e testes.

pub mod config;
pub mod corpus;
pub mod counter;
pub mod decoder;
pub mod error;
pub mod evaluation;
pub mod scorer;
pub mod sentence;
pub mod state;
pub mod tagger;
pub mod tags;
pub mod trellis;

pub use config::TaggerConfig;
pub use decoder::{DecoderKind, GreedyDecoder, TrellisDecoder, ViterbiDecoder};
pub use error::{PosError, Result};
pub use evaluation::{evaluate, vocabulary, Evaluation};
pub use scorer::{LocalTrigramScorer, MostFrequentTagScorer, ScorerKind, TrigramHmmScorer};
pub use sentence::{LabeledLocalContext, LocalContext, TaggedSentence};
pub use state::State;
pub use tagger::PosTagger;
pub use tags::{TagId, TagSet};
pub use trellis::Trellis;
