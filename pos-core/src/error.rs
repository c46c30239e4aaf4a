//! # Erros do Etiquetador
//!
//! Taxonomia de falhas do núcleo algorítmico:
//!
//! | Variante             | Quando ocorre                                              |
//! |----------------------|------------------------------------------------------------|
//! | `ModelGap`           | Um estado alcançado não oferece nenhuma continuação legal  |
//! | `UnreachableEnd`     | O estado final da treliça nunca recebeu pontuação          |
//! | `InputShapeMismatch` | Listas de palavras e tags com tamanhos diferentes          |
//! | `InvalidConfig`      | Pesos de interpolação fora do intervalo permitido          |
//!
//! Uma sequência impossível sob o modelo **não** é erro: `score_tagging`
//! simplesmente devolve `f64::NEG_INFINITY`.

use thiserror::Error;

/// Erros produzidos pelo treinamento, decodificação e configuração.
#[derive(Debug, Error)]
pub enum PosError {
    /// O decodificador chegou a um estado sem sucessores antes do estado final.
    #[error("no legal continuation from state {state}")]
    ModelGap { state: String },
    /// Nenhum caminho ligou o estado inicial ao estado final.
    #[error("end state {end} is unreachable from the start state")]
    UnreachableEnd { end: String },
    /// `TaggedSentence` construída com listas paralelas de tamanhos distintos.
    #[error("sentence has {words} words but {tags} tags")]
    InputShapeMismatch { words: usize, tags: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PosError>;
