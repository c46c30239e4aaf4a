//! # Sentenças Etiquetadas e Contextos Locais
//!
//! Um [`TaggedSentence`] é o par paralelo `(palavras, tags)` do corpus.
//! Para treinar e pontuar, cada sentença é fatiada em **contextos locais**:
//! uma posição da sentença junto com as duas tags que a precedem.
//!
//! ```text
//! posição:   0    1    2     3     4
//! palavra:   the  dog  runs  </S>  </S>
//! tag:       DT   NN   VB    </S>  </S>
//! contexto 2 = (runs, prev_prev = DT, prev = NN) → VB
//! ```
//!
//! Uma sentença de `n` palavras gera `n + 2` contextos (posições `0..=n+1`);
//! os dois últimos têm a tag de fim como rótulo.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PosError, Result};
use crate::tags::{TagId, STOP_WORD};

/// Sentença com uma tag por palavra. Imutável após a construção.
///
/// A desserialização passa por [`TaggedSentence::new`], então um JSON com
/// listas de tamanhos diferentes é rejeitado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTaggedSentence")]
pub struct TaggedSentence {
    words: Vec<String>,
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct RawTaggedSentence {
    words: Vec<String>,
    tags: Vec<String>,
}

impl TryFrom<RawTaggedSentence> for TaggedSentence {
    type Error = PosError;

    fn try_from(raw: RawTaggedSentence) -> Result<Self> {
        Self::new(raw.words, raw.tags)
    }
}

impl TaggedSentence {
    /// Constrói a sentença, rejeitando listas de tamanhos diferentes.
    pub fn new(words: Vec<String>, tags: Vec<String>) -> Result<Self> {
        if words.len() != tags.len() {
            return Err(PosError::InputShapeMismatch {
                words: words.len(),
                tags: tags.len(),
            });
        }
        Ok(Self { words, tags })
    }

    /// Atalho para pares estáticos `(palavra, tag)`, como os do [`crate::corpus`].
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let (words, tags) = pairs
            .iter()
            .map(|(w, t)| (w.to_string(), t.to_string()))
            .unzip();
        Self { words, tags }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for TaggedSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (word, tag)) in self.words.iter().zip(&self.tags).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{word}_{tag}")?;
        }
        Ok(())
    }
}

/// Uma posição da sentença com o histórico de duas tags.
#[derive(Debug, Clone, Copy)]
pub struct LocalContext<'a> {
    pub words: &'a [String],
    pub position: usize,
    pub previous_previous_tag: TagId,
    pub previous_tag: TagId,
}

impl<'a> LocalContext<'a> {
    pub fn new(
        words: &'a [String],
        position: usize,
        previous_previous_tag: TagId,
        previous_tag: TagId,
    ) -> Self {
        Self {
            words,
            position,
            previous_previous_tag,
            previous_tag,
        }
    }

    /// Palavra na posição atual; além do fim da sentença lê-se `</S>`.
    pub fn current_word(&self) -> &'a str {
        self.words
            .get(self.position)
            .map(String::as_str)
            .unwrap_or(STOP_WORD)
    }
}

/// Contexto local acompanhado da tag correta (gold) da posição.
#[derive(Debug, Clone, Copy)]
pub struct LabeledLocalContext<'a> {
    pub context: LocalContext<'a>,
    pub current_tag: TagId,
}

impl<'a> LabeledLocalContext<'a> {
    pub fn current_word(&self) -> &'a str {
        self.context.current_word()
    }

    pub fn previous_tag(&self) -> TagId {
        self.context.previous_tag
    }

    pub fn previous_previous_tag(&self) -> TagId {
        self.context.previous_previous_tag
    }
}

/// Fatia uma sentença (palavras + tags internadas) em `n + 2` contextos rotulados.
///
/// Índices negativos de histórico leem `<S>`; tags além do fim leem `</S>`.
pub fn extract_labeled_contexts<'a>(
    words: &'a [String],
    tags: &[TagId],
) -> Vec<LabeledLocalContext<'a>> {
    debug_assert_eq!(words.len(), tags.len());
    let bounded = |i: isize| -> TagId {
        if i < 0 {
            TagId::START
        } else {
            tags.get(i as usize).copied().unwrap_or(TagId::STOP)
        }
    };

    (0..=tags.len() + 1)
        .map(|position| {
            let p = position as isize;
            LabeledLocalContext {
                context: LocalContext::new(words, position, bounded(p - 2), bounded(p - 1)),
                current_tag: bounded(p),
            }
        })
        .collect()
}
