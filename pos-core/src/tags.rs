//! # Conjunto de Tags e Símbolos de Fronteira
//!
//! As tags morfossintáticas (DT, NN, VB, ...) são strings opacas vindas do corpus.
//! Internamente cada tag é **internada** em um [`TagId`], um inteiro pequeno
//! que pode ser copiado, comparado e usado como chave de hash em O(1).
//!
//! ## Fronteiras
//!
//! Toda sentença é delimitada por dois símbolos reservados, tanto nas tags
//! quanto nas palavras, para que o contexto de trigramas esteja sempre definido:
//!
//! ```text
//! <S> <S> the dog runs </S> </S>
//! <S> <S> DT  NN  VB   </S> </S>
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Palavra lida em qualquer posição após o fim da sentença.
pub const STOP_WORD: &str = "</S>";
/// Rótulo da tag de início.
pub const START_TAG: &str = "<S>";
/// Rótulo da tag de fim.
pub const STOP_TAG: &str = "</S>";

/// Identificador internado de uma tag.
///
/// Os dois primeiros índices são sempre as fronteiras [`TagId::START`] e
/// [`TagId::STOP`]; as tags do corpus recebem índices a partir de 2, na ordem
/// em que aparecem no treinamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(u32);

impl TagId {
    pub const START: TagId = TagId(0);
    pub const STOP: TagId = TagId(1);

    /// Índice numérico da tag (para tabelas e depuração).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `true` para as tags reservadas `<S>` e `</S>`.
    pub fn is_boundary(self) -> bool {
        self == TagId::START || self == TagId::STOP
    }
}

/// Tabela de internação de tags, pertencente a um único etiquetador.
///
/// Substitui um cache global: cada [`PosTagger`](crate::tagger::PosTagger)
/// possui o seu e o reconstrói a cada chamada de `train`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSet {
    labels: Vec<String>,
    index: HashMap<String, TagId>,
}

impl TagSet {
    /// Cria o conjunto contendo apenas as duas tags de fronteira.
    pub fn new() -> Self {
        let mut set = Self {
            labels: Vec::new(),
            index: HashMap::new(),
        };
        set.intern(START_TAG);
        set.intern(STOP_TAG);
        set
    }

    /// Devolve o identificador canônico da tag, criando-o se necessário.
    pub fn intern(&mut self, label: &str) -> TagId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = TagId(self.labels.len() as u32);
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Procura uma tag já conhecida.
    pub fn get(&self, label: &str) -> Option<TagId> {
        self.index.get(label).copied()
    }

    /// Rótulo textual de um identificador (ex: `TagId(2)` → "DT").
    ///
    /// # Panics
    /// Se o identificador não pertencer a este conjunto.
    pub fn label(&self, id: TagId) -> &str {
        &self.labels[id.index()]
    }

    /// Número de tags, incluindo as duas fronteiras.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` quando há ao menos uma tag além das fronteiras.
    pub fn has_corpus_tags(&self) -> bool {
        self.labels.len() > 2
    }

    /// Itera sobre as tags do corpus (sem as fronteiras), em ordem de índice.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .skip(2)
            .map(|(i, label)| (TagId(i as u32), label.as_str()))
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new()
    }
}
