//! # Estados de Markov de Segunda Ordem
//!
//! Um estado é a tupla `(tag_{i-2}, tag_{i-1}, i)`: as duas tags que precedem a
//! posição `i`. Como as tags são [`TagId`]s internados, um `State` é um valor
//! `Copy` com igualdade e hash estruturais em O(1); dois estados com os mesmos
//! campos são indistinguíveis, e a treliça nunca duplica nós.
//!
//! - Início: `(<S>, <S>, 0)`
//! - Fim de uma sentença de `n` palavras: `(</S>, </S>, n + 2)`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::{TagId, TagSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    previous_previous_tag: TagId,
    previous_tag: TagId,
    position: usize,
}

impl State {
    pub fn build(previous_previous_tag: TagId, previous_tag: TagId, position: usize) -> Self {
        Self {
            previous_previous_tag,
            previous_tag,
            position,
        }
    }

    pub fn start() -> Self {
        Self::build(TagId::START, TagId::START, 0)
    }

    /// Estado final de uma sentença com `sentence_length` palavras.
    pub fn stop(sentence_length: usize) -> Self {
        Self::build(TagId::STOP, TagId::STOP, sentence_length + 2)
    }

    pub fn previous_previous_tag(&self) -> TagId {
        self.previous_previous_tag
    }

    pub fn previous_tag(&self) -> TagId {
        self.previous_tag
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Sucessor após emitir `tag`: desloca o histórico e avança a posição.
    pub fn next(&self, tag: TagId) -> Self {
        Self::build(self.previous_tag, tag, self.position + 1)
    }

    /// Predecessor cujo `tag_{i-2}` era `tag`.
    ///
    /// Na posição 0 o resultado permanece na posição 0.
    pub fn previous(&self, tag: TagId) -> Self {
        Self::build(
            tag,
            self.previous_previous_tag,
            self.position.saturating_sub(1),
        )
    }

    /// Converte um caminho de estados na sequência de tags que ele percorre.
    ///
    /// O resultado tem `path.len() + 1` tags: a tag `i-2` do primeiro estado
    /// seguida da tag `i-1` de cada estado.
    pub fn to_tag_list(path: &[State]) -> Vec<TagId> {
        let mut tags = Vec::with_capacity(path.len() + 1);
        if let Some(first) = path.first() {
            tags.push(first.previous_previous_tag);
            tags.extend(path.iter().map(|s| s.previous_tag));
        }
        tags
    }

    /// Representação legível, com os rótulos do conjunto de tags.
    pub fn display<'a>(&self, tags: &'a TagSet) -> impl fmt::Display + 'a {
        let state = *self;
        DisplayState { state, tags }
    }
}

struct DisplayState<'a> {
    state: State,
    tags: &'a TagSet,
}

impl fmt::Display for DisplayState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.tags.label(self.state.previous_previous_tag),
            self.tags.label(self.state.previous_tag),
            self.state.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_stop() {
        assert_eq!(State::start(), State::build(TagId::START, TagId::START, 0));
        let stop = State::stop(3);
        assert_eq!(stop.position(), 5);
        assert_eq!(stop.previous_tag(), TagId::STOP);
        assert_eq!(stop.previous_previous_tag(), TagId::STOP);
    }

    #[test]
    fn test_equal_fields_are_the_same_state() {
        use std::collections::HashSet;
        let mut set = TagSet::new();
        let dt = set.intern("DT");
        let a = State::start().next(dt);
        let b = State::build(TagId::START, dt, 1);
        let states: HashSet<State> = [a, b].into_iter().collect();
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn test_next_then_previous_round_trip() {
        let mut set = TagSet::new();
        let dt = set.intern("DT");
        let nn = set.intern("NN");
        let vb = set.intern("VB");
        let original = State::build(dt, nn, 2);
        let back = original.next(vb).previous(dt);
        assert_eq!(back.previous_previous_tag(), original.previous_previous_tag());
        assert_eq!(back.position(), original.position());
        assert_eq!(back, original);
    }

    #[test]
    fn test_to_tag_list() {
        let mut set = TagSet::new();
        let dt = set.intern("DT");
        let nn = set.intern("NN");
        let path = vec![State::start(), State::start().next(dt), State::start().next(dt).next(nn)];
        assert_eq!(
            State::to_tag_list(&path),
            vec![TagId::START, TagId::START, dt, nn]
        );
        assert!(State::to_tag_list(&[]).is_empty());
    }

    #[test]
    fn test_display_uses_labels() {
        let mut set = TagSet::new();
        let dt = set.intern("DT");
        let state = State::build(TagId::START, dt, 1);
        assert_eq!(state.display(&set).to_string(), "[<S>, DT, 1]");
    }
}
