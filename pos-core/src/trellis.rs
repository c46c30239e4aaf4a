//! # Treliça Genérica
//!
//! Grafo dirigido ponderado com um estado inicial e um estado final, sobre
//! qualquer tipo de estado `S: Eq + Hash + Clone`.
//!
//! Cada aresta é guardada nos dois sentidos: `forward[a][b]` e `backward[b][a]`
//! recebem o mesmo log-peso em [`Trellis::set_transition`].
//!
//! ## Arestas ausentes
//!
//! Um par `(a, b)` que não está no mapa é **ilegal**, com log-peso $-\infty$,
//! nunca 0. Por isso [`Trellis::transition`] e [`Transitions::get`] devolvem
//! `Option<f64>`: cabe ao decodificador tratar `None` como impossível.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Trellis<S> {
    start: S,
    end: S,
    forward: HashMap<S, HashMap<S, f64>>,
    backward: HashMap<S, HashMap<S, f64>>,
}

impl<S: Eq + Hash + Clone> Trellis<S> {
    pub fn new(start: S, end: S) -> Self {
        Self {
            start,
            end,
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn end(&self) -> &S {
        &self.end
    }

    pub fn set_start(&mut self, start: S) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: S) {
        self.end = end;
    }

    /// Insere (ou sobrescreve) a aresta `from → to` nos dois sentidos.
    pub fn set_transition(&mut self, from: S, to: S, log_weight: f64) {
        self.backward
            .entry(to.clone())
            .or_default()
            .insert(from.clone(), log_weight);
        self.forward.entry(from).or_default().insert(to, log_weight);
    }

    /// Log-peso da aresta `from → to`, ou `None` se ela não existe.
    pub fn transition(&self, from: &S, to: &S) -> Option<f64> {
        self.forward.get(from)?.get(to).copied()
    }

    /// Sucessores de `state` com seus log-pesos (vazio se o estado é desconhecido).
    pub fn forward_transitions(&self, state: &S) -> Transitions<'_, S> {
        Transitions {
            edges: self.forward.get(state),
        }
    }

    /// Predecessores de `state` com seus log-pesos.
    pub fn backward_transitions(&self, state: &S) -> Transitions<'_, S> {
        Transitions {
            edges: self.backward.get(state),
        }
    }

    /// Número de estados distintos que aparecem em alguma aresta (ou como início/fim).
    pub fn num_states(&self) -> usize {
        let mut count = self.forward.len();
        count += self
            .backward
            .keys()
            .filter(|s| !self.forward.contains_key(*s))
            .count();
        let isolated = |s: &S| !self.forward.contains_key(s) && !self.backward.contains_key(s);
        if isolated(&self.start) {
            count += 1;
        }
        if self.end != self.start && isolated(&self.end) {
            count += 1;
        }
        count
    }

    /// Número total de arestas.
    pub fn num_transitions(&self) -> usize {
        self.forward.values().map(HashMap::len).sum()
    }
}

/// Vista somente-leitura das arestas de um estado.
#[derive(Debug, Clone, Copy)]
pub struct Transitions<'a, S> {
    edges: Option<&'a HashMap<S, f64>>,
}

impl<'a, S: Eq + Hash> Transitions<'a, S> {
    /// Log-peso da aresta até `state`; `None` significa aresta ilegal.
    pub fn get(&self, state: &S) -> Option<f64> {
        self.edges?.get(state).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a S, f64)> + 'a {
        self.edges
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(s, &w)| (s, w)))
    }

    pub fn len(&self) -> usize {
        self.edges.map(HashMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aresta de maior log-peso. Em empate vence a primeira encontrada.
    pub fn argmax(&self) -> Option<(&'a S, f64)> {
        let mut best: Option<(&'a S, f64)> = None;
        for (state, weight) in self.iter() {
            match best {
                Some((_, best_weight)) if weight <= best_weight => {}
                _ => best = Some((state, weight)),
            }
        }
        best
    }
}
