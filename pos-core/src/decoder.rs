//! # Decodificadores de Treliça: Guloso e Viterbi
//!
//! Um [`TrellisDecoder`] recebe uma [`Trellis`] e devolve um caminho que começa
//! no estado inicial, termina no estado final e só usa arestas existentes.
//!
//! ## Guloso
//!
//! A cada passo segue a aresta de maior peso. Custa `O(tamanho do caminho)`,
//! mas não é ótimo: serve apenas de baseline.
//!
//! ## Viterbi
//!
//! Programação dinâmica indexada por número de saltos `t` a partir do início:
//!
//! ```text
//! Inicialização: viterbi[0][início] = 0
//!
//! Recursão:      viterbi[t][s] = max_{p ∈ viterbi[t-1]} viterbi[t-1][p] + w(p → s)
//!
//! Backtracking:  segue backptr[t][s] do estado final até o início
//! ```
//!
//! Uma aresta ausente tem peso $-\infty$ e portanto nunca é escolhida.
//! A validade exige uma treliça acíclica; a construída pelo [`crate::tagger`]
//! é ordenada por posição estritamente crescente.
//!
//! **Empates**: quando dois predecessores têm exatamente o mesmo score, vence o
//! primeiro encontrado na iteração (ordem não especificada).

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{PosError, Result};
use crate::trellis::Trellis;

/// Estratégia que escolhe um caminho do início ao fim de uma treliça.
pub trait TrellisDecoder<S> {
    fn best_path(&self, trellis: &Trellis<S>) -> Result<Vec<S>>;
}

/// Seleção do decodificador em tempo de configuração.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderKind {
    /// Segue sempre a melhor aresta local.
    Greedy,
    /// Caminho de log-probabilidade máxima (exato).
    Viterbi,
}

impl Default for DecoderKind {
    fn default() -> Self {
        DecoderKind::Viterbi
    }
}

impl<S: Eq + Hash + Clone + Debug> TrellisDecoder<S> for DecoderKind {
    fn best_path(&self, trellis: &Trellis<S>) -> Result<Vec<S>> {
        match self {
            DecoderKind::Greedy => GreedyDecoder.best_path(trellis),
            DecoderKind::Viterbi => ViterbiDecoder.best_path(trellis),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyDecoder;

impl<S: Eq + Hash + Clone + Debug> TrellisDecoder<S> for GreedyDecoder {
    fn best_path(&self, trellis: &Trellis<S>) -> Result<Vec<S>> {
        let max_states = trellis.num_states();
        let mut current = trellis.start().clone();
        let mut path = vec![current.clone()];

        while &current != trellis.end() {
            // Um caminho simples não visita mais estados do que a treliça possui
            if path.len() >= max_states {
                return Err(unreachable_end(trellis));
            }
            let (next, _) = trellis
                .forward_transitions(&current)
                .argmax()
                .ok_or_else(|| PosError::ModelGap {
                    state: format!("{current:?}"),
                })?;
            current = next.clone();
            path.push(current.clone());
        }

        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViterbiDecoder;

impl<S: Eq + Hash + Clone + Debug> TrellisDecoder<S> for ViterbiDecoder {
    fn best_path(&self, trellis: &Trellis<S>) -> Result<Vec<S>> {
        let start = trellis.start();
        let end = trellis.end();
        if start == end {
            return Ok(vec![start.clone()]);
        }

        let max_hops = trellis.num_states();

        // viterbi[t][s] = melhor log-peso de um caminho com t saltos terminando em s
        let mut viterbi: Vec<HashMap<S, f64>> = vec![HashMap::from([(start.clone(), 0.0)])];
        // backptr[t][s] = predecessor (no salto t-1) que maximiza viterbi[t][s]
        let mut backptr: Vec<HashMap<S, S>> = vec![HashMap::new()];
        // (salto, score) do melhor caminho que chega ao estado final
        let mut best_end: Option<(usize, f64)> = None;

        // === Recursão ===
        for t in 1..=max_hops {
            let previous = &viterbi[t - 1];

            // Estados alcançáveis neste salto: sucessores do salto anterior.
            // O estado final não é expandido.
            let mut seen = HashSet::new();
            let mut candidates = Vec::new();
            for state in previous.keys().filter(|s| *s != end) {
                for (next, _) in trellis.forward_transitions(state).iter() {
                    if seen.insert(next) {
                        candidates.push(next);
                    }
                }
            }
            if candidates.is_empty() {
                break;
            }

            let mut scores = HashMap::with_capacity(candidates.len());
            let mut pointers = HashMap::with_capacity(candidates.len());
            for state in candidates {
                let mut best: Option<(&S, f64)> = None;
                for (prev, weight) in trellis.backward_transitions(state).iter() {
                    if prev == end {
                        continue;
                    }
                    let Some(&prev_score) = previous.get(prev) else {
                        continue;
                    };
                    let score = prev_score + weight;
                    match best {
                        Some((_, best_score)) if score <= best_score => {}
                        _ => best = Some((prev, score)),
                    }
                }
                if let Some((prev, score)) = best {
                    scores.insert(state.clone(), score);
                    pointers.insert(state.clone(), prev.clone());
                }
            }

            // === Terminação: o fim pode ser alcançado em mais de uma profundidade ===
            if let Some(&score) = scores.get(end) {
                if best_end.map_or(true, |(_, best_score)| score > best_score) {
                    best_end = Some((t, score));
                }
            }

            viterbi.push(scores);
            backptr.push(pointers);
        }

        let (hops, _) = best_end.ok_or_else(|| unreachable_end(trellis))?;

        // === Backtracking ===
        let mut path = Vec::with_capacity(hops + 1);
        let mut current = end.clone();
        for t in (1..=hops).rev() {
            let prev = backptr[t]
                .get(&current)
                .cloned()
                .ok_or_else(|| unreachable_end(trellis))?;
            path.push(current);
            current = prev;
        }
        path.push(current);
        path.reverse();

        Ok(path)
    }
}

/// Soma dos log-pesos das arestas de um caminho; `None` se alguma aresta não existe.
pub fn path_weight<S: Eq + Hash + Clone>(trellis: &Trellis<S>, path: &[S]) -> Option<f64> {
    path.windows(2)
        .map(|pair| trellis.transition(&pair[0], &pair[1]))
        .sum()
}

fn unreachable_end<S: Eq + Hash + Clone + Debug>(trellis: &Trellis<S>) -> PosError {
    PosError::UnreachableEnd {
        end: format!("{:?}", trellis.end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treliça em que a melhor aresta local leva a um caminho pior:
    ///
    /// ```text
    /// s ─(-0.1)→ a ─(-10)→ e
    /// s ─(-1.0)→ b ─(-0.5)→ e
    /// ```
    fn greedy_trap() -> Trellis<&'static str> {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", -0.1);
        trellis.set_transition("a", "e", -10.0);
        trellis.set_transition("s", "b", -1.0);
        trellis.set_transition("b", "e", -0.5);
        trellis
    }

    #[test]
    fn test_greedy_follows_local_best() {
        let path = GreedyDecoder.best_path(&greedy_trap()).unwrap();
        assert_eq!(path, vec!["s", "a", "e"]);
    }

    #[test]
    fn test_viterbi_beats_greedy() {
        let trellis = greedy_trap();
        let viterbi = ViterbiDecoder.best_path(&trellis).unwrap();
        let greedy = GreedyDecoder.best_path(&trellis).unwrap();
        assert_eq!(viterbi, vec!["s", "b", "e"]);

        let v = path_weight(&trellis, &viterbi).unwrap();
        let g = path_weight(&trellis, &greedy).unwrap();
        assert!((v - -1.5).abs() < 1e-12);
        assert!(v > g);
    }

    #[test]
    fn test_decoder_kind_dispatch() {
        let trellis = greedy_trap();
        assert_eq!(DecoderKind::Greedy.best_path(&trellis).unwrap(), vec!["s", "a", "e"]);
        assert_eq!(DecoderKind::Viterbi.best_path(&trellis).unwrap(), vec!["s", "b", "e"]);
        assert_eq!(DecoderKind::default(), DecoderKind::Viterbi);
    }

    #[test]
    fn test_viterbi_unreachable_end() {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", -1.0);
        trellis.set_transition("a", "b", -1.0);
        let err = ViterbiDecoder.best_path(&trellis).unwrap_err();
        assert!(matches!(err, PosError::UnreachableEnd { .. }));
    }

    #[test]
    fn test_greedy_model_gap() {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", -1.0);
        trellis.set_transition("s", "b", -2.0);
        trellis.set_transition("b", "e", -1.0);
        let err = GreedyDecoder.best_path(&trellis).unwrap_err();
        match err {
            PosError::ModelGap { state } => assert_eq!(state, "\"a\""),
            other => panic!("erro inesperado: {other:?}"),
        }
        // Viterbi contorna o beco sem saída
        assert_eq!(ViterbiDecoder.best_path(&trellis).unwrap(), vec!["s", "b", "e"]);
    }

    #[test]
    fn test_greedy_cycle_fails_fast() {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", -1.0);
        trellis.set_transition("a", "b", -0.1);
        trellis.set_transition("b", "a", -0.1);
        trellis.set_transition("a", "e", -9.0);
        let err = GreedyDecoder.best_path(&trellis).unwrap_err();
        assert!(matches!(err, PosError::UnreachableEnd { .. }));
    }

    #[test]
    fn test_viterbi_end_at_several_depths() {
        // O fim é alcançado com 1 salto (peso -5) e com 2 saltos (peso -1)
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "e", -5.0);
        trellis.set_transition("s", "a", -0.5);
        trellis.set_transition("a", "e", -0.5);
        assert_eq!(ViterbiDecoder.best_path(&trellis).unwrap(), vec!["s", "a", "e"]);
    }

    #[test]
    fn test_viterbi_neg_infinity_edges_still_yield_a_path() {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", f64::NEG_INFINITY);
        trellis.set_transition("a", "e", -1.0);
        let path = ViterbiDecoder.best_path(&trellis).unwrap();
        assert_eq!(path, vec!["s", "a", "e"]);
        assert_eq!(path_weight(&trellis, &path), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_equal_scores_do_not_crash() {
        let mut trellis = Trellis::new("s", "e");
        trellis.set_transition("s", "a", -1.0);
        trellis.set_transition("s", "b", -1.0);
        trellis.set_transition("a", "e", -1.0);
        trellis.set_transition("b", "e", -1.0);
        let path = ViterbiDecoder.best_path(&trellis).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path_weight(&trellis, &path), Some(-2.0));
    }

    #[test]
    fn test_trivial_trellis() {
        let trellis: Trellis<u8> = Trellis::new(0, 0);
        assert_eq!(ViterbiDecoder.best_path(&trellis).unwrap(), vec![0]);
        assert_eq!(GreedyDecoder.best_path(&trellis).unwrap(), vec![0]);
    }

    #[test]
    fn test_path_weight_rejects_missing_edge() {
        let trellis = greedy_trap();
        assert_eq!(path_weight(&trellis, &["s", "e"]), None);
    }
}
