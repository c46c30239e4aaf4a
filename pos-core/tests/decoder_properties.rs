use std::collections::HashMap;

use proptest::prelude::*;

use pos_core::decoder::path_weight;
use pos_core::{
    DecoderKind, GreedyDecoder, PosError, PosTagger, ScorerKind, TaggedSentence, TaggerConfig,
    Trellis, TrellisDecoder, ViterbiDecoder,
};

/// Treliça em camadas: camada 0 = início, última = fim; arestas só entre camadas vizinhas.
#[derive(Debug, Clone)]
struct Layered {
    widths: Vec<usize>,
    edges: Vec<Vec<Option<f64>>>,
}

impl Layered {
    fn ids(&self) -> Vec<Vec<usize>> {
        let mut next = 0;
        self.widths
            .iter()
            .map(|&w| {
                let layer = (next..next + w).collect();
                next += w;
                layer
            })
            .collect()
    }

    fn trellis(&self) -> Trellis<usize> {
        let ids = self.ids();
        let end = *ids.last().and_then(|l| l.first()).unwrap();
        let mut trellis = Trellis::new(0, end);
        for (layer, weights) in self.edges.iter().enumerate() {
            let to_width = ids[layer + 1].len();
            for (i, weight) in weights.iter().enumerate() {
                if let Some(w) = weight {
                    trellis.set_transition(ids[layer][i / to_width], ids[layer + 1][i % to_width], *w);
                }
            }
        }
        trellis
    }
}

fn layered() -> impl Strategy<Value = Layered> {
    prop::collection::vec(1usize..=3, 0..=4).prop_flat_map(|inner| {
        let mut widths = vec![1];
        widths.extend(inner);
        widths.push(1);
        let edges: Vec<_> = widths
            .windows(2)
            .map(|pair| {
                prop::collection::vec(prop::option::weighted(0.7, -10.0f64..0.0), pair[0] * pair[1])
            })
            .collect();
        (Just(widths), edges).prop_map(|(widths, edges)| Layered { widths, edges })
    })
}

/// Maior peso de caminho início → fim por enumeração exaustiva.
fn brute_force_best(trellis: &Trellis<usize>, state: usize, memo: &mut HashMap<usize, Option<f64>>) -> Option<f64> {
    if state == *trellis.end() {
        return Some(0.0);
    }
    if let Some(&cached) = memo.get(&state) {
        return cached;
    }
    let best = trellis
        .forward_transitions(&state)
        .iter()
        .filter_map(|(&next, w)| brute_force_best(trellis, next, memo).map(|rest| rest + w))
        .fold(None, |acc: Option<f64>, score| Some(acc.map_or(score, |a| a.max(score))));
    memo.insert(state, best);
    best
}

fn corpus_strategy() -> impl Strategy<Value = Vec<TaggedSentence>> {
    let pair = (prop::sample::select(vec!["a", "b", "c", "d"]), prop::sample::select(vec!["X", "Y", "Z"]));
    prop::collection::vec(prop::collection::vec(pair, 1..=4), 1..=4).prop_map(|sentences| {
        sentences
            .iter()
            .map(|pairs| TaggedSentence::from_pairs(pairs))
            .collect()
    })
}

proptest! {
    #[test]
    fn viterbi_matches_exhaustive_search(layers in layered()) {
        let trellis = layers.trellis();
        let best = brute_force_best(&trellis, 0, &mut HashMap::new());

        match (ViterbiDecoder.best_path(&trellis), best) {
            (Ok(path), Some(best)) => {
                prop_assert_eq!(path.first(), Some(&0));
                prop_assert_eq!(path.last(), Some(trellis.end()));
                let weight = path_weight(&trellis, &path).unwrap();
                prop_assert!((weight - best).abs() < 1e-9, "viterbi {} vs exhaustive {}", weight, best);
            }
            (Err(PosError::UnreachableEnd { .. }), None) => {}
            (result, best) => prop_assert!(false, "viterbi {:?} but exhaustive {:?}", result, best),
        }
    }

    #[test]
    fn greedy_never_beats_viterbi(layers in layered()) {
        let trellis = layers.trellis();
        if let Ok(greedy) = GreedyDecoder.best_path(&trellis) {
            let viterbi = ViterbiDecoder.best_path(&trellis).unwrap();
            let greedy_weight = path_weight(&trellis, &greedy).unwrap();
            let viterbi_weight = path_weight(&trellis, &viterbi).unwrap();
            prop_assert!(greedy_weight <= viterbi_weight + 1e-9);
        }
    }

    #[test]
    fn decoded_tagging_scores_at_least_gold(corpus in corpus_strategy(), restrict in any::<bool>()) {
        let mut tagger = PosTagger::from_config(&TaggerConfig {
            scorer: ScorerKind::TrigramHmm,
            decoder: DecoderKind::Viterbi,
            restrict_trigrams: restrict,
            ..TaggerConfig::default()
        });
        tagger.train(&corpus);

        for gold in &corpus {
            let guess = tagger.tag(gold.words()).unwrap();
            let guess = TaggedSentence::new(gold.words().to_vec(), guess).unwrap();
            prop_assert!(tagger.score_tagging(gold) <= tagger.score_tagging(&guess) + 1e-9);
        }
    }
}
