//! # Avaliação sobre Dados Anotados
//!
//! Compara as tags previstas com as de referência, posição a posição.
//!
//! - **tag_accuracy**: acertos / total de palavras.
//! - **unknown_accuracy**: o mesmo, restrito às palavras fora do vocabulário de treino.
//! - **decoding_inversions**: sentenças em que a etiquetagem de referência pontua
//!   *acima* da escolhida pelo decodificador. Com Viterbi isso nunca deveria
//!   acontecer; com o guloso indica uma subotimalidade de busca, não do modelo.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::sentence::TaggedSentence;
use crate::tagger::PosTagger;

const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub tag_accuracy: f64,
    pub unknown_accuracy: f64,
    pub tokens: usize,
    pub unknown_tokens: usize,
    pub decoding_inversions: usize,
    pub sentences_evaluated: usize,
    pub sentences_skipped: usize,
}

#[derive(Default)]
struct Tally {
    correct: usize,
    tokens: usize,
    unknown_correct: usize,
    unknown_tokens: usize,
    inversions: usize,
    evaluated: usize,
    skipped: usize,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.correct += other.correct;
        self.tokens += other.tokens;
        self.unknown_correct += other.unknown_correct;
        self.unknown_tokens += other.unknown_tokens;
        self.inversions += other.inversions;
        self.evaluated += other.evaluated;
        self.skipped += other.skipped;
        self
    }
}

/// Conjunto de palavras vistas nas sentenças.
pub fn vocabulary(sentences: &[TaggedSentence]) -> HashSet<String> {
    sentences
        .iter()
        .flat_map(|s| s.words().iter().cloned())
        .collect()
}

/// Etiqueta cada sentença de referência e agrega as métricas.
///
/// Sentenças cuja decodificação falha são registradas com `warn!` e contadas
/// em `sentences_skipped`.
pub fn evaluate(
    tagger: &PosTagger,
    gold: &[TaggedSentence],
    training_vocabulary: &HashSet<String>,
) -> Evaluation {
    let tally = gold
        .par_iter()
        .map(|sentence| score_sentence(tagger, sentence, training_vocabulary))
        .reduce(Tally::default, Tally::merge);

    let ratio = |hits: usize, total: usize| {
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    };

    let evaluation = Evaluation {
        tag_accuracy: ratio(tally.correct, tally.tokens),
        unknown_accuracy: ratio(tally.unknown_correct, tally.unknown_tokens),
        tokens: tally.tokens,
        unknown_tokens: tally.unknown_tokens,
        decoding_inversions: tally.inversions,
        sentences_evaluated: tally.evaluated,
        sentences_skipped: tally.skipped,
    };
    tracing::info!(
        tag_accuracy = evaluation.tag_accuracy,
        unknown_accuracy = evaluation.unknown_accuracy,
        inversions = evaluation.decoding_inversions,
        skipped = evaluation.sentences_skipped,
        "evaluation finished"
    );
    evaluation
}

fn score_sentence(
    tagger: &PosTagger,
    sentence: &TaggedSentence,
    training_vocabulary: &HashSet<String>,
) -> Tally {
    let guessed = match tagger.tag(sentence.words()) {
        Ok(tags) => tags,
        Err(err) => {
            tracing::warn!(sentence = %sentence, error = %err, "skipping sentence");
            return Tally {
                skipped: 1,
                ..Tally::default()
            };
        }
    };

    let mut tally = Tally {
        evaluated: 1,
        ..Tally::default()
    };
    for ((word, gold), guess) in sentence.words().iter().zip(sentence.tags()).zip(&guessed) {
        let hit = usize::from(gold == guess);
        tally.tokens += 1;
        tally.correct += hit;
        if !training_vocabulary.contains(word) {
            tally.unknown_tokens += 1;
            tally.unknown_correct += hit;
        }
    }

    if let Ok(guess) = TaggedSentence::new(sentence.words().to_vec(), guessed) {
        let gold_score = tagger.score_tagging(sentence);
        let guess_score = tagger.score_tagging(&guess);
        if gold_score > guess_score + SCORE_EPSILON {
            tracing::debug!(%sentence, gold_score, guess_score, "decoder missed a better tagging");
            tally.inversions += 1;
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaggerConfig;
    use crate::decoder::DecoderKind;

    fn corpus() -> Vec<TaggedSentence> {
        vec![
            TaggedSentence::from_pairs(&[("the", "DT"), ("dog", "NN"), ("runs", "VB")]),
            TaggedSentence::from_pairs(&[("the", "DT"), ("cat", "NN"), ("runs", "VB")]),
            TaggedSentence::from_pairs(&[("a", "DT"), ("dog", "NN"), ("sleeps", "VB")]),
            TaggedSentence::from_pairs(&[("dogs", "NN"), ("run", "VB")]),
            TaggedSentence::from_pairs(&[("the", "DT"), ("run", "NN"), ("ends", "VB")]),
        ]
    }

    fn trained(decoder: DecoderKind) -> PosTagger {
        let mut tagger = PosTagger::from_config(&TaggerConfig {
            decoder,
            ..TaggerConfig::default()
        });
        tagger.train(&corpus());
        tagger
    }

    #[test]
    fn test_vocabulary() {
        let vocab = vocabulary(&corpus());
        assert!(vocab.contains("dog"));
        assert!(vocab.contains("ends"));
        assert!(!vocab.contains("zebra"));
        assert_eq!(vocab.len(), 9);
    }

    #[test]
    fn test_training_data_is_tagged_perfectly() {
        let corpus = corpus();
        let tagger = trained(DecoderKind::Viterbi);
        let eval = evaluate(&tagger, &corpus, &vocabulary(&corpus));
        assert_eq!(eval.tokens, 14);
        assert_eq!(eval.tag_accuracy, 1.0);
        assert_eq!(eval.unknown_tokens, 0);
        assert_eq!(eval.unknown_accuracy, 0.0);
        assert_eq!(eval.decoding_inversions, 0);
        assert_eq!(eval.sentences_evaluated, 5);
        assert_eq!(eval.sentences_skipped, 0);
    }

    #[test]
    fn test_unknown_words_are_tracked() {
        let corpus = corpus();
        let tagger = trained(DecoderKind::Greedy);
        let held_out = vec![TaggedSentence::from_pairs(&[
            ("the", "DT"),
            ("zebra", "NN"),
            ("runs", "VB"),
        ])];
        let eval = evaluate(&tagger, &held_out, &vocabulary(&corpus));
        assert_eq!(eval.tokens, 3);
        assert_eq!(eval.unknown_tokens, 1);
        assert_eq!(eval.unknown_accuracy, 1.0);
    }

    #[test]
    fn test_decode_failures_are_skipped() {
        // Sem treino, nenhum estado tem sucessores
        let tagger = PosTagger::from_config(&TaggerConfig::default());
        let eval = evaluate(&tagger, &corpus(), &HashSet::new());
        assert_eq!(eval.sentences_skipped, 5);
        assert_eq!(eval.sentences_evaluated, 0);
        assert_eq!(eval.tokens, 0);
        assert_eq!(eval.tag_accuracy, 0.0);
    }
}
