//! # Corpus Embutido em Inglês com Tags Penn Treebank
//!
//! Pequeno corpus anotado à mão, no estilo do WSJ, para demonstração e testes.
//! Não substitui um corpus real: serve para exercitar treino, etiquetagem e
//! avaliação sem depender de arquivos externos.
//!
//! ## Tags Utilizadas
//!
//! | Tag  | Significado              | Exemplos              |
//! |------|--------------------------|-----------------------|
//! | DT   | Determinante             | the, a, every         |
//! | NN   | Substantivo singular     | dog, market, report   |
//! | NNS  | Substantivo plural       | shares, investors     |
//! | NNP  | Nome próprio             | Boeing, Tuesday       |
//! | VBD  | Verbo no passado         | rose, said            |
//! | VBZ  | Verbo 3ª pessoa presente | runs, says            |
//! | VBP  | Verbo presente           | run, expect           |
//! | JJ   | Adjetivo                 | new, strong           |
//! | IN   | Preposição               | in, of, on            |
//! | PRP  | Pronome pessoal          | they, it              |
//! | .    | Pontuação final          | .                     |

use crate::sentence::TaggedSentence;

type Annotations = &'static [(&'static str, &'static str)];

const TRAINING: &[Annotations] = &[
    // ===== FINANÇAS =====
    &[
        ("The", "DT"), ("market", "NN"), ("rose", "VBD"), ("sharply", "RB"),
        ("on", "IN"), ("Tuesday", "NNP"), (".", "."),
    ],
    &[
        ("Investors", "NNS"), ("expect", "VBP"), ("higher", "JJR"), ("rates", "NNS"),
        ("next", "JJ"), ("year", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("company", "NN"), ("said", "VBD"), ("its", "PRP$"),
        ("profit", "NN"), ("fell", "VBD"), ("in", "IN"), ("the", "DT"),
        ("third", "JJ"), ("quarter", "NN"), (".", "."),
    ],
    &[
        ("Shares", "NNS"), ("of", "IN"), ("Boeing", "NNP"), ("rose", "VBD"),
        ("to", "TO"), ("a", "DT"), ("record", "NN"), ("high", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("bank", "NN"), ("will", "MD"), ("report", "VB"),
        ("its", "PRP$"), ("earnings", "NNS"), ("on", "IN"), ("Friday", "NNP"), (".", "."),
    ],
    &[
        ("The", "DT"), ("report", "NN"), ("was", "VBD"), ("released", "VBN"),
        ("in", "IN"), ("New", "NNP"), ("York", "NNP"), (".", "."),
    ],
    &[
        ("Analysts", "NNS"), ("said", "VBD"), ("the", "DT"), ("deal", "NN"),
        ("is", "VBZ"), ("a", "DT"), ("good", "JJ"), ("sign", "NN"), (".", "."),
    ],
    &[
        ("Prices", "NNS"), ("fell", "VBD"), ("as", "IN"), ("investors", "NNS"),
        ("sold", "VBD"), ("their", "PRP$"), ("shares", "NNS"), (".", "."),
    ],
    // ===== COTIDIANO =====
    &[
        ("The", "DT"), ("dog", "NN"), ("runs", "VBZ"), ("in", "IN"),
        ("the", "DT"), ("park", "NN"), (".", "."),
    ],
    &[
        ("They", "PRP"), ("run", "VBP"), ("every", "DT"), ("morning", "NN"), (".", "."),
    ],
    &[
        ("A", "DT"), ("long", "JJ"), ("run", "NN"), ("is", "VBZ"),
        ("good", "JJ"), ("for", "IN"), ("the", "DT"), ("heart", "NN"), (".", "."),
    ],
    &[
        ("She", "PRP"), ("reads", "VBZ"), ("a", "DT"), ("book", "NN"),
        ("on", "IN"), ("the", "DT"), ("train", "NN"), (".", "."),
    ],
    &[
        ("We", "PRP"), ("book", "VBP"), ("a", "DT"), ("table", "NN"),
        ("for", "IN"), ("dinner", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("children", "NNS"), ("play", "VBP"), ("in", "IN"),
        ("the", "DT"), ("garden", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("play", "NN"), ("was", "VBD"), ("very", "RB"),
        ("long", "JJ"), (".", "."),
    ],
    &[
        ("It", "PRP"), ("was", "VBD"), ("a", "DT"), ("cold", "JJ"),
        ("night", "NN"), ("in", "IN"), ("the", "DT"), ("city", "NN"), (".", "."),
    ],
    // ===== CIÊNCIA =====
    &[
        ("The", "DT"), ("new", "JJ"), ("study", "NN"), ("shows", "VBZ"),
        ("a", "DT"), ("strong", "JJ"), ("effect", "NN"), (".", "."),
    ],
    &[
        ("Researchers", "NNS"), ("study", "VBP"), ("the", "DT"), ("effect", "NN"),
        ("of", "IN"), ("heat", "NN"), ("on", "IN"), ("cells", "NNS"), (".", "."),
    ],
    &[
        ("The", "DT"), ("results", "NNS"), ("were", "VBD"), ("published", "VBN"),
        ("in", "IN"), ("a", "DT"), ("journal", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("team", "NN"), ("found", "VBD"), ("a", "DT"),
        ("new", "JJ"), ("species", "NN"), ("in", "IN"), ("the", "DT"), ("forest", "NN"), (".", "."),
    ],
];

const HELD_OUT: &[Annotations] = &[
    &[
        ("The", "DT"), ("company", "NN"), ("rose", "VBD"), ("in", "IN"),
        ("the", "DT"), ("market", "NN"), (".", "."),
    ],
    &[
        ("The", "DT"), ("cat", "NN"), ("runs", "VBZ"), ("in", "IN"),
        ("the", "DT"), ("garden", "NN"), (".", "."),
    ],
    &[
        ("Researchers", "NNS"), ("found", "VBD"), ("a", "DT"), ("strong", "JJ"),
        ("signal", "NN"), (".", "."),
    ],
];

/// Sentenças de treino.
pub fn training_corpus() -> Vec<TaggedSentence> {
    TRAINING.iter().map(|pairs| TaggedSentence::from_pairs(pairs)).collect()
}

/// Sentenças de avaliação, disjuntas do treino (com algumas palavras novas).
pub fn held_out_corpus() -> Vec<TaggedSentence> {
    HELD_OUT.iter().map(|pairs| TaggedSentence::from_pairs(pairs)).collect()
}

/// Sentenças sem tags para demonstração.
pub fn demo_sentences() -> Vec<Vec<String>> {
    [
        "The dog reads a book .",
        "Investors study the report on Friday .",
        "A strong market is good for the bank .",
        "The zorblat rose in the city .",
    ]
    .iter()
    .map(|s| s.split_whitespace().map(str::to_string).collect())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_is_well_formed() {
        for sentence in training_corpus().iter().chain(&held_out_corpus()) {
            assert!(!sentence.is_empty());
            assert!(sentence.tags().iter().all(|t| !t.is_empty()));
        }
        assert_eq!(training_corpus().len(), TRAINING.len());
    }

    #[test]
    fn test_held_out_has_unknown_words() {
        let vocabulary: std::collections::HashSet<String> = training_corpus()
            .iter()
            .flat_map(|s| s.words().to_vec())
            .collect();
        let unknown = held_out_corpus()
            .iter()
            .flat_map(|s| s.words().to_vec())
            .filter(|w| !vocabulary.contains(w))
            .count();
        assert!(unknown > 0);
    }
}
