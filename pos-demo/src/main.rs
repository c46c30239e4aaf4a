//! Demonstração em linha de comando: treina no corpus embutido, etiqueta as
//! sentenças de exemplo e imprime um relatório JSON.
//!
//! ```text
//! pos-demo [config.json]
//! RUST_LOG=debug pos-demo
//! ```

use pos_core::{
    corpus::{demo_sentences, held_out_corpus, training_corpus},
    evaluate, vocabulary, Evaluation, PosTagger, TaggerConfig,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct TaggedDemo {
    words: Vec<String>,
    tags: Option<Vec<String>>,
    error: Option<String>,
}

#[derive(Serialize)]
struct Report {
    config: TaggerConfig,
    tags: usize,
    demo: Vec<TaggedDemo>,
    held_out: Evaluation,
}

fn main() -> pos_core::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading configuration");
            TaggerConfig::load(&path)?
        }
        None => TaggerConfig::default(),
    };

    let training = training_corpus();
    let mut tagger = PosTagger::from_config(&config);
    tagger.train(&training);

    let sentences = demo_sentences();
    let demo = sentences
        .iter()
        .zip(tagger.tag_all(&sentences))
        .map(|(words, result)| match result {
            Ok(tags) => TaggedDemo {
                words: words.clone(),
                tags: Some(tags),
                error: None,
            },
            Err(err) => TaggedDemo {
                words: words.clone(),
                tags: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let held_out = evaluate(&tagger, &held_out_corpus(), &vocabulary(&training));

    let report = Report {
        tags: tagger.tag_set().iter().count(),
        config,
        demo,
        held_out,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
