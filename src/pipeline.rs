
// imports
use crate::batches::get_batches;
use crate::config::{files_handling, Config, JsonTypes};
use crate::similarity::{cosine_similarity, init_embedding, Similarity};
use crate::subsample::subsample_words;
use crate::tokenize::{load_and_preprocess_data, PunctuationTokenizer};
use crate::vocab::Vocab;

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::time::Instant;
use ndarray::Array2;
use ndarray_stats::QuantileExt;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;


/// What a pipeline run produced, mostly for logging and tests.
#[derive(Debug)]
pub struct Summary {
    pub total_words: usize,
    pub vocab_size: usize,
    pub train_words: usize,
    pub num_batches: usize,
    pub num_pairs: usize,
    pub valid_examples: Vec<usize>,
    pub nearest: Vec<(String, Vec<(String, f32)>)>,
}

pub struct Pipeline {}

impl Pipeline {

    // runs the main procedure:
    // -> configuration of arguments
    // -> tokenizing, vocabulary and subsampling
    // -> batching of skip-gram pairs
    // -> similarity check on an embedding

    pub fn run_from_args() -> Result<Summary, Box<dyn Error>> {

        let args: Vec<String> = env::args().collect();
        info!("building parameters...");
        let params = Config::new(&args)?.get_params();
        Pipeline::run(&params)
    }

    pub fn run(params: &JsonTypes) -> Result<Summary, Box<dyn Error>> {

        info!("{}", params);
        files_handling::save_output(&params.output_dir, "params", params)?;

        // one generator for every random stage so a seed reproduces the whole run
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // vocabulary
        let timer = Instant::now();
        let tokenizer = PunctuationTokenizer { min_count: params.min_count };
        let words = load_and_preprocess_data(&params.corpus_file, &tokenizer)?;
        let vocab = Vocab::build(&words)?;
        info!(total_words = words.len(), vocab_size = vocab.len(), "built vocabulary, took {} ms", timer.elapsed().as_millis());

        // subsampling
        let timer = Instant::now();
        let (train_words, freqs) = subsample_words(&words, vocab.vocab_to_int(), params.threshold, &mut rng)?;
        info!(kept = train_words.len(), total = words.len(), "subsampled words, took {} ms", timer.elapsed().as_millis());

        files_handling::save_output::<HashMap<String, usize>>(&params.output_dir, "words", vocab.vocab_to_int())?;
        files_handling::save_output::<HashMap<String, f64>>(&params.output_dir, "freqs", &freqs)?;
        files_handling::save_output::<Vec<usize>>(&params.output_dir, "train_words", &train_words)?;

        // one full pass over the batches, as a training epoch would consume them
        let timer = Instant::now();
        let batches = get_batches(&train_words, params.batch_size, params.window_size, &mut rng)?
        .drop_last(params.drop_last);
        let mut num_batches = 0;
        let mut num_pairs = 0;
        for (inputs, _targets) in batches {
            num_batches += 1;
            num_pairs += inputs.len();
        }
        info!(num_batches, num_pairs, "generated skip-gram pairs, took {} ms", timer.elapsed().as_millis());

        // similarity check on the trained vectors, or on a fresh embedding when none were given
        let embedding: Array2<f32> = match &params.embedding_file {
            Some(path) => files_handling::read_input::<Array2<f32>>(path)?,
            None => init_embedding(vocab.len(), params.embedding_dim, &mut rng),
        };
        if embedding.nrows() != vocab.len() {
            return Err(format!("embedding has {} rows for a vocabulary of {}", embedding.nrows(), vocab.len()).into());
        }

        let valid_window = params.valid_window.min(vocab.len());
        let (valid_examples, similarities) = cosine_similarity(&embedding, params.valid_size, valid_window, &mut rng)?;
        info!(max = *similarities.max()?, min = *similarities.min()?, "similarities computed");

        let sim_obj = Similarity::new(vocab.int_to_vocab().clone());
        let nearest = sim_obj.nearest(&valid_examples, &similarities, params.top_k)?;
        for (token, closest) in &nearest {
            let names = closest.iter().map(|(t, _)| t.as_str()).collect::<Vec<&str>>().join(", ");
            info!("{} | {}", token, names);
        }
        files_handling::save_output::<Array2<f32>>(&params.output_dir, "similarities", &similarities)?;

        Ok(Summary {
            total_words: words.len(),
            vocab_size: vocab.len(),
            train_words: train_words.len(),
            num_batches,
            num_pairs,
            valid_examples,
            nearest
        })
    }

}
