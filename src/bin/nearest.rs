use std::{collections::HashMap, env, error::Error, process::ExitCode};
use ndarray::{Array1, Array2};
use skipgram_prep::{files_handling, logging, normalize_rows, Embedding, Similarity};
use tracing::error;


// checks on trained vectors: the K most similar words to each given word.
// treated as binary executable so it can be ran independently from main
//
// arguments to this executable should be:
// path to trained vecs (npy, without suffix)
// path to tokens (json, without suffix)
// one or more tokens
// example: ... Output/vecs Output/words king sun

const K: usize = 10;

fn main() -> ExitCode {

    logging::init_with_level("warn");

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        error!("expected arguments: <vecs> <words> <token>...");
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2], &args[3..]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(vecs_path: &str, words_path: &str, tokens: &[String]) -> Result<(), Box<dyn Error>> {

    let w = files_handling::read_input::<Array2<f32>>(vecs_path)?;
    let t2i = files_handling::read_input::<HashMap<String, usize>>(words_path)?;
    if w.num_embeddings() != t2i.len() {
        return Err(format!("inconsistent number of entries in vecs ({}) and tokens ({})", w.num_embeddings(), t2i.len()).into());
    }
    let sim_obj = Similarity::from_t2i(&t2i);

    // unit rows so that a dot product is the cosine similarity
    let w = normalize_rows(w.weights())?;

    for token in tokens {

        let index = *t2i.get(token).ok_or_else(|| format!("token: {} is not in the vocabulary", token))?;
        let vec: Array1<f32> = w.row(index).to_owned();
        let scores = w.dot(&vec);

        println!("searching {} most similar words to {}", K, token);
        for (i, (similar_token, score)) in sim_obj.find_k_most_similar(scores.view(), K)?.iter().enumerate() {
            println!("{} : {} ? {} = {}", i, token, similar_token, score);
        }
        println!();
    }

    Ok(())
}
