
mod batches;
mod config;
mod error;
mod pipeline;
mod similarity;
mod subsample;
mod tokenize;
mod vocab;
pub mod logging;

pub use batches::{get_batches, get_target, Batches};
pub use config::{files_handling, Config, JsonTypes};
pub use error::PrepError;
pub use pipeline::{Pipeline, Summary};
pub use similarity::{cosine_similarity, init_embedding, normalize_rows, Embedding, Similarity};
pub use subsample::{discard_probability, subsample_words, word_frequencies, DEFAULT_THRESHOLD};
pub use tokenize::{load_and_preprocess_data, PunctuationTokenizer, Tokenizer};
pub use vocab::{create_lookup_tables, Vocab};
