
use std::collections::HashMap;
use ndarray::prelude::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;
use tracing::debug;
use crate::error::PrepError;


/// Read access to an embedding table of shape `(vocab_size, embedding_dim)`.
pub trait Embedding {

    fn weights(&self) -> ArrayView2<'_, f32>;

    fn num_embeddings(&self) -> usize {
        self.weights().nrows()
    }

    fn embedding_dim(&self) -> usize {
        self.weights().ncols()
    }

    fn lookup(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        if index < self.num_embeddings() {
            Some(self.weights().index_axis_move(Axis(0), index))
        } else {
            None
        }
    }
}

impl Embedding for Array2<f32> {
    fn weights(&self) -> ArrayView2<'_, f32> {
        self.view()
    }
}


/// An untrained embedding drawn from a standard normal, shape `(vocab_size, embedding_dim)`.
pub fn init_embedding<R: Rng + ?Sized>(vocab_size: usize, embedding_dim: usize, rng: &mut R) -> Array2<f32> {
    Array2::random_using((vocab_size, embedding_dim), StandardNormal, rng)
}

/// Each row scaled to unit L2 norm. Fails on the first row with a zero or non finite norm.
pub fn normalize_rows(w: ArrayView2<'_, f32>) -> Result<Array2<f32>, PrepError> {

    let norms = w.map_axis(Axis(1), |row| row.dot(&row).sqrt());
    if let Some(row) = norms.iter().position(|n| *n == 0.0 || !n.is_finite()) {
        return Err(PrepError::ZeroVector { row });
    }
    Ok(&w / &norms.insert_axis(Axis(1)))
}

/// Cosine similarity of `valid_size` random words against every word of the embedding.
///
/// Indices are drawn uniformly from `[0, valid_window)` with replacement, so duplicates can occur.
/// Returns the drawn indices and a `(valid_size, vocab_size)` similarity matrix.
pub fn cosine_similarity<E: Embedding + ?Sized, R: Rng + ?Sized>(
    embedding: &E,
    valid_size: usize,
    valid_window: usize,
    rng: &mut R,
) -> Result<(Vec<usize>, Array2<f32>), PrepError> {

    let vocab_size = embedding.num_embeddings();
    if valid_size == 0 {
        return Err(PrepError::invalid("valid_size must be at least 1"));
    }
    if valid_window == 0 || valid_window > vocab_size {
        return Err(PrepError::invalid(format!("valid_window must be in [1, {}], got {}", vocab_size, valid_window)));
    }

    let embedding_weights = normalize_rows(embedding.weights())?;

    let valid_examples = (0..valid_size).map(|_| rng.gen_range(0..valid_window)).collect::<Vec<usize>>();
    let valid_vectors = embedding_weights.select(Axis(0), &valid_examples);

    let similarities = valid_vectors.dot(&embedding_weights.t());
    debug!(valid_size, vocab_size, "computed cosine similarities");

    Ok((valid_examples, similarities))
}


/// Decodes similarity rows into the closest words of each sampled word.
pub struct Similarity {
    i2t: HashMap<usize, String>,
}

impl Similarity {

    pub fn new(i2t: HashMap<usize, String>) -> Similarity {
        Self { i2t }
    }

    pub fn from_t2i(t2i: &HashMap<String, usize>) -> Similarity {
        let mut i2t: HashMap<usize, String> = HashMap::new();
        for (t, i) in t2i {
            i2t.entry(*i).or_insert(t.to_owned());
        }
        Self { i2t }
    }

    pub fn token(&self, index: usize) -> Result<&str, PrepError> {
        self.i2t.get(&index)
        .map(|t| t.as_str())
        .ok_or_else(|| PrepError::invalid(format!("index {} has no token", index)))
    }

    /// The `k` highest scoring tokens of `scores`, best first.
    pub fn find_k_most_similar(&self, scores: ArrayView1<'_, f32>, k: usize) -> Result<Vec<(String, f32)>, PrepError> {

        let mut indexed_scores: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();

        // sort by most similar in descending order
        indexed_scores.sort_by(|(_i, s), (_j, t)| t.total_cmp(s));

        indexed_scores
        .into_iter()
        .take(k)
        .map(|(index, score)| Ok((self.token(index)?.to_owned(), score)))
        .collect()
    }

    /// For every sampled index, its token and the `top_k` nearest other tokens.
    ///
    /// The best match of a word is the word itself, it is skipped.
    pub fn nearest(&self, valid_examples: &[usize], similarities: &Array2<f32>, top_k: usize) -> Result<Vec<(String, Vec<(String, f32)>)>, PrepError> {

        if valid_examples.len() != similarities.nrows() {
            return Err(PrepError::invalid(format!(
                "{} sampled indices for {} similarity rows", valid_examples.len(), similarities.nrows()
            )));
        }

        let mut report = Vec::with_capacity(valid_examples.len());
        for (index, scores) in valid_examples.iter().zip(similarities.axis_iter(Axis(0))) {
            let token = self.token(*index)?.to_owned();
            let closest = self.find_k_most_similar(scores, top_k + 1)?
            .into_iter()
            .filter(|(t, _)| *t != token)
            .take(top_k)
            .collect();
            report.push((token, closest));
        }
        Ok(report)
    }

}
