
use std::collections::HashMap;
use rand::Rng;
use tracing::debug;
use crate::error::PrepError;

pub const DEFAULT_THRESHOLD: f64 = 1e-5;


/// Relative frequency of every distinct word, `count / words.len()`.
pub fn word_frequencies(words: &[String]) -> HashMap<String, f64> {

    let mut token2count: HashMap<&str, usize> = HashMap::new();
    for tok in words {
        *token2count.entry(tok.as_str()).or_insert(0) += 1;
    }

    let total_words = words.len() as f64;
    token2count
    .into_iter()
    .map(|(word, count)| (word.to_owned(), count as f64 / total_words))
    .collect()
}

/// Mikolov's discard probability `1 - sqrt(threshold / freq)`.
///
/// Rare words (`freq < threshold`) get a negative value, which means the word is always kept.
pub fn discard_probability(threshold: f64, freq: f64) -> Option<f64> {
    if freq == 0.0 {
        return None;
    }
    Some(1.0 - (threshold / freq).sqrt())
}

/// Drops frequent words at random and encodes the survivors.
///
/// One uniform draw in `[0, 1)` is taken per token, in corpus order, and the token is kept when
/// the draw is above its discard probability. Returns the encoded retained words together with
/// the frequency table.
pub fn subsample_words<R: Rng + ?Sized>(
    words: &[String],
    vocab_to_int: &HashMap<String, usize>,
    threshold: f64,
    rng: &mut R,
) -> Result<(Vec<usize>, HashMap<String, f64>), PrepError> {

    if !(threshold > 0.0) {
        return Err(PrepError::invalid(format!("threshold must be positive, got {}", threshold)));
    }

    let freqs = word_frequencies(words);

    let mut prob_discard: HashMap<&str, f64> = HashMap::with_capacity(freqs.len());
    for (word, freq) in &freqs {
        let p = discard_probability(threshold, *freq)
        .ok_or_else(|| PrepError::DivisionByZero { word: word.to_owned() })?;
        prob_discard.insert(word.as_str(), p);
    }

    // lookups are checked before drawing so no partial result escapes on error
    let mut coded: Vec<(usize, f64)> = Vec::with_capacity(words.len());
    for word in words {
        let i = vocab_to_int.get(word)
        .ok_or_else(|| PrepError::invalid(format!("word '{}' is not in the vocabulary", word)))?;
        coded.push((*i, prob_discard[word.as_str()]));
    }

    let train_words = coded
    .into_iter()
    .filter_map(|(i, p)| {
        let draw: f64 = rng.gen();
        if draw > p { Some(i) } else { None }
    })
    .collect::<Vec<usize>>();

    debug!(kept = train_words.len(), total = words.len(), threshold, "subsampled words");

    Ok((train_words, freqs))
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::vocab::create_lookup_tables;
    use rand::{rngs::StdRng, SeedableRng};

    fn corpus() -> Vec<String> {
        // "the" dominates, a few rare words
        let mut words = Vec::new();
        for i in 0..200 {
            words.push("the".to_string());
            words.push(if i % 2 == 0 { "of" } else { "and" }.to_string());
            if i % 10 == 0 {
                words.push(format!("rare{}", i));
            }
        }
        words
    }

    #[test]
    fn frequencies_sum_to_one_test() {
        let freqs = word_frequencies(&corpus());
        let total: f64 = freqs.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((freqs["the"] - 200.0 / 420.0).abs() < 1e-12);
    }

    #[test]
    fn discard_probability_test() {
        assert_eq!(discard_probability(1e-5, 0.0), None);
        assert!((discard_probability(0.25, 1.0).unwrap() - 0.5).abs() < 1e-12);
        // rarer than the threshold gives a negative probability
        assert!(discard_probability(1e-2, 1e-4).unwrap() < 0.0);
    }

    #[test]
    fn infinite_threshold_keeps_everything_test() {

        let words = corpus();
        let (vocab_to_int, _) = create_lookup_tables(&words).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let (train_words, _) = subsample_words(&words, &vocab_to_int, f64::INFINITY, &mut rng).unwrap();
        let expected = words.iter().map(|w| vocab_to_int[w]).collect::<Vec<usize>>();
        assert_eq!(train_words, expected);
    }

    #[test]
    fn smaller_threshold_keeps_fewer_test() {

        let words = corpus();
        let (vocab_to_int, _) = create_lookup_tables(&words).unwrap();

        let mut previous = usize::MAX;
        for threshold in [1.0, 1e-1, 1e-2, 1e-3, 1e-5, 1e-8] {
            let mut rng = StdRng::seed_from_u64(42);
            let (train_words, _) = subsample_words(&words, &vocab_to_int, threshold, &mut rng).unwrap();
            assert!(train_words.len() <= previous, "threshold {} kept {} > {}", threshold, train_words.len(), previous);
            previous = train_words.len();
        }
        assert!(previous < words.len());
    }

    #[test]
    fn order_is_preserved_test() {

        let words = corpus();
        let (vocab_to_int, _) = create_lookup_tables(&words).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let (train_words, _) = subsample_words(&words, &vocab_to_int, 1e-2, &mut rng).unwrap();

        // retained tokens form a subsequence of the encoded corpus
        let encoded = words.iter().map(|w| vocab_to_int[w]).collect::<Vec<usize>>();
        let mut it = encoded.iter();
        for kept in &train_words {
            assert!(it.any(|x| x == kept));
        }
    }

    #[test]
    fn invalid_threshold_test() {

        let words = corpus();
        let (vocab_to_int, _) = create_lookup_tables(&words).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for threshold in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                subsample_words(&words, &vocab_to_int, threshold, &mut rng),
                Err(PrepError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn unknown_word_test() {
        let words = corpus();
        let (mut vocab_to_int, _) = create_lookup_tables(&words).unwrap();
        vocab_to_int.remove("the");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(subsample_words(&words, &vocab_to_int, DEFAULT_THRESHOLD, &mut rng).is_err());
    }

}
