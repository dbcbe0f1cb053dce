
use std::collections::HashMap;
use tracing::debug;
use crate::error::PrepError;


// word <-> integer lookup tables. Integers are dense and follow frequency rank,
// index 0 is the most common word. Words sharing a count are ordered lexicographically.
#[derive(Clone, Debug)]
pub struct Vocab {
    vocab_to_int: HashMap<String, usize>,
    int_to_vocab: HashMap<usize, String>,
    counts: Vec<usize>,
}

impl Vocab {

    pub fn build(words: &[String]) -> Result<Vocab, PrepError> {

        if words.is_empty() {
            return Err(PrepError::EmptyInput);
        }

        // accumulate occurrences of words - how many times each token appears in the corpus
        let mut token2count: HashMap<&str, usize> = HashMap::new();
        for tok in words {
            let val = token2count.entry(tok.as_str()).or_insert(0);
            *val += 1;
        }

        // most common first, the word itself breaks ties so the order does not depend on hashing
        let mut tup = token2count.into_iter().collect::<Vec<(&str, usize)>>();
        tup.sort_by(|(w1, c1), (w2, c2)| c2.cmp(c1).then_with(|| w1.cmp(w2)));

        let mut vocab_to_int: HashMap<String, usize> = HashMap::with_capacity(tup.len());
        let mut int_to_vocab: HashMap<usize, String> = HashMap::with_capacity(tup.len());
        let mut counts: Vec<usize> = Vec::with_capacity(tup.len());
        for (i, (word, count)) in tup.into_iter().enumerate() {
            vocab_to_int.insert(word.to_owned(), i);
            int_to_vocab.insert(i, word.to_owned());
            counts.push(count);
        }

        debug!(vocab_size = counts.len(), total_words = words.len(), "built vocabulary");

        Ok(Self { vocab_to_int, int_to_vocab, counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.vocab_to_int.get(word).copied()
    }

    pub fn word_of(&self, index: usize) -> Option<&str> {
        self.int_to_vocab.get(&index).map(|w| w.as_str())
    }

    /// Number of times the word at `index` was seen while building.
    pub fn count_of(&self, index: usize) -> Option<usize> {
        self.counts.get(index).copied()
    }

    pub fn vocab_to_int(&self) -> &HashMap<String, usize> {
        &self.vocab_to_int
    }

    pub fn int_to_vocab(&self) -> &HashMap<usize, String> {
        &self.int_to_vocab
    }

    pub fn encode(&self, words: &[String]) -> Result<Vec<usize>, PrepError> {
        words.iter().map(|word| {
            self.index_of(word).ok_or_else(|| PrepError::invalid(format!("word '{}' is not in the vocabulary", word)))
        }).collect()
    }

    pub fn decode(&self, indices: &[usize]) -> Result<Vec<String>, PrepError> {
        indices.iter().map(|i| {
            self.word_of(*i)
            .map(|w| w.to_owned())
            .ok_or_else(|| PrepError::invalid(format!("index {} is outside the vocabulary of size {}", i, self.len())))
        }).collect()
    }

    pub fn into_tables(self) -> (HashMap<String, usize>, HashMap<usize, String>) {
        (self.vocab_to_int, self.int_to_vocab)
    }

}


/// Builds the `(vocab_to_int, int_to_vocab)` tables for `words`.
pub fn create_lookup_tables(words: &[String]) -> Result<(HashMap<String, usize>, HashMap<usize, String>), PrepError> {
    Ok(Vocab::build(words)?.into_tables())
}


#[cfg(test)]
mod tests {

    use super::{create_lookup_tables, Vocab};
    use crate::error::PrepError;

    fn to_words(text: &str) -> Vec<String> {
        text.split(' ').map(|x| x.to_string()).collect()
    }

    #[test]
    fn vocab_order_test() {

        // counts: you=4, are=2, a=2, rest once
        let words = to_words("you are a pro and you know you are a pro too you");
        let vocab = Vocab::build(&words).unwrap();

        assert_eq!(vocab.word_of(0), Some("you"));
        assert_eq!(vocab.count_of(0), Some(4));

        // a, are and pro share count 2, lexicographic order
        assert_eq!(vocab.word_of(1), Some("a"));
        assert_eq!(vocab.word_of(2), Some("are"));
        assert_eq!(vocab.word_of(3), Some("pro"));
        assert_eq!(vocab.word_of(4), Some("and"));
        assert_eq!(vocab.len(), 7);
    }

    #[test]
    fn lookup_tables_are_inverse_test() {

        let words = to_words("the quick brown fox jumps over the lazy dog the end");
        let (vocab_to_int, int_to_vocab) = create_lookup_tables(&words).unwrap();

        assert_eq!(vocab_to_int.len(), int_to_vocab.len());
        for word in &words {
            assert_eq!(&int_to_vocab[&vocab_to_int[word]], word);
        }
        assert_eq!(int_to_vocab[&0], "the");

        // integers are dense
        let mut ints = vocab_to_int.values().copied().collect::<Vec<usize>>();
        ints.sort();
        assert_eq!(ints, (0..vocab_to_int.len()).collect::<Vec<usize>>());
    }

    #[test]
    fn encode_decode_test() {

        let words = to_words("b a b c b a");
        let vocab = Vocab::build(&words).unwrap();

        let encoded = vocab.encode(&words).unwrap();
        assert_eq!(encoded, vec![0, 1, 0, 2, 0, 1]);
        assert_eq!(vocab.decode(&encoded).unwrap(), words);

        assert!(matches!(vocab.encode(&to_words("d")), Err(PrepError::InvalidArgument(_))));
        assert!(matches!(vocab.decode(&[3]), Err(PrepError::InvalidArgument(_))));
    }

    #[test]
    fn empty_input_test() {
        assert_eq!(Vocab::build(&[]).unwrap_err(), PrepError::EmptyInput);
        assert!(create_lookup_tables(&[]).is_err());
    }

}
