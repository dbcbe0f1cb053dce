
use rand::Rng;
use tracing::trace;
use crate::error::PrepError;


/// Words around `idx` within a window whose size is drawn uniformly from `[1, window_size]`.
///
/// Words before `idx` come first, nearest last, followed by the words after it, nearest first.
/// The window is clipped at both ends of `words`.
pub fn get_target<T: Clone, R: Rng + ?Sized>(words: &[T], idx: usize, window_size: usize, rng: &mut R) -> Result<Vec<T>, PrepError> {

    if window_size == 0 {
        return Err(PrepError::invalid("window_size must be at least 1"));
    }
    if idx >= words.len() {
        return Err(PrepError::invalid(format!("index {} out of range for {} words", idx, words.len())));
    }
    Ok(context_window(words, idx, window_size, rng))
}

// arguments are checked by the callers
fn context_window<T: Clone, R: Rng + ?Sized>(words: &[T], idx: usize, window_size: usize, rng: &mut R) -> Vec<T> {

    let rand_window_size = rng.gen_range(1..=window_size);

    let start = idx.saturating_sub(rand_window_size);
    let end = (idx + rand_window_size + 1).min(words.len());

    let mut target_words = Vec::with_capacity(end - start - 1);
    target_words.extend_from_slice(&words[start..idx]);
    target_words.extend_from_slice(&words[idx + 1..end]);
    target_words
}


/// Lazy generator of `(inputs, targets)` skip-gram pairs.
///
/// `words` is cut into consecutive chunks of `batch_size` tokens and each chunk is expanded on
/// its own, so context never crosses a chunk boundary. Every input is repeated once per context
/// word. The last chunk may be shorter than `batch_size`; it is kept unless `drop_last` is set.
pub struct Batches<'a, R: Rng + ?Sized> {
    words: &'a [usize],
    batch_size: usize,
    window_size: usize,
    drop_last: bool,
    position: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Batches<'a, R> {

    pub fn new(words: &'a [usize], batch_size: usize, window_size: usize, rng: &'a mut R) -> Result<Self, PrepError> {

        if batch_size == 0 {
            return Err(PrepError::invalid("batch_size must be at least 1"));
        }
        if window_size == 0 {
            return Err(PrepError::invalid("window_size must be at least 1"));
        }

        Ok(Self {
            words,
            batch_size,
            window_size,
            drop_last: false,
            position: 0,
            rng
        })
    }

    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Number of chunks this generator yields in total.
    pub fn num_batches(&self) -> usize {
        let n = self.words.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

}

impl<'a, R: Rng + ?Sized> Iterator for Batches<'a, R> {

    type Item = (Vec<usize>, Vec<usize>);

    fn next(&mut self) -> Option<Self::Item> {

        if self.position >= self.words.len() {
            return None;
        }

        let end = (self.position + self.batch_size).min(self.words.len());
        if self.drop_last && end - self.position < self.batch_size {
            self.position = self.words.len();
            return None;
        }

        let words = self.words;
        let current_words = &words[self.position..end];
        self.position = end;

        let mut inputs_list = Vec::new();
        let mut targets_list = Vec::new();
        for (word_index, current_word) in current_words.iter().enumerate() {
            let target_words = context_window(current_words, word_index, self.window_size, &mut *self.rng);
            for target_word in target_words {
                inputs_list.push(*current_word);
                targets_list.push(target_word);
            }
        }

        trace!(chunk_len = current_words.len(), pairs = inputs_list.len(), "yielding batch");
        Some((inputs_list, targets_list))
    }

}

/// Creates the pair generator over an encoded corpus, see [`Batches`].
pub fn get_batches<'a, R: Rng + ?Sized>(words: &'a [usize], batch_size: usize, window_size: usize, rng: &'a mut R) -> Result<Batches<'a, R>, PrepError> {
    Batches::new(words, batch_size, window_size, rng)
}
