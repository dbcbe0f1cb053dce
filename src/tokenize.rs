
use std::collections::HashMap;
use std::error::Error;
use tracing::debug;
use crate::config::files_handling;


// defines the behavior needed for tokenizing a corpus
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

// punctuation is kept as words of its own
const PUNCTUATION: [(&str, &str); 10] = [
    ("--", " <HYPHENS> "),
    (".", " <PERIOD> "),
    (",", " <COMMA> "),
    ("\"", " <QUOTATION_MARK> "),
    (";", " <SEMICOLON> "),
    ("!", " <EXCLAMATION_MARK> "),
    ("?", " <QUESTION_MARK> "),
    ("(", " <LEFT_PAREN> "),
    (")", " <RIGHT_PAREN> "),
    (":", " <COLON> "),
];

/// Lower cases, names punctuation marks, splits on white space and drops words seen
/// `min_count` times or fewer.
#[derive(Clone, Debug)]
pub struct PunctuationTokenizer {
    pub min_count: usize,
}

impl Default for PunctuationTokenizer {
    fn default() -> Self {
        Self { min_count: 5 }
    }
}

impl Tokenizer for PunctuationTokenizer {

    fn tokenize(&self, text: &str) -> Vec<String> {

        let mut text = text.to_lowercase();
        for (mark, name) in PUNCTUATION {
            text = text.replace(mark, name);
        }

        let words = text.split_whitespace().collect::<Vec<&str>>();
        let mut word_counts: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            *word_counts.entry(*word).or_insert(0) += 1;
        }

        let trimmed_words = words
        .iter()
        .filter(|word| word_counts[*word] > self.min_count)
        .map(|word| word.to_string())
        .collect::<Vec<String>>();

        debug!(raw = words.len(), kept = trimmed_words.len(), min_count = self.min_count, "tokenized text");
        trimmed_words
    }

}

/// Reads the corpus at `file_path` (a `.txt` file, given without suffix) and tokenizes it.
pub fn load_and_preprocess_data<T: Tokenizer + ?Sized>(file_path: &str, tokenizer: &T) -> Result<Vec<String>, Box<dyn Error>> {
    let text = files_handling::read_input::<String>(file_path)?;
    Ok(tokenizer.tokenize(&text))
}
