//! Word tokenizer
//!
//! Turns a byte stream into normalized word tokens: split on whitespace,
//! lower-cased, with leading and trailing punctuation stripped. Internal
//! punctuation (`e-mail`, `and/or`, `2.0`) is kept.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};

/// Longest raw word kept; further bytes of the same word are discarded
pub const MAX_TOKEN_BYTES: usize = 64 * 1024;

/// Normalize one whitespace-free word. Returns `None` if nothing is left.
pub fn normalize_word(word: &str) -> Option<String> {
    let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Tokenize an in-memory string with the same rules as [`Tokens`]
pub fn tokenize_str(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize_word).collect()
}

/// Lazy token sequence over a reader.
///
/// The sequence is finite and cannot be restarted. A read error is yielded
/// once as `Err` and ends the sequence.
pub struct Tokens<R> {
    reader: BufReader<R>,
    word: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: Read> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            word: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Move the buffered raw word into `pending` as zero or more tokens
    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.word);
        // Non-ASCII whitespace only becomes visible after decoding.
        let decoded = String::from_utf8_lossy(&raw);
        self.pending
            .extend(decoded.split_whitespace().filter_map(normalize_word));
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        let room = MAX_TOKEN_BYTES.saturating_sub(self.word.len());
        let take = bytes.len().min(room);
        self.word.extend_from_slice(&bytes[..take]);
    }
}

impl<R: Read> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }

            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    self.word.clear();
                    return Some(Err(e));
                }
            };

            if chunk.is_empty() {
                self.done = true;
                self.flush_word();
                continue;
            }

            match chunk.iter().position(|b| b.is_ascii_whitespace()) {
                Some(end) => {
                    let head = chunk[..end].to_vec();
                    self.reader.consume(end + 1);
                    self.push_bytes(&head);
                    self.flush_word();
                }
                None => {
                    let all = chunk.to_vec();
                    self.reader.consume(all.len());
                    self.push_bytes(&all);
                }
            }
        }
    }
}
