//! License detection over file contents
//!
//! The tokenizer and the matcher run as two stages joined by a bounded
//! queue. A slow matcher blocks the tokenizer once the queue is full, and
//! the tokenizer closes the queue when input ends. If the matcher finishes
//! early it drops its end and the tokenizer stops on the next send.

pub mod matcher;
pub mod tokenizer;

pub use matcher::SignatureMatcher;
pub use tokenizer::{normalize_word, tokenize_str, Tokens};

use crate::license::LicenseTag;
use crossbeam_channel::bounded;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Tokens buffered between the tokenizer and the matcher
pub const TOKEN_QUEUE_CAPACITY: usize = 32;

/// Run tokenizer + matcher over a reader and return the detected tags
pub fn identify_licenses<R>(matcher: &SignatureMatcher, reader: R) -> io::Result<Vec<LicenseTag>>
where
    R: Read + Send,
{
    let (tx, rx) = bounded::<io::Result<String>>(TOKEN_QUEUE_CAPACITY);

    std::thread::scope(|s| {
        s.spawn(move || {
            for token in Tokens::new(reader) {
                let stop = token.is_err();
                if tx.send(token).is_err() || stop {
                    break;
                }
            }
            // `tx` dropped here: end of input
        });

        let result = matcher.scan(rx.iter());
        drop(rx);
        result
    })
}

/// Open a file and identify its licenses
pub fn file_licenses(matcher: &SignatureMatcher, path: &Path) -> io::Result<Vec<LicenseTag>> {
    let file = File::open(path)?;
    identify_licenses(matcher, file)
}
