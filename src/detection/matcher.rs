//! Multi-signature phrase matcher
//!
//! All signatures are compiled into one Aho-Corasick DFA over the byte form
//! `" t1 t2 ... tn "`. Tokens are fed as a leading space followed by
//! `token + " "`, so a pattern can only match a contiguous run of whole
//! tokens. The automaton is stepped one byte at a time and every pattern
//! ending at a match state is reported, which keeps overlapping and prefix
//! phrases independent of each other.

use crate::license::{LicenseTag, SignatureSet};
use crate::AuditResult;
use aho_corasick::automaton::Automaton;
use aho_corasick::dfa::{self, DFA};
use aho_corasick::{Anchored, MatchKind};
use std::io;

const SEPARATOR: u8 = b' ';

/// Compiled signature corpus, shared read-only by every worker
#[derive(Debug)]
pub struct SignatureMatcher {
    dfa: DFA,
    /// Distinct tags, in corpus order
    tags: Vec<String>,
    /// Pattern index -> index into `tags`
    pattern_tags: Vec<usize>,
}

impl SignatureMatcher {
    pub fn new(signatures: &SignatureSet) -> AuditResult<Self> {
        let mut tags: Vec<String> = Vec::new();
        let mut pattern_tags = Vec::with_capacity(signatures.len());
        let mut patterns: Vec<Vec<u8>> = Vec::with_capacity(signatures.len());

        for sig in signatures.signatures() {
            let tag_idx = match tags.iter().position(|t| *t == sig.license) {
                Some(i) => i,
                None => {
                    tags.push(sig.license.clone());
                    tags.len() - 1
                }
            };
            pattern_tags.push(tag_idx);
            patterns.push(encode_phrase(&sig.tokens));
        }

        // Standard semantics: every pattern ending at a state is reported.
        let dfa = dfa::Builder::new()
            .match_kind(MatchKind::Standard)
            .build(&patterns)?;

        tracing::debug!(
            "Signature matcher: {} phrases for {} licenses",
            patterns.len(),
            tags.len()
        );

        Ok(Self {
            dfa,
            tags,
            pattern_tags,
        })
    }

    /// Number of distinct tags the corpus can report
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Scan a token sequence once and return the tags whose phrase occurred,
    /// in the order their first phrase completed.
    ///
    /// Stops consuming early once every tag has been found. The first `Err`
    /// item aborts the scan and is returned.
    pub fn scan<I>(&self, tokens: I) -> io::Result<Vec<LicenseTag>>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut found = vec![false; self.tags.len()];
        let mut order: Vec<usize> = Vec::new();

        if self.tags.is_empty() {
            for token in tokens {
                token?;
            }
            return Ok(Vec::new());
        }

        let mut sid = self
            .dfa
            .start_state(Anchored::No)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        sid = self.step(sid, SEPARATOR, &mut found, &mut order);

        for token in tokens {
            let token = token?;
            for &byte in token.as_bytes() {
                sid = self.step(sid, byte, &mut found, &mut order);
            }
            sid = self.step(sid, SEPARATOR, &mut found, &mut order);

            if order.len() == self.tags.len() {
                break;
            }
        }

        Ok(order
            .into_iter()
            .map(|i| LicenseTag::new(self.tags[i].clone()))
            .collect())
    }

    fn step(
        &self,
        sid: aho_corasick::automaton::StateID,
        byte: u8,
        found: &mut [bool],
        order: &mut Vec<usize>,
    ) -> aho_corasick::automaton::StateID {
        let next = self.dfa.next_state(Anchored::No, sid, byte);
        if self.dfa.is_match(next) {
            for i in 0..self.dfa.match_len(next) {
                let pattern = self.dfa.match_pattern(next, i).as_usize();
                let tag = self.pattern_tags[pattern];
                if !found[tag] {
                    found[tag] = true;
                    order.push(tag);
                }
            }
        }
        next
    }
}

fn encode_phrase(tokens: &[String]) -> Vec<u8> {
    let mut bytes = vec![SEPARATOR];
    for token in tokens {
        bytes.extend_from_slice(token.as_bytes());
        bytes.push(SEPARATOR);
    }
    bytes
}
