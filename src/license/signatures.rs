//! License phrase signatures
//!
//! A signature is a short phrase that appears verbatim in a license's
//! boilerplate. Phrases are normalized with the same rules as file tokens,
//! so punctuation and case in the source text never matter.

use crate::detection::tokenizer::tokenize_str;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A phrase that identifies a license when found contiguously in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Tag reported when the phrase is found
    pub license: String,
    /// Normalized tokens of the phrase
    pub tokens: Vec<String>,
}

impl Signature {
    /// Build a signature from free text; returns `None` if the phrase has no tokens
    pub fn new(license: impl Into<String>, phrase: &str) -> Option<Self> {
        let tokens = tokenize_str(phrase);
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            license: license.into(),
            tokens,
        })
    }
}

/// (tag, phrase) pairs recognised out of the box
const BUILTIN: &[(&str, &str)] = &[
    // Apache
    (
        "Apache",
        "Licensed to the Apache Software Foundation (ASF) under one or more contributor license agreements",
    ),
    ("Apache", "Licensed under the Apache License, Version 2.0"),
    ("Apache", "SPDX-License-Identifier: Apache-2.0"),
    // MIT
    (
        "MIT",
        "Permission is hereby granted, free of charge, to any person obtaining a copy",
    ),
    ("MIT", "SPDX-License-Identifier: MIT"),
    // BSD
    (
        "BSD",
        "Redistribution and use in source and binary forms, with or without modification, are permitted provided that the following conditions are met",
    ),
    ("BSD", "SPDX-License-Identifier: BSD-2-Clause"),
    ("BSD", "SPDX-License-Identifier: BSD-3-Clause"),
    // ISC
    (
        "ISC",
        "Permission to use, copy, modify, and/or distribute this software for any purpose with or without fee is hereby granted",
    ),
    ("ISC", "SPDX-License-Identifier: ISC"),
    // GNU family
    (
        "GPL",
        "you can redistribute it and/or modify it under the terms of the GNU General Public License",
    ),
    ("GPL", "SPDX-License-Identifier: GPL-2.0-only"),
    ("GPL", "SPDX-License-Identifier: GPL-2.0-or-later"),
    ("GPL", "SPDX-License-Identifier: GPL-3.0-only"),
    ("GPL", "SPDX-License-Identifier: GPL-3.0-or-later"),
    (
        "LGPL",
        "you can redistribute it and/or modify it under the terms of the GNU Lesser General Public License",
    ),
    ("LGPL", "SPDX-License-Identifier: LGPL-2.1-or-later"),
    ("LGPL", "SPDX-License-Identifier: LGPL-3.0-or-later"),
    (
        "AGPL",
        "you can redistribute it and/or modify it under the terms of the GNU Affero General Public License",
    ),
    ("AGPL", "SPDX-License-Identifier: AGPL-3.0-or-later"),
    // MPL
    (
        "MPL",
        "This Source Code Form is subject to the terms of the Mozilla Public License",
    ),
    ("MPL", "SPDX-License-Identifier: MPL-2.0"),
    // Public domain / misc
    (
        "Unlicense",
        "This is free and unencumbered software released into the public domain",
    ),
    (
        "Zlib",
        "Altered source versions must be plainly marked as such, and must not be misrepresented as being the original software",
    ),
    (
        "CC-BY",
        "Creative Commons Attribution 4.0 International License",
    ),
];

static BUILTIN_SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    BUILTIN
        .iter()
        .filter_map(|(license, phrase)| Signature::new(*license, phrase))
        .collect()
});

/// The configured signature corpus
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    signatures: Vec<Signature>,
}

impl SignatureSet {
    /// Empty corpus; nothing will ever match
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in corpus
    pub fn builtin() -> Self {
        Self {
            signatures: BUILTIN_SIGNATURES.clone(),
        }
    }

    /// Add a phrase; phrases that normalize to nothing are skipped
    pub fn add(&mut self, license: impl Into<String>, phrase: &str) -> bool {
        let license = license.into();
        match Signature::new(license.clone(), phrase) {
            Some(sig) => {
                if !self.signatures.contains(&sig) {
                    self.signatures.push(sig);
                }
                true
            }
            None => {
                tracing::warn!("Ignoring empty signature phrase for {}", license);
                false
            }
        }
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
