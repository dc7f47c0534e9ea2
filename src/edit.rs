use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// The fundamental edit primitive: byte-span replacement with verification.
///
/// Every structural edit compiles down to one or more of these, applied to the
/// text the tree was parsed from. Text outside the spans is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Edit does nothing until it is applied"]
pub struct Edit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// New text to insert at [byte_start, byte_end)
    pub new_text: String,
    /// Verification of what we expect to find before applying
    pub expected_before: EditVerification,
}

/// Verification strategy for edit safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (faster for large spans)
    Hash(u64),
}

impl EditVerification {
    /// Check if the provided text matches the verification criteria.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EditVerification::ExactMatch(expected) => text == expected,
            EditVerification::Hash(expected_hash) => xxh3_64(text.as_bytes()) == *expected_hash,
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            EditVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            EditVerification::ExactMatch(text.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("before-text verification failed at bytes {byte_start}..{byte_end}: found {found:?}")]
    BeforeTextMismatch {
        byte_start: usize,
        byte_end: usize,
        found: String,
    },

    #[error("invalid byte range: [{byte_start}, {byte_end}) in text of length {text_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        text_len: usize,
    },

    #[error("byte offset {offset} splits a UTF-8 character")]
    NotCharBoundary { offset: usize },

    #[error("edits overlap: [{first_start}, {first_end}) and [{second_start}, {second_end})")]
    Overlapping {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },
}

impl Edit {
    /// Create a new edit with automatic verification generation.
    pub fn new(
        byte_start: usize,
        byte_end: usize,
        new_text: impl Into<String>,
        expected_before: &str,
    ) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text: new_text.into(),
            expected_before: EditVerification::from_text(expected_before),
        }
    }

    /// Pure insertion at `at`.
    pub fn insert(at: usize, new_text: impl Into<String>) -> Self {
        Self::new(at, at, new_text, "")
    }

    /// Replace `range` of `source` with `new_text`, verifying against the
    /// text currently there.
    pub fn replace(source: &str, range: std::ops::Range<usize>, new_text: impl Into<String>) -> Self {
        let before = source.get(range.clone()).unwrap_or_default();
        Self::new(range.start, range.end, new_text, before)
    }

    /// Delete `range` of `source`.
    pub fn delete(source: &str, range: std::ops::Range<usize>) -> Self {
        Self::replace(source, range, "")
    }

    /// Validate the edit against the current text.
    ///
    /// Returns the current text at [byte_start, byte_end) if validation succeeds.
    fn validate<'a>(&self, content: &'a str) -> Result<&'a str, EditError> {
        if self.byte_start > self.byte_end || self.byte_end > content.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                text_len: content.len(),
            });
        }

        for offset in [self.byte_start, self.byte_end] {
            if !content.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }

        let current = &content[self.byte_start..self.byte_end];
        if !self.expected_before.matches(current) {
            return Err(EditError::BeforeTextMismatch {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                found: current.to_string(),
            });
        }

        Ok(current)
    }

    /// Apply this edit to `content`, returning the new text.
    pub fn apply_to(&self, content: &str) -> Result<String, EditError> {
        self.validate(content)?;

        let mut new_content = String::with_capacity(
            content.len() + self.new_text.len() - (self.byte_end - self.byte_start),
        );
        new_content.push_str(&content[..self.byte_start]);
        new_content.push_str(&self.new_text);
        new_content.push_str(&content[self.byte_end..]);
        Ok(new_content)
    }

    /// Apply several non-overlapping edits to the same text at once.
    ///
    /// All offsets refer to `content` as given. Edits are applied bottom-to-top
    /// to avoid offset invalidation; insertions at the same offset keep the
    /// order they were given in.
    pub fn apply_batch(content: &str, edits: Vec<Edit>) -> Result<String, EditError> {
        for edit in &edits {
            edit.validate(content)?;
        }

        let mut ordered: Vec<(usize, Edit)> = edits.into_iter().enumerate().collect();
        ordered.sort_by(|(ai, a), (bi, b)| {
            b.byte_start
                .cmp(&a.byte_start)
                .then(b.byte_end.cmp(&a.byte_end))
                .then(bi.cmp(ai))
        });

        // Sorted descending: the earlier edit's end must not pass the later edit's start
        for window in ordered.windows(2) {
            let (later, earlier) = (&window[0].1, &window[1].1);
            if earlier.byte_end > later.byte_start {
                return Err(EditError::Overlapping {
                    first_start: earlier.byte_start,
                    first_end: earlier.byte_end,
                    second_start: later.byte_start,
                    second_end: later.byte_end,
                });
            }
        }

        let mut new_content = content.to_string();
        for (_, edit) in &ordered {
            log::trace!(
                "splicing [{}, {}) -> {:?}",
                edit.byte_start,
                edit.byte_end,
                edit.new_text
            );
            new_content.replace_range(edit.byte_start..edit.byte_end, &edit.new_text);
        }

        Ok(new_content)
    }
}
