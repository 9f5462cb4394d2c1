//! Sliding-window text chunking.
//!
//! Splits the extracted document text into overlapping bounded-size chunks
//! so local context survives chunk boundaries. Windows are measured in
//! characters, never bytes, so multi-byte text cannot split inside a code
//! point.

/// Chunking parameters.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Maximum chunk size in characters.
    pub max_chunk_chars: usize,
    /// Overlap between consecutive chunks, in characters.
    pub overlap_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 10_000,
            overlap_chars: 1_000,
        }
    }
}

/// A contiguous piece of the extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// The chunk content.
    pub text: String,
    /// Character offset of the chunk start in the original text.
    pub start_offset: usize,
    /// Position of the chunk in the sequence.
    pub index: usize,
}

/// Splits `text` into an ordered chunk sequence. Each chunk after the first
/// starts exactly `overlap_chars` characters before the previous chunk's
/// end. Deterministic: the same input and parameters always produce the
/// same sequence. Whitespace-only input yields no chunks.
pub fn split_text(text: &str, config: &ChunkerConfig) -> Vec<TextChunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let max = config.max_chunk_chars.max(1);
    // The window must advance; an overlap >= max would loop in place.
    let overlap = config.overlap_chars.min(max - 1);

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut index = 0;

    loop {
        let end = (start + max).min(chars.len());
        chunks.push(TextChunk {
            text: chars[start..end].iter().collect(),
            start_offset: start,
            index,
        });

        if end == chars.len() {
            break;
        }
        start = end - overlap;
        index += 1;
    }

    chunks
}
