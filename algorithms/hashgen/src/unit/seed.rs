//! Seed Table
//!
//! Affine pre-mix: one constant byte per slot, XORed in before the matrix.
//! With every slot word zero the pre-mixed vector is exactly the seed, which
//! is what keeps the hash of an all-zero packet away from zero.

use crate::types::{word_mask, ConfigError, InputVector, Word, SLOT_COUNT};

/// Per-slot seed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedTable {
    bytes: [u8; SLOT_COUNT],
}

impl SeedTable {
    /// All-zero seed (pure linear hash).
    pub const ZERO: Self = Self {
        bytes: [0; SLOT_COUNT],
    };

    /// Validate a seed table against the slot word width.
    ///
    /// # Errors
    /// `SeedTooWide` when a seed has bits the slot word cannot hold.
    pub fn new(bytes: [u8; SLOT_COUNT], word_width: u32) -> Result<Self, ConfigError> {
        let mask = word_mask(word_width);
        if let Some((slot, &seed)) = bytes
            .iter()
            .enumerate()
            .find(|&(_, &b)| Word::from(b) & !mask != 0)
        {
            return Err(ConfigError::SeedTooWide {
                slot,
                seed: u64::from(seed),
                width: word_width,
            });
        }
        Ok(Self { bytes })
    }

    /// Seed bytes in slot order.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; SLOT_COUNT] {
        &self.bytes
    }

    /// Seed zero-extended into slot words.
    #[must_use]
    pub fn as_input(&self) -> InputVector {
        InputVector::from_words(self.bytes.map(Word::from))
    }

    /// XOR the seed into resolved slot words.
    #[must_use]
    pub fn premix(&self, words: &InputVector) -> InputVector {
        premix(words, &self.bytes)
    }
}

impl Default for SeedTable {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Elementwise `words[c] ^ seed[c]`, the seed zero-extended to the word width.
#[must_use]
pub fn premix(words: &InputVector, seed: &[u8; SLOT_COUNT]) -> InputVector {
    let mut out = *words.words();
    for (w, &s) in out.iter_mut().zip(seed.iter()) {
        *w ^= Word::from(s);
    }
    InputVector::from_words(out)
}
