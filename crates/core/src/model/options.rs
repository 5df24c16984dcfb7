use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionsError {
    #[error("permutation length {got} does not match option count {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("index order is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },
}

/// A question's answer options in randomized display order, together with the
/// bijection from original index to display index.
///
/// Built once when a question enters a session and discarded with it. The
/// correct answer's display position is always derived on demand via
/// [`ShuffledOptions::display_index`]; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOptions {
    options: Vec<String>,
    forward_map: Vec<usize>,
}

impl ShuffledOptions {
    /// Build from the original options and a drawn display order, where
    /// `order[slot]` is the original index shown at `slot`.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError` unless `order` is a permutation of
    /// `0..original.len()`.
    pub fn from_order(original: &[String], order: &[usize]) -> Result<Self, OptionsError> {
        let len = original.len();
        if order.len() != len {
            return Err(OptionsError::LengthMismatch {
                expected: len,
                got: order.len(),
            });
        }

        let mut forward_map = vec![usize::MAX; len];
        for (slot, &orig) in order.iter().enumerate() {
            if orig >= len || forward_map[orig] != usize::MAX {
                return Err(OptionsError::NotAPermutation { len });
            }
            forward_map[orig] = slot;
        }

        let options = order.iter().map(|&i| original[i].clone()).collect();
        Ok(Self {
            options,
            forward_map,
        })
    }

    /// The option texts in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Where the option that was originally at `original_index` is displayed.
    ///
    /// # Panics
    ///
    /// Panics if `original_index` is out of range; callers obtain indices
    /// from the validated `Question`, which guarantees the range.
    #[must_use]
    pub fn display_index(&self, original_index: usize) -> usize {
        self.forward_map[original_index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
