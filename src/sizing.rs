use crate::answers::WordCount;
use crate::error::{WordleError, WordleResult};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Largest glyph size (at scale 1.0) in conventional mode, given to the most frequent word.
pub const CONVENTIONAL_BASE_SIZE: f64 = 120.0;
/// Smallest glyph size (at scale 1.0) in inverted mode, given to the most frequent word.
pub const INVERTED_BASE_SIZE: f64 = 40.0;

/// How frequency maps to glyph size.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SizingStrategy {
    /// Rare answers are drawn largest.
    #[default]
    Inverted,
    /// Common answers are drawn largest.
    Conventional,
}

impl SizingStrategy {
    pub fn from_conventional(conventional: bool) -> Self {
        if conventional {
            Self::Conventional
        } else {
            Self::Inverted
        }
    }

    pub fn is_conventional(self) -> bool {
        self == Self::Conventional
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Inverted => Self::Conventional,
            Self::Conventional => Self::Inverted,
        }
    }

    #[inline(always)]
    pub fn size_for(self, count: usize, max_count: usize, scale: f64) -> f64 {
        let count = count as f64;
        let max_count = max_count as f64;
        match self {
            Self::Conventional => scale * CONVENTIONAL_BASE_SIZE * count / max_count,
            Self::Inverted => scale * INVERTED_BASE_SIZE * max_count / count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingParams {
    pub strategy: SizingStrategy,
    pub scale: f64,
}

impl SizingParams {
    pub fn new(conventional: bool, scale: f64) -> Self {
        Self {
            strategy: SizingStrategy::from_conventional(conventional),
            scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizedWord {
    pub text: String,
    pub size: f64,
}

pub fn max_count(counts: &[WordCount]) -> WordleResult<usize> {
    counts
        .iter()
        .map(|c| c.count)
        .max()
        .ok_or(WordleError::EmptyInput)
}

/// Converts a frequency table into target font sizes.
///
/// Fails with [`WordleError::EmptyInput`] before any size is computed when `counts` is empty.
pub fn map_sizes(counts: &[WordCount], params: SizingParams) -> WordleResult<Vec<SizedWord>> {
    let max = max_count(counts)?;
    Ok(map_sizes_with_max(counts, max, params))
}

/// Same as [`map_sizes`] with a precomputed maximum, used by the retry loop which fixes
/// the maximum once per layout run.
pub(crate) fn map_sizes_with_max(
    counts: &[WordCount],
    max: usize,
    params: SizingParams,
) -> Vec<SizedWord> {
    counts
        .iter()
        .map(|c| SizedWord {
            text: c.word.clone(),
            size: params.strategy.size_for(c.count, max, params.scale),
        })
        .collect()
}
