pub mod fit;
pub mod spiral;

pub use self::fit::{FitController, FitOutcome, FitPolicy};
pub use self::spiral::SpiralPacker;

use crate::config::CanvasParams;
use crate::sizing::SizedWord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn diagonal(&self) -> f64 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

impl From<&CanvasParams> for Canvas {
    fn from(params: &CanvasParams) -> Self {
        Self::new(params.width, params.height)
    }
}

/// A word the packer managed to place. `x`/`y` are the word's centre relative to the
/// centre of the canvas; `rotate` is in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub text: String,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
}

/// Everything a packing primitive is configured with before it is started.
pub struct PackConfig<'a> {
    pub size: Canvas,
    pub padding: f64,
    pub font: &'a str,
    pub font_size: &'a dyn Fn(&SizedWord) -> f64,
}

/// A collision-avoiding word packer.
///
/// `pack` must complete synchronously: the returned vector is the final placed subset and
/// nothing is delivered after the call returns. [`FitController`] reads the result
/// immediately to decide whether to shrink and retry. A packer backed by an asynchronous
/// engine has to block on its completion inside `pack`.
///
/// Returning fewer words than given means the rest did not fit; that is a normal outcome.
pub trait Packer {
    fn pack(&mut self, config: &PackConfig<'_>, words: &[SizedWord]) -> Vec<PlacedWord>;
}

impl<P: Packer + ?Sized> Packer for &mut P {
    fn pack(&mut self, config: &PackConfig<'_>, words: &[SizedWord]) -> Vec<PlacedWord> {
        (**self).pack(config, words)
    }
}

fn word_size(word: &SizedWord) -> f64 {
    word.size
}

/// Adapter that configures a [`Packer`] the same way for every layout attempt.
pub struct LayoutEngine<P> {
    packer: P,
    padding: f64,
    font: String,
}

impl<P: Packer> LayoutEngine<P> {
    pub fn new(packer: P, padding: f64, font: impl Into<String>) -> Self {
        Self {
            packer,
            padding,
            font: font.into(),
        }
    }

    pub fn from_params(packer: P, params: &CanvasParams) -> Self {
        Self::new(packer, params.padding, params.font.clone())
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn packer_mut(&mut self) -> &mut P {
        &mut self.packer
    }

    pub fn place(&mut self, words: &[SizedWord], canvas: Canvas) -> Vec<PlacedWord> {
        let config = PackConfig {
            size: canvas,
            padding: self.padding,
            font: &self.font,
            font_size: &word_size,
        };
        self.packer.pack(&config, words)
    }
}
