#![allow(dead_code)]

use inverted_wordles::answers::{AnswerFile, AnswerRecord};
use inverted_wordles::error::{WordleError, WordleResult};
use inverted_wordles::layout::{Canvas, PackConfig, Packer, PlacedWord};
use inverted_wordles::render::Renderer;
use inverted_wordles::sizing::SizedWord;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Builds a payload from `(submitter, answers)` pairs, keeping their order.
pub fn payload(records: &[(&str, &[&str])]) -> AnswerFile {
    AnswerFile::from_records(records.iter().map(|(id, answers)| {
        (
            id.to_string(),
            AnswerRecord {
                answers: answers.iter().map(|a| a.to_string()).collect(),
            },
        )
    }))
}

/// Packer that places a scripted number of words per call (all of them once the script
/// runs out) and remembers the sizes it was asked for.
#[derive(Clone, Default)]
pub struct ScriptedPacker {
    script: Vec<usize>,
    pub calls: Rc<RefCell<Vec<Vec<f64>>>>,
}

impl ScriptedPacker {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            calls: Rc::default(),
        }
    }

    pub fn places_everything() -> Self {
        Self::new(vec![])
    }

    /// Never manages to place more than `n` words.
    pub fn capped(n: usize) -> Self {
        Self::new(vec![n; 64])
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Packer for ScriptedPacker {
    fn pack(&mut self, config: &PackConfig<'_>, words: &[SizedWord]) -> Vec<PlacedWord> {
        let call = self.calls.borrow().len();
        self.calls
            .borrow_mut()
            .push(words.iter().map(|w| (config.font_size)(w)).collect());

        let keep = self.script.get(call).copied().unwrap_or(words.len());
        words
            .iter()
            .take(keep)
            .map(|w| PlacedWord {
                text: w.text.clone(),
                size: (config.font_size)(w),
                x: 0.0,
                y: 0.0,
                rotate: 0.0,
            })
            .collect()
    }
}

/// Renderer that keeps every frame it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Vec<PlacedWord>>,
    pub clears: usize,
    pub canvas: Option<Canvas>,
}

impl RecordingRenderer {
    pub fn last_frame(&self) -> Option<&Vec<PlacedWord>> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw(&mut self, canvas: Canvas, words: &[PlacedWord], _font: &str) -> WordleResult<()> {
        self.clear();
        self.canvas = Some(canvas);
        self.frames.push(words.to_vec());
        Ok(())
    }
}

/// Answer source whose payload the test swaps at will; `None` makes fetches fail.
#[derive(Clone, Default)]
pub struct MockSource {
    pub payload: Arc<Mutex<Option<AnswerFile>>>,
    pub calls: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn serving(file: AnswerFile) -> Self {
        let source = Self::default();
        source.set(Some(file));
        source
    }

    pub fn set(&self, file: Option<AnswerFile>) {
        *self.payload.lock().unwrap() = file;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl inverted_wordles::client::AnswerSource for MockSource {
    fn fetch(&self) -> impl Future<Output = WordleResult<AnswerFile>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.payload.lock().unwrap().clone() {
            Some(file) => Ok(file),
            None => Err(WordleError::Status(503)),
        };
        async move { result }
    }

    fn describe(&self) -> String {
        "mock source".to_string()
    }
}

/// Answer source that always serves the same payload but takes its time: call `n` waits
/// `delays[n]` (`None` never completes), later calls answer at once. Start times are kept.
#[derive(Clone)]
pub struct PacedSource {
    file: AnswerFile,
    delays: Vec<Option<Duration>>,
    pub started: Arc<Mutex<Vec<Instant>>>,
}

impl PacedSource {
    pub fn new(file: AnswerFile, delays: Vec<Option<Duration>>) -> Self {
        Self {
            file,
            delays,
            started: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    /// Start times relative to `origin`, in whole seconds.
    pub fn start_secs(&self, origin: Instant) -> Vec<u64> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.duration_since(origin).as_secs())
            .collect()
    }
}

impl inverted_wordles::client::AnswerSource for PacedSource {
    fn fetch(&self) -> impl Future<Output = WordleResult<AnswerFile>> + Send {
        let mut started = self.started.lock().unwrap();
        let delay = self.delays.get(started.len()).copied().unwrap_or(Some(Duration::ZERO));
        started.push(Instant::now());
        let file = self.file.clone();
        async move {
            match delay {
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending::<()>().await,
            }
            Ok(file)
        }
    }

    fn describe(&self) -> String {
        "paced source".to_string()
    }
}
