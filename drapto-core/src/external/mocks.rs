// ============================================================================
// drapto-core/src/external/mocks.rs
// ============================================================================
//
// TEST FAKES FOR EXTERNAL COLLABORATORS
//
// Fakes for `Transcoder`, `CrfSearchHelper`, and `LanguageClassifier`,
// queue-driven so a test can script a sequence of responses (including
// failures) without spawning any real process. Mirrors the teacher's
// expectation-queue shape (`MockFfmpegSpawner`/`MockFfprobeExecutor`) applied
// to the spec's collaborators.
//
// AI-ASSISTANT-INFO: test fakes for Transcoder/CrfSearchHelper/LanguageClassifier

use std::cell::RefCell;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::language::{ClassificationResult, LanguageClassifier};

use super::{CrfSearchHelper, CrfSearchResult, Transcoder, TranscodeOutcome};

/// A queue-driven fake `Transcoder`. Each call to `run` pops the next queued
/// result; panics if the queue is exhausted.
pub struct FakeTranscoder {
    responses: RefCell<Vec<CoreResult<TranscodeOutcome>>>,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl FakeTranscoder {
    pub fn new(responses: Vec<CoreResult<TranscodeOutcome>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn always_succeeding(output_size_bytes: u64) -> Self {
        Self::new(vec![Ok(TranscodeOutcome {
            output_path: std::path::PathBuf::from("out.mkv"),
            output_size_bytes,
        })])
    }
}

impl Transcoder for FakeTranscoder {
    fn run(
        &self,
        _input: &Path,
        output: &Path,
        args: &[String],
        _duration_secs: f64,
    ) -> CoreResult<TranscodeOutcome> {
        self.calls.borrow_mut().push(args.to_vec());
        if self.responses.borrow().is_empty() {
            panic!("FakeTranscoder: response queue exhausted");
        }
        self.responses.borrow_mut().remove(0).map(|mut outcome| {
            outcome.output_path = output.to_path_buf();
            outcome
        })
    }
}

/// A queue-driven fake `CrfSearchHelper`.
pub struct FakeCrfSearchHelper {
    responses: RefCell<Vec<CoreResult<CrfSearchResult>>>,
}

impl FakeCrfSearchHelper {
    pub fn new(responses: Vec<CoreResult<CrfSearchResult>>) -> Self {
        Self { responses: RefCell::new(responses) }
    }

    pub fn always_returning(crf: u32, encoded_percent: f64) -> Self {
        Self::new(vec![Ok(CrfSearchResult { crf, encoded_percent })])
    }

    pub fn always_exhausted() -> Self {
        Self::new(vec![Err(CoreError::ToolMissing("crf-search".to_string()))])
    }
}

impl CrfSearchHelper for FakeCrfSearchHelper {
    fn search(
        &self,
        _input: &Path,
        _encoder: &str,
        _sample_every_secs: u32,
        _max_encoded_percent: u8,
        _min_vmaf: u8,
    ) -> CoreResult<CrfSearchResult> {
        if self.responses.borrow().is_empty() {
            panic!("FakeCrfSearchHelper: response queue exhausted");
        }
        self.responses.borrow_mut().remove(0)
    }
}

/// A fixed-response fake `LanguageClassifier`, distinct from `language::tests`'s
/// queue-based fake: this one always returns the same classification,
/// convenient for pre_encode stream-selection tests that don't care about
/// sampling behavior.
pub struct FakeLanguageClassifier {
    pub language: String,
    pub confidence: f32,
}

impl LanguageClassifier for FakeLanguageClassifier {
    fn classify(&self, _path: &Path, _offset_secs: f64, _duration_secs: f64) -> CoreResult<ClassificationResult> {
        Ok(ClassificationResult {
            language: self.language.clone(),
            confidence: self.confidence,
        })
    }
}
