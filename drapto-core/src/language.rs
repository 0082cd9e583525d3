// ============================================================================
// drapto-core/src/language.rs
// ============================================================================
//
// LANGUAGE DETECTOR COMPONENT (spec 4.2)
//
// Used only when a stream's container metadata lacks a language tag.
// Extracts a handful of short clips spread across the file (skipping the
// first and last 5%) and asks an external speech classifier to guess the
// language of each; the majority vote wins, ties go to the clip nearest the
// midpoint. Returns "unknown" when every clip is low-confidence.
//
// Mirrors the teacher's trait-per-collaborator pattern used for
// `FfprobeExecutor`/`Notifier`: a narrow trait abstracts the actual speech
// classifier so it can be faked in tests.
//
// AI-ASSISTANT-INFO: LanguageDetector component, spec section 4.2

use crate::error::CoreResult;

/// A single classification result from the external speech classifier.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub language: String,
    pub confidence: f32,
}

/// Abstraction over the external speech-classifier collaborator
/// (`classify(audio_blob, hints?) -> {language, confidence}` in spec 6).
pub trait LanguageClassifier {
    fn classify(&self, path: &std::path::Path, offset_secs: f64, duration_secs: f64) -> CoreResult<ClassificationResult>;
}

/// Below this confidence a clip's vote is discarded.
const LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Length, in seconds, of each sampled clip.
const CLIP_DURATION_SECS: f64 = 20.0;

/// Detects the dominant spoken language in `path` by sampling `samples`
/// clips evenly across the middle 90% of the file's duration.
pub fn detect_language(
    classifier: &dyn LanguageClassifier,
    path: &std::path::Path,
    duration_secs: f64,
    samples: usize,
) -> String {
    if duration_secs <= 0.0 || samples == 0 {
        return "unknown".to_string();
    }

    let usable_start = duration_secs * 0.05;
    let usable_end = duration_secs * 0.95;
    let usable_span = (usable_end - usable_start).max(0.0);

    let offsets: Vec<f64> = (0..samples)
        .map(|i| {
            if samples == 1 {
                usable_start + usable_span / 2.0
            } else {
                usable_start + usable_span * (i as f64) / ((samples - 1) as f64)
            }
        })
        .collect();

    let midpoint = duration_secs / 2.0;
    let mut votes: Vec<(String, f64)> = Vec::new(); // (language, distance_from_midpoint)

    for offset in offsets {
        let clip_duration = CLIP_DURATION_SECS.min(usable_span.max(1.0));
        match classifier.classify(path, offset, clip_duration) {
            Ok(result) if result.confidence >= LOW_CONFIDENCE_THRESHOLD => {
                votes.push((result.language, (offset - midpoint).abs()));
            }
            Ok(_) | Err(_) => continue,
        }
    }

    if votes.is_empty() {
        return "unknown".to_string();
    }

    majority_vote(votes)
}

fn majority_vote(votes: Vec<(String, f64)>) -> String {
    use std::collections::HashMap;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for (lang, _) in &votes {
        *counts.entry(lang.clone()).or_insert(0) += 1;
    }

    let max_count = *counts.values().max().unwrap_or(&0);
    let mut tied: Vec<&String> = counts
        .iter()
        .filter(|(_, count)| **count == max_count)
        .map(|(lang, _)| lang)
        .collect();
    tied.sort();

    if tied.len() == 1 {
        return tied[0].clone();
    }

    // Tie-break: the vote whose clip was nearest the file's midpoint.
    votes
        .iter()
        .filter(|(lang, _)| tied.contains(&lang))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .map(|(lang, _)| lang.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    struct FakeClassifier {
        responses: RefCell<Vec<ClassificationResult>>,
    }

    impl LanguageClassifier for FakeClassifier {
        fn classify(&self, _path: &Path, _offset: f64, _duration: f64) -> CoreResult<ClassificationResult> {
            Ok(self.responses.borrow_mut().remove(0))
        }
    }

    fn result(lang: &str, confidence: f32) -> ClassificationResult {
        ClassificationResult { language: lang.to_string(), confidence }
    }

    #[test]
    fn majority_language_wins() {
        let classifier = FakeClassifier {
            responses: RefCell::new(vec![result("eng", 0.9), result("eng", 0.9), result("spa", 0.9)]),
        };
        let lang = detect_language(&classifier, Path::new("x.mkv"), 300.0, 3);
        assert_eq!(lang, "eng");
    }

    #[test]
    fn all_low_confidence_yields_unknown() {
        let classifier = FakeClassifier {
            responses: RefCell::new(vec![result("eng", 0.1), result("spa", 0.2)]),
        };
        let lang = detect_language(&classifier, Path::new("x.mkv"), 300.0, 2);
        assert_eq!(lang, "unknown");
    }

    #[test]
    fn zero_duration_yields_unknown_without_classifying() {
        let classifier = FakeClassifier { responses: RefCell::new(vec![]) };
        let lang = detect_language(&classifier, Path::new("x.mkv"), 0.0, 3);
        assert_eq!(lang, "unknown");
    }
}
