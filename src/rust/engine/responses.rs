use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of randomness for reply selection.
///
/// Implementations are shared between request handlers and must be safe to
/// call concurrently.
pub trait ReplySource: Send + Sync + std::fmt::Debug {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Draws from the calling thread's RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl ReplySource for ThreadRngSource {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// A reproducible source: a seeded ChaCha20 stream behind a mutex.
#[derive(Debug)]
pub struct SeededReplySource {
    rng: Mutex<ChaCha20Rng>,
}

impl SeededReplySource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl ReplySource for SeededReplySource {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Canned replies keyed by emotion label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl ResponseCatalog {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// The tactical replies for ANGRY, WORRIED, HELPFUL and NEUTRAL.
    pub fn tactical() -> Self {
        let entries = [
            (
                "ANGRY",
                [
                    "I understand your frustration. We are prioritizing high-impact issues to ensure accountability.",
                    "Your concerns are valid. The administration is working to resolve such critical failures immediately.",
                    "I hear you. Every report you file helps us put pressure on the right departments.",
                ],
            ),
            (
                "WORRIED",
                [
                    "Your safety is our priority. Please ensure you are at a safe distance from the issue.",
                    "We have logged your concern with high priority. Stay calm, the alert has been dispatched.",
                    "I understand this is concerning. We are tracking this in real-time to prevent any accidents.",
                ],
            ),
            (
                "HELPFUL",
                [
                    "Thank you for being a responsible citizen! Together we can make our city better.",
                    "Great to see your involvement. Your detailed reports make the resolution process faster.",
                    "Appreciate the positive energy! Feel free to report anything else you notice.",
                ],
            ),
            (
                "NEUTRAL",
                [
                    "I can help you with reporting issues, checking status, or navigating the platform.",
                    "Please provide the details of the issue, and I will help you categorize it.",
                    "You can find all your submitted issues in the 'My Intel' section.",
                ],
            ),
        ]
        .into_iter()
        .map(|(label, replies)| {
            (
                label.to_string(),
                replies.iter().map(|r| r.to_string()).collect(),
            )
        })
        .collect();
        Self { entries }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn replies(&self, label: &str) -> Option<&[String]> {
        self.entries.get(label).map(Vec::as_slice)
    }
}

/// Picks a reply for an emotion label, uniformly at random.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    catalog: ResponseCatalog,
    source: Arc<dyn ReplySource>,
}

impl ResponseSelector {
    pub fn new(catalog: ResponseCatalog, source: Arc<dyn ReplySource>) -> Self {
        Self { catalog, source }
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    /// Draws one of the replies listed for `label`.
    ///
    /// # Panics
    /// If `label` has no replies. The engine checks at assembly time that
    /// every emotion label has a non-empty entry, so this indicates the label
    /// sets have drifted apart.
    pub fn select_reply(&self, label: &str) -> &str {
        match self.catalog.replies(label) {
            Some(replies) if !replies.is_empty() => &replies[self.source.pick(replies.len())],
            _ => panic!("no replies in the response catalog for emotion '{}'", label),
        }
    }
}
