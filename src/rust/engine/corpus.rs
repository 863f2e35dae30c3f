//! Built-in training corpora.

use crate::classifier::LabeledExample;

/// Complaint reports with their category and severity.
const REPORTS: [(&str, &str, &str); 10] = [
    ("pothole on the main road causing traffic", "Roads", "HIGH"),
    ("broken street light near my house", "Electricity", "MEDIUM"),
    ("water leakage from the large underground main pipe", "Water", "HIGH"),
    ("no water supply in our residential block for 3 days", "Water", "CRITICAL"),
    ("huge garbage heap is not cleared for over 10 days", "Waste", "HIGH"),
    ("medical waste dumped in the park", "Health", "CRITICAL"),
    ("industrial chemical runoff is contaminating the local stream", "Health", "CRITICAL"),
    ("sewage overflowing onto the sidewalk", "Waste", "CRITICAL"),
    ("street surface is uneven and dangerous for bikers", "Roads", "MEDIUM"),
    ("no power since yesterday transformer blast", "Electricity", "CRITICAL"),
];

const CHAT_MESSAGES: [(&str, &str); 10] = [
    ("i am very angry about this road condition", "ANGRY"),
    ("this is unacceptable and frustrating", "ANGRY"),
    ("I am extremely worried about my kids health", "WORRIED"),
    ("there is a dangerous wire hanging help me", "WORRIED"),
    ("thank you for the help i want to contribute", "HELPFUL"),
    ("how can i report a new issue here", "NEUTRAL"),
    ("just checking the status of my report", "NEUTRAL"),
    ("the water smells bad and i am scared for my family", "WORRIED"),
    ("fix this immediately this is peak corruption", "ANGRY"),
    ("happy to see the progress in our city", "HELPFUL"),
];

/// Report texts labeled with their category.
pub fn category_examples() -> Vec<LabeledExample> {
    REPORTS
        .iter()
        .map(|&(text, category, _)| LabeledExample::new(text, category))
        .collect()
}

/// The same report texts labeled with their severity.
pub fn severity_examples() -> Vec<LabeledExample> {
    REPORTS
        .iter()
        .map(|&(text, _, severity)| LabeledExample::new(text, severity))
        .collect()
}

/// Chat messages labeled with their emotion.
pub fn emotion_examples() -> Vec<LabeledExample> {
    CHAT_MESSAGES
        .iter()
        .map(|&(text, emotion)| LabeledExample::new(text.to_lowercase(), emotion))
        .collect()
}
