use std::collections::HashSet;

use triage::{EngineConfig, IntelEngine};

fn init() {
    triage::init_logger();
}

fn engine() -> IntelEngine {
    init();
    IntelEngine::new(EngineConfig::default()).expect("Failed to build engine")
}

const CATEGORIES: [&str; 5] = ["Electricity", "Health", "Roads", "Waste", "Water"];
const SEVERITIES: [&str; 3] = ["CRITICAL", "HIGH", "MEDIUM"];

#[test]
fn test_water_outage_is_critical() {
    let engine = engine();
    let result = engine.classify_report("no water supply in our residential block for 3 days");
    assert_eq!(result.category, "Water");
    assert_eq!(result.severity, "CRITICAL");
}

#[test]
fn test_report_text_is_lower_cased() {
    let engine = engine();
    let result = engine.classify_report("NO WATER SUPPLY in our Residential Block for 3 days");
    assert_eq!(result.category, "Water");
    assert_eq!(result.severity, "CRITICAL");
}

#[test]
fn test_classification_is_deterministic() {
    let engine = engine();
    for text in ["garbage near the park", "", "light pole fell on the road"] {
        assert_eq!(engine.classify_report(text), engine.classify_report(text));
    }
}

#[test]
fn test_closed_label_sets() {
    let engine = engine();
    for text in [
        "",
        "sewage and chemical waste everywhere",
        "the bridge collapsed",
        "1234 5678",
        "transformer pothole water garbage",
    ] {
        let result = engine.classify_report(text);
        assert!(CATEGORIES.contains(&result.category.as_str()), "{}", result.category);
        assert!(SEVERITIES.contains(&result.severity.as_str()), "{}", result.severity);
    }
    assert_eq!(engine.category_classifier().labels(), CATEGORIES);
    assert_eq!(engine.severity_classifier().labels(), SEVERITIES);
}

#[test]
fn test_grateful_message_is_helpful() {
    let engine = engine();
    let reply = engine.respond_to_chat("thank you for the help i want to contribute");
    assert_eq!(reply.emotion, "HELPFUL");
    assert!(reply.confidence > 0.4);
    assert!(engine.catalog().replies("HELPFUL").unwrap().contains(&reply.reply));
}

#[test]
fn test_gibberish_falls_back_to_neutral() {
    let engine = engine();
    let reply = engine.respond_to_chat("blorpt zxqv flibbertigibbet");
    assert_eq!(reply.emotion, "NEUTRAL");
    assert!(reply.confidence <= 0.4);
    assert!(engine.catalog().replies("NEUTRAL").unwrap().contains(&reply.reply));
}

#[test]
fn test_low_signal_text_is_gated() {
    let engine = engine();
    for message in ["hello there friend", "asdf qwer my", "ok so"] {
        let reply = engine.respond_to_chat(message);
        assert!(
            reply.emotion == "NEUTRAL" || reply.confidence > 0.4,
            "{message:?} kept {} at {}",
            reply.emotion,
            reply.confidence
        );
        let replies = engine.catalog().replies(&reply.emotion).unwrap();
        assert!(replies.contains(&reply.reply));
    }
}

#[test]
fn test_init_logger_is_idempotent() {
    triage::init_logger();
    triage::init_logger();
}

#[test]
fn test_every_emotion_has_replies() {
    let engine = engine();
    let catalog = engine.catalog();
    for label in engine.emotion_classifier().labels() {
        assert!(!catalog.replies(label).unwrap().is_empty());
    }
}

#[test]
fn test_chat_reply_always_from_catalog() {
    let engine = engine();
    for message in [
        "i am very angry about this road condition",
        "there is a dangerous wire hanging help me",
        "how can i report a new issue here",
        "",
    ] {
        let reply = engine.respond_to_chat(message);
        let replies = engine.catalog().replies(&reply.emotion).unwrap();
        assert!(replies.contains(&reply.reply));
        assert!((0.0..=1.0).contains(&reply.confidence));
    }
}

#[test]
fn test_emotion_and_confidence_are_deterministic() {
    let engine = engine();
    let message = "fix this immediately this is peak corruption";
    let first = engine.respond_to_chat(message);
    for _ in 0..10 {
        let next = engine.respond_to_chat(message);
        assert_eq!(next.emotion, first.emotion);
        assert_eq!(next.confidence, first.confidence);
    }
}

#[test]
fn test_reply_variety() {
    let engine = engine();
    let replies: HashSet<String> = (0..200)
        .map(|_| engine.respond_to_chat("i am very angry about this road condition").reply)
        .collect();
    assert!(replies.len() > 1);
}

#[test]
fn test_seeded_replies_are_reproducible() {
    init();
    let config = EngineConfig {
        reply_seed: Some(11),
        ..EngineConfig::default()
    };
    let a = IntelEngine::new(config.clone()).unwrap();
    let b = IntelEngine::new(config).unwrap();
    for _ in 0..5 {
        assert_eq!(
            a.respond_to_chat("happy to see the progress in our city"),
            b.respond_to_chat("happy to see the progress in our city")
        );
    }
}

#[test]
fn test_strict_threshold_demotes_everything() {
    init();
    let engine = IntelEngine::new(EngineConfig {
        confidence_threshold: 1.0,
        ..EngineConfig::default()
    })
    .unwrap();
    let reply = engine.respond_to_chat("i am very angry about this road condition");
    assert_eq!(reply.emotion, "NEUTRAL");
}
