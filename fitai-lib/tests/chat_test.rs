use fitai_lib::catalog;
use fitai_lib::chat::{self, reply_delay};
use fitai_lib::{ChatConversation, ChatError, ChatSettings, Responder, Role};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn create_conversation(settings: ChatSettings) -> ChatConversation {
    ChatConversation::new(&catalog::default_user(), Responder::default(), settings)
}

#[test]
fn test_nutrition_prompt_gets_scripted_reply() {
    let reply = chat::respond("What about nutrition?");
    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.content.starts_with("For your goal of losing 6 kg"));
    assert_eq!(
        reply.suggestions,
        vec!["Show meal ideas", "Track my nutrition", "Back to workout"]
    );
}

#[test]
fn test_unrecognized_prompt_gets_fallback() {
    let reply = chat::respond("asdf123");
    assert!(reply.content.starts_with("That's a great question!"));
    assert_eq!(
        reply.suggestions,
        vec!["Adjust my plan", "Show tomorrow's workout", "Give me a tip"]
    );
}

#[test]
fn test_lookup_is_exact() {
    let responder = Responder::default();
    let fallback = catalog::chat_fallback();
    // Case and punctuation differences miss the script
    assert_eq!(responder.reply_for("what about nutrition?"), &fallback);
    assert_eq!(responder.reply_for("What about nutrition"), &fallback);
    assert_ne!(responder.reply_for("Why this workout?"), &fallback);
    assert_ne!(responder.reply_for("Can I swap cardio for yoga?"), &fallback);
}

#[test]
fn test_conversation_starts_with_greeting() {
    let conversation = create_conversation(ChatSettings::default());
    let messages = conversation.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content.starts_with("Hi Emma!"));
    assert_eq!(
        conversation.latest_suggestions(),
        ["Start today's workout", "Show my plan", "Why this workout?"]
    );
    assert!(!conversation.is_typing());
}

#[test]
fn test_reply_waits_for_delay() {
    let mut conversation = create_conversation(ChatSettings {
        min_delay_ms: 1000,
        jitter_ms: 0,
    });
    let mut rng = StdRng::seed_from_u64(7);
    let now = Instant::now();

    let delay = conversation
        .send("What about nutrition?", now, &mut rng)
        .expect("send should succeed");
    assert_eq!(delay, Duration::from_millis(1000));
    assert!(conversation.is_typing());
    assert_eq!(conversation.messages().len(), 2);
    assert!(conversation.messages()[1].is_user());

    assert_eq!(conversation.poll(now + Duration::from_millis(999)), 0);
    assert!(conversation.is_typing());

    assert_eq!(conversation.poll(now + Duration::from_millis(1000)), 1);
    assert!(!conversation.is_typing());
    let reply = &conversation.messages()[2];
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(
        conversation.latest_suggestions(),
        ["Show meal ideas", "Track my nutrition", "Back to workout"]
    );
    assert_eq!(reply.id, "ai-3");
}

#[test]
fn test_blank_message_is_rejected() {
    let mut conversation = create_conversation(ChatSettings::default());
    let mut rng = StdRng::seed_from_u64(1);
    let result = conversation.send("   ", Instant::now(), &mut rng);
    assert_eq!(result, Err(ChatError::EmptyMessage));
    assert_eq!(conversation.messages().len(), 1);
    assert!(!conversation.is_typing());
}

#[test]
fn test_input_is_trimmed_before_lookup() {
    let mut conversation = create_conversation(ChatSettings {
        min_delay_ms: 0,
        jitter_ms: 0,
    });
    let mut rng = StdRng::seed_from_u64(3);
    let now = Instant::now();
    conversation
        .send("  Why this workout?  ", now, &mut rng)
        .expect("send should succeed");
    assert_eq!(conversation.messages()[1].content, "Why this workout?");
    conversation.poll(now);
    assert!(conversation.messages()[2]
        .content
        .starts_with("Great question! Today's Full Body Strength"));
}

#[test]
fn test_overlapping_sends_deliver_every_reply() {
    let mut conversation = create_conversation(ChatSettings {
        min_delay_ms: 1000,
        jitter_ms: 0,
    });
    let mut rng = StdRng::seed_from_u64(11);
    let now = Instant::now();
    conversation
        .send("What about nutrition?", now, &mut rng)
        .expect("send should succeed");
    conversation
        .send("asdf123", now + Duration::from_millis(100), &mut rng)
        .expect("send should succeed");

    assert_eq!(conversation.poll(now + Duration::from_millis(1050)), 1);
    assert!(conversation.is_typing());
    assert_eq!(conversation.poll(now + Duration::from_millis(1100)), 1);

    let ids: Vec<&str> = conversation.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["ai-1", "user-2", "user-3", "ai-4", "ai-5"]);
    assert_eq!(
        conversation.latest_suggestions(),
        ["Adjust my plan", "Show tomorrow's workout", "Give me a tip"]
    );
}

#[test]
fn test_dropping_conversation_discards_pending_reply() {
    let mut conversation = create_conversation(ChatSettings::default());
    let mut rng = StdRng::seed_from_u64(5);
    conversation
        .send("Why this workout?", Instant::now(), &mut rng)
        .expect("send should succeed");
    assert!(conversation.is_typing());
    drop(conversation);
}

#[test]
fn test_reply_delay_stays_in_range() {
    let settings = ChatSettings::default();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let delay = reply_delay(&settings, &mut rng);
        assert!(delay >= Duration::from_millis(1000));
        assert!(delay <= Duration::from_millis(1500));
    }
}

#[test]
fn test_reply_delay_saturates_instead_of_overflowing() {
    let settings = ChatSettings {
        min_delay_ms: u64::MAX,
        jitter_ms: 1,
    };
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        assert_eq!(reply_delay(&settings, &mut rng), Duration::from_millis(u64::MAX));
    }
}

#[test]
fn test_huge_delay_keeps_reply_pending() {
    let mut conversation = create_conversation(ChatSettings {
        min_delay_ms: u64::MAX,
        jitter_ms: 0,
    });
    let mut rng = StdRng::seed_from_u64(3);
    let now = Instant::now();

    conversation
        .send("What about nutrition?", now, &mut rng)
        .expect("send should not panic on a huge delay");
    assert!(conversation.is_typing());
    assert_eq!(conversation.poll(now + Duration::from_secs(3600)), 0);
    assert!(conversation.is_typing());
    assert_eq!(conversation.messages().len(), 2);
}
