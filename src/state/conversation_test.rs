use super::*;

#[test]
fn new_conversation_is_empty() {
    let log = Conversation::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert!(log.last().is_none());
}

#[test]
fn push_preserves_insertion_order() {
    let mut log = Conversation::new();
    log.push(Role::User, "Hi");
    log.push(Role::Assistant, "Hello");
    log.push(Role::User, "How are you?");

    let summary: Vec<(Role, &str)> = log.iter().map(|t| (t.role(), t.content())).collect();
    assert_eq!(
        summary,
        vec![(Role::User, "Hi"), (Role::Assistant, "Hello"), (Role::User, "How are you?")]
    );
}

#[test]
fn push_returns_the_new_turn() {
    let mut log = Conversation::new();
    let id = log.push(Role::Assistant, "| a | b |\n|---|---|").id().to_owned();
    assert_eq!(log.last().map(Turn::id), Some(id.as_str()));
}

#[test]
fn turn_ids_are_unique() {
    let mut log = Conversation::new();
    log.push(Role::User, "same");
    log.push(Role::User, "same");
    assert_ne!(log.turns()[0].id(), log.turns()[1].id());
}

#[test]
fn content_is_stored_verbatim() {
    let mut log = Conversation::new();
    log.push(Role::User, "  padded\n");
    assert_eq!(log.turns()[0].content(), "  padded\n");
}

#[test]
fn role_names() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Assistant.as_str(), "assistant");
}

#[test]
fn borrowed_into_iter_walks_turns() {
    let mut log = Conversation::new();
    log.push(Role::User, "a");
    log.push(Role::Assistant, "b");
    let mut count = 0;
    for turn in &log {
        assert!(!turn.content().is_empty());
        count += 1;
    }
    assert_eq!(count, 2);
}
