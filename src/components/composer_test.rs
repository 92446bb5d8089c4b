use super::*;

#[test]
fn enter_submits() {
    assert!(submits_on_key("Enter", false));
}

#[test]
fn shift_enter_does_not_submit() {
    assert!(!submits_on_key("Enter", true));
}

#[test]
fn other_keys_do_not_submit() {
    assert!(!submits_on_key("a", false));
    assert!(!submits_on_key("Escape", false));
    assert!(!submits_on_key("NumpadEnter", false));
}
