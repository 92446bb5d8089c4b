use super::*;

#[test]
fn user_and_assistant_rows_align_oppositely() {
    assert_eq!(row_class(Role::User), "gw-turn gw-turn--user");
    assert_eq!(row_class(Role::Assistant), "gw-turn gw-turn--assistant");
}

#[test]
fn bubble_classes_distinguish_roles() {
    assert_ne!(bubble_class(Role::User), bubble_class(Role::Assistant));
    assert!(bubble_class(Role::User).ends_with("--user"));
}

#[test]
fn copy_label_reflects_state() {
    assert_eq!(copy_label(false), "Copy");
    assert_eq!(copy_label(true), "Copied");
}
