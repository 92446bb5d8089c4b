//! A single conversation turn rendered as a chat bubble.

#[cfg(test)]
#[path = "turn_bubble_test.rs"]
mod turn_bubble_test;

use leptos::prelude::*;

use crate::state::conversation::{Role, Turn};
use crate::util::clipboard;
use crate::util::markdown::render_markdown_html;

/// Bubble for one turn. User turns align right, assistant turns align left.
#[component]
pub fn TurnBubble(turn: Turn) -> impl IntoView {
    let role = turn.role();
    let rendered = render_markdown_html(turn.content());
    let raw = turn.content().to_owned();
    let copied = RwSignal::new(false);

    let on_copy = move |_| {
        if clipboard::copy_text(&raw) {
            copied.set(true);
        }
    };

    view! {
        <div class=row_class(role)>
            <div class=bubble_class(role)>
                <div class="gw-md" inner_html=rendered></div>
                {(role == Role::Assistant)
                    .then(|| {
                        view! {
                            <button class="gw-bubble__copy" type="button" title="Copy response" on:click=on_copy>
                                {move || copy_label(copied.get())}
                            </button>
                        }
                    })}
            </div>
        </div>
    }
}

fn row_class(role: Role) -> &'static str {
    match role {
        Role::User => "gw-turn gw-turn--user",
        Role::Assistant => "gw-turn gw-turn--assistant",
    }
}

fn bubble_class(role: Role) -> &'static str {
    match role {
        Role::User => "gw-bubble gw-bubble--user",
        Role::Assistant => "gw-bubble gw-bubble--assistant",
    }
}

fn copy_label(copied: bool) -> &'static str {
    if copied { "Copied" } else { "Copy" }
}
