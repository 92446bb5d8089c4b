//! Prompt input row with the send button.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use leptos::prelude::*;

use crate::state::chat::ChatSession;

/// Input box bound to the session's input buffer.
///
/// Enter sends; Shift+Enter is ignored. The button is disabled while a
/// request is outstanding and shows a spinner instead of its label.
#[component]
pub fn Composer(chat: RwSignal<ChatSession>, on_send: Callback<()>) -> impl IntoView {
    let input = Memo::new(move |_| chat.with(|s| s.input().to_owned()));
    let generating = Memo::new(move |_| chat.with(ChatSession::is_generating));
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move || {
        if generating.get() {
            return;
        }
        #[cfg(feature = "csr")]
        {
            if let Some(el) = input_ref.get() {
                if let Err(e) = el.focus() {
                    log::debug!("composer focus failed: {e:?}");
                }
            }
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if submits_on_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            on_send.run(());
        }
    };

    view! {
        <div class="gw-composer">
            <input
                class="gw-composer__input"
                type="text"
                placeholder="Type your message..."
                node_ref=input_ref
                prop:value=move || input.get()
                on:input=move |ev| chat.update(|s| s.set_input(event_target_value(&ev)))
                on:keydown=on_keydown
            />
            <button
                class="gw-composer__send"
                type="button"
                aria-label="Send"
                disabled=move || generating.get()
                on:click=move |_| on_send.run(())
            >
                {move || {
                    if generating.get() {
                        view! { <span class="gw-spinner"></span> }.into_any()
                    } else {
                        view! { <span>"Send"</span> }.into_any()
                    }
                }}
            </button>
        </div>
    }
}

fn submits_on_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}
