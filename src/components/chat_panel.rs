//! Chat panel: launcher bubble and the expandable conversation card.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ChatPanel` is mounted per widget instance. It owns the session signal,
//! so unmounting the panel disposes the conversation; an in-flight request
//! that resolves afterwards finds the signal gone and is dropped.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;

use crate::components::composer::Composer;
use crate::components::turn_bubble::TurnBubble;
use crate::config::WidgetConfig;
use crate::state::chat::ChatSession;
use crate::state::conversation::Turn;

pub const PANEL_TITLE: &str = "AI Assistant";
pub const POWERED_BY: &str = "Powered by Google Gemini";

/// Root view of an embedded widget.
#[component]
pub fn ChatPanel(config: WidgetConfig) -> impl IntoView {
    let chat = RwSignal::new(ChatSession::new());
    let config = StoredValue::new(config);
    let is_open = Memo::new(move |_| chat.with(ChatSession::is_open));

    let send = Callback::new(move |()| {
        if !chat.with_untracked(ChatSession::can_send) {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let client = crate::net::gemini::GeminiClient::browser();
            let config = config.get_value();
            let outcome = crate::state::chat::submit_turn(&chat, &client, &config).await;
            log::debug!("turn finished: {outcome:?}");
        });
        #[cfg(not(feature = "csr"))]
        log::debug!("no browser transport; dropping turn for {}", config.with_value(|c| c.model().to_owned()));
    });

    view! {
        <div class="gw-widget">
            {move || {
                if is_open.get() {
                    view! { <ChatCard chat=chat on_send=send/> }.into_any()
                } else {
                    view! {
                        <button
                            class="gw-launcher"
                            type="button"
                            aria-label="Open chat"
                            on:click=move |_| chat.update(ChatSession::open)
                        >
                            <ChatIcon/>
                        </button>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// Expanded card: header, scrollable turn list, error banner, composer, footer.
#[component]
fn ChatCard(chat: RwSignal<ChatSession>, on_send: Callback<()>) -> impl IntoView {
    let turns = Memo::new(move |_| chat.with(|s| s.conversation().turns().to_vec()));
    let generating = Memo::new(move |_| chat.with(ChatSession::is_generating));
    let last_error = Memo::new(move |_| chat.with(|s| s.last_error().map(str::to_owned)));
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest turn in view.
    Effect::new(move || {
        turns.track();
        generating.track();
        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="gw-card">
            <div class="gw-card__header">
                <span class="gw-card__title">{PANEL_TITLE}</span>
                <button
                    class="gw-card__close"
                    type="button"
                    aria-label="Close chat"
                    on:click=move |_| chat.update(ChatSession::close)
                >
                    "\u{2715}"
                </button>
            </div>

            <div class="gw-card__messages" node_ref=messages_ref>
                {move || turns.with(Vec::is_empty).then(|| view! { <div class="gw-card__empty">{empty_hint()}</div> })}
                <For each=move || turns.get() key=|turn: &Turn| turn.id().to_owned() let:turn>
                    <TurnBubble turn=turn/>
                </For>
                {move || generating.get().then(|| view! { <div class="gw-card__thinking">"Thinking..."</div> })}
            </div>

            <div class="gw-card__footer">
                {move || last_error.get().map(|message| view! { <div class="gw-card__error">{message}</div> })}
                <Composer chat=chat on_send=on_send/>
                <div class="gw-card__credit">{POWERED_BY}</div>
            </div>
        </div>
    }
}

/// Message-circle glyph for the launcher.
#[component]
fn ChatIcon() -> impl IntoView {
    view! {
        <svg
            class="gw-launcher__icon"
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            <path d="M7.9 20A9 9 0 1 0 4 16.1L2 22Z"></path>
        </svg>
    }
}

fn empty_hint() -> &'static str {
    "Ask me anything to get started."
}
