//! `<gemini-chat-widget>` custom element for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! A tiny JS shim subclasses `HTMLElement` and forwards the connected and
//! disconnected callbacks to Rust. Each element instance gets an id stored as
//! an expando property; the id keys a thread-local registry of
//! [`EmbeddableMount`]s so every element owns an independent shadow root and
//! chat panel.
//!
//! Moving an element within the document fires disconnect then connect, which
//! rebuilds the widget from scratch.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

use super::MountError;
use super::lifecycle::{EmbeddableMount, Lifecycle, RenderHost};
use crate::components::chat_panel::ChatPanel;
use crate::config::{ATTR_API_KEY, ATTR_MODEL, ELEMENT_TAG, WidgetConfig};

const INSTANCE_KEY: &str = "__geminiWidgetId";

#[wasm_bindgen(inline_js = r#"
export function define_widget_element(tag, onConnect, onDisconnect) {
    if (customElements.get(tag)) {
        return false;
    }
    class GeminiChatWidget extends HTMLElement {
        connectedCallback() { onConnect(this); }
        disconnectedCallback() { onDisconnect(this); }
    }
    customElements.define(tag, GeminiChatWidget);
    return true;
}
"#)]
extern "C" {
    #[wasm_bindgen(catch)]
    fn define_widget_element(
        tag: &str,
        on_connect: &Closure<dyn FnMut(HtmlElement)>,
        on_disconnect: &Closure<dyn FnMut(HtmlElement)>,
    ) -> Result<bool, JsValue>;
}

thread_local! {
    static MOUNTS: RefCell<HashMap<u32, EmbeddableMount<ShadowHost>>> = RefCell::new(HashMap::new());
    static NEXT_ID: Cell<u32> = const { Cell::new(1) };
}

/// Register the custom element. Returns `Ok(false)` if the tag already exists.
///
/// # Errors
///
/// Returns [`MountError::Dom`] if `customElements.define` throws.
pub fn define() -> Result<bool, MountError> {
    let on_connect = Closure::<dyn FnMut(HtmlElement)>::new(handle_connected);
    let on_disconnect = Closure::<dyn FnMut(HtmlElement)>::new(handle_disconnected);
    let defined = define_widget_element(ELEMENT_TAG, &on_connect, &on_disconnect).map_err(js_err)?;
    if defined {
        // The element class holds these for the lifetime of the page.
        on_connect.forget();
        on_disconnect.forget();
    }
    Ok(defined)
}

fn handle_connected(element: HtmlElement) {
    let id = instance_id(&element);
    let config = WidgetConfig::from_attributes(element.get_attribute(ATTR_API_KEY), element.get_attribute(ATTR_MODEL));
    if !config.has_api_key() {
        log::warn!("<{ELEMENT_TAG}> has no {ATTR_API_KEY}; requests will fail");
    }

    MOUNTS.with(|mounts| {
        let mut mounts = mounts.borrow_mut();
        let mount = mounts
            .entry(id)
            .or_insert_with(|| EmbeddableMount::new(ShadowHost::new(element)));
        if let Err(e) = mount.on_attach(config) {
            log::warn!("widget {id} failed to attach: {e}");
        }
    });
}

fn handle_disconnected(element: HtmlElement) {
    let id = instance_id(&element);
    // Remove first so teardown runs without the registry borrowed.
    let removed = MOUNTS.with(|mounts| mounts.borrow_mut().remove(&id));
    if let Some(mut mount) = removed {
        mount.on_detach();
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn instance_id(element: &HtmlElement) -> u32 {
    let key = JsValue::from_str(INSTANCE_KEY);
    if let Ok(value) = js_sys::Reflect::get(element, &key)
        && let Some(id) = value.as_f64()
    {
        return id as u32;
    }
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    if let Err(e) = js_sys::Reflect::set(element, &key, &JsValue::from(id)) {
        log::warn!("could not tag widget element: {e:?}");
    }
    id
}

fn js_err(e: JsValue) -> MountError {
    MountError::Dom(format!("{e:?}"))
}

// =============================================================================
// SHADOW ROOT HOST
// =============================================================================

/// [`RenderHost`] backed by the element's open shadow root.
pub struct ShadowHost {
    element: HtmlElement,
}

impl ShadowHost {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl RenderHost for ShadowHost {
    type Root = ShadowRoot;
    type Panel = Box<dyn Any>;

    fn create_isolated_root(&mut self) -> Result<ShadowRoot, MountError> {
        // A shadow root cannot be detached, so a re-attach reuses and clears it.
        if let Some(root) = self.element.shadow_root() {
            root.set_inner_html("");
            return Ok(root);
        }
        self.element
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(|e| MountError::IsolatedRoot(format!("{e:?}")))
    }

    fn inject_styles(&mut self, root: &ShadowRoot, css: &str) -> Result<(), MountError> {
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| MountError::Dom("element has no document".to_owned()))?;
        let style = document.create_element("style").map_err(js_err)?;
        style.set_text_content(Some(css));
        root.append_child(&style).map_err(js_err)?;
        Ok(())
    }

    fn mount_panel(&mut self, root: &ShadowRoot, config: WidgetConfig) -> Result<Box<dyn Any>, MountError> {
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| MountError::Dom("element has no document".to_owned()))?;
        let container = document
            .create_element("div")
            .map_err(js_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| MountError::Dom("container is not an HtmlElement".to_owned()))?;
        container.set_class_name("gw-root");
        root.append_child(&container).map_err(js_err)?;

        let handle = leptos::mount::mount_to(container, move || view! { <ChatPanel config=config/> }.into_any());
        Ok(Box::new(handle))
    }

    fn unmount_panel(&mut self, root: &ShadowRoot, panel: Box<dyn Any>) {
        // Dropping the handle unmounts the view and disposes its reactive owner.
        drop(panel);
        root.set_inner_html("");
    }
}
