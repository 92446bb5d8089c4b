//! Attach/detach state machine for one embedded widget instance.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host element calls [`Lifecycle::on_attach`] when it is inserted into a
//! document and [`Lifecycle::on_detach`] when it is removed. Attach builds an
//! isolated root, injects the widget styles, and mounts a fresh chat panel;
//! detach unmounts the panel and releases everything it owned.
//!
//! DESIGN
//! ======
//! Rendering primitives sit behind [`RenderHost`] so the state machine runs
//! natively in tests. Each [`EmbeddableMount`] owns its host and panel, so
//! instances on the same page never share state.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use super::{MountError, WIDGET_CSS};
use crate::config::WidgetConfig;

/// Two-hook lifecycle exposed to the embedding platform.
pub trait Lifecycle {
    /// Build the isolated root and mount a fresh panel with `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`MountError`] if the root, styles, or panel could not be
    /// created; the instance stays detached.
    fn on_attach(&mut self, config: WidgetConfig) -> Result<(), MountError>;

    /// Unmount the panel and release its resources. No-op when detached.
    fn on_detach(&mut self);
}

/// Platform rendering primitives used by [`EmbeddableMount`].
pub trait RenderHost {
    /// Style/DOM boundary scoped to one instance.
    type Root;
    /// Handle to a mounted panel; dropping or unmounting it tears the panel down.
    type Panel;

    /// Create (or reset) the isolated root for this instance.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::IsolatedRoot`] if the platform refuses.
    fn create_isolated_root(&mut self) -> Result<Self::Root, MountError>;

    /// Add `css` to `root` so it applies only inside the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::Dom`] if the style node cannot be inserted.
    fn inject_styles(&mut self, root: &Self::Root, css: &str) -> Result<(), MountError>;

    /// Mount a new chat panel inside `root`.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::Dom`] if the container cannot be created.
    fn mount_panel(&mut self, root: &Self::Root, config: WidgetConfig) -> Result<Self::Panel, MountError>;

    /// Tear down `panel` and clear `root`.
    fn unmount_panel(&mut self, root: &Self::Root, panel: Self::Panel);
}

/// Lifecycle phase of an embedded instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountPhase {
    Detached,
    Attached,
}

struct Attached<H: RenderHost> {
    root: H::Root,
    panel: H::Panel,
    config: WidgetConfig,
}

/// One embedded widget instance.
pub struct EmbeddableMount<H: RenderHost> {
    host: H,
    attached: Option<Attached<H>>,
}

impl<H: RenderHost> EmbeddableMount<H> {
    pub fn new(host: H) -> Self {
        Self { host, attached: None }
    }

    #[must_use]
    pub fn phase(&self) -> MountPhase {
        if self.attached.is_some() { MountPhase::Attached } else { MountPhase::Detached }
    }

    /// Config captured by the current attach, if any.
    #[must_use]
    pub fn config(&self) -> Option<&WidgetConfig> {
        self.attached.as_ref().map(|a| &a.config)
    }

    /// Currently mounted panel, if any.
    #[must_use]
    pub fn panel(&self) -> Option<&H::Panel> {
        self.attached.as_ref().map(|a| &a.panel)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: RenderHost> Lifecycle for EmbeddableMount<H> {
    fn on_attach(&mut self, config: WidgetConfig) -> Result<(), MountError> {
        if self.attached.is_some() {
            log::warn!("attach ignored: widget already attached");
            return Ok(());
        }

        let root = self.host.create_isolated_root()?;
        self.host.inject_styles(&root, WIDGET_CSS)?;
        let panel = self.host.mount_panel(&root, config.clone())?;

        log::info!("widget attached: {config:?}");
        self.attached = Some(Attached { root, panel, config });
        Ok(())
    }

    fn on_detach(&mut self) {
        let Some(Attached { root, panel, .. }) = self.attached.take() else {
            return;
        };
        self.host.unmount_panel(&root, panel);
        log::info!("widget detached");
    }
}

impl<H: RenderHost> Drop for EmbeddableMount<H> {
    fn drop(&mut self) {
        self.on_detach();
    }
}
