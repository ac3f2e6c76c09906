//! The intake surface
//!
//! Captures drag, drop, paste and manual selection, normalizes the offered
//! files into a `FileBatch` and forwards it to a handler. Knows nothing about
//! record identifiers or ordering.

use super::chooser::{ChooserRequest, FileChooser};
use super::error::Result;
use super::events::{DragState, EventDisposition, EventKind, SurfaceEvent};
use super::region::{InteractionRegion, Listener, ListenerGuard};
use super::types::{FileBatch, FileHandle, IntakePolicy};
use crate::i18n::Translator;
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

/// Receives every accepted batch
pub trait BatchHandler {
    /// Called once per completed drop, paste or selection with at least one file
    fn on_files_accepted(&mut self, batch: FileBatch);
}

impl<F> BatchHandler for F
where
    F: FnMut(FileBatch),
{
    fn on_files_accepted(&mut self, batch: FileBatch) {
        self(batch);
    }
}

/// Display strings for the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLabels {
    /// Label of the button that opens the native chooser
    pub select_file: String,
    /// Label of the secondary "paste URL" action, when one is wired
    pub paste_url: Option<String>,
    /// Drag instruction line
    pub instructions: String,
}

type SharedHandler = Rc<RefCell<Box<dyn BatchHandler>>>;
type SharedAction = Rc<RefCell<Box<dyn FnMut()>>>;

/// A normalized batch detached from the surface, ready for its handler
struct Delivery {
    handler: SharedHandler,
    batch: FileBatch,
}

impl Delivery {
    /// Hand the batch over; the surface itself is not borrowed here
    fn deliver(self) -> bool {
        let Ok(mut handler) = self.handler.try_borrow_mut() else {
            tracing::warn!(files = self.batch.len(), "batch handler is still running; batch dropped");
            return false;
        };
        handler.on_files_accepted(self.batch);
        true
    }
}

/// Interaction state and policy for one intake region
pub struct IntakeSurface {
    policy: IntakePolicy,
    drag: DragState,
    handler: SharedHandler,
    paste_url: Option<SharedAction>,
}

impl IntakeSurface {
    /// Create a surface forwarding batches to `handler`
    pub fn new(policy: IntakePolicy, handler: impl BatchHandler + 'static) -> Self {
        let handler: Box<dyn BatchHandler> = Box::new(handler);
        Self {
            policy,
            drag: DragState::Idle,
            handler: Rc::new(RefCell::new(handler)),
            paste_url: None,
        }
    }

    /// Wire the secondary "paste a URL instead" action
    #[must_use]
    pub fn with_paste_url(mut self, action: impl FnMut() + 'static) -> Self {
        let action: Box<dyn FnMut()> = Box::new(action);
        self.paste_url = Some(Rc::new(RefCell::new(action)));
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle one region event
    ///
    /// Drag events are always intercepted so the region stays a valid drop
    /// target. A paste is intercepted only when it carries files; text pastes
    /// pass through to the platform.
    pub fn handle_event(&mut self, event: &SurfaceEvent) -> EventDisposition {
        let (disposition, delivery) = self.accept_event(event);
        if let Some(delivery) = delivery {
            delivery.deliver();
        }
        disposition
    }

    /// Update the drag state and normalize any files without calling the handler
    fn accept_event(&mut self, event: &SurfaceEvent) -> (EventDisposition, Option<Delivery>) {
        self.drag = self.drag.next(event.kind());

        match event {
            SurfaceEvent::DragEnter | SurfaceEvent::DragLeave | SurfaceEvent::DragOver => {
                (EventDisposition::Intercepted, None)
            }
            SurfaceEvent::Drop(files) => (EventDisposition::Intercepted, self.prepare(files.clone())),
            SurfaceEvent::Paste(payload) if payload.has_files() => {
                (EventDisposition::Intercepted, self.prepare(payload.files.clone()))
            }
            SurfaceEvent::Paste(_) => (EventDisposition::PassThrough, None),
        }
    }

    /// Open the native chooser and forward its result
    ///
    /// Returns whether a batch was delivered; a cancelled dialog delivers none.
    ///
    /// # Errors
    ///
    /// Returns an error if the chooser fails to produce file handles.
    pub fn select_files(&mut self, chooser: &mut dyn FileChooser) -> Result<bool> {
        let files = chooser.choose(&self.chooser_request())?;
        Ok(self.add_files(files))
    }

    /// Request handed to the native chooser
    #[must_use]
    pub fn chooser_request(&self) -> ChooserRequest {
        ChooserRequest {
            accept: self.policy.mime_types.accept_string(),
            multiple: self.policy.allow_multiple,
        }
    }

    #[must_use]
    pub fn has_paste_url(&self) -> bool {
        self.paste_url.is_some()
    }

    /// Fire the secondary action; bypasses file capture entirely
    pub fn trigger_paste_url(&mut self) -> bool {
        run_action(self.paste_url.clone())
    }

    /// Labels for the chooser button, paste-URL button and drag instructions
    pub fn labels(&self, translator: &dyn Translator) -> SurfaceLabels {
        SurfaceLabels {
            select_file: translator.t("upload:selectFile"),
            paste_url: self
                .paste_url
                .as_ref()
                .map(|_| translator.t("upload:pasteURL")),
            instructions: format!(
                "{} {}",
                translator.t("general:or"),
                translator.t("upload:dragAndDrop")
            ),
        }
    }

    fn replace_handler(&mut self, handler: Box<dyn BatchHandler>) {
        self.handler = Rc::new(RefCell::new(handler));
    }

    fn prepare(&self, files: Vec<FileHandle>) -> Option<Delivery> {
        let offered = files.len();
        let batch = FileBatch::normalize(files, self.policy.allow_multiple)?;
        tracing::debug!(offered, forwarded = batch.len(), "files accepted");
        Some(Delivery {
            handler: Rc::clone(&self.handler),
            batch,
        })
    }

    fn add_files(&mut self, files: Vec<FileHandle>) -> bool {
        self.prepare(files).is_some_and(Delivery::deliver)
    }
}

fn run_action(action: Option<SharedAction>) -> bool {
    let Some(action) = action else {
        return false;
    };
    let Ok(mut action) = action.try_borrow_mut() else {
        tracing::warn!("paste URL action is already running");
        return false;
    };
    (*action)();
    true
}

/// A surface bound to a region
///
/// Holds the listener registration for as long as it is mounted. Dropping it
/// (or calling [`MountedSurface::unmount`]) removes every listener it added.
pub struct MountedSurface {
    surface: Rc<RefCell<IntakeSurface>>,
    region: InteractionRegion,
    guard: Option<ListenerGuard>,
}

impl MountedSurface {
    /// Register the surface's listeners on `region`
    #[must_use]
    pub fn mount(surface: IntakeSurface, region: &InteractionRegion) -> Self {
        let surface = Rc::new(RefCell::new(surface));
        let guard = region.register(Self::listeners(&surface));

        Self {
            surface,
            region: region.clone(),
            guard: Some(guard),
        }
    }

    fn listeners(surface: &Rc<RefCell<IntakeSurface>>) -> Vec<(EventKind, Listener)> {
        EventKind::ALL
            .iter()
            .map(|kind| {
                let weak: Weak<RefCell<IntakeSurface>> = Rc::downgrade(surface);
                let listener: Listener = Rc::new(move |event: &SurfaceEvent| {
                    let Some(surface) = weak.upgrade() else {
                        return EventDisposition::PassThrough;
                    };
                    // The borrow ends before the handler runs, so handlers may use the surface
                    let (disposition, delivery) = surface.borrow_mut().accept_event(event);
                    if let Some(delivery) = delivery {
                        delivery.deliver();
                    }
                    disposition
                });
                (*kind, listener)
            })
            .collect()
    }

    fn rebind(&mut self) {
        // Old listeners must be gone before the new set is added
        self.guard = None;
        self.guard = Some(self.region.register(Self::listeners(&self.surface)));
    }

    /// Swap the forwarding handler, re-registering all listeners
    pub fn replace_handler(&mut self, handler: impl BatchHandler + 'static) {
        self.surface.borrow_mut().replace_handler(Box::new(handler));
        self.rebind();
    }

    /// Swap the intake policy, re-registering all listeners
    pub fn set_policy(&mut self, policy: IntakePolicy) {
        self.surface.borrow_mut().policy = policy;
        self.rebind();
    }

    /// Open the native chooser through the mounted surface
    ///
    /// # Errors
    ///
    /// Returns an error if the chooser fails to produce file handles.
    pub fn select_files(&self, chooser: &mut dyn FileChooser) -> Result<bool> {
        let request = self.surface.borrow().chooser_request();
        let files = chooser.choose(&request)?;
        let delivery = self.surface.borrow().prepare(files);
        Ok(delivery.is_some_and(Delivery::deliver))
    }

    /// Fire the secondary "paste URL" action
    pub fn trigger_paste_url(&self) -> bool {
        let action = self.surface.borrow().paste_url.clone();
        run_action(action)
    }

    #[must_use]
    pub fn surface(&self) -> Ref<'_, IntakeSurface> {
        self.surface.borrow()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.surface.borrow().drag_state()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.guard.is_some()
    }

    /// Remove every listener this surface registered
    pub fn unmount(mut self) {
        self.guard = None;
    }
}
