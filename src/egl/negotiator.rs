// src/egl/negotiator.rs

//! The display-initialize → config-select → surface-create → context-create →
//! make-current pipeline.
//!
//! Five strictly ordered, individually fallible steps. Every failure is
//! terminal for the pipeline; the single non-terminal branch is the
//! window→pixmap fallback inside surface creation. The caller retries by
//! restarting the whole pipeline — there is no recovery transition back to an
//! earlier stage.

use log::{debug, error, info, warn};
use std::fmt;

use crate::config::RenderTargetRequest;

use super::api::{
    DisplayConnection, DrawSurface, EglApi, FramebufferConfig, FramebufferRequirements,
    NativeDisplayRef, NativePixmapRef, NativeWindowRef, RenderContext,
};
use super::error::{BringUpError, BringUpErrorKind, EglErrorCode};

/// Client API major version requested at context creation.
pub const CONTEXT_CLIENT_VERSION: i32 = 2;

/// Which native backing a surface ended up bound to.
///
/// A pixmap-backed surface is a valid pipeline outcome even though it cannot
/// be presented interactively; callers that care about presentation must
/// inspect this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceBacking {
    Window,
    Pixmap,
}

impl fmt::Display for SurfaceBacking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceBacking::Window => f.write_str("window"),
            SurfaceBacking::Pixmap => f.write_str("pixmap"),
        }
    }
}

/// Progress of one bring-up attempt. Advances monotonically; a failure at any
/// step transitions to the terminal `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationStage {
    Uninitialized,
    DisplayAcquired,
    ConfigSelected,
    SurfaceBound(SurfaceBacking),
    ContextCreated,
    Current,
    Failed(BringUpErrorKind),
}

/// The bound rendering target a successful bring-up yields.
///
/// Valid for use only because it was produced by a successful make-current:
/// the context is current for draw and read on the calling thread, paired
/// with a live surface on the same display connection its config was selected
/// from. All handles are process-lifetime resources; nothing here releases
/// them on drop.
#[derive(Debug, Clone, Copy)]
pub struct RenderContextHandle {
    display: DisplayConnection,
    config: FramebufferConfig,
    surface: DrawSurface,
    context: RenderContext,
    backing: SurfaceBacking,
    egl_version: (i32, i32),
}

impl RenderContextHandle {
    pub fn display(&self) -> DisplayConnection {
        self.display
    }

    pub fn config(&self) -> FramebufferConfig {
        self.config
    }

    pub fn surface(&self) -> DrawSurface {
        self.surface
    }

    pub fn context(&self) -> RenderContext {
        self.context
    }

    pub fn backing(&self) -> SurfaceBacking {
        self.backing
    }

    /// The (major, minor) version pair negotiated at display initialization.
    pub fn egl_version(&self) -> (i32, i32) {
        self.egl_version
    }
}

/// Drives the bring-up pipeline against an [`EglApi`] implementation.
pub struct Negotiator<A: EglApi> {
    api: A,
    wanted: FramebufferRequirements,
    stage: NegotiationStage,
}

impl<A: EglApi> Negotiator<A> {
    /// Negotiator with the default framebuffer requirements.
    pub fn new(api: A) -> Self {
        Self::with_requirements(api, FramebufferRequirements::default())
    }

    pub fn with_requirements(api: A, wanted: FramebufferRequirements) -> Self {
        Negotiator {
            api,
            wanted,
            stage: NegotiationStage::Uninitialized,
        }
    }

    /// The stage the most recent bring-up attempt reached.
    pub fn stage(&self) -> NegotiationStage {
        self.stage
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs the whole pipeline. `native_display`/`native_window` come from a
    /// surface provider; both absent is valid and means "negotiate against
    /// the implicit default display, expect the pixmap fallback".
    ///
    /// Blocking, single-threaded: on success the returned context is current
    /// on the calling thread.
    pub fn bring_up(
        &mut self,
        native_display: Option<NativeDisplayRef>,
        native_window: Option<NativeWindowRef>,
        request: &RenderTargetRequest,
    ) -> Result<RenderContextHandle, BringUpError> {
        self.stage = NegotiationStage::Uninitialized;
        debug!(
            "negotiating render target {}x{} (device {}, buffering '{}')",
            request.width,
            request.height,
            request.device.display(),
            request.buffering_mode
        );

        // Step 1: acquire the display connection and bind the client API.
        let display = match self.resolve_display(native_display) {
            Some(display) => display,
            None => return Err(self.fail(BringUpError::NoDisplay)),
        };
        let egl_version = match self.api.initialize(display) {
            Ok(version) => version,
            Err(code) => return Err(self.fail(BringUpError::InitFailed(code))),
        };
        if let Err(code) = self.api.bind_es_api() {
            return Err(self.fail(BringUpError::ApiBindFailed(code)));
        }
        self.stage = NegotiationStage::DisplayAcquired;
        info!(
            "display acquired, EGL version {}.{}",
            egl_version.0, egl_version.1
        );

        // Step 2: select a framebuffer configuration. The count query is a
        // capability probe only; its value does not feed the selection.
        let available = match self.api.config_count(display) {
            Ok(count) => count,
            Err(code) => return Err(self.fail(BringUpError::ConfigQueryFailed(code))),
        };
        debug!("display exposes {} framebuffer configuration(s)", available);
        let config = match self.api.choose_config(display, &self.wanted) {
            Ok(Some(config)) => config,
            Ok(None) => return Err(self.fail(BringUpError::NoMatchingConfig)),
            Err(code) => {
                warn!("eglChooseConfig failed - {}", code.describe());
                return Err(self.fail(BringUpError::NoMatchingConfig));
            }
        };
        self.stage = NegotiationStage::ConfigSelected;

        // Step 3: create the surface, falling back from window to pixmap.
        let (surface, backing) = match self.create_surface(display, config, native_window) {
            Ok(bound) => bound,
            Err(err) => return Err(self.fail(err)),
        };
        self.stage = NegotiationStage::SurfaceBound(backing);

        // Step 4: create the rendering context, no shared parent.
        let context = match self
            .api
            .create_context(display, config, CONTEXT_CLIENT_VERSION)
        {
            Ok(context) => context,
            Err(code) => return Err(self.fail(BringUpError::NoContext(code))),
        };
        self.stage = NegotiationStage::ContextCreated;

        // Step 5: bind (surface, surface, context) current on this thread.
        if let Err(code) = self.api.make_current(display, surface, surface, context) {
            return Err(self.fail(BringUpError::MakeCurrentFailed(code)));
        }
        self.stage = NegotiationStage::Current;
        info!("rendering context is current ({}-backed surface)", backing);

        Ok(RenderContextHandle {
            display,
            config,
            surface,
            context,
            backing,
            egl_version,
        })
    }

    /// Resolves the display connection: the supplied native handle first,
    /// then the implicit default display if the handle is null or does not
    /// resolve.
    fn resolve_display(&mut self, native: Option<NativeDisplayRef>) -> Option<DisplayConnection> {
        match native.filter(|handle| !handle.is_null()) {
            Some(handle) => match self.api.get_display(Some(handle)) {
                Some(display) => Some(display),
                None => {
                    warn!("native display handle did not resolve, retrying with the default display");
                    self.api.get_display(None)
                }
            },
            None => {
                debug!("no native display handle, using the default display");
                self.api.get_display(None)
            }
        }
    }

    /// Window surface first; on any window-side failure (including the handle
    /// being absent) one pixmap attempt. Only both failing is terminal.
    fn create_surface(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        native_window: Option<NativeWindowRef>,
    ) -> Result<(DrawSurface, SurfaceBacking), BringUpError> {
        let window_code = match native_window {
            Some(window) => match self.api.create_window_surface(display, config, window) {
                Ok(surface) => return Ok((surface, SurfaceBacking::Window)),
                Err(code) => {
                    warn!(
                        "eglCreateWindowSurface failed, EGL_NO_SURFACE - {}",
                        code.describe()
                    );
                    code
                }
            },
            None => {
                debug!("no native window handle, skipping the window surface attempt");
                EglErrorCode::BAD_NATIVE_WINDOW
            }
        };

        match self
            .api
            .create_pixmap_surface(display, config, NativePixmapRef::implicit())
        {
            Ok(surface) => {
                info!("falling back to a pixmap-backed surface (off-screen)");
                Ok((surface, SurfaceBacking::Pixmap))
            }
            Err(pixmap_code) => {
                // The pixmap attempt's own code is logged here but superseded
                // by NoSurface as the final signal.
                warn!(
                    "eglCreatePixmapSurface failed, EGL_NO_SURFACE - {}",
                    pixmap_code.describe()
                );
                Err(BringUpError::NoSurface {
                    window: window_code,
                    pixmap: pixmap_code,
                })
            }
        }
    }

    fn fail(&mut self, err: BringUpError) -> BringUpError {
        error!("bring-up failed at stage {:?}: {}", self.stage, err);
        self.stage = NegotiationStage::Failed(err.kind());
        err
    }
}
