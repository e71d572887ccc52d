// src/egl/api.rs

//! The seam between the negotiation pipeline and the native EGL library.
//!
//! All handles are opaque newtypes over what the native side hands back.
//! Handle lifetimes follow the native contract: a [`FramebufferConfig`] is
//! valid for as long as the [`DisplayConnection`] it was selected on, a
//! [`DrawSurface`] and [`RenderContext`] for as long as the display they were
//! created on. Nothing here is released explicitly; teardown is implicit at
//! process exit.

use libc::c_void;

use super::error::EglErrorCode;
use super::ffi::{self, EGLint};

/// An opaque native display handle, as produced by a surface provider
/// (on X11 this wraps the Xlib `Display*`). Referenced, not owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeDisplayRef(*mut c_void);

impl NativeDisplayRef {
    pub fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    pub(crate) fn raw(self) -> *mut c_void {
        self.0
    }
}

/// An opaque native window handle (an XID on X11). Owned by the windowing
/// subsystem, referenced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindowRef(u64);

impl NativeWindowRef {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub(crate) fn raw(self) -> ffi::EGLNativeWindowType {
        self.0 as ffi::EGLNativeWindowType
    }
}

/// An opaque native pixmap handle. The off-screen fallback backing; the
/// implicit handle names whatever pixmap the platform supplies by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativePixmapRef(u64);

impl NativePixmapRef {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The platform-implicit pixmap, used when no explicit pixmap exists.
    pub fn implicit() -> Self {
        Self(0)
    }

    pub(crate) fn raw(self) -> ffi::EGLNativePixmapType {
        self.0 as ffi::EGLNativePixmapType
    }
}

/// An initialized EGL display connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConnection(pub(crate) ffi::EGLDisplay);

/// A framebuffer configuration selected on a display connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferConfig(pub(crate) ffi::EGLConfig);

/// A drawable surface, window- or pixmap-backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSurface(pub(crate) ffi::EGLSurface);

/// A GPU rendering context. Usable only after a successful make-current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext(pub(crate) ffi::EGLContext);

/// Minimum framebuffer capabilities requested from config selection.
///
/// Each field is a minimum bit depth (or buffer count); the platform is free
/// to return deeper configs. Tie-breaking among matches is left to the
/// platform's native selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferRequirements {
    pub red_bits: EGLint,
    pub green_bits: EGLint,
    pub blue_bits: EGLint,
    pub alpha_bits: EGLint,
    pub depth_bits: EGLint,
    pub stencil_bits: EGLint,
    pub sample_buffers: EGLint,
}

impl Default for FramebufferRequirements {
    /// RGB565 color with 8-bit alpha, 8-bit depth and stencil, and one
    /// multisample buffer.
    fn default() -> Self {
        FramebufferRequirements {
            red_bits: 5,
            green_bits: 6,
            blue_bits: 5,
            alpha_bits: 8,
            depth_bits: 8,
            stencil_bits: 8,
            sample_buffers: 1,
        }
    }
}

impl FramebufferRequirements {
    /// Serializes to the `EGL_NONE`-terminated attribute list form consumed
    /// by `eglChooseConfig`.
    pub fn attrib_list(&self) -> [EGLint; 15] {
        [
            ffi::EGL_RED_SIZE,
            self.red_bits,
            ffi::EGL_GREEN_SIZE,
            self.green_bits,
            ffi::EGL_BLUE_SIZE,
            self.blue_bits,
            ffi::EGL_ALPHA_SIZE,
            self.alpha_bits,
            ffi::EGL_DEPTH_SIZE,
            self.depth_bits,
            ffi::EGL_STENCIL_SIZE,
            self.stencil_bits,
            ffi::EGL_SAMPLE_BUFFERS,
            self.sample_buffers,
            ffi::EGL_NONE,
        ]
    }
}

/// The native operations the negotiator drives, in the order it drives them.
///
/// The production implementation is [`super::libegl::LibEgl`]; tests use a
/// scripted mock. Every fallible operation reports the native error code the
/// library left behind, so the pipeline can translate it through the fixed
/// diagnostic table.
pub trait EglApi {
    /// Resolves a display connection. `None` asks for the implicit default
    /// display; returns `None` when no connection resolves.
    fn get_display(&mut self, native: Option<NativeDisplayRef>) -> Option<DisplayConnection>;

    /// Initializes the connection, returning the (major, minor) version pair.
    fn initialize(&mut self, display: DisplayConnection) -> Result<(i32, i32), EglErrorCode>;

    /// Binds the OpenGL ES client API to the connection.
    fn bind_es_api(&mut self) -> Result<(), EglErrorCode>;

    /// Queries how many configs the display exposes. A capability probe only;
    /// the count does not feed config selection.
    fn config_count(&mut self, display: DisplayConnection) -> Result<i32, EglErrorCode>;

    /// Chooses exactly one config matching `wanted`, or `Ok(None)` when
    /// nothing matches.
    fn choose_config(
        &mut self,
        display: DisplayConnection,
        wanted: &FramebufferRequirements,
    ) -> Result<Option<FramebufferConfig>, EglErrorCode>;

    fn create_window_surface(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        window: NativeWindowRef,
    ) -> Result<DrawSurface, EglErrorCode>;

    fn create_pixmap_surface(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        pixmap: NativePixmapRef,
    ) -> Result<DrawSurface, EglErrorCode>;

    /// Creates a context against `config`, with no shared parent context,
    /// requesting the given client major version.
    fn create_context(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        client_version: i32,
    ) -> Result<RenderContext, EglErrorCode>;

    /// Binds `(draw, read, context)` as current on the calling thread.
    fn make_current(
        &mut self,
        display: DisplayConnection,
        draw: DrawSurface,
        read: DrawSurface,
        context: RenderContext,
    ) -> Result<(), EglErrorCode>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attrib_list_is_none_terminated_and_ordered() {
        let wanted = FramebufferRequirements::default();
        let list = wanted.attrib_list();
        assert_eq!(list[list.len() - 1], ffi::EGL_NONE);
        assert_eq!(list[0], ffi::EGL_RED_SIZE);
        assert_eq!(list[1], 5);
        assert_eq!(list[2], ffi::EGL_GREEN_SIZE);
        assert_eq!(list[3], 6);
        assert_eq!(list[12], ffi::EGL_SAMPLE_BUFFERS);
        assert_eq!(list[13], 1);
    }

    #[test]
    fn implicit_pixmap_is_the_zero_handle() {
        assert_eq!(NativePixmapRef::implicit(), NativePixmapRef::new(0));
    }
}
