// src/egl/libegl.rs

//! Production [`EglApi`] implementation over the raw libEGL bindings.

use log::{debug, trace};
use std::ptr;

use super::api::{
    DisplayConnection, DrawSurface, EglApi, FramebufferConfig, FramebufferRequirements,
    NativeDisplayRef, NativePixmapRef, NativeWindowRef, RenderContext,
};
use super::error::EglErrorCode;
use super::ffi;

/// Thin stateless wrapper around libEGL. All calls are blocking calls into
/// the native library on the current thread.
#[derive(Debug, Default)]
pub struct LibEgl;

impl LibEgl {
    pub fn new() -> Self {
        Self
    }

    /// Fetches the code the library recorded for the last failing call.
    fn last_error() -> EglErrorCode {
        // SAFETY: eglGetError takes no arguments and is always safe to call.
        let raw = unsafe { ffi::eglGetError() };
        EglErrorCode::from_raw(raw)
    }
}

impl EglApi for LibEgl {
    fn get_display(&mut self, native: Option<NativeDisplayRef>) -> Option<DisplayConnection> {
        let display_id = match native {
            Some(handle) => handle.raw(),
            None => ffi::EGL_DEFAULT_DISPLAY,
        };
        // SAFETY: eglGetDisplay accepts any native display id, including the
        // default-display sentinel, and reports failure via EGL_NO_DISPLAY.
        let display = unsafe { ffi::eglGetDisplay(display_id) };
        if display == ffi::EGL_NO_DISPLAY {
            None
        } else {
            trace!("eglGetDisplay -> {:p}", display);
            Some(DisplayConnection(display))
        }
    }

    fn initialize(&mut self, display: DisplayConnection) -> Result<(i32, i32), EglErrorCode> {
        let mut major: ffi::EGLint = 0;
        let mut minor: ffi::EGLint = 0;
        // SAFETY: display comes from a successful eglGetDisplay; the out
        // pointers are valid for the duration of the call.
        let ok = unsafe { ffi::eglInitialize(display.0, &mut major, &mut minor) };
        if ok == ffi::EGL_FALSE {
            return Err(Self::last_error());
        }
        debug!("EGL initialized, version {}.{}", major, minor);
        Ok((major, minor))
    }

    fn bind_es_api(&mut self) -> Result<(), EglErrorCode> {
        // SAFETY: eglBindAPI only reads its enum argument.
        let ok = unsafe { ffi::eglBindAPI(ffi::EGL_OPENGL_ES_API) };
        if ok == ffi::EGL_FALSE {
            return Err(Self::last_error());
        }
        Ok(())
    }

    fn config_count(&mut self, display: DisplayConnection) -> Result<i32, EglErrorCode> {
        let mut num_configs: ffi::EGLint = 0;
        // SAFETY: a null configs array with size 0 asks only for the count.
        let ok = unsafe { ffi::eglGetConfigs(display.0, ptr::null_mut(), 0, &mut num_configs) };
        if ok == ffi::EGL_FALSE {
            return Err(Self::last_error());
        }
        Ok(num_configs)
    }

    fn choose_config(
        &mut self,
        display: DisplayConnection,
        wanted: &FramebufferRequirements,
    ) -> Result<Option<FramebufferConfig>, EglErrorCode> {
        let attribs = wanted.attrib_list();
        let mut config: ffi::EGLConfig = ptr::null_mut();
        let mut num_configs: ffi::EGLint = 0;
        // SAFETY: the attribute list is EGL_NONE-terminated and outlives the
        // call; config/num_configs are valid out pointers for one entry.
        let ok = unsafe {
            ffi::eglChooseConfig(display.0, attribs.as_ptr(), &mut config, 1, &mut num_configs)
        };
        if ok == ffi::EGL_FALSE {
            return Err(Self::last_error());
        }
        if num_configs < 1 || config.is_null() {
            return Ok(None);
        }
        Ok(Some(FramebufferConfig(config)))
    }

    fn create_window_surface(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        window: NativeWindowRef,
    ) -> Result<DrawSurface, EglErrorCode> {
        // SAFETY: display/config come from the earlier pipeline steps; the
        // window XID is whatever the provider handed back, and libEGL reports
        // an invalid one as EGL_BAD_NATIVE_WINDOW.
        let surface =
            unsafe { ffi::eglCreateWindowSurface(display.0, config.0, window.raw(), ptr::null()) };
        if surface == ffi::EGL_NO_SURFACE {
            return Err(Self::last_error());
        }
        Ok(DrawSurface(surface))
    }

    fn create_pixmap_surface(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        pixmap: NativePixmapRef,
    ) -> Result<DrawSurface, EglErrorCode> {
        // SAFETY: as for window surfaces; an invalid pixmap handle is
        // reported as EGL_BAD_NATIVE_PIXMAP.
        let surface =
            unsafe { ffi::eglCreatePixmapSurface(display.0, config.0, pixmap.raw(), ptr::null()) };
        if surface == ffi::EGL_NO_SURFACE {
            return Err(Self::last_error());
        }
        Ok(DrawSurface(surface))
    }

    fn create_context(
        &mut self,
        display: DisplayConnection,
        config: FramebufferConfig,
        client_version: i32,
    ) -> Result<RenderContext, EglErrorCode> {
        let attribs = [
            ffi::EGL_CONTEXT_CLIENT_VERSION,
            client_version,
            ffi::EGL_NONE,
        ];
        // SAFETY: no share context; the attribute list is EGL_NONE-terminated
        // and outlives the call.
        let context = unsafe {
            ffi::eglCreateContext(display.0, config.0, ffi::EGL_NO_CONTEXT, attribs.as_ptr())
        };
        if context == ffi::EGL_NO_CONTEXT {
            return Err(Self::last_error());
        }
        Ok(RenderContext(context))
    }

    fn make_current(
        &mut self,
        display: DisplayConnection,
        draw: DrawSurface,
        read: DrawSurface,
        context: RenderContext,
    ) -> Result<(), EglErrorCode> {
        // SAFETY: all handles come from earlier successful calls on this
        // display; this thread is the sole owner of the context.
        let ok = unsafe { ffi::eglMakeCurrent(display.0, draw.0, read.0, context.0) };
        if ok == ffi::EGL_FALSE {
            return Err(Self::last_error());
        }
        Ok(())
    }
}
