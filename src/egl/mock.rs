// src/egl/mock.rs

//! Scripted [`EglApi`] implementation for negotiator tests.
//!
//! Each step's outcome is a plain field the test sets up front; every call is
//! recorded in order so tests can assert the pipeline's sequencing.

use libc::c_void;

use super::api::{
    DisplayConnection, DrawSurface, EglApi, FramebufferConfig, FramebufferRequirements,
    NativeDisplayRef, NativePixmapRef, NativeWindowRef, RenderContext,
};
use super::error::EglErrorCode;

/// One recorded native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    GetDisplay { default: bool },
    Initialize,
    BindEsApi,
    ConfigCount,
    ChooseConfig,
    CreateWindowSurface,
    CreatePixmapSurface,
    CreateContext,
    MakeCurrent,
}

pub struct MockEgl {
    /// Whether a supplied native display handle resolves.
    pub native_display: bool,
    /// Whether the implicit default display resolves.
    pub default_display: bool,
    pub initialize: Result<(i32, i32), EglErrorCode>,
    pub bind: Result<(), EglErrorCode>,
    pub config_count: Result<i32, EglErrorCode>,
    /// `Ok(true)` means one config matched, `Ok(false)` means none did.
    pub choose: Result<bool, EglErrorCode>,
    pub window_surface: Result<(), EglErrorCode>,
    pub pixmap_surface: Result<(), EglErrorCode>,
    pub context: Result<(), EglErrorCode>,
    pub current: Result<(), EglErrorCode>,
    pub calls: Vec<Call>,
}

impl MockEgl {
    /// A script where every step succeeds.
    pub fn happy() -> Self {
        MockEgl {
            native_display: true,
            default_display: true,
            initialize: Ok((1, 4)),
            bind: Ok(()),
            config_count: Ok(12),
            choose: Ok(true),
            window_surface: Ok(()),
            pixmap_surface: Ok(()),
            context: Ok(()),
            current: Ok(()),
            calls: Vec::new(),
        }
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }

    // Fabricated non-null handle, never dereferenced (same trick the X11
    // connection tests use for a dummy Display pointer).
    fn handle(tag: usize) -> *mut c_void {
        tag as *mut c_void
    }
}

impl EglApi for MockEgl {
    fn get_display(&mut self, native: Option<NativeDisplayRef>) -> Option<DisplayConnection> {
        let default = native.is_none();
        self.calls.push(Call::GetDisplay { default });
        let resolves = if default {
            self.default_display
        } else {
            self.native_display
        };
        resolves.then(|| DisplayConnection(Self::handle(0x10)))
    }

    fn initialize(&mut self, _display: DisplayConnection) -> Result<(i32, i32), EglErrorCode> {
        self.calls.push(Call::Initialize);
        self.initialize
    }

    fn bind_es_api(&mut self) -> Result<(), EglErrorCode> {
        self.calls.push(Call::BindEsApi);
        self.bind
    }

    fn config_count(&mut self, _display: DisplayConnection) -> Result<i32, EglErrorCode> {
        self.calls.push(Call::ConfigCount);
        self.config_count
    }

    fn choose_config(
        &mut self,
        _display: DisplayConnection,
        _wanted: &FramebufferRequirements,
    ) -> Result<Option<FramebufferConfig>, EglErrorCode> {
        self.calls.push(Call::ChooseConfig);
        self.choose
            .map(|found| found.then(|| FramebufferConfig(Self::handle(0x20))))
    }

    fn create_window_surface(
        &mut self,
        _display: DisplayConnection,
        _config: FramebufferConfig,
        _window: NativeWindowRef,
    ) -> Result<DrawSurface, EglErrorCode> {
        self.calls.push(Call::CreateWindowSurface);
        self.window_surface.map(|()| DrawSurface(Self::handle(0x30)))
    }

    fn create_pixmap_surface(
        &mut self,
        _display: DisplayConnection,
        _config: FramebufferConfig,
        _pixmap: NativePixmapRef,
    ) -> Result<DrawSurface, EglErrorCode> {
        self.calls.push(Call::CreatePixmapSurface);
        self.pixmap_surface.map(|()| DrawSurface(Self::handle(0x40)))
    }

    fn create_context(
        &mut self,
        _display: DisplayConnection,
        _config: FramebufferConfig,
        _client_version: i32,
    ) -> Result<RenderContext, EglErrorCode> {
        self.calls.push(Call::CreateContext);
        self.context.map(|()| RenderContext(Self::handle(0x50)))
    }

    fn make_current(
        &mut self,
        _display: DisplayConnection,
        _draw: DrawSurface,
        _read: DrawSurface,
        _context: RenderContext,
    ) -> Result<(), EglErrorCode> {
        self.calls.push(Call::MakeCurrent);
        self.current
    }
}
