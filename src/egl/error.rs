// src/egl/error.rs

//! Failure taxonomy of the bring-up pipeline.
//!
//! Two layers: [`EglErrorCode`] wraps the raw code reported by `eglGetError`
//! and maps it to the fixed descriptive sentence for that code, and
//! [`BringUpError`] names which pipeline step failed, carrying the native code
//! where one exists.

use std::fmt;
use thiserror::Error;

use super::ffi::{self, EGLint};

/// A native EGL error code, as reported by `eglGetError`.
///
/// The code-to-description mapping is pure and total: each of the fourteen
/// known codes has one fixed sentence, and anything else describes to the
/// empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EglErrorCode(EGLint);

impl EglErrorCode {
    pub const SUCCESS: Self = Self(ffi::EGL_SUCCESS);
    pub const NOT_INITIALIZED: Self = Self(ffi::EGL_NOT_INITIALIZED);
    pub const BAD_ACCESS: Self = Self(ffi::EGL_BAD_ACCESS);
    pub const BAD_ALLOC: Self = Self(ffi::EGL_BAD_ALLOC);
    pub const BAD_ATTRIBUTE: Self = Self(ffi::EGL_BAD_ATTRIBUTE);
    pub const BAD_CONFIG: Self = Self(ffi::EGL_BAD_CONFIG);
    pub const BAD_CONTEXT: Self = Self(ffi::EGL_BAD_CONTEXT);
    pub const BAD_CURRENT_SURFACE: Self = Self(ffi::EGL_BAD_CURRENT_SURFACE);
    pub const BAD_DISPLAY: Self = Self(ffi::EGL_BAD_DISPLAY);
    pub const BAD_MATCH: Self = Self(ffi::EGL_BAD_MATCH);
    pub const BAD_NATIVE_PIXMAP: Self = Self(ffi::EGL_BAD_NATIVE_PIXMAP);
    pub const BAD_NATIVE_WINDOW: Self = Self(ffi::EGL_BAD_NATIVE_WINDOW);
    pub const BAD_PARAMETER: Self = Self(ffi::EGL_BAD_PARAMETER);
    pub const BAD_SURFACE: Self = Self(ffi::EGL_BAD_SURFACE);
    pub const CONTEXT_LOST: Self = Self(ffi::EGL_CONTEXT_LOST);

    /// All fourteen failure-describing codes plus `SUCCESS`.
    pub const KNOWN: [Self; 15] = [
        Self::SUCCESS,
        Self::NOT_INITIALIZED,
        Self::BAD_ACCESS,
        Self::BAD_ALLOC,
        Self::BAD_ATTRIBUTE,
        Self::BAD_CONFIG,
        Self::BAD_CONTEXT,
        Self::BAD_CURRENT_SURFACE,
        Self::BAD_DISPLAY,
        Self::BAD_MATCH,
        Self::BAD_NATIVE_PIXMAP,
        Self::BAD_NATIVE_WINDOW,
        Self::BAD_PARAMETER,
        Self::BAD_SURFACE,
        Self::CONTEXT_LOST,
    ];

    /// Wraps a raw code without interpreting it.
    pub fn from_raw(code: EGLint) -> Self {
        Self(code)
    }

    /// The raw native code.
    pub fn raw(self) -> EGLint {
        self.0
    }

    /// The fixed diagnostic sentence for this code, or `""` for codes outside
    /// the known table.
    pub fn describe(self) -> &'static str {
        match self.0 {
            ffi::EGL_SUCCESS => "The last function succeeded without error.",
            ffi::EGL_NOT_INITIALIZED => {
                "EGL is not initialized, or could not be initialized, for the specified \
                 EGL display connection."
            }
            ffi::EGL_BAD_ACCESS => {
                "EGL cannot access a requested resource (for example a context is bound \
                 in another thread)."
            }
            ffi::EGL_BAD_ALLOC => "EGL failed to allocate resources for the requested operation.",
            ffi::EGL_BAD_ATTRIBUTE => {
                "An unrecognized attribute or attribute value was passed in the attribute list."
            }
            ffi::EGL_BAD_CONTEXT => {
                "An EGLContext argument does not name a valid EGL rendering context."
            }
            ffi::EGL_BAD_CONFIG => {
                "An EGLConfig argument does not name a valid EGL frame buffer configuration."
            }
            ffi::EGL_BAD_CURRENT_SURFACE => {
                "The current surface of the calling thread is a window, pixel buffer or \
                 pixmap that is no longer valid."
            }
            ffi::EGL_BAD_DISPLAY => {
                "An EGLDisplay argument does not name a valid EGL display connection."
            }
            ffi::EGL_BAD_SURFACE => {
                "An EGLSurface argument does not name a valid surface (window, pixel \
                 buffer or pixmap) configured for GL rendering."
            }
            ffi::EGL_BAD_MATCH => {
                "Arguments are inconsistent (for example, a valid context requires \
                 buffers not supplied by a valid surface)."
            }
            ffi::EGL_BAD_PARAMETER => "One or more argument values are invalid.",
            ffi::EGL_BAD_NATIVE_PIXMAP => {
                "A NativePixmapType argument does not refer to a valid native pixmap."
            }
            ffi::EGL_BAD_NATIVE_WINDOW => {
                "A NativeWindowType argument does not refer to a valid native window."
            }
            ffi::EGL_CONTEXT_LOST => {
                "A power management event has occurred. The application must destroy all \
                 contexts and reinitialise OpenGL ES state and objects to continue \
                 rendering."
            }
            _ => "",
        }
    }
}

impl fmt::Display for EglErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x} {}", self.0, self.describe())
    }
}

/// A terminal bring-up failure. One variant per pipeline step that can fail;
/// the only non-terminal branch in the pipeline (window→pixmap surface
/// fallback) is internal to surface creation and never surfaces here on its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BringUpError {
    /// No native windowing system is reachable at all.
    #[error("no native windowing system is available")]
    WindowSystemUnavailable,

    /// Neither the supplied native display nor the implicit default display
    /// resolved to an EGL display connection.
    #[error("eglGetDisplay failed, EGL_NO_DISPLAY")]
    NoDisplay,

    #[error("eglInitialize failed - {}", .0.describe())]
    InitFailed(EglErrorCode),

    #[error("eglBindAPI failed - {}", .0.describe())]
    ApiBindFailed(EglErrorCode),

    #[error("eglGetConfigs failed - {}", .0.describe())]
    ConfigQueryFailed(EglErrorCode),

    /// No framebuffer configuration satisfied the requested attributes.
    #[error("eglChooseConfig matched no framebuffer configuration")]
    NoMatchingConfig,

    /// Both the window-backed and the pixmap-backed surface attempts failed.
    /// Carries both underlying codes; the pixmap code is informational and
    /// deliberately does not replace this kind as the final signal.
    #[error("eglCreateWindowSurface failed, EGL_NO_SURFACE - {}", .window.describe())]
    NoSurface {
        window: EglErrorCode,
        pixmap: EglErrorCode,
    },

    #[error("eglCreateContext failed, EGL_NO_CONTEXT - {}", .0.describe())]
    NoContext(EglErrorCode),

    #[error("eglMakeCurrent failed - {}", .0.describe())]
    MakeCurrentFailed(EglErrorCode),
}

/// The failure kinds of [`BringUpError`], without payloads. Used to record the
/// terminal state of the negotiation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpErrorKind {
    WindowSystemUnavailable,
    NoDisplay,
    InitFailed,
    ApiBindFailed,
    ConfigQueryFailed,
    NoMatchingConfig,
    NoSurface,
    NoContext,
    MakeCurrentFailed,
}

impl BringUpError {
    pub fn kind(&self) -> BringUpErrorKind {
        match self {
            BringUpError::WindowSystemUnavailable => BringUpErrorKind::WindowSystemUnavailable,
            BringUpError::NoDisplay => BringUpErrorKind::NoDisplay,
            BringUpError::InitFailed(_) => BringUpErrorKind::InitFailed,
            BringUpError::ApiBindFailed(_) => BringUpErrorKind::ApiBindFailed,
            BringUpError::ConfigQueryFailed(_) => BringUpErrorKind::ConfigQueryFailed,
            BringUpError::NoMatchingConfig => BringUpErrorKind::NoMatchingConfig,
            BringUpError::NoSurface { .. } => BringUpErrorKind::NoSurface,
            BringUpError::NoContext(_) => BringUpErrorKind::NoContext,
            BringUpError::MakeCurrentFailed(_) => BringUpErrorKind::MakeCurrentFailed,
        }
    }

    /// The underlying native code, where the failing step reported one. For
    /// `NoSurface` this is the window attempt's code.
    pub fn native_code(&self) -> Option<EglErrorCode> {
        match self {
            BringUpError::WindowSystemUnavailable
            | BringUpError::NoDisplay
            | BringUpError::NoMatchingConfig => None,
            BringUpError::InitFailed(code)
            | BringUpError::ApiBindFailed(code)
            | BringUpError::ConfigQueryFailed(code)
            | BringUpError::NoContext(code)
            | BringUpError::MakeCurrentFailed(code) => Some(*code),
            BringUpError::NoSurface { window, .. } => Some(*window),
        }
    }

    /// The fixed diagnostic sentence for the underlying native code, or `""`
    /// when there is none.
    pub fn diagnostic(&self) -> &'static str {
        self.native_code().map_or("", EglErrorCode::describe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_has_a_fixed_nonempty_description() {
        for code in EglErrorCode::KNOWN {
            assert!(
                !code.describe().is_empty(),
                "code 0x{:04x} should have a description",
                code.raw()
            );
        }
    }

    #[test]
    fn known_descriptions_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for code in EglErrorCode::KNOWN {
            assert!(
                seen.insert(code.describe()),
                "duplicate description for 0x{:04x}",
                code.raw()
            );
        }
    }

    #[test]
    fn unknown_codes_describe_to_empty_string() {
        for raw in [0, -1, 0x2fff, 0x300f, 0x4000, i32::MAX] {
            assert_eq!(EglErrorCode::from_raw(raw).describe(), "");
        }
    }

    #[test]
    fn description_is_stable_across_calls() {
        let code = EglErrorCode::BAD_CURRENT_SURFACE;
        assert_eq!(code.describe(), code.describe());
        assert_eq!(
            code.describe(),
            "The current surface of the calling thread is a window, pixel buffer or \
             pixmap that is no longer valid."
        );
    }

    #[test]
    fn error_display_carries_the_native_diagnostic() {
        let err = BringUpError::MakeCurrentFailed(EglErrorCode::BAD_CURRENT_SURFACE);
        let rendered = err.to_string();
        assert!(rendered.starts_with("eglMakeCurrent failed"));
        assert!(rendered.contains(EglErrorCode::BAD_CURRENT_SURFACE.describe()));
    }

    #[test]
    fn no_surface_reports_the_window_code_not_the_pixmap_code() {
        let err = BringUpError::NoSurface {
            window: EglErrorCode::BAD_NATIVE_WINDOW,
            pixmap: EglErrorCode::BAD_NATIVE_PIXMAP,
        };
        assert_eq!(err.kind(), BringUpErrorKind::NoSurface);
        assert_eq!(err.native_code(), Some(EglErrorCode::BAD_NATIVE_WINDOW));
        assert_eq!(err.diagnostic(), EglErrorCode::BAD_NATIVE_WINDOW.describe());
    }

    #[test]
    fn kinds_without_native_code_have_empty_diagnostic() {
        assert_eq!(BringUpError::NoDisplay.diagnostic(), "");
        assert_eq!(BringUpError::WindowSystemUnavailable.native_code(), None);
        assert_eq!(BringUpError::NoMatchingConfig.diagnostic(), "");
    }
}
