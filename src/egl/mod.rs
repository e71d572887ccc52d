// src/egl/mod.rs

//! EGL negotiation core.
//!
//! Submodules, leaf first:
//! - `ffi`: raw libEGL bindings.
//! - `error`: the native error-code table and the typed failure taxonomy.
//! - `api`: opaque handle types and the [`EglApi`] seam the pipeline drives.
//! - `libegl`: the production [`EglApi`] implementation.
//! - `negotiator`: the five-step bring-up pipeline itself.

pub mod api;
pub mod error;
pub mod ffi;
pub mod libegl;
#[cfg(test)]
pub mod mock;
pub mod negotiator;

pub use api::{
    DisplayConnection, DrawSurface, EglApi, FramebufferConfig, FramebufferRequirements,
    NativeDisplayRef, NativePixmapRef, NativeWindowRef, RenderContext,
};
pub use error::{BringUpError, BringUpErrorKind, EglErrorCode};
pub use libegl::LibEgl;
pub use negotiator::{
    NegotiationStage, Negotiator, RenderContextHandle, SurfaceBacking, CONTEXT_CLIENT_VERSION,
};
