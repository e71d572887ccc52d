// src/lib.rs

//! Hardware-accelerated rendering surface bring-up on X11.
//!
//! The crate is split along the dependency order of the bring-up:
//! - `provider`: obtains a native display connection and (optionally) a native
//!   window on it. Platform-specific; the X11 implementation lives in
//!   `provider::x11`.
//! - `egl`: the negotiation core. Drives the display-initialize →
//!   config-select → surface-create → context-create → make-current pipeline
//!   against the `EglApi` seam, including the window→pixmap surface fallback.
//! - `config`: the collaborator layer that supplies a [`config::RenderTargetRequest`]
//!   to the core. Command-line parsing only; it carries no bring-up logic.

pub mod config;
pub mod egl;
pub mod provider;
