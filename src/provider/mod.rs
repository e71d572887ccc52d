// src/provider/mod.rs

//! Native surface providers.
//!
//! A provider owns the connection to a native windowing system and produces
//! the opaque `(native display, native window)` pair the negotiator consumes.
//! The negotiator itself never touches a windowing system directly; swapping
//! platforms means swapping the provider behind this trait.

use crate::config::RenderTargetRequest;
use crate::egl::{BringUpError, NativeDisplayRef, NativeWindowRef};

pub mod x11;

/// The opaque pair a provider hands to the negotiator. Both handles are
/// references into the provider's windowing system; the provider (and the
/// windowing subsystem behind it) retains ownership.
#[derive(Debug, Clone, Copy)]
pub struct NativeHandles {
    pub display: NativeDisplayRef,
    pub window: NativeWindowRef,
}

/// Produces a native display connection and a native window sized to the
/// request.
pub trait NativeSurfaceProvider {
    /// Opens the windowing system and creates a visible top-level window.
    ///
    /// Fails with [`BringUpError::WindowSystemUnavailable`] when no native
    /// windowing system is reachable. The handles stay valid for as long as
    /// the provider itself is alive.
    fn create_window(
        &mut self,
        request: &RenderTargetRequest,
    ) -> Result<NativeHandles, BringUpError>;
}
