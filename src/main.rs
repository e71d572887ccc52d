// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use eglboot::config::Cli;
use eglboot::egl::{LibEgl, Negotiator, SurfaceBacking};
use eglboot::provider::x11::{WmIntegration, X11SurfaceProvider};
use eglboot::provider::NativeSurfaceProvider;

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let request = Cli::parse().into_request();
    info!(
        "Starting eglboot: {}x{}, device {}, buffering '{}'",
        request.width,
        request.height,
        request.device.display(),
        request.buffering_mode
    );

    // The provider is optional: when no windowing system is reachable the
    // negotiator runs against the implicit default display and the surface
    // falls back to a pixmap backing.
    let mut provider = X11SurfaceProvider::new(WmIntegration::Full);
    let native = match provider.create_window(&request) {
        Ok(handles) => Some(handles),
        Err(err) => {
            warn!("{err}; continuing without a native window");
            None
        }
    };

    let mut negotiator = Negotiator::new(LibEgl::new());
    let handle = negotiator
        .bring_up(
            native.map(|h| h.display),
            native.map(|h| h.window),
            &request,
        )
        .context("EGL bring-up failed")?;

    let (major, minor) = handle.egl_version();
    info!(
        "Bring-up complete: EGL {}.{}, {}-backed surface, context current",
        major,
        minor,
        handle.backing()
    );
    if handle.backing() == SurfaceBacking::Pixmap {
        warn!("surface is pixmap-backed; rendering will not be presented on screen");
    }

    Ok(())
}
