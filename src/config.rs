// src/config.rs

//! Render-target request parameters and their command-line front end.
//!
//! This is the configuration collaborator of the bring-up core: it produces an
//! immutable [`RenderTargetRequest`] and hands it to the provider and the
//! negotiator. Nothing in here talks to the display system.

use clap::Parser;
use std::path::PathBuf;

/// Default width of the render target in pixels.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default height of the render target in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Default DRM device node.
pub const DEFAULT_DEVICE: &str = "/dev/dri/card0";

/// Command-line options for the `eglboot` binary.
#[derive(Debug, Parser)]
#[command(
    name = "eglboot",
    version,
    about = "Bring up an EGL rendering context on an X11 window"
)]
pub struct Cli {
    /// Width of the render target in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Height of the render target in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Render device node.
    #[arg(long, default_value = DEFAULT_DEVICE)]
    pub device: PathBuf,

    /// Buffering mode. An empty string selects the platform's implicit
    /// (single-buffered) behavior.
    #[arg(long, default_value = "")]
    pub buffering_mode: String,

    /// Window title.
    #[arg(long, default_value = "")]
    pub title: String,
}

impl Cli {
    /// Consumes the parsed options into the request handed to the core.
    pub fn into_request(self) -> RenderTargetRequest {
        RenderTargetRequest {
            width: self.width,
            height: self.height,
            device: self.device,
            buffering_mode: self.buffering_mode,
            title: self.title,
        }
    }
}

/// The parameters of one bring-up attempt. Immutable once constructed.
///
/// `width` and `height` size the native window; the surface itself inherits
/// its dimensions from whichever backing it ends up bound to. `device` and
/// `buffering_mode` are carried for the platform layers that consume them and
/// are not interpreted by the negotiation pipeline.
#[derive(Debug, Clone)]
pub struct RenderTargetRequest {
    pub width: u32,
    pub height: u32,
    pub device: PathBuf,
    pub buffering_mode: String,
    pub title: String,
}

impl Default for RenderTargetRequest {
    fn default() -> Self {
        RenderTargetRequest {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            device: PathBuf::from(DEFAULT_DEVICE),
            buffering_mode: String::new(),
            title: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let req = RenderTargetRequest::default();
        assert_eq!(req.width, 1280);
        assert_eq!(req.height, 480);
        assert_eq!(req.device, PathBuf::from("/dev/dri/card0"));
        assert!(req.buffering_mode.is_empty());
        assert!(req.title.is_empty());
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::parse_from([
            "eglboot",
            "--width",
            "640",
            "--height",
            "480",
            "--title",
            "demo",
        ]);
        let req = cli.into_request();
        assert_eq!((req.width, req.height), (640, 480));
        assert_eq!(req.title, "demo");
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Cli::try_parse_from(["eglboot", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["eglboot", "--height", "0"]).is_err());
    }
}
