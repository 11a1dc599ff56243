use std::path::PathBuf;

use clap::Parser;

use crate::scene::{DEFAULT_FACE_SIZE, MAX_FACE_SIZE};

/// Cubemap skybox loaded asynchronously from six JPEG faces.
#[derive(Debug, Parser)]
#[command(name = "prism-cubemap", version, about)]
pub struct Args {
    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Log filter, e.g. "debug" or "prism_engine=debug" (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// MSAA sample count.
    #[arg(long, default_value_t = 1)]
    pub samples: u32,

    /// Directory holding the nb2_*.jpg faces.
    #[arg(long, env = "PRISM_ASSETS", value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// TrueType font for the status overlay [default: <assets>/fonts/debug.ttf, else built-in].
    #[arg(long, env = "PRISM_FONT", value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Expected edge length of every face, in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_FACE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_FACE_SIZE as i64))]
    pub face_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let args = Args::try_parse_from(["prism-cubemap"]).unwrap();
        assert_eq!((args.width, args.height), (800, 600));
        assert_eq!(args.samples, 1);
        assert_eq!(args.face_size, 2048);
        assert!(args.log.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "prism-cubemap",
            "--assets",
            "/tmp/faces",
            "--face-size",
            "512",
            "--log",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.assets.as_deref(), Some(std::path::Path::new("/tmp/faces")));
        assert_eq!(args.face_size, 512);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_face_size_is_rejected() {
        assert!(Args::try_parse_from(["prism-cubemap", "--face-size", "0"]).is_err());
    }

    #[test]
    fn face_size_is_capped_at_the_default_texture_limit() {
        let args = Args::try_parse_from(["prism-cubemap", "--face-size", "8192"]).unwrap();
        assert_eq!(args.face_size, 8192);
        assert!(Args::try_parse_from(["prism-cubemap", "--face-size", "8193"]).is_err());
        assert!(Args::try_parse_from(["prism-cubemap", "--face-size", "16384"]).is_err());
    }
}
