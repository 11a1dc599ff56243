use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use prism_cubemap::cli::Args;
use prism_cubemap::scene::DEPTH_FORMAT;
use prism_cubemap::{overlay_font, CubemapApp, CubemapConfig};
use prism_engine::device::GpuInit;
use prism_engine::fetch::AssetDir;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log.clone()));

    let assets = AssetDir::locate(args.assets.as_deref());
    let font = overlay_font(args.font.as_deref(), &assets);

    let app = CubemapApp::new(CubemapConfig {
        assets,
        face_size: args.face_size,
        font,
    });

    Runtime::run(
        RuntimeConfig {
            title: "prism cubemap".to_string(),
            initial_size: LogicalSize::new(args.width as f64, args.height as f64),
        },
        GpuInit {
            prefer_srgb: false,
            sample_count: args.samples,
            depth_format: Some(DEPTH_FORMAT),
            ..GpuInit::default()
        },
        app,
    )
}
