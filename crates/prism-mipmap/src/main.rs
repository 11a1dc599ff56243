use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_mipmap::cli::Args;
use prism_mipmap::MipmapApp;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log.clone()));

    Runtime::run(
        RuntimeConfig {
            title: "prism mipmap".to_string(),
            initial_size: LogicalSize::new(args.width as f64, args.height as f64),
        },
        GpuInit {
            prefer_srgb: false,
            sample_count: args.samples,
            ..GpuInit::default()
        },
        MipmapApp::new(),
    )
}
