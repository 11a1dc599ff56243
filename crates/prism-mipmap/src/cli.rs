use clap::Parser;

/// Mipmap filtering demo: one texture, twelve samplers.
#[derive(Debug, Parser)]
#[command(name = "prism-mipmap", version, about)]
pub struct Args {
    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Log filter, e.g. "debug" (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// MSAA sample count.
    #[arg(long, default_value_t = 4)]
    pub samples: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_4x_msaa() {
        let args = Args::try_parse_from(["prism-mipmap"]).unwrap();
        assert_eq!((args.width, args.height, args.samples), (800, 600, 4));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(Args::try_parse_from(["prism-mipmap", "--assets", "x"]).is_err());
    }
}
