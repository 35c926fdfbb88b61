use clap::Parser;
use timestable_core::PaletteConfig;
use wasm_bindgen::prelude::*;

mod grid;
mod palette;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Milliseconds between palette steps
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Degrees the palette turns on every step
    #[arg(long)]
    step: Option<u16>,

    /// Rotation bound, the palette wraps back to zero when reaching it
    #[arg(long)]
    wrap: Option<u16>,

    /// Start with every product revealed
    #[arg(long)]
    reveal_all: bool,
}

impl Args {
    /// Parses `#-v&--tick-ms=50` style location hashes.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn palette_config(&self) -> PaletteConfig {
        let defaults = PaletteConfig::default();
        PaletteConfig::new(
            self.tick_ms.unwrap_or(defaults.tick_ms),
            self.step.unwrap_or(defaults.step_degrees),
            self.wrap.unwrap_or(defaults.wrap_degrees),
        )
    }

    fn grid_props(&self) -> grid::GridProps {
        grid::GridProps {
            palette: self.palette_config(),
            reveal_all: self.reveal_all,
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::from_hash(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::warn!("ignoring location hash {:?}: {}", location_hash, err);
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("quiz")
        .expect("Could not find id=\"quiz\" element");

    log::debug!("App started");
    yew::Renderer::<grid::GridView>::with_root_and_props(root, args.grid_props()).render();
}
