mod app;
mod bindings;
mod overlay;
#[cfg(target_arch = "wasm32")]
mod web;

use app::{App, UserEvent};
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::Parser;
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;
    use wormhole_kernel::AppConfig;

    #[derive(Parser)]
    #[command(name = "wormhole-desktop", about = "Fly through a wormhole between two galaxies")]
    pub struct Cli {
        /// Enable verbose logging
        #[arg(short, long)]
        pub verbose: bool,

        /// YAML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Render-resolution divisor (1, 2, 4 or 8)
        #[arg(long)]
        pub resolution: Option<u32>,

        /// Directory holding the scene textures
        #[arg(long)]
        pub assets: Option<PathBuf>,

        /// Start with the overlay hidden
        #[arg(long)]
        pub no_overlay: bool,
    }

    impl Cli {
        /// Configuration file (or defaults) with command-line overrides applied.
        pub fn config(&self) -> anyhow::Result<AppConfig> {
            let mut config = match &self.config {
                Some(path) => AppConfig::load(path)?,
                None => AppConfig::default(),
            };
            if let Some(resolution) = self.resolution {
                config.display.resolution_scale = resolution;
            }
            if let Some(assets) = &self.assets {
                config.display.asset_dir = assets.clone();
            }
            if self.no_overlay {
                config.display.show_overlay = false;
            }
            config.validate()?;
            Ok(config)
        }
    }

    pub fn init_logging(verbose: bool) {
        let filter = if verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .init();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use wormhole_assets::TextureSet;

    let cli = native::Cli::parse();
    native::init_logging(cli.verbose);
    tracing::info!("wormhole-desktop starting");

    let config = cli.config()?;
    let textures = TextureSet::load(&config.display.asset_dir);

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, textures, event_loop.create_proxy());
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use winit::platform::web::EventLoopExtWebSys;
    use wormhole_assets::TextureSet;
    use wormhole_kernel::AppConfig;

    web::init_logging();
    tracing::info!("wormhole viewer starting");

    let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("cannot create event loop: {e}");
            web::show_error(&e.to_string());
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let app = App::new(
        AppConfig::default(),
        TextureSet::procedural(),
        event_loop.create_proxy(),
    );
    event_loop.spawn_app(app);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::native::Cli;
    use clap::Parser;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from(["wormhole-desktop", "--resolution", "4", "--no-overlay"]);
        let config = cli.config().unwrap();
        assert_eq!(config.display.resolution_scale, 4);
        assert!(!config.display.show_overlay);
    }

    #[test]
    fn invalid_resolution_is_rejected() {
        let cli = Cli::parse_from(["wormhole-desktop", "--resolution", "3"]);
        assert!(cli.config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["wormhole-desktop", "-c", "/no/such/wormhole.yaml"]);
        assert!(cli.config().is_err());
    }
}
