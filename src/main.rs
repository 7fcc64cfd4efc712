mod config;
mod game;
mod input;
mod render;
mod snake;
mod term;

pub type Coords = (i16, i16);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, redirect it when running with RUST_LOG set
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    game::play(config::GameConfig::default())
}
