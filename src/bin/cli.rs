// src/bin/cli.rs
use color_eyre::eyre::eyre;
use ponto_harvest::{cli, logging};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let params = cli::parse_args(std::env::args().skip(1)).map_err(|e| eyre!("{e}\n\n{}", cli::HELP))?;
    cli::run(params).await.map_err(|e| eyre!("{e}"))
}
