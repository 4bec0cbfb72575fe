use clap::Parser;

use config::Config;

#[cfg(test)]
mod client;
mod config;
mod datamodel;
mod logging;
mod server;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(config.verbose);

    server::serve(&config).await
}
