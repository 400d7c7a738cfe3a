use anyhow::Result;
use clap::{crate_authors, crate_description, crate_name, crate_version, App as Cli, Arg};
use std::path::PathBuf;
use taskhub::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("storage")
                .short("s")
                .long("storage")
                .value_name("DIR")
                .help("Sets the directory holding tasks and preferences")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Sets the base URL of the posts API")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(dir) = matches.value_of("storage") {
        config.storage_dir = Some(PathBuf::from(dir));
    }
    if let Some(url) = matches.value_of("api-url") {
        config.api_base_url = url.to_string();
        config.validate()?;
    }

    App::start(config).await?;
    Ok(())
}
