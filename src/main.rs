use std::io::IsTerminal;

use clap::Parser;
use covid_watch::{
    DataSource, DocumentSource, Extractor, Report, cli::Cli, config::AppConfig,
};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::new()?;
    cli.apply(&mut config);

    let doc = DataSource::new(cli.cached, &config)?.load().await?;
    let extractor = Extractor::new(config.nation_label.clone(), config.watch_list());
    let report = Report::build(&doc, cli.days, &extractor)?;
    let mut options = cli.render_options();
    options.color &= std::io::stdout().is_terminal();
    let table = report.render(options)?;

    if let Some(time) = report.last_updated {
        let note = if report.provisional { " (provisional)" } else { "" };
        println!("Using data from {}{note}", time.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("{table}");
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
