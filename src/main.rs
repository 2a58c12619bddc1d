use std::io::{self, IsTerminal};

use anyhow::Context;
use coursegraph::cli::{self, Commands};
use coursegraph::config::DisplayMode;
use coursegraph::{logging, pipeline, ui};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("coursegraph error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let cli = cli::parse();
    logging::init_logging(cli.log_level)?;

    match cli.command {
        Some(Commands::Inspect { path }) => {
            let graph = pipeline::inspect(&path)?;
            print!("{}", pipeline::describe(&graph));
        }
        Some(Commands::Version) => {
            println!("coursegraph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            let config = cli.build.into_config().context("invalid options")?;
            let output = pipeline::run(&config, io::stdout().is_terminal())?;

            if output.display == DisplayMode::Terminal {
                ui::show(&output.graph, &output.layout).context("terminal display failed")?;
            }
        }
    }

    Ok(())
}
