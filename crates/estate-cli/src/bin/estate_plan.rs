//! Compute estate statistics and drone plans, locally or against a server.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use estate_cli::{EstateClient, PlotFile};
use estate_core::{DronePlanResponse, EstateRules};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tree height statistics
    Stats(Source),
    /// Drone monitoring sweep distance
    Plan {
        #[command(flatten)]
        source: Source,

        /// Stop the sweep once this distance is exceeded
        #[arg(long)]
        max_distance: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// Plot file with length, width and trees
    #[arg(long, conflicts_with_all = ["url", "estate"])]
    input: Option<PathBuf>,

    /// Estate Server URL
    #[arg(long, requires = "estate")]
    url: Option<String>,

    /// Estate id on the server
    #[arg(long, requires = "url")]
    estate: Option<String>,
}

enum Target {
    Local(PathBuf),
    Remote { url: String, estate: String },
}

impl Source {
    fn target(self) -> Result<Target> {
        match (self.input, self.url, self.estate) {
            (Some(path), _, _) => Ok(Target::Local(path)),
            (None, Some(url), Some(estate)) => Ok(Target::Remote { url, estate }),
            _ => bail!("pass either --input or --url with --estate"),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let rules = EstateRules::default();

    match cli.command {
        Command::Stats(source) => match source.target()? {
            Target::Local(path) => {
                let plot = PlotFile::load(&path)?.validate(&rules)?;
                print_json(&plot.stats())
            }
            Target::Remote { url, estate } => print_json(&EstateClient::new(url).stats(&estate)?),
        },
        Command::Plan {
            source,
            max_distance,
        } => {
            let max_distance = estate_core::validate_max_distance(max_distance)?;
            let plan = match source.target()? {
                Target::Local(path) => {
                    let plot = PlotFile::load(&path)?.validate(&rules)?;
                    DronePlanResponse::from(plot.sweep(max_distance))
                }
                Target::Remote { url, estate } => {
                    EstateClient::new(url).drone_plan(&estate, max_distance)?
                }
            };
            print_json(&plan)
        }
    }
}
