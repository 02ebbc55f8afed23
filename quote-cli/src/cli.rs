use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use inquire::Confirm;

use quote_core::{Config, WeatherService, format_quote, generate_quotes, tables};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "heatpump-quotes", version, about = "Heat pump quote generator")]
pub struct Cli {
    /// Path to the houses table (JSON).
    #[arg(long, default_value = "data/houses.json")]
    pub houses: PathBuf,

    /// Path to the heat-pump catalog (JSON).
    #[arg(long, default_value = "data/heat-pumps.json")]
    pub pumps: PathBuf,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if !self.yes {
            let proceed = Confirm::new("Let's generate pump quotes!")
                .with_default(true)
                .prompt()?;

            if !proceed {
                return Ok(());
            }
        }

        let config = Config::load()?;
        let houses = tables::load_houses(&self.houses)?;
        let pumps = tables::load_heat_pumps(&self.pumps)?;

        let weather = WeatherService::new(&config);
        let quotes = generate_quotes(&houses, &pumps, &weather, config.vat_rate).await;

        let rendered: Vec<String> = quotes.iter().map(format_quote).collect();
        println!("{}", rendered.join("\n"));

        Ok(())
    }
}
