//! Command-line arguments.

use crate::sums::MAX_DEMO_N;
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use url::Url;

/// Token swap form backed by a public price feed, plus the sum-to-n demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Price list endpoint (JSON array of {currency, price, date?})
    #[arg(long = "prices-url", env = "PRICES_URL", value_hint = ValueHint::Url)]
    pub prices_url: Option<Url>,

    /// Read the price list from a local JSON file; takes precedence over the URL
    #[arg(long = "prices-file", value_hint = ValueHint::FilePath)]
    pub prices_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the sum of 1..=n using the loop, formula and recursive strategies
    Sums {
        #[arg(
            default_value_t = 5,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DEMO_N))
        )]
        n: u32,
    },
    /// List available tokens with their prices and icons
    Tokens,
    /// One-shot quote for converting an amount between two tokens
    Quote {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
    },
    /// Interactive swap form
    Swap,
}
