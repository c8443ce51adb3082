use anyhow::{Result, bail};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use token_swap::{
    cli::{Args, Command},
    config::AppConfig,
    feed::{self, FilePriceSource, HttpPriceFeed, PriceSource},
    form::SwapForm,
    quote, sums, ui, utils,
};
use tokio::io::BufReader;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let args = Args::parse();
    match args.command {
        Command::Sums { n } => {
            for line in sums::demo_lines(n) {
                println!("{line}");
            }
        }
        Command::Tokens => {
            let (config, source) = price_setup(args.prices_url, args.prices_file)?;
            let table = source.fetch_table().await?;
            let mut out = std::io::stdout().lock();
            for symbol in table.tokens() {
                let price = table.price(symbol).unwrap_or_default();
                let icon = feed::token_icon_url(&config.icon_base_url, symbol);
                writeln!(out, "{symbol:<10} {price:>20.8}  {icon}")?;
            }
        }
        Command::Quote { from, to, amount } => {
            if !quote::is_amount_input(&amount) {
                bail!("invalid amount {amount:?}: use digits with at most one decimal point");
            }
            let (_, source) = price_setup(args.prices_url, args.prices_file)?;
            let table = source.fetch_table().await?;
            let rate = quote::exchange_rate(&table, Some(from.as_str()), Some(to.as_str()));
            println!("{}", quote::rate_line(Some(from.as_str()), Some(to.as_str()), rate));
            if rate.is_none() {
                bail!("no exchange rate available for {from} -> {to}");
            }
            let out = quote::target_amount(&amount, rate);
            if out.is_empty() {
                bail!("enter an amount to convert");
            }
            println!("{amount} {from} = {out} {to}");
        }
        Command::Swap => {
            let (config, source) = price_setup(args.prices_url, args.prices_file)?;
            let mut form = SwapForm::new(config.icon_base_url.clone());
            form.load(source.as_ref()).await;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            ui::run(&mut form, stdin, &mut stdout, config.submit_delay).await?;
        }
    }
    Ok(())
}

/// Loads configuration and picks the price source for commands that need prices.
fn price_setup(
    prices_url: Option<Url>,
    prices_file: Option<PathBuf>,
) -> Result<(AppConfig, Box<dyn PriceSource>)> {
    let mut config = AppConfig::load()?;
    if let Some(url) = prices_url {
        config.prices_url = url;
    }
    let source: Box<dyn PriceSource> = match &prices_file {
        Some(path) => Box::new(FilePriceSource::new(path)),
        None => Box::new(HttpPriceFeed::new(config.prices_url.clone())),
    };
    tracing::info!(
        prices_url = %config.prices_url,
        prices_file = ?prices_file,
        submit_delay_ms = config.submit_delay.as_millis() as u64,
        "[INIT] token-swap starting"
    );
    Ok((config, source))
}
