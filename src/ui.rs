//! Line-oriented terminal front end for `SwapForm`.
//!
//! Each input line is one user action; the form is re-rendered after every
//! action that changes it.

use crate::errors::{AppError, Result};
use crate::form::{Picker, SwapForm};
use crate::models::Side;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  amount <value>   set the amount to swap (digits, one decimal point)
  amount           clear the amount
  from | to        open the source / target token picker
  pick <SYMBOL>    choose a token in the open picker
  cancel           close the picker
  flip             swap source and target tokens
  submit           swap now
  show             redraw the form
  help             this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Amount(String),
    Open(Side),
    Pick(String),
    Cancel,
    Flip,
    Submit,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let cmd = match verb.to_ascii_lowercase().as_str() {
            "amount" | "a" => Command::Amount(rest.to_string()),
            "from" => Command::Open(Side::Source),
            "to" => Command::Open(Side::Target),
            "pick" | "p" if !rest.is_empty() => Command::Pick(rest.to_string()),
            "pick" | "p" => return Err("pick needs a token symbol".into()),
            "cancel" => Command::Cancel,
            "flip" => Command::Flip,
            "submit" | "swap" => Command::Submit,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}

/// Text rendering of the whole form, including an open picker.
pub fn render(form: &SwapForm) -> String {
    if !form.has_data() {
        return "Swap Tokens\n  No token data available\n".to_string();
    }
    let mut out = String::from("Swap Tokens\n");
    let side_line = |label: &str, amount: &str, token: Option<&str>| {
        let token_desc = match token {
            Some(t) => format!("{t} ({})", form.icon_url(t)),
            None => "Select".to_string(),
        };
        let amount = if amount.is_empty() { "0.0" } else { amount };
        format!("  {label:<5} {amount:>18}  {token_desc}\n")
    };
    out.push_str(&side_line("From", form.amount(), form.source_token()));
    out.push_str(&side_line("To", &form.target_amount(), form.target_token()));
    out.push_str(&format!("  {}\n", form.rate_line()));
    let button = if form.is_loading() {
        "[ Swapping... ]"
    } else if form.is_valid() {
        "[ Swap Now ]"
    } else {
        "[ Swap Now ] (disabled)"
    };
    out.push_str(&format!("  {button}\n"));

    if let Picker::Open(side) = form.picker() {
        let title = match side {
            Side::Source => "Select source token",
            Side::Target => "Select target token",
        };
        out.push_str(&format!("\n{title}\n"));
        for option in form.picker_options() {
            let mark = if option.disabled { " (unavailable)" } else { "" };
            out.push_str(&format!("  {:<10} {}{mark}\n", option.symbol, option.icon_url));
        }
        out.push_str("  cancel\n");
    }
    out
}

/// Drives `form` from `input` until EOF or `quit`, writing to `out`.
pub async fn run<R, W>(
    form: &mut SwapForm,
    input: R,
    out: &mut W,
    submit_delay: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write!(out, "{}", render(form))?;
    out.flush()?;
    while let Some(line) = lines.next_line().await? {
        let cmd = match Command::parse(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                writeln!(out, "! {msg}")?;
                continue;
            }
        };
        debug!(?cmd, "[FORM] command");
        match cmd {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => write!(out, "{}", render(form))?,
            Command::Submit => {
                writeln!(out, "Swapping...")?;
                out.flush()?;
                match form.submit(submit_delay).await {
                    Ok(summary) => {
                        writeln!(
                            out,
                            "Swapped {} {} for {} {}",
                            summary.amount_in, summary.source, summary.amount_out, summary.target
                        )?;
                        write!(out, "{}", render(form))?;
                    }
                    Err(AppError::Validation(reason)) => writeln!(out, "! {reason}")?,
                    Err(AppError::Form(reason)) => writeln!(out, "! {reason}")?,
                    Err(e) => return Err(e),
                }
            }
            cmd => {
                match apply(form, cmd) {
                    Ok(()) => write!(out, "{}", render(form))?,
                    Err(msg) => writeln!(out, "! {msg}")?,
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}

/// Synchronous state edits.
fn apply(form: &mut SwapForm, cmd: Command) -> std::result::Result<(), String> {
    match cmd {
        Command::Amount(text) => form.set_amount(&text).map_err(|e| e.to_string()),
        Command::Open(side) => {
            if !form.has_data() {
                return Err("no tokens to choose from".into());
            }
            form.open_picker(side);
            Ok(())
        }
        Command::Pick(symbol) => form.pick(&symbol).map_err(|e| e.to_string()),
        Command::Cancel => {
            form.close_picker();
            Ok(())
        }
        Command::Flip => {
            form.flip();
            Ok(())
        }
        Command::Submit | Command::Show | Command::Help | Command::Quit => Ok(()),
    }
}
