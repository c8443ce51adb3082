//! Headless swap form: owned state, token pickers, validation and the
//! simulated submit.

use crate::errors::{FormError, Result, ValidationError};
use crate::feed::{PriceSource, token_icon_url};
use crate::models::{PriceTable, Side, SwapSummary, TokenOption};
use crate::quote;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

/// Which token picker overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Picker {
    #[default]
    Closed,
    Open(Side),
}

/// Mutable part of the form. Transient; nothing here outlives the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub source_token: Option<String>,
    pub target_token: Option<String>,
    pub source_amount: String,
    pub is_loading: bool,
    pub picker: Picker,
}

#[derive(Debug, Clone)]
pub struct SwapForm {
    table: PriceTable,
    icon_base: Url,
    state: FormState,
}

impl SwapForm {
    /// Empty form in the "no data" state.
    pub fn new(icon_base: Url) -> Self {
        Self {
            table: PriceTable::default(),
            icon_base,
            state: FormState::default(),
        }
    }

    /// Fetches prices once. A failure is logged and leaves the form empty.
    pub async fn load(&mut self, source: &dyn PriceSource) -> bool {
        match source.fetch_table().await {
            Ok(table) => {
                self.set_prices(table);
                true
            }
            Err(e) => {
                error!(error = %e, "[FEED] error fetching prices");
                false
            }
        }
    }

    /// Installs a price table and selects the first two tokens when present.
    pub fn set_prices(&mut self, table: PriceTable) {
        let (source, target) = match table.tokens() {
            [first, second, ..] => (Some(first.clone()), Some(second.clone())),
            _ => (None, None),
        };
        self.table = table;
        self.state.source_token = source;
        self.state.target_token = target;
        self.state.picker = Picker::Closed;
        info!(
            tokens = self.table.len(),
            source = ?self.state.source_token,
            target = ?self.state.target_token,
            "[FORM] prices loaded"
        );
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn has_data(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn source_token(&self) -> Option<&str> {
        self.state.source_token.as_deref()
    }

    pub fn target_token(&self) -> Option<&str> {
        self.state.target_token.as_deref()
    }

    pub fn amount(&self) -> &str {
        &self.state.source_amount
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn picker(&self) -> Picker {
        self.state.picker
    }

    pub fn icon_url(&self, symbol: &str) -> String {
        token_icon_url(&self.icon_base, symbol)
    }

    /// Replaces the amount text. Edits that are not digits with at most one
    /// decimal point are refused and the previous value stays.
    pub fn set_amount(&mut self, text: &str) -> std::result::Result<(), FormError> {
        if !quote::is_amount_input(text) {
            return Err(FormError::InvalidAmountInput(text.to_string()));
        }
        self.state.source_amount = text.to_string();
        Ok(())
    }

    pub fn open_picker(&mut self, side: Side) {
        self.state.picker = Picker::Open(side);
    }

    pub fn close_picker(&mut self) {
        self.state.picker = Picker::Closed;
    }

    fn token(&self, side: Side) -> Option<&str> {
        match side {
            Side::Source => self.source_token(),
            Side::Target => self.target_token(),
        }
    }

    /// Rows of the open picker; empty when closed.
    pub fn picker_options(&self) -> Vec<TokenOption> {
        let Picker::Open(side) = self.state.picker else {
            return Vec::new();
        };
        let blocked = self.token(side.opposite());
        self.table
            .tokens()
            .iter()
            .map(|symbol| TokenOption {
                symbol: symbol.clone(),
                icon_url: self.icon_url(symbol),
                disabled: blocked == Some(symbol.as_str()),
            })
            .collect()
    }

    /// Assigns `symbol` to the side whose picker is open, then closes it.
    pub fn pick(&mut self, symbol: &str) -> std::result::Result<(), FormError> {
        let Picker::Open(side) = self.state.picker else {
            return Err(FormError::PickerClosed);
        };
        if !self.table.contains(symbol) {
            return Err(FormError::UnknownToken(symbol.to_string()));
        }
        if self.token(side.opposite()) == Some(symbol) {
            return Err(FormError::TokenDisabled(symbol.to_string()));
        }
        let slot = match side {
            Side::Source => &mut self.state.source_token,
            Side::Target => &mut self.state.target_token,
        };
        *slot = Some(symbol.to_string());
        self.state.picker = Picker::Closed;
        Ok(())
    }

    /// Swaps source and target.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.state.source_token, &mut self.state.target_token);
    }

    pub fn exchange_rate(&self) -> Option<f64> {
        quote::exchange_rate(&self.table, self.source_token(), self.target_token())
    }

    pub fn target_amount(&self) -> String {
        quote::target_amount(self.amount(), self.exchange_rate())
    }

    pub fn rate_line(&self) -> String {
        quote::rate_line(self.source_token(), self.target_token(), self.exchange_rate())
    }

    /// First failing submission check.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.state.source_amount.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        match self.state.source_amount.parse::<f64>() {
            Ok(v) if v.is_infinite() => return Err(ValidationError::AmountTooLarge),
            Ok(v) if v > 0.0 => {}
            _ => return Err(ValidationError::NonPositiveAmount),
        }
        if let (Some(source), Some(target)) = (self.source_token(), self.target_token()) {
            if source == target {
                return Err(ValidationError::SameToken);
            }
        }
        if self.exchange_rate().is_none() {
            return Err(ValidationError::NoExchangeRate);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Runs the guard and raises the loading flag.
    pub fn begin_submit(&mut self) -> Result<SwapSummary> {
        if self.state.is_loading {
            return Err(FormError::Busy.into());
        }
        if let Err(reason) = self.validate() {
            warn!(%reason, "[FORM] submit rejected");
            return Err(reason.into());
        }
        let (Some(source), Some(target), Some(rate), Some(amount_in)) = (
            self.state.source_token.clone(),
            self.state.target_token.clone(),
            self.exchange_rate(),
            quote::parse_amount(&self.state.source_amount),
        ) else {
            return Err(ValidationError::NoExchangeRate.into());
        };
        self.state.is_loading = true;
        Ok(SwapSummary {
            amount_out: self.target_amount(),
            source,
            target,
            amount_in,
            rate,
        })
    }

    pub fn finish_submit(&mut self) {
        self.state.is_loading = false;
    }

    /// Simulated swap: validate, wait `delay`, clear the loading flag.
    pub async fn submit(&mut self, delay: Duration) -> Result<SwapSummary> {
        let summary = self.begin_submit()?;
        info!(
            source = %summary.source,
            target = %summary.target,
            amount_in = summary.amount_in,
            amount_out = %summary.amount_out,
            "[FORM] submitting swap"
        );
        tokio::time::sleep(delay).await;
        self.finish_submit();
        info!("[FORM] swap complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::feed::{DEFAULT_ICON_BASE_URL, StaticPriceSource};
    use crate::models::PriceEntry;
    use async_trait::async_trait;

    fn entries(pairs: &[(&str, f64)]) -> Vec<PriceEntry> {
        pairs
            .iter()
            .map(|(c, p)| PriceEntry {
                currency: c.to_string(),
                price: Some(*p),
                date: None,
            })
            .collect()
    }

    fn form_with(pairs: &[(&str, f64)]) -> SwapForm {
        let mut form = SwapForm::new(Url::parse(DEFAULT_ICON_BASE_URL).expect("valid url"));
        form.set_prices(PriceTable::from_entries(&entries(pairs)));
        form
    }

    struct FailingSource;

    #[async_trait]
    impl PriceSource for FailingSource {
        async fn fetch_entries(&self) -> crate::errors::Result<Vec<PriceEntry>> {
            Err(AppError::Other("connection refused".into()))
        }
    }

    #[test]
    fn defaults_to_first_two_tokens() {
        let form = form_with(&[("A", 2.0), ("B", 4.0), ("C", 1.0)]);
        assert_eq!(form.source_token(), Some("A"));
        assert_eq!(form.target_token(), Some("B"));
        assert_eq!(form.exchange_rate(), Some(0.5));
    }

    #[test]
    fn single_token_leaves_sides_unselected() {
        let form = form_with(&[("A", 2.0)]);
        assert!(form.has_data());
        assert_eq!(form.source_token(), None);
        assert_eq!(form.target_token(), None);
        assert_eq!(form.rate_line(), "No exchange rate available");
    }

    #[tokio::test]
    async fn failed_fetch_stays_empty() {
        let mut form = SwapForm::new(Url::parse(DEFAULT_ICON_BASE_URL).expect("valid url"));
        assert!(!form.load(&FailingSource).await);
        assert!(!form.has_data());
        assert_eq!(form.exchange_rate(), None);
        assert_eq!(form.validate(), Err(ValidationError::MissingAmount));
    }

    #[tokio::test]
    async fn load_from_source_selects_defaults() {
        let mut form = SwapForm::new(Url::parse(DEFAULT_ICON_BASE_URL).expect("valid url"));
        let source = StaticPriceSource::new(entries(&[("ETH", 1645.93), ("USDC", 1.0)]));
        assert!(form.load(&source).await);
        assert_eq!(form.source_token(), Some("ETH"));
        assert_eq!(form.target_token(), Some("USDC"));
    }

    #[test]
    fn amount_edit_rejects_second_decimal_point() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.set_amount("1.").expect("single dot is fine");
        let err = form.set_amount("1..2").unwrap_err();
        assert_eq!(err, FormError::InvalidAmountInput("1..2".into()));
        assert_eq!(form.amount(), "1.");
    }

    #[test]
    fn target_amount_tracks_inputs() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        assert_eq!(form.target_amount(), "");
        form.set_amount("10").unwrap();
        assert_eq!(form.target_amount(), "5.000000");
        form.flip();
        assert_eq!(form.target_amount(), "20.000000");
    }

    #[test]
    fn picker_disables_opposite_token() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0), ("C", 1.0)]);
        assert!(form.picker_options().is_empty());

        form.open_picker(Side::Source);
        let options = form.picker_options();
        assert_eq!(options.len(), 3);
        let disabled: Vec<_> = options
            .iter()
            .filter(|o| o.disabled)
            .map(|o| o.symbol.as_str())
            .collect();
        assert_eq!(disabled, vec!["B"]);
        assert!(options[0].icon_url.ends_with("/tokens/A.svg"));

        assert_eq!(form.pick("B"), Err(FormError::TokenDisabled("B".into())));
        assert_eq!(form.picker(), Picker::Open(Side::Source));
        assert_eq!(form.pick("Z"), Err(FormError::UnknownToken("Z".into())));

        form.pick("C").unwrap();
        assert_eq!(form.source_token(), Some("C"));
        assert_eq!(form.picker(), Picker::Closed);
        assert_eq!(form.pick("A"), Err(FormError::PickerClosed));
    }

    #[test]
    fn opening_target_picker_replaces_source_picker() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.open_picker(Side::Source);
        form.open_picker(Side::Target);
        assert_eq!(form.picker(), Picker::Open(Side::Target));
        form.pick("B").unwrap();
        assert_eq!(form.target_token(), Some("B"));

        form.open_picker(Side::Target);
        form.close_picker();
        assert_eq!(form.picker(), Picker::Closed);
        assert_eq!(form.target_token(), Some("B"));
    }

    #[test]
    fn same_token_is_never_valid() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.state.target_token = Some("A".into());
        for amount in ["", "0", "1", "1000.5"] {
            form.set_amount(amount).unwrap();
            assert!(!form.is_valid(), "amount {amount:?}");
        }
        assert_eq!(form.validate(), Err(ValidationError::SameToken));
    }

    #[test]
    fn validation_order() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        assert_eq!(form.validate(), Err(ValidationError::MissingAmount));
        form.set_amount("0.0").unwrap();
        assert_eq!(form.validate(), Err(ValidationError::NonPositiveAmount));
        form.set_amount(".").unwrap();
        assert_eq!(form.validate(), Err(ValidationError::NonPositiveAmount));
        form.set_amount("3").unwrap();
        assert!(form.is_valid());
    }

    #[test]
    fn unselected_tokens_report_missing_rate() {
        let mut form = SwapForm::new(Url::parse(DEFAULT_ICON_BASE_URL).expect("valid url"));
        form.set_amount("5").unwrap();
        assert_eq!(form.validate(), Err(ValidationError::NoExchangeRate));

        let mut single = form_with(&[("A", 2.0)]);
        single.set_amount("5").unwrap();
        assert_eq!(single.validate(), Err(ValidationError::NoExchangeRate));
    }

    #[test]
    fn overflowing_amount_is_reported_as_too_large() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.set_amount(&"9".repeat(401)).unwrap();
        assert_eq!(form.validate(), Err(ValidationError::AmountTooLarge));
        assert_eq!(form.target_amount(), "");
    }

    #[test]
    fn begin_submit_sets_loading_and_blocks_resubmit() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.set_amount("10").unwrap();
        let summary = form.begin_submit().unwrap();
        assert!(form.is_loading());
        assert_eq!(summary.amount_out, "5.000000");
        assert_eq!(summary.rate, 0.5);
        assert!(matches!(form.begin_submit(), Err(AppError::Form(FormError::Busy))));
        form.finish_submit();
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn submit_clears_loading_after_delay() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        form.set_amount("2").unwrap();
        let summary = form.submit(Duration::from_millis(5)).await.unwrap();
        assert!(!form.is_loading());
        assert_eq!(summary.source, "A");
        assert_eq!(summary.target, "B");
        assert_eq!(summary.amount_out, "1.000000");
    }

    #[tokio::test]
    async fn invalid_submit_does_not_load() {
        let mut form = form_with(&[("A", 2.0), ("B", 4.0)]);
        let res = form.submit(Duration::from_millis(5)).await;
        assert!(matches!(res, Err(AppError::Validation(ValidationError::MissingAmount))));
        assert!(!form.is_loading());
    }
}
