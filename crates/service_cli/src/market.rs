//! Market files: flat curves, fixings, prices and volatilities as JSON.
//!
//! A market file may also list holidays per calendar; those calendars
//! replace the weekend-only defaults of the standard reference data.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Weekday;
use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment};
use pricer_core::reference_data::ReferenceData;
use pricer_core::types::{
    Currency, Date, HolidayCalendar, HolidayCalendarId, IborIndexId, SecurityId,
};
use serde::Deserialize;

use crate::{CliError, Result};

/// Parsed market file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketData {
    /// Date the market was observed, used when no valuation date is configured
    pub valuation_date: Option<Date>,
    /// Continuously compounded zero rate per currency
    pub discount_curves: BTreeMap<String, f64>,
    /// Continuously compounded forward rate per Ibor index
    pub forward_curves: BTreeMap<String, f64>,
    /// Historic index fixings
    pub fixings: Vec<Fixing>,
    /// Security prices
    pub equity_prices: BTreeMap<String, f64>,
    /// Flat Black volatility per Ibor index
    pub swaption_volatilities: BTreeMap<String, f64>,
    /// Holiday dates per calendar
    pub holidays: BTreeMap<String, Vec<Date>>,
}

/// One historic fixing.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixing {
    /// Index identifier
    pub index: IborIndexId,
    /// Fixing date
    pub date: Date,
    /// Observed rate
    pub value: f64,
}

impl MarketData {
    /// Reads a market file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses market JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let market: MarketData = serde_json::from_str(json)?;
        for (name, value) in market
            .discount_curves
            .iter()
            .chain(&market.forward_curves)
            .chain(&market.equity_prices)
            .chain(&market.swaption_volatilities)
        {
            if !value.is_finite() {
                return Err(CliError::Parse(format!("{name}: value must be finite")));
            }
        }
        Ok(market)
    }

    /// Builds the pricing environment as of `valuation_date`.
    pub fn environment(&self, valuation_date: Date) -> Result<ImmutablePricingEnvironment> {
        let mut env = ImmutablePricingEnvironment::new(valuation_date);
        for (code, rate) in &self.discount_curves {
            let currency: Currency = code
                .parse()
                .map_err(|e| CliError::Parse(format!("discount curve {code}: {e}")))?;
            env = env.with_discount_curve(currency, FlatCurve::new(*rate));
        }
        for (index, rate) in &self.forward_curves {
            env = env.with_forward_curve(IborIndexId::new(index.as_str()), FlatCurve::new(*rate));
        }
        for fixing in &self.fixings {
            env = env.with_fixing(fixing.index.clone(), fixing.date, fixing.value);
        }
        for (security, price) in &self.equity_prices {
            env = env.with_equity_price(SecurityId::new(security.as_str()), *price);
        }
        for (index, volatility) in &self.swaption_volatilities {
            env = env.with_swaption_volatility(IborIndexId::new(index.as_str()), *volatility);
        }
        tracing::debug!(
            valuation_date = %valuation_date,
            currencies = self.discount_curves.len(),
            fixings = self.fixings.len(),
            "pricing environment built"
        );
        Ok(env)
    }

    /// Standard reference data with this file's holiday calendars applied.
    pub fn reference_data(&self) -> ReferenceData {
        self.holidays
            .iter()
            .fold(ReferenceData::standard(), |ref_data, (name, dates)| {
                ref_data.with_calendar(HolidayCalendar::new(
                    HolidayCalendarId::new(name.as_str()),
                    [Weekday::Sat, Weekday::Sun],
                    dates.iter().copied(),
                ))
            })
    }
}
