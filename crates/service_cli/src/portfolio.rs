//! Portfolio files: JSON trade descriptions turned into validated products.
//!
//! ```json
//! { "trades": [ { "id": "FUT-1", "product": { "type": "EquityFuture", ... } } ] }
//! ```
//!
//! Every product goes through its validating constructor, so a file that
//! parses always yields products that can be resolved and priced.

use std::path::Path;

use chrono::{FixedOffset, NaiveTime};
use pricer_core::types::{
    AdjustableDate, BusinessDayAdjustment, CurrencyAmount, Date, DayCountConvention, IborIndexId,
    LongShort, PayReceive, SecurityId,
};
use pricer_models::products::{
    CashSettlementMethod, EquityFuture, KnownAmountSwapLeg, Product, ProductError,
    RateCalculation, RateCalculationSwapLeg, Swap, SwapLeg, Swaption, SwaptionSettlement,
};
use pricer_models::schedules::{Frequency, PeriodicSchedule};
use serde::Deserialize;

use crate::{CliError, Result};

/// A validated trade.
#[derive(Debug, Clone)]
pub struct Trade {
    /// Identifier, unique within the portfolio
    pub id: String,
    /// The product traded
    pub product: Product,
}

/// Trades in file order.
#[derive(Debug, Clone)]
pub struct Portfolio {
    trades: Vec<Trade>,
}

impl Portfolio {
    /// Reads and validates a portfolio file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates portfolio JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PortfolioFile = serde_json::from_str(json)?;
        let mut trades = Vec::with_capacity(file.trades.len());
        for trade in file.trades {
            if trades.iter().any(|t: &Trade| t.id == trade.id) {
                return Err(CliError::Parse(format!("duplicate trade id {}", trade.id)));
            }
            let product = trade
                .product
                .into_product()
                .map_err(|e| CliError::Parse(format!("trade {}: {}", trade.id, e)))?;
            trades.push(Trade {
                id: trade.id,
                product,
            });
        }
        tracing::info!(trades = trades.len(), "portfolio loaded");
        Ok(Self { trades })
    }

    /// All trades.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// The trade with the given id.
    pub fn trade(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Deserialize)]
struct PortfolioFile {
    trades: Vec<TradeDto>,
}

#[derive(Debug, Deserialize)]
struct TradeDto {
    id: String,
    product: ProductDto,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ProductDto {
    EquityFuture {
        underlying: SecurityId,
        expiration_date: Date,
        settlement_date: Date,
        strike_price: f64,
        unit_amount: CurrencyAmount,
    },
    SwapLeg {
        leg: LegDto,
    },
    Swap {
        legs: Vec<LegDto>,
    },
    Swaption {
        long_short: LongShort,
        #[serde(default)]
        settlement: SettlementDto,
        expiry_date: Date,
        #[serde(default)]
        expiry_adjustment: Option<BusinessDayAdjustment>,
        expiry_time: NaiveTime,
        expiry_zone: String,
        underlying: Vec<LegDto>,
    },
}

impl ProductDto {
    fn into_product(self) -> std::result::Result<Product, ProductError> {
        match self {
            ProductDto::EquityFuture {
                underlying,
                expiration_date,
                settlement_date,
                strike_price,
                unit_amount,
            } => Ok(EquityFuture::new(
                underlying,
                expiration_date,
                settlement_date,
                strike_price,
                unit_amount,
            )?
            .into()),
            ProductDto::SwapLeg { leg } => Ok(leg.into_leg()?.into()),
            ProductDto::Swap { legs } => Ok(swap(legs)?.into()),
            ProductDto::Swaption {
                long_short,
                settlement,
                expiry_date,
                expiry_adjustment,
                expiry_time,
                expiry_zone,
                underlying,
            } => {
                let zone = parse_zone(&expiry_zone)?;
                let swaption = Swaption::new(
                    long_short,
                    settlement.into_settlement(),
                    adjustable(expiry_date, expiry_adjustment),
                    expiry_time,
                    zone,
                    swap(underlying)?,
                )?;
                Ok(swaption.into())
            }
        }
    }
}

fn swap(legs: Vec<LegDto>) -> std::result::Result<Swap, ProductError> {
    let legs = legs
        .into_iter()
        .map(LegDto::into_leg)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Swap::new(legs)
}

/// Parses `Z`, `+HH:MM` or `-HH:MM`.
fn parse_zone(zone: &str) -> std::result::Result<FixedOffset, ProductError> {
    let invalid = || ProductError::InvalidParameter {
        message: format!("expiry zone {zone} is not Z or +HH:MM"),
    };
    if zone == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }
    let (sign, rest) = if let Some(rest) = zone.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = zone.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..60).contains(&minutes) {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn adjustable(date: Date, adjustment: Option<BusinessDayAdjustment>) -> AdjustableDate {
    match adjustment {
        Some(adjustment) => AdjustableDate::new(date, adjustment),
        None => AdjustableDate::unadjusted(date),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type")]
enum SettlementDto {
    #[default]
    Physical,
    Cash {
        method: CashSettlementMethod,
        settlement_date: Date,
        #[serde(default)]
        adjustment: Option<BusinessDayAdjustment>,
    },
}

impl SettlementDto {
    fn into_settlement(self) -> SwaptionSettlement {
        match self {
            SettlementDto::Physical => SwaptionSettlement::Physical,
            SettlementDto::Cash {
                method,
                settlement_date,
                adjustment,
            } => SwaptionSettlement::Cash {
                method,
                settlement_date: adjustable(settlement_date, adjustment),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleDto {
    start_date: Date,
    end_date: Date,
    frequency: Frequency,
    #[serde(default = "BusinessDayAdjustment::none")]
    adjustment: BusinessDayAdjustment,
}

impl ScheduleDto {
    fn into_schedule(self) -> std::result::Result<PeriodicSchedule, ProductError> {
        Ok(PeriodicSchedule::new(
            self.start_date,
            self.end_date,
            self.frequency,
            self.adjustment,
        )?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum LegDto {
    Fixed {
        pay_receive: PayReceive,
        #[serde(flatten)]
        schedule: ScheduleDto,
        payment_frequency: Option<Frequency>,
        #[serde(default)]
        payment_offset_days: i32,
        notional: CurrencyAmount,
        rate: f64,
        day_count: DayCountConvention,
    },
    Ibor {
        pay_receive: PayReceive,
        #[serde(flatten)]
        schedule: ScheduleDto,
        payment_frequency: Option<Frequency>,
        #[serde(default)]
        payment_offset_days: i32,
        notional: CurrencyAmount,
        index: IborIndexId,
        #[serde(default)]
        spread: f64,
        day_count: DayCountConvention,
    },
    KnownAmount {
        pay_receive: PayReceive,
        #[serde(flatten)]
        schedule: ScheduleDto,
        amount: CurrencyAmount,
    },
}

impl LegDto {
    fn into_leg(self) -> std::result::Result<SwapLeg, ProductError> {
        let (pay_receive, schedule, payment_frequency, payment_offset_days, notional, calculation) =
            match self {
                LegDto::KnownAmount {
                    pay_receive,
                    schedule,
                    amount,
                } => {
                    let leg =
                        KnownAmountSwapLeg::new(pay_receive, schedule.into_schedule()?, amount)?;
                    return Ok(SwapLeg::KnownAmount(leg));
                }
                LegDto::Fixed {
                    pay_receive,
                    schedule,
                    payment_frequency,
                    payment_offset_days,
                    notional,
                    rate,
                    day_count,
                } => (
                    pay_receive,
                    schedule,
                    payment_frequency,
                    payment_offset_days,
                    notional,
                    RateCalculation::Fixed { rate, day_count },
                ),
                LegDto::Ibor {
                    pay_receive,
                    schedule,
                    payment_frequency,
                    payment_offset_days,
                    notional,
                    index,
                    spread,
                    day_count,
                } => (
                    pay_receive,
                    schedule,
                    payment_frequency,
                    payment_offset_days,
                    notional,
                    RateCalculation::Ibor {
                        index,
                        spread,
                        day_count,
                    },
                ),
            };
        let accrual_frequency = schedule.frequency;
        let leg = RateCalculationSwapLeg::new(
            pay_receive,
            schedule.into_schedule()?,
            payment_frequency.unwrap_or(accrual_frequency),
            payment_offset_days,
            notional,
            calculation,
        )?;
        Ok(SwapLeg::RateCalculation(leg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Currency;
    use pricer_models::products::ProductKind;

    const SAMPLE: &str = include_str!("../data/portfolio.json");

    #[test]
    fn test_sample_portfolio_loads_every_kind() {
        let portfolio = Portfolio::from_json(SAMPLE).unwrap();
        let kinds: Vec<_> = portfolio
            .trades()
            .iter()
            .map(|t| t.product.kind())
            .collect();
        for kind in ProductKind::ALL {
            assert!(kinds.contains(&kind), "sample has no {kind}");
        }
    }

    #[test]
    fn test_trade_lookup() {
        let portfolio = Portfolio::from_json(SAMPLE).unwrap();
        let future = portfolio.trade("FUT-1").unwrap();
        match &future.product {
            Product::EquityFuture(f) => {
                assert_eq!(f.currency(), Currency::USD);
                assert_eq!(f.strike_price(), 100.0);
            }
            other => panic!("unexpected product {other:?}"),
        }
        assert!(portfolio.trade("NOPE").is_none());
    }

    #[test]
    fn test_invalid_product_names_the_trade() {
        let json = r#"{"trades": [{"id": "BAD", "product": {
            "type": "EquityFuture",
            "underlying": "OG-Future",
            "expiration_date": "2015-06-17",
            "settlement_date": "2015-06-15",
            "strike_price": 100.0,
            "unit_amount": {"currency": "USD", "amount": 250.0}
        }}]}"#;
        let err = Portfolio::from_json(json).unwrap_err();
        assert!(matches!(&err, CliError::Parse(m) if m.contains("BAD")));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let trade = r#"{"id": "T", "product": {"type": "Swap", "legs": [{
            "type": "Fixed", "pay_receive": "Pay",
            "start_date": "2016-01-15", "end_date": "2017-01-15", "frequency": "Annual",
            "notional": {"currency": "USD", "amount": 1000000.0},
            "rate": 0.01, "day_count": "30/360"
        }]}}"#;
        let json = format!(r#"{{"trades": [{trade}, {trade}]}}"#);
        let err = Portfolio::from_json(&json).unwrap_err();
        assert!(matches!(&err, CliError::Parse(m) if m.contains("duplicate")));
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!(parse_zone("-05:00").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(parse_zone("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_zone("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_zone("EST").is_err());
        assert!(parse_zone("+25:00").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Portfolio::load(Path::new("no/such/portfolio.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
