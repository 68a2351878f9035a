//! Swaptions and their resolved form.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime};
use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::{
    AdjustableDate, Currency, Date, IborIndex, IborIndexId, LongShort, PayReceive,
};

use super::error::ProductError;
use super::resolved_swap::{ResolvedSwap, ResolvedSwapLeg, SwapLegType};
use super::swap::Swap;
use super::swap_leg::{RateCalculation, SwapLeg};
use super::traits::Resolvable;

/// How a cash-settled swaption's settlement amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CashSettlementMethod {
    /// Annuity discounted at the forward swap rate, compounded at the fixed leg frequency.
    ParYield,
    /// Annuity discounted with zero-coupon factors at the forward swap rate.
    ZeroCouponYield,
}

impl fmt::Display for CashSettlementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashSettlementMethod::ParYield => write!(f, "ParYield"),
            CashSettlementMethod::ZeroCouponYield => write!(f, "ZeroCouponYield"),
        }
    }
}

/// Settlement terms before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SwaptionSettlement {
    /// The underlying swap is entered into on exercise.
    Physical,
    /// A cash amount is paid on exercise.
    Cash {
        /// Settlement computation
        method: CashSettlementMethod,
        /// Date the cash amount is paid
        settlement_date: AdjustableDate,
    },
}

/// Settlement terms with the settlement date adjusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedSwaptionSettlement {
    /// The underlying swap is entered into on exercise.
    Physical,
    /// A cash amount is paid on exercise.
    Cash {
        /// Settlement computation
        method: CashSettlementMethod,
        /// Adjusted payment date
        settlement_date: Date,
    },
}

impl ResolvedSwaptionSettlement {
    /// True for cash settlement.
    pub fn is_cash(&self) -> bool {
        matches!(self, ResolvedSwaptionSettlement::Cash { .. })
    }
}

/// An option to enter into an interest rate swap.
///
/// # Invariants
///
/// - the underlying swap is in a single currency
/// - it has at least one Ibor leg
/// - the unadjusted expiry date is not after the underlying start date
#[derive(Debug, Clone, PartialEq)]
pub struct Swaption {
    long_short: LongShort,
    settlement: SwaptionSettlement,
    expiry_date: AdjustableDate,
    expiry_time: NaiveTime,
    expiry_zone: FixedOffset,
    underlying: Swap,
    currency: Currency,
    index: IborIndexId,
}

impl Swaption {
    /// Creates a swaption.
    ///
    /// # Errors
    ///
    /// - `ProductError::CrossCurrency` if the underlying has several currencies
    /// - `ProductError::NoFloatingIndex` if the underlying has no Ibor leg
    /// - `ProductError::InvalidParameter` unless the underlying is one fixed leg plus Ibor legs
    /// - `ProductError::DateOrder` if expiry is after the underlying start
    pub fn new(
        long_short: LongShort,
        settlement: SwaptionSettlement,
        expiry_date: AdjustableDate,
        expiry_time: NaiveTime,
        expiry_zone: FixedOffset,
        underlying: Swap,
    ) -> Result<Self, ProductError> {
        let currencies: Vec<Currency> = underlying.all_currencies().into_iter().collect();
        let currency = match currencies.as_slice() {
            [single] => *single,
            _ => return Err(ProductError::CrossCurrency { currencies }),
        };
        let index = underlying
            .legs()
            .iter()
            .find_map(|leg| match leg {
                SwapLeg::RateCalculation(leg) => match leg.calculation() {
                    RateCalculation::Ibor { index, .. } => Some(index.clone()),
                    RateCalculation::Fixed { .. } => None,
                },
                SwapLeg::KnownAmount(_) => None,
            })
            .ok_or(ProductError::NoFloatingIndex)?;
        check_underlying_legs(underlying.legs().iter().map(SwapLeg::leg_type))?;

        let start = underlying
            .legs()
            .iter()
            .map(SwapLeg::start_date)
            .min()
            .expect("Swap::new rejects a swap without legs");
        if expiry_date.unadjusted > start {
            return Err(ProductError::DateOrder {
                first: "expiry date",
                first_date: expiry_date.unadjusted,
                second: "underlying start date",
                second_date: start,
            });
        }

        Ok(Self {
            long_short,
            settlement,
            expiry_date,
            expiry_time,
            expiry_zone,
            underlying,
            currency,
            index,
        })
    }

    /// Long or short the option.
    pub fn long_short(&self) -> LongShort {
        self.long_short
    }

    /// Settlement terms.
    pub fn settlement(&self) -> &SwaptionSettlement {
        &self.settlement
    }

    /// Expiry date, before adjustment.
    pub fn expiry_date(&self) -> &AdjustableDate {
        &self.expiry_date
    }

    /// Local time of expiry.
    pub fn expiry_time(&self) -> NaiveTime {
        self.expiry_time
    }

    /// Zone of the expiry time.
    pub fn expiry_zone(&self) -> FixedOffset {
        self.expiry_zone
    }

    /// The swap entered into on exercise.
    pub fn underlying(&self) -> &Swap {
        &self.underlying
    }

    /// Currency of the underlying.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// First Ibor index of the underlying.
    pub fn index(&self) -> &IborIndexId {
        &self.index
    }
}

impl Resolvable for Swaption {
    type Resolved = ResolvedSwaption;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedSwaption, ReferenceDataError> {
        let expiry_date = self.expiry_date.adjusted(ref_data)?;
        let settlement = match &self.settlement {
            SwaptionSettlement::Physical => ResolvedSwaptionSettlement::Physical,
            SwaptionSettlement::Cash {
                method,
                settlement_date,
            } => ResolvedSwaptionSettlement::Cash {
                method: *method,
                settlement_date: settlement_date.adjusted(ref_data)?,
            },
        };
        let index = ref_data.get(&self.index)?.clone();
        let underlying = self.underlying.resolve(ref_data)?;

        Ok(ResolvedSwaption {
            long_short: self.long_short,
            settlement,
            expiry: zoned_expiry(expiry_date, self.expiry_time, self.expiry_zone),
            underlying,
            currency: self.currency,
            index,
        })
    }
}

/// Exactly one fixed leg; every other leg floats on an Ibor index.
fn check_underlying_legs(
    leg_types: impl Iterator<Item = SwapLegType>,
) -> Result<(), ProductError> {
    let (mut fixed, mut other) = (0, 0);
    for leg_type in leg_types {
        match leg_type {
            SwapLegType::Fixed => fixed += 1,
            SwapLegType::Ibor => {}
            SwapLegType::Other => other += 1,
        }
    }
    if fixed != 1 || other > 0 {
        return Err(ProductError::InvalidParameter {
            message: format!(
                "swaption underlying must be one fixed leg plus Ibor legs, \
                 found {fixed} fixed and {other} other"
            ),
        });
    }
    Ok(())
}

fn zoned_expiry(date: Date, time: NaiveTime, zone: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.into_inner().and_time(time);
    let utc = local - Duration::seconds(i64::from(zone.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, zone)
}

/// A swaption with every date fixed, ready for pricing.
///
/// A single currency and a floating index are checked when the value is
/// built, so [`currency`](Self::currency) and [`index`](Self::index) cannot fail.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, FixedOffset};
/// use pricer_core::types::{Currency, LongShort};
/// use pricer_models::products::{ResolvedSwaption, ResolvedSwaptionSettlement};
/// # use pricer_core::reference_data::ReferenceData;
/// # use pricer_core::types::{BusinessDayAdjustment, CurrencyAmount, Date, DayCountConvention, IborIndexId, PayReceive};
/// # use pricer_models::products::{RateCalculation, RateCalculationSwapLeg, Resolvable, Swap, SwapLeg};
/// # use pricer_models::schedules::{Frequency, PeriodicSchedule};
/// # let schedule = PeriodicSchedule::new(
/// #     Date::from_ymd(2016, 1, 15).unwrap(),
/// #     Date::from_ymd(2021, 1, 15).unwrap(),
/// #     Frequency::Quarterly,
/// #     BusinessDayAdjustment::none(),
/// # ).unwrap();
/// # let fixed = RateCalculationSwapLeg::new(
/// #     PayReceive::Pay,
/// #     schedule.clone(),
/// #     Frequency::Quarterly,
/// #     0,
/// #     CurrencyAmount::new(Currency::USD, 1_000_000.0),
/// #     RateCalculation::Fixed { rate: 0.015, day_count: DayCountConvention::Thirty360 },
/// # ).unwrap();
/// # let ibor = RateCalculationSwapLeg::new(
/// #     PayReceive::Receive,
/// #     schedule,
/// #     Frequency::Quarterly,
/// #     0,
/// #     CurrencyAmount::new(Currency::USD, 1_000_000.0),
/// #     RateCalculation::Ibor {
/// #         index: IborIndexId::new("USD-LIBOR-3M"),
/// #         spread: 0.0,
/// #         day_count: DayCountConvention::ActualActual360,
/// #     },
/// # ).unwrap();
/// # let underlying = Swap::new(vec![SwapLeg::RateCalculation(fixed), SwapLeg::RateCalculation(ibor)])
/// #     .unwrap()
/// #     .resolve(&ReferenceData::standard())
/// #     .unwrap();
/// let expiry = DateTime::<FixedOffset>::parse_from_rfc3339("2016-01-13T11:00:00-05:00").unwrap();
/// let swaption = ResolvedSwaption::new(
///     LongShort::Long,
///     ResolvedSwaptionSettlement::Physical,
///     expiry,
///     underlying,
/// )
/// .unwrap();
///
/// assert_eq!(swaption.currency(), Currency::USD);
/// assert_eq!(swaption.index().id().name(), "USD-LIBOR-3M");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSwaption {
    long_short: LongShort,
    settlement: ResolvedSwaptionSettlement,
    expiry: DateTime<FixedOffset>,
    underlying: ResolvedSwap,
    currency: Currency,
    index: IborIndex,
}

impl ResolvedSwaption {
    /// Creates a resolved swaption.
    ///
    /// # Errors
    ///
    /// - `ProductError::CrossCurrency` if the underlying has several currencies
    /// - `ProductError::NoFloatingIndex` if the underlying has no Ibor leg
    /// - `ProductError::InvalidParameter` unless the underlying is one fixed leg plus Ibor legs
    pub fn new(
        long_short: LongShort,
        settlement: ResolvedSwaptionSettlement,
        expiry: DateTime<FixedOffset>,
        underlying: ResolvedSwap,
    ) -> Result<Self, ProductError> {
        let currencies: Vec<Currency> = underlying.all_currencies().into_iter().collect();
        let currency = match currencies.as_slice() {
            [single] => *single,
            _ => return Err(ProductError::CrossCurrency { currencies }),
        };
        let index = underlying
            .legs_of_type(SwapLegType::Ibor)
            .find_map(|leg| leg.index())
            .cloned()
            .ok_or(ProductError::NoFloatingIndex)?;
        check_underlying_legs(underlying.legs().iter().map(ResolvedSwapLeg::leg_type))?;
        Ok(Self {
            long_short,
            settlement,
            expiry,
            underlying,
            currency,
            index,
        })
    }

    /// Long or short the option.
    pub fn long_short(&self) -> LongShort {
        self.long_short
    }

    /// Settlement terms.
    pub fn settlement(&self) -> &ResolvedSwaptionSettlement {
        &self.settlement
    }

    /// Expiry instant, in the zone it was agreed in.
    pub fn expiry(&self) -> DateTime<FixedOffset> {
        self.expiry
    }

    /// Local date of expiry.
    pub fn expiry_date(&self) -> Date {
        Date::from(self.expiry.date_naive())
    }

    /// The resolved underlying swap.
    pub fn underlying(&self) -> &ResolvedSwap {
        &self.underlying
    }

    /// The single currency of the underlying.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The first floating-rate index of the underlying.
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// True if exercise means paying the fixed rate.
    pub fn is_payer(&self) -> bool {
        self.underlying
            .legs_of_type(SwapLegType::Fixed)
            .next()
            .is_some_and(|leg| leg.pay_receive() == PayReceive::Pay)
    }

    /// Cash settlement date, or the underlying start date when settled physically.
    pub fn settlement_date(&self) -> Date {
        match self.settlement {
            ResolvedSwaptionSettlement::Cash {
                settlement_date, ..
            } => settlement_date,
            ResolvedSwaptionSettlement::Physical => self.underlying.start_date(),
        }
    }
}
