//! Swap legs before resolution.

use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::{
    Currency, CurrencyAmount, Date, DayCountConvention, HolidayCalendar, IborIndex, IborIndexId,
    PayReceive,
};

use super::error::ProductError;
use super::resolved_swap::{
    IborRateComputation, KnownAmountPaymentPeriod, PaymentPeriod, RateAccrualPeriod,
    RateComputation, RatePaymentPeriod, ResolvedSwapLeg, SwapLegType,
};
use super::traits::Resolvable;
use crate::schedules::{Frequency, PeriodicSchedule, SchedulePeriod};

/// How interest accrues on a rate calculation leg.
#[derive(Debug, Clone, PartialEq)]
pub enum RateCalculation {
    /// A contractual fixed rate.
    Fixed {
        /// Annual rate, e.g. 0.015 for 1.5%
        rate: f64,
        /// Accrual day count
        day_count: DayCountConvention,
    },
    /// An Ibor index plus a spread, fixed in advance for each accrual period.
    Ibor {
        /// Index identifier, resolved against reference data
        index: IborIndexId,
        /// Spread added to the fixing
        spread: f64,
        /// Accrual day count
        day_count: DayCountConvention,
    },
}

impl RateCalculation {
    /// Day count used for accrual.
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            RateCalculation::Fixed { day_count, .. } | RateCalculation::Ibor { day_count, .. } => {
                *day_count
            }
        }
    }

    /// Fixed or Ibor.
    pub fn leg_type(&self) -> SwapLegType {
        match self {
            RateCalculation::Fixed { .. } => SwapLegType::Fixed,
            RateCalculation::Ibor { .. } => SwapLegType::Ibor,
        }
    }
}

/// A leg paying interest on a notional.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCalculationSwapLeg {
    pay_receive: PayReceive,
    accrual_schedule: PeriodicSchedule,
    payment_frequency: Frequency,
    payment_offset_days: i32,
    notional: CurrencyAmount,
    calculation: RateCalculation,
}

impl RateCalculationSwapLeg {
    /// Creates a rate calculation leg.
    ///
    /// # Errors
    ///
    /// - `ProductError::InvalidFrequency` unless the payment frequency is a
    ///   whole multiple of the accrual frequency
    /// - `ProductError::InvalidParameter` for a non-finite rate, spread or notional
    pub fn new(
        pay_receive: PayReceive,
        accrual_schedule: PeriodicSchedule,
        payment_frequency: Frequency,
        payment_offset_days: i32,
        notional: CurrencyAmount,
        calculation: RateCalculation,
    ) -> Result<Self, ProductError> {
        if payment_frequency
            .multiple_of(accrual_schedule.frequency())
            .is_none()
        {
            return Err(ProductError::InvalidFrequency {
                payment: payment_frequency.to_string(),
                accrual: accrual_schedule.frequency().to_string(),
            });
        }
        let rate_like = match &calculation {
            RateCalculation::Fixed { rate, .. } => *rate,
            RateCalculation::Ibor { spread, .. } => *spread,
        };
        if !rate_like.is_finite() || !notional.amount().is_finite() {
            return Err(ProductError::InvalidParameter {
                message: "rate, spread and notional must be finite".to_string(),
            });
        }
        Ok(Self {
            pay_receive,
            accrual_schedule,
            payment_frequency,
            payment_offset_days,
            notional,
            calculation,
        })
    }

    /// Whether the holder pays or receives.
    pub fn pay_receive(&self) -> PayReceive {
        self.pay_receive
    }

    /// Accrual schedule.
    pub fn accrual_schedule(&self) -> &PeriodicSchedule {
        &self.accrual_schedule
    }

    /// Payment frequency.
    pub fn payment_frequency(&self) -> Frequency {
        self.payment_frequency
    }

    /// Business days from period end to payment.
    pub fn payment_offset_days(&self) -> i32 {
        self.payment_offset_days
    }

    /// Unsigned notional.
    pub fn notional(&self) -> CurrencyAmount {
        self.notional
    }

    /// Rate calculation.
    pub fn calculation(&self) -> &RateCalculation {
        &self.calculation
    }

    fn resolve_accrual(&self, period: &SchedulePeriod, rate: &AccrualRate<'_>) -> RateAccrualPeriod {
        let (rate_computation, spread) = match *rate {
            AccrualRate::Fixed(rate) => (RateComputation::Fixed(rate), 0.0),
            AccrualRate::Ibor {
                index,
                fixing_calendar,
                spread,
            } => {
                let fixing_date = index.fixing_date(period.start(), fixing_calendar);
                let effective_date = index.effective_date(fixing_date, fixing_calendar);
                let maturity_date = index.maturity_date(effective_date, fixing_calendar);
                let computation = IborRateComputation {
                    index: index.clone(),
                    fixing_date,
                    effective_date,
                    maturity_date,
                    year_fraction: index
                        .day_count()
                        .year_fraction_dates(effective_date, maturity_date),
                };
                (RateComputation::Ibor(computation), spread)
            }
        };
        RateAccrualPeriod {
            start_date: period.start(),
            end_date: period.end(),
            year_fraction: period.year_fraction(self.calculation.day_count()),
            rate_computation,
            spread,
        }
    }
}

/// Rate calculation with its reference data looked up.
enum AccrualRate<'a> {
    Fixed(f64),
    Ibor {
        index: &'a IborIndex,
        fixing_calendar: &'a HolidayCalendar,
        spread: f64,
    },
}

impl Resolvable for RateCalculationSwapLeg {
    type Resolved = ResolvedSwapLeg;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedSwapLeg, ReferenceDataError> {
        let schedule = self.accrual_schedule.resolve(ref_data)?;
        let groups = schedule.group_by(self.payment_frequency).expect(
            "payment frequency is a multiple of the accrual frequency, checked in RateCalculationSwapLeg::new",
        );

        let rate = match &self.calculation {
            RateCalculation::Fixed { rate, .. } => AccrualRate::Fixed(*rate),
            RateCalculation::Ibor { index, spread, .. } => {
                let index = ref_data.get(index)?;
                AccrualRate::Ibor {
                    index,
                    fixing_calendar: ref_data.get(index.fixing_calendar())?,
                    spread: *spread,
                }
            }
        };

        let payment_calendar = if self.payment_offset_days != 0 {
            Some(ref_data.get(&self.accrual_schedule.adjustment().calendar)?)
        } else {
            None
        };

        let currency = self.notional.currency();
        let notional = self.pay_receive.normalize(self.notional.amount());
        let periods = groups
            .into_iter()
            .map(|group| {
                let accrual_periods: Vec<RateAccrualPeriod> = group
                    .iter()
                    .map(|period| self.resolve_accrual(period, &rate))
                    .collect();
                let end = group[group.len() - 1].end();
                PaymentPeriod::Rate(RatePaymentPeriod {
                    payment_date: payment_date(end, self.payment_offset_days, payment_calendar),
                    currency,
                    notional,
                    accrual_periods,
                })
            })
            .collect();

        Ok(resolved_leg(
            self.calculation.leg_type(),
            self.pay_receive,
            currency,
            periods,
        ))
    }
}

/// A leg of contractually known amounts, one per schedule period.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownAmountSwapLeg {
    pay_receive: PayReceive,
    payment_schedule: PeriodicSchedule,
    amount: CurrencyAmount,
}

impl KnownAmountSwapLeg {
    /// Creates a known amount leg.
    ///
    /// # Errors
    ///
    /// `ProductError::InvalidParameter` for a non-finite amount.
    pub fn new(
        pay_receive: PayReceive,
        payment_schedule: PeriodicSchedule,
        amount: CurrencyAmount,
    ) -> Result<Self, ProductError> {
        if !amount.amount().is_finite() {
            return Err(ProductError::InvalidParameter {
                message: "known amount must be finite".to_string(),
            });
        }
        Ok(Self {
            pay_receive,
            payment_schedule,
            amount,
        })
    }

    /// Whether the holder pays or receives.
    pub fn pay_receive(&self) -> PayReceive {
        self.pay_receive
    }

    /// Payment schedule.
    pub fn payment_schedule(&self) -> &PeriodicSchedule {
        &self.payment_schedule
    }

    /// Unsigned amount paid each period.
    pub fn amount(&self) -> CurrencyAmount {
        self.amount
    }
}

impl Resolvable for KnownAmountSwapLeg {
    type Resolved = ResolvedSwapLeg;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedSwapLeg, ReferenceDataError> {
        let schedule = self.payment_schedule.resolve(ref_data)?;
        let currency = self.amount.currency();
        let amount = self.pay_receive.normalize(self.amount.amount());
        let periods = schedule
            .periods()
            .iter()
            .map(|p| {
                PaymentPeriod::KnownAmount(KnownAmountPaymentPeriod {
                    payment_date: p.end(),
                    start_date: p.start(),
                    end_date: p.end(),
                    currency,
                    amount,
                })
            })
            .collect();
        Ok(resolved_leg(SwapLegType::Other, self.pay_receive, currency, periods))
    }
}

/// One leg of a swap.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapLeg {
    /// Interest on a notional.
    RateCalculation(RateCalculationSwapLeg),
    /// Known amounts.
    KnownAmount(KnownAmountSwapLeg),
}

impl SwapLeg {
    /// Whether the holder pays or receives.
    pub fn pay_receive(&self) -> PayReceive {
        match self {
            SwapLeg::RateCalculation(leg) => leg.pay_receive(),
            SwapLeg::KnownAmount(leg) => leg.pay_receive(),
        }
    }

    /// Leg currency.
    pub fn currency(&self) -> Currency {
        match self {
            SwapLeg::RateCalculation(leg) => leg.notional().currency(),
            SwapLeg::KnownAmount(leg) => leg.amount().currency(),
        }
    }

    /// Fixed, Ibor or Other.
    pub fn leg_type(&self) -> SwapLegType {
        match self {
            SwapLeg::RateCalculation(leg) => leg.calculation().leg_type(),
            SwapLeg::KnownAmount(_) => SwapLegType::Other,
        }
    }

    /// Unadjusted start of the leg schedule.
    pub fn start_date(&self) -> Date {
        match self {
            SwapLeg::RateCalculation(leg) => leg.accrual_schedule().start_date(),
            SwapLeg::KnownAmount(leg) => leg.payment_schedule().start_date(),
        }
    }

    /// Unadjusted end of the leg schedule.
    pub fn end_date(&self) -> Date {
        match self {
            SwapLeg::RateCalculation(leg) => leg.accrual_schedule().end_date(),
            SwapLeg::KnownAmount(leg) => leg.payment_schedule().end_date(),
        }
    }
}

impl Resolvable for SwapLeg {
    type Resolved = ResolvedSwapLeg;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedSwapLeg, ReferenceDataError> {
        match self {
            SwapLeg::RateCalculation(leg) => leg.resolve(ref_data),
            SwapLeg::KnownAmount(leg) => leg.resolve(ref_data),
        }
    }
}

fn payment_date(end: Date, offset_days: i32, calendar: Option<&HolidayCalendar>) -> Date {
    match calendar {
        Some(calendar) => calendar.add_business_days(end, offset_days),
        None => end,
    }
}

fn resolved_leg(
    leg_type: SwapLegType,
    pay_receive: PayReceive,
    currency: Currency,
    periods: Vec<PaymentPeriod>,
) -> ResolvedSwapLeg {
    ResolvedSwapLeg::from_resolution(leg_type, pay_receive, currency, periods)
}
