//! Explain cell values.

use std::fmt;

use crate::types::{Currency, CurrencyAmount, Date};

/// A single explain cell.
///
/// ```
/// use pricer_core::explain::ExplainValue;
/// use pricer_core::types::{Currency, CurrencyAmount};
///
/// let v: ExplainValue = CurrencyAmount::new(Currency::USD, 250.0).into();
/// assert_eq!(v.to_string(), "USD 250.00");
/// assert_eq!(ExplainValue::Empty.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplainValue {
    /// No value for this column on this row.
    Empty,
    /// Free text such as an entry type or index name.
    Text(String),
    /// A date.
    Date(Date),
    /// A plain number: rate, year fraction, discount factor.
    Number(f64),
    /// A currency.
    Currency(Currency),
    /// An amount of money.
    Amount(CurrencyAmount),
}

impl ExplainValue {
    /// True for [`ExplainValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, ExplainValue::Empty)
    }

    /// The numeric content of `Number` and `Amount` cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExplainValue::Number(n) => Some(*n),
            ExplainValue::Amount(a) => Some(a.amount()),
            _ => None,
        }
    }
}

impl fmt::Display for ExplainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplainValue::Empty => Ok(()),
            ExplainValue::Text(s) => write!(f, "{}", s),
            ExplainValue::Date(d) => write!(f, "{}", d),
            ExplainValue::Number(n) => write!(f, "{}", n),
            ExplainValue::Currency(c) => write!(f, "{}", c),
            ExplainValue::Amount(a) => write!(f, "{}", a),
        }
    }
}

impl From<&str> for ExplainValue {
    fn from(s: &str) -> Self {
        ExplainValue::Text(s.to_string())
    }
}

impl From<String> for ExplainValue {
    fn from(s: String) -> Self {
        ExplainValue::Text(s)
    }
}

impl From<Date> for ExplainValue {
    fn from(d: Date) -> Self {
        ExplainValue::Date(d)
    }
}

impl From<f64> for ExplainValue {
    fn from(n: f64) -> Self {
        ExplainValue::Number(n)
    }
}

impl From<Currency> for ExplainValue {
    fn from(c: Currency) -> Self {
        ExplainValue::Currency(c)
    }
}

impl From<CurrencyAmount> for ExplainValue {
    fn from(a: CurrencyAmount) -> Self {
        ExplainValue::Amount(a)
    }
}
