//! Flat-percentage withholding.

use rust_decimal::Decimal;

use crate::models::Withholding;

/// Splits gross pay into withholdings and net pay.
///
/// `withholdings = gross × percentage / 100` and `net = gross - withholdings`.
/// No rounding is applied; display code rounds to cents.
///
/// # Example
///
/// ```
/// use paycheck_engine::calculation::apply_withholding;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = apply_withholding(Decimal::from(1000), Decimal::from(20));
/// assert_eq!(result.withholdings, Decimal::from(200));
/// assert_eq!(result.net_pay, Decimal::from(800));
///
/// let result = apply_withholding(Decimal::from_str("123.45").unwrap(), Decimal::from(15));
/// assert_eq!(result.withholdings, Decimal::from_str("18.5175").unwrap());
/// ```
pub fn apply_withholding(gross_pay: Decimal, withholding_percentage: Decimal) -> Withholding {
    let withholdings = gross_pay * withholding_percentage / Decimal::ONE_HUNDRED;
    Withholding {
        withholdings,
        net_pay: gross_pay - withholdings,
    }
}
