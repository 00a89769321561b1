//! `br_installment` is a Rust library for calculating installment purchase plans
//! with simple (non-compound) interest, as commonly advertised in Brazilian retail.
//!
//! It provides tools to:
//! - Apply a percentage discount to a base price and report the savings.
//! - Compute the flat simple-interest total, the total to pay, and the value of
//!   each installment.
//! - Build a month-by-month amortization schedule where the installment value,
//!   the monthly interest, and the amortization are constant.
//! - Parse form-style input (comma accepted as decimal separator) and format
//!   monetary values for BRL display (`R$ 1.234,56`).
//!
//! ## Usage
//!
//! Add `br_installment` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! br_installment = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use the `calculate_installment_plan` function to get the summary and
//! the amortization schedule:
//!
//! ```rust
//! use br_installment::{calculate_installment_plan, format_brl, CalculationInput};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let input = CalculationInput {
//!         price: dec!(1000),
//!         discount_percent: dec!(10),
//!         monthly_rate_percent: dec!(2),
//!         installment_count: 3,
//!     };
//!
//!     match calculate_installment_plan(input) {
//!         Ok(plan) => {
//!             println!("Discounted price: {}", format_brl(plan.result.discounted_price));
//!             println!("Installment:      {}", format_brl(plan.result.installment_value));
//!             println!("Total to pay:     {}", format_brl(plan.result.total_to_pay));
//!             println!("Savings:          {}", format_brl(plan.result.savings));
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating installment plan: {}", e);
//!         }
//!     }
//! }
//! ```

use std::str::FromStr;

use serde::{Serialize, Deserialize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Errors produced while validating calculation input.
///
/// Every failure is a user-correctable input issue, detected before any
/// computation runs. Non-numeric text in a field maps to the same variant as
/// that field's range rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// The price is missing, non-numeric, or not greater than zero.
    #[error("Price must be a number greater than zero.")]
    InvalidPrice,
    /// The discount is non-numeric or negative.
    #[error("Discount must be a number greater than or equal to zero.")]
    InvalidDiscount,
    /// The monthly interest rate is non-numeric or negative.
    #[error("Monthly interest rate must be a number greater than or equal to zero.")]
    InvalidRate,
    /// The installment count is not a whole number of at least one.
    #[error("Number of installments must be a whole number of at least one.")]
    InvalidInstallments,
}

/// The four form fields as submitted, before parsing.
///
/// Decimal fields accept a comma as the decimal separator, so `"1000,50"`
/// and `"1000.50"` parse to the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCalculationInput {
    /// Base price of the purchase.
    pub price: String,
    /// Discount over the base price, as a percentage.
    pub discount_percent: String,
    /// Monthly interest rate, as a percentage.
    pub monthly_rate_percent: String,
    /// Number of monthly installments.
    pub installment_count: String,
}

impl RawCalculationInput {
    /// Parses and validates the raw fields into a [`CalculationInput`].
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] variant of the first field that is
    /// non-numeric or out of range, in field order: price, discount, rate,
    /// installment count.
    pub fn parse(&self) -> Result<CalculationInput, ValidationError> {
        let price = parse_decimal_input(&self.price)
            .ok_or(ValidationError::InvalidPrice)?;
        let discount_percent = parse_decimal_input(&self.discount_percent)
            .ok_or(ValidationError::InvalidDiscount)?;
        let monthly_rate_percent = parse_decimal_input(&self.monthly_rate_percent)
            .ok_or(ValidationError::InvalidRate)?;
        let installment_count = self.installment_count.trim().parse::<u32>()
            .map_err(|_| ValidationError::InvalidInstallments)?;

        let input = CalculationInput {
            price,
            discount_percent,
            monthly_rate_percent,
            installment_count,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Validated input parameters for an installment plan calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Base price of the purchase. Must be greater than zero.
    pub price: Decimal,
    /// Discount as a percentage (e.g., 10 for 10%). Must not be negative.
    pub discount_percent: Decimal,
    /// Monthly interest rate as a percentage (e.g., 2 for 2% per month).
    /// Must not be negative.
    pub monthly_rate_percent: Decimal,
    /// Number of monthly installments. Must be at least one.
    pub installment_count: u32,
}

impl CalculationInput {
    /// Checks the range rules for each field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] if the price is not greater
    /// than zero, [`ValidationError::InvalidDiscount`] if the discount is
    /// negative, [`ValidationError::InvalidRate`] if the rate is negative, or
    /// [`ValidationError::InvalidInstallments`] if the count is below one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price <= dec!(0) {
            return Err(ValidationError::InvalidPrice);
        }
        if self.discount_percent < dec!(0) {
            return Err(ValidationError::InvalidDiscount);
        }
        if self.monthly_rate_percent < dec!(0) {
            return Err(ValidationError::InvalidRate);
        }
        if self.installment_count < 1 {
            return Err(ValidationError::InvalidInstallments);
        }
        Ok(())
    }
}

/// Summary figures derived from a [`CalculationInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The price after the discount is applied.
    pub discounted_price: Decimal,
    /// The monthly interest rate as a decimal fraction (e.g., 0.02 for 2%).
    pub monthly_rate: Decimal,
    /// The total simple interest over all installments.
    pub total_interest: Decimal,
    /// The discounted price plus the total interest.
    pub total_to_pay: Decimal,
    /// The value of each installment.
    pub installment_value: Decimal,
    /// The difference between the base price and the discounted price.
    pub savings: Decimal,
}

/// Represents one month of the amortization schedule.
///
/// Under the flat simple-interest model the installment value, the monthly
/// interest, and the amortization are the same in every row; only the
/// remaining principal changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// The month number, starting at 1.
    pub month: u32,
    /// The value of the installment paid this month.
    pub installment_value: Decimal,
    /// The interest portion of this month's installment.
    pub monthly_interest: Decimal,
    /// The portion of this month's installment that reduces the principal.
    pub amortization: Decimal,
    /// The principal still owed after this month's payment, clamped at zero.
    pub remaining_principal: Decimal,
}

/// The complete output of one calculation: summary plus schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// The summary figures.
    pub result: CalculationResult,
    /// One row per installment, in month order.
    pub schedule: Vec<ScheduleRow>,
}

/// Parses a form-style decimal field.
///
/// Trims surrounding whitespace and accepts a comma as the decimal separator,
/// so `"1000,50"` parses the same as `"1000.50"`. Returns `None` when the
/// field is empty or non-numeric.
pub fn parse_decimal_input(value: &str) -> Option<Decimal> {
    let normalized = value.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Normalizes a percentage to a decimal fraction.
///
/// This function converts a rate like 2% per month into its 0.02 multiplier
/// for use in the interest and discount formulas.
pub fn normalize_percent_rate(input: Decimal) -> Decimal {
    return input / dec!(100);
}

/// Calculates the summary figures for an installment purchase.
///
/// The interest model is simple (non-compound): the total interest is
/// `discounted_price * monthly_rate * installment_count`, flat across all
/// installments. Values keep full precision; rounding happens only at
/// display time via [`format_brl`].
///
/// # Arguments
///
/// * `input` - A validated [`CalculationInput`].
pub fn calculate_summary(input: &CalculationInput) -> CalculationResult {
    let discounted_price =
        input.price * (dec!(1) - normalize_percent_rate(input.discount_percent));
    let monthly_rate = normalize_percent_rate(input.monthly_rate_percent);

    // Simple interest: J = P * i * n
    let total_interest = discounted_price * monthly_rate * Decimal::from(input.installment_count);
    let total_to_pay = discounted_price + total_interest;
    let installment_value = total_to_pay / Decimal::from(input.installment_count);
    let savings = input.price - discounted_price;

    CalculationResult {
        discounted_price,
        monthly_rate,
        total_interest,
        total_to_pay,
        installment_value,
        savings,
    }
}

/// Builds the amortization schedule for a calculated plan.
///
/// Produces exactly `installment_count` rows. The amortization is constant
/// (`discounted_price / installment_count`) and the remaining principal after
/// month `m` is `discounted_price - amortization * m`, clamped at zero.
pub fn build_schedule(result: &CalculationResult, input: &CalculationInput) -> Vec<ScheduleRow> {
    let monthly_interest = result.discounted_price * result.monthly_rate;
    let amortization = result.discounted_price / Decimal::from(input.installment_count);

    let mut schedule = Vec::with_capacity(input.installment_count as usize);
    for month in 1..=input.installment_count {
        let remaining_principal =
            (result.discounted_price - amortization * Decimal::from(month)).max(dec!(0));
        schedule.push(ScheduleRow {
            month,
            installment_value: result.installment_value,
            monthly_interest,
            amortization,
            remaining_principal,
        });
    }
    schedule
}

/// Calculates the full installment plan: summary figures plus schedule.
///
/// This is the main entry point of the library. It validates the input and
/// returns a struct containing the summary and the month-by-month schedule.
///
/// # Arguments
///
/// * `input` - A `CalculationInput` struct with the price, discount, monthly
///   rate, and installment count.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any field is out of range; no partial
/// result is produced on failure.
pub fn calculate_installment_plan(
    input: CalculationInput,
) -> Result<InstallmentPlan, ValidationError> {
    input.validate()?;

    let result = calculate_summary(&input);
    let schedule = build_schedule(&result, &input);

    Ok(InstallmentPlan { result, schedule })
}

/// Parses raw form fields and calculates the full installment plan.
///
/// Convenience for the form-submission flow: equivalent to calling
/// [`RawCalculationInput::parse`] followed by [`calculate_installment_plan`].
///
/// # Errors
///
/// Returns a [`ValidationError`] if any field is non-numeric or out of range.
pub fn calculate_from_form(form: &RawCalculationInput) -> Result<InstallmentPlan, ValidationError> {
    calculate_installment_plan(form.parse()?)
}

/// Formats a monetary value for BRL display.
///
/// Rounds to two decimal places and renders in the fixed pt-BR convention:
/// `.` as the thousands separator, `,` as the decimal separator, e.g.
/// `R$ 1.234,56`. Negative values carry a leading minus: `-R$ 12,50`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), format!("{:0<2}", fraction)),
        None => (text, "00".to_string()),
    };

    let mut reversed = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().rev().enumerate() {
        if position > 0 && position % 3 == 0 {
            reversed.push('.');
        }
        reversed.push(digit);
    }
    let grouped: String = reversed.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, fraction)
}
