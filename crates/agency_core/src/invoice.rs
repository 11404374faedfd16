//! crates/agency_core/src/invoice.rs
//!
//! Invoice arithmetic. Amounts are held in integer cents and tax rates in
//! basis points, so line amounts always add up to the subtotal exactly.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::orchestrator::ValidationError;

pub const DEFAULT_CURRENCY: &str = "ZAR";
pub const DEFAULT_TAX_RATE: f64 = 15.0;
pub const PAYMENT_TERM_DAYS: i64 = 30;
const PLACEHOLDER_DESCRIPTION: &str = "Sample Service";

//=========================================================================================
// Money
//=========================================================================================

/// A non-negative amount in cents. Serializes as a decimal string such as `"1150.00"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(pub u64);

impl Money {
    pub fn cents(self) -> u64 {
        self.0
    }

    /// Converts a decimal amount, rounding half away from zero. Negative and
    /// non-finite input counts as zero.
    pub fn from_decimal(value: f64) -> Self {
        Money(to_hundredths(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn to_hundredths(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates on overflow.
    (value * 100.0).round() as u64
}

fn div_round(numerator: u128, denominator: u128) -> u64 {
    let rounded = (numerator + denominator / 2) / denominator;
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

pub fn currency_symbol(currency: &str) -> &'static str {
    match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "R",
    }
}

//=========================================================================================
// Request and Result Types
//=========================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceItemRequest {
    pub description: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceRequest {
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub currency: Option<String>,
    /// Percent, e.g. `15` for 15% VAT.
    pub tax_rate: Option<f64>,
    pub items: Vec<InvoiceItemRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: f64,
    pub rate: Money,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub currency_symbol: String,
    pub items: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub tax_rate: f64,
    pub tax: Money,
    pub total: Money,
}

//=========================================================================================
// Numbering
//=========================================================================================

/// Hands out sequential invoice numbers of the form `INV-001`.
#[derive(Debug, Default)]
pub struct InvoiceSequence {
    last: AtomicU32,
}

impl InvoiceSequence {
    /// Starts after `last`, so the next number is `last + 1`.
    pub fn starting_after(last: u32) -> Self {
        Self {
            last: AtomicU32::new(last),
        }
    }

    pub fn next_number(&self) -> String {
        let n = self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        format!("INV-{:03}", n)
    }
}

//=========================================================================================
// Calculation
//=========================================================================================

fn line(item: &InvoiceItemRequest) -> InvoiceLine {
    let quantity = match item.quantity {
        Some(q) if q.is_finite() && q > 0.0 => q,
        Some(q) if q.is_finite() => 0.0,
        _ => 1.0,
    };
    let rate = Money::from_decimal(item.rate.unwrap_or(0.0));
    let amount = Money(div_round(
        u128::from(to_hundredths(quantity)) * u128::from(rate.cents()),
        100,
    ));
    let description = match item.description.trim() {
        "" => PLACEHOLDER_DESCRIPTION.to_string(),
        text => text.to_string(),
    };

    InvoiceLine {
        description,
        quantity,
        rate,
        amount,
    }
}

/// Prices an invoice. `today` is the issue date when none is given.
///
/// Missing quantities count as 1 and missing rates as 0. The due date
/// defaults to 30 days after the issue date.
pub fn compute_invoice(
    request: &InvoiceRequest,
    sequence: &InvoiceSequence,
    today: NaiveDate,
) -> Result<Invoice, ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError {
            field: "items",
            message: "An invoice needs at least one item".to_string(),
        });
    }

    let items: Vec<InvoiceLine> = request.items.iter().map(line).collect();
    let subtotal = Money(items.iter().map(|l| l.amount.cents()).sum());

    let tax_rate = match request.tax_rate {
        Some(rate) if rate.is_finite() && rate >= 0.0 => rate,
        Some(_) => 0.0,
        None => DEFAULT_TAX_RATE,
    };
    let tax_basis_points = to_hundredths(tax_rate);
    let tax = Money(div_round(
        u128::from(subtotal.cents()) * u128::from(tax_basis_points),
        10_000,
    ));
    let total = Money(subtotal.cents().saturating_add(tax.cents()));

    let currency = request
        .currency
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let invoice_number = request
        .invoice_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| sequence.next_number());
    let issue_date = request.issue_date.unwrap_or(today);
    let due_date = request
        .due_date
        .unwrap_or(issue_date + Duration::days(PAYMENT_TERM_DAYS));

    Ok(Invoice {
        invoice_number,
        issue_date,
        due_date,
        currency_symbol: currency_symbol(&currency).to_string(),
        currency,
        items,
        subtotal,
        tax_rate,
        tax,
        total,
    })
}
