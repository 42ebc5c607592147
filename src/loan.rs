//! Fixed-rate loan amortization: the equated monthly installment (EMI), the
//! month-by-month schedule and a yearly roll-up of that schedule.

use serde::Serialize;

/// Whole months within this distance of `term_years * 12` count as exact.
const WHOLE_MONTH_TOLERANCE: f64 = 1e-9;

/// The longest supported term, 100 years of monthly installments.
pub const MAX_INSTALLMENTS: u16 = 1200;

/// Validated loan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanInputs {
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
    installments: u16,
}

impl LoanInputs {
    /// Validate loan parameters.
    ///
    /// Returns `None` if any value is not a finite number greater than zero,
    /// or if the term is shorter than one month or longer than
    /// [MAX_INSTALLMENTS] months.
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Option<Self> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !(positive(principal) && positive(annual_rate_percent) && positive(term_years)) {
            return None;
        }

        let Some(installments) = whole_months(term_years) else {
            tracing::warn!(
                "Loan term of {term_years} years is not between one month and {MAX_INSTALLMENTS} months"
            );
            return None;
        };

        Some(Self {
            principal,
            annual_rate_percent,
            term_years,
            installments,
        })
    }

    /// Validate loan parameters typed into a form.
    ///
    /// Returns `None` if any field is not a number or fails [LoanInputs::new].
    pub fn parse(principal: &str, annual_rate_percent: &str, term_years: &str) -> Option<Self> {
        let parse = |text: &str| text.trim().parse::<f64>().ok();

        Self::new(
            parse(principal)?,
            parse(annual_rate_percent)?,
            parse(term_years)?,
        )
    }

    /// The amount borrowed.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// The yearly interest rate as a percentage, e.g. `12.0` for 12%.
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    /// The loan term in years.
    pub fn term_years(&self) -> f64 {
        self.term_years
    }

    /// The interest rate applied each month as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// The number of monthly installments.
    ///
    /// Terms that do not land on a whole month are truncated, so 1.55 years
    /// is 18 installments.
    pub fn installment_count(&self) -> u32 {
        u32::from(self.installments)
    }

    /// The equated monthly installment.
    ///
    /// Uses the discount form `P * r / (1 - (1 + r)^-n)`, which stays finite
    /// when `(1 + r)^n` would overflow.
    pub fn installment(&self) -> f64 {
        let rate = self.monthly_rate();
        let discount = 1.0 - (1.0 + rate).powi(-i32::from(self.installments));

        if discount > 0.0 {
            self.principal * rate / discount
        } else {
            // A rate too small to register in `1 + r` is no interest at all.
            self.principal / f64::from(self.installments)
        }
    }

    /// The month-by-month repayment schedule.
    pub fn schedule(&self) -> Vec<AmortizationRow> {
        let rate = self.monthly_rate();
        let installment = self.installment();
        let mut balance = self.principal;

        (1..=self.installment_count())
            .map(|month| {
                let interest_portion = balance * rate;
                let principal_portion = installment - interest_portion;
                balance -= principal_portion;

                AmortizationRow {
                    month,
                    installment,
                    principal_portion,
                    interest_portion,
                    remaining_balance: balance.max(0.0),
                }
            })
            .collect()
    }

    /// The schedule and summary together.
    pub fn amortize(self) -> Amortization {
        let schedule = self.schedule();

        tracing::debug!(
            "Amortized {} at {}% over {} months",
            self.principal,
            self.annual_rate_percent,
            schedule.len()
        );

        Amortization {
            summary: self.summary(),
            inputs: self,
            schedule,
        }
    }

    /// Totals over the whole term.
    pub fn summary(&self) -> LoanSummary {
        let installment = self.installment();
        let total_payment = installment * f64::from(self.installment_count());

        LoanSummary {
            installment,
            principal: self.principal,
            total_interest: total_payment - self.principal,
            total_payment,
        }
    }
}

/// Convert a term in years to a count of whole months within the supported
/// range.
fn whole_months(term_years: f64) -> Option<u16> {
    let months = term_years * 12.0;
    let rounded = months.round();

    let count = if (months - rounded).abs() < WHOLE_MONTH_TOLERANCE {
        rounded
    } else {
        months.floor()
    };

    if (1.0..=f64::from(MAX_INSTALLMENTS)).contains(&count) {
        // In range, so the conversion is exact.
        Some(count as u16)
    } else {
        None
    }
}

/// One month of the repayment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationRow {
    /// The installment number, starting at 1.
    pub month: u32,
    /// The amount paid this month.
    pub installment: f64,
    /// The part of the installment that reduces the balance.
    pub principal_portion: f64,
    /// The part of the installment that pays interest.
    pub interest_portion: f64,
    /// The balance after this installment, never negative.
    pub remaining_balance: f64,
}

/// Up to twelve consecutive schedule rows added together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRow {
    /// The loan year, starting at 1.
    pub year: u32,
    /// The amount paid over the year.
    pub installment: f64,
    /// The principal repaid over the year.
    pub principal_portion: f64,
    /// The interest paid over the year.
    pub interest_portion: f64,
    /// The balance after the last installment of the year.
    pub remaining_balance: f64,
}

/// Totals over the whole term of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanSummary {
    /// The equated monthly installment.
    pub installment: f64,
    /// The amount borrowed.
    pub principal: f64,
    /// Everything paid beyond the principal.
    pub total_interest: f64,
    /// Every installment added together.
    pub total_payment: f64,
}

/// A loan with its schedule and summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amortization {
    /// The validated loan parameters.
    pub inputs: LoanInputs,
    /// Totals over the whole term.
    pub summary: LoanSummary,
    /// One row per monthly installment.
    pub schedule: Vec<AmortizationRow>,
}

/// Build the schedule and summary for a loan.
///
/// Returns `None` when the inputs are rejected by [LoanInputs::new].
pub fn amortize(principal: f64, annual_rate_percent: f64, term_years: f64) -> Option<Amortization> {
    LoanInputs::new(principal, annual_rate_percent, term_years).map(LoanInputs::amortize)
}

/// Roll a monthly schedule up into loan years.
///
/// The last year may hold fewer than twelve months.
pub fn yearly(schedule: &[AmortizationRow]) -> Vec<YearlyRow> {
    schedule
        .chunks(12)
        .zip(1..)
        .map(|(months, year)| YearlyRow {
            year,
            installment: months.iter().map(|row| row.installment).sum(),
            principal_portion: months.iter().map(|row| row.principal_portion).sum(),
            interest_portion: months.iter().map(|row| row.interest_portion).sum(),
            remaining_balance: months.last().map_or(0.0, |row| row.remaining_balance),
        })
        .collect()
}
