use crate::domain::model::{EmiBreakdown, LoanTerms};
use crate::utils::error::{KisanError, Result};
use crate::utils::validation::{require_non_negative, require_positive};

fn validate_terms(terms: &LoanTerms) -> Result<()> {
    require_positive("principal", terms.principal)?;
    require_non_negative("annual_rate_percent", terms.annual_rate_percent)?;
    if terms.term_months == 0 {
        return Err(KisanError::invalid_argument(
            "term_months",
            terms.term_months,
            "Term must be at least one month",
        ));
    }
    Ok(())
}

/// Unrounded monthly installment.
///
/// With monthly rate `m = r / 1200`, this is `P / n` when `m == 0` and
/// `P·m·(1+m)^n / ((1+m)^n − 1)` otherwise, evaluated as
/// `P·m / (1 − e^(−n·ln(1+m)))` so it stays finite for every term.
pub fn exact_installment(terms: &LoanTerms) -> Result<f64> {
    validate_terms(terms)?;

    let principal = terms.principal;
    let months = terms.term_months as f64;
    let monthly_rate = terms.annual_rate_percent / 1200.0;

    if monthly_rate == 0.0 {
        return Ok(principal / months);
    }

    let discount = -(-months * monthly_rate.ln_1p()).exp_m1();
    Ok(principal * monthly_rate / discount)
}

/// Installment rounded to the nearest currency unit, with totals derived from it.
pub fn calculate_emi(terms: &LoanTerms) -> Result<EmiBreakdown> {
    let installment = exact_installment(terms)?.round();
    let total_payment = installment * terms.term_months as f64;
    let total_interest = total_payment - terms.principal;

    tracing::debug!(
        "EMI for {:.2} at {}% over {} months: {}",
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
        installment
    );

    Ok(EmiBreakdown {
        installment,
        total_payment,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(principal: f64, annual_rate_percent: f64, term_months: u32) -> LoanTerms {
        LoanTerms {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        for (p, n) in [(120_000.0, 12), (100_000.0, 7), (1.0, 1), (5_000.0, 360)] {
            assert_eq!(exact_installment(&terms(p, 0.0, n)).unwrap(), p / n as f64);
        }
    }

    #[test]
    fn test_positive_rate_exceeds_straight_division() {
        for rate in [0.5, 7.0, 12.0, 36.0] {
            let t = terms(250_000.0, rate, 24);
            assert!(exact_installment(&t).unwrap() > 250_000.0 / 24.0);
        }
    }

    #[test]
    fn test_known_value() {
        // 1,00,000 at 12% over 12 months is the textbook 8,884.88.
        let breakdown = calculate_emi(&terms(100_000.0, 12.0, 12)).unwrap();
        assert_eq!(breakdown.installment, 8_885.0);
        assert_eq!(breakdown.total_payment, 106_620.0);
        assert_eq!(breakdown.total_interest, 6_620.0);
    }

    #[test]
    fn test_total_interest_identity() {
        for (p, r, n) in [(50_000.0, 9.5, 18), (75_000.0, 0.0, 10), (1_000.0, 24.0, 3)] {
            let b = calculate_emi(&terms(p, r, n)).unwrap();
            assert_eq!(b.total_interest, b.total_payment - p);
            assert_eq!(b.total_payment, b.installment * n as f64);
        }
    }

    #[test]
    fn test_very_long_terms_stay_finite() {
        for months in [100_000, 3_000_000_000, u32::MAX] {
            let t = terms(100_000.0, 12.0, months);
            let exact = exact_installment(&t).unwrap();
            assert!(exact.is_finite());
            assert!(exact > 100_000.0 / months as f64);
            // Interest-only limit: P·m.
            assert!((exact - 1_000.0).abs() < 1e-6);

            let breakdown = calculate_emi(&t).unwrap();
            assert_eq!(breakdown.installment, 1_000.0);
            assert!(breakdown.total_payment.is_finite());
        }
    }

    #[test]
    fn test_single_month_is_principal_plus_interest() {
        let exact = exact_installment(&terms(12_000.0, 12.0, 1)).unwrap();
        assert!((exact - 12_120.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_inputs_rejected() {
        let cases = [
            terms(100_000.0, 10.0, 0),
            terms(0.0, 10.0, 12),
            terms(-1.0, 10.0, 12),
            terms(100_000.0, -1.0, 12),
            terms(f64::INFINITY, 10.0, 12),
        ];
        for case in cases {
            assert!(matches!(
                calculate_emi(&case),
                Err(KisanError::InvalidArgument { .. })
            ));
        }
    }
}
