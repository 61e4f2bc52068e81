//! Internal Rate of Return (IRR) calculation
//!
//! The break-even discount rate of the annual net-income stream

/// Calculate the annual Internal Rate of Return for a series of annual
/// cash flows using the Newton-Raphson method, falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Annual cash flows, first at year 0 (positive = inflow, negative = outflow)
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // At least one sign change is required for IRR to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.10;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return calculate_irr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).clamp(-0.99, 10.0);

        if (new_rate - rate).abs() < tolerance {
            // A step pinned at the clamp bounds is not a root
            let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();
            if npv_at_rate(cashflows, new_rate).abs() > 1e-8 * scale {
                return calculate_irr_bisection(cashflows);
            }
            return Some(new_rate);
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows)
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection
fn calculate_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    let mut npv_low = npv_at_rate(cashflows, low);
    if npv_low * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
