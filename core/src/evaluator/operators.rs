//! Arithmetic on exact decimal values.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, Zero};

use crate::evaluator::EvalError;
use crate::syntax::BinOp;

/// Fractional digits kept by division. Addition, subtraction and
/// multiplication are exact; division is the one place inexactness enters.
pub const DIV_SCALE: i64 = 20;

pub(crate) fn eval_binary(
    op: BinOp,
    left: BigDecimal,
    right: BigDecimal,
) -> Result<BigDecimal, EvalError> {
    match op {
        BinOp::Add => Ok(left + right),
        BinOp::Sub => Ok(left - right),
        BinOp::Mul => Ok(left * right),
        BinOp::Div => div_half_up(&left, &right),
    }
}

/// Division at exactly [`DIV_SCALE`] fractional digits, rounding half up
/// (ties away from zero).
///
/// Works on the underlying integers so the rounding decision sees the exact
/// quotient. Going through `BigDecimal`'s own division would round to its
/// default precision first and only then rescale, which can round twice.
pub(crate) fn div_half_up(
    left: &BigDecimal,
    right: &BigDecimal,
) -> Result<BigDecimal, EvalError> {
    if right.is_zero() {
        return Err(EvalError::DivisionByZero);
    }

    let (left_int, left_scale) = left.as_bigint_and_exponent();
    let (right_int, right_scale) = right.as_bigint_and_exponent();

    // left/right == left_int/right_int * 10^(right_scale - left_scale), so
    // scaling the numerator by 10^(DIV_SCALE + right_scale - left_scale)
    // makes the integer quotient the result's digits at DIV_SCALE.
    let shift = DIV_SCALE + right_scale - left_scale;
    let (numer, denom) = if shift >= 0 {
        (left_int * pow10(shift as u32), right_int)
    } else {
        (left_int, right_int * pow10((-shift) as u32))
    };

    let quotient = &numer / &denom;
    let remainder = &numer % &denom;
    let round_away = remainder.magnitude() * 2u32 >= *denom.magnitude();
    let digits = if !round_away {
        quotient
    } else if numer.sign() == denom.sign() {
        quotient + BigInt::from(1)
    } else {
        quotient - BigInt::from(1)
    };

    Ok(BigDecimal::new(digits, DIV_SCALE))
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10).pow(exp)
}
