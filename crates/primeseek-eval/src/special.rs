//! Real-valued arithmetic with explicit failure.
//!
//! Every operation either produces a finite `f64` or an [`EvalError`];
//! nothing here panics and no NaN or infinity escapes.

use std::f64::consts::PI;

use primeseek_core::{Function, Operator};
use thiserror::Error;

/// Why a single sample could not be evaluated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("{function} is undefined at {argument}")]
    Domain {
        function: &'static str,
        argument: f64,
    },

    #[error("result is not a finite real number")]
    NonFinite,
}

/// Rejects NaN and infinities.
///
/// # Errors
///
/// [`EvalError::NonFinite`] for any non-finite value.
pub fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Applies a binary operator.
///
/// `%` is floored: the result has the sign of the divisor, so
/// `-7 % 3 == 2` and `7 % -3 == -2`.
///
/// # Errors
///
/// Division or modulo by zero, a negative base raised to a fractional
/// power, or a non-finite result.
pub fn apply_binary(op: Operator, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    let value = match op {
        Operator::Add => lhs + rhs,
        Operator::Sub => lhs - rhs,
        Operator::Mul => lhs * rhs,
        Operator::Div => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs / rhs
        }
        Operator::Rem => {
            if rhs == 0.0 {
                return Err(EvalError::ModuloByZero);
            }
            let r = lhs % rhs;
            if r != 0.0 && (r < 0.0) != (rhs < 0.0) {
                r + rhs
            } else {
                r
            }
        }
        Operator::Pow => {
            let value = lhs.powf(rhs);
            if value.is_nan() {
                return Err(EvalError::Domain {
                    function: "**",
                    argument: lhs,
                });
            }
            value
        }
    };
    finite(value)
}

/// Applies a unary function.
///
/// # Errors
///
/// Square root of a negative number, logarithm of a non-positive number,
/// Gamma at a pole, or a non-finite result.
pub fn apply_function(func: Function, x: f64) -> Result<f64, EvalError> {
    let domain = || EvalError::Domain {
        function: func.name(),
        argument: x,
    };

    let value = match func {
        Function::Sin => x.sin(),
        Function::Cos => x.cos(),
        Function::Tan => x.tan(),
        Function::Sqrt => {
            if x < 0.0 {
                return Err(domain());
            }
            x.sqrt()
        }
        Function::Cbrt => x.cbrt(),
        Function::Sinh => x.sinh(),
        Function::Cosh => x.cosh(),
        Function::Tanh => x.tanh(),
        Function::Gamma => {
            if x <= 0.0 && x == x.floor() {
                return Err(domain());
            }
            gamma(x)
        }
        Function::Abs => x.abs(),
        Function::Ln => {
            if x <= 0.0 {
                return Err(domain());
            }
            x.ln()
        }
        Function::Log2 => {
            if x <= 0.0 {
                return Err(domain());
            }
            x.log2()
        }
    };
    finite(value)
}

/// The Gamma function Γ(x) for x not a non-positive integer.
///
/// Positive integers up to 23 are returned exactly as factorials; other
/// arguments use the reflection formula below 1/2 and the Lanczos
/// approximation above it.
#[must_use]
pub fn gamma(x: f64) -> f64 {
    if x > 0.0 && x <= 23.0 && x == x.floor() {
        return factorial(x as u32 - 1);
    }

    if x < 0.5 {
        // Γ(1-x)Γ(x) = π/sin(πx)
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        lanczos_gamma(x)
    }
}

fn factorial(k: u32) -> f64 {
    (1..=k).map(f64::from).product()
}

/// Lanczos approximation for Γ(x) with x ≥ 0.5, g = 7.
fn lanczos_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    let x = x - 1.0;
    let series = COEFFS[1..]
        .iter()
        .enumerate()
        .fold(COEFFS[0], |acc, (i, c)| acc + c / (x + (i + 1) as f64));

    let t = x + G + 0.5;
    // t^(x+1/2) alone overflows from x ≈ 142; apply it in two halves around e^-t.
    let half = t.powf((x + 0.5) / 2.0);
    (2.0 * PI).sqrt() * half * ((-t).exp() * half) * series
}
