//! Property-based tests for evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use primeseek_build::ExpressionBuilder;
    use primeseek_core::{Function, Operator, SearchConfig};
    use primeseek_space::CombinationSpace;

    use crate::outcome::{normalize, Outcome};
    use crate::special::{apply_binary, apply_function};
    use crate::EvaluationEngine;

    fn operator() -> impl Strategy<Value = Operator> {
        prop::sample::select(Operator::ALL.to_vec())
    }

    fn function() -> impl Strategy<Value = Function> {
        prop::sample::select(vec![
            Function::Sin,
            Function::Cos,
            Function::Tan,
            Function::Sqrt,
            Function::Cbrt,
            Function::Sinh,
            Function::Cosh,
            Function::Tanh,
            Function::Gamma,
            Function::Abs,
            Function::Ln,
            Function::Log2,
        ])
    }

    proptest! {
        #[test]
        fn arithmetic_never_yields_non_finite(
            op in operator(),
            lhs in -1e6f64..1e6,
            rhs in -1e6f64..1e6,
        ) {
            if let Ok(value) = apply_binary(op, lhs, rhs) {
                prop_assert!(value.is_finite());
            }
        }

        #[test]
        fn functions_never_yield_non_finite(func in function(), x in -1e3f64..1e3) {
            if let Ok(value) = apply_function(func, x) {
                prop_assert!(value.is_finite());
            }
        }

        #[test]
        fn floored_remainder_takes_divisor_sign(lhs in -1e6f64..1e6, rhs in -1e3f64..1e3) {
            prop_assume!(rhs != 0.0);
            let r = apply_binary(Operator::Rem, lhs, rhs).unwrap();
            prop_assert!(r == 0.0 || (r < 0.0) == (rhs < 0.0));
            prop_assert!(r.abs() <= rhs.abs());
        }

        #[test]
        fn normalize_is_idempotent(value in -1e6f64..1e6, tol in 0.0f64..0.4) {
            let once = normalize(value, tol);
            prop_assert_eq!(normalize(once, tol), once);
            prop_assert!((once - value).abs() <= tol);
        }

        #[test]
        fn value_sets_hold_at_most_one_outcome_per_sample(
            (nodes, seed) in (1usize..=3, any::<u64>()),
            iteration_limit in 0u32..30,
        ) {
            let space = CombinationSpace::with_shape(nodes, 1);
            let start = u128::from(seed) % space.total_candidates().unwrap();
            let config = SearchConfig {
                iteration_limit,
                ..SearchConfig::default()
            };
            let engine = EvaluationEngine::new(&config);
            let builder = ExpressionBuilder::new();

            for (_, candidate) in space.candidates_from(start).unwrap().take(16) {
                let expr = builder.build(&candidate).unwrap();
                let set = engine.evaluate(&expr);
                prop_assert!(!set.is_empty());
                prop_assert!(set.len() as u64 <= config.sample_count());
                for outcome in &set {
                    if let Outcome::Value(v) = outcome {
                        prop_assert!(v.get().is_finite());
                    }
                }
            }
        }
    }
}
