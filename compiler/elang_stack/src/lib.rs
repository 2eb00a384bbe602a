//! Recursion headroom for the parser and the evaluator.
//!
//! Both walk the program recursively: nested parentheses and binary
//! operators in the parser, nested expressions and user function calls in
//! the evaluator. Wrapping each recursive step in [`ensure_sufficient_stack`]
//! moves execution onto a freshly allocated stack segment whenever the
//! current one runs low.
//!
//! This is headroom, not a limit. A script that recurses forever still
//! exhausts memory eventually; there is no depth counter.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Expr {
        Lit(i64),
        Neg(Box<Expr>),
    }

    fn eval(expr: &Expr) -> i64 {
        ensure_sufficient_stack(|| match expr {
            Expr::Lit(n) => *n,
            Expr::Neg(inner) => -eval(inner),
        })
    }

    fn nested(depth: usize) -> Expr {
        let mut expr = Expr::Lit(1);
        for _ in 0..depth {
            expr = Expr::Neg(Box::new(expr));
        }
        expr
    }

    #[test]
    fn test_passes_result_through() {
        let out: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(out, Ok(7));
    }

    #[test]
    fn test_shallow_tree() {
        assert_eq!(eval(&nested(3)), -1);
    }

    #[test]
    fn test_deeply_nested_tree() {
        let expr = nested(200_000);
        assert_eq!(eval(&expr), 1);
        // Dropping the boxed chain is recursive too.
        ensure_sufficient_stack(move || drop_iteratively(expr));
    }

    fn drop_iteratively(mut expr: Expr) {
        while let Expr::Neg(inner) = expr {
            expr = *inner;
        }
    }
}
