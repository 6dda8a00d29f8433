/// Upper bound on golden-section iterations.
///
/// Each iteration shrinks the bracket by the golden ratio, so 200 iterations
/// take any finite bracket below `f64` resolution.
const GOLDEN_SECTION_MAX_ITERATIONS: usize = 200;

/// Coefficient of `t^(n-k)` in the `k`-th derivative of `t^n`: `n! / (n-k)!`.
///
/// Returns `0` when `k > n` and `1` when `k == 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn falling_factorial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    ((n - k + 1)..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// `n!` as a float.
#[must_use]
pub fn factorial(n: usize) -> f64 {
    falling_factorial(n, n)
}

/// Binomial coefficient `n choose k`, zero when `k > n`.
#[must_use]
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    falling_factorial(n, k) / factorial(k)
}

/// Minimizes `f` over `[a, b]` by golden-section search.
///
/// `f` is assumed unimodal on the interval; otherwise a local minimum is
/// returned. The search stops once the bracket is narrower than `accuracy`
/// or after a fixed number of iterations, whichever comes first, so a
/// non-positive or NaN accuracy still terminates.
pub fn golden_section<F>(mut a: f64, mut b: f64, accuracy: f64, mut f: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    let sqrt5 = 5.0_f64.sqrt();
    let s1 = (3.0 - sqrt5) / 2.0;
    let s2 = (sqrt5 - 1.0) / 2.0;

    let mut u1 = a + s1 * (b - a);
    let mut u2 = a + s2 * (b - a);
    let mut fu1 = f(u1);
    let mut fu2 = f(u2);

    let mut iterations = 0;
    while (a - b).abs() > accuracy && iterations < GOLDEN_SECTION_MAX_ITERATIONS {
        if fu1 <= fu2 {
            b = u2;
            u2 = u1;
            fu2 = fu1;
            u1 = a + s1 * (b - a);
            fu1 = f(u1);
        } else {
            a = u1;
            u1 = u2;
            fu1 = fu2;
            u2 = a + s2 * (b - a);
            fu2 = f(u2);
        }
        iterations += 1;
    }

    if fu1 < fu2 {
        a
    } else {
        b
    }
}
