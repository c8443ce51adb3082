//! Three ways to sum the integers 1..=n.
//!
//! All of them return `n * (n + 1) / 2`. Taking `u32` keeps the result
//! inside `u64` and makes negative input unrepresentable.

/// Iterative accumulation.
pub fn sum_to_n_loop(n: u32) -> u64 {
    let mut sum = 0u64;
    for i in 1..=u64::from(n) {
        sum += i;
    }
    sum
}

/// Closed form (arithmetic series).
pub fn sum_to_n_formula(n: u32) -> u64 {
    let n = u64::from(n);
    n * (n + 1) / 2
}

/// Largest `n` the command line accepts. The recursive strategy uses one
/// stack frame per step, so larger values can exhaust the main thread stack.
pub const MAX_DEMO_N: u32 = 10_000;

/// Recursive definition. Stack depth grows linearly with `n`; callers keep
/// `n` within `MAX_DEMO_N` or run it on a thread with a larger stack.
pub fn sum_to_n_recursive(n: u32) -> u64 {
    if n <= 1 {
        return u64::from(n);
    }
    u64::from(n) + sum_to_n_recursive(n - 1)
}

/// Labelled results of all three strategies for `n`.
pub fn demo_lines(n: u32) -> [String; 3] {
    [
        format!("Sum using loop (1 to {n}): {}", sum_to_n_loop(n)),
        format!("Sum using formula (1 to {n}): {}", sum_to_n_formula(n)),
        format!("Sum using recursion (1 to {n}): {}", sum_to_n_recursive(n)),
    ]
}
