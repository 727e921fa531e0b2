/// A one-line conditional expression.  Rust's `if` already is an
/// expression, but `cargo fmt` spreads every one of them over five
/// lines, and the border rules of the energy calculation read far
/// better as a table of one-liners.  Only the selected arm is
/// evaluated, so `cq!(x == 0, 0, x - 1)` never underflows.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
