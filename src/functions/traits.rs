/// Numeric function callable from an evolved program
pub trait Primitive: Send + Sync {
    /// Identifier used in program trees and catalogs
    fn alias(&self) -> &'static str;

    fn arity(&self) -> usize;

    /// Apply to already-evaluated arguments; `args.len() == self.arity()`
    fn execute(&self, args: &[f64]) -> f64;
}
