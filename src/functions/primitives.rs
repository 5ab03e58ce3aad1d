use crate::functions::traits::Primitive;

// --- Conditional ---
/// `iflte(a, b, then, else)`: `then` when `a <= b`, otherwise `else`
pub struct IfLte;

impl Primitive for IfLte {
    fn alias(&self) -> &'static str { "iflte" }
    fn arity(&self) -> usize { 4 }
    fn execute(&self, args: &[f64]) -> f64 {
        if args[0] <= args[1] { args[2] } else { args[3] }
    }
}

// --- Arithmetic ---
pub struct Add;

impl Primitive for Add {
    fn alias(&self) -> &'static str { "add" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> f64 { args[0] + args[1] }
}

pub struct Subtract;

impl Primitive for Subtract {
    fn alias(&self) -> &'static str { "sub" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> f64 { args[0] - args[1] }
}

pub struct Multiply;

impl Primitive for Multiply {
    fn alias(&self) -> &'static str { "mul" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> f64 { args[0] * args[1] }
}

/// Protected division: a zero divisor yields 1.0
pub struct Divide;

impl Primitive for Divide {
    fn alias(&self) -> &'static str { "div" }
    fn arity(&self) -> usize { 2 }
    fn execute(&self, args: &[f64]) -> f64 {
        if args[1] == 0.0 { 1.0 } else { args[0] / args[1] }
    }
}

pub struct Negate;

impl Primitive for Negate {
    fn alias(&self) -> &'static str { "neg" }
    fn arity(&self) -> usize { 1 }
    fn execute(&self, args: &[f64]) -> f64 { -args[0] }
}
