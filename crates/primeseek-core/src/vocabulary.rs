//! The fixed vocabulary candidate expressions are built from.
//!
//! Everything here is static data: the terms that can occupy a node slot,
//! the binary operators placed between nodes, the wrap templates that can
//! enclose one or more nodes, and the target prime set.

use std::fmt;

/// Numeric values of the named constants.
pub struct MathConstants;

impl MathConstants {
    /// The Dottie number, the unique real fixed point of cos(x) ≈ 0.7390851332151607
    pub const DOTTIE: f64 = 0.739_085_133_215_160_6;

    /// Euler-Mascheroni constant γ ≈ 0.5772156649015329
    pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    /// Catalan's constant G ≈ 0.9159655941772190
    pub const CATALAN: f64 = 0.915_965_594_177_219;

    /// i^i = e^(-π/2), truncated to eleven places
    pub const I_TO_I: f64 = 0.207_879_576_35;
}

/// The category a term belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// The index variable `n`.
    Variable,
    /// A named transcendental constant.
    Constant,
    /// A plain numeric literal.
    Literal,
}

/// An atomic operand that can occupy a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// The index variable, substituted with 0, 1, 2, ... during evaluation.
    Index,
    /// π
    Pi,
    /// Euler's number e.
    E,
    /// See [`MathConstants::DOTTIE`].
    Dottie,
    /// See [`MathConstants::EULER_GAMMA`].
    EulerGamma,
    /// See [`MathConstants::CATALAN`].
    Catalan,
    /// See [`MathConstants::I_TO_I`].
    IToI,
    /// The literal 0.
    Zero,
    /// The literal 1.
    One,
    /// The literal -1.
    NegOne,
}

impl Term {
    /// All terms, in enumeration order.
    pub const ALL: [Term; 10] = [
        Term::Index,
        Term::Pi,
        Term::E,
        Term::Dottie,
        Term::EulerGamma,
        Term::Catalan,
        Term::IToI,
        Term::Zero,
        Term::One,
        Term::NegOne,
    ];

    /// Returns the kind of this term.
    #[must_use]
    pub const fn kind(self) -> TermKind {
        match self {
            Term::Index => TermKind::Variable,
            Term::Zero | Term::One | Term::NegOne => TermKind::Literal,
            _ => TermKind::Constant,
        }
    }

    /// Returns true for the index variable.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Term::Index)
    }

    /// The text this term renders as.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Term::Index => "n",
            Term::Pi => "PI",
            Term::E => "E",
            Term::Dottie => "DOTTIE",
            Term::EulerGamma => "EMC",
            Term::Catalan => "CATALAN",
            Term::IToI => "I_TO_I",
            Term::Zero => "0.0",
            Term::One => "1.0",
            Term::NegOne => "-1.0",
        }
    }

    /// The value of this term with the index variable bound to `n`.
    #[must_use]
    pub fn value(self, n: f64) -> f64 {
        use std::f64::consts;

        match self {
            Term::Index => n,
            Term::Pi => consts::PI,
            Term::E => consts::E,
            Term::Dottie => MathConstants::DOTTIE,
            Term::EulerGamma => MathConstants::EULER_GAMMA,
            Term::Catalan => MathConstants::CATALAN,
            Term::IToI => MathConstants::I_TO_I,
            Term::Zero => 0.0,
            Term::One => 1.0,
            Term::NegOne => -1.0,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A binary operator placed between two adjacent nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Floored modulo; the result takes the sign of the divisor.
    Rem,
    /// Exponentiation, right-associative.
    Pow,
}

impl Operator {
    /// All operators, in enumeration order.
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Rem,
        Operator::Pow,
    ];

    /// The operator token.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Pow => "**",
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div | Operator::Rem => 2,
            Operator::Pow => 3,
        }
    }

    /// Returns true if chains of this operator group from the right.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Operator::Pow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A named unary function a wrap template can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Square root; domain x ≥ 0.
    Sqrt,
    /// Real cube root.
    Cbrt,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// The Gamma function; poles at non-positive integers.
    Gamma,
    /// Absolute value.
    Abs,
    /// Natural logarithm; domain x > 0.
    Ln,
    /// Base-2 logarithm; domain x > 0.
    Log2,
}

impl Function {
    /// The name used when rendering a call.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Gamma => "gamma",
            Function::Abs => "abs",
            Function::Ln => "log",
            Function::Log2 => "log2",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A prefix/suffix pair that can enclose a run of nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WrapTemplate {
    /// Plain grouping parentheses.
    Paren,
    /// A unary function call.
    Call(Function),
}

impl WrapTemplate {
    /// All wrap templates, in enumeration order.
    pub const ALL: [WrapTemplate; 13] = [
        WrapTemplate::Paren,
        WrapTemplate::Call(Function::Sin),
        WrapTemplate::Call(Function::Cos),
        WrapTemplate::Call(Function::Tan),
        WrapTemplate::Call(Function::Sqrt),
        WrapTemplate::Call(Function::Cbrt),
        WrapTemplate::Call(Function::Sinh),
        WrapTemplate::Call(Function::Cosh),
        WrapTemplate::Call(Function::Tanh),
        WrapTemplate::Call(Function::Gamma),
        WrapTemplate::Call(Function::Abs),
        WrapTemplate::Call(Function::Ln),
        WrapTemplate::Call(Function::Log2),
    ];

    /// The opening text, e.g. `"("` or `"sin("`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            WrapTemplate::Paren => "(",
            WrapTemplate::Call(func) => match func {
                Function::Sin => "sin(",
                Function::Cos => "cos(",
                Function::Tan => "tan(",
                Function::Sqrt => "sqrt(",
                Function::Cbrt => "cbrt(",
                Function::Sinh => "sinh(",
                Function::Cosh => "cosh(",
                Function::Tanh => "tanh(",
                Function::Gamma => "gamma(",
                Function::Abs => "abs(",
                Function::Ln => "log(",
                Function::Log2 => "log2(",
            },
        }
    }

    /// The closing text. Every template closes with `")"`.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        ")"
    }

    /// The function applied by this template, if any.
    #[must_use]
    pub const fn function(self) -> Option<Function> {
        match self {
            WrapTemplate::Paren => None,
            WrapTemplate::Call(func) => Some(func),
        }
    }
}

/// The first ten primes.
pub const TARGET_PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Read-only access to the static catalog.
pub struct TermVocabulary;

impl TermVocabulary {
    /// Terms that can occupy a node slot.
    #[must_use]
    pub const fn terms() -> &'static [Term] {
        &Term::ALL
    }

    /// Operators that can sit between two nodes.
    #[must_use]
    pub const fn operators() -> &'static [Operator] {
        &Operator::ALL
    }

    /// Wrap templates that can enclose a run of nodes.
    #[must_use]
    pub const fn wrap_templates() -> &'static [WrapTemplate] {
        &WrapTemplate::ALL
    }

    /// The default target set.
    #[must_use]
    pub const fn target_primes() -> &'static [u64] {
        &TARGET_PRIMES
    }
}
