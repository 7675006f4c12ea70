//! Small expression tree used by the arithmetic and mixed archetypes.
//!
//! Rendering and evaluation walk the same tree, so the displayed text and the
//! computed answer cannot drift apart.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "×",
            Op::Div => "÷",
        }
    }

    fn binds_tight(&self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }

    fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        let out = match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => {
                if rhs == 0.0 {
                    return None;
                }
                lhs / rhs
            }
        };
        out.is_finite().then_some(out)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Num(i64),
    Group(Box<Chain>),
}

impl Term {
    pub fn group(chain: Chain) -> Self {
        Term::Group(Box::new(chain))
    }

    pub fn eval(&self) -> Option<f64> {
        match self {
            Term::Num(n) => Some(*n as f64),
            Term::Group(chain) => chain.eval(),
        }
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Term::Num(n) => out.push_str(&n.to_string()),
            Term::Group(chain) => {
                out.push('(');
                out.push_str(&chain.render());
                out.push(')');
            }
        }
    }
}

/// `first op term op term ...` with the usual precedence: `×` and `÷` bind
/// tighter than `+` and `-`, equal precedence associates left.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub first: Term,
    pub rest: Vec<(Op, Term)>,
}

impl Chain {
    pub fn new(first: Term) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    pub fn push(mut self, op: Op, term: Term) -> Self {
        self.rest.push((op, term));
        self
    }

    pub fn term_count(&self) -> usize {
        1 + self.rest.len()
    }

    /// Evaluate, or `None` on division by zero or a non-finite result.
    pub fn eval(&self) -> Option<f64> {
        // Sum of products: `product` holds the running ×/÷ group, `total` the
        // settled additive part, `pending` the sign the group joins with.
        let mut total = 0.0;
        let mut pending = Op::Add;
        let mut product = self.first.eval()?;

        for (op, term) in &self.rest {
            let value = term.eval()?;
            if op.binds_tight() {
                product = op.apply(product, value)?;
            } else {
                total = pending.apply(total, product)?;
                pending = *op;
                product = value;
            }
        }

        pending.apply(total, product)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.first.render_into(&mut out);
        for (op, term) in &self.rest {
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            term.render_into(&mut out);
        }
        out
    }
}
