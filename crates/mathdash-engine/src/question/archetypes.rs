//! Archetype builders. Each returns the rendered problem text together with
//! the answer computed from the same literal operands.

use rand::seq::SliceRandom;
use rand::Rng;

use super::expr::{Chain, Op, Term};
use super::profile::DifficultyProfile;
use super::types::Archetype;

/// Results above this switch the power archetype to a square root.
const POWER_LIMIT: i64 = 10_000;
/// Operand ceiling for the parenthesized shapes.
const MIXED_OPERAND_MAX: i64 = 20;
const PERCENTS: &[i64] = &[5, 10, 15, 20, 25, 30, 40, 50, 60, 75];
const INVERSE_PERCENTS: &[i64] = &[10, 20, 25, 50];

/// A generated problem before it is given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub answer: f64,
    pub archetype: Archetype,
}

impl Candidate {
    fn new(text: String, answer: f64, archetype: Archetype) -> Self {
        Self {
            text,
            answer,
            archetype,
        }
    }

    /// Dedupe key.
    pub fn key(&self) -> String {
        format!("{}|{}", self.text, self.answer)
    }
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Build one candidate of `archetype`. `None` means the draw was unusable
/// (division by zero, non-finite) and the caller should retry.
pub fn build<R: Rng>(
    archetype: Archetype,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Candidate> {
    match archetype {
        Archetype::Arithmetic => arithmetic(profile, rng),
        Archetype::LinearEquation => Some(linear_equation(profile, rng)),
        Archetype::Fraction => Some(fraction(profile, rng)),
        Archetype::Percentage => Some(percentage(rng)),
        Archetype::PowerRoot => Some(power_root(profile, rng)),
        Archetype::Mixed => mixed(profile, rng),
    }
}

fn operand<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> i64 {
    rng.gen_range(profile.operand_min..=profile.operand_max)
}

fn pick_op<R: Rng>(ops: &[Op], rng: &mut R) -> Op {
    ops.choose(rng).copied().unwrap_or(Op::Add)
}

/// A divisor of `n`, preferring ones other than 1 and `n` so the division
/// is not trivial.
fn divisor_of<R: Rng>(n: i64, rng: &mut R) -> i64 {
    let n = n.abs().max(1);
    let proper: Vec<i64> = (2..n).filter(|d| n % d == 0).collect();
    if let Some(d) = proper.choose(rng) {
        return *d;
    }
    if rng.gen_bool(0.5) {
        n
    } else {
        1
    }
}

fn arithmetic<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Option<Candidate> {
    let terms = rng.gen_range(2..=profile.max_terms.max(2));
    let mut last = operand(profile, rng);
    let mut chain = Chain::new(Term::Num(last));

    for _ in 1..terms {
        let op = pick_op(profile.operators, rng);
        let next = match op {
            Op::Div => divisor_of(last, rng),
            _ => operand(profile, rng),
        };
        chain = chain.push(op, Term::Num(next));
        last = next;
    }

    let answer = round_to(chain.eval()?, 2);
    Some(Candidate::new(
        format!("What is {}?", chain.render()),
        answer,
        Archetype::Arithmetic,
    ))
}

fn linear_equation<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Candidate {
    let x = rng.gen_range(1..=profile.operand_max.min(20));
    let a = rng.gen_range(1..=profile.coefficient_max);
    let b = rng.gen_range(-profile.operand_max..=profile.operand_max);
    let c = a * x + b;

    let lhs = if a == 1 {
        "x".to_string()
    } else {
        format!("{a}x")
    };
    let text = match b {
        0 => format!("Solve for x: {lhs} = {c}"),
        b if b > 0 => format!("Solve for x: {lhs} + {b} = {c}"),
        b => format!("Solve for x: {lhs} - {} = {c}", -b),
    };
    Candidate::new(text, x as f64, Archetype::LinearEquation)
}

fn fraction<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Candidate {
    let b = rng.gen_range(2..=profile.max_denominator);
    let d = rng.gen_range(2..=profile.max_denominator);
    let a = rng.gen_range(1..b);
    let c = rng.gen_range(1..d);
    let subtract = rng.gen_bool(0.5);

    let (lhs, rhs) = (a as f64 / b as f64, c as f64 / d as f64);
    let (symbol, value) = if subtract {
        ("-", lhs - rhs)
    } else {
        ("+", lhs + rhs)
    };
    Candidate::new(
        format!("What is {a}/{b} {symbol} {c}/{d}? (Round to 3 decimal places)"),
        round_to(value, 3),
        Archetype::Fraction,
    )
}

fn percentage<R: Rng>(rng: &mut R) -> Candidate {
    if rng.gen_bool(0.5) {
        let p = *PERCENTS.choose(rng).unwrap_or(&10);
        let n = rng.gen_range(1..=40) * 5;
        Candidate::new(
            format!("What is {p}% of {n}?"),
            round_to((p * n) as f64 / 100.0, 2),
            Archetype::Percentage,
        )
    } else {
        let p = *INVERSE_PERCENTS.choose(rng).unwrap_or(&10);
        let whole = rng.gen_range(1..=20) * 20;
        let part = whole * p / 100;
        Candidate::new(
            format!("{part} is {p}% of what number?"),
            round_to((part * 100) as f64 / p as f64, 2),
            Archetype::Percentage,
        )
    }
}

fn power_root<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Candidate {
    let base = rng.gen_range(2..=profile.power_base_max.max(2));
    let exp = rng.gen_range(2..=profile.power_exp_max.max(2));

    match base.checked_pow(exp).filter(|v| *v <= POWER_LIMIT) {
        Some(value) => Candidate::new(
            format!("What is {base}^{exp}?"),
            value as f64,
            Archetype::PowerRoot,
        ),
        None => {
            let n = rng.gen_range(2..=30i64);
            Candidate::new(
                format!("What is √{}?", n * n),
                n as f64,
                Archetype::PowerRoot,
            )
        }
    }
}

fn mixed<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Option<Candidate> {
    let max = profile.operand_max.min(MIXED_OPERAND_MAX);
    let mut num = || Term::Num(rng.gen_range(1..=max));
    let (a, b, c, d) = (num(), num(), num(), num());

    let o1 = pick_op(profile.operators, rng);
    let o2 = pick_op(profile.operators, rng);
    let o3 = pick_op(profile.operators, rng);

    let chain = match rng.gen_range(0..3) {
        0 => Chain::new(Term::group(Chain::new(a).push(o1, b))).push(o2, c),
        1 => Chain::new(a).push(o2, Term::group(Chain::new(b).push(o1, c))),
        _ => Chain::new(Term::group(Chain::new(a).push(o1, b)))
            .push(o2, Term::group(Chain::new(c).push(o3, d))),
    };

    let answer = round_to(chain.eval()?, 2);
    Some(Candidate::new(
        format!("What is {}?", chain.render()),
        answer,
        Archetype::Mixed,
    ))
}
