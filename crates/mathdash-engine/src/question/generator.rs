use mathdash_common::Difficulty;
use mathdash_config::schema::GeneratorConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::archetypes::{self, Candidate};
use super::dedupe::RecentQuestions;
use super::profile::profile_for;
use super::types::{Archetype, Question};

const FALLBACK_OPERAND_MAX: i64 = 20;

/// Produces validated, recently-unseen questions for a difficulty tier.
pub struct QuestionGenerator<R: Rng = StdRng> {
    rng: R,
    recent: RecentQuestions,
    max_attempts: u32,
    max_answer_magnitude: f64,
}

impl QuestionGenerator<StdRng> {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn with_rng(config: &GeneratorConfig, rng: R) -> Self {
        Self {
            rng,
            recent: RecentQuestions::new(config.dedupe_soft_cap, config.dedupe_hard_cap),
            max_attempts: config.max_attempts.max(1),
            max_answer_magnitude: config.max_answer_magnitude,
        }
    }

    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Generate a question at `difficulty`. Never fails: after
    /// `max_attempts` rejected draws a plain two-term question is returned.
    pub fn generate(&mut self, difficulty: Difficulty) -> Question {
        let profile = profile_for(difficulty);

        for attempt in 1..=self.max_attempts {
            let archetype = *profile
                .archetypes
                .choose(&mut self.rng)
                .unwrap_or(&Archetype::Arithmetic);

            let Some(candidate) = archetypes::build(archetype, profile, &mut self.rng) else {
                debug!(%archetype, attempt, "Unusable draw, retrying");
                continue;
            };
            if !self.is_valid(candidate.answer) {
                debug!(%archetype, attempt, answer = candidate.answer, "Answer out of range, retrying");
                continue;
            }

            let key = candidate.key();
            if !self.recent.accepts(&key) {
                debug!(%archetype, attempt, "Recently asked, retrying");
                continue;
            }
            self.recent.insert(key);
            return Question::new(candidate.text, candidate.answer, difficulty, candidate.archetype);
        }

        warn!(%difficulty, attempts = self.max_attempts, "Generator exhausted, using fallback question");
        let candidate = self.fallback();
        self.recent.insert(candidate.key());
        Question::new(candidate.text, candidate.answer, difficulty, candidate.archetype)
    }

    fn is_valid(&self, answer: f64) -> bool {
        answer.is_finite() && answer.abs() < self.max_answer_magnitude
    }

    /// Integer-only two-term question; cannot produce an invalid answer.
    fn fallback(&mut self) -> Candidate {
        let a = self.rng.gen_range(1..=FALLBACK_OPERAND_MAX);
        let b = self.rng.gen_range(1..=FALLBACK_OPERAND_MAX);
        let (symbol, value) = match self.rng.gen_range(0..3) {
            0 => ("+", a + b),
            1 => ("-", a - b),
            _ => ("×", a * b),
        };
        Candidate {
            text: format!("What is {a} {symbol} {b}?"),
            answer: value as f64,
            archetype: Archetype::Arithmetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::round_to;

    fn seeded(seed: u64) -> QuestionGenerator<StdRng> {
        QuestionGenerator::with_rng(&GeneratorConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Recursive-descent evaluator for the rendered expression grammar.
    struct Parser<'a> {
        chars: std::iter::Peekable<std::str::Chars<'a>>,
    }

    impl<'a> Parser<'a> {
        fn new(s: &'a str) -> Self {
            Self {
                chars: s.chars().peekable(),
            }
        }

        fn skip_ws(&mut self) {
            while self.chars.peek() == Some(&' ') {
                self.chars.next();
            }
        }

        fn expr(&mut self) -> f64 {
            let mut value = self.term();
            loop {
                self.skip_ws();
                match self.chars.peek() {
                    Some('+') => {
                        self.chars.next();
                        value += self.term();
                    }
                    Some('-') => {
                        self.chars.next();
                        value -= self.term();
                    }
                    _ => return value,
                }
            }
        }

        fn term(&mut self) -> f64 {
            let mut value = self.factor();
            loop {
                self.skip_ws();
                match self.chars.peek() {
                    Some('×') => {
                        self.chars.next();
                        value *= self.factor();
                    }
                    Some('÷') => {
                        self.chars.next();
                        value /= self.factor();
                    }
                    _ => return value,
                }
            }
        }

        fn factor(&mut self) -> f64 {
            self.skip_ws();
            if self.chars.peek() == Some(&'(') {
                self.chars.next();
                let v = self.expr();
                self.skip_ws();
                assert_eq!(self.chars.next(), Some(')'));
                return v;
            }
            let mut digits = String::new();
            while let Some(c) = self.chars.peek().filter(|c| c.is_ascii_digit()) {
                digits.push(*c);
                self.chars.next();
            }
            digits.parse().unwrap()
        }
    }

    fn numbers(s: &str) -> Vec<f64> {
        s.split(|c: char| !c.is_ascii_digit() && c != '-')
            .filter(|t| !t.is_empty() && *t != "-")
            .map(|t| t.parse().unwrap())
            .collect()
    }

    /// Re-derive the answer from nothing but the question text.
    fn recompute(q: &Question) -> f64 {
        let text = q.text.as_str();
        match q.archetype {
            Archetype::Arithmetic | Archetype::Mixed => {
                let body = text.strip_prefix("What is ").unwrap().strip_suffix('?').unwrap();
                round_to(Parser::new(body).expr(), 2)
            }
            Archetype::LinearEquation => {
                let body = text.strip_prefix("Solve for x: ").unwrap();
                let (lhs, rhs) = body.split_once(" = ").unwrap();
                let c: f64 = rhs.parse().unwrap();
                let (coef, rest) = lhs.split_once('x').unwrap();
                let a: f64 = if coef.is_empty() { 1.0 } else { coef.parse().unwrap() };
                let rest = rest.trim();
                let b: f64 = if let Some(v) = rest.strip_prefix("+ ") {
                    v.parse().unwrap()
                } else if let Some(v) = rest.strip_prefix("- ") {
                    -v.parse::<f64>().unwrap()
                } else {
                    0.0
                };
                (c - b) / a
            }
            Archetype::Fraction => {
                let body = text.strip_prefix("What is ").unwrap();
                let (expr, _) = body.split_once('?').unwrap();
                let parts: Vec<&str> = expr.split(' ').collect();
                let frac = |s: &str| {
                    let (n, d) = s.split_once('/').unwrap();
                    n.parse::<f64>().unwrap() / d.parse::<f64>().unwrap()
                };
                let value = match parts[1] {
                    "+" => frac(parts[0]) + frac(parts[2]),
                    _ => frac(parts[0]) - frac(parts[2]),
                };
                round_to(value, 3)
            }
            Archetype::Percentage => {
                let n = numbers(text);
                if text.contains("of what number") {
                    round_to(n[0] * 100.0 / n[1], 2)
                } else {
                    round_to(n[0] * n[1] / 100.0, 2)
                }
            }
            Archetype::PowerRoot => {
                if let Some(r) = text.strip_prefix("What is √") {
                    r.trim_end_matches('?').parse::<f64>().unwrap().sqrt()
                } else {
                    let n = numbers(text);
                    n[0].powi(n[1] as i32)
                }
            }
        }
    }

    #[test]
    fn answers_are_reproducible_from_text() {
        for difficulty in Difficulty::ALL {
            let mut generator = seeded(42);
            for _ in 0..300 {
                let q = generator.generate(difficulty);
                let expected = recompute(&q);
                assert!(
                    (q.answer - expected).abs() < 1e-9,
                    "{} => {} but recomputed {}",
                    q.text,
                    q.answer,
                    expected
                );
            }
        }
    }

    #[test]
    fn archetypes_respect_difficulty() {
        let mut generator = seeded(7);
        for _ in 0..300 {
            let q = generator.generate(Difficulty::Easy);
            assert!(matches!(
                q.archetype,
                Archetype::Arithmetic | Archetype::LinearEquation
            ));
            assert!(!q.text.contains('×') && !q.text.contains('÷'));
        }
    }

    #[test]
    fn hard_eventually_produces_every_archetype() {
        let mut generator = seeded(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(generator.generate(Difficulty::Hard).archetype);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn answers_are_always_valid() {
        let mut generator = seeded(1);
        for _ in 0..500 {
            let q = generator.generate(Difficulty::Hard);
            assert!(q.answer.is_finite());
            assert!(q.answer.abs() < 1_000_000.0);
        }
    }

    #[test]
    fn no_repeats_before_soft_cap() {
        let mut generator = seeded(21);
        let mut keys = std::collections::HashSet::new();
        for _ in 0..60 {
            let q = generator.generate(Difficulty::Medium);
            assert!(keys.insert(format!("{}|{}", q.text, q.answer)), "repeat: {}", q.text);
        }
    }

    #[test]
    fn recent_set_stays_bounded() {
        let mut generator = seeded(5);
        for _ in 0..1_000 {
            generator.generate(Difficulty::Easy);
            assert!(generator.recent_len() < 150);
        }
    }

    #[test]
    fn zero_magnitude_limit_forces_fallback() {
        let config = GeneratorConfig {
            max_attempts: 3,
            max_answer_magnitude: 0.0,
            ..GeneratorConfig::default()
        };
        let mut generator = QuestionGenerator::with_rng(&config, StdRng::seed_from_u64(8));
        let q = generator.generate(Difficulty::Hard);
        assert_eq!(q.archetype, Archetype::Arithmetic);
        assert_eq!(q.difficulty, Difficulty::Hard);
        let body = q.text.strip_prefix("What is ").unwrap().strip_suffix('?').unwrap();
        assert_eq!(Parser::new(body).expr(), q.answer);
    }
}
