use std::fmt;

use chrono::{DateTime, Utc};
use mathdash_common::{new_id, Difficulty, PublicQuestion};

/// Problem template a question was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Arithmetic,
    LinearEquation,
    Fraction,
    Percentage,
    PowerRoot,
    Mixed,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Arithmetic => "arithmetic",
            Archetype::LinearEquation => "linear_equation",
            Archetype::Fraction => "fraction",
            Archetype::Percentage => "percentage",
            Archetype::PowerRoot => "power_root",
            Archetype::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable generated question, answer included.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub answer: f64,
    pub difficulty: Difficulty,
    pub archetype: Archetype,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        answer: f64,
        difficulty: Difficulty,
        archetype: Archetype,
    ) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            answer,
            difficulty,
            archetype,
            created_at: Utc::now(),
        }
    }

    /// The participant-facing view, without the answer.
    pub fn to_public(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id.clone(),
            text: self.text.clone(),
            difficulty: self.difficulty,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_view_hides_answer() {
        let q = Question::new("What is 6 × 7?", 42.0, Difficulty::Medium, Archetype::Arithmetic);
        let public = q.to_public();
        assert_eq!(public.id, q.id);
        assert_eq!(public.text, q.text);
        assert_eq!(public.difficulty, Difficulty::Medium);
    }

    #[test]
    fn questions_get_unique_ids() {
        let a = Question::new("1 + 1", 2.0, Difficulty::Easy, Archetype::Arithmetic);
        let b = Question::new("1 + 1", 2.0, Difficulty::Easy, Archetype::Arithmetic);
        assert_ne!(a.id, b.id);
    }
}
