//! The fixed problem set and per-card answer state

use crate::answer::{check_answer, AnswerOutcome, DEFAULT_TOLERANCE};
use crate::error::QuizError;
use crate::kinematics::{acceleration_for_distance, acceleration_from_velocities, displacement_at};
use std::sync::OnceLock;

/// One known quantity of a word problem
#[derive(Debug, Clone, PartialEq)]
pub struct Given {
    /// Math markup for the symbol, e.g. `$v_0$`
    pub symbol: &'static str,
    pub value: f64,
    pub note: Option<&'static str>,
}

/// A word problem with a numeric answer
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub id: u32,
    pub title: &'static str,
    /// Question text with inline math markup
    pub question: &'static str,
    pub givens: Vec<Given>,
    /// Worked solution, one markup line per step
    pub solution: Vec<&'static str>,
    pub answer: f64,
    pub unit: &'static str,
}

fn given(symbol: &'static str, value: f64, note: Option<&'static str>) -> Given {
    Given {
        symbol,
        value,
        note,
    }
}

fn build_problem_set() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Basics: distance",
            question: "A car starts from rest ($v_0 = 0$) and accelerates at $a = 2.0$. How far ($\\Delta s$) has it travelled after 3.0 seconds?",
            givens: vec![
                given("$v_0$", 0.0, None),
                given("$a$", 2.0, None),
                given("$t$", 3.0, None),
            ],
            solution: vec![
                "Use the displacement formula: $\\Delta s = v_0t + 1/2 at^2$",
                "$\\Delta s = 0 \\times 3 + 0.5 \\times 2 \\times (3)^2$",
                "$\\Delta s = 0 + 1 \\times 9 = 9$",
            ],
            answer: displacement_at(0.0, 2.0, 3.0),
            unit: "m",
        },
        Problem {
            id: 2,
            title: "Advanced: braking",
            question: "A car moves at $20m/s$ and brakes at a red light. To stop exactly after $25m$ (final speed 0), what acceleration must the brakes produce? (enter a negative value)",
            givens: vec![
                given("$v$", 0.0, Some("stopped")),
                given("$v_0$", 20.0, None),
                given("$\\Delta s$", 25.0, None),
            ],
            solution: vec![
                "No time is given, so use the timeless formula: $v^2 = v_0^2 + 2a\\Delta s$",
                "$0^2 = 20^2 + 2 \\times a \\times 25$",
                "$0 = 400 + 50a$",
                "$50a = -400$",
                "$a = -8$",
            ],
            answer: acceleration_for_distance(20.0, 0.0, 25.0).unwrap_or(f64::NAN),
            unit: "m/s²",
        },
        Problem {
            id: 3,
            title: "Variation: finding acceleration",
            question: "Within 4 seconds the car speeds up from $8m/s$ to $18m/s$. What is its acceleration?",
            givens: vec![
                given("$v$", 18.0, Some("final velocity")),
                given("$v_0$", 8.0, Some("initial velocity")),
                given("$t$", 4.0, None),
            ],
            solution: vec![
                "Use the definition of acceleration: $a = (v - v_0) / t$",
                "$a = (18 - 8) / 4$",
                "$a = 10 / 4$",
                "$a = 2.5$",
            ],
            answer: acceleration_from_velocities(8.0, 18.0, 4.0).unwrap_or(f64::NAN),
            unit: "m/s²",
        },
    ]
}

/// The problems offered by the quiz, in display order
pub fn problem_set() -> &'static [Problem] {
    static PROBLEMS: OnceLock<Vec<Problem>> = OnceLock::new();
    PROBLEMS.get_or_init(build_problem_set)
}

pub fn find_problem(id: u32) -> Result<&'static Problem, QuizError> {
    problem_set()
        .iter()
        .find(|p| p.id == id)
        .ok_or(QuizError::UnknownProblem(id))
}

/// Visible verdict of a quiz card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Unanswered,
    Correct,
    Wrong,
}

/// Answer state of one problem card
#[derive(Debug, Clone)]
pub struct QuizCard {
    problem: &'static Problem,
    input: String,
    status: CardStatus,
    show_solution: bool,
    tolerance: f64,
}

impl QuizCard {
    pub fn new(problem: &'static Problem) -> Self {
        Self {
            problem,
            input: String::new(),
            status: CardStatus::Unanswered,
            show_solution: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn problem(&self) -> &'static Problem {
        self.problem
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> CardStatus {
        self.status
    }

    pub fn show_solution(&self) -> bool {
        self.show_solution
    }

    /// Replace the typed answer; any previous verdict no longer applies
    pub fn edit(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.status = CardStatus::Unanswered;
    }

    /// Check the typed answer. An unparseable answer leaves the card as it was.
    pub fn submit(&mut self) -> AnswerOutcome {
        let outcome = check_answer(&self.input, self.problem.answer, self.tolerance);
        match outcome {
            AnswerOutcome::Correct => {
                self.status = CardStatus::Correct;
                self.show_solution = true;
            }
            AnswerOutcome::Incorrect => self.status = CardStatus::Wrong,
            AnswerOutcome::Unparseable => {}
        }
        outcome
    }

    pub fn toggle_solution(&mut self) {
        self.show_solution = !self.show_solution;
    }
}

/// One card per problem, in problem-set order
pub fn quiz_cards() -> Vec<QuizCard> {
    problem_set().iter().map(QuizCard::new).collect()
}
