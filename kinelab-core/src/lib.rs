//! KineLab core: a constant-acceleration motion lab
//!
//! - `engine`: the run/pause/reset state machine advanced once per frame
//! - `scheduler`: the frame-request seam between the engine and a host loop
//! - `scene`: pure mapping from engine values to drawing parameters
//! - `answer` and `quiz`: tolerance checking of typed answers
//! - `mathtext`: inline formula markup used by questions and formula cards

pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod kinematics;
pub mod mathtext;
pub mod quiz;
pub mod scene;
pub mod scheduler;

pub use answer::{check_answer, AnswerOutcome, DEFAULT_TOLERANCE};
pub use config::{EngineConfig, LabConfig, TimestampUnit};
pub use engine::{HaltReason, KinematicsEngine, SimulationState};
pub use error::{ConfigError, QuizError};
pub use kinematics::{DerivedValues, Formula, SimulationParameters};
pub use quiz::{find_problem, problem_set, quiz_cards, CardStatus, Problem, QuizCard};
pub use scene::{map_to_scene, track_marks, RotationDirection, SceneParams, SceneStyle};
pub use scheduler::{FrameScheduler, ManualScheduler, SimulationDriver, TickHandle};
