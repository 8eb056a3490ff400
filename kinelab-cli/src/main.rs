mod lab_app;

use clap::{Parser, Subcommand};
use kinelab_core::mathtext::{parse_math_text, to_plain_text};
use kinelab_core::{
    check_answer, find_problem, problem_set, AnswerOutcome, HaltReason, KinematicsEngine,
    LabConfig, ManualScheduler, SimulationDriver, TimestampUnit, DEFAULT_TOLERANCE,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kinelab")]
#[command(about = "KineLab - constant-acceleration motion lab", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation and print the motion
    Run {
        /// Initial velocity (m/s), overrides the lab file
        #[arg(long, allow_hyphen_values = true)]
        v0: Option<f64>,
        /// Acceleration (m/s²), overrides the lab file
        #[arg(long, allow_hyphen_values = true)]
        a: Option<f64>,
        /// Lab file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Stop after this much simulated wall-clock time
        #[arg(long, default_value_t = 60.0)]
        max_seconds: f64,
        /// Print every n-th frame
        #[arg(long, default_value_t = 30)]
        every: usize,
    },
    /// Check an answer to one of the quiz problems
    Check {
        /// Problem id (see `kinelab quiz`)
        problem: u32,
        /// The answer as typed
        #[arg(allow_hyphen_values = true)]
        answer: String,
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// List the quiz problems
    Quiz {
        /// Also print worked solutions
        #[arg(long)]
        solutions: bool,
    },
    /// Open the interactive lab window
    Lab {
        /// Lab file (TOML), reloaded when it changes
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            v0,
            a,
            config,
            fps,
            max_seconds,
            every,
        } => run_headless(v0, a, config.as_deref(), fps, max_seconds, every),
        Commands::Check {
            problem,
            answer,
            tolerance,
        } => check(problem, &answer, tolerance),
        Commands::Quiz { solutions } => {
            print_quiz(solutions);
            Ok(())
        }
        Commands::Lab { config } => lab_app::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<LabConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(LabConfig::load(path)?),
        None => Ok(LabConfig::default()),
    }
}

fn run_headless(
    v0: Option<f64>,
    a: Option<f64>,
    config: Option<&Path>,
    fps: f64,
    max_seconds: f64,
    every: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    if let Some(v0) = v0 {
        config.parameters.initial_velocity = v0;
    }
    if let Some(a) = a {
        config.parameters.acceleration = a;
    }
    config.validate()?;
    if !(fps.is_finite() && fps > 0.0) {
        return Err(format!("--fps must be positive, got {}", fps).into());
    }

    let engine = KinematicsEngine::new(config.parameters, config.engine);
    let mut driver = SimulationDriver::new(engine, ManualScheduler::new());
    let every = every.max(1);
    let max_frames = (max_seconds * fps).ceil().max(0.0) as usize;

    println!(
        "v0 = {} m/s, a = {} m/s², halts beyond ±{} m",
        config.parameters.initial_velocity,
        config.parameters.acceleration,
        config.engine.limit()
    );

    driver.start();
    for frame in 0..=max_frames {
        let seconds = frame as f64 / fps;
        let now = match config.engine.timestamp_unit {
            TimestampUnit::Seconds => seconds,
            TimestampUnit::Milliseconds => seconds * 1000.0,
        };
        let Some(values) = driver.fire_due(now) else {
            break;
        };
        if frame % every == 0 || !values.is_running {
            println!(
                "t = {:8.3} s   x = {:9.3} m   v = {:8.3} m/s",
                values.time, values.position, values.velocity
            );
        }
        if !values.is_running {
            break;
        }
    }

    match driver.engine().halt_reason() {
        Some(HaltReason::Boundary) => println!("stopped at the end of the track"),
        Some(HaltReason::NonFinite) => println!("stopped: values are no longer finite"),
        None => println!("still running after {} s", max_seconds),
    }
    Ok(())
}

fn check(problem: u32, answer: &str, tolerance: f64) -> Result<(), Box<dyn std::error::Error>> {
    let problem = find_problem(problem)?;
    match check_answer(answer, problem.answer, tolerance) {
        AnswerOutcome::Correct => println!("correct: {} {}", problem.answer, problem.unit),
        AnswerOutcome::Incorrect => println!("incorrect, try again"),
        AnswerOutcome::Unparseable => println!("please enter a number"),
    }
    Ok(())
}

fn print_quiz(solutions: bool) {
    for problem in problem_set() {
        println!("[{}] {}", problem.id, problem.title);
        println!("    {}", to_plain_text(&parse_math_text(problem.question)));
        if solutions {
            for step in &problem.solution {
                println!("      {}", to_plain_text(&parse_math_text(step)));
            }
            println!("    answer: {} {}", problem.answer, problem.unit);
        }
        println!();
    }
}
