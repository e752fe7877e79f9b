//! Control Binding CLI Application
//!
//! Command-line companion for the control-binding library. It adds:
//! - Validation of stored binding strings (TXT or JSON report)
//! - Authoring bindings from typed fields
//! - Dry-run dispatch against a recording vehicle
//! - Loading and validating TOML binding profiles

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use control_binding::{
    Animation, Command, ControlBinding, DispatchEvent, InputKey, Led, RecordingVehicle,
    VideoChannel,
};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

mod config;
mod report;

/// Control Binding - Check, author and dry-run controller bindings
#[derive(Parser, Debug)]
#[command(name = "control-binding-cli")]
#[command(about = "Check, author and dry-run quadcopter controller bindings", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    action: Action,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Parse binding strings and report the canonical form or the error
    Check {
        /// Binding strings, e.g. CROSS/TAKEOFF/0
        #[arg(required = true, value_name = "BINDING")]
        bindings: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a binding from typed fields and print its stored form
    Build {
        #[arg(long, value_name = "KEY")]
        key: InputKey,

        #[arg(long, value_name = "COMMAND")]
        command: Command,

        /// Delay in milliseconds
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        delay: i32,

        #[arg(long, value_name = "ANIMATION")]
        animation: Option<Animation>,

        #[arg(long, value_name = "LED")]
        led: Option<Led>,

        /// LED frequency in Hz
        #[arg(long)]
        frequency: Option<f32>,

        /// Animation or LED duration in milliseconds
        #[arg(long, allow_negative_numbers = true)]
        duration: Option<i32>,
    },

    /// Dispatch a binding against a recording vehicle and print the calls
    Simulate {
        #[arg(value_name = "BINDING")]
        binding: String,

        /// Number of times to fire the binding
        #[arg(long, default_value_t = 1)]
        times: usize,
    },

    /// Load a TOML binding profile and validate every entry
    Profile {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List every input key, command, animation, LED pattern and video channel
    List,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Control Binding CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using control-binding library v{}", control_binding::VERSION);

    match args.action {
        Action::Check { bindings, json } => check_mode(&bindings, json),
        Action::Build {
            key,
            command,
            delay,
            animation,
            led,
            frequency,
            duration,
        } => {
            let typed = config::TypedBinding {
                key,
                command,
                delay,
                animation,
                led,
                frequency,
                duration,
            };
            let binding = typed.to_binding()?;
            println!("{}", binding);
            Ok(())
        }
        Action::Simulate { binding, times } => simulate_mode(&binding, times),
        Action::Profile { file } => profile_mode(&file),
        Action::List => {
            list_mode();
            Ok(())
        }
    }
}

/// Check mode - parse each string and print a report
fn check_mode(bindings: &[String], json: bool) -> Result<()> {
    let report = report::CheckReport::check(bindings.iter().map(String::as_str));

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    let failures = report.failures();
    if failures > 0 {
        bail!("{} of {} bindings are malformed", failures, report.results.len());
    }
    Ok(())
}

/// Simulate mode - fire a binding repeatedly and show what the vehicle receives
fn simulate_mode(input: &str, times: usize) -> Result<()> {
    let mut binding = ControlBinding::parse(input)?;
    let mut vehicle = RecordingVehicle::new();

    println!("═══════════════════════════════════════════════");
    println!("  Dry run: {}", binding);
    println!("═══════════════════════════════════════════════\n");

    for round in 1..=times {
        let mut event: Option<DispatchEvent> = None;
        binding.send_to_drone_with(&mut vehicle, &mut |e: &DispatchEvent| event = Some(*e))?;

        let calls = vehicle
            .take_calls()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match event.and_then(|e| e.cycle_index) {
            Some(index) => println!("#{:<3} {}  [cycle index {}]", round, calls, index),
            None => println!("#{:<3} {}", round, calls),
        }
    }

    Ok(())
}

/// Profile mode - load a TOML profile and print its bindings
fn profile_mode(path: &Path) -> Result<()> {
    log::info!("Loading profile from: {:?}", path);
    let profile = config::load_profile(path)?;

    println!(
        "✓ Profile loaded: {}",
        profile.name.as_deref().unwrap_or("(unnamed)")
    );
    for binding in &profile.bindings {
        println!("  {:<12} {}", binding.key().to_string(), binding);
    }
    println!("\n{} bindings", profile.bindings.len());

    Ok(())
}

/// List mode - print every vocabulary the string format accepts
fn list_mode() {
    print_vocabulary("Input keys", InputKey::iter());
    print_vocabulary("Commands", Command::iter());
    print_vocabulary("Animations", Animation::iter());
    print_vocabulary("LED patterns", Led::iter());
    print_vocabulary("Video channels", VideoChannel::iter());
}

fn print_vocabulary<T: std::fmt::Display>(title: &str, values: impl Iterator<Item = T>) {
    println!("{}:", title);
    for value in values {
        println!("  {}", value);
    }
    println!();
}

/// Map `-v`/`-q` to a log level; `-q` wins over any `-v`
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    use log::LevelFilter;

    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Install the env_logger backend
///
/// `RUST_LOG` is applied after the flag level, so it can narrow or widen
/// logging per module (e.g. `RUST_LOG=control_binding::dispatch=trace`).
fn init_logging(verbose: u8, quiet: bool) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose, quiet))
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(verbose > 1)
        .format_target(false)
        .init();
}
