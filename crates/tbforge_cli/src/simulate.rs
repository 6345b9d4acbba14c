//! `tbforge simulate`: compile and run a testbench with Icarus Verilog.
//!
//! The design and testbench are compiled with the configured compiler
//! (`iverilog -g2012` by default) into `<output>/out.vvp`, which is then run
//! with the configured runtime (`vvp`). Simulator output goes to stdout and
//! the injected summary is read back to decide the exit code.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tbforge_config::SimulatorConfig;
use tbforge_rewrite::parse_summary;

use crate::generate::load_settings;
use crate::{GlobalArgs, SimulateArgs};

/// Name of the compiled simulation image.
pub const IMAGE_FILE: &str = "out.vvp";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Errors that can occur while compiling or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulateError {
    /// A simulator executable could not be started.
    #[error("cannot run {program}: {source}")]
    Spawn {
        /// The executable.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A simulator process exceeded the wall-clock limit and was killed.
    #[error("{program} did not finish within {secs}s")]
    Timeout {
        /// The executable.
        program: String,
        /// The limit in seconds.
        secs: u64,
    },

    /// The compiler rejected the design or testbench.
    #[error("compilation failed:\n{stderr}")]
    CompileFailed {
        /// The compiler's diagnostics.
        stderr: String,
    },

    /// The runtime exited with a failure status.
    #[error("simulation failed with {status}:\n{stderr}")]
    SimulationFailed {
        /// The exit status.
        status: String,
        /// The runtime's diagnostics.
        stderr: String,
    },
}

/// Captured result of one finished subprocess.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit status.
    pub status: ExitStatus,
    /// Everything written to stdout.
    pub stdout: String,
    /// Everything written to stderr.
    pub stderr: String,
}

/// Runs the `tbforge simulate` command.
pub fn run(args: &SimulateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global)?;
    let output_dir = PathBuf::from(
        args.output
            .clone()
            .unwrap_or_else(|| config.pipeline.output_dir.clone()),
    );
    let testbench = match &args.testbench {
        Some(path) => PathBuf::from(path),
        None => output_dir.join(format!(
            "testbench_final.{}",
            config.pipeline.testbench_extension
        )),
    };
    if !testbench.is_file() {
        return Err(format!("testbench not found: {}", testbench.display()).into());
    }
    std::fs::create_dir_all(&output_dir)?;

    simulate(
        &config.simulator,
        Path::new(&args.verilog),
        &testbench,
        &output_dir,
        global,
    )
}

/// Compiles and runs `testbench` against `design`, printing the simulator
/// output. Returns exit code 0 if every comparison passed.
pub fn simulate(
    simulator: &SimulatorConfig,
    design: &Path,
    testbench: &Path,
    output_dir: &Path,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(simulator.timeout_secs);
    let image = output_dir.join(IMAGE_FILE);

    if !global.quiet {
        eprintln!("   Compiling {}", testbench.display());
    }
    let compiled = run_with_timeout(compile_command(simulator, &image, design, testbench), timeout)?;
    if !compiled.status.success() {
        return Err(SimulateError::CompileFailed {
            stderr: compiled.stderr,
        }
        .into());
    }
    if !compiled.stderr.trim().is_empty() {
        log::warn!("compiler reported:\n{}", compiled.stderr.trim_end());
    }

    if !global.quiet {
        eprintln!("  Simulating {}", image.display());
    }
    let mut runtime = Command::new(&simulator.runtime);
    runtime.arg(&image);
    let ran = run_with_timeout(runtime, timeout)?;
    print!("{}", ran.stdout);
    if !ran.status.success() {
        return Err(SimulateError::SimulationFailed {
            status: ran.status.to_string(),
            stderr: ran.stderr,
        }
        .into());
    }

    match parse_summary(&ran.stdout) {
        Some(counts) => {
            if !global.quiet {
                eprintln!(
                    "      Result {} passed, {} failed ({} total)",
                    counts.passed, counts.failed, counts.total
                );
            }
            Ok(if counts.failed == 0 { 0 } else { 1 })
        }
        None => {
            log::warn!("simulation printed no test summary");
            Ok(0)
        }
    }
}

/// Builds `<compiler> <flags> -o <image> <design> <testbench>`.
pub fn compile_command(
    simulator: &SimulatorConfig,
    image: &Path,
    design: &Path,
    testbench: &Path,
) -> Command {
    let mut cmd = Command::new(&simulator.compiler);
    cmd.args(&simulator.compile_flags)
        .arg("-o")
        .arg(image)
        .arg(design)
        .arg(testbench);
    cmd
}

/// Runs `cmd` to completion, killing it if it outlives `timeout`.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<ProcessOutput, SimulateError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    log::info!("running {cmd:?}");

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| SimulateError::Spawn {
            program: program.clone(),
            source,
        })?;

    // Drain both pipes on their own threads so a chatty child cannot block.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SimulateError::Timeout {
                    program,
                    secs: timeout.as_secs(),
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => return Err(SimulateError::Spawn { program, source }),
        }
    };

    Ok(ProcessOutput {
        status,
        stdout: stdout.map(collect).unwrap_or_default(),
        stderr: stderr.map(collect).unwrap_or_default(),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

fn collect(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
