//! tbforge CLI: LLM-aided Verilog testbench generation.
//!
//! Provides `tbforge generate` for a description/design pair on disk,
//! `tbforge example` for the built-in designs, and `tbforge simulate` for
//! compiling and running a generated testbench with Icarus Verilog.

#![warn(missing_docs)]

mod example;
mod generate;
mod simulate;

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// tbforge: generate self-checking testbenches from a description and a design.
#[derive(Parser, Debug)]
#[command(name = "tbforge", version, about = "LLM-aided Verilog testbench generation")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `tbforge.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a testbench for a design described in a text file.
    Generate(GenerateArgs),
    /// Generate a testbench for one of the built-in example designs.
    Example(ExampleArgs),
    /// Compile and run a testbench against its design.
    Simulate(SimulateArgs),
}

/// Options shared by the generating commands.
#[derive(Args, Debug)]
pub struct GenerationOptions {
    /// Output directory for the generated artifacts (default from config).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Model name, overriding `generator.model`.
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key, overriding the environment variable named by
    /// `generator.api_key_env`.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Compile and run the final testbench after generation.
    #[arg(long)]
    pub simulate: bool,
}

/// Arguments for the `tbforge generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// File containing the natural-language description.
    #[arg(short, long)]
    pub description: String,

    /// Verilog file containing the design under test.
    #[arg(short = 'f', long)]
    pub verilog: String,

    /// Output and generator options.
    #[command(flatten)]
    pub options: GenerationOptions,
}

/// Arguments for the `tbforge example` subcommand.
#[derive(Parser, Debug)]
pub struct ExampleArgs {
    /// Which built-in design to use.
    #[arg(value_enum, default_value_t = ExampleDesign::Mux)]
    pub design: ExampleDesign,

    /// Output and generator options.
    #[command(flatten)]
    pub options: GenerationOptions,
}

/// Arguments for the `tbforge simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Verilog file containing the design under test.
    #[arg(short = 'f', long)]
    pub verilog: String,

    /// Testbench to run (default: `<output>/testbench_final.<ext>`).
    #[arg(short, long)]
    pub testbench: Option<String>,

    /// Directory for the compiled image (default from config).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Built-in example designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExampleDesign {
    /// A 2-to-1 multiplexer.
    Mux,
    /// A 4-bit adder with carry out.
    Adder,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Example(ref args) => example::run(args, &global),
        Command::Simulate(ref args) => simulate::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Maps `--quiet`/`--verbose` onto a log level; `RUST_LOG` still wins.
fn log_level(global: &GlobalArgs) -> log::LevelFilter {
    if global.quiet {
        log::LevelFilter::Error
    } else if global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

fn init_logging(global: &GlobalArgs) {
    env_logger::Builder::new()
        .filter_level(log_level(global))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate() {
        let cli = Cli::parse_from([
            "tbforge",
            "generate",
            "--description",
            "desc.txt",
            "--verilog",
            "mux.v",
            "-o",
            "out",
            "--simulate",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.description, "desc.txt");
                assert_eq!(args.verilog, "mux.v");
                assert_eq!(args.options.output.as_deref(), Some("out"));
                assert!(args.options.simulate);
                assert!(args.options.api_key.is_none());
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn parse_generate_requires_inputs() {
        assert!(Cli::try_parse_from(["tbforge", "generate", "-d", "desc.txt"]).is_err());
    }

    #[test]
    fn parse_example_default() {
        let cli = Cli::parse_from(["tbforge", "example"]);
        match cli.command {
            Command::Example(args) => {
                assert_eq!(args.design, ExampleDesign::Mux);
                assert!(!args.options.simulate);
            }
            _ => panic!("expected Example command"),
        }
    }

    #[test]
    fn parse_example_adder_with_overrides() {
        let cli = Cli::parse_from([
            "tbforge",
            "example",
            "adder",
            "--model",
            "gpt-4o-mini",
            "--api-key",
            "sk-test",
        ]);
        match cli.command {
            Command::Example(args) => {
                assert_eq!(args.design, ExampleDesign::Adder);
                assert_eq!(args.options.model.as_deref(), Some("gpt-4o-mini"));
                assert_eq!(args.options.api_key.as_deref(), Some("sk-test"));
            }
            _ => panic!("expected Example command"),
        }
    }

    #[test]
    fn parse_simulate() {
        let cli = Cli::parse_from(["tbforge", "simulate", "-f", "mux.v", "-t", "tb.v"]);
        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.verilog, "mux.v");
                assert_eq!(args.testbench.as_deref(), Some("tb.v"));
                assert!(args.output.is_none());
            }
            _ => panic!("expected Simulate command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["tbforge", "--quiet", "--config", "ci.toml", "example"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("ci.toml"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tbforge", "example", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn log_levels() {
        let mut global = GlobalArgs {
            quiet: false,
            verbose: false,
            config: None,
        };
        assert_eq!(log_level(&global), log::LevelFilter::Warn);
        global.verbose = true;
        assert_eq!(log_level(&global), log::LevelFilter::Debug);
        global.quiet = true;
        assert_eq!(log_level(&global), log::LevelFilter::Error);
    }
}
