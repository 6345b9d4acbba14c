//! `tbforge generate`: run the pipeline on a description and design from disk.
//!
//! Also hosts the configuration and generator setup shared with
//! `tbforge example`.

use std::path::{Path, PathBuf};

use tbforge_config::{
    load_config, load_config_file, resolve_api_key, validate_config, Config, ConfigError,
};
use tbforge_llm::{ChatClient, OfflineGenerator, TextGenerator};
use tbforge_pipeline::{GoldenStatus, Pipeline, PipelineOutput};

use crate::{simulate, GenerateArgs, GenerationOptions, GlobalArgs};

/// Runs the `tbforge generate` command.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let description = std::fs::read_to_string(&args.description)
        .map_err(|e| format!("cannot read description file {}: {e}", args.description))?;
    let module_source = std::fs::read_to_string(&args.verilog)
        .map_err(|e| format!("cannot read Verilog file {}: {e}", args.verilog))?;

    run_generation(
        &description,
        &module_source,
        Path::new(&args.verilog),
        &args.options,
        global,
    )
}

/// Loads `tbforge.toml` from `--config`, or from the current directory.
pub fn load_settings(global: &GlobalArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => load_config_file(Path::new(path))?,
        None => load_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Applies command-line overrides to the loaded configuration and
/// validates the result.
pub fn apply_overrides(
    mut config: Config,
    options: &GenerationOptions,
) -> Result<Config, ConfigError> {
    if let Some(model) = &options.model {
        config.generator.model = model.clone();
    }
    if let Some(output) = &options.output {
        config.pipeline.output_dir = output.clone();
    }
    validate_config(&config)?;
    Ok(config)
}

/// Builds the text generator: the chat client if an API key is configured,
/// otherwise the offline stand-in.
pub fn build_generator(
    config: &Config,
    options: &GenerationOptions,
    global: &GlobalArgs,
) -> Result<Box<dyn TextGenerator>, Box<dyn std::error::Error>> {
    let key = resolve_api_key(&config.generator, options.api_key.as_deref(), |name| {
        std::env::var(name).ok()
    });
    match key {
        Some(key) => Ok(Box::new(ChatClient::new(&config.generator, Some(key))?)),
        None => {
            if !global.quiet {
                eprintln!(
                    "warning: no API key configured; set {} or pass --api-key",
                    config.generator.api_key_env
                );
                eprintln!("         continuing with placeholder generation");
            }
            Ok(Box::new(OfflineGenerator))
        }
    }
}

/// Runs the pipeline, prints the report and optionally simulates the result.
pub fn run_generation(
    description: &str,
    module_source: &str,
    module_path: &Path,
    options: &GenerationOptions,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = apply_overrides(load_settings(global)?, options)?;
    let generator = build_generator(&config, options, global)?;
    let output_dir = PathBuf::from(&config.pipeline.output_dir);

    if !global.quiet {
        eprintln!(
            "   Generating testbench ({} description chars, {} source chars)",
            description.len(),
            module_source.len()
        );
    }

    let simulator = config.simulator.clone();
    let pipeline = Pipeline::new(generator, config);
    let output = pipeline.run(description, module_source, &output_dir)?;

    if !global.quiet {
        print_report(&output);
    }

    if options.simulate {
        return simulate::simulate(
            &simulator,
            module_path,
            &output.paths.final_testbench,
            &output_dir,
            global,
        );
    }
    Ok(0)
}

/// Prints the per-step summary of a run to stderr.
fn print_report(output: &PipelineOutput) {
    let run = &output.run;
    let module = if run.signature.name.is_empty() {
        "(unnamed)"
    } else {
        run.signature.name.as_str()
    };
    eprintln!("      Module {module}");
    eprintln!("    Patterns {}", run.pattern_count);
    match &run.golden {
        GoldenStatus::Computed { succeeded, failed } => {
            eprintln!(
                "      Golden {succeeded}/{} vector(s) have expected outputs",
                succeeded + failed
            );
        }
        GoldenStatus::Unavailable { reason } => {
            eprintln!("      Golden unavailable: {reason}");
        }
    }
    eprintln!("       Wrote {}", output.paths.initial_testbench.display());
    eprintln!("       Wrote {}", output.paths.reference_model.display());
    eprintln!("       Wrote {}", output.paths.vectors.display());
    eprintln!("       Wrote {}", output.paths.final_testbench.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> GenerationOptions {
        GenerationOptions {
            output: None,
            model: None,
            api_key: None,
            simulate: false,
        }
    }

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn overrides_replace_model_and_output() {
        let mut opts = options();
        opts.model = Some("gpt-4o-mini".to_string());
        opts.output = Some("build/tb".to_string());
        let config = apply_overrides(Config::default(), &opts).unwrap();
        assert_eq!(config.generator.model, "gpt-4o-mini");
        assert_eq!(config.pipeline.output_dir, "build/tb");
    }

    #[test]
    fn no_overrides_keep_config() {
        let config = apply_overrides(Config::default(), &options()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_model_override_is_rejected() {
        let mut opts = options();
        opts.model = Some(String::new());
        let err = apply_overrides(Config::default(), &opts).unwrap_err();
        assert!(err.to_string().contains("generator.model"));
    }

    #[test]
    fn empty_output_override_is_rejected() {
        let mut opts = options();
        opts.output = Some(" ".to_string());
        let err = apply_overrides(Config::default(), &opts).unwrap_err();
        assert!(err.to_string().contains("pipeline.output_dir"));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "[pipeline]\ntestbench_extension = \"sv\"\n").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(path.to_string_lossy().into_owned()),
        };
        let config = load_settings(&global).unwrap();
        assert_eq!(config.pipeline.testbench_extension, "sv");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some("/nonexistent/tbforge.toml".to_string()),
        };
        assert!(load_settings(&global).is_err());
    }

    #[test]
    fn api_key_option_enables_chat_client() {
        let mut opts = options();
        opts.api_key = Some("sk-test".to_string());
        let generator = build_generator(&Config::default(), &opts, &quiet()).unwrap();
        assert!(generator.is_available());
    }

    #[test]
    fn offline_generation_writes_artifacts() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("tbforge.toml");
        std::fs::write(
            &config_path,
            "[generator]\napi_key_env = \"TBFORGE_TEST_UNSET_KEY\"\n",
        )
        .unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(config_path.to_string_lossy().into_owned()),
        };
        let mut opts = options();
        let out = tmp.path().join("out");
        opts.output = Some(out.to_string_lossy().into_owned());

        let code = run_generation(
            "An AND gate.",
            "module and_gate(input a, input b, output y); assign y = a & b; endmodule",
            Path::new("and_gate.v"),
            &opts,
            &global,
        )
        .unwrap();
        assert_eq!(code, 0);
        assert!(out.join("testbench_final.v").is_file());
        assert!(out.join("golden_model.rhai").is_file());
    }
}
