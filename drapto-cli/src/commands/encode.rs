// ============================================================================
// drapto-cli/src/commands/encode.rs
// ============================================================================
//
// ENCODE COMMAND: Implementation of the 'encode' Subcommand
//
// This file contains the implementation of the 'encode' subcommand, which is
// responsible for running the probe/pre-encode/encode pipeline over a
// directory of media files. It builds the `PipelineConfig` and process-backed
// `Collaborators` from CLI arguments, sets up output/log directories, and
// delegates to `drapto_core::run_pipeline`.
//
// KEY COMPONENTS:
// - run_encode: Main function that handles the encoding process
//
// WORKFLOW:
// 1. Resolve output/log directories
// 2. Build the PipelineConfig and Collaborators from CLI arguments
// 3. Run the pipeline via drapto-core
// 4. Report results
//
// AI-ASSISTANT-INFO: Encode command implementation, delegates to drapto_core::run_pipeline

// ---- Internal crate imports ----
use crate::cli::EncodeArgs;

// ---- External crate imports ----
use drapto_core::external::process::{ProcessCrfSearchHelper, ProcessLanguageClassifier, ProcessTranscoder};
use drapto_core::notifications::NtfyNotifier;
use drapto_core::{Collaborators, FileOutcome, PipelineConfigBuilder};
use owo_colors::OwoColorize;

// ---- Standard library imports ----
use std::fs;
use std::str::FromStr;
use std::time::Instant;

// ---- Logging imports ----
use log::{error, info, warn};

/// Main function that handles the encoding process.
///
/// Builds a `PipelineConfig` and process-backed `Collaborators` from `args`,
/// creates the output/log directories, and drives `drapto_core::run_pipeline`
/// over the configured input directory. Reports a per-run summary and returns
/// an error only on an orchestrator-level failure -- per-file skips and
/// failures are quarantined by the pipeline itself and never abort the run.
pub fn run_encode(args: EncodeArgs, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let total_start_time = Instant::now();

    let output_dir = args.target_dir.clone().unwrap_or_else(|| args.output_dir.clone());
    let log_dir = args.log_dir.clone().unwrap_or_else(|| output_dir.join("logs"));

    fs::create_dir_all(&output_dir)?;
    fs::create_dir_all(&log_dir)?;

    info!("{}", "========================================".cyan().bold());
    info!("{} {}", "Drapto Encode Run Started:".green().bold(), chrono::Local::now());
    info!("  {:<25} {}", "Input directory:".cyan(), args.input_path.display());
    info!("  {:<25} {}", "Output directory:".cyan(), output_dir.display());
    info!("  {:<25} {}", "Log directory:".cyan(), log_dir.display());
    info!("  {:<25} {}", "Interactive mode:".cyan(), interactive);
    info!("{}", "========================================".cyan().bold());

    if !interactive {
        let pid_path = log_dir.join("drapto.pid");
        match std::fs::write(&pid_path, std::process::id().to_string()) {
            Ok(_) => info!("PID file created at: {}", pid_path.display()),
            Err(e) => warn!("Failed to create PID file at {}: {}", pid_path.display(), e),
        }
    }

    let mut builder = PipelineConfigBuilder::new()
        .input_dir(args.input_path.clone())
        .output_dir(output_dir.clone())
        .log_dir(log_dir.clone())
        .processes(args.processes)
        .shuffle(args.shuffle)
        .move_raw_file(args.move_raw_file)
        .not_rename(args.not_rename)
        .manual_mode(args.manual_mode)
        .allow_no_audio(args.allow_no_audio)
        .audio_only(args.audio_only)
        .iphone_specific_task(args.iphone_specific_task);

    if let Some(topic) = &args.ntfy {
        builder = builder.ntfy_topic(topic);
    }

    let config = builder.build();

    let transcoder = ProcessTranscoder;
    let crf_helper = ProcessCrfSearchHelper;
    let language_classifier = ProcessLanguageClassifier;
    let notifier = if config.ntfy_topic.is_some() {
        Some(NtfyNotifier::new()?)
    } else {
        None
    };

    let collaborators = Collaborators {
        transcoder: &transcoder,
        crf_helper: &crf_helper,
        language_classifier: &language_classifier,
        notifier: notifier.as_ref().map(|n| n as &(dyn drapto_core::Notifier + Sync)),
    };

    let outcomes = match drapto_core::run_pipeline(&config, &collaborators) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            error!("{} {}", "FATAL ERROR during processing:".red().bold(), e);
            return Err(e.into());
        }
    };

    report_summary(&outcomes);

    let total_elapsed_time = total_start_time.elapsed();
    info!("{}", "========================================".cyan().bold());
    info!(
        "{} {}",
        "Total run time:".green().bold(),
        drapto_core::format_duration(total_elapsed_time)
    );
    info!("{} {}", "Drapto Encode Run Finished:".green().bold(), chrono::Local::now());
    info!("{}", "========================================".cyan().bold());

    Ok(())
}

fn report_summary(outcomes: &[FileOutcome]) {
    let succeeded: Vec<_> = outcomes
        .iter()
        .filter_map(|o| match o {
            FileOutcome::Success(record) => Some(record),
            _ => None,
        })
        .collect();
    let skipped = outcomes.iter().filter(|o| matches!(o, FileOutcome::Skipped { .. })).count();
    let oversize = outcomes.iter().filter(|o| matches!(o, FileOutcome::Oversize { .. })).count();
    let errored = outcomes.iter().filter(|o| matches!(o, FileOutcome::Errored { .. })).count();

    if !succeeded.is_empty() {
        info!("{}", "========================================".cyan().bold());
        info!("{}", "Encoding Summary:".green().bold());
        info!("{}", "========================================".cyan().bold());
        for record in &succeeded {
            let reduction = if record.input_size_bytes > 0 {
                100u64.saturating_sub(record.output_size_bytes.saturating_mul(100) / record.input_size_bytes)
            } else {
                0
            };
            info!("{}", record.input_path.display().to_string().yellow().bold());
            info!("  {:<13} {}", "Input size:".cyan(), drapto_core::format_bytes(record.input_size_bytes));
            info!("  {:<13} {}", "Output size:".cyan(), drapto_core::format_bytes(record.output_size_bytes));
            info!("  {:<13} {}", "Reduced by:".cyan(), format!("{}%", reduction));
            info!("{}", "----------------------------------------".cyan());
        }
    } else if matches!(outcomes.first(), None) {
        warn!("No processable files found in the specified input path.");
    }

    info!(
        "{} encoded, {} skipped, {} oversize, {} errored",
        succeeded.len().to_string().green().bold(),
        skipped.to_string().yellow(),
        oversize.to_string().yellow(),
        errored.to_string().red()
    );
}

/// Parses the `--log-level` CLI value into a `log::LevelFilter`, falling
/// back to `Info` on an unrecognized value rather than failing the run.
pub fn parse_log_level(level: &str) -> log::LevelFilter {
    log::LevelFilter::from_str(level).unwrap_or_else(|_| {
        warn!("Invalid log level '{}', defaulting to 'info'.", level);
        log::LevelFilter::Info
    })
}
