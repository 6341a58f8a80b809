// Carbon footprint form wizard
// Main library entry point

pub mod api;
pub mod config;
pub mod models;
mod tui;
pub mod utils;
pub mod wizard;

use log::{error, info};
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, WizardConfig};
use crate::models::form::FormDefinition;

/// Command-line overrides shared by every entry point.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub config_path: Option<PathBuf>,
    pub form_path: Option<PathBuf>,
}

fn human_log_line(message: &std::fmt::Arguments<'_>, record: &log::Record<'_>) -> String {
    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let message_str = format!("{}", message);
    let (phase, step, cleaned_message) = utils::logging::parse_log_metadata(&message_str);
    utils::logging::format_human_readable_log(
        &timestamp_local.to_string(),
        record.level(),
        record.target(),
        &cleaned_message,
        phase.as_deref(),
        step.as_deref(),
    )
}

/// Initialize logging with dual format (JSON + human-readable). Returns the log directory.
fn init_logging(
    with_stdout: bool,
    log_dir_override: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder(log_dir_override)?;
    std::fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");
    let json_log_file = log_dir.join(format!("carbon-wizard-{}.log", timestamp));
    let txt_log_file = log_dir.join(format!("carbon-wizard-{}.txt", timestamp));

    // stdout stays off while the TUI owns the terminal.
    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Info)
                .format(move |out, message, record| {
                    out.finish(format_args!("{}", human_log_line(message, record)));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                        utils::logging::extract_log_details(&cleaned_message).as_ref(),
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!("{}\n", human_log_line(message, record)));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(log_dir)
}

fn load_config(opts: &LaunchOptions) -> Result<WizardConfig, ConfigError> {
    let mut config = WizardConfig::load(opts.config_path.as_deref())?;
    if let Some(form) = opts.form_path.as_ref() {
        config.form_path = Some(form.clone());
    }
    Ok(config)
}

/// Config errors are reported before logging exists, since the log directory comes from config.
fn load_config_or_exit(opts: &LaunchOptions) -> WizardConfig {
    match load_config(opts) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Carbon wizard configuration error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Interactive terminal wizard.
pub fn run_tui(opts: LaunchOptions) {
    let config = load_config_or_exit(&opts);

    // No stdout to avoid corrupting the TUI
    if let Err(e) = init_logging(false, config.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Carbon wizard starting at {} server={}",
        chrono::Utc::now(),
        config.server_url
    );

    if let Err(e) = tui::run(config) {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        eprintln!("Carbon wizard error: {}", e);
        std::process::exit(1);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame into an in-memory backend and exits.
pub fn run_tui_smoke(opts: LaunchOptions, target: Option<String>) {
    let config = load_config_or_exit(&opts);

    if let Err(e) = init_logging(false, config.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] TUI smoke starting at {}",
        chrono::Utc::now()
    );

    let target = target.as_deref().unwrap_or("");
    if let Err(e) = tui::smoke(config, target) {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Carbon wizard error: {}", e);
        std::process::exit(1);
    }
}

fn check_form(config: &WizardConfig) -> anyhow::Result<FormDefinition> {
    let form = config.load_form()?;
    let url = config.results_url()?;
    info!(
        "[PHASE: check] [STEP: form] '{}' has {} sections and {} fields; results endpoint {}",
        form.title,
        form.sections.len(),
        form.field_count(),
        url
    );
    Ok(form)
}

/// Load and validate the form definition and configuration, print a summary, exit non-zero on failure.
pub fn run_check_form(opts: LaunchOptions) {
    let config = load_config_or_exit(&opts);

    if let Err(e) = init_logging(true, config.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match check_form(&config) {
        Ok(form) => {
            for (i, section) in form.sections.iter().enumerate() {
                println!("{}. {} ({} fields)", i + 1, section.title, section.fields.len());
            }
        }
        Err(e) => {
            error!("[PHASE: check] [STEP: form] Form check failed: {}", e);
            eprintln!("Form check failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_override_replaces_configured_form() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg_path = tmp.path().join("carbon-wizard.toml");
        std::fs::write(&cfg_path, "form_path = \"/not/used.toml\"\n").unwrap();

        let form_path = tmp.path().join("short.toml");
        std::fs::write(
            &form_path,
            "title = \"Short\"\n[[sections]]\ntitle = \"Only\"\n[[sections.fields]]\nname = \"q\"\nlabel = \"Q\"\nkind = \"text\"\n",
        )
        .unwrap();

        let opts = LaunchOptions {
            config_path: Some(cfg_path),
            form_path: Some(form_path.clone()),
        };
        let config = load_config(&opts).unwrap();
        assert_eq!(config.form_path.as_deref(), Some(form_path.as_path()));

        let form = check_form(&config).unwrap();
        assert_eq!(form.title, "Short");
        assert_eq!(form.field_count(), 1);
    }

    #[test]
    fn check_form_reports_broken_definition() {
        let tmp = tempfile::tempdir().unwrap();
        let form_path = tmp.path().join("broken.toml");
        std::fs::write(&form_path, "title = \"Broken\"\n").unwrap();

        let config = WizardConfig {
            form_path: Some(form_path),
            ..WizardConfig::default()
        };
        assert!(check_form(&config).is_err());
    }
}
