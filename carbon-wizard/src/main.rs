use carbon_wizard::LaunchOptions;
use std::path::PathBuf;

/// Value of `--flag <value>` or `--flag=<value>`.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{}=", flag);
    args.iter().enumerate().find_map(|(i, a)| {
        if a == flag {
            args.get(i + 1).cloned()
        } else {
            a.strip_prefix(&prefix).map(str::to_string)
        }
    })
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let opts = LaunchOptions {
        config_path: flag_value(&args, "--config").map(PathBuf::from),
        form_path: flag_value(&args, "--form").map(PathBuf::from),
    };

    // Load and validate the form definition, print a summary and exit 0/1.
    if args.iter().any(|a| a == "--check-form") {
        carbon_wizard::run_check_form(opts);
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Usage: --tui-smoke or --tui-smoke=<section index>|errors|complete
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        carbon_wizard::run_tui_smoke(opts, target);
        return;
    }

    carbon_wizard::run_tui(opts);
}
