use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{ensure_parent_dir, get_config_path};

/// Starter config. Every value shown is the built-in default.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# business-mri configuration

scoring:
  # Answers weighted at or below this are flagged as critical weaknesses
  risk_max_weight: 3
  # Answers weighted at or above this are flagged as competitive strengths
  opportunity_min_weight: 8
  # Percentage bands for the execution-rate insight
  high_band_min: 80
  medium_band_min: 60
  # List lengths; these are also the maximums
  max_insights: 3
  max_risks: 2
  max_opportunities: 2
  fallback_industry: tech

# Extra or replacement industry benchmarks (percentages)
# benchmarks:
#   retail:
#     executionRate: 61
#     avgGrowth: 7
#     topPerformer: 84

counters:
  execution: { end: 87, duration: 2s }
  industry: { end: 23, duration: 2s }
  roi: { end: 27000, duration: 2500ms }

exit_intent_delay: 1s

# auto, dark or light
theme: auto

tick_rate_ms: 100
"#;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write the starter config.
///
/// An existing file is only replaced with `force` or after the user confirms.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = path.unwrap_or_else(get_config_path);

    if path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", path.display()),
            false,
        )?;
        if !overwrite {
            anyhow::bail!("Kept existing config at {}", path.display());
        }
    }

    write_config_file(&path, DEFAULT_CONFIG_TEMPLATE)?;
    tracing::info!(path = %path.display(), "wrote config");
    Ok(path)
}

/// Atomically replace `path` with `contents`.
fn write_config_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}
