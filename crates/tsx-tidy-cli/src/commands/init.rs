//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# tsx-tidy configuration
# See https://github.com/tsx-tidy/tsx-tidy for documentation

# Preset selecting the base check set: "recommended" or "all"
# preset = "recommended"

[driver]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

# Maximum fix iterations per file before giving up on a fixpoint
max_iterations = 10

# Check configurations
# Each check can be enabled/disabled and have its severity overridden

[checks.variable-case]
enabled = true
# severity = "warning"  # Override default severity
allow_upper_snake = true

[checks.boolean-naming]
enabled = true
# allowed_prefixes = ["was", "did"]

# [checks.utility-class-order]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("tsx-tidy.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created tsx-tidy.toml");
    println!("\nNext steps:");
    println!("  1. Edit tsx-tidy.toml to configure checks");
    println!("  2. Run: tsx-tidy check");

    Ok(())
}
