//! List checks command implementation.

use tsx_tidy_checks::all_checks;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for check in all_checks() {
        println!(
            "{:<10} {:<28} {}{}",
            check.code(),
            check.name(),
            check.description(),
            if check.fixable() { " (fixable)" } else { "" },
        );
        for option in check.options() {
            println!("{:<10} {:<28}   {} ({}): {}", "", "", option.key, option.kind, option.doc);
        }
    }

    println!("\nPresets:");
    println!("  recommended  - TT001, TT002, TT003");
    println!("  all          - Every built-in check (default)");

    println!("\nUse --checks to filter specific checks, e.g.:");
    println!("  tsx-tidy check --checks variable-case,boolean-naming");
    println!("  tsx-tidy check --checks TT001,TT005");
}
