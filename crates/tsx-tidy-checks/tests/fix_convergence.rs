//! Integration test: multiple checks converging end-to-end via Driver.
//!
//! Exercises the full parse → index → check → synthesize → apply loop with
//! the real built-in checks, including the case where two checks want to
//! rewrite the same token in one pass and the loser has to wait for the
//! next iteration.

use std::path::Path;
use tsx_tidy_checks::{recommended_checks, BooleanNaming, VariableCase};
use tsx_tidy_core::{Driver, RunOutcome};

fn run(driver: &Driver, text: &str, fix: bool) -> RunOutcome {
    driver
        .run_source(Path::new("src/app.tsx"), text, fix)
        .expect("source should parse")
}

#[test]
fn conflicting_renames_resolve_across_iterations() {
    // variable-case wants `loading_state` → `loadingState`; boolean-naming
    // wants `loading_state` → `isLoadingState`. Both renames touch the same
    // declarator, so only the first-sorted fix lands per pass and the other
    // check re-fires on the rewritten text.
    let driver = Driver::builder()
        .with_check(Box::new(VariableCase::new()))
        .with_check(Box::new(BooleanNaming::new()))
        .build();

    let outcome = run(
        &driver,
        "const loading_state = true;\nrender(loading_state);\n",
        true,
    );

    assert_eq!(
        outcome.text,
        "const isLoadingState = true;\nrender(isLoadingState);\n"
    );
    // Pass 1 applies the case fix, pass 2 the boolean prefix, pass 3 is clean.
    assert_eq!(outcome.iterations, 3);
    assert!(outcome.fixpoint);
    assert!(outcome.findings.is_empty());
}

#[test]
fn check_only_pass_reports_both_conflicting_findings() {
    let driver = Driver::builder()
        .with_check(Box::new(VariableCase::new()))
        .with_check(Box::new(BooleanNaming::new()))
        .build();

    let outcome = run(&driver, "const loading_state = true;\n", false);

    let codes: Vec<&str> = outcome.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["TT001", "TT002"]);
    assert_eq!(outcome.iterations, 1);
}

#[test]
fn recommended_set_cleans_a_component_in_one_run() {
    let driver = Driver::builder()
        .with_checks(recommended_checks())
        .build();

    let text = "\
export const Profile = () => {\n\
  const user_name = fetchName();\n\
  const visible = true;\n\
  return <Avatar name={user_name} handleClick={open} />;\n\
};\n";

    let outcome = run(&driver, text, true);

    assert_eq!(
        outcome.text,
        "\
export const Profile = () => {\n\
  const userName = fetchName();\n\
  const isVisible = true;\n\
  return <Avatar name={userName} onClick={open} />;\n\
};\n"
    );
    assert!(outcome.fixpoint);
    assert!(outcome.findings.is_empty());
}
