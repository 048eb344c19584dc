//! Check presets for common configurations.

use crate::{
    BooleanNaming, CallbackPropName, DerivedComponentName, UtilityClassOrder, VariableCase,
};
use tsx_tidy_core::{CheckBox, Config};

/// Preset configurations for tsx-tidy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended checks with sensible defaults.
    Recommended,
    /// Every built-in check.
    All,
}

impl Preset {
    /// Returns the checks for this preset.
    #[must_use]
    pub fn checks(self) -> Vec<CheckBox> {
        match self {
            Self::Recommended => recommended_checks(),
            Self::All => all_checks(),
        }
    }

    /// Parses a preset name from config.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Returns the recommended set of checks.
///
/// Includes:
/// - `variable-case` (TT001) - camelCase variable names
/// - `boolean-naming` (TT002) - is/has prefixes on booleans
/// - `callback-prop-name` (TT003) - on* JSX callback props
#[must_use]
pub fn recommended_checks() -> Vec<CheckBox> {
    vec![
        Box::new(VariableCase::new()),
        Box::new(BooleanNaming::new()),
        Box::new(CallbackPropName::new()),
    ]
}

/// Returns all built-in checks.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(VariableCase::new()),
        Box::new(BooleanNaming::new()),
        Box::new(CallbackPropName::new()),
        Box::new(DerivedComponentName::new()),
        Box::new(UtilityClassOrder::new()),
    ]
}

/// Builds the check set for a configuration, applying per-check options.
///
/// The preset (default `all`) selects the base set; flattened options in
/// each `[checks.<name>]` table configure the checks that accept them.
/// Enablement and severity are the driver's concern, not handled here.
#[must_use]
pub fn configured_checks(config: &Config) -> Vec<CheckBox> {
    let preset = config
        .preset
        .as_deref()
        .and_then(Preset::from_name)
        .unwrap_or(Preset::All);

    preset
        .checks()
        .into_iter()
        .map(|check| apply_options(check, config))
        .collect()
}

fn apply_options(check: CheckBox, config: &Config) -> CheckBox {
    match check.name() {
        crate::variable_case::NAME => {
            let Some(options) = config.check_config(crate::variable_case::NAME) else {
                return check;
            };
            Box::new(VariableCase::new().allow_upper_snake(options.get_bool("allow_upper_snake", true)))
        }
        crate::boolean_naming::NAME => {
            let Some(options) = config.check_config(crate::boolean_naming::NAME) else {
                return check;
            };
            Box::new(BooleanNaming::new().allowed_prefixes(options.get_str_array("allowed_prefixes")))
        }
        _ => check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_non_empty() {
        assert_eq!(recommended_checks().len(), 3);
        assert_eq!(all_checks().len(), 5);
    }

    #[test]
    fn check_codes_are_unique() {
        let mut codes: Vec<&str> = all_checks().iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn config_options_reach_the_checks() {
        let config = Config::parse(
            "[checks.boolean-naming]\nallowed_prefixes = [\"was\"]\n",
        )
        .expect("config");
        let checks = configured_checks(&config);
        assert_eq!(checks.len(), 5);
        // The option is applied; behavior is covered in the check's tests.
        assert!(checks.iter().any(|c| c.name() == "boolean-naming"));
    }

    #[test]
    fn preset_name_selects_the_set() {
        let config = Config::parse("preset = \"recommended\"\n").expect("config");
        assert_eq!(configured_checks(&config).len(), 3);
    }
}
