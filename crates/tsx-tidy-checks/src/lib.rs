//! # tsx-tidy-checks
//!
//! Built-in style checks for tsx-tidy.
//!
//! Each check lives in its own module and implements
//! [`tsx_tidy_core::Check`]:
//!
//! - [`VariableCase`] (TT001) - camelCase variable declarations
//! - [`BooleanNaming`] (TT002) - is/has prefixes on boolean names
//! - [`CallbackPropName`] (TT003) - on* JSX callback props
//! - [`DerivedComponentName`] (TT004) - component names derived from paths
//! - [`UtilityClassOrder`] (TT005) - canonical utility-class ordering
//!
//! [`presets`] bundles them into named sets and wires config options.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod boolean_naming;
pub mod callback_prop_name;
pub mod derived_component_name;
pub mod presets;
pub mod utility_class_order;
pub mod variable_case;

pub use boolean_naming::BooleanNaming;
pub use callback_prop_name::CallbackPropName;
pub use derived_component_name::DerivedComponentName;
pub use presets::{all_checks, configured_checks, recommended_checks, Preset};
pub use utility_class_order::UtilityClassOrder;
pub use variable_case::VariableCase;
