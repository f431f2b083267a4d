use crate::rules::Rule;

/// Redundant shell-out mixins in resources and providers.
pub mod shellout;

pub use shellout::IncludingMixinShelloutInResources;

/// Returns all rules in the Modernize department.
#[must_use]
pub fn get_modernize_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(IncludingMixinShelloutInResources)]
}
