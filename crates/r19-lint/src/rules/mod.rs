//! The React 19 migration rules.

pub mod no_default_props;
pub mod no_factories;
pub mod no_legacy_context;
pub mod no_prop_types;
pub mod no_string_refs;
