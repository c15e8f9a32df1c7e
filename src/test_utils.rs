//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::mode::OpenMode;

    /// Generate a portable file name (no separators, never `.` or `..`)
    pub fn file_name() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,15}".prop_filter("Name must not be a dot entry", |s| s != "." && s != "..")
    }

    /// Generate any open mode
    pub fn open_mode() -> impl Strategy<Value = OpenMode> {
        proptest::sample::select(OpenMode::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use crate::core::dto::{hydrate, Dto};
    use crate::core::mode::OpenMode;
    use crate::core::tree::FileInfoNode;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_file_names_have_no_separator(name in file_name()) {
            prop_assert!(!name.contains('/'));
            prop_assert!(name != "." && name != "..");
        }

        #[test]
        fn test_mode_string_parses_back(mode in open_mode()) {
            prop_assert_eq!(mode.as_str().parse::<OpenMode>().unwrap(), mode);
        }

        #[test]
        fn test_creating_modes_require_write(mode in open_mode()) {
            if mode.can_create_missing_file() {
                prop_assert!(mode.requires_write_access());
            }
        }

        #[test]
        fn test_node_fields_rehydrate(id in 0usize..10_000, parent in proptest::option::of(0usize..10_000), name in file_name()) {
            let node = FileInfoNode::new(id, parent, name);
            prop_assert_eq!(hydrate::<FileInfoNode>(&node.to_fields()).unwrap(), node);
        }
    }
}
