// Unit Tests for Options Validation
//
// UNIT UNDER TEST: validate_enum, validate_types, validate_catcher_names
//
// BUSINESS RESPONSIBILITY:
//   - Rejects malformed enum trees before any error is built
//   - Rejects malformed or duplicated type registration keys
//   - Reports every violation with a path and keyword
//
// TEST COVERAGE:
//   - Name pattern, sibling uniqueness and status range rules
//   - Tree depth rules for categories, subcategories and details
//   - Category-level inherit rejection
//   - Absent options producing no failures

use crate::core_types::enum_tree::{EnumNode, Status};
use crate::core_types::errors::ErrorClass;
use crate::defaults::default_enum;
use crate::registry::Registration;
use crate::tests::helpers::test_enum;
use crate::validation::{is_valid_name, validate_catcher_names, validate_enum, validate_types};

fn leaf(name: &str) -> EnumNode {
    EnumNode::new(name, "leaf", Status::Inherit)
}

fn category_with(children: Vec<EnumNode>) -> EnumNode {
    EnumNode::new("CAT", "category", Status::Code(400))
        .child(EnumNode::new("SUB", "subcategory", Status::Inherit).with_children(children))
}

#[cfg(test)]
mod enum_validation_tests {
    use super::*;

    #[test]
    fn test_valid_trees_pass() {
        // Test verifies the default and helper trees are accepted

        // Arrange & Act & Assert
        assert!(validate_enum(Some(default_enum().as_slice())).is_empty());
        assert!(validate_enum(Some(test_enum().as_slice())).is_empty());
        assert!(validate_enum(None).is_empty());
    }

    #[test]
    fn test_lowercase_name_fails_pattern() {
        // Test verifies names must be upper snake case

        // Arrange
        let nodes = vec![category_with(vec![leaf("not_upper")])];

        // Act
        let failures = validate_enum(Some(nodes.as_slice()));

        // Assert
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, ".enum[0].children[0].children[0].name");
        assert_eq!(failures[0].keyword, "pattern");
    }

    #[test]
    fn test_duplicate_siblings_fail() {
        // Test verifies sibling names must be unique

        // Arrange
        let nodes = vec![category_with(vec![leaf("SAME"), leaf("SAME")])];

        // Act
        let failures = validate_enum(Some(nodes.as_slice()));

        // Assert
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, ".enum[0].children[0].children[1].name");
        assert_eq!(failures[0].keyword, "uniqueName");
    }

    #[test]
    fn test_out_of_range_status_fails() {
        // Test verifies statuses must be plausible HTTP codes

        // Arrange
        let nodes = vec![category_with(vec![EnumNode::new("LEAF", "leaf", Status::Code(99))])];

        // Act
        let failures = validate_enum(Some(nodes.as_slice()));

        // Assert
        assert_eq!(failures[0].path, ".enum[0].children[0].children[0].status");
        assert_eq!(failures[0].keyword, "status");
    }

    #[test]
    fn test_inherit_category_fails() {
        // Test verifies categories cannot inherit

        // Arrange
        let mut node = category_with(vec![leaf("LEAF")]);
        node.status = Status::Inherit;

        // Act
        let failures = validate_enum(Some(&[node][..]));

        // Assert
        assert_eq!(failures[0].path, ".enum[0].status");
        assert_eq!(failures[0].keyword, "inherit");
    }

    #[test]
    fn test_depth_rules() {
        // Test verifies categories and subcategories need children, details have none

        // Arrange
        let childless_category = EnumNode::new("LONE", "lone", Status::Code(400));
        let childless_sub = EnumNode::new("CAT", "category", Status::Code(400)).child(leaf("SUB"));
        let nested_detail = category_with(vec![leaf("LEAF").child(leaf("TOO_DEEP"))]);

        // Act
        let failures = validate_enum(Some(&[childless_category, childless_sub, nested_detail][..]));

        // Assert
        let summary: Vec<(&str, &str)> = failures
            .iter()
            .map(|f| (f.path.as_str(), f.keyword.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (".enum[0].children", "minItems"),
                (".enum[1].children[0].children", "minItems"),
                (".enum[2].name", "uniqueName"),
                (".enum[2].children[0].children[0].children", "maxItems"),
            ]
        );
    }

    #[test]
    fn test_empty_enum_fails() {
        // Test verifies an empty enum list is refused

        // Arrange & Act
        let failures = validate_enum(Some(&[][..]));

        // Assert
        assert_eq!(failures[0].path, ".enum");
        assert_eq!(failures[0].keyword, "minItems");
    }
}

#[cfg(test)]
mod types_validation_tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_fail() {
        // Test verifies a key may be registered once

        // Arrange
        let types = vec![
            Registration::class("AUTH", ErrorClass::MISSTEP),
            Registration::class("AUTH", ErrorClass::RESPONSE),
        ];

        // Act
        let failures = validate_types(Some(types.as_slice()));

        // Assert
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, ".types[1].key");
        assert_eq!(failures[0].keyword, "uniqueKey");
    }

    #[test]
    fn test_invalid_key_fails_pattern() {
        // Test verifies keys follow the enum name pattern

        // Arrange
        let types = vec![Registration::class("Auth", ErrorClass::MISSTEP)];

        // Act
        let failures = validate_types(Some(types.as_slice()));

        // Assert
        assert_eq!(failures[0].keyword, "pattern");
    }
}

#[cfg(test)]
mod catcher_names_validation_tests {
    use super::*;

    #[test]
    fn test_catcher_names() {
        // Test verifies empty maps and blank names are refused

        // Arrange & Act & Assert
        assert!(validate_catcher_names(None).is_empty());
        assert!(validate_catcher_names(Some(&["audit"][..])).is_empty());
        assert_eq!(validate_catcher_names(Some(&[][..]))[0].keyword, "minProperties");
        assert_eq!(validate_catcher_names(Some(&[""][..]))[0].path, ".catchers['']");
    }

    #[test]
    fn test_name_pattern() {
        // Test verifies the shared name rule

        // Arrange & Act & Assert
        assert!(is_valid_name("TOO_MANY_REQUESTS"));
        assert!(is_valid_name("E404"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("with space"));
        assert!(!is_valid_name("TYPE:SUB"));
        assert!(!is_valid_name("not_found"));
    }
}
