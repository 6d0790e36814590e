//! # Naming Validator
//!
//! Enforces kebab-case across a deployment or config tree:
//!
//! - every directory name, checked whole;
//! - every YAML file name, checked on the stem before the first `.`;
//! - every service declared under `services:` in a YAML file.
//!
//! Other files (`README.md`, `Dockerfile`, `Makefile`, secrets) keep whatever
//! names their ecosystems expect and are not inspected.

use std::path::Path;

use walkdir::WalkDir;

use deplint_core::NamingValidationResult;

/// Whether `s` is lowercase ASCII alphanumeric tokens joined by single hyphens.
pub fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|token| {
            !token.is_empty()
                && token
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// Best-effort kebab-case form of `s`, used as a suggestion in messages.
///
/// Splits camelCase and PascalCase boundaries, turns `_`, whitespace and other
/// punctuation into single hyphens, and trims leading and trailing separators.
/// A trailing `.ext` is kept and lowercased.
pub fn to_kebab_case(s: &str) -> String {
    let (stem, extension) = match s.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < s.len() => (&s[..idx], Some(&s[idx + 1..])),
        _ => (s, None),
    };

    let chars: Vec<char> = stem.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    let push_separator = |out: &mut String| {
        if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    };

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            push_separator(&mut out);
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                push_separator(&mut out);
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }

    match extension {
        Some(ext) => format!("{out}.{}", ext.to_ascii_lowercase()),
        None => out,
    }
}

/// Whether `name` has a `.yml` or `.yaml` extension (case-insensitive).
pub fn is_yaml_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".yml") || lower.ends_with(".yaml")
}

/// Validate every name under `root_dir`. The root itself is not checked.
pub fn validate_naming(root_dir: &Path) -> NamingValidationResult {
    let mut result = NamingValidationResult::new(root_dir);

    if !root_dir.exists() {
        result.add_error(format!("path does not exist: {}", root_dir.display()));
        return result;
    }
    if !root_dir.is_dir() {
        result.add_error(format!("path is not a directory: {}", root_dir.display()));
        return result;
    }

    for entry in WalkDir::new(root_dir).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root_dir).display().to_string();
                result.add_error(format!("error accessing path {path}: {e}"));
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        let path = entry.path();

        if entry.file_type().is_dir() {
            if !is_kebab_case(&name) {
                result.add_error(format!(
                    "directory '{name}' is not kebab-case (suggested: '{}'): {}",
                    to_kebab_case(&name),
                    path.display()
                ));
            }
            continue;
        }

        if !entry.file_type().is_file() || !is_yaml_file(&name) {
            continue;
        }

        let stem = name.split('.').next().unwrap_or_default();
        if !stem.is_empty() && !is_kebab_case(stem) {
            result.add_error(format!(
                "file '{name}' is not kebab-case (suggested: '{}'): {}",
                to_kebab_case(&name),
                path.display()
            ));
        }

        check_service_names(path, &mut result);
    }

    tracing::debug!(
        dir = %root_dir.display(),
        errors = result.errors.len(),
        "naming validation complete"
    );
    result
}

/// Check the keys of a YAML file's `services` mapping.
fn check_service_names(path: &Path, result: &mut NamingValidationResult) {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read YAML file");
            result.add_warning(format!("cannot read {}: {e}", path.display()));
            return;
        }
    };

    let doc: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result.add_warning(format!("failed to parse {}: {e}", path.display()));
            return;
        }
    };

    let Some(services) = doc.get("services").and_then(|s| s.as_mapping()) else {
        return;
    };

    for key in services.keys() {
        let Some(service) = key.as_str() else {
            continue;
        };
        if !is_kebab_case(service) {
            result.add_error(format!(
                "service '{service}' in {} is not kebab-case (suggested: '{}')",
                path.display(),
                to_kebab_case(service)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn kebab_case_examples() {
        assert!(is_kebab_case("hello"));
        assert!(is_kebab_case("hello-world"));
        assert!(is_kebab_case("service-123"));
        assert!(is_kebab_case("123"));
        assert!(!is_kebab_case(""));
        assert!(!is_kebab_case("Service-One"));
        assert!(!is_kebab_case("HelloWorld"));
        assert!(!is_kebab_case("hello_world"));
        assert!(!is_kebab_case("a--b"));
        assert!(!is_kebab_case("-a"));
        assert!(!is_kebab_case("a-"));
        assert!(!is_kebab_case("compose.yml"));
    }

    #[test]
    fn to_kebab_case_examples() {
        assert_eq!(to_kebab_case("HelloWorld"), "hello-world");
        assert_eq!(to_kebab_case("helloWorld"), "hello-world");
        assert_eq!(to_kebab_case("hello_world"), "hello-world");
        assert_eq!(to_kebab_case("HELLO"), "hello");
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
        assert_eq!(to_kebab_case("My_Config.yaml"), "my-config.yaml");
        assert_eq!(to_kebab_case("MyConfig.yml"), "my-config.yml");
        assert_eq!(to_kebab_case("  my   service  "), "my-service");
        assert_eq!(to_kebab_case("__a__b__"), "a-b");
        assert_eq!(to_kebab_case("my--service"), "my-service");
    }

    fn run(setup: impl FnOnce(&Path)) -> NamingValidationResult {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        validate_naming(dir.path())
    }

    #[test]
    fn valid_tree_passes() {
        let result = run(|root| {
            fs::create_dir_all(root.join("service-one/config")).unwrap();
            fs::write(root.join("service-one/config/service-one-app.yml"), "otlp: true\n").unwrap();
        });
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn empty_dir_passes() {
        let result = run(|_| {});
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn pascal_case_directory_fails_with_suggestion() {
        let result = run(|root| fs::create_dir(root.join("ServiceOne")).unwrap());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("ServiceOne"));
        assert!(result.errors[0].contains("kebab-case"));
        assert!(result.errors[0].contains("service-one"));
    }

    #[test]
    fn one_error_per_bad_directory() {
        let result = run(|root| {
            fs::create_dir(root.join("valid-name")).unwrap();
            fs::create_dir(root.join("Invalid_Name")).unwrap();
            fs::create_dir(root.join("another-valid")).unwrap();
        });
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Invalid_Name"));
    }

    #[test]
    fn directory_edge_cases() {
        for (name, valid) in [
            ("-invalid-", false),
            ("invalid-", false),
            ("my--service", false),
            ("UPPER", false),
            ("service-123", true),
        ] {
            let result = run(|root| fs::create_dir(root.join(name)).unwrap());
            assert_eq!(result.valid, valid, "{name}");
        }
    }

    #[test]
    fn yaml_file_names_checked_on_stem() {
        let result = run(|root| {
            fs::write(root.join("MyConfig.yml"), "key: value\n").unwrap();
            fs::write(root.join("my_config.yaml"), "key: value\n").unwrap();
            fs::write(root.join("sm-im-app-postgresql-1.yml"), "key: value\n").unwrap();
            fs::write(root.join("compose.demo.yml"), "key: value\n").unwrap();
        });
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    }

    #[test]
    fn non_yaml_files_are_not_inspected() {
        let result = run(|root| {
            fs::write(root.join("README.md"), "# readme\n").unwrap();
            fs::write(root.join("config.json"), "{}").unwrap();
            fs::write(root.join("Makefile"), "all:\n").unwrap();
            fs::write(root.join("Dockerfile"), "FROM alpine\n").unwrap();
            fs::write(root.join("Weird_Compose.txt"), "services:\n  Bad_Name: {}\n").unwrap();
        });
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn compose_service_names_checked() {
        let result = run(|root| {
            fs::write(
                root.join("docker-compose.yml"),
                "services:\n  my_service:\n    image: nginx\n  AnotherService:\n    image: postgres\n  good-one:\n    image: redis\n",
            )
            .unwrap();
        });
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e.contains("my_service")));
        assert!(result.errors.iter().any(|e| e.contains("AnotherService")));
    }

    #[test]
    fn empty_services_mapping_passes() {
        let result = run(|root| fs::write(root.join("compose.yml"), "services:\n").unwrap());
        assert!(result.valid);
    }

    #[test]
    fn unparsable_yaml_is_warning() {
        let result = run(|root| {
            fs::write(root.join("compose.yml"), "services:\n  web: [unterminated\n").unwrap();
        });
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("failed to parse"));
    }

    #[test]
    fn undecodable_yaml_is_a_warning_not_an_error() {
        let result = run(|root| {
            fs::create_dir_all(root.join("sm-im")).unwrap();
            fs::write(root.join("sm-im/compose.yml"), [0xff, 0xfe, b's', 0x80]).unwrap();
        });
        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("cannot read "));
        assert!(result.warnings[0].contains("compose.yml"));
    }

    #[test]
    fn directory_named_like_yaml_fails_naming_only() {
        let result = run(|root| fs::create_dir(root.join("compose.yml")).unwrap());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_naming(&dir.path().join("nope"));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("does not exist"));
    }

    #[test]
    fn file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("compose.yml");
        fs::write(&file, "services: {}\n").unwrap();
        let result = validate_naming(&file);
        assert!(!result.valid);
        assert!(result.errors[0].contains("not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_is_recorded_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("test.yml"), "key: value\n").unwrap();
        fs::create_dir(dir.path().join("Other_Dir")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = validate_naming(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("error accessing path")));
        assert!(result.errors.iter().any(|e| e.contains("Other_Dir")));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normaliser_output_is_kebab_case(input in "[A-Za-z0-9_ -]{0,24}") {
                let out = to_kebab_case(&input);
                prop_assert!(out.is_empty() || is_kebab_case(&out), "{input:?} -> {out:?}");
            }

            #[test]
            fn normaliser_is_identity_on_kebab_case(input in "[a-z0-9]{1,6}(-[a-z0-9]{1,6}){0,3}") {
                prop_assert_eq!(to_kebab_case(&input), input);
            }
        }
    }
}
