use std::path::Path;

use super::*;

fn js_filter(exclude: &[&str]) -> GlobFilter {
    let exclude: Vec<String> = exclude.iter().map(|s| (*s).to_string()).collect();
    GlobFilter::new(
        vec!["js".to_string(), "ts".to_string()],
        vec!["package.json".to_string()],
        &exclude,
    )
    .unwrap()
}

#[test]
fn filter_by_extension() {
    let filter = js_filter(&[]);

    assert_eq!(
        filter.classify(Path::new("src/index.ts")),
        Some(RuleScope::Source)
    );
    assert_eq!(filter.classify(Path::new("src/logo.png")), None);
    assert_eq!(filter.classify(Path::new("README")), None);
}

#[test]
fn manifest_is_classified_by_file_name() {
    let filter = js_filter(&[]);

    assert_eq!(
        filter.classify(Path::new("package.json")),
        Some(RuleScope::Manifest)
    );
    assert_eq!(
        filter.classify(Path::new("packages/api/package.json")),
        Some(RuleScope::Manifest)
    );
    assert_eq!(filter.classify(Path::new("tsconfig.json")), None);
}

#[test]
fn manifest_wins_over_extension() {
    let filter = GlobFilter::new(
        vec!["json".to_string()],
        vec!["package.json".to_string()],
        &[],
    )
    .unwrap();

    assert_eq!(
        filter.classify(Path::new("package.json")),
        Some(RuleScope::Manifest)
    );
    assert_eq!(
        filter.classify(Path::new("data.json")),
        Some(RuleScope::Source)
    );
}

#[test]
fn filter_exclude_patterns() {
    let filter = js_filter(&["**/node_modules/**", "**/dist/**"]);

    assert_eq!(
        filter.classify(Path::new("src/main.js")),
        Some(RuleScope::Source)
    );
    assert_eq!(filter.classify(Path::new("node_modules/express/index.js")), None);
    assert_eq!(filter.classify(Path::new("web/dist/bundle.js")), None);
}

#[test]
fn prune_dir_uses_directory_names_from_patterns() {
    let filter = js_filter(&["**/node_modules/**", "**/*.generated.js"]);

    assert!(filter.prune_dir(Path::new("node_modules")));
    assert!(filter.prune_dir(Path::new("packages/web/node_modules")));
    assert!(!filter.prune_dir(Path::new("src")));
}

#[test]
fn filter_invalid_pattern_returns_error() {
    let result = GlobFilter::new(vec!["js".to_string()], vec![], &["[invalid".to_string()]);
    assert!(result.is_err());
}

#[test]
fn split_dir_patterns_keeps_bare_names_for_any_depth_patterns_only() {
    let (names, prefixes) = split_dir_patterns(&[
        "**/node_modules/**".to_string(),
        "**/*/**".to_string(),
        "src/*.js".to_string(),
        ".git/**".to_string(),
        "src/generated/**".to_string(),
    ]);

    assert_eq!(names, vec!["node_modules".to_string()]);
    assert_eq!(
        prefixes,
        vec![
            "**/*".to_string(),
            ".git".to_string(),
            "src/generated".to_string()
        ]
    );
}

#[test]
fn anchored_exclude_prunes_only_the_matching_directory() {
    let filter = js_filter(&["legacy/**"]);

    assert!(filter.prune_dir(Path::new("legacy")));
    assert!(!filter.prune_dir(Path::new("src/legacy")));
    assert_eq!(filter.classify(Path::new("legacy/app.js")), None);
    assert_eq!(
        filter.classify(Path::new("src/legacy/app.js")),
        Some(RuleScope::Source)
    );
}

#[test]
fn nested_anchored_exclude_leaves_same_name_elsewhere() {
    let filter = js_filter(&["src/generated/**"]);

    assert!(filter.prune_dir(Path::new("src/generated")));
    assert!(!filter.prune_dir(Path::new("lib/generated")));
    assert!(!filter.prune_dir(Path::new("generated")));
}

#[test]
fn from_config_uses_scanner_section() {
    let config = ScannerConfig::default();
    let filter = GlobFilter::from_config(&config).unwrap();

    assert_eq!(
        filter.classify(Path::new("api/handler.mjs")),
        Some(RuleScope::Source)
    );
    assert_eq!(filter.classify(Path::new(".next/server/page.js")), None);
}
