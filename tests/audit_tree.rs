//! End-to-end audits over throwaway repository trees

use licaudit::policy::{DocumentedEntry, PathOverride, PolicyConfig};
use licaudit::report::{render_report, RenderOptions, ReportFormat};
use licaudit::{AuditConfig, AuditEngine, AuditReport, FileVerdict, Policy};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ─── Helpers ────────────────────────────────────────────────────────

const ASF_HEADER: &str = r#"/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.
*/
"#;

const MIT_TEXT: &str = "MIT License\n\nCopyright (c) 2024 Someone\n\n\
Permission is hereby granted, free of charge, to any person obtaining a copy\n\
of this software and associated documentation files (the \"Software\")...\n";

const GPL_HEADER: &str = "# This program is free software: you can redistribute it and/or modify\n\
# it under the terms of the GNU General Public License as published by\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn audit_with(root: &Path, config: PolicyConfig) -> AuditReport {
    let policy = Policy::new(config).unwrap();
    let engine = AuditEngine::new(AuditConfig { workers: Some(4) }, policy).unwrap();
    engine.audit(root).unwrap()
}

fn audit(root: &Path) -> AuditReport {
    audit_with(root, PolicyConfig::default())
}

fn verdict<'a>(report: &'a AuditReport, path: &str) -> &'a FileVerdict {
    report
        .files
        .iter()
        .find(|v| v.path == path)
        .unwrap_or_else(|| panic!("no verdict for {}", path))
}

// ═══════════════════════════════════════════════════════════════════
// Per-file classification
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_empty_file_is_always_empty() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/empty.rs", "");
    write(dir.path(), "vendor/LICENSE", MIT_TEXT);
    write(dir.path(), "vendor/blank.js", "");

    let mut config = PolicyConfig::default();
    config.overrides.push(PathOverride {
        path: "src/empty.rs".into(),
        licenses: vec!["GPL".into()],
        reason: None,
    });
    config.documented.push(DocumentedEntry::new("vendor/"));

    let report = audit_with(dir.path(), config);
    assert_eq!(verdict(&report, "src/empty.rs").rendered, "Empty");
    assert_eq!(verdict(&report, "vendor/blank.js").rendered, "Empty");
    assert!(!verdict(&report, "src/empty.rs").failed);
}

#[test]
fn test_apache_header_passes_cleanly() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Main.java", &format!("{}class Main {{}}\n", ASF_HEADER));
    write(dir.path(), "LICENSE", &format!("{}\n@src/Main.java\n", ASF_HEADER));

    let report = audit(dir.path());
    let v = verdict(&report, "src/Main.java");
    assert_eq!(v.rendered, "Apache");
    assert!(!v.failed);
    assert!(report.orphaned.is_empty());
}

#[test]
fn test_conflicting_licenses_flagged() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tools/mixed.py", &format!("{}{}", ASF_HEADER, GPL_HEADER));

    let report = audit(dir.path());
    let v = verdict(&report, "tools/mixed.py");
    assert_eq!(v.rendered, "Apache!, GPL!");
    assert!(v.failed);
    assert!(report.failed);
}

#[test]
fn test_conflict_documented_as_combination() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tools/mixed.py", &format!("{}{}", ASF_HEADER, GPL_HEADER));
    write(dir.path(), "README.md", ASF_HEADER);

    let mut config = PolicyConfig::default();
    config
        .documented
        .push(DocumentedEntry::new("tools/mixed.py").with_licenses(["Apache", "GPL"]));

    let report = audit_with(dir.path(), config);
    assert_eq!(verdict(&report, "tools/mixed.py").rendered, "Apache, GPL");
    assert!(!report.failed);
}

#[test]
fn test_override_does_not_suppress_detection() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/guide.md", ASF_HEADER);

    let mut config = PolicyConfig::default();
    config.overrides.push(PathOverride {
        path: "docs/guide.md".into(),
        licenses: vec!["Docs".into()],
        reason: Some("documentation".into()),
    });

    let report = audit_with(dir.path(), config);
    let v = verdict(&report, "docs/guide.md");
    assert_eq!(v.rendered, "Docs, Apache");
    assert!(!v.failed);
}

// ═══════════════════════════════════════════════════════════════════
// Inheritance and fallback
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_inherits_from_directory_license() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plugin/LICENSE", ASF_HEADER);
    write(dir.path(), "plugin/src/util.go", "package util\n");

    let report = audit(dir.path());
    let v = verdict(&report, "plugin/src/util.go");
    assert_eq!(v.rendered, "Apache~");
    assert!(!v.failed);
    assert_eq!(report.stats.files_inherited, 1);
}

#[test]
fn test_inherited_license_needs_manifest() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "vendor/left-pad/LICENSE", MIT_TEXT);
    write(dir.path(), "vendor/left-pad/index.js", "module.exports = pad;\n");

    let report = audit(dir.path());
    assert_eq!(verdict(&report, "vendor/left-pad/index.js").rendered, "MIT~!");
    assert_eq!(verdict(&report, "vendor/left-pad/LICENSE").rendered, "MIT!");
    assert!(report.failed);

    write(dir.path(), "LICENSE", &format!("{}\n@vendor/left-pad/\n", ASF_HEADER));
    let report = audit(dir.path());
    assert_eq!(verdict(&report, "vendor/left-pad/index.js").rendered, "MIT~");
    assert!(!report.failed, "{:?}", report.files);
}

#[test]
fn test_docs_license_gives_nothing_to_inherit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site/LICENSE", "Documentation license\n");
    write(dir.path(), "site/page.html", "<html></html>\n");
    write(dir.path(), "site/logo.png", "\u{89}PNG fake");

    let mut config = PolicyConfig::default();
    config.overrides.push(PathOverride {
        path: "site/LICENSE".into(),
        licenses: vec!["Docs".into()],
        reason: None,
    });

    let report = audit_with(dir.path(), config);
    let page = verdict(&report, "site/page.html");
    assert!(page.unknown);
    assert_eq!(page.rendered, "Unknown!");
    assert!(page.failed);

    let logo = verdict(&report, "site/logo.png");
    assert_eq!(logo.rendered, "Image");
    assert!(!logo.failed);
}

#[test]
fn test_zero_length_license_does_not_pass_children() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "e/LICENSE", "");
    write(dir.path(), "e/a.c", "int y;");

    let report = audit(dir.path());
    assert_eq!(verdict(&report, "e/LICENSE").rendered, "Empty");
    let v = verdict(&report, "e/a.c");
    assert_eq!(v.rendered, "Empty~!");
    assert!(v.failed);
    assert!(report.failed);
}

#[test]
fn test_ignored_license_does_not_hide_children() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gen/LICENSE", "generated sources\n");
    write(dir.path(), "gen/out.c", "int x;");

    let mut config = PolicyConfig::default();
    config.overrides.push(PathOverride {
        path: "gen/LICENSE".into(),
        licenses: vec!["Ignore".into()],
        reason: None,
    });

    let report = audit_with(dir.path(), config);
    assert!(verdict(&report, "gen/LICENSE").ignored);
    let v = verdict(&report, "gen/out.c");
    assert!(!v.ignored);
    assert_eq!(v.rendered, "Ignore~!");
    assert!(v.failed);

    let text = render_report(&report, ReportFormat::Text, RenderOptions::default()).unwrap();
    assert!(text.contains("gen/out.c"));
    assert!(!text.contains("gen/LICENSE"));
}

#[test]
fn test_inherited_apache_passes_without_entry() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/LICENSE.txt", ASF_HEADER);
    write(dir.path(), "lib/deep/nested/x.py", "print('hi')\n");

    let report = audit(dir.path());
    let v = verdict(&report, "lib/deep/nested/x.py");
    assert_eq!(v.rendered, "Apache~");
    assert!(!v.failed);
    assert!(!report.failed, "{:?}", report.files);
}

// ═══════════════════════════════════════════════════════════════════
// Manifest and suppression
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_orphaned_entry_fails_clean_tree() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/lib.rs", ASF_HEADER);
    write(dir.path(), "LICENSE", &format!("{}\n@vendor/removed-lib/\n", ASF_HEADER));

    let report = audit(dir.path());
    assert!(report.files.iter().all(|v| !v.failed));
    assert_eq!(report.orphaned, vec!["vendor/removed-lib/"]);
    assert!(report.failed);

    let text = render_report(&report, ReportFormat::Text, RenderOptions { quiet: true }).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("Extra-License!"));
}

#[test]
fn test_ignore_tag_hides_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gen/parser.c", GPL_HEADER);

    let mut config = PolicyConfig::default();
    config.overrides.push(PathOverride {
        path: "gen/parser.c".into(),
        licenses: vec!["Ignore".into()],
        reason: Some("generated".into()),
    });

    let report = audit_with(dir.path(), config);
    let v = verdict(&report, "gen/parser.c");
    assert!(v.ignored);
    assert!(!report.failed);

    let text = render_report(&report, ReportFormat::Text, RenderOptions::default()).unwrap();
    assert!(!text.contains("gen/parser.c"));
}

#[test]
fn test_ignore_globs_exclude_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "target/debug/build.log", "no license here");
    write(dir.path(), ".git/config", "[core]");
    write(dir.path(), "main.rs", ASF_HEADER);

    let report = audit(dir.path());
    let paths: Vec<_> = report.files.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["main.rs"]);
    assert_eq!(report.stats.files_excluded, 1);
}

#[test]
fn test_custom_signature_from_config() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "internal/secret.rs",
        "// ACME CORP: proprietary and confidential.\n",
    );

    let config: PolicyConfig = toml::from_str(
        r#"
builtin_signatures = false

[[signature]]
license = "Acme"
phrase = "Acme Corp proprietary and confidential"

[[documented]]
path = "internal/"
licenses = ["Acme"]
"#,
    )
    .unwrap();

    let report = audit_with(dir.path(), config);
    assert_eq!(verdict(&report, "internal/secret.rs").rendered, "Acme");
    assert!(!report.failed);
    assert_eq!(report.stats.licenses, 1);
}

// ═══════════════════════════════════════════════════════════════════
// Determinism and project loading
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_repeat_audits_identical() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
        let body = match i % 4 {
            0 => ASF_HEADER.to_string(),
            1 => MIT_TEXT.to_string(),
            2 => format!("{}{}", ASF_HEADER, GPL_HEADER),
            _ => "plain text".to_string(),
        };
        write(dir.path(), &format!("d{}/f{}.txt", i % 5, i), &body);
    }
    write(dir.path(), "d1/LICENSE", MIT_TEXT);

    let first = audit(dir.path());
    let second = audit(dir.path());
    assert_eq!(first.files, second.files);
    assert_eq!(first.orphaned, second.orphaned);

    let paths: Vec<_> = first.files.iter().map(|v| v.path.clone()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn test_project_policy_file_loaded() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/dep.js", MIT_TEXT);
    write(
        dir.path(),
        ".licaudit.toml",
        "[[documented]]\npath = \"lib/dep.js\"\n\n\
         [[override]]\npath = \".licaudit.toml\"\nlicenses = [\"Ignore\"]\n",
    );

    let engine = AuditEngine::for_project(dir.path(), AuditConfig::default()).unwrap();
    let report = engine.audit(dir.path()).unwrap();
    assert_eq!(verdict(&report, "lib/dep.js").rendered, "MIT");
    assert!(!report.failed, "{:?}", report.files);
}

#[test]
fn test_json_report_round_trips_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/LICENSE", MIT_TEXT);
    write(dir.path(), "a/b.c", "int x;");

    let report = audit(dir.path());
    let json = render_report(&report, ReportFormat::Json, RenderOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["failed"], serde_json::Value::Bool(true));
    let files = value["files"].as_array().unwrap();
    let b = files.iter().find(|f| f["path"] == "a/b.c").unwrap();
    assert_eq!(b["rendered"], "MIT~!");
    assert_eq!(b["tags"][0]["inferred"], serde_json::Value::Bool(true));
}
