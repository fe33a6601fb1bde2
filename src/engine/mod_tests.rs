use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::PathBuf;

use super::*;
use crate::rules::{Pattern, Rule, RuleScope};

const NO_LIMIT: u64 = u64::MAX;

#[derive(Default)]
struct MemoryCorpus {
    files: Vec<CorpusFile>,
    contents: HashMap<PathBuf, io::Result<Vec<u8>>>,
}

impl MemoryCorpus {
    fn add(mut self, path: &str, scope: RuleScope, content: &[u8]) -> Self {
        self.files.push(CorpusFile {
            relative: PathBuf::from(path),
            size: content.len() as u64,
            scope,
        });
        self.contents
            .insert(PathBuf::from(path), Ok(content.to_vec()));
        self
    }

    fn source(self, path: &str, content: &str) -> Self {
        self.add(path, RuleScope::Source, content.as_bytes())
    }

    fn unreadable(mut self, path: &str, kind: io::ErrorKind) -> Self {
        self.files.push(CorpusFile {
            relative: PathBuf::from(path),
            size: 0,
            scope: RuleScope::Source,
        });
        self.contents
            .insert(PathBuf::from(path), Err(io::Error::from(kind)));
        self
    }
}

impl CorpusSource for MemoryCorpus {
    fn files(&self) -> &[CorpusFile] {
        &self.files
    }

    fn open(&self, file: &CorpusFile) -> io::Result<Box<dyn BufRead + '_>> {
        match self.contents.get(&file.relative) {
            Some(Ok(bytes)) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            Some(Err(e)) => Err(io::Error::from(e.kind())),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

fn run(corpus: &MemoryCorpus) -> EngineOutput {
    let table = RuleTable::builtin().unwrap();
    RuleEngine::new(&table, NO_LIMIT)
        .run(corpus, &AtomicBool::new(false), None)
        .unwrap()
}

fn count_of(output: &EngineOutput, id: &str) -> Option<usize> {
    output
        .findings
        .iter()
        .find(|f| f.rule_id == id)
        .map(|f| f.occurrence_count)
}

#[test]
fn empty_corpus_has_no_findings() {
    let output = run(&MemoryCorpus::default());

    assert!(output.findings.is_empty());
    assert_eq!(output.stats, ScanStats::default());
}

#[test]
fn require_fs_on_three_lines_counts_three() {
    let corpus = MemoryCorpus::default().source(
        "a.js",
        "const fs = require('fs');\nconst x = 1;\nrequire('fs')\n",
    )
    .source("b.js", "const fs2 = require(\"fs\");\n");

    let output = run(&corpus);

    assert_eq!(count_of(&output, "fs-module"), Some(3));
    let finding = output.findings.iter().find(|f| f.rule_id == "fs-module").unwrap();
    assert_eq!(finding.category, Category::Critical);
    assert!(finding.rendered_message.contains('3'));
    assert!(!finding.rendered_message.contains("{count}"));
}

#[test]
fn line_with_repeated_pattern_counts_once() {
    let corpus = MemoryCorpus::default().source(
        "a.js",
        "const a = require('fs'), b = require('node:fs');\n",
    );

    assert_eq!(count_of(&run(&corpus), "fs-module"), Some(1));
}

#[test]
fn findings_follow_declaration_order() {
    let corpus = MemoryCorpus::default().source(
        "a.js",
        "fetch(url)\nconsole.log(x)\nrequire('fs')\n",
    );

    let ids: Vec<_> = run(&corpus)
        .findings
        .into_iter()
        .map(|f| f.rule_id)
        .collect();

    assert_eq!(ids, vec!["fs-module", "console-logging", "fetch-api"]);
}

#[test]
fn manifest_rules_only_see_manifests() {
    let corpus = MemoryCorpus::default()
        .add("package.json", RuleScope::Manifest, br#"  "pg": "^8.0.0","#)
        .source("db.js", r#"const name = "pg";"#);

    let output = run(&corpus);

    assert_eq!(count_of(&output, "tcp-database-driver"), Some(1));
    assert_eq!(output.stats.files_scanned, 2);
}

#[test]
fn unreadable_files_are_skipped_and_recorded() {
    let corpus = MemoryCorpus::default()
        .source("ok.js", "require('fs')\n")
        .unreadable("locked.js", io::ErrorKind::PermissionDenied);

    let output = run(&corpus);

    assert_eq!(count_of(&output, "fs-module"), Some(1));
    assert_eq!(output.stats.files_scanned, 1);
    assert_eq!(
        output.stats.skipped,
        vec![SkippedFile {
            path: PathBuf::from("locked.js"),
            reason: SkipReason::PermissionDenied,
        }]
    );
}

#[test]
fn non_utf8_file_is_skipped_without_partial_counts() {
    let mut bytes = b"require('fs')\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0x00, b'\n']);
    let corpus = MemoryCorpus::default().add("bin.js", RuleScope::Source, &bytes);

    let output = run(&corpus);

    assert!(output.findings.is_empty());
    assert_eq!(output.stats.skipped[0].reason, SkipReason::NotText);
}

#[test]
fn oversized_files_are_skipped() {
    let corpus = MemoryCorpus::default().source("big.js", "require('fs')\n");
    let table = RuleTable::builtin().unwrap();

    let output = RuleEngine::new(&table, 4)
        .run(&corpus, &AtomicBool::new(false), None)
        .unwrap();

    assert!(output.findings.is_empty());
    assert_eq!(
        output.stats.skipped[0].reason,
        SkipReason::TooLarge { size: 14, limit: 4 }
    );
}

#[test]
fn skipped_files_are_sorted_by_path() {
    let corpus = MemoryCorpus::default()
        .unreadable("z.js", io::ErrorKind::PermissionDenied)
        .unreadable("a.js", io::ErrorKind::PermissionDenied)
        .unreadable("m.js", io::ErrorKind::PermissionDenied);

    let paths: Vec<_> = run(&corpus)
        .stats
        .skipped
        .into_iter()
        .map(|s| s.path)
        .collect();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("a.js"),
            PathBuf::from("m.js"),
            PathBuf::from("z.js")
        ]
    );
}

#[test]
fn cancelled_run_discards_results() {
    let corpus = MemoryCorpus::default().source("a.js", "require('fs')\n");
    let table = RuleTable::builtin().unwrap();

    let result = RuleEngine::new(&table, NO_LIMIT).run(&corpus, &AtomicBool::new(true), None);

    assert!(matches!(result, Err(CompatError::Cancelled)));
}

#[test]
fn parallel_runs_are_deterministic() {
    let mut corpus = MemoryCorpus::default();
    for i in 0..200 {
        let body = match i % 4 {
            0 => "require('fs')\nprocess.env.KEY\n",
            1 => "fetch(url)\n",
            2 => "console.log('x')\nconsole.log('y')\n",
            _ => "const x = 1;\n",
        };
        corpus = corpus.source(&format!("src/file{i:03}.js"), body);
    }

    let first = run(&corpus);
    let second = run(&corpus);

    assert_eq!(first, second);
    assert_eq!(count_of(&first, "fs-module"), Some(50));
    assert_eq!(count_of(&first, "console-logging"), Some(100));
    assert_eq!(first.stats.files_scanned, 200);
}

#[test]
fn custom_table_counts_with_its_own_rules() {
    let table = RuleTable::new(vec![Rule {
        id: "todo".to_string(),
        patterns: vec![Pattern::Substring("TODO".to_string())],
        category: Category::Info,
        scope: RuleScope::Source,
        message_template: "{count} TODOs".to_string(),
    }])
    .unwrap();
    let corpus = MemoryCorpus::default().source("a.js", "// TODO\n// TODO\n// done\n");

    let output = RuleEngine::new(&table, NO_LIMIT)
        .run(&corpus, &AtomicBool::new(false), None)
        .unwrap();

    assert_eq!(output.findings[0].rendered_message, "2 TODOs");
}
