// tests/property_ordering.rs

use proptest::prelude::*;

use codesubmit::config::ToolchainConfig;
use codesubmit::engine::Engine;
use codesubmit::types::SourceFileRef;
use codesubmit_test_utils::builders::{ExecutionConfigBuilder, SourceFileBuilder};
use codesubmit_test_utils::fake_compiler::FakeCompiler;
use codesubmit_test_utils::fake_runner::FakeRunner;

const EXTENSIONS: &[&str] = &["py", "java", "c", "go", "txt"];

// Unique names so the Java collision rule never kicks in.
fn batch_strategy(max_files: usize) -> impl Strategy<Value = Vec<SourceFileRef>> {
    proptest::collection::vec(0..EXTENSIONS.len(), 1..=max_files).prop_map(|exts| {
        exts.into_iter()
            .enumerate()
            .map(|(i, ext)| {
                SourceFileBuilder::new(&format!("dir{}/F{}.{}", i % 3, i, EXTENSIONS[ext])).build()
            })
            .collect()
    })
}

fn run_batch(files: Vec<SourceFileRef>, enabled: bool) -> (Vec<String>, Vec<bool>, usize) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    rt.block_on(async move {
        let runner = FakeRunner::new();
        let calls = runner.calls();
        let mut engine = Engine::new(runner, FakeCompiler::succeeding(), ToolchainConfig::default());
        let cfg = ExecutionConfigBuilder::new().enabled(enabled).build();
        let entries = engine.execute_all(files, &cfg).await.expect("non-empty batch");
        let spawns = calls.lock().unwrap().len();
        (
            entries.iter().map(|e| e.file.rel_path.clone()).collect(),
            entries.iter().map(|e| e.result.is_some()).collect(),
            spawns,
        )
    })
}

proptest! {
    #[test]
    fn execute_all_preserves_length_and_order(files in batch_strategy(12)) {
        let expected: Vec<String> = files.iter().map(|f| f.rel_path.clone()).collect();
        let runnable = files
            .iter()
            .filter(|f| f.rel_path.ends_with(".py") || f.rel_path.ends_with(".java"))
            .count();

        let (order, has_result, spawns) = run_batch(files, true);

        prop_assert_eq!(&order, &expected);
        prop_assert_eq!(has_result.iter().filter(|r| **r).count(), runnable);
        prop_assert_eq!(spawns, runnable);
    }

    #[test]
    fn disabled_batches_never_spawn(files in batch_strategy(12)) {
        let expected: Vec<String> = files.iter().map(|f| f.rel_path.clone()).collect();

        let (order, has_result, spawns) = run_batch(files, false);

        prop_assert_eq!(order, expected);
        prop_assert!(has_result.iter().all(|r| !r));
        prop_assert_eq!(spawns, 0);
    }
}
