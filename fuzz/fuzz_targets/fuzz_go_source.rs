#![no_main]
use contract_tools::extract::{GoAdapter, LanguageAdapter, SourceFile};
use libfuzzer_sys::fuzz_target;

/// Fuzz the Go adapter with arbitrary source text.
///
/// Syntax errors must come back as errors, never as panics.
fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let adapter = GoAdapter::new();
        let source = SourceFile {
            relative_path: "fuzz.go",
            content,
            module: Some("example.com/fuzz"),
            record_positions: true,
        };
        let _ = adapter.parse_file(&source);
    }
});
