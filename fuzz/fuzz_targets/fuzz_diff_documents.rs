#![no_main]
use contract_tools::{Contract, DiffEngine};
use libfuzzer_sys::fuzz_target;

/// Fuzz the differ with pairs of decoded documents.
///
/// The input is split at the first NUL byte into an old and a new document.
fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|&b| b == 0) else {
        return;
    };
    let (Ok(old), Ok(new)) = (
        std::str::from_utf8(&data[..split]),
        std::str::from_utf8(&data[split + 1..]),
    ) else {
        return;
    };
    if let (Ok(old), Ok(new)) = (Contract::from_json(old), Contract::from_json(new)) {
        let _ = DiffEngine::default().diff(&old, &new);
    }
});
