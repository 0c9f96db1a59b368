#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz contract document decoding.
///
/// Feeds arbitrary UTF-8 strings to `Contract::from_json`, which decodes,
/// canonicalizes and validates. Anything it accepts must re-encode.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(contract) = contract_tools::Contract::from_json(s) {
            let _ = contract.to_json();
        }
    }
});
