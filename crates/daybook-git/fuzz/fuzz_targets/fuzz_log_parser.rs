#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let output = String::from_utf8_lossy(data);
    for commit in daybook_git::parse_log_output(&output, "fuzz") {
        assert!(!commit.hash.is_empty());
        assert!(!commit.author.contains('|'));
    }
});
