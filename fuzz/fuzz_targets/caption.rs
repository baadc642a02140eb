#![no_main]

use libfuzzer_sys::fuzz_target;
use reelfeed::caption::{MediaKind, analyze};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let caption = String::from_utf8_lossy(rest);
    let kind = MediaKind::from_flags(flags & 1 == 1, flags & 2 == 2);

    // Analysis is total: it must never panic and always yields a tone tag
    let analysis = analyze(Some(&caption), kind);
    assert_eq!(analysis.tags.first(), Some(kind.tag()));
    assert!(analysis.tags.has_tone());
    assert!(!analysis.rewritten.de.is_empty() && !analysis.rewritten.en.is_empty());
});
