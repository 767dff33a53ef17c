//! Property tests for logical path normalization.

use std::rc::Rc;

use proptest::prelude::*;

use packsmith::domain::ports::NoopLogger;
use packsmith::{LogicalPath, MemoryFs, Packaging};

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[a-z0-9_-]{1,8}").unwrap();
    proptest::collection::vec(segment, 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_normalize_never_panics(s in "(?s).{0,128}") {
        let _ = LogicalPath::new(&s);
    }

    /// PROPERTY: Normalizing twice changes nothing.
    #[test]
    fn property_normalize_is_idempotent(s in "[a-z./\\\\]{0,64}") {
        let once = LogicalPath::new(&s);
        let twice = LogicalPath::new(once.as_str());
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Normalized paths use `/` and contain no `.` or empty segments.
    #[test]
    fn property_normalized_segments_are_clean(s in "[a-z./\\\\]{0,64}") {
        let path = LogicalPath::new(&s);
        let text = path.as_str();
        prop_assert!(!text.contains('\\'));
        if text != "." && text != "/" {
            for segment in text.trim_start_matches('/').split('/') {
                prop_assert!(!segment.is_empty() && segment != ".", "{:?}", text);
            }
        }
    }

    /// PROPERTY: Any spelling of a path registers the same source file.
    #[test]
    fn property_spellings_share_one_source_file(parts in segments()) {
        let mut packaging = Packaging::new(Rc::new(MemoryFs::new()), Rc::new(NoopLogger));

        let plain = packaging.add_source_file(parts.join("/")).unwrap();
        let windows = packaging.add_source_file(parts.join("\\")).unwrap();
        let dotted = packaging
            .add_source_file(format!("./{}", parts.join("/./")))
            .unwrap();

        prop_assert_eq!(plain, windows);
        prop_assert_eq!(plain, dotted);
        prop_assert_eq!(packaging.source_count(), 1);
    }
}
