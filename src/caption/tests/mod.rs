use crate::caption::{MediaKind, analyze, classify, extract_hashtags, merge, normalize};

#[test]
fn test_weekday_post_with_hashtags() {
    let caption = Some("Montag... #alltag #bahn");

    let topic = classify(&normalize(caption), MediaKind::Post);
    assert_eq!(topic.as_slice(), ["post", "daily-chaos"]);

    let hashtags = extract_hashtags(caption);
    assert_eq!(hashtags, vec!["alltag", "bahn"]);

    let merged = merge(topic, &hashtags);
    assert_eq!(merged.as_slice(), ["post", "daily-chaos", "alltag", "bahn"]);

    let analysis = analyze(caption, MediaKind::Post);
    assert_eq!(analysis.tags, merged);
    assert!(
        analysis
            .rewritten
            .de
            .starts_with("Post mit Fokus auf Alltagschaos:")
    );
}

#[test]
fn test_live_reel_in_berlin() {
    let analysis = analyze(Some("Live in Berlin heute Abend!"), MediaKind::Reel);

    assert_eq!(
        analysis.tags.as_slice(),
        ["reel", "live", "on-tour", "dark-humor"]
    );
    assert!(
        analysis
            .rewritten
            .en
            .ends_with("without a safety rail. Live vibe, straight into timing.")
    );
    assert!(analysis.rewritten.de.ends_with(" Live-Vibe, direkt ins Timing."));
}

#[test]
fn test_absent_caption_video() {
    let analysis = analyze(None, MediaKind::Video);

    assert_eq!(analysis.caption, "");
    assert_eq!(analysis.tags.as_slice(), ["video", "dark-humor"]);
    assert!(extract_hashtags(None).is_empty());
    assert_eq!(
        analysis.rewritten.de,
        "Video-Clip mit Fokus auf dunkle Alltagskanten: trocken, scharf und ohne Sicherheitsnetz."
    );
    assert_eq!(
        analysis.rewritten.en,
        "Video clip focused on dark everyday edges: dry, sharp, and without a safety rail."
    );
}

#[test]
fn test_dotted_hashtag_becomes_hyphenated() {
    let analysis = analyze(Some("Mal wieder #Schwarzer.Humor"), MediaKind::Post);
    assert_eq!(
        analysis.tags.as_slice(),
        ["post", "dark-humor", "schwarzer-humor"]
    );
}

#[test]
fn test_url_does_not_leak_into_caption_or_rewrite() {
    let caption = Some("Tickets https://tickets.example.com/wien #tour");
    let analysis = analyze(caption, MediaKind::Reel);

    assert_eq!(analysis.caption, "Tickets #tour");
    assert!(!analysis.rewritten.de.contains("https://"));
    assert!(!analysis.rewritten.en.contains("Tickets"));
    // "wien" only appeared inside the URL
    assert!(!analysis.tags.contains("on-tour"));
    assert_eq!(analysis.tags.as_slice(), ["reel", "live", "dark-humor", "tour"]);
}

#[test]
fn test_hashtag_identical_to_topic_tag_is_not_duplicated() {
    // the hashtag token stops at the hyphen, so only "#self" is extracted
    let analysis = analyze(Some("#live #self-own"), MediaKind::Video);
    assert_eq!(extract_hashtags(Some("#live #self-own")), vec!["live", "self"]);
    assert_eq!(
        analysis.tags.as_slice(),
        ["video", "live", "self-own", "self"]
    );
}

#[test]
fn test_hashtags_do_not_change_dominant_topic() {
    let analysis = analyze(Some("#comedy peinlich"), MediaKind::Post);
    assert_eq!(analysis.tags.as_slice(), ["post", "self-own", "comedy"]);
    assert!(analysis.rewritten.en.contains("self-own humor"));
}

#[test]
fn test_structural_hashtags_merge_after_the_leading_tag() {
    // hashtag slugs are merged verbatim, even when they name a media kind
    let post = analyze(Some("#video"), MediaKind::Post);
    assert_eq!(post.tags.as_slice(), ["post", "dark-humor", "video"]);
    assert_eq!(post.tags.first(), Some("post"));

    // "#..." slugifies to the empty-slug placeholder
    let reel = analyze(Some("#..."), MediaKind::Reel);
    assert_eq!(reel.tags.as_slice(), ["reel", "dark-humor", "post"]);
    assert!(reel.rewritten.en.starts_with("Reel focused on dark everyday edges:"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::caption::model::TONE_TAGS;
    use proptest::prelude::*;
    use regex::Regex;

    fn media_kind() -> impl Strategy<Value = MediaKind> {
        prop_oneof![
            Just(MediaKind::Post),
            Just(MediaKind::Video),
            Just(MediaKind::Reel),
        ]
    }

    proptest! {
        #[test]
        fn test_normalize_never_keeps_urls(caption in ".*", host in "[a-z]{1,8}") {
            let text = format!("{caption} https://{host}.com/x {caption}");
            let normalized = normalize(Some(&text));
            let url = Regex::new(r"(?i)https?://\S+").unwrap();
            prop_assert!(!url.is_match(&normalized));
            prop_assert!(!normalized.contains("  "));
        }

        #[test]
        fn test_classify_invariants(caption in ".*", kind in media_kind()) {
            let tags = classify(&normalize(Some(&caption)), kind);
            prop_assert_eq!(tags.first(), Some(kind.tag()));
            prop_assert!(TONE_TAGS.iter().any(|t| tags.contains(t)));
        }

        #[test]
        fn test_analyze_never_panics(caption in ".*", kind in media_kind()) {
            let analysis = analyze(Some(&caption), kind);
            prop_assert!(!analysis.rewritten.de.is_empty());
            prop_assert!(!analysis.rewritten.en.is_empty());
            let merged = merge(analysis.tags.clone(), analysis.tags.as_slice());
            prop_assert_eq!(merged, analysis.tags);
        }
    }
}
