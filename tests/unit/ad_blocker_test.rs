use rstest::rstest;

use stark_browser::services::ad_blocker::{AdBlocker, RequestDecision};

#[rstest]
#[case("https://ad.doubleclick.net/ddm/trackclk")]
#[case("https://adservice.google.com/adsid/integrator.js")]
#[case("https://pagead2.googlesyndication.com/pagead/show_ads.js")]
#[case("https://ads.pubmatic.com/AdServer/js/pwt.js")]
#[case("https://c.amazon-adsystem.com/aax2/apstag.js")]
#[case("https://s.adroll.com/j/roundtrip.js")]
#[case("https://cdn.taboola.com/libtrc/loader.js")]
fn test_default_domains_block(#[case] url: &str) {
    let mut blocker = AdBlocker::with_default_domains();
    assert_eq!(blocker.intercept(url), RequestDecision::Block);
}

#[rstest]
#[case("https://www.rust-lang.org/")]
#[case("https://duckduckgo.com/?q=ads")]
#[case("https://google.com/search?q=doubleclick")]
fn test_ordinary_urls_allowed(#[case] url: &str) {
    let blocker = AdBlocker::with_default_domains();
    // "doubleclick" alone is not a listed domain; "doubleclick.net" is.
    assert!(!blocker.should_block(url));
}

#[test]
fn test_domain_anywhere_in_url_blocks() {
    let blocker = AdBlocker::with_default_domains();
    assert!(blocker.should_block("https://example.com/redirect?to=https://doubleclick.net/x"));
}

#[test]
fn test_matching_ignores_case() {
    let blocker = AdBlocker::with_default_domains();
    assert!(blocker.should_block("https://AD.DoubleClick.NET/path"));
}

#[test]
fn test_blocked_count_only_counts_blocks() {
    let mut blocker = AdBlocker::with_default_domains();
    blocker.intercept("https://example.com/");
    blocker.intercept("https://taboola.com/a");
    blocker.intercept("https://adroll.com/b");
    assert_eq!(blocker.blocked_count(), 2);
}

#[test]
fn test_disabled_blocker_allows_everything() {
    let mut blocker = AdBlocker::with_default_domains();
    blocker.set_enabled(false);
    assert_eq!(blocker.intercept("https://doubleclick.net/"), RequestDecision::Allow);
    assert_eq!(blocker.blocked_count(), 0);
    assert!(blocker.shim_script().is_empty());
}

#[test]
fn test_extra_domains_are_normalized_and_deduplicated() {
    let blocker = AdBlocker::with_default_domains().with_extra_domains([
        " Tracker.Example ",
        "",
        "doubleclick.net",
        "tracker.example",
    ]);
    assert_eq!(blocker.domains().len(), AdBlocker::default_domains().len() + 1);
    assert!(blocker.should_block("https://cdn.tracker.example/t.js"));
}

#[test]
fn test_record_blocked_ignores_unknown_urls() {
    let mut blocker = AdBlocker::with_default_domains();
    assert!(!blocker.record_blocked("https://example.com/app.js"));
    assert!(blocker.record_blocked("https://taboola.com/loader.js"));
    assert_eq!(blocker.blocked_count(), 1);
}

#[test]
fn test_shim_script_embeds_domain_list() {
    let blocker = AdBlocker::new(["ads.example"]);
    let script = blocker.shim_script();
    assert!(script.contains("[\"ads.example\"]"));
    assert!(!script.contains("__STARK_AD_DOMAINS__"));
}
