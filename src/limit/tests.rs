//! Tests for limit module

use super::*;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use test_case::test_case;

/// Drive `limit` over `len` candidates with the loop protocol, without stopping early.
///
/// Returns the emitted positions and the 1-based Advance count after which
/// `should_continue` first turned false.
fn drive(mut limit: Limit, len: usize) -> (Vec<usize>, Option<usize>) {
    let mut emitted = Vec::new();
    let mut stopped_at = None;
    for pos in 0..len {
        limit.next_row();
        if limit.should_output() {
            emitted.push(pos);
        }
        match (limit.should_continue(), stopped_at) {
            (false, None) => stopped_at = Some(pos + 1),
            (true, Some(at)) => panic!("should_continue reverted to true after stopping at {at}"),
            _ => {}
        }
    }
    (emitted, stopped_at)
}

// ============================================================================
// Limit Tests
// ============================================================================

#[test]
fn test_unlimited_outputs_everything() {
    let mut limit = Limit::unlimited();
    for _ in 0..100 {
        limit.next_row();
        assert!(limit.should_output());
        assert!(limit.should_continue());
    }
    assert_eq!(limit.max_items(), 0);
    assert_eq!(limit.total_items(), 0);
    assert!(limit.is_unlimited());
}

#[test]
fn test_single_item() {
    let mut limit = Limit::single_item();

    limit.next_row();
    assert!(limit.should_output());
    assert!(limit.should_continue());

    limit.next_row();
    assert!(!limit.should_output());
    assert!(!limit.should_continue());

    limit.next_row();
    assert!(!limit.should_output());
    assert!(!limit.should_continue());
}

#[test_case(25, Some(25), 60, 25..50, Some(51) ; "second page of 25")]
#[test_case(0, Some(0), 3, 0..3, None ; "zero max is unbounded")]
#[test_case(0, None, 3, 0..3, None ; "no max is unbounded")]
#[test_case(10, Some(5), 8, 0..0, None ; "skip beyond source")]
#[test_case(0, Some(1), 5, 0..1, Some(2) ; "single item")]
#[test_case(3, Some(2), 5, 3..5, None ; "source ends at window end")]
#[test_case(3, Some(2), 6, 3..5, Some(6) ; "one item past window end")]
#[test_case(3, None, 6, 3..6, None ; "skip without max")]
#[test_case(-4, Some(2), 6, 0..2, Some(3) ; "negative skip clamped")]
fn test_window_positions(
    skip: i64,
    max: Option<i64>,
    len: usize,
    expected: std::ops::Range<usize>,
    expected_stop: Option<usize>,
) {
    let (emitted, stopped_at) = drive(Limit::new(skip, max), len);
    assert_eq!(emitted, expected.collect::<Vec<_>>());
    assert_eq!(stopped_at, expected_stop);
}

#[test]
fn test_output_count_matches_formula() {
    for skip in 0..6_usize {
        for max in 1..6_usize {
            for len in 0..15_usize {
                let (emitted, _) = drive(Limit::new(skip as i64, Some(max as i64)), len);
                assert_eq!(emitted.len(), max.min(len.saturating_sub(skip)));
            }
        }
    }
}

#[test]
fn test_accessors_ignore_progress() {
    let mut limit = Limit::new(25, Some(25));
    assert_eq!(limit.total_items(), 50);
    assert_eq!(limit.max_items(), 25);
    assert_eq!(limit.items_to_skip(), 25);

    for _ in 0..60 {
        limit.next_row();
    }
    assert_eq!(limit.total_items(), 50);
    assert_eq!(limit.max_items(), 25);
    assert_eq!(limit.items_to_skip(), 25);
}

#[test]
fn test_construction_sanitizes_inputs() {
    let limit = Limit::new(-5, Some(4));
    assert_eq!(limit.items_to_skip(), 0);
    assert_eq!(limit.total_items(), 4);

    let limit = Limit::new(7, Some(-3));
    assert_eq!(limit.max_items(), 0);
    assert_eq!(limit.total_items(), 0);
    assert!(limit.is_unlimited());
}

#[test]
fn test_overuse_is_harmless() {
    let mut limit = Limit::new(0, Some(1));
    for _ in 0..1_000 {
        limit.next_row();
    }
    assert!(!limit.should_output());
    assert!(!limit.should_continue());

    let mut huge = Limit::new(i64::MAX, Some(i64::MAX));
    huge.next_row();
    assert!(!huge.should_output());
    assert!(huge.should_continue());
}

#[test]
fn test_query_before_first_row() {
    assert!(Limit::new(0, Some(3)).should_output());
    assert!(!Limit::new(2, Some(3)).should_output());
    assert!(Limit::new(2, Some(3)).should_continue());
}

#[test]
fn test_presets_are_independent() {
    let mut first = LimitConfig::SINGLE_ITEM.build();
    first.next_row();
    first.next_row();
    assert!(!first.should_continue());

    let mut second = LimitConfig::SINGLE_ITEM.build();
    assert!(second.should_continue());
    second.next_row();
    assert!(second.should_output());

    assert_eq!(Limit::single_item(), LimitConfig::SINGLE_ITEM.build());
    assert_eq!(Limit::default(), Limit::from(LimitConfig::UNLIMITED));
}

#[test]
fn test_limit_config_round_trip() {
    let limit = Limit::new(-2, Some(10));
    assert_eq!(limit.config(), LimitConfig::new(0, Some(10)));
    assert_eq!(Limit::unlimited().config(), LimitConfig::UNLIMITED);
}

// ============================================================================
// LimitConfig Tests
// ============================================================================

#[test]
fn test_for_page() {
    assert_eq!(LimitConfig::for_page(0, 25), LimitConfig::new(0, Some(25)));
    assert_eq!(LimitConfig::for_page(2, 25), LimitConfig::new(50, Some(25)));
    assert_eq!(LimitConfig::for_page(7, 0), LimitConfig::UNLIMITED);
}

#[test]
fn test_config_display() {
    assert_eq!(LimitConfig::new(25, Some(25)).to_string(), "skip 25, take 25");
    assert_eq!(LimitConfig::new(-1, None).to_string(), "skip 0, take all");
    assert_eq!(LimitConfig::new(3, Some(0)).to_string(), "skip 3, take all");
}

#[test]
fn test_config_serde() {
    let config: LimitConfig = serde_json::from_str(r#"{"offset": 10, "max_items": 5}"#).unwrap();
    assert_eq!(config, LimitConfig::new(10, Some(5)));

    let config: LimitConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LimitConfig::UNLIMITED);

    let json = serde_json::to_value(LimitConfig::new(4, None)).unwrap();
    assert_eq!(json, serde_json::json!({"skip": 4}));
}

// ============================================================================
// Predicate Tests
// ============================================================================

#[test]
fn test_predicate_counts_only_accepted() {
    let accepted: Vec<i32> = (0..10)
        .filter(Limit::new(0, Some(2)).into_predicate())
        .collect();
    assert_eq!(accepted, vec![0, 1, 2]);
}

#[test]
fn test_predicate_with_skip_accepts_nothing() {
    let accepted: Vec<i32> = (0..10)
        .filter(Limit::new(3, Some(2)).into_predicate())
        .collect();
    assert!(accepted.is_empty());
}

#[test]
fn test_predicate_unlimited() {
    let mut accept = Limit::unlimited().into_predicate::<str>();
    assert!(accept("a"));
    assert!(accept("b"));
    assert!(accept("c"));
}

// ============================================================================
// Iterator Adapter Tests
// ============================================================================

#[test]
fn test_windowed_stops_pulling_early() {
    let pulled = Cell::new(0);
    let source = (0..60).inspect(|_| pulled.set(pulled.get() + 1));

    let mut windowed = source.windowed(Limit::new(25, Some(25)));
    let items: Vec<i32> = windowed.by_ref().collect();

    assert_eq!(items, (25..50).collect::<Vec<_>>());
    assert_eq!(pulled.get(), 51);
    assert!(windowed.has_more());
    assert_eq!(windowed.next(), None);
}

#[test]
fn test_windowed_exact_fit_has_no_more() {
    let mut windowed = (0..50).windowed(Limit::new(25, Some(25)));
    assert_eq!(windowed.by_ref().count(), 25);
    assert!(!windowed.has_more());
}

#[test]
fn test_windowed_into_inner_resumes_after_lookahead() {
    let mut windowed = (0..10).windowed(Limit::new(2, Some(3)));
    assert_eq!(windowed.by_ref().collect::<Vec<_>>(), vec![2, 3, 4]);
    let rest: Vec<i32> = windowed.into_inner().collect();
    assert_eq!(rest, vec![6, 7, 8, 9]);
}

#[test]
fn test_windowed_size_hint() {
    assert_eq!((0..10).windowed(Limit::new(0, Some(3))).size_hint(), (0, Some(3)));
    assert_eq!((0..2).windowed(Limit::new(0, Some(3))).size_hint(), (0, Some(2)));
    assert_eq!((0..10).windowed(Limit::unlimited()).size_hint(), (0, Some(10)));
}

#[test]
fn test_collect_page() {
    let page = vec!["a", "b", "c", "d", "e"]
        .windowed(LimitConfig::for_page(1, 2).build())
        .collect_page();

    assert_eq!(page.items, vec!["c", "d"]);
    assert_eq!(page.skip, 2);
    assert_eq!(page.max_items, 2);
    assert!(page.has_more);
    assert_eq!(page.next_config(), Some(LimitConfig::for_page(2, 2)));

    let last = vec!["a", "b", "c", "d", "e"]
        .windowed(LimitConfig::for_page(2, 2).build())
        .collect_page();
    assert_eq!(last.items, vec!["e"]);
    assert!(!last.has_more);
    assert_eq!(last.next_config(), None);
}

#[test]
fn test_page_unbounded_has_no_next() {
    let page = (0..5).windowed(Limit::new(1, None)).collect_page();
    assert_eq!(page.len(), 4);
    assert!(!page.is_empty());
    assert_eq!(page.next_config(), None);
}

#[test]
fn test_next_config_out_of_range_offset() {
    let page = Page {
        items: vec![1],
        skip: i64::MAX as u64,
        max_items: 5,
        has_more: true,
    };
    assert_eq!(page.next_config(), None);

    let page = Page {
        items: vec![1],
        skip: u64::MAX,
        max_items: 5,
        has_more: true,
    };
    assert_eq!(page.next_config(), None);

    let page = Page {
        items: vec![1],
        skip: i64::MAX as u64 - 5,
        max_items: 5,
        has_more: true,
    };
    assert_eq!(page.next_config(), Some(LimitConfig::new(i64::MAX, Some(5))));
}

// ============================================================================
// Stream Adapter Tests
// ============================================================================

#[test]
fn test_windowed_stream() {
    let items: Vec<i32> = tokio_test::block_on(
        futures::stream::iter(0..60)
            .windowed_stream(Limit::new(25, Some(25)))
            .collect(),
    );
    assert_eq!(items, (25..50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_windowed_stream_stops_polling_early() {
    let pulled = Cell::new(0);
    let source = futures::stream::iter(0..100).inspect(|_| pulled.set(pulled.get() + 1));

    let mut windowed = Box::pin(source.windowed_stream(Limit::single_item()));
    assert_eq!(windowed.next().await, Some(0));
    assert_eq!(windowed.next().await, None);
    assert_eq!(pulled.get(), 2);
    assert!(windowed.has_more());
}

#[test]
fn test_windowed_stream_yields_during_long_skip() {
    let mut cx = std::task::Context::from_waker(futures::task::noop_waker_ref());
    let mut windowed = futures::stream::iter(0..1_000).windowed_stream(Limit::new(500, Some(3)));

    // A ready source with a long skip still hands control back between polls
    assert!(windowed.poll_next_unpin(&mut cx).is_pending());
    assert!(windowed.poll_next_unpin(&mut cx).is_pending());

    let items: Vec<i32> = tokio_test::block_on(windowed.collect());
    assert_eq!(items, vec![500, 501, 502]);
}

#[tokio::test]
async fn test_windowed_stream_short_source() {
    let windowed = futures::stream::iter(0..8).windowed_stream(Limit::new(10, Some(5)));
    let items: Vec<i32> = windowed.collect().await;
    assert!(items.is_empty());
}
