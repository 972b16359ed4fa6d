use super::*;

fn r(start: usize, end: usize) -> Option<PageRange> {
    Some(PageRange::new(start, end).unwrap())
}

#[test]
fn absent_range_returns_everything() {
    let pages = [1, 2, 3, 4];
    assert_eq!(resolve_range(&pages, None), &pages);
    assert_eq!(resolve_range(&pages, r(1, 4)), &pages);
}

#[test]
fn single_page_range_picks_kth_page() {
    let pages = ["a", "b", "c"];
    for k in 1..=pages.len() {
        assert_eq!(resolve_range(&pages, r(k, k)), &[pages[k - 1]]);
    }
}

#[test]
fn overrun_is_truncated_not_rejected() {
    let pages = [10, 20, 30];
    assert_eq!(resolve_range(&pages, r(2, 99)), &[20, 30]);
    assert!(resolve_range(&pages, r(4, 9)).is_empty());
    assert!(resolve_range::<u8>(&[], r(1, 1)).is_empty());
}
