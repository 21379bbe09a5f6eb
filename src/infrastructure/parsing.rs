//! Wire-format parser for listing pages
//!
//! A listing page is up to a fixed number of `|`-separated slots, each
//! itself `:`-separated into sub-fields, where sub-field index 1 is the
//! item identifier. A body of the literal `-1` marks the end of the feed.

use tracing::debug;

use crate::domain::constants::listing;
use crate::domain::entities::ListingPage;

/// Parse one raw response body into the identifiers it carries, in slot
/// order.
///
/// Slot processing stops at the first slot whose identifier sub-field is
/// missing or does not parse as a non-negative integer. That is the normal
/// end-of-page condition (a page with fewer than `expected_slots` live
/// slots), not a failure, so the identifiers accumulated up to that point
/// are returned as-is. Slot access is bounded by the actual slot count;
/// a short body never faults.
pub fn parse_listing_page(body: &str, expected_slots: usize) -> ListingPage {
    if body == listing::END_OF_FEED {
        return ListingPage::End;
    }

    let slots: Vec<&str> = body.split('|').collect();
    let mut ids = Vec::with_capacity(expected_slots.min(slots.len()));

    for slot in slots.into_iter().take(expected_slots) {
        match slot_id(slot) {
            Some(id) => ids.push(id),
            None => {
                debug!(slot, parsed = ids.len(), "slot did not yield an identifier, page ends here");
                break;
            }
        }
    }

    ListingPage::Items(ids)
}

/// Identifier sub-field of one slot, if it parses as a non-negative integer
fn slot_id(slot: &str) -> Option<i64> {
    let field = slot.split(':').nth(1)?;
    field.parse::<i64>().ok().filter(|id| *id >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64) -> String {
        format!("1:{id}:2:Example:5:3:6:creator")
    }

    fn page_of(ids: &[i64]) -> String {
        ids.iter().map(|id| slot(*id)).collect::<Vec<_>>().join("|")
    }

    #[test]
    fn test_full_page_yields_all_identifiers() {
        let ids: Vec<i64> = (100..110).collect();
        let body = page_of(&ids);
        assert_eq!(parse_listing_page(&body, 10), ListingPage::Items(ids));
    }

    #[test]
    fn test_sentinel_body_is_end_of_feed() {
        assert_eq!(parse_listing_page("-1", 10), ListingPage::End);
    }

    #[test]
    fn test_malformed_slot_truncates_page() {
        let body = format!("{}|{}|1:not-a-number:2:x|{}", slot(5), slot(7), slot(9));
        assert_eq!(parse_listing_page(&body, 10), ListingPage::Items(vec![5, 7]));
    }

    #[test]
    fn test_short_body_never_faults() {
        // Three well-formed slots, no malformed tail: the slot-count bound
        // ends the page, not an out-of-range access
        let body = page_of(&[1, 2, 3]);
        assert_eq!(parse_listing_page(&body, 10), ListingPage::Items(vec![1, 2, 3]));
    }

    #[test]
    fn test_expected_slot_count_caps_a_long_body() {
        let ids: Vec<i64> = (0..15).collect();
        let body = page_of(&ids);
        assert_eq!(
            parse_listing_page(&body, 10),
            ListingPage::Items((0..10).collect())
        );
    }

    #[test]
    fn test_missing_identifier_sub_field_truncates() {
        let body = format!("{}|justonefield", slot(42));
        assert_eq!(parse_listing_page(&body, 10), ListingPage::Items(vec![42]));
    }

    #[test]
    fn test_negative_identifier_truncates() {
        let body = format!("{}|1:-7:2:x", slot(42));
        assert_eq!(parse_listing_page(&body, 10), ListingPage::Items(vec![42]));
    }

    #[test]
    fn test_empty_body_yields_no_identifiers() {
        assert_eq!(parse_listing_page("", 10), ListingPage::Items(vec![]));
    }
}
