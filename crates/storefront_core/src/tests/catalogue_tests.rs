use super::*;

use catalog_store::bundled_products;

fn sample() -> Arc<[Product]> {
    bundled_products().expect("bundled").into()
}

fn loaded(page_size: usize) -> CatalogueSession {
    let mut session = CatalogueSession::new(page_size);
    session.attach(sample());
    session
}

fn slugs(view: &CatalogueView) -> Vec<&str> {
    view.visible.iter().map(|p| p.slug.as_str()).collect()
}

#[test]
fn not_loaded_is_distinct_from_empty() {
    let session = CatalogueSession::default();
    let view = session.view();
    assert_eq!(view.status, ListingStatus::NotLoaded);
    assert!(!view.is_empty());
    assert!(view.visible.is_empty());
    assert!(!view.has_more);

    let mut session = loaded(8);
    let view = session.set_search("no such thing");
    assert_eq!(view.status, ListingStatus::Empty);
    assert!(view.is_empty());
    assert_eq!(view.total_count, 0);
    assert!(!view.has_more);
}

#[test]
fn initial_view_is_first_page_in_featured_order() {
    let mut session = CatalogueSession::default();
    let view = session.attach(sample());
    assert_eq!(view.status, ListingStatus::Results);
    assert_eq!(view.total_count, 13);
    assert_eq!(view.visible.len(), 8);
    assert!(view.has_more);
    assert_eq!(view.page, 1);
    assert_eq!(view.sort_key, SortKey::Featured);
    assert!(view.visible[..7].iter().all(|p| p.featured));
    assert!(!view.visible[7].featured);
}

#[test]
fn load_more_accumulates_window() {
    let mut session = loaded(8);
    let first = session.view();
    let second = session.next_page();
    assert_eq!(second.page, 2);
    assert_eq!(second.visible.len(), 13);
    assert!(!second.has_more);
    assert_eq!(second.visible[..8], first.visible[..]);

    let third = session.next_page();
    assert_eq!(third.page, 3);
    assert_eq!(third.visible.len(), 13);
    assert!(!third.has_more);
    assert_eq!(third.visible, second.visible);
}

#[test]
fn next_page_past_the_end_still_advances() {
    let mut session = loaded(4);
    session.set_category(Some("Travel Bags".into()));
    let view = session.next_page();
    assert_eq!(view.page, 2);
    assert!(!view.has_more);

    let view = session.next_page();
    assert_eq!(view.page, 3);
    assert_eq!(session.page(), 3);
    assert_eq!(view.visible.len(), 3);
    assert_eq!(view.total_count, 3);
    assert!(!view.has_more);
}

#[test]
fn window_never_shrinks_while_paging() {
    let mut session = loaded(3);
    let mut previous = session.view().visible.len();
    for _ in 0..6 {
        let view = session.next_page();
        assert!(view.visible.len() >= previous);
        assert!(view.visible.len() <= view.total_count);
        previous = view.visible.len();
    }
    assert_eq!(previous, 13);
}

#[test]
fn filter_changes_reset_page() {
    let mut session = loaded(4);
    session.next_page();
    assert_eq!(session.page(), 2);

    let view = session.set_category(Some("Travel Bags".into()));
    assert_eq!(view.page, 1);
    assert_eq!(view.total_count, 3);

    session.next_page();
    let view = session.set_search("pouch");
    assert_eq!(view.page, 1);
    assert_eq!(
        slugs(&view),
        vec!["premium-shaving-kit", "compact-toiletry-case"]
    );

    session.set_search("");
    let view = session.next_page();
    assert_eq!(view.page, 2);
    assert_eq!(view.visible.len(), 3, "window is clamped to the three matches");

    let view = session.set_sort(SortKey::Newest);
    assert_eq!(view.page, 1);
    assert_eq!(view.search_term, "");
    assert_eq!(view.active_category.as_deref(), Some("Travel Bags"));
}

#[test]
fn next_page_leaves_other_fields_alone() {
    let mut session = loaded(2);
    session.set_category(Some("Travel Bags".into()));
    session.set_search("travel");
    session.set_sort(SortKey::NameAsc);
    let view = session.next_page();
    assert_eq!(view.page, 2);
    assert_eq!(view.active_category.as_deref(), Some("Travel Bags"));
    assert_eq!(view.search_term, "travel");
    assert_eq!(view.sort_key, SortKey::NameAsc);
}

#[test]
fn wallets_sorted_by_name() {
    let mut session = loaded(8);
    session.set_category(Some("Wallets".into()));
    let view = session.set_sort(SortKey::NameAsc);
    let names: Vec<_> = view.visible.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Men's Leather Wallet - Black", "Men's Leather Wallet - Brown"]
    );
    assert_eq!(view.count_label(), "2 products");
}

#[test]
fn search_applies_within_category() {
    let mut session = loaded(8);
    session.set_category(Some("Wallets".into()));
    let view = session.set_search("BLACK");
    assert_eq!(slugs(&view), vec!["mens-leather-wallet-black"]);
    assert_eq!(view.count_label(), "1 product");

    let view = session.set_category(None);
    assert_eq!(slugs(&view), vec!["mens-leather-wallet-black"]);
}

#[test]
fn chips_mark_the_active_category() {
    let mut session = loaded(8);
    let view = session.view();
    assert_eq!(view.chips.len(), 10);
    assert_eq!(view.chips[0].label, "All");
    assert!(view.chips[0].active);
    assert!(view.chips[1..].iter().all(|chip| !chip.active));

    let view = session.set_category(Some("Belts".into()));
    let active: Vec<_> = view.chips.iter().filter(|c| c.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].category.as_deref(), Some("Belts"));
    assert_eq!(session.categories().len(), 9);
}

#[test]
fn seeded_category_survives_attach() {
    let mut session = CatalogueSession::from_query("?cat=Clutches", 8);
    assert_eq!(session.active_category(), Some("Clutches"));
    assert_eq!(session.view().status, ListingStatus::NotLoaded);

    let view = session.attach(sample());
    assert_eq!(
        slugs(&view),
        vec!["wallet-clutch-for-ladies", "evening-clutch"]
    );
}

#[test]
fn unknown_seeded_category_renders_empty_state() {
    let url = Url::parse("https://shop.test/catalogue.html?cat=Shoes").expect("url");
    let mut session = CatalogueSession::from_url(&url, 8);
    let view = session.attach(sample());
    assert_eq!(view.status, ListingStatus::Empty);
    assert!(view.chips.iter().all(|c| !c.active));
}

#[test]
fn missing_query_means_all_categories() {
    let url = Url::parse("https://shop.test/catalogue.html").expect("url");
    let session = CatalogueSession::from_url(&url, 8);
    assert_eq!(session.active_category(), None);
}

#[test]
fn zero_page_size_is_clamped() {
    let session = loaded(0);
    assert_eq!(session.page_size(), 1);
    assert_eq!(session.visible().len(), 1);
}
