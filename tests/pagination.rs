use axum::{extract::Query, http::Uri};
use pizzeria_api::{
    response::Meta,
    routes::params::{FavoritePizzaQuery, Pagination, contains_pattern},
};

#[test]
fn pagination_defaults_and_clamps() {
    assert_eq!(Pagination::default().normalize(), (1, 20, 0));

    let page = Pagination {
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(page.normalize(), (3, 10, 20));

    let silly = Pagination {
        page: Some(-4),
        per_page: Some(5000),
    };
    assert_eq!(silly.normalize(), (1, 100, 0));
}

#[test]
fn huge_page_saturates_the_offset() {
    let page = Pagination {
        page: Some(i64::MAX),
        per_page: Some(20),
    };
    let (page, per_page, offset) = page.normalize();
    assert_eq!((page, per_page), (i64::MAX, 20));
    assert_eq!(offset, i64::MAX);
}

#[test]
fn name_search_matches_wildcards_literally() {
    assert_eq!(contains_pattern(" pep "), "%pep%");
    assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
    assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
}

#[test]
fn query_string_with_numeric_filters_parses() {
    let uri: Uri = "/api/favorite-pizzas?page=2&per_page=5&sauce_id=3&name=pep&sort_order=asc"
        .parse()
        .expect("uri");
    let Query(query) = Query::<FavoritePizzaQuery>::try_from_uri(&uri).expect("query string");
    assert_eq!(query.pagination().normalize(), (2, 5, 5));
    assert_eq!(query.sauce_id, Some(3));
    assert_eq!(query.name.as_deref(), Some("pep"));
}

#[test]
fn meta_counts_pages() {
    assert_eq!(Meta::new(1, 20, 41).total_pages, Some(3));
    assert_eq!(Meta::new(1, 20, 0).total_pages, Some(0));
    assert_eq!(Meta::empty().total, None);
}
