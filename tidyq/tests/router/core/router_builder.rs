use std::sync::Arc;

use tidyq::{DEFAULT_KEY_RATIO_VENUES, Tidyq, TidyqError, compound_get_options, get_options};
use tidyq_mock::MockConnector;

fn invalid_arg(r: Result<Tidyq, TidyqError>) -> bool {
    matches!(r.err(), Some(TidyqError::InvalidArg(_)))
}

#[test]
fn build_requires_a_connector() {
    assert!(invalid_arg(Tidyq::builder().build()));
}

#[test]
fn build_rejects_zero_limits_and_empty_venues() {
    let base = || Tidyq::builder().with_connector(Arc::new(MockConnector::new()));
    assert!(invalid_arg(base().batch_concurrency(0).build()));
    assert!(invalid_arg(base().key_ratio_attempts(0).build()));
    assert!(invalid_arg(base().datatable_max_pages(0).build()));
    assert!(invalid_arg(base().key_ratio_venues(Vec::<String>::new()).build()));
}

#[test]
fn defaults_follow_the_documented_configuration() {
    let tq = Tidyq::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let cfg = tq.config();
    assert!(cfg.drop_failures);
    assert!(cfg.flatten_single_category);
    assert_eq!(cfg.batch_concurrency, 1);
    assert_eq!(cfg.key_ratio_venues, DEFAULT_KEY_RATIO_VENUES);
}

#[test]
fn discovery_lists_every_category_and_the_compound_subset() {
    let all = get_options();
    assert_eq!(all.len(), 11);
    assert_eq!(all[0], "stock.prices");
    assert!(all.contains(&"quandl.datatable"));

    let compound = compound_get_options();
    assert_eq!(compound.len(), 6);
    assert!(compound.iter().all(|c| all.contains(c)));
    assert!(!compound.contains(&"key.ratios"));
}
