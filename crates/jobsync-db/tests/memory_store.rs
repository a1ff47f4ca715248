//! Behavior of the in-memory store the engine and CLI run against.

use chrono::{Duration, TimeZone, Utc};
use jobsync_core::{
    BenefitCategory, BenefitTitle, Company, CompanyDirectory, ExternalIdentity, TaxonomyFile,
    TaxonomyProvider, Technology,
};
use jobsync_db::{
    JobStore, MemoryStore, NewBenefit, NewCompanyLocation, NewJobListing, StoreError,
    DEFAULT_COUNTRY,
};

fn taxonomy() -> TaxonomyFile {
    TaxonomyFile {
        companies: vec![Company {
            id: 1,
            name: "Acme, Inc.".to_string(),
        }],
        technologies: vec![Technology {
            id: 10,
            name: "python".to_string(),
        }],
        benefit_titles: vec![
            BenefitTitle {
                id: 100,
                title: "401k".to_string(),
                category: BenefitCategory("retirement".to_string()),
                searchable: true,
            },
            BenefitTitle {
                id: 101,
                title: "ping pong".to_string(),
                category: BenefitCategory("perks".to_string()),
                searchable: false,
            },
        ],
    }
}

fn new_listing(source: &str, link: &str, link_unique: bool) -> NewJobListing {
    let published = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    NewJobListing {
        title: "Backend Engineer".to_string(),
        description: "python services".to_string(),
        external_link_id: link.to_string(),
        link_unique,
        source: source.to_string(),
        aggregator_source: None,
        raw_company_name: "Acme".to_string(),
        raw_location: "Austin, TX".to_string(),
        tags: vec![],
        company_id: None,
        company_location_id: None,
        date_published: published,
        date_modified: published,
        date_expired: None,
        enabled: false,
        raw_payload: serde_json::Value::Null,
    }
}

fn new_location(company_id: i64) -> NewCompanyLocation {
    NewCompanyLocation {
        company_id,
        raw_location: "Austin, TX".to_string(),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        country: DEFAULT_COUNTRY.to_string(),
        postal_code: None,
        enabled: false,
    }
}

#[test]
fn providers_filter_searchable_benefits() {
    let store = MemoryStore::from_taxonomy(taxonomy());
    assert_eq!(store.list_companies().unwrap().len(), 1);
    assert_eq!(store.list_technologies().unwrap()[0].name, "python");
    let titles = store.list_searchable_benefit_titles().unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title, "401k");
}

#[test]
fn ids_are_sequential_per_table() {
    let mut store = MemoryStore::new();
    let a = store.insert_listing(new_listing("dice", "a", true)).unwrap();
    let b = store.insert_listing(new_listing("dice", "b", true)).unwrap();
    let loc = store.insert_location(new_location(1)).unwrap();
    assert_eq!((a.id, b.id, loc.id), (1, 2, 1));
}

#[test]
fn unique_links_conflict_within_a_source_only() {
    let mut store = MemoryStore::new();
    store.insert_listing(new_listing("dice", "x", true)).unwrap();

    let err = store
        .insert_listing(new_listing("dice", "x", true))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    store
        .insert_listing(new_listing("stackoverflow", "x", true))
        .expect("same link on another source is allowed");
    store
        .insert_listing(new_listing("dice", "x", false))
        .expect("non-unique sources may repeat links");
}

#[test]
fn find_listing_by_link_identity() {
    let mut store = MemoryStore::new();
    let inserted = store.insert_listing(new_listing("dice", "x", true)).unwrap();
    let found = store
        .find_listing(&ExternalIdentity::Link {
            source: "dice".to_string(),
            link: "x".to_string(),
        })
        .unwrap()
        .expect("listing found");
    assert_eq!(found.id, inserted.id);
}

#[test]
fn writes_are_visible_to_next_read() {
    let mut store = MemoryStore::new();
    store.insert_location(new_location(1)).unwrap();
    store.insert_location(new_location(2)).unwrap();
    store.insert_location(new_location(1)).unwrap();

    let ids: Vec<i64> = store
        .list_locations_for_company(1)
        .unwrap()
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn update_missing_listing_is_not_found() {
    let mut store = MemoryStore::new();
    let mut listing = store.insert_listing(new_listing("dice", "x", true)).unwrap();
    listing.id = 99;
    assert!(matches!(
        store.update_listing(&listing),
        Err(StoreError::NotFound { entity: "listing", id: 99 })
    ));
}

#[test]
fn attach_technology_reports_new_association_once() {
    let mut store = MemoryStore::new();
    let loc = store.insert_location(new_location(1)).unwrap();
    assert!(store.attach_technology(loc.id, 10).unwrap());
    assert!(!store.attach_technology(loc.id, 10).unwrap());
    let loc = store.get_location(loc.id).unwrap().unwrap();
    assert_eq!(loc.technology_ids.len(), 1);
}

#[test]
fn one_benefit_row_per_title() {
    let mut store = MemoryStore::new();
    let a = store.insert_location(new_location(1)).unwrap();
    let b = store.insert_location(new_location(1)).unwrap();
    let new = |location_id| NewBenefit {
        title_id: 100,
        company_location_id: location_id,
        category: BenefitCategory("retirement".to_string()),
    };
    let mut benefit = store.insert_benefit(new(a.id)).unwrap();
    assert!(matches!(
        store.insert_benefit(new(b.id)),
        Err(StoreError::Conflict(_))
    ));

    benefit.company_location_id = b.id;
    store.update_benefit(&benefit).unwrap();
    let stored = store.find_benefit_by_title(100).unwrap().unwrap();
    assert_eq!(stored.company_location_id, b.id);
    assert_eq!(store.benefits().count(), 1);
}

#[test]
fn disable_stale_listings_respects_cutoff_source_and_aggregator() {
    let mut store = MemoryStore::new();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let cutoff = now - Duration::hours(24);

    let mut stale = store.insert_listing(new_listing("dice", "a", true)).unwrap();
    stale.enabled = true;
    stale.date_modified = now - Duration::hours(25);
    store.update_listing(&stale).unwrap();

    let mut fresh = store.insert_listing(new_listing("dice", "b", true)).unwrap();
    fresh.enabled = true;
    fresh.date_modified = now - Duration::hours(1);
    store.update_listing(&fresh).unwrap();

    let mut aggregated = store
        .insert_listing(new_listing("careerbuilder", "c", false))
        .unwrap();
    aggregated.enabled = true;
    aggregated.aggregator_source = Some("ziprecruiter".to_string());
    aggregated.date_modified = now - Duration::days(3);
    store.update_listing(&aggregated).unwrap();

    assert_eq!(store.disable_stale_listings("dice", cutoff).unwrap(), 1);
    assert!(!store.get_listing(stale.id).unwrap().unwrap().enabled);
    assert!(store.get_listing(fresh.id).unwrap().unwrap().enabled);
    assert!(store.get_listing(aggregated.id).unwrap().unwrap().enabled);

    assert_eq!(
        store.disable_stale_listings("ziprecruiter", cutoff).unwrap(),
        1
    );
    assert!(!store.get_listing(aggregated.id).unwrap().unwrap().enabled);
}

#[test]
fn snapshot_round_trip_preserves_state_and_sequences() {
    let dir = std::env::temp_dir().join(format!("jobsync-db-test-{}", std::process::id()));
    let path = dir.join("nested").join("state.json");

    let mut store = MemoryStore::from_taxonomy(taxonomy());
    store.insert_listing(new_listing("dice", "a", true)).unwrap();
    let loc = store.insert_location(new_location(1)).unwrap();
    store.attach_technology(loc.id, 10).unwrap();
    store.save_snapshot(&path).expect("snapshot written");

    let mut restored = MemoryStore::load_snapshot(&path).expect("snapshot read");
    assert_eq!(restored.listings().count(), 1);
    assert_eq!(
        restored.get_location(loc.id).unwrap().unwrap().technology_ids.len(),
        1
    );
    let next = restored
        .insert_listing(new_listing("dice", "b", true))
        .unwrap();
    assert_eq!(next.id, 2, "sequence continues after restore");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_snapshot_loads_empty_store() {
    let path = std::env::temp_dir().join("jobsync-db-test-does-not-exist.json");
    let store = MemoryStore::load_snapshot(&path).unwrap();
    assert_eq!(store.listings().count(), 0);
}
