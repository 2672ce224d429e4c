//! Integration tests for the customer, address, and zone Diesel adapters
//! against embedded PostgreSQL.

use rounds::domain::ports::{
    AddressRepository, CustomerOrder, CustomerRepository, CustomerRepositoryError, JobRepository,
    ZoneRepository,
};
use rounds::domain::{AddressDraft, CustomerDraft, CustomerFields, NewJob, ZoneDraft};
use rounds::outbound::persistence::{
    DieselAddressRepository, DieselCustomerRepository, DieselJobRepository, DieselZoneRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{TestDatabase, handle_cluster_setup_failure, provision_test_database};

#[fixture]
fn database() -> Option<TestDatabase> {
    match provision_test_database() {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn draft(forename: &str, surname: Option<&str>) -> CustomerDraft {
    CustomerDraft::try_new(CustomerFields {
        forename: Some(forename.to_owned()),
        surname: surname.map(str::to_owned),
        email: Some("jane@x.com".to_owned()),
        telephone: None,
    })
    .expect("valid customer")
}

fn job_for(customer_id: Option<i32>, zone_id: Option<i32>) -> NewJob {
    NewJob {
        price: None,
        date_last_done: None,
        frequency: Some(7),
        org_id: None,
        address_id: None,
        zone_id,
        customer_id,
        info: None,
        date_next_due: None,
        payment_type_id: None,
    }
}

#[rstest]
fn customer_ids_increase_and_absent_surname_stays_null(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: customer_ids_increase_and_absent_surname_stays_null skipped");
        return;
    };
    let repo = DieselCustomerRepository::new(db.pool.clone());

    let (first, second) = db.runtime.block_on(async {
        let first = repo.create(None, &draft("Jane", None)).await.expect("first");
        let second = repo
            .create(Some(2), &draft("John", Some("Smith")))
            .await
            .expect("second");
        (first, second)
    });

    assert!(second.id > first.id);
    assert!(first.surname.is_none());
    assert!(first.created_at.is_some(), "storage stamps creation time");
    assert_eq!(second.org_id, Some(2));

    let mut client = db.client().expect("client");
    let row = client
        .query_one(
            "SELECT surname FROM customer WHERE idcustomer = $1",
            &[&first.id],
        )
        .expect("query stored row");
    let surname: Option<String> = row.get(0);
    assert!(surname.is_none());

    let listed = db
        .runtime
        .block_on(repo.list(CustomerOrder::IdAscending))
        .expect("list");
    let ids: Vec<i32> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(db.runtime.block_on(repo.count()).expect("count"), 2);
}

#[rstest]
fn deleting_a_customer_with_jobs_is_a_constraint_error(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_customer_with_jobs_is_a_constraint_error skipped");
        return;
    };
    let customers = DieselCustomerRepository::new(db.pool.clone());
    let jobs = DieselJobRepository::new(db.pool.clone());

    let error = db.runtime.block_on(async {
        let customer = customers
            .create(None, &draft("Jane", None))
            .await
            .expect("customer");
        jobs.create(&job_for(Some(customer.id), None))
            .await
            .expect("job");
        customers
            .delete(customer.id)
            .await
            .expect_err("jobs still reference the customer")
    });

    assert!(matches!(error, CustomerRepositoryError::Constraint { .. }));
}

#[rstest]
fn deleting_a_missing_customer_reports_nothing_removed(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_missing_customer_reports_nothing_removed skipped");
        return;
    };
    let repo = DieselCustomerRepository::new(db.pool.clone());

    let removed = db.runtime.block_on(repo.delete(9_999)).expect("delete");
    assert!(!removed);
}

#[rstest]
fn address_lookup_reuses_matching_rows(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: address_lookup_reuses_matching_rows skipped");
        return;
    };
    let repo = DieselAddressRepository::new(db.pool.clone());
    let with_postcode =
        AddressDraft::from_parts(Some("12"), Some("High Street"), Some("AB1 2CD"))
            .expect("within limits")
            .expect("draft");
    let without_postcode =
        AddressDraft::from_parts(Some("12"), Some("High Street"), None)
            .expect("within limits")
            .expect("draft");

    let (first, again, other) = db.runtime.block_on(async {
        let first = repo.find_or_create(&with_postcode).await.expect("create");
        let again = repo.find_or_create(&with_postcode).await.expect("reuse");
        let other = repo
            .find_or_create(&without_postcode)
            .await
            .expect("distinct postcode");
        (first, again, other)
    });

    assert_eq!(first.id, again.id);
    assert_ne!(first.id, other.id);
    let reused_null = db
        .runtime
        .block_on(repo.find_or_create(&without_postcode))
        .expect("null postcode matches null");
    assert_eq!(reused_null.id, other.id);
}

#[rstest]
fn deleting_a_zone_keeps_the_job_zone_id(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_zone_keeps_the_job_zone_id skipped");
        return;
    };
    let zones = DieselZoneRepository::new(db.pool.clone());
    let jobs = DieselJobRepository::new(db.pool.clone());

    let (zone_id, job_id) = db.runtime.block_on(async {
        let zone = zones
            .create(None, &ZoneDraft::try_new("North").expect("draft"))
            .await
            .expect("zone");
        let job = jobs.create(&job_for(None, Some(zone.id))).await.expect("job");
        assert!(zones.delete(zone.id).await.expect("delete zone"));
        (zone.id, job.id)
    });

    let job = db
        .runtime
        .block_on(jobs.find_by_id(job_id))
        .expect("find")
        .expect("job survives");
    assert_eq!(job.zone_id, Some(zone_id));
    assert!(db.runtime.block_on(zones.list()).expect("list").is_empty());
}
