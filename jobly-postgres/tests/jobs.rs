mod common;

use jobly_postgres::models::{Job, JobFilter, NewJob};
use jobly_postgres::update::UpdatePayload;
use jobly_postgres::Error;

use rust_decimal::Decimal;

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn find_all_min_salary() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;

	let filter = JobFilter {
		min_salary: Some(200),
		..Default::default()
	};
	let jobs = Job::find_all(trans.connection(), &filter).await.unwrap();

	let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
	assert_eq!(titles, ["Job 2", "Job 3"]);
	assert!(jobs.iter().all(|j| j.salary >= Some(200)));
	assert_eq!(jobs[0].company_handle, "c1");
	assert_eq!(jobs[1].company_handle, "c2");

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn find_all_filters() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	let all = Job::find_all(c, &JobFilter::default()).await.unwrap();
	assert_eq!(all.len(), 3);

	let with_equity = Job::find_all(
		c,
		&JobFilter {
			has_equity: Some(true),
			..Default::default()
		},
	)
	.await
	.unwrap();
	let titles: Vec<_> = with_equity.iter().map(|j| j.title.as_str()).collect();
	assert_eq!(titles, ["Job 1", "Job 2"]);

	let without = Job::find_all(
		c,
		&JobFilter {
			has_equity: Some(false),
			..Default::default()
		},
	)
	.await
	.unwrap();
	assert_eq!(without.len(), 3);

	let combined = Job::find_all(
		c,
		&JobFilter {
			min_salary: Some(150),
			title: Some("job 3".into()),
			has_equity: None,
		},
	)
	.await
	.unwrap();
	assert_eq!(combined.len(), 1);
	assert_eq!(combined[0].title, "Job 3");

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn create_and_get() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	let new = NewJob {
		title: "Job 1".into(),
		salary: Some(50),
		equity: Some(Decimal::new(5, 2)),
		company_handle: "c3".into(),
	};
	let job = Job::create(c, &new).await.unwrap();
	assert_eq!(job.title, "Job 1");
	assert_eq!(job.equity, Some(Decimal::new(5, 2)));

	let got = Job::get(c, job.id).await.unwrap();
	assert_eq!(got, job);

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn update_then_get() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	let mut payload = UpdatePayload::new();
	payload.set("title", "New").set("salary", None::<i32>);

	let updated = Job::update(c, 1, &payload).await.unwrap();
	assert_eq!(updated.title, "New");
	assert_eq!(updated.salary, None);

	let job = Job::get(c, 1).await.unwrap();
	assert_eq!(job.title, "New");
	assert_eq!(job.salary, None);
	assert_eq!(job.equity, Some(Decimal::new(1, 1)));
	assert_eq!(job.company_handle, "c1");

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn update_errors() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	let err = Job::update(c, 1, &UpdatePayload::new()).await.unwrap_err();
	assert!(matches!(err, Error::EmptyPayload));

	let payload = UpdatePayload::from_iter([("title", "New")]);
	let err = Job::update(c, 0, &payload).await.unwrap_err();
	assert!(err.is_not_found());

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn remove() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	Job::remove(c, 1).await.unwrap();
	assert!(Job::get(c, 1).await.unwrap_err().is_not_found());
	assert!(Job::remove(c, 1).await.unwrap_err().is_not_found());

	trans.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn missing_id_is_not_found() {
	let Some(db) = common::database().await else {
		return;
	};
	let mut conn = db.get().await.unwrap();
	let trans = conn.transaction().await.unwrap();
	common::fixture(trans.connection()).await;
	let c = trans.connection();

	let err = Job::get(c, 999).await.unwrap_err();
	assert!(err.is_not_found(), "{err:?}");

	let payload = UpdatePayload::from_iter([("title", "New")]);
	let err = Job::update(c, 999, &payload).await.unwrap_err();
	assert!(err.is_not_found(), "{err:?}");

	let err = Job::remove(c, 999).await.unwrap_err();
	assert!(err.is_not_found(), "{err:?}");

	trans.rollback().await.unwrap();
}
