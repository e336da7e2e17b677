//! Integration tests for the restore pipeline against an in-memory directory

mod common;

use async_trait::async_trait;
use cognito_backup::config::secret_string;
use cognito_backup::core::restore::{
    IntervalThrottle, NoThrottle, RestoreCoordinator, RestoreJob, RestoreOptions, Restorer,
    Throttle, UserRestoreTarget,
};
use cognito_backup::domain::{Record, UserPoolId};
use common::{group, user, Call, MockDirectory};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use test_case::test_case;

const PASSWORD: &str = "Temp#Passw0rd";

fn pool() -> UserPoolId {
    UserPoolId::new("eu-west-1_new").unwrap()
}

fn with_groups(mut record: Record, groups: &[&str]) -> Record {
    record.insert("Groups", json!(groups));
    record
}

fn write_backup(dir: &Path, name: &str, records: &[Record]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(records).unwrap()).unwrap();
    path
}

/// Counts acquisitions without waiting
#[derive(Default)]
struct CountingThrottle {
    acquired: AtomicUsize,
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_every_user_created_with_the_shared_password() {
    let records: Vec<Record> = ["alice", "bob", "carol", "dave", "erin"]
        .into_iter()
        .map(user)
        .collect();

    let directory = Arc::new(MockDirectory::default());
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(dir.path(), "users.json", &records);

    let report = RestoreCoordinator::new(
        directory.clone(),
        RestoreOptions::default(),
        Arc::new(NoThrottle),
    )
    .restore_users(&pool(), &path, secret_string(PASSWORD.to_string()))
    .await
    .unwrap();

    assert_eq!(report.total(), 5);
    assert!(report.is_success());

    let creates: Vec<_> = directory
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::CreateUser { password, .. } => Some(password),
            _ => None,
        })
        .collect();
    assert_eq!(creates.len(), 5);
    assert!(creates.iter().all(|p| p == PASSWORD));
}

#[tokio::test]
async fn test_server_identifier_never_reaches_create() {
    // The mock rejects any create still carrying `sub`
    let directory = Arc::new(MockDirectory::default());
    let target =
        UserRestoreTarget::new(directory.clone(), pool(), secret_string(PASSWORD.to_string()));

    let email: String = SafeEmail().fake();
    let mut record = user("frank");
    record.insert(
        "Attributes",
        json!([{"Name": "sub", "Value": "abc"}, {"Name": "email", "Value": email}]),
    );

    let report = Restorer::new(RestoreOptions::default(), Arc::new(NoThrottle))
        .restore(RestoreJob::new(vec![record]), &target)
        .await;

    assert!(report.is_success(), "{:?}", report.outcomes);
}

#[tokio::test]
async fn test_group_adds_follow_create() {
    let directory = Arc::new(MockDirectory::default());
    let target =
        UserRestoreTarget::new(directory.clone(), pool(), secret_string(PASSWORD.to_string()));

    let report = Restorer::new(RestoreOptions::default(), Arc::new(NoThrottle))
        .restore(
            RestoreJob::new(vec![with_groups(user("alice"), &["G1", "G2"])]),
            &target,
        )
        .await;

    assert!(report.is_success());
    assert_eq!(
        directory.calls(),
        vec![
            Call::CreateUser {
                username: "alice".to_string(),
                password: PASSWORD.to_string()
            },
            Call::AddToGroup {
                username: "alice".to_string(),
                group: "G1".to_string()
            },
            Call::AddToGroup {
                username: "alice".to_string(),
                group: "G2".to_string()
            },
        ]
    );
}

#[test_case(1, 1 ; "sequential")]
#[test_case(4, 1 ; "concurrent creates")]
#[test_case(4, 3 ; "concurrent creates and group adds")]
#[tokio::test]
async fn test_failures_are_isolated_per_record(concurrency: usize, group_concurrency: usize) {
    let directory = Arc::new(MockDirectory {
        existing_users: vec!["bob".to_string()],
        missing_groups: vec!["gone".to_string()],
        ..Default::default()
    });
    let target =
        UserRestoreTarget::new(directory.clone(), pool(), secret_string(PASSWORD.to_string()));

    let job = RestoreJob::new(vec![
        with_groups(user("alice"), &["admins"]),
        with_groups(user("bob"), &["admins"]),
        with_groups(user("carol"), &["gone", "ops"]),
        user("dave"),
    ]);

    let report = Restorer::new(
        RestoreOptions::new(concurrency, group_concurrency),
        Arc::new(NoThrottle),
    )
    .restore(job, &target)
    .await;

    assert_eq!(report.total(), 4);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 2);

    let bob = report.outcomes.iter().find(|o| o.key == "bob").unwrap();
    assert!(!bob.created);
    assert!(bob.error.as_deref().unwrap().contains("already exists"));

    let carol = report.outcomes.iter().find(|o| o.key == "carol").unwrap();
    assert!(carol.created);
    assert_eq!(carol.group_errors.len(), 1);
    assert_eq!(carol.group_errors[0].group, "gone");

    let calls = directory.calls();
    assert!(!calls.contains(&Call::AddToGroup {
        username: "bob".to_string(),
        group: "admins".to_string()
    }));
    assert!(calls.contains(&Call::AddToGroup {
        username: "carol".to_string(),
        group: "ops".to_string()
    }));
}

#[tokio::test]
async fn test_every_call_takes_a_throttle_slot() {
    let directory = Arc::new(MockDirectory {
        existing_users: vec!["bob".to_string()],
        ..Default::default()
    });
    let target =
        UserRestoreTarget::new(directory.clone(), pool(), secret_string(PASSWORD.to_string()));
    let throttle = Arc::new(CountingThrottle::default());

    Restorer::new(RestoreOptions::new(3, 2), throttle.clone())
        .restore(
            RestoreJob::new(vec![
                with_groups(user("alice"), &["G1", "G2"]),
                with_groups(user("bob"), &["G1"]),
                user("carol"),
            ]),
            &target,
        )
        .await;

    // 3 creates + 2 group adds for alice; bob's create failed so no adds
    assert_eq!(throttle.acquired.load(Ordering::SeqCst), 5);
    assert_eq!(directory.calls().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_interval_throttle_bounds_the_call_rate() {
    let directory = Arc::new(MockDirectory::default());
    let target =
        UserRestoreTarget::new(directory.clone(), pool(), secret_string(PASSWORD.to_string()));
    let records: Vec<Record> = (0..6).map(|i| user(&format!("user{i}"))).collect();

    let start = tokio::time::Instant::now();
    Restorer::new(
        RestoreOptions::new(6, 1),
        Arc::new(IntervalThrottle::new(Duration::from_millis(250))),
    )
    .restore(RestoreJob::new(records), &target)
    .await;

    // 6 calls, first immediate, then 5 intervals regardless of concurrency
    assert!(start.elapsed() >= Duration::from_millis(1250));
    assert_eq!(directory.calls().len(), 6);
}

#[tokio::test]
async fn test_restore_groups() {
    let directory = Arc::new(MockDirectory::default());
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(
        dir.path(),
        "groups.json",
        &[group("admins"), group("readers")],
    );

    let report = RestoreCoordinator::new(
        directory.clone(),
        RestoreOptions::default(),
        Arc::new(NoThrottle),
    )
    .restore_groups(&pool(), &path)
    .await
    .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(
        directory.calls(),
        vec![
            Call::CreateGroup("admins".to_string()),
            Call::CreateGroup("readers".to_string())
        ]
    );
}

#[tokio::test]
async fn test_unreadable_input_is_fatal() {
    let directory = Arc::new(MockDirectory::default());
    let coordinator = RestoreCoordinator::new(
        directory.clone(),
        RestoreOptions::default(),
        Arc::new(NoThrottle),
    );

    let missing = coordinator
        .restore_groups(&pool(), Path::new("/nonexistent/groups.json"))
        .await;
    assert!(missing.is_err());

    let mut malformed = tempfile::NamedTempFile::new().unwrap();
    write!(malformed, "{{\"GroupName\": \"admins\"}}").unwrap();
    let err = coordinator
        .restore_groups(&pool(), malformed.path())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Serialization error"), "{err}");

    assert!(directory.calls().is_empty());
}
