//! Integration test: run the sweeper registry against a file-backed inventory.

mod common;

use std::sync::Arc;

use sweep_core::inventory::InventoryClient;
use sweep_core::sweeper::autoscaling::AUTOSCALING_GROUP_SWEEPER;
use sweep_core::sweeper::{check_destroyed, run_sweepers, AutoscalingGroupSweeper, SweeperRegistry};

const INVENTORY: &str = r#"
unsupported_regions = ["us-gov-west-1"]

[[group]]
name = "tf-test-busy"
region = "us-west-2"
busy_deletes = 3

[[group]]
name = "tf-test-idle"
region = "us-west-2"

[[group]]
name = "tf-test-eu"
region = "eu-west-1"
"#;

#[test]
fn sweep_deletes_every_group_in_region() {
    let (_file, inv) = common::inventory_file(INVENTORY);
    let state = inv.into_shared();

    let mut registry = SweeperRegistry::new();
    registry
        .register(Box::new(AutoscalingGroupSweeper::new(
            common::connector(&state),
            common::fast_policy(5_000),
        )))
        .unwrap();

    let reports = run_sweepers(&registry, "us-west-2", &[]).unwrap();
    assert_eq!(reports.len(), 1);
    let (name, report) = &reports[0];
    assert_eq!(name, AUTOSCALING_GROUP_SWEEPER);
    assert_eq!(report.deleted, ["tf-test-busy", "tf-test-idle"]);

    let client = InventoryClient::new(Arc::clone(&state), "us-west-2");
    check_destroyed(&client, &report.deleted).unwrap();

    // Other regions are untouched.
    assert_eq!(state.lock().unwrap().group_names("eu-west-1"), ["tf-test-eu"]);
}

#[test]
fn unsupported_region_is_skipped_not_failed() {
    let (_file, inv) = common::inventory_file(INVENTORY);
    let state = inv.into_shared();
    let mut registry = SweeperRegistry::new();
    registry
        .register(Box::new(AutoscalingGroupSweeper::new(
            common::connector(&state),
            common::fast_policy(1_000),
        )))
        .unwrap();

    let reports = run_sweepers(&registry, "us-gov-west-1", &[]).unwrap();
    assert!(reports[0].1.skipped);
}

#[test]
fn group_busy_past_deadline_fails_the_run() {
    let (_file, inv) = common::inventory_file(
        r#"
        [[group]]
        name = "stuck"
        busy_deletes = 1000
        "#,
    );
    let state = inv.into_shared();
    let mut registry = SweeperRegistry::new();
    registry
        .register(Box::new(AutoscalingGroupSweeper::new(
            common::connector(&state),
            common::fast_policy(60),
        )))
        .unwrap();

    let err = run_sweepers(&registry, "us-east-1", &[]).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("deleting autoscaling group stuck"), "{}", msg);
    assert!(msg.contains("timeout after"), "{}", msg);
    assert!(msg.contains("ScalingActivityInProgress"), "{}", msg);
    assert_eq!(state.lock().unwrap().group_names("us-east-1"), ["stuck"]);
}
