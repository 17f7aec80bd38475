//! End-to-end scenarios from spec.md §8, exercised against the wired-up
//! `build`/`import` pipeline.

use std::fs;

use wetwire_core::{build, import, BuildConfig, BuildError, BuildOutcome, ImportConfig};
use wetwire_ir::{DiscoveredResource, GoLiteral, TypedValue};
use wetwire_validator::{validate, DependencyMode, ValidatorError};

fn write_source(dir: &std::path::Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

const STORAGE_IMPORT: &str = "\"wetwire-azure-go/resources/storage\"";
const COMPUTE_IMPORT: &str = "\"wetwire-azure-go/resources/compute\"";

#[test]
fn single_storage_account_builds_one_resource_no_depends_on() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "main.go",
        &format!(
            r#"package infra

import (
    {STORAGE_IMPORT}
)

var A = storage.StorageAccount{{
    Name: "mystorage",
    Location: "eastus",
}}
"#
        ),
    );

    let outcome = build(&BuildConfig::new(dir.path())).unwrap();
    match outcome {
        BuildOutcome::Built { resource_count, json } => {
            assert_eq!(resource_count, 1);
            assert!(json.contains("\"type\": \"Microsoft.Storage/storageAccounts\""));
            assert!(json.contains("\"apiVersion\": \"2021-04-01\""));
            assert!(!json.contains("\"dependsOn\""));
        }
        BuildOutcome::Empty => panic!("expected a built template"),
    }
}

#[test]
fn linear_dependency_orders_a_before_b_and_records_resource_id() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "main.go",
        &format!(
            r#"package infra

import (
    {STORAGE_IMPORT}
    {COMPUTE_IMPORT}
)

var A = storage.StorageAccount{{
    Name: "mystorageacct",
    Location: "eastus",
}}

var B = compute.VirtualMachine{{
    Name: "myvm",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{
        NetworkProfile: A,
    }},
}}
"#
        ),
    );

    let outcome = build(&BuildConfig::new(dir.path())).unwrap();
    let BuildOutcome::Built { resource_count, json } = outcome else {
        panic!("expected a built template");
    };
    assert_eq!(resource_count, 2);
    let a_idx = json.find("\"name\": \"A\"").unwrap();
    let b_idx = json.find("\"name\": \"B\"").unwrap();
    assert!(a_idx < b_idx);
    assert!(json.contains("[resourceId('Microsoft.Storage/storageAccounts', 'A')]"));
}

#[test]
fn diamond_dependency_keeps_b_before_c_between_a_and_d() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "main.go",
        &format!(
            r#"package infra

import (
    {STORAGE_IMPORT}
    {COMPUTE_IMPORT}
)

var A = storage.StorageAccount{{Name: "a", Location: "eastus"}}

var B = compute.VirtualMachine{{
    Name: "b",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{NetworkProfile: A}},
}}

var C = compute.VirtualMachine{{
    Name: "c",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{NetworkProfile: A}},
}}

var D = compute.VirtualMachine{{
    Name: "d",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{NetworkProfile: B}},
}}
"#
        ),
    );

    let outcome = build(&BuildConfig::new(dir.path())).unwrap();
    let BuildOutcome::Built { json, .. } = outcome else {
        panic!("expected a built template");
    };
    let pos = |name: &str| json.find(&format!("\"name\": \"{name}\"")).unwrap();
    assert!(pos("A") < pos("B"));
    assert!(pos("A") < pos("C"));
    assert!(pos("B") < pos("D"));
    assert!(pos("C") < pos("D"));
}

#[test]
fn cycle_aborts_the_build_with_no_emitted_template() {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "main.go",
        &format!(
            r#"package infra

import (
    {COMPUTE_IMPORT}
)

var A = compute.VirtualMachine{{
    Name: "a",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{NetworkProfile: B}},
}}

var B = compute.VirtualMachine{{
    Name: "b",
    Location: "eastus",
    Properties: compute.VirtualMachineProperties{{NetworkProfile: A}},
}}
"#
        ),
    );

    let err = build(&BuildConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, BuildError::TemplateBuild(_)));
    assert!(format!("{err}").contains("circular dependency"));
}

/// Strict missing-dependency checking (spec.md §8 scenario 5) has no
/// `build`-reachable path: Discovery always runs in lenient mode since
/// it over-approximates references (see `wetwire_validator::
/// DependencyMode`). This exercises the same validator directly, the
/// way a pre-filtered caller (an editor plugin feeding hand-built IR,
/// for instance) would.
#[test]
fn strict_validation_reports_missing_dependency_by_name() {
    let resource = DiscoveredResource::new(
        "A",
        "Microsoft.Storage/storageAccounts",
        std::path::PathBuf::from("main.go"),
        1,
        vec!["ghost".to_string()],
        TypedValue::new(GoLiteral::Composite {
            type_name: None,
            fields: vec![],
        }),
    );
    let err = validate(vec![resource], DependencyMode::Strict).unwrap_err();
    match err {
        ValidatorError::MissingDependency { resource, missing } => {
            assert_eq!(resource, "A");
            assert_eq!(missing, vec!["ghost".to_string()]);
        }
        other => panic!("expected MissingDependency, got {other:?}"),
    }
}

#[test]
fn import_round_trip_regenerates_and_rebuilds_the_same_resource() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("template.json");
    fs::write(
        &template_path,
        r#"{
            "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#",
            "contentVersion": "1.0.0.0",
            "parameters": {},
            "variables": {},
            "resources": [
                {
                    "name": "mystorage",
                    "type": "Microsoft.Storage/storageAccounts",
                    "apiVersion": "2021-04-01",
                    "location": "eastus",
                    "sku": {"name": "Standard_LRS"},
                    "kind": "StorageV2"
                }
            ],
            "outputs": {}
        }"#,
    )
    .unwrap();

    let mut import_config = ImportConfig::new(&template_path);
    import_config.package = "myinfra".to_string();
    let imported = import(&import_config).unwrap();
    assert_eq!(imported.resource_count, 1);
    assert!(imported.source.contains("package myinfra"));
    assert!(imported.source.contains("wetwire-azure-go/resources/storage"));
    assert!(imported.source.contains("var Mystorage = storage.StorageAccount{"));
    assert!(imported.source.contains("Name: \"mystorage\""));
    assert!(imported.source.contains("Kind: \"StorageV2\""));
    assert!(imported.source.contains("SKU: storage.SKU{Name: \"Standard_LRS\"}"));

    // Feed the generated source back through `build`. The ARM resource
    // `name` comes from the Go binding identifier, not the original
    // literal's `Name` field, so the recovered name is re-cased
    // (`Mystorage`, not `mystorage`) — a known property of this
    // toolchain's naming rule, not a round-trip defect.
    let regen_dir = tempfile::tempdir().unwrap();
    write_source(regen_dir.path(), "generated.go", &imported.source);
    let rebuilt = build(&BuildConfig::new(regen_dir.path())).unwrap();
    let BuildOutcome::Built { resource_count, json } = rebuilt else {
        panic!("expected a built template");
    };
    assert_eq!(resource_count, 1);
    assert!(json.contains("\"type\": \"Microsoft.Storage/storageAccounts\""));
    assert!(json.contains("\"sku\""));
    assert!(json.contains("\"name\": \"Standard_LRS\""));
    assert!(json.contains("\"kind\": \"StorageV2\""));
}
