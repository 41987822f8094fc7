//! Common test utilities for integration tests.
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for test isolation.
///
/// Returns a `TempDir` that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write a per-environment configuration document into `dir`.
#[allow(dead_code)]
pub fn write_env_config(dir: &Path, env: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{env}_config.yaml"));
    fs::write(&path, content).expect("Failed to write config document");
    path
}

/// A dev document for tenant `acme` carrying every key both built-in stacks
/// consume.
#[allow(dead_code)]
pub const ACME_DEV_CONFIG: &str = r#"
acme:
  account_id: "111111111111"
  region: us-east-1
  s3_bucket_suffix: "-landing"
  glue_database: acme_catalog
  athena_workgroup: acme-queries
  tags:
    Environment: dev
    Owner: data-eng
  vpc:
    cidr: 10.0.0.0/16
    max_azs: 2
    subnets:
      - name: PublicSubnet
        type: PUBLIC
        cidr_mask: 24
      - name: IsolatedSubnet
        type: PRIVATE_ISOLATED
        cidr_mask: 24
  redshift:
    cluster_identifier: acme-dwh
    cluster_type: multi-node
    node_type: ra3.xlplus
    number_of_nodes: 2
    master_username: admin
    master_password: test-only-password
    database_name: sales
    secret_name: acme/dev/redshift
"#;
