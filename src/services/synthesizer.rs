//! Stack assembly and template emission.
//!
//! Builds the selected stacks from a resolved tenant configuration and writes
//! the resulting templates plus a manifest to the output directory. Building
//! and writing are separate steps so validation can run the full synthesis
//! without touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::errors::{ConfigResult, SynthError, SynthResult};
use crate::domain::models::template::Template;
use crate::domain::models::tenant::TenantConfig;
use crate::stacks::Stack;

/// Target account and region a stack deploys into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetEnvironment {
    pub account_id: String,
    pub region: String,
}

impl TargetEnvironment {
    /// Read the deployment target from the resolved configuration.
    pub fn from_config(config: &TenantConfig) -> ConfigResult<Self> {
        Ok(Self {
            account_id: config.str_value("account_id")?.to_string(),
            region: config.str_value("region")?.to_string(),
        })
    }
}

/// A named, fully built stack ready for emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedStack {
    pub kind: String,
    pub name: String,
    pub target: TargetEnvironment,
    pub template: Template,
}

/// Build every selected stack from the resolved configuration.
///
/// Fails on the first configuration error; no partial result is returned,
/// since emitting some stacks while others are misconfigured would deploy a
/// half-described tenant.
pub fn build_stacks(
    stacks: &[Box<dyn Stack>],
    config: &TenantConfig,
) -> SynthResult<Vec<SynthesizedStack>> {
    let target = TargetEnvironment::from_config(config)?;

    let mut synthesized = Vec::with_capacity(stacks.len());
    for stack in stacks {
        let name = stack.name(config)?;
        let template = stack.synthesize(config)?;
        info!(
            stack = name.as_str(),
            resources = template.resource_count(),
            "synthesized stack"
        );
        synthesized.push(SynthesizedStack {
            kind: stack.kind().to_string(),
            name,
            target: target.clone(),
            template,
        });
    }
    Ok(synthesized)
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    generated_at: DateTime<Utc>,
    tenant: &'a str,
    env: &'a str,
    stacks: Vec<ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    kind: &'a str,
    name: &'a str,
    account_id: &'a str,
    region: &'a str,
    template_file: String,
    resources: usize,
}

/// Writes synthesized stacks to an output directory.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    out_dir: PathBuf,
}

impl Synthesizer {
    /// Create a synthesizer emitting into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The file a stack's template is written to.
    pub fn template_path(&self, stack_name: &str) -> PathBuf {
        self.out_dir.join(format!("{stack_name}.template.json"))
    }

    /// The manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join("manifest.json")
    }

    /// Write one `<name>.template.json` per stack plus `manifest.json`.
    ///
    /// Returns the written paths, manifest last.
    pub fn write(&self, config: &TenantConfig, stacks: &[SynthesizedStack]) -> SynthResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|source| SynthError::WriteFailed {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(stacks.len() + 1);
        let mut entries = Vec::with_capacity(stacks.len());

        for stack in stacks {
            let path = self.template_path(&stack.name);
            write_json(&path, &stack.template)?;
            info!(path = %path.display(), "wrote template");
            entries.push(ManifestEntry {
                kind: &stack.kind,
                name: &stack.name,
                account_id: &stack.target.account_id,
                region: &stack.target.region,
                template_file: format!("{}.template.json", stack.name),
                resources: stack.template.resource_count(),
            });
            written.push(path);
        }

        let manifest = Manifest {
            generated_at: Utc::now(),
            tenant: config.tenant()?,
            env: config.env()?,
            stacks: entries,
        };
        let manifest_path = self.manifest_path();
        write_json(&manifest_path, &manifest)?;
        written.push(manifest_path);

        Ok(written)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> SynthResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| SynthError::WriteFailed {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    fs::write(path, rendered).map_err(|source| SynthError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::select_stacks;
    use serde_yaml::Mapping;

    fn resolved_config() -> TenantConfig {
        let yaml = r#"
account_id: "111"
region: us-east-1
s3_bucket_suffix: ""
glue_database: acme_catalog
athena_workgroup: acme-queries
tags:
  Environment: dev
vpc:
  cidr: 10.0.0.0/16
  max_azs: 1
  subnets:
    - name: IsolatedSubnet
      type: PRIVATE_ISOLATED
      cidr_mask: 24
redshift:
  cluster_identifier: acme-dwh
  cluster_type: single-node
  node_type: dc2.large
  number_of_nodes: 1
  master_username: admin
  master_password: from-config
  database_name: sales
  secret_name: acme/dev/redshift
"#;
        let mapping: Mapping = serde_yaml::from_str(yaml).unwrap();
        let mut config = TenantConfig::from_mapping(mapping);
        config.insert("tenant", "acme");
        config.insert("env", "dev");
        config
    }

    #[test]
    fn builds_all_selected_stacks() {
        let stacks = select_stacks(&[]).unwrap();
        let synthesized = build_stacks(&stacks, &resolved_config()).unwrap();

        assert_eq!(synthesized.len(), 2);
        assert_eq!(synthesized[0].name, "acme-dev-data-stack");
        assert_eq!(synthesized[1].name, "acme-dev-us-east-1-redshift");
        assert_eq!(synthesized[0].target.account_id, "111");
        assert_eq!(synthesized[1].target.region, "us-east-1");
    }

    #[test]
    fn build_fails_fast_on_configuration_errors() {
        let stacks = select_stacks(&[]).unwrap();
        let config = TenantConfig::from_mapping(Mapping::new());

        assert!(matches!(
            build_stacks(&stacks, &config),
            Err(SynthError::Config(_))
        ));
    }

    #[test]
    fn write_emits_templates_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");

        let config = resolved_config();
        let stacks = select_stacks(&[]).unwrap();
        let synthesized = build_stacks(&stacks, &config).unwrap();

        let synthesizer = Synthesizer::new(&out_dir);
        let written = synthesizer.write(&config, &synthesized).unwrap();

        assert_eq!(written.len(), 3);
        assert!(out_dir.join("acme-dev-data-stack.template.json").exists());
        assert!(out_dir.join("acme-dev-us-east-1-redshift.template.json").exists());

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join("manifest.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["tenant"], "acme");
        assert_eq!(manifest["env"], "dev");
        assert_eq!(manifest["stacks"][0]["kind"], "data");
        assert_eq!(
            manifest["stacks"][0]["template_file"],
            "acme-dev-data-stack.template.json"
        );

        let template: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(out_dir.join("acme-dev-data-stack.template.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            template["Resources"]["GlueDatabase"]["Properties"]["DatabaseInput"]["Name"],
            "acme_catalog"
        );
    }
}
