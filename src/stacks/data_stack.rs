//! Data lake stack: S3 bucket, Glue database, Athena workgroup.

use serde_json::json;

use crate::domain::errors::ConfigResult;
use crate::domain::models::template::{DeletionPolicy, Resource, Template};
use crate::domain::models::tenant::TenantConfig;
use crate::stacks::Stack;

/// Per-tenant data lake: a results bucket, a Glue catalog database, and an
/// Athena workgroup writing query results to the bucket.
pub struct DataStack;

impl Stack for DataStack {
    fn kind(&self) -> &'static str {
        "data"
    }

    fn name(&self, config: &TenantConfig) -> ConfigResult<String> {
        Ok(format!("{}-data-stack", config.name_prefix()?))
    }

    fn synthesize(&self, config: &TenantConfig) -> ConfigResult<Template> {
        let name = self.name(config)?;
        let account_id = config.str_value("account_id")?;
        let tags = config.string_entries("tags")?;

        // Object auto-deletion is never enabled for prod-tagged tenants.
        let environment = config.section("tags")?.str_value("Environment")?.to_lowercase();
        let auto_delete = environment != "prod";

        let bucket_name = format!("{name}-bucket{}", config.str_value("s3_bucket_suffix")?);

        let mut template = Template::new(format!("Data lake resources for {name}"));

        template.add_resource(
            "DataBucket",
            Resource::new(
                "AWS::S3::Bucket",
                json!({
                    "BucketName": bucket_name,
                    "AutoDeleteObjects": auto_delete,
                }),
            )
            .with_deletion_policy(DeletionPolicy::Delete),
        );

        template.add_resource(
            "GlueDatabase",
            Resource::new(
                "AWS::Glue::Database",
                json!({
                    "CatalogId": account_id,
                    "DatabaseInput": {
                        "Name": config.str_value("glue_database")?,
                    },
                }),
            ),
        );

        template.add_resource(
            "AthenaWorkgroup",
            Resource::new(
                "AWS::Athena::WorkGroup",
                json!({
                    "Name": config.str_value("athena_workgroup")?,
                    "WorkGroupConfiguration": {
                        "ResultConfiguration": {
                            "OutputLocation": format!("s3://{bucket_name}/athena-results/"),
                        },
                    },
                }),
            ),
        );

        template.apply_tags(&tags);
        Ok(template)
    }
}
