//! Declarative resource template model.
//!
//! A synthesized stack is a tree of resource declarations keyed by logical ID,
//! plus named outputs. The shape follows CloudFormation JSON so the emitted
//! files can be consumed by standard tooling, but nothing here talks to a
//! cloud API; templates are plain values until written to disk.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

/// A single resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<DeletionPolicy>,

    #[serde(rename = "Properties")]
    pub properties: Value,
}

impl Resource {
    /// Declare a resource of `resource_type` with the given properties object.
    pub fn new(resource_type: impl Into<String>, properties: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            deletion_policy: None,
            properties,
        }
    }

    /// Set the deletion policy.
    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self
    }
}

/// What happens to a resource when its declaration is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
}

/// A named stack output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Value")]
    pub value: Value,
}

/// A synthesized stack template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,

    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,
}

impl Template {
    /// Start an empty template with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Add a resource under `logical_id`, replacing any previous declaration.
    pub fn add_resource(&mut self, logical_id: impl Into<String>, resource: Resource) {
        self.resources.insert(logical_id.into(), resource);
    }

    /// Add a named output.
    pub fn add_output(&mut self, name: impl Into<String>, value: Value) {
        self.outputs.insert(
            name.into(),
            Output {
                description: None,
                value,
            },
        );
    }

    /// Look up a resource by logical ID.
    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// Logical IDs of all declared resources.
    pub fn resource_ids(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Number of declared resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Look up an output by name.
    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    /// Names of all declared outputs.
    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.keys().map(String::as_str).collect()
    }

    /// Apply tags to every resource in the template.
    ///
    /// Tags already set on a resource win over template-wide tags.
    pub fn apply_tags(&mut self, tags: &[(String, String)]) {
        for resource in self.resources.values_mut() {
            let Some(properties) = resource.properties.as_object_mut() else {
                continue;
            };
            let existing = properties
                .entry("Tags")
                .or_insert_with(|| Value::Array(Vec::new()));
            let Some(existing) = existing.as_array_mut() else {
                continue;
            };
            for (key, value) in tags {
                let present = existing
                    .iter()
                    .any(|tag| tag.get("Key").and_then(Value::as_str) == Some(key.as_str()));
                if !present {
                    existing.push(json!({ "Key": key, "Value": value }));
                }
            }
        }
    }
}

/// Reference another resource in the same template by logical ID.
pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// Reference an attribute of another resource in the same template.
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics_have_expected_shape() {
        assert_eq!(reference("DataBucket"), json!({ "Ref": "DataBucket" }));
        assert_eq!(
            get_att("Secret", "Arn"),
            json!({ "Fn::GetAtt": ["Secret", "Arn"] })
        );
    }

    #[test]
    fn apply_tags_merges_without_clobbering() {
        let mut template = Template::new("test");
        template.add_resource(
            "Bucket",
            Resource::new(
                "AWS::S3::Bucket",
                json!({ "Tags": [{ "Key": "Name", "Value": "kept" }] }),
            ),
        );
        template.add_resource("Role", Resource::new("AWS::IAM::Role", json!({})));

        template.apply_tags(&[
            ("Name".to_string(), "overwritten?".to_string()),
            ("Environment".to_string(), "dev".to_string()),
        ]);

        let bucket_tags = template.resource("Bucket").unwrap().properties["Tags"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(bucket_tags.len(), 2);
        assert_eq!(bucket_tags[0], json!({ "Key": "Name", "Value": "kept" }));

        let role_tags = template.resource("Role").unwrap().properties["Tags"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(
            role_tags,
            vec![
                json!({ "Key": "Name", "Value": "overwritten?" }),
                json!({ "Key": "Environment", "Value": "dev" }),
            ]
        );
    }

    #[test]
    fn serializes_with_cloudformation_sections() {
        let mut template = Template::new("demo");
        template.add_resource(
            "Bucket",
            Resource::new("AWS::S3::Bucket", json!({ "BucketName": "b" }))
                .with_deletion_policy(DeletionPolicy::Delete),
        );
        template.add_output("BucketName", reference("Bucket"));

        let rendered = serde_json::to_value(&template).unwrap();
        assert_eq!(rendered["Description"], "demo");
        assert_eq!(rendered["Resources"]["Bucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(rendered["Resources"]["Bucket"]["DeletionPolicy"], "Delete");
        assert_eq!(rendered["Outputs"]["BucketName"]["Value"], json!({ "Ref": "Bucket" }));
    }
}
