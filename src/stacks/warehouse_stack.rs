//! Warehouse stack: VPC, Redshift cluster, and supporting resources.

use serde_json::{json, Value};

use crate::domain::errors::ConfigResult;
use crate::domain::models::template::{get_att, reference, DeletionPolicy, Resource, Template};
use crate::domain::models::tenant::TenantConfig;
use crate::stacks::Stack;

const REDSHIFT_PORT: u16 = 5439;

const MANAGED_POLICIES: &[&str] = &[
    "arn:aws:iam::aws:policy/AmazonRedshiftAllCommandsFullAccess",
    "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess",
    "arn:aws:iam::aws:policy/SecretsManagerReadWrite",
];

/// Per-tenant warehouse: an isolated VPC, a Redshift cluster behind a
/// security group and subnet group, an IAM role with read access to the
/// data bucket, and a secret holding the cluster credentials.
pub struct WarehouseStack;

impl Stack for WarehouseStack {
    fn kind(&self) -> &'static str {
        "warehouse"
    }

    fn name(&self, config: &TenantConfig) -> ConfigResult<String> {
        Ok(format!(
            "{}-{}-redshift",
            config.name_prefix()?,
            config.str_value("region")?
        ))
    }

    fn synthesize(&self, config: &TenantConfig) -> ConfigResult<Template> {
        let prefix = config.name_prefix()?;
        let mut template = Template::new(format!("Warehouse resources for {prefix}"));

        let private_subnet_ids = add_vpc(&mut template, config)?;

        template.add_resource(
            "RedshiftSecurityGroup",
            Resource::new(
                "AWS::EC2::SecurityGroup",
                json!({
                    "GroupDescription": "Redshift security group",
                    "VpcId": reference("Vpc"),
                    "SecurityGroupEgress": [{
                        "IpProtocol": "-1",
                        "CidrIp": "0.0.0.0/0",
                        "Description": "Allow all outbound traffic",
                    }],
                    "SecurityGroupIngress": [{
                        "IpProtocol": "tcp",
                        "FromPort": REDSHIFT_PORT,
                        "ToPort": REDSHIFT_PORT,
                        "CidrIp": "0.0.0.0/0",
                        "Description": "Allow Redshift access",
                    }],
                }),
            ),
        );

        let bucket_name = format!("{prefix}-redshift-data");
        template.add_resource(
            "SalesBucket",
            Resource::new(
                "AWS::S3::Bucket",
                json!({
                    "BucketName": bucket_name,
                    "AutoDeleteObjects": true,
                }),
            )
            .with_deletion_policy(DeletionPolicy::Delete),
        );

        template.add_resource(
            "RedshiftRole",
            Resource::new(
                "AWS::IAM::Role",
                json!({
                    "AssumeRolePolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Principal": { "Service": "redshift.amazonaws.com" },
                            "Action": "sts:AssumeRole",
                        }],
                    },
                    "ManagedPolicyArns": MANAGED_POLICIES,
                    "Policies": [{
                        "PolicyName": "SalesBucketRead",
                        "PolicyDocument": {
                            "Version": "2012-10-17",
                            "Statement": [{
                                "Effect": "Allow",
                                "Action": ["s3:GetObject*", "s3:GetBucket*", "s3:List*"],
                                "Resource": [
                                    get_att("SalesBucket", "Arn"),
                                    json!({ "Fn::Join": ["/", [get_att("SalesBucket", "Arn"), "*"]] }),
                                ],
                            }],
                        },
                    }],
                }),
            ),
        );

        let redshift = config.section("redshift")?;
        template.add_resource(
            "RedshiftSecret",
            Resource::new(
                "AWS::SecretsManager::Secret",
                json!({
                    "Name": redshift.str_value("secret_name")?,
                    "SecretString": secret_string(&redshift)?,
                }),
            ),
        );

        template.add_resource(
            "ClusterSubnetGroup",
            Resource::new(
                "AWS::Redshift::ClusterSubnetGroup",
                json!({
                    "Description": "Redshift subnet group",
                    "SubnetIds": private_subnet_ids,
                    "Tags": [{ "Key": "Name", "Value": format!("{prefix}-subnet-group") }],
                }),
            ),
        );

        template.add_resource(
            "RedshiftCluster",
            Resource::new(
                "AWS::Redshift::Cluster",
                json!({
                    "ClusterIdentifier": redshift.str_value("cluster_identifier")?,
                    "ClusterType": redshift.str_value("cluster_type")?,
                    "NodeType": redshift.str_value("node_type")?,
                    "NumberOfNodes": redshift.u64_value("number_of_nodes")?,
                    "MasterUsername": redshift.str_value("master_username")?,
                    "MasterUserPassword": redshift.str_value("master_password")?,
                    "DBName": redshift.str_value("database_name")?,
                    "IamRoles": [get_att("RedshiftRole", "Arn")],
                    "VpcSecurityGroupIds": [reference("RedshiftSecurityGroup")],
                    "ClusterSubnetGroupName": reference("ClusterSubnetGroup"),
                }),
            ),
        );

        template.add_output(format!("{prefix}-bucket-name"), Value::String(bucket_name));
        template.add_output(format!("{prefix}-secret-arn"), reference("RedshiftSecret"));
        template.add_output(
            format!("{prefix}-cluster-id"),
            Value::String(redshift.str_value("cluster_identifier")?.to_string()),
        );

        Ok(template)
    }
}

/// Declare the VPC and its subnets; returns refs to the private subnets for
/// the cluster subnet group.
fn add_vpc(template: &mut Template, config: &TenantConfig) -> ConfigResult<Vec<Value>> {
    let vpc = config.section("vpc")?;

    template.add_resource(
        "Vpc",
        Resource::new(
            "AWS::EC2::VPC",
            json!({
                "CidrBlock": vpc.str_value("cidr")?,
                "EnableDnsSupport": true,
                "EnableDnsHostnames": true,
            }),
        ),
    );

    let max_azs = vpc.u64_value("max_azs")?;
    let mut private_subnet_ids = Vec::new();

    // One subnet per configured group per availability zone. No NAT
    // gateways are declared.
    for subnet in vpc.sections("subnets")? {
        let group = subnet.str_value("name")?.replace("Subnet", "");
        let subnet_type = subnet.str_value("type")?;
        if !matches!(subnet_type, "PUBLIC" | "PRIVATE_ISOLATED") {
            return Err(subnet.invalid_value("type", "PUBLIC or PRIVATE_ISOLATED"));
        }
        let cidr_mask = subnet.u64_value("cidr_mask")?;

        for az in 0..max_azs {
            let logical_id = format!("{group}Subnet{}", az + 1);
            template.add_resource(
                &logical_id,
                Resource::new(
                    "AWS::EC2::Subnet",
                    json!({
                        "VpcId": reference("Vpc"),
                        "CidrMask": cidr_mask,
                        "SubnetType": subnet_type,
                        "AvailabilityZoneIndex": az,
                    }),
                ),
            );
            if subnet_type == "PRIVATE_ISOLATED" {
                private_subnet_ids.push(reference(&logical_id));
            }
        }
    }

    Ok(private_subnet_ids)
}

fn secret_string(redshift: &TenantConfig) -> ConfigResult<String> {
    let secret = json!({
        "username": redshift.str_value("master_username")?,
        "password": redshift.str_value("master_password")?,
        "engine": "redshift",
        "host": "placeholder-host",
        "port": REDSHIFT_PORT.to_string(),
        "dbname": redshift.str_value("database_name")?,
    });
    Ok(secret.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ConfigError;
    use serde_yaml::Mapping;

    fn config() -> TenantConfig {
        let yaml = r#"
account_id: "222"
region: eu-west-1
vpc:
  cidr: 10.20.0.0/16
  max_azs: 2
  subnets:
    - name: PublicSubnet
      type: PUBLIC
      cidr_mask: 24
    - name: IsolatedSubnet
      type: PRIVATE_ISOLATED
      cidr_mask: 24
redshift:
  cluster_identifier: globex-dwh
  cluster_type: multi-node
  node_type: ra3.xlplus
  number_of_nodes: 2
  master_username: admin
  master_password: not-in-source
  database_name: sales
  secret_name: globex/dev/redshift
"#;
        let mapping: Mapping = serde_yaml::from_str(yaml).unwrap();
        let mut config = TenantConfig::from_mapping(mapping);
        config.insert("tenant", "globex");
        config.insert("env", "dev");
        config
    }

    #[test]
    fn name_includes_region() {
        assert_eq!(
            WarehouseStack.name(&config()).unwrap(),
            "globex-dev-eu-west-1-redshift"
        );
    }

    #[test]
    fn synthesizes_expected_resource_set() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        assert_eq!(
            template.resource_ids(),
            vec![
                "ClusterSubnetGroup",
                "IsolatedSubnet1",
                "IsolatedSubnet2",
                "PublicSubnet1",
                "PublicSubnet2",
                "RedshiftCluster",
                "RedshiftRole",
                "RedshiftSecret",
                "RedshiftSecurityGroup",
                "SalesBucket",
                "Vpc",
            ]
        );
    }

    #[test]
    fn subnet_group_only_references_private_subnets() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        let subnet_ids = template.resource("ClusterSubnetGroup").unwrap().properties
            ["SubnetIds"]
            .clone();
        assert_eq!(
            subnet_ids,
            json!([
                { "Ref": "IsolatedSubnet1" },
                { "Ref": "IsolatedSubnet2" },
            ])
        );
    }

    #[test]
    fn cluster_is_wired_to_role_group_and_subnets() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        let cluster = &template.resource("RedshiftCluster").unwrap().properties;

        assert_eq!(cluster["ClusterIdentifier"], "globex-dwh");
        assert_eq!(cluster["NumberOfNodes"], 2);
        assert_eq!(
            cluster["IamRoles"],
            json!([{ "Fn::GetAtt": ["RedshiftRole", "Arn"] }])
        );
        assert_eq!(
            cluster["VpcSecurityGroupIds"],
            json!([{ "Ref": "RedshiftSecurityGroup" }])
        );
        assert_eq!(
            cluster["ClusterSubnetGroupName"],
            json!({ "Ref": "ClusterSubnetGroup" })
        );
    }

    #[test]
    fn security_group_opens_the_redshift_port() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        let ingress = template.resource("RedshiftSecurityGroup").unwrap().properties
            ["SecurityGroupIngress"]
            .clone();
        assert_eq!(ingress[0]["FromPort"], 5439);
        assert_eq!(ingress[0]["ToPort"], 5439);
        assert_eq!(ingress[0]["CidrIp"], "0.0.0.0/0");
    }

    #[test]
    fn secret_carries_cluster_credentials() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        let secret = &template.resource("RedshiftSecret").unwrap().properties;
        assert_eq!(secret["Name"], "globex/dev/redshift");

        let fields: serde_json::Value =
            serde_json::from_str(secret["SecretString"].as_str().unwrap()).unwrap();
        assert_eq!(fields["username"], "admin");
        assert_eq!(fields["password"], "not-in-source");
        assert_eq!(fields["engine"], "redshift");
        assert_eq!(fields["dbname"], "sales");
    }

    #[test]
    fn outputs_name_bucket_secret_and_cluster() {
        let template = WarehouseStack.synthesize(&config()).unwrap();
        assert_eq!(
            template.output_names(),
            vec![
                "globex-dev-bucket-name",
                "globex-dev-cluster-id",
                "globex-dev-secret-arn",
            ]
        );
        assert_eq!(
            template.output("globex-dev-bucket-name").unwrap().value,
            "globex-dev-redshift-data"
        );
    }

    #[test]
    fn missing_redshift_key_fails_with_dotted_path() {
        let mut base = config();
        // Rebuild without the node_type key.
        let mut mapping = base.as_mapping().clone();
        let redshift = mapping
            .get_mut("redshift")
            .unwrap()
            .as_mapping_mut()
            .unwrap();
        redshift.remove("node_type");
        base = TenantConfig::from_mapping(mapping);

        match WarehouseStack.synthesize(&base) {
            Err(ConfigError::MissingConfigKey { key }) => assert_eq!(key, "redshift.node_type"),
            other => panic!("expected MissingConfigKey, got {other:?}"),
        }
    }

    #[test]
    fn unknown_subnet_type_is_rejected() {
        let yaml = r#"
vpc:
  cidr: 10.0.0.0/16
  max_azs: 1
  subnets:
    - name: OddSubnet
      type: PRIVATE_WITH_EGRESS
      cidr_mask: 24
"#;
        let mapping: Mapping = serde_yaml::from_str(yaml).unwrap();
        let mut config = TenantConfig::from_mapping(mapping);
        config.insert("tenant", "globex");
        config.insert("env", "dev");

        match WarehouseStack.synthesize(&config) {
            Err(ConfigError::InvalidConfigValue { key, .. }) => {
                assert_eq!(key, "vpc.subnets[0].type");
            }
            other => panic!("expected InvalidConfigValue, got {other:?}"),
        }
    }
}
