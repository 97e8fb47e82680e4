//! End-to-end resolution against in-memory stores
//!
//! Each table seeds a store, then checks which stored name wins for a given
//! descriptor scope.

use std::sync::Arc;

use kgcpsecret_core::resolver::{BEHAVIOR_ANNOTATION, NEEDS_HASH_ANNOTATION};
use kgcpsecret_core::{
    encode_value, parse_descriptor, render, Error, KvMap, MemorySecretManager, OutputFormat,
    ResolutionRequest, SecretAssembler, ValueShape,
};

const PROJECT: &str = "cf-2tier-uhd-test-d7";

fn store(pairs: &[(&str, &str)]) -> Arc<MemorySecretManager> {
    Arc::new(MemorySecretManager::from_pairs(pairs.iter().copied()))
}

/// Minimal request: one key, hash suffix disabled, no scope qualifiers
fn single_key(name: &str, key: &str) -> ResolutionRequest {
    ResolutionRequest::new(name, PROJECT)
        .with_disable_name_suffix_hash(true)
        .with_keys([key])
}

async fn resolved(manager: &Arc<MemorySecretManager>, request: &ResolutionRequest) -> KvMap {
    SecretAssembler::new(manager.clone())
        .assemble(request)
        .await
        .unwrap()
        .data
}

const BASE: &[(&str, &str)] = &[
    ("secret1", "secret1-42"),
    ("secret2", "secret2-42"),
    ("secret3", "val-secret3"),
];

#[tokio::test]
async fn base_minimal_descriptor() {
    let manager = store(BASE);
    let request = ResolutionRequest::new("my-secret", PROJECT)
        .with_disable_name_suffix_hash(true)
        .with_keys(["secret1", "secret2"]);

    let secret = SecretAssembler::new(manager).assemble(&request).await.unwrap();

    assert_eq!(secret.metadata.name, "my-secret");
    assert!(secret.metadata.namespace.is_empty());
    assert!(secret.metadata.labels.is_empty());
    assert!(secret.metadata.annotations.is_empty());
    assert!(secret.secret_type.is_empty());
    assert_eq!(
        secret.data,
        KvMap::from([
            ("secret1".to_string(), encode_value(b"secret1-42")),
            ("secret2".to_string(), encode_value(b"secret2-42")),
        ])
    );
}

#[tokio::test]
async fn base_unknown_key_fails() {
    let manager = store(BASE);
    let err = SecretAssembler::new(manager)
        .assemble(&single_key("my-secret", "do-not-exist"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        "error getting 'do-not-exist' secret in Google project 'cf-2tier-uhd-test-d7'. \
         key 'do-not-exist' was not found"
    );
}

#[tokio::test]
async fn base_full_descriptor() {
    let descriptor = r#"
apiVersion: metro.digital/v1
kind: KGCPSecret
metadata:
  name: my-secret
  namespace: my-namespace
  labels:
    label1: lvalue1
    label2: lvalue2
  annotations:
    annotation1: avalue1
    annotation2: avalue2
gcpProjectID: cf-2tier-uhd-test-d7
type: opaque
behavior: replace
keys:
  - secret1
  - secret2
  - secret3
"#;
    let request = parse_descriptor(descriptor).unwrap();
    let secret = SecretAssembler::new(store(BASE)).assemble(&request).await.unwrap();

    assert_eq!(secret.metadata.namespace, "my-namespace");
    assert_eq!(secret.metadata.labels.len(), 2);
    assert_eq!(secret.metadata.labels["label2"], "lvalue2");
    assert_eq!(
        secret.metadata.annotations,
        KvMap::from([
            ("annotation1".to_string(), "avalue1".to_string()),
            ("annotation2".to_string(), "avalue2".to_string()),
            (NEEDS_HASH_ANNOTATION.to_string(), "true".to_string()),
            (BEHAVIOR_ANNOTATION.to_string(), "replace".to_string()),
        ])
    );
    assert_eq!(secret.secret_type, "opaque");
    assert_eq!(secret.data.len(), 3);
    assert_eq!(secret.data["secret3"], encode_value(b"val-secret3"));

    let yaml = render(&secret, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("type: opaque"));
}

const PREFIXED: &[(&str, &str)] = &[
    ("VALUE1", "main-VALUE1-value"),
    ("my-secret_VALUE1", "my-secret-VALUE1-value"),
    ("VALUE2", "main-VALUE1-value"),
    ("my-namespace_VALUE2", "my-namespace-VALUE2-value"),
    ("VALUE3", "main-VALUE3-value"),
    ("my-namespace_my-secret_VALUE3", "my-namespace-and-secret-VALUE3-value"),
    ("my-namespace_VALUE3", "my-namespace-VALUE3-value"),
    ("my-secret_VALUE3", "my-secret-VALUE3-value"),
    ("dockercfg1_data", "my-dockercfg1-data-value"),
    ("dockercfg2_data", "my-dockercfg2-data-value"),
];

#[tokio::test]
async fn prefix_table() {
    // (secret name, namespace, key, expected raw value)
    let cases = [
        ("your-secret", "", "VALUE1", "main-VALUE1-value"),
        ("my-secret", "", "VALUE1", "my-secret-VALUE1-value"),
        ("my-secret", "my-namespace", "VALUE2", "my-namespace-VALUE2-value"),
        ("my-secret", "my-namespace", "VALUE3", "my-namespace-and-secret-VALUE3-value"),
        ("dockercfg1", "", "data", "my-dockercfg1-data-value"),
        ("dockercfg2", "", "data", "my-dockercfg2-data-value"),
    ];

    let manager = store(PREFIXED);
    for (name, namespace, key, expected) in cases {
        let request = single_key(name, key).with_namespace(namespace);
        let data = resolved(&manager, &request).await;
        assert_eq!(
            data,
            KvMap::from([(key.to_string(), encode_value(expected.as_bytes()))]),
            "{} in {}/{}",
            key,
            namespace,
            name
        );
    }
}

const POSTFIXED: &[(&str, &str)] = &[
    ("KUBERNETES_URL_pp", "https://kubernetes-pp.metro.digital"),
    ("KUBERNETES_URL_prod", "https://kubernetes-prod.metro.digital"),
    ("CDN_URL", "https://europe.cdn.net"),
    ("CDN_URL_cn-tcs1", "https://asia.cdn.net"),
    ("CDN_URL_ru-tcm1", "https://russia.cdn.net"),
    ("CASSANDRA_URL_pp", "cassandra-pp.be-gcw1.metro.digital"),
    ("CASSANDRA_URL_pp_cn-tcs1", "cassandra-pp.cn-tcs1.metro.digital"),
    ("CASSANDRA_URL_pp_ru-tcm1", "cassandra-pp.ru-tcm1.metro.digital"),
    ("CASSANDRA_URL_prod", "cassandra-prod.be-gcw1.metro.digital"),
    ("CASSANDRA_URL_prod_cn-tcs1", "cassandra-prod.cn-tcs1.metro.digital"),
    ("CASSANDRA_URL_prod_ru-tcm1", "cassandra-prod.ru-tcm1.metro.digital"),
];

#[tokio::test]
async fn postfix_table() {
    // (key, stage, dc, expected raw value)
    let cases = [
        ("KUBERNETES_URL", "pp", "be-gcw1", "https://kubernetes-pp.metro.digital"),
        ("KUBERNETES_URL", "prod", "be-gcw1", "https://kubernetes-prod.metro.digital"),
        ("CDN_URL", "prod", "be-gcw1", "https://europe.cdn.net"),
        ("CDN_URL", "prod", "nl-gcw4", "https://europe.cdn.net"),
        ("CDN_URL", "prod", "cn-tcs1", "https://asia.cdn.net"),
        ("CDN_URL", "prod", "ru-tcm1", "https://russia.cdn.net"),
        ("CASSANDRA_URL", "pp", "be-gcw1", "cassandra-pp.be-gcw1.metro.digital"),
        ("CASSANDRA_URL", "prod", "be-gcw1", "cassandra-prod.be-gcw1.metro.digital"),
        ("CASSANDRA_URL", "pp", "nl-gcw4", "cassandra-pp.be-gcw1.metro.digital"),
        ("CASSANDRA_URL", "prod", "nl-gcw4", "cassandra-prod.be-gcw1.metro.digital"),
        ("CASSANDRA_URL", "pp", "cn-tcs1", "cassandra-pp.cn-tcs1.metro.digital"),
        ("CASSANDRA_URL", "prod", "cn-tcs1", "cassandra-prod.cn-tcs1.metro.digital"),
        ("CASSANDRA_URL", "pp", "ru-tcm1", "cassandra-pp.ru-tcm1.metro.digital"),
        ("CASSANDRA_URL", "prod", "ru-tcm1", "cassandra-prod.ru-tcm1.metro.digital"),
    ];

    let manager = store(POSTFIXED);
    for (key, stage, dc, expected) in cases {
        let request = single_key("my-secret", key).with_stage(stage).with_dc(dc);
        let data = resolved(&manager, &request).await;
        assert_eq!(
            data[key],
            encode_value(expected.as_bytes()),
            "{} at {}/{}",
            key,
            stage,
            dc
        );
    }
}

#[tokio::test]
async fn environment_and_tag_override_stage_and_dc() {
    let manager = store(POSTFIXED);
    let request = single_key("my-secret", "CASSANDRA_URL")
        .with_stage("pp")
        .with_dc("be-gcw1")
        .with_environment("prod")
        .with_tag("ru-tcm1");

    let data = resolved(&manager, &request).await;
    assert_eq!(
        data["CASSANDRA_URL"],
        encode_value(b"cassandra-prod.ru-tcm1.metro.digital")
    );
}

#[tokio::test]
async fn env_block_expands_into_entries() {
    let manager = store(&[
        ("secret4", "KEY1=VAL1"),
        ("my-secret_database", "DB_USER=app\nDB_PASSWORD=\"s3cr3t\"\n"),
    ]);
    let request = ResolutionRequest::new("my-secret", PROJECT)
        .with_shape(ValueShape::EnvBlock)
        .with_keys(["secret4", "database"]);

    let data = resolved(&manager, &request).await;
    assert_eq!(
        data,
        KvMap::from([
            ("KEY1".to_string(), encode_value(b"VAL1")),
            ("DB_USER".to_string(), encode_value(b"app")),
            ("DB_PASSWORD".to_string(), encode_value(b"s3cr3t")),
        ])
    );
}

#[tokio::test]
async fn repeated_runs_render_identically() {
    let manager = store(PREFIXED);
    let request = ResolutionRequest::new("my-secret", PROJECT)
        .with_namespace("my-namespace")
        .with_keys(["VALUE3", "VALUE2", "VALUE1"]);
    let assembler = SecretAssembler::new(manager);

    let first = render(&assembler.assemble(&request).await.unwrap(), OutputFormat::Yaml).unwrap();
    let second = render(&assembler.assemble(&request).await.unwrap(), OutputFormat::Yaml).unwrap();
    assert_eq!(first, second);
}
