use std::path::Path;

use crate::kernel::constants;
use crate::storage::bundled::BundledResources;
use crate::storage::config::{
    ChannelDefinition, ChannelKind, ConfigFormat, LogLevel, RegistryConfig, SubscriberDefinition,
    load_registry_config,
};
use crate::storage::error::ConfigError;

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")), Some(ConfigFormat::Toml));
    #[cfg(feature = "yaml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
    assert_eq!(ConfigFormat::from_path(Path::new("a.xml")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
}

#[test]
#[cfg(feature = "toml-config")]
fn test_sample_configuration_loads() {
    let resources = BundledResources::sample();
    let config = load_registry_config(&resources, constants::DEFAULT_CONFIG_RESOURCE)
        .expect("sample configuration should load");

    let orders = config
        .channel(constants::DEFAULT_CHANNEL_NAME)
        .expect("ordersChannel should be defined");
    assert_eq!(orders.kind, ChannelKind::Direct);
    assert_eq!(
        orders.subscribers,
        vec![SubscriberDefinition::Log { level: LogLevel::Info }]
    );

    let resupply = config.channel("resupplyChannel").expect("resupplyChannel should be defined");
    assert_eq!(resupply.kind, ChannelKind::Queue);
    assert_eq!(resupply.queue_capacity(), 10);
}

#[test]
#[cfg(feature = "yaml-config")]
fn test_json_and_yaml_configurations() {
    let json = r#"{"channels":[{"name":"a","kind":"queue"},{"name":"b","subscribers":[{"type":"log"}]}]}"#;
    let from_json = RegistryConfig::deserialize(json, ConfigFormat::Json).expect("json should parse");

    let yaml = "channels:\n  - name: a\n    kind: queue\n  - name: b\n    subscribers:\n      - type: log\n";
    let from_yaml = RegistryConfig::deserialize(yaml, ConfigFormat::Yaml).expect("yaml should parse");

    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json.channels[0].queue_capacity(), constants::DEFAULT_QUEUE_CAPACITY);
    assert_eq!(from_json.channels[1].kind, ChannelKind::Direct);
}

#[test]
#[cfg(feature = "toml-config")]
fn test_missing_configuration_is_unreadable() {
    let resources = BundledResources::new();
    let result = load_registry_config(&resources, "absent.toml");
    assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
}

#[test]
#[cfg(feature = "toml-config")]
fn test_malformed_configuration_fails_to_deserialize() {
    let resources = BundledResources::new()
        .with("broken.toml", "[[channels]\nname = ")
        .expect("insert should succeed");
    let result = load_registry_config(&resources, "broken.toml");
    match result {
        Err(ConfigError::DeserializationError { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("Expected DeserializationError, got {:?}", other),
    }
}

#[test]
#[cfg(feature = "toml-config")]
fn test_unknown_channel_kind_is_rejected() {
    let toml = "[[channels]]\nname = \"x\"\nkind = \"pubsub\"\n";
    assert!(RegistryConfig::deserialize(toml, ConfigFormat::Toml).is_err());
}

#[test]
#[cfg(not(feature = "toml-config"))]
fn test_toml_needs_its_feature() {
    let resources = BundledResources::sample();
    let result = load_registry_config(&resources, constants::DEFAULT_CONFIG_RESOURCE);
    assert!(matches!(result, Err(ConfigError::UnsupportedConfigFormat(_))));
}

#[test]
fn test_unsupported_extension() {
    let resources = BundledResources::new()
        .with("registry.xml", "<beans/>")
        .expect("insert should succeed");
    let result = load_registry_config(&resources, "registry.xml");
    assert!(matches!(result, Err(ConfigError::UnsupportedConfigFormat(_))));
}

#[test]
fn test_validation_rules() {
    let duplicate = RegistryConfig {
        channels: vec![ChannelDefinition::direct("a"), ChannelDefinition::queue("a", 1)],
    };
    assert!(matches!(duplicate.validate(), Err(ConfigError::DuplicateChannel(name)) if name == "a"));

    let empty_name = RegistryConfig {
        channels: vec![ChannelDefinition::direct("  ")],
    };
    assert!(matches!(empty_name.validate(), Err(ConfigError::InvalidChannel { .. })));

    let zero_capacity = RegistryConfig {
        channels: vec![ChannelDefinition::queue("q", 0)],
    };
    assert!(matches!(zero_capacity.validate(), Err(ConfigError::InvalidChannel { .. })));

    let subscribed_queue = RegistryConfig {
        channels: vec![ChannelDefinition::queue("q", 1)
            .with_subscriber(SubscriberDefinition::Log { level: LogLevel::Debug })],
    };
    assert!(matches!(subscribed_queue.validate(), Err(ConfigError::InvalidChannel { .. })));

    let ok = RegistryConfig {
        channels: vec![ChannelDefinition::direct("a"), ChannelDefinition::queue("b", 5)],
    };
    assert!(ok.validate().is_ok());
}
