//! Configuration Loading Tests
//!
//! Layered loading from defaults and TOML files, backend resolution, and
//! manager construction from configuration.

use cw_domain::ports::cache::CacheSpec;
use cw_domain::ports::registry::{CacheBackendConfig, resolve_cache_backend};
use cw_infrastructure::config::{ConfigLoader, WardenConfig};
use cw_infrastructure::manager::CacheManager;

#[test]
fn defaults_select_the_moka_backend() {
    let config = WardenConfig::default();
    assert_eq!(config.backend, "moka");
    assert!(config.caches.is_empty());
}

#[test]
fn loads_declared_caches_from_a_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warden.toml");
    std::fs::write(
        &path,
        r#"
backend = "moka"

[[caches]]
name = "catalog"
ttl_seconds = 600
max_elements = 100

[[caches]]
name = "eternal"
"#,
    )
    .unwrap();

    let loader = ConfigLoader::new(format!("file:{}", path.display()));
    let config = loader.load().unwrap();

    assert_eq!(config.backend, "moka");
    assert_eq!(config.caches.len(), 2);
    assert_eq!(config.caches[0].name, "catalog");
    assert_eq!(config.caches[0].ttl_seconds, 600);
    assert_eq!(config.caches[0].max_elements, 100);
    assert!(config.caches[0].management);
    assert!(config.caches[0].statistics);

    // undeclared fields fall back to defaults
    assert_eq!(config.caches[1].ttl_seconds, 0);
}

#[test]
fn manager_pre_registers_declared_caches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warden.toml");
    std::fs::write(
        &path,
        r#"
[[caches]]
name = "catalog"
ttl_seconds = 600
max_elements = 100
"#,
    )
    .unwrap();

    let manager = CacheManager::from_resource(format!("file:{}", path.display())).unwrap();
    let catalog = manager.lookup("catalog").unwrap();

    assert_eq!(catalog.spec().max_elements, 100);
    assert!(!catalog.spec().expiry.is_eternal());
    assert!(catalog.is_management_enabled());
    assert!(catalog.is_statistics_enabled());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = ConfigLoader::new(format!("file:{}", path.display()))
        .load()
        .unwrap();
    assert_eq!(config.backend, "moka");
    assert!(config.caches.is_empty());
}

#[test]
fn saved_configuration_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = WardenConfig::default();
    config.backend = "null".to_string();

    let loader = ConfigLoader::new(format!("file:{}", path.display()));
    loader.save_to_file(&config, &path).unwrap();

    let reloaded = loader.load().unwrap();
    assert_eq!(reloaded.backend, "null");
}

#[test]
fn unknown_backend_fails_resolution() {
    let err = resolve_cache_backend(&CacheBackendConfig::new("memcached")).unwrap_err();
    assert!(err.contains("memcached"));
    assert!(err.contains("moka"));
}

#[test]
fn manager_from_config_rejects_unknown_backend() {
    let config = WardenConfig {
        backend: "bogus".to_string(),
        caches: Vec::new(),
    };
    assert!(CacheManager::from_config(config, "test:uri").is_err());
}

#[test]
fn null_backend_resolves_and_stores_nothing() {
    let backend = resolve_cache_backend(&CacheBackendConfig::new("null")).unwrap();
    let manager = CacheManager::new(backend, "null:test");

    let handle = manager
        .register("void", CacheSpec::new("void").with_max_elements(10))
        .unwrap();
    handle.put_json("k", "\"v\"").unwrap();

    assert!(handle.get_json("k").unwrap().is_none());
    assert_eq!(handle.entry_count().unwrap(), 0);
    assert_eq!(handle.backend_name(), "null");
}
