//! Provisioner Integration Tests
//!
//! End-to-end behavior of the provisioner over an in-memory manager:
//! creation, lookup, duplicate names, instrumentation, and concurrency.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cw_domain::error::Error;
use cw_infrastructure::manager::CacheManager;
use cw_infrastructure::provision::{CacheProvisioner, DefaultCacheProvisioner};
use serde::{Deserialize, Serialize};

fn provisioner() -> DefaultCacheProvisioner {
    DefaultCacheProvisioner::with_manager(Arc::new(CacheManager::in_memory()))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Order {
    id: u64,
    total_cents: i64,
}

#[test]
fn provisions_orders_and_sessions_scenario() {
    let provisioner = provisioner();

    let orders = provisioner.create_cache("orders", 0, 1000).unwrap();
    let sessions = provisioner.create_cache("sessions", 1800, 500).unwrap();

    assert!(orders.spec().expiry.is_eternal());
    assert_eq!(orders.spec().max_elements, 1000);
    assert_eq!(
        sessions.spec().expiry.time_to_live(),
        Some(Duration::from_secs(1800))
    );
    assert_eq!(sessions.spec().max_elements, 500);

    for handle in [&orders, &sessions] {
        assert!(handle.is_management_enabled());
        assert!(handle.is_statistics_enabled());
    }
}

#[test]
fn get_cache_returns_the_created_handle() {
    let provisioner = provisioner();
    assert!(provisioner.get_cache("users").is_none());

    let created = provisioner.create_cache("users", 60, 10).unwrap();
    let looked_up = provisioner.get_cache("users").unwrap();

    assert_eq!(created, looked_up);
    assert_eq!(looked_up.name(), "users");
    assert_eq!(looked_up.backend_name(), "moka");
}

#[test]
fn get_cache_never_creates() {
    let provisioner = provisioner();
    assert!(provisioner.get_cache("ghost").is_none());
    assert!(provisioner.get_cache("ghost").is_none());
    assert!(provisioner.manager().cache_names().is_empty());
}

#[test]
fn duplicate_name_fails_on_second_call() {
    let provisioner = provisioner();
    provisioner.create_cache("dup", 0, 10).unwrap();

    let err = provisioner.create_cache("dup", 300, 99).unwrap_err();
    assert!(matches!(err, Error::CacheExists { name } if name == "dup"));

    // the first cache is untouched
    let survivor = provisioner.get_cache("dup").unwrap();
    assert_eq!(survivor.spec().max_elements, 10);
}

#[test]
fn zero_element_bound_is_rejected_by_the_backend() {
    let provisioner = provisioner();

    let err = provisioner.create_cache("empty", 0, 0).unwrap_err();
    assert!(matches!(err, Error::ResourcePool { .. }));

    // the failed creation left nothing behind
    assert!(provisioner.get_cache("empty").is_none());
}

#[test]
fn concurrent_same_name_creation_has_one_winner() {
    let provisioner = Arc::new(provisioner());

    let joins: Vec<_> = (0..8)
        .map(|_| {
            let provisioner = Arc::clone(&provisioner);
            thread::spawn(move || provisioner.create_cache("contended", 120, 64))
        })
        .collect();
    let results: Vec<_> = joins.into_iter().map(|j| j.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for result in &results {
        if let Err(err) = result {
            assert!(matches!(err, Error::CacheExists { .. }));
        }
    }

    // losers observe a fully configured cache
    let handle = provisioner.get_cache("contended").unwrap();
    assert!(handle.is_management_enabled());
    assert!(handle.is_statistics_enabled());
}

#[test]
fn statistics_count_hits_and_misses() {
    let provisioner = provisioner();
    let cache = provisioner.create_cache("stats", 0, 16).unwrap();

    cache.put_json("k", "\"v\"").unwrap();
    assert!(cache.get_json("k").unwrap().is_some());
    assert!(cache.get_json("absent").unwrap().is_none());

    let stats = cache.stats().unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
}

#[test]
fn disabled_statistics_count_nothing() {
    let provisioner = provisioner();
    let cache = provisioner.create_cache("quiet", 0, 16).unwrap();
    cache.set_statistics_enabled(false);

    cache.put_json("k", "\"v\"").unwrap();
    let _ = cache.get_json("k").unwrap();
    let _ = cache.get_json("absent").unwrap();

    let stats = cache.stats().unwrap();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
}

#[test]
fn typed_view_round_trips_through_the_handle() {
    let provisioner = provisioner();
    let cache = provisioner
        .create_cache_typed::<String, Order>("typed-orders", 0, 32)
        .unwrap();

    let key = "o-7".to_string();
    let order = Order {
        id: 7,
        total_cents: 1499,
    };

    cache.put(&key, &order).unwrap();
    assert_eq!(cache.get(&key).unwrap(), Some(order));
    assert!(cache.contains(&key).unwrap());
    assert!(cache.remove(&key).unwrap());
    assert_eq!(cache.get(&key).unwrap(), None);
}

#[test]
fn untyped_handle_views_share_the_store() {
    let provisioner = provisioner();
    let cache = provisioner.create_cache("shared", 0, 8).unwrap();

    let typed = cache.typed::<String, u32>();
    typed.put(&"answer".to_string(), &42).unwrap();

    // the typed view writes through the same underlying store
    assert_eq!(cache.entry_count().unwrap(), 1);
    assert_eq!(typed.handle(), &cache);
}

#[test]
fn management_info_follows_the_flag() {
    let provisioner = provisioner();
    let cache = provisioner.create_cache("managed", 0, 8).unwrap();

    let info = cache
        .management_info()
        .unwrap()
        .expect("management enabled at creation");
    assert_eq!(info.name, "managed");
    assert_eq!(info.backend, "moka");
    assert_eq!(info.max_elements, 8);

    cache.set_management_enabled(false);
    assert!(cache.management_info().unwrap().is_none());
}

#[test]
fn destroy_frees_the_name() {
    let provisioner = provisioner();
    provisioner.create_cache("tmp", 0, 4).unwrap();

    assert!(provisioner.manager().destroy("tmp").unwrap());
    assert!(provisioner.get_cache("tmp").is_none());
    assert!(!provisioner.manager().destroy("tmp").unwrap());

    // the name can be provisioned again
    provisioner.create_cache("tmp", 0, 4).unwrap();
}

#[test]
fn closed_manager_rejects_creation() {
    let manager = Arc::new(CacheManager::in_memory());
    let provisioner = DefaultCacheProvisioner::with_manager(Arc::clone(&manager));
    provisioner.create_cache("pre-close", 0, 4).unwrap();

    manager.close();
    assert!(manager.is_closed());
    assert!(provisioner.get_cache("pre-close").is_none());

    let err = provisioner.create_cache("post-close", 0, 4).unwrap_err();
    assert!(matches!(err, Error::ManagerClosed));

    // close is idempotent
    manager.close();
}
