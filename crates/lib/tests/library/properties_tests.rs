//! Property tests for dependency ordering.

use std::collections::HashMap;

use proptest::prelude::*;

use stackup_lib::target::{TargetError, order_by_deps};

use super::common::{manifest_of, manifest_path};

/// An acyclic manifest: application `i` may only depend on applications `j < i`,
/// declared in an arbitrary order.
fn acyclic_apps() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
  (1usize..12)
    .prop_flat_map(|n| {
      let edges = proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n);
      let order = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
      (edges, order)
    })
    .prop_map(|(edges, order)| {
      order
        .into_iter()
        .map(|i| {
          let deps = (0..i)
            .filter(|&j| edges[i][j])
            .map(|j| format!("./app{}", j))
            .collect();
          (format!("./app{}", i), deps)
        })
        .collect()
    })
}

fn as_refs(apps: &[(String, Vec<String>)]) -> Vec<(&str, Vec<&str>)> {
  apps
    .iter()
    .map(|(key, deps)| (key.as_str(), deps.iter().map(String::as_str).collect()))
    .collect()
}

proptest! {
  #[test]
  fn every_dependency_precedes_its_dependent(apps in acyclic_apps()) {
    let refs = as_refs(&apps);
    let pairs: Vec<(&str, &[&str])> = refs.iter().map(|(k, d)| (*k, d.as_slice())).collect();
    let manifest = manifest_of(&pairs);

    let ordered = order_by_deps(manifest.applications().unwrap(), &manifest_path()).unwrap();
    let position: HashMap<&str, usize> = ordered
      .iter()
      .enumerate()
      .map(|(i, target)| (target.key.unwrap(), i))
      .collect();

    for (key, deps) in &apps {
      for dep in deps {
        prop_assert!(position[dep.as_str()] < position[key.as_str()], "{} must precede {}", dep, key);
      }
    }
  }

  #[test]
  fn every_app_appears_exactly_once(apps in acyclic_apps()) {
    let refs = as_refs(&apps);
    let pairs: Vec<(&str, &[&str])> = refs.iter().map(|(k, d)| (*k, d.as_slice())).collect();
    let manifest = manifest_of(&pairs);

    let ordered = order_by_deps(manifest.applications().unwrap(), &manifest_path()).unwrap();
    let mut keys: Vec<&str> = ordered.iter().map(|target| target.key.unwrap()).collect();
    keys.sort_unstable();
    let mut expected: Vec<&str> = apps.iter().map(|(key, _)| key.as_str()).collect();
    expected.sort_unstable();

    prop_assert_eq!(keys, expected);
  }

  #[test]
  fn independent_apps_keep_declared_order(n in 1usize..20) {
    let keys: Vec<String> = (0..n).rev().map(|i| format!("./app{}", i)).collect();
    let pairs: Vec<(&str, &[&str])> = keys.iter().map(|k| (k.as_str(), &[][..])).collect();
    let manifest = manifest_of(&pairs);

    let ordered = order_by_deps(manifest.applications().unwrap(), &manifest_path()).unwrap();
    let got: Vec<&str> = ordered.iter().map(|target| target.key.unwrap()).collect();

    prop_assert_eq!(got, keys.iter().map(String::as_str).collect::<Vec<_>>());
  }

  #[test]
  fn any_cycle_is_rejected(len in 1usize..8, extra in 0usize..5) {
    // app0 -> app1 -> ... -> app{len-1} -> app0, plus unrelated apps declared first
    let mut apps: Vec<(String, Vec<String>)> = (0..extra)
      .map(|i| (format!("./free{}", i), Vec::new()))
      .collect();
    for i in 0..len {
      apps.push((format!("./app{}", i), vec![format!("./app{}", (i + 1) % len)]));
    }
    let refs = as_refs(&apps);
    let pairs: Vec<(&str, &[&str])> = refs.iter().map(|(k, d)| (*k, d.as_slice())).collect();
    let manifest = manifest_of(&pairs);

    let result = order_by_deps(manifest.applications().unwrap(), &manifest_path());

    let is_cycle = matches!(result, Err(TargetError::CircularDependency { .. }));
    prop_assert!(is_cycle);
  }
}
