//! Dependency closure and selection maintenance.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::catalog::ServiceId;
use crate::ports::ServiceCatalog;

/// Domain logic for keeping a selection closed under its dependencies.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Every identifier transitively required by `id`, excluding `id` itself.
    ///
    /// Uses an explicit worklist with a visited set, so a cyclic catalog yields a
    /// partial closure instead of looping. Unknown identifiers are skipped.
    pub fn closure_of<C: ServiceCatalog>(id: &str, catalog: &C) -> BTreeSet<ServiceId> {
        let mut closure = BTreeSet::new();
        let Some(root) = catalog.get(id) else {
            return closure;
        };

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        visited.insert(root.id.as_str());
        let mut worklist: Vec<&ServiceId> = root.dependencies.iter().rev().collect();

        while let Some(dep) = worklist.pop() {
            if !visited.insert(dep.as_str()) {
                continue;
            }
            let Some(service) = catalog.get(dep) else {
                debug!(service = id, dependency = %dep, "skipping unknown dependency");
                continue;
            };
            closure.insert(service.id.clone());
            worklist.extend(
                service.dependencies.iter().rev().filter(|next| !visited.contains(next.as_str())),
            );
        }

        closure
    }

    /// Toggle `to_toggle` on or off and return the new selection.
    ///
    /// Turning on adds each identifier and its closure. Turning off removes each
    /// identifier and every member of its closure that no remaining selected
    /// service still requires.
    pub fn apply_selection<C: ServiceCatalog>(
        current: &BTreeSet<ServiceId>,
        to_toggle: &BTreeSet<ServiceId>,
        turning_on: bool,
        catalog: &C,
    ) -> BTreeSet<ServiceId> {
        Self::apply_selection_with_pins(current, &BTreeSet::new(), to_toggle, turning_on, catalog)
    }

    /// Same as [`Self::apply_selection`], but identifiers in `pinned` that stay
    /// selected are never pruned as orphaned dependencies.
    pub fn apply_selection_with_pins<C: ServiceCatalog>(
        current: &BTreeSet<ServiceId>,
        pinned: &BTreeSet<ServiceId>,
        to_toggle: &BTreeSet<ServiceId>,
        turning_on: bool,
        catalog: &C,
    ) -> BTreeSet<ServiceId> {
        let mut next = current.clone();

        if turning_on {
            for id in to_toggle {
                next.insert(id.clone());
                next.extend(Self::closure_of(id, catalog));
            }
            return next;
        }

        let mut still_needed: BTreeSet<ServiceId> = BTreeSet::new();
        for id in current.iter().filter(|id| !to_toggle.contains(*id)) {
            if pinned.contains(id) {
                still_needed.insert(id.clone());
            }
            still_needed.extend(Self::closure_of(id, catalog));
        }

        for id in to_toggle {
            next.remove(id);
            for dep in Self::closure_of(id, catalog) {
                if !still_needed.contains(&dep) {
                    next.remove(&dep);
                }
            }
        }

        // A toggled identifier may itself be required by a remaining service.
        let required: BTreeSet<ServiceId> =
            next.iter().flat_map(|id| Self::closure_of(id, catalog)).collect();
        for id in required {
            if next.insert(id.clone()) {
                debug!(service = %id, "kept selected: still required by another service");
            }
        }

        next
    }

    /// The selection plus every always-on service and their closures.
    pub fn effective_set<C: ServiceCatalog>(
        selected: &BTreeSet<ServiceId>,
        catalog: &C,
    ) -> BTreeSet<ServiceId> {
        let mut effective = selected.clone();
        for service in catalog.list_all().into_iter().filter(|service| service.always_on) {
            effective.insert(service.id.clone());
            effective.extend(Self::closure_of(&service.id, catalog));
        }
        effective
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::testing::TestCatalog;

    fn ids(values: &[&str]) -> BTreeSet<ServiceId> {
        values.iter().map(|value| ServiceId::new(value).unwrap()).collect()
    }

    fn names(set: &BTreeSet<ServiceId>) -> Vec<&str> {
        set.iter().map(ServiceId::as_str).collect()
    }

    #[test]
    fn closure_of_leaf_is_empty() {
        let catalog = TestCatalog::new().service("a", &[]);
        assert!(DependencyResolver::closure_of("a", &catalog).is_empty());
    }

    #[test]
    fn closure_of_chain_is_transitive() {
        let catalog =
            TestCatalog::new().service("a", &[]).service("b", &["a"]).service("c", &["b"]);

        let closure = DependencyResolver::closure_of("c", &catalog);

        assert_eq!(names(&closure), vec!["a", "b"]);
    }

    #[test]
    fn closure_of_diamond_has_no_duplicates() {
        let catalog = TestCatalog::new()
            .service("d", &[])
            .service("b", &["d"])
            .service("c", &["d"])
            .service("a", &["b", "c"]);

        let closure = DependencyResolver::closure_of("a", &catalog);

        assert_eq!(names(&closure), vec!["b", "c", "d"]);
    }

    #[test]
    fn closure_terminates_on_cycle() {
        let catalog =
            TestCatalog::new().service("x", &["y"]).service("y", &["z"]).service("z", &["x"]);

        let closure = DependencyResolver::closure_of("x", &catalog);

        assert_eq!(names(&closure), vec!["y", "z"]);
    }

    #[test]
    fn closure_skips_unknown_dependencies() {
        let catalog = TestCatalog::new().service("a", &["ghost"]);
        assert!(DependencyResolver::closure_of("a", &catalog).is_empty());
    }

    #[test]
    fn closure_of_unknown_root_is_empty() {
        let catalog = TestCatalog::new();
        assert!(DependencyResolver::closure_of("missing", &catalog).is_empty());
    }

    #[test]
    fn turning_on_adds_closure() {
        let catalog = TestCatalog::new().service("prowlarr", &[]).service("sonarr", &["prowlarr"]);

        let next = DependencyResolver::apply_selection(
            &BTreeSet::new(),
            &ids(&["sonarr"]),
            true,
            &catalog,
        );

        assert_eq!(next, ids(&["prowlarr", "sonarr"]));
    }

    #[test]
    fn shared_dependency_survives_partial_removal() {
        let catalog =
            TestCatalog::new().service("d", &[]).service("a", &["d"]).service("b", &["d"]);
        let selected =
            DependencyResolver::apply_selection(&BTreeSet::new(), &ids(&["a", "b"]), true, &catalog);
        assert_eq!(selected, ids(&["a", "b", "d"]));

        let after_a = DependencyResolver::apply_selection(&selected, &ids(&["a"]), false, &catalog);
        assert_eq!(after_a, ids(&["b", "d"]));

        let after_b = DependencyResolver::apply_selection(&after_a, &ids(&["b"]), false, &catalog);
        assert!(after_b.is_empty());
    }

    #[test]
    fn removing_both_dependents_removes_shared_dependency() {
        let catalog =
            TestCatalog::new().service("d", &[]).service("a", &["d"]).service("b", &["d"]);

        let next = DependencyResolver::apply_selection(
            &ids(&["a", "b", "d"]),
            &ids(&["a", "b"]),
            false,
            &catalog,
        );

        assert!(next.is_empty());
    }

    #[test]
    fn removal_keeps_unrelated_services() {
        let catalog =
            TestCatalog::new().service("d", &[]).service("a", &["d"]).service("solo", &[]);

        let next = DependencyResolver::apply_selection(
            &ids(&["a", "d", "solo"]),
            &ids(&["a"]),
            false,
            &catalog,
        );

        assert_eq!(next, ids(&["solo"]));
    }

    #[test]
    fn removing_a_required_dependency_keeps_it() {
        let catalog = TestCatalog::new().service("d", &[]).service("b", &["d"]);

        let next = DependencyResolver::apply_selection(
            &ids(&["b", "d"]),
            &ids(&["d"]),
            false,
            &catalog,
        );

        assert_eq!(next, ids(&["b", "d"]));
    }

    #[test]
    fn pinned_dependency_is_not_pruned() {
        let catalog = TestCatalog::new().service("prowlarr", &[]).service("sonarr", &["prowlarr"]);

        let unpinned = DependencyResolver::apply_selection(
            &ids(&["prowlarr", "sonarr"]),
            &ids(&["sonarr"]),
            false,
            &catalog,
        );
        assert!(unpinned.is_empty());

        let pinned = DependencyResolver::apply_selection_with_pins(
            &ids(&["prowlarr", "sonarr"]),
            &ids(&["prowlarr", "sonarr"]),
            &ids(&["sonarr"]),
            false,
            &catalog,
        );
        assert_eq!(pinned, ids(&["prowlarr"]));
    }

    #[test]
    fn effective_set_adds_always_on_closure() {
        let catalog = TestCatalog::new()
            .service("db", &[])
            .always_on("proxy", &["db"])
            .service("app", &[]);

        let effective = DependencyResolver::effective_set(&ids(&["app"]), &catalog);

        assert_eq!(effective, ids(&["app", "db", "proxy"]));
    }

    fn reachable(catalog: &TestCatalog, id: &str) -> BTreeSet<String> {
        // Recursive reference walk; only used on acyclic catalogs.
        let mut out = BTreeSet::new();
        if let Some(service) = catalog.get(id) {
            for dep in &service.dependencies {
                out.insert(dep.to_string());
                out.extend(reachable(catalog, dep));
            }
        }
        out
    }

    // Acyclic catalogs: node i may only depend on nodes with a smaller index.
    fn dag_strategy(size: usize) -> impl Strategy<Value = TestCatalog> {
        prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..4), 1..size)
            .prop_map(|deps_list| {
                let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for (i, deps) in deps_list.iter().enumerate() {
                    let mut node_deps: Vec<String> = Vec::new();
                    if i > 0 {
                        for index in deps {
                            let dep = format!("s{}", index.index(i));
                            if !node_deps.contains(&dep) {
                                node_deps.push(dep);
                            }
                        }
                    }
                    edges.insert(format!("s{}", i), node_deps);
                }
                let mut catalog = TestCatalog::new();
                for (name, deps) in &edges {
                    let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
                    catalog = catalog.service(name, &deps);
                }
                catalog
            })
    }

    proptest! {
        #[test]
        fn closure_matches_reachability(catalog in dag_strategy(12)) {
            for name in catalog.names() {
                let closure = DependencyResolver::closure_of(name, &catalog);
                let closure_names: BTreeSet<String> =
                    closure.iter().map(ToString::to_string).collect();

                prop_assert!(!closure_names.contains(name));
                prop_assert_eq!(closure_names, reachable(&catalog, name));
            }
        }

        #[test]
        fn selection_stays_closed(
            catalog in dag_strategy(10),
            on in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
            off in any::<prop::sample::Index>(),
        ) {
            let all: Vec<ServiceId> =
                catalog.names().iter().map(|n| ServiceId::new(n).unwrap()).collect();
            let to_add: BTreeSet<ServiceId> =
                on.iter().map(|index| all[index.index(all.len())].clone()).collect();
            let selected =
                DependencyResolver::apply_selection(&BTreeSet::new(), &to_add, true, &catalog);

            let victim: BTreeSet<ServiceId> =
                std::iter::once(all[off.index(all.len())].clone()).collect();
            let after = DependencyResolver::apply_selection(&selected, &victim, false, &catalog);

            for id in selected.iter().chain(after.iter()) {
                if after.contains(id) {
                    for dep in DependencyResolver::closure_of(id, &catalog) {
                        prop_assert!(after.contains(&dep));
                    }
                }
            }
        }
    }
}
