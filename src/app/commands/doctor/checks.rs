//! Catalog consistency checks.

use std::collections::BTreeSet;

use crate::ports::ServiceCatalog;

use super::diagnostics::Diagnostics;

pub fn dependency_checks<C: ServiceCatalog>(catalog: &C, diagnostics: &mut Diagnostics) {
    for service in catalog.list_all() {
        for dep in &service.dependencies {
            if catalog.get(dep).is_none() {
                diagnostics.push_error(
                    service.id.as_str(),
                    format!("depends on unknown service '{}'", dep),
                );
            }
        }
    }
}

pub fn group_checks<C: ServiceCatalog>(catalog: &C, diagnostics: &mut Diagnostics) {
    let groups: BTreeSet<&str> = catalog.groups().iter().map(|group| group.id.as_str()).collect();
    for service in catalog.list_all() {
        if !groups.contains(service.group.as_str()) {
            diagnostics
                .push_error(service.id.as_str(), format!("unknown group '{}'", service.group));
        }
    }
}

pub fn exposure_checks<C: ServiceCatalog>(catalog: &C, diagnostics: &mut Diagnostics) {
    for service in catalog.list_all() {
        if service.internal && service.expose {
            diagnostics.push_warning(
                service.id.as_str(),
                "internal service is marked as exposed and will not be routed",
            );
        }
    }
}

pub fn field_checks<C: ServiceCatalog>(catalog: &C, diagnostics: &mut Diagnostics) {
    for service in catalog.list_all() {
        let mut seen = BTreeSet::new();
        for key in service.field_keys() {
            if !seen.insert(key) {
                diagnostics.push_warning(
                    service.id.as_str(),
                    format!("settings key '{}' is declared more than once", key),
                );
            }
        }
    }
}

pub fn cycle_checks<C: ServiceCatalog>(catalog: &C, diagnostics: &mut Diagnostics) {
    for cycle in find_cycles(catalog) {
        let mut path = cycle.clone();
        path.push(cycle[0].clone());
        diagnostics.push_error(cycle[0].as_str(), format!("dependency cycle: {}", path.join(" -> ")));
    }
}

/// Distinct dependency cycles, each rotated to start at its smallest identifier.
pub fn find_cycles<C: ServiceCatalog>(catalog: &C) -> BTreeSet<Vec<String>> {
    let mut found = BTreeSet::new();
    let mut done = BTreeSet::new();
    let mut stack = Vec::new();
    for service in catalog.list_all() {
        visit(service.id.as_str(), catalog, &mut stack, &mut done, &mut found);
    }
    found
}

fn visit<'a, C: ServiceCatalog>(
    id: &'a str,
    catalog: &'a C,
    stack: &mut Vec<&'a str>,
    done: &mut BTreeSet<&'a str>,
    found: &mut BTreeSet<Vec<String>>,
) {
    if done.contains(id) {
        return;
    }
    if let Some(start) = stack.iter().position(|entry| *entry == id) {
        let mut cycle: Vec<String> = stack[start..].iter().map(ToString::to_string).collect();
        if let Some(min) = cycle.iter().enumerate().min_by(|a, b| a.1.cmp(b.1)).map(|(i, _)| i) {
            cycle.rotate_left(min);
        }
        found.insert(cycle);
        return;
    }
    let Some(service) = catalog.get(id) else {
        return;
    };

    stack.push(id);
    for dep in &service.dependencies {
        visit(dep.as_str(), catalog, stack, done, found);
    }
    stack.pop();
    done.insert(id);
}
