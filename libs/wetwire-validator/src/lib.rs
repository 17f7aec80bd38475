//! Validator & topological sort (spec.md §4.2).
//!
//! Accepts the list of discovered resources, verifies referential
//! integrity and acyclicity, and emits a deterministic deployment-safe
//! order via Kahn's algorithm with an insertion-order tiebreak.

mod error;

use std::collections::HashMap;

pub use error::ValidatorError;
use tracing::debug;
use wetwire_ir::DiscoveredResource;

/// Dependency-edge handling mode. Discovery over-approximates references
/// (it collects every identifier an initializer mentions, not just
/// resource names), so the default forward path from Discovery must
/// silently drop edges that don't name another resource. The
/// template-builder's direct `Add` entry point assumes its caller
/// already pre-filtered dependencies, so there every listed dependency
/// must resolve or the build fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyMode {
    /// Drop dependency edges that don't name another discovered resource.
    Lenient,
    /// Every dependency must resolve to another discovered resource.
    Strict,
}

/// Validate and order a set of discovered resources.
pub fn validate(
    resources: Vec<DiscoveredResource>,
    mode: DependencyMode,
) -> Result<Vec<DiscoveredResource>, ValidatorError> {
    let index_by_name = build_name_index(&resources)?;
    let resources = filter_dependencies(resources, &index_by_name, mode)?;
    detect_cycles(&resources)?;
    let order = topological_order(&resources);
    Ok(order.into_iter().map(|i| resources[i].clone()).collect())
}

fn build_name_index(
    resources: &[DiscoveredResource],
) -> Result<HashMap<String, usize>, ValidatorError> {
    let mut map = HashMap::with_capacity(resources.len());
    for (i, r) in resources.iter().enumerate() {
        if map.insert(r.name.clone(), i).is_some() {
            return Err(ValidatorError::DuplicateResource(r.name.clone()));
        }
    }
    Ok(map)
}

fn filter_dependencies(
    mut resources: Vec<DiscoveredResource>,
    index_by_name: &HashMap<String, usize>,
    mode: DependencyMode,
) -> Result<Vec<DiscoveredResource>, ValidatorError> {
    for resource in &mut resources {
        match mode {
            DependencyMode::Lenient => {
                resource
                    .dependencies
                    .retain(|dep| index_by_name.contains_key(dep));
            }
            DependencyMode::Strict => {
                let mut missing: Vec<String> = resource
                    .dependencies
                    .iter()
                    .filter(|dep| !index_by_name.contains_key(*dep))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    missing.sort();
                    missing.dedup();
                    return Err(ValidatorError::MissingDependency {
                        resource: resource.name.clone(),
                        missing,
                    });
                }
            }
        }
    }
    Ok(resources)
}

fn detect_cycles(resources: &[DiscoveredResource]) -> Result<(), ValidatorError> {
    let index_by_name: HashMap<&str, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InStack,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; resources.len()];
    let mut stack_path: Vec<String> = Vec::new();

    fn visit(
        i: usize,
        resources: &[DiscoveredResource],
        index_by_name: &HashMap<&str, usize>,
        marks: &mut Vec<Mark>,
        stack_path: &mut Vec<String>,
    ) -> Result<(), ValidatorError> {
        match marks[i] {
            Mark::Done => return Ok(()),
            Mark::InStack => {
                let start = stack_path
                    .iter()
                    .position(|n| n == &resources[i].name)
                    .unwrap_or(0);
                let mut cycle = stack_path[start..].to_vec();
                cycle.push(resources[i].name.clone());
                return Err(ValidatorError::CyclicDependency(cycle));
            }
            Mark::Unvisited => {}
        }

        marks[i] = Mark::InStack;
        stack_path.push(resources[i].name.clone());

        for dep in &resources[i].dependencies {
            if let Some(&j) = index_by_name.get(dep.as_str()) {
                visit(j, resources, index_by_name, marks, stack_path)?;
            }
        }

        stack_path.pop();
        marks[i] = Mark::Done;
        Ok(())
    }

    for i in 0..resources.len() {
        if marks[i] == Mark::Unvisited {
            visit(i, resources, &index_by_name, &mut marks, &mut stack_path)?;
        }
    }
    Ok(())
}

/// Kahn's algorithm, ties broken by insertion order (source-encounter
/// order, since `resources` is already in that order).
fn topological_order(resources: &[DiscoveredResource]) -> Vec<usize> {
    let index_by_name: HashMap<&str, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();

    let mut remaining: Vec<usize> = resources.iter().map(|r| r.dependencies.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); resources.len()];
    for (i, r) in resources.iter().enumerate() {
        for dep in &r.dependencies {
            if let Some(&j) = index_by_name.get(dep.as_str()) {
                dependents[j].push(i);
            }
        }
    }

    let mut emitted = vec![false; resources.len()];
    let mut order = Vec::with_capacity(resources.len());

    for _ in 0..resources.len() {
        let next = (0..resources.len()).find(|&i| !emitted[i] && remaining[i] == 0);
        let Some(i) = next else {
            debug!("topological_order: no zero-indegree node left; graph has a residual cycle");
            break;
        };
        emitted[i] = true;
        order.push(i);
        for &j in &dependents[i] {
            remaining[j] -= 1;
        }
    }

    order
}

/// Confirm every `dependsOn`-equivalent edge points to an earlier index,
/// exposed for the test suite and for callers that build the order
/// themselves.
pub fn is_topologically_sound(resources: &[DiscoveredResource]) -> bool {
    let position: HashMap<&str, usize> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();
    resources.iter().enumerate().all(|(i, r)| {
        r.dependencies
            .iter()
            .all(|d| position.get(d.as_str()).is_some_and(|&p| p < i))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wetwire_ir::{GoLiteral, TypedValue};

    fn resource(name: &str, deps: &[&str]) -> DiscoveredResource {
        DiscoveredResource::new(
            name,
            "Microsoft.Storage/storageAccounts",
            PathBuf::from("main.go"),
            1,
            deps.iter().map(|d| d.to_string()).collect(),
            TypedValue::new(GoLiteral::Composite {
                type_name: None,
                fields: vec![],
            }),
        )
    }

    #[test]
    fn linear_dependency_orders_a_before_b() {
        let resources = vec![resource("A", &[]), resource("B", &["A"])];
        let ordered = validate(resources, DependencyMode::Lenient).unwrap();
        assert_eq!(ordered[0].name, "A");
        assert_eq!(ordered[1].name, "B");
        assert!(is_topologically_sound(&ordered));
    }

    #[test]
    fn diamond_dependency_keeps_source_order_for_ties() {
        let resources = vec![
            resource("A", &[]),
            resource("B", &["A"]),
            resource("C", &["A"]),
            resource("D", &["B", "C"]),
        ];
        let ordered = validate(resources, DependencyMode::Lenient).unwrap();
        let names: Vec<&str> = ordered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn cycle_is_detected() {
        let resources = vec![resource("A", &["B"]), resource("B", &["A"])];
        let err = validate(resources, DependencyMode::Lenient).unwrap_err();
        assert!(matches!(err, ValidatorError::CyclicDependency(_)));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let resources = vec![resource("A", &[]), resource("A", &[])];
        let err = validate(resources, DependencyMode::Lenient).unwrap_err();
        assert_eq!(err, ValidatorError::DuplicateResource("A".to_string()));
    }

    #[test]
    fn strict_mode_reports_missing_dependency() {
        let resources = vec![resource("A", &["ghost"])];
        let err = validate(resources, DependencyMode::Strict).unwrap_err();
        match err {
            ValidatorError::MissingDependency { resource, missing } => {
                assert_eq!(resource, "A");
                assert_eq!(missing, vec!["ghost".to_string()]);
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }

    #[test]
    fn lenient_mode_drops_unknown_dependency() {
        let resources = vec![resource("A", &["not_a_resource"])];
        let ordered = validate(resources, DependencyMode::Lenient).unwrap();
        assert!(ordered[0].dependencies.is_empty());
    }
}
