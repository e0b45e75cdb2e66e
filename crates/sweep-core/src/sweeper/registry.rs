//! Sweeper registry and dependency-ordered runner.

use anyhow::{Context, Result};
use std::collections::HashSet;

use super::{SweepReport, Sweeper};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("sweeper {0:?} is already registered")]
    Duplicate(String),
    #[error("unknown sweeper {0:?}")]
    Unknown(String),
    #[error("sweeper {sweeper:?} depends on unknown sweeper {dependency:?}")]
    UnknownDependency { sweeper: String, dependency: String },
    #[error("dependency cycle through sweeper {0:?}")]
    Cycle(String),
}

/// Owned set of sweepers, in registration order.
#[derive(Default)]
pub struct SweeperRegistry {
    sweepers: Vec<Box<dyn Sweeper>>,
}

impl SweeperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sweeper. Names must be unique.
    pub fn register(&mut self, sweeper: Box<dyn Sweeper>) -> Result<(), RegistryError> {
        if self.get(sweeper.name()).is_some() {
            return Err(RegistryError::Duplicate(sweeper.name().to_string()));
        }
        self.sweepers.push(sweeper);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Sweeper> {
        self.sweepers
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sweepers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sweepers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Sweeper> {
        self.sweepers.iter().map(|s| s.as_ref())
    }

    /// Execution order for the selected sweepers (all when `only` is empty):
    /// every dependency comes before its dependents and each sweeper appears once.
    pub fn plan(&self, only: &[String]) -> Result<Vec<&dyn Sweeper>, RegistryError> {
        let roots: Vec<&str> = if only.is_empty() {
            self.sweepers.iter().map(|s| s.name()).collect()
        } else {
            only.iter().map(String::as_str).collect()
        };

        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut visiting = HashSet::new();
        for name in roots {
            let sweeper = self
                .get(name)
                .ok_or_else(|| RegistryError::Unknown(name.to_string()))?;
            self.visit(sweeper, &mut visiting, &mut done, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        sweeper: &'a dyn Sweeper,
        visiting: &mut HashSet<String>,
        done: &mut HashSet<String>,
        order: &mut Vec<&'a dyn Sweeper>,
    ) -> Result<(), RegistryError> {
        let name = sweeper.name();
        if done.contains(name) {
            return Ok(());
        }
        if !visiting.insert(name.to_string()) {
            return Err(RegistryError::Cycle(name.to_string()));
        }
        for dep in sweeper.dependencies() {
            let dep_sweeper = self
                .get(dep)
                .ok_or_else(|| RegistryError::UnknownDependency {
                    sweeper: name.to_string(),
                    dependency: dep.clone(),
                })?;
            self.visit(dep_sweeper, visiting, done, order)?;
        }
        visiting.remove(name);
        done.insert(name.to_string());
        order.push(sweeper);
        Ok(())
    }
}

/// Run the selected sweepers (all when `only` is empty) against `region` in
/// dependency order. Stops at the first failing sweeper.
pub fn run_sweepers(
    registry: &SweeperRegistry,
    region: &str,
    only: &[String],
) -> Result<Vec<(String, SweepReport)>> {
    let plan = registry.plan(only)?;
    tracing::info!(region, count = plan.len(), "running sweepers");
    let mut reports = Vec::with_capacity(plan.len());
    for sweeper in plan {
        let name = sweeper.name();
        tracing::debug!(region, sweeper = name, "sweeping");
        let report = sweeper
            .sweep(region)
            .with_context(|| format!("sweeper {} failed in {}", name, region))?;
        if report.skipped {
            tracing::warn!(region, sweeper = name, "sweep skipped");
        } else {
            tracing::info!(
                region,
                sweeper = name,
                deleted = report.deleted.len(),
                "sweep complete"
            );
        }
        reports.push((name.to_string(), report));
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recording {
        name: String,
        deps: Vec<String>,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Sweeper for Recording {
        fn name(&self) -> &str {
            &self.name
        }

        fn dependencies(&self) -> &[String] {
            &self.deps
        }

        fn sweep(&self, region: &str) -> Result<SweepReport> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}@{}", self.name, region));
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(SweepReport {
                deleted: vec![format!("{}-1", self.name)],
                skipped: false,
            })
        }
    }

    fn sweeper(name: &str, deps: &[&str], log: &Arc<Mutex<Vec<String>>>) -> Box<dyn Sweeper> {
        Box::new(Recording {
            name: name.to_string(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            log: Arc::clone(log),
            fail: false,
        })
    }

    #[test]
    fn duplicate_names_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(sweeper("a", &[], &log)).unwrap();
        assert_eq!(
            reg.register(sweeper("a", &[], &log)),
            Err(RegistryError::Duplicate("a".into()))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn dependencies_run_first_and_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(sweeper("launch_configuration", &["autoscaling_group"], &log))
            .unwrap();
        reg.register(sweeper("autoscaling_group", &[], &log)).unwrap();
        reg.register(sweeper("placement_group", &["autoscaling_group"], &log))
            .unwrap();

        let reports = run_sweepers(&reg, "us-west-2", &[]).unwrap();
        let names: Vec<&str> = reports.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["autoscaling_group", "launch_configuration", "placement_group"]
        );
        assert_eq!(
            *log.lock().unwrap(),
            [
                "autoscaling_group@us-west-2",
                "launch_configuration@us-west-2",
                "placement_group@us-west-2"
            ]
        );
    }

    #[test]
    fn filter_pulls_in_dependencies() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(sweeper("a", &[], &log)).unwrap();
        reg.register(sweeper("b", &["a"], &log)).unwrap();
        reg.register(sweeper("c", &[], &log)).unwrap();
        let plan: Vec<&str> = reg
            .plan(&["b".to_string()])
            .unwrap()
            .into_iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(plan, ["a", "b"]);
    }

    #[test]
    fn unknown_filter_and_dependency() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(sweeper("a", &["missing"], &log)).unwrap();
        assert!(matches!(
            reg.plan(&["nope".to_string()]),
            Err(RegistryError::Unknown(_))
        ));
        assert!(matches!(
            reg.plan(&[]),
            Err(RegistryError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn cycle_detected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(sweeper("a", &["b"], &log)).unwrap();
        reg.register(sweeper("b", &["a"], &log)).unwrap();
        assert!(matches!(reg.plan(&[]), Err(RegistryError::Cycle(_))));
    }

    #[test]
    fn failure_stops_run_with_context() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut reg = SweeperRegistry::new();
        reg.register(Box::new(Recording {
            name: "bad".into(),
            deps: vec![],
            log: Arc::clone(&log),
            fail: true,
        }))
        .unwrap();
        reg.register(sweeper("after", &["bad"], &log)).unwrap();
        let err = run_sweepers(&reg, "eu-west-1", &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("sweeper bad failed in eu-west-1"));
        assert_eq!(*log.lock().unwrap(), ["bad@eu-west-1"]);
    }
}
