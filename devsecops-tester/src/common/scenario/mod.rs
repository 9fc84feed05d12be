use anyhow::{Context, Result};
use devsecops_core::Route;
use std::fmt;
use std::sync::Arc;
use thirtyfour::prelude::*;

use crate::browser::{BridgeRoute, RouterBridge};
use crate::common::url_with_fragment;

pub mod deep_link;
pub mod history;
pub mod round_trip;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: RouterBridge<'a>,
    pub verbose: bool,
}

pub type LogicCheck = Arc<dyn Fn() -> Result<()> + Send + Sync>;

// Logic test scenario: a check run against the core route store
#[derive(Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    pub fn new(name: impl Into<String>, check: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn run(&self) -> Result<()> {
        (self.check)()
    }
}

impl fmt::Debug for TestScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestScenario")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// The route a scenario expects to land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedRoute {
    pub name: &'static str,
    pub primary_id: Option<&'static str>,
    pub secondary_id: Option<&'static str>,
}

impl ExpectedRoute {
    pub const fn flat(name: &'static str) -> Self {
        Self {
            name,
            primary_id: None,
            secondary_id: None,
        }
    }

    pub const fn with_id(name: &'static str, primary_id: &'static str) -> Self {
        Self {
            name,
            primary_id: Some(primary_id),
            secondary_id: None,
        }
    }

    pub fn check_route(&self, route: &Route) -> Result<()> {
        self.check_parts(route.name(), route.primary_id(), route.secondary_id())
    }

    pub fn check_bridge(&self, route: &BridgeRoute) -> Result<()> {
        self.check_parts(
            &route.name,
            route.primary_id.as_deref(),
            route.secondary_id.as_deref(),
        )
    }

    fn check_parts(&self, name: &str, primary: Option<&str>, secondary: Option<&str>) -> Result<()> {
        anyhow::ensure!(
            name == self.name,
            "expected route `{}`, got `{name}`",
            self.name
        );
        anyhow::ensure!(
            primary == self.primary_id,
            "route `{name}`: expected primary id {:?}, got {primary:?}",
            self.primary_id
        );
        anyhow::ensure!(
            secondary == self.secondary_id,
            "route `{name}`: expected secondary id {:?}, got {secondary:?}",
            self.secondary_id
        );
        Ok(())
    }
}

/// Load the app cold with `fragment` already in the URL. The refresh forces a
/// full page load even when only the fragment differs from the open page.
pub async fn load_fresh(driver: &WebDriver, ctx: &ScenarioCtx<'_>, fragment: &str) -> Result<()> {
    let url = url_with_fragment(&ctx.base_url, fragment);
    driver
        .goto(&url)
        .await
        .with_context(|| format!("loading {url}"))?;
    driver.refresh().await.context("reloading page")?;
    driver
        .find(By::Css("section.screen"))
        .await
        .context("app never rendered a screen")?;
    ctx.bridge.ensure_available().await
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "cold-deep-link" | "cold" => Some(Box::new(deep_link::cold_deep_link())),
        "nested-deep-link" | "nested" => Some(Box::new(deep_link::nested_deep_link())),
        "invalid-id-recovery" | "invalid-id" => Some(Box::new(deep_link::invalid_id_recovery())),
        "garbage-fragment" | "garbage" => Some(Box::new(deep_link::garbage_fragment())),
        "back-navigation" | "back" => Some(Box::new(history::BackNavigationScenario)),
        "round-trip" | "roundtrip" => Some(Box::new(round_trip::RoundTripScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("cold-deep-link", "Cold Deep Link to a List"),
        ("nested-deep-link", "Nested Deep Link to an App"),
        ("back-navigation", "Browser Back Restores the Previous Screen"),
        ("invalid-id-recovery", "Unknown Ids Still Resolve"),
        ("garbage-fragment", "Garbage Fragments Show the Dashboard"),
        ("round-trip", "Every Route Round-Trips Through Its Fragment"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsecops_core::parse_fragment;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, _) in list_scenarios() {
            assert!(get_scenario(key).is_some(), "{key}");
        }
        assert!(get_scenario("SMOKE").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn every_scenario_has_a_passing_logic_check() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key)
                .and_then(|combined| combined.as_logic_scenario())
                .unwrap_or_else(|| panic!("{key} has no logic check"));
            scenario
                .run()
                .unwrap_or_else(|err| panic!("{key} failed: {err:#}"));
        }
    }

    #[test]
    fn expected_routes_report_mismatches() {
        let expected = ExpectedRoute::with_id("app-detail", "app-001");
        assert!(expected.check_route(&parse_fragment("project-apps/app-001")).is_ok());

        let err = expected
            .check_route(&parse_fragment("project-apps/app-002"))
            .unwrap_err();
        assert!(err.to_string().contains("primary id"));

        let err = expected.check_route(&parse_fragment("incidents")).unwrap_err();
        assert!(err.to_string().contains("expected route `app-detail`"));
    }

    #[test]
    fn bridge_snapshots_are_checked_like_routes() {
        let snapshot = BridgeRoute {
            name: "incidents".into(),
            primary_id: None,
            secondary_id: None,
            fragment: "#incidents".into(),
        };
        assert!(ExpectedRoute::flat("incidents").check_bridge(&snapshot).is_ok());
        assert!(ExpectedRoute::flat("projects").check_bridge(&snapshot).is_err());
    }
}
