use anyhow::Result;
use devsecops_core::{FragmentSink, MemoryHistory, RouteStore, normalize_fragment};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ExpectedRoute, ScenarioCtx, TestScenario, load_fresh};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// A page load with a fragment already in the URL.
#[derive(Debug, Clone, Copy)]
pub struct DeepLinkScenario {
    name: &'static str,
    fragment: &'static str,
    expected: ExpectedRoute,
}

impl DeepLinkScenario {
    pub const fn new(name: &'static str, fragment: &'static str, expected: ExpectedRoute) -> Self {
        Self {
            name,
            fragment,
            expected,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn check_logic(self) -> Result<()> {
        let store = RouteStore::new(MemoryHistory::new(self.fragment));
        self.expected.check_route(store.current())?;
        anyhow::ensure!(
            store.sink().read_fragment() == self.fragment,
            "resolving `{}` rewrote the fragment to `{}`",
            self.fragment,
            store.sink().read_fragment()
        );
        Ok(())
    }
}

pub const fn cold_deep_link() -> DeepLinkScenario {
    DeepLinkScenario::new(
        "Cold Deep Link to a List",
        "incidents",
        ExpectedRoute::flat("incidents"),
    )
}

pub const fn nested_deep_link() -> DeepLinkScenario {
    DeepLinkScenario::new(
        "Nested Deep Link to an App",
        "project-apps/app-001",
        ExpectedRoute::with_id("app-detail", "app-001"),
    )
}

pub const fn invalid_id_recovery() -> DeepLinkScenario {
    DeepLinkScenario::new(
        "Unknown Ids Still Resolve",
        "project-apps/invalid-app",
        ExpectedRoute::with_id("app-detail", "invalid-app"),
    )
}

pub const fn garbage_fragment() -> DeepLinkScenario {
    DeepLinkScenario::new(
        "Garbage Fragments Show the Dashboard",
        "garbage-not-a-route",
        ExpectedRoute::flat("dashboard"),
    )
}

#[async_trait::async_trait]
impl BrowserScenario for DeepLinkScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_fresh(driver, ctx, self.fragment).await?;

        let route = ctx
            .bridge
            .wait_for_route(self.expected.name, SETTLE_TIMEOUT)
            .await?;
        self.expected.check_bridge(&route)?;
        if ctx.verbose {
            println!("  🔗 #{} resolved to {route:?}", self.fragment);
        }

        let rendered = ctx.bridge.rendered_route().await?;
        anyhow::ensure!(
            rendered == self.expected.name,
            "store is on `{}` but the page shows `{rendered}`",
            self.expected.name
        );

        let fragment = ctx.bridge.fragment().await?;
        anyhow::ensure!(
            normalize_fragment(&fragment) == self.fragment,
            "address bar changed from `#{}` to `{fragment}` on load",
            self.fragment
        );

        Ok(())
    }
}

impl CombinedScenario for DeepLinkScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        let scenario = *self;
        Some(TestScenario::new(self.name, move || scenario.check_logic()))
    }
}
