use anyhow::{Context, Result};
use devsecops_core::{MemoryHistory, RouteStore};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ExpectedRoute, ScenarioCtx, TestScenario, load_fresh};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);
const FIRST: ExpectedRoute = ExpectedRoute::flat("change-requests");
const SECOND: ExpectedRoute = ExpectedRoute::flat("project-apps");

pub struct BackNavigationScenario;

impl BackNavigationScenario {
    fn check_logic() -> Result<()> {
        let mut store = RouteStore::new(MemoryHistory::default());
        FIRST.check_route(store.navigate_to_route(FIRST.name, None, None))?;
        SECOND.check_route(store.navigate_to_route(SECOND.name, None, None))?;

        let restored = store.go_back().context("history has no previous entry")?;
        FIRST.check_route(restored)?;

        let forward = store.go_forward().context("history has no next entry")?;
        SECOND.check_route(forward)?;

        // A bare fragment-change event, as the browser delivers it.
        FIRST.check_route(store.handle_fragment_change(FIRST.name))
    }
}

#[async_trait::async_trait]
impl BrowserScenario for BackNavigationScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_fresh(driver, ctx, "").await?;

        FIRST.check_bridge(&ctx.bridge.navigate(FIRST.name, None, None).await?)?;
        SECOND.check_bridge(&ctx.bridge.navigate(SECOND.name, None, None).await?)?;
        if ctx.verbose {
            println!("  🧭 Navigated {} -> {}", FIRST.name, SECOND.name);
        }

        driver.back().await.context("browser back")?;
        let route = ctx.bridge.wait_for_route(FIRST.name, SETTLE_TIMEOUT).await?;
        FIRST.check_bridge(&route)?;
        if ctx.verbose {
            println!("  ⬅️  Back restored {}", route.name);
        }

        driver.forward().await.context("browser forward")?;
        let route = ctx.bridge.wait_for_route(SECOND.name, SETTLE_TIMEOUT).await?;
        SECOND.check_bridge(&route)?;

        let rendered = ctx.bridge.rendered_route().await?;
        anyhow::ensure!(
            rendered == SECOND.name,
            "after forward the page shows `{rendered}`"
        );
        Ok(())
    }
}

impl CombinedScenario for BackNavigationScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "Browser Back Restores the Previous Screen",
            Self::check_logic,
        ))
    }
}
