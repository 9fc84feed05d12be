use anyhow::{Context, Result};
use devsecops_core::{MemoryHistory, Route, RouteStore};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ExpectedRoute, ScenarioCtx, TestScenario, load_fresh};

const DASHBOARD: ExpectedRoute = ExpectedRoute::flat("dashboard");
const INCIDENTS: ExpectedRoute = ExpectedRoute::flat("incidents");

pub struct SmokeScenario;

impl SmokeScenario {
    fn check_logic() -> Result<()> {
        let mut store = RouteStore::new(MemoryHistory::default());
        DASHBOARD.check_route(store.current())?;

        let notified = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&notified);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        INCIDENTS.check_route(store.navigate_to_route(INCIDENTS.name, None, None))?;
        store.navigate_to_route(INCIDENTS.name, None, None);
        anyhow::ensure!(
            notified.get() == 1,
            "expected one change notification, got {}",
            notified.get()
        );

        anyhow::ensure!(store.unsubscribe(id), "listener was not registered");
        store.navigate_to_route("projects", None, None);
        anyhow::ensure!(notified.get() == 1, "unsubscribed listener still notified");

        store.reset();
        anyhow::ensure!(store.current() == &Route::dashboard(), "reset left a route behind");
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_fresh(driver, ctx, "").await?;
        ctx.bridge.reset().await?;
        DASHBOARD.check_bridge(&ctx.bridge.route().await?)?;

        if ctx.verbose {
            println!("  🌐 Browser loaded, bridge connected");
        }

        let link = driver
            .find(By::Css("a[data-section='incidents']"))
            .await
            .context("header has no incidents link")?;
        link.click().await?;
        if ctx.verbose {
            println!("  🖱️  Clicked the incidents link");
        }

        let route = ctx
            .bridge
            .wait_for_route(INCIDENTS.name, Duration::from_secs(5))
            .await?;
        INCIDENTS.check_bridge(&route)?;

        let rendered = ctx.bridge.rendered_route().await?;
        anyhow::ensure!(
            rendered == INCIDENTS.name,
            "store is on incidents but the page shows `{rendered}`"
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke Test", Self::check_logic))
    }
}
