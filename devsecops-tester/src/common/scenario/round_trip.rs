use anyhow::{Context, Result};
use devsecops_core::{FragmentSink, MemoryHistory, RouteKind, RouteStore, parse_fragment};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, load_fresh};

pub struct RoundTripScenario;

/// Ids that satisfy `kind`'s template.
fn sample_ids(kind: RouteKind) -> (Option<&'static str>, Option<&'static str>) {
    match kind.required_params() {
        0 => (None, None),
        1 => (Some("REC-001"), None),
        _ => (Some("PROJ-001"), Some("app-001")),
    }
}

impl RoundTripScenario {
    fn check_logic() -> Result<()> {
        let mut store = RouteStore::new(MemoryHistory::default());
        for kind in RouteKind::ALL {
            let (primary, secondary) = sample_ids(kind);
            let route = store.navigate_kind(kind, primary, secondary).clone();
            anyhow::ensure!(
                route.kind() == kind,
                "navigating to `{}` landed on `{}`",
                kind.name(),
                route.name()
            );
            let written = store.sink().read_fragment();
            let reparsed = parse_fragment(&written);
            anyhow::ensure!(
                reparsed == route,
                "`{}` wrote `{written}` which parses back as `{}`",
                kind.name(),
                reparsed.name()
            );
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for RoundTripScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_fresh(driver, ctx, "").await?;

        for kind in RouteKind::ALL {
            let (primary, secondary) = sample_ids(kind);
            let route = ctx
                .bridge
                .navigate(kind.name(), primary, secondary)
                .await
                .with_context(|| format!("navigating to {}", kind.name()))?;
            anyhow::ensure!(
                route.name == kind.name(),
                "navigating to `{}` landed on `{}`",
                kind.name(),
                route.name
            );

            let fragment = ctx.bridge.fragment().await?;
            let reparsed = parse_fragment(&fragment);
            anyhow::ensure!(
                reparsed.name() == route.name
                    && reparsed.primary_id() == route.primary_id.as_deref()
                    && reparsed.secondary_id() == route.secondary_id.as_deref(),
                "address bar `{fragment}` does not describe `{}`",
                route.name
            );

            if ctx.verbose {
                println!("  🔁 {} <-> {fragment}", route.name);
            }
        }
        Ok(())
    }
}

impl CombinedScenario for RoundTripScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "Every Route Round-Trips Through Its Fragment",
            Self::check_logic,
        ))
    }
}
