use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;

/// Route snapshot reported by `window.__devsecopsTest.route()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BridgeRoute {
    pub name: String,
    pub primary_id: Option<String>,
    pub secondary_id: Option<String>,
    pub fragment: String,
}

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct RouterBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> RouterBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__devsecopsTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__devsecopsTest is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    pub async fn route(&self) -> Result<BridgeRoute> {
        let result = self
            .driver
            .execute("return window.__devsecopsTest.route()", vec![])
            .await?;
        parse_route(result.json().clone())
    }

    /// Navigate through the app's store; returns the route it settled on.
    pub async fn navigate(
        &self,
        name: &str,
        primary_id: Option<&str>,
        secondary_id: Option<&str>,
    ) -> Result<BridgeRoute> {
        let result = self
            .driver
            .execute(
                "return window.__devsecopsTest.navigate(arguments[0], arguments[1], arguments[2])",
                vec![
                    Value::from(name),
                    primary_id.map_or(Value::Null, Value::from),
                    secondary_id.map_or(Value::Null, Value::from),
                ],
            )
            .await?;
        parse_route(result.json().clone())
    }

    /// The raw `location.hash`.
    pub async fn fragment(&self) -> Result<String> {
        let result = self
            .driver
            .execute("return window.__devsecopsTest.fragment()", vec![])
            .await?;
        Ok(result.json().as_str().unwrap_or_default().to_string())
    }

    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute("window.__devsecopsTest.reset()", vec![])
            .await?;
        Ok(())
    }

    /// Poll until the app reports route `name`, for hash changes that land
    /// asynchronously (back/forward, page loads).
    pub async fn wait_for_route(&self, name: &str, timeout: Duration) -> Result<BridgeRoute> {
        let deadline = Instant::now() + timeout;
        loop {
            let route = self.route().await?;
            if route.name == name {
                return Ok(route);
            }
            if Instant::now() >= deadline {
                bail!("expected route `{name}`, still on `{}` after {timeout:?}", route.name);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// `data-route` of the rendered screen.
    pub async fn rendered_route(&self) -> Result<String> {
        let screen = self.driver.find(By::Css("section.screen")).await?;
        screen
            .attr("data-route")
            .await?
            .context("screen has no data-route attribute")
    }
}

fn parse_route(value: Value) -> Result<BridgeRoute> {
    serde_json::from_value(value).context("parsing BridgeRoute")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bridge_snapshots() {
        let route = parse_route(json!({
            "name": "project-app-detail",
            "primary_id": "PROJ-001",
            "secondary_id": "app-002",
            "fragment": "project-app/PROJ-001/app-002"
        }))
        .unwrap();
        assert_eq!(route.name, "project-app-detail");
        assert_eq!(route.secondary_id.as_deref(), Some("app-002"));
    }

    #[test]
    fn null_snapshots_are_errors() {
        assert!(parse_route(Value::Null).is_err());
    }
}
