mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use browser::{BrowserConfig, BrowserKind, RouterBridge, new_session};
use common::scenario::{ScenarioCtx, get_scenario, list_scenarios};
use common::{artifacts_dir, capture_artifacts, split_csv};
use logic::LogicTester;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Route store checks only (fast, no browser)
    Logic,
    /// Browser automation against a served build
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "devsecops-tester", version)]
#[command(
    about = "Navigation QA for the DevSecOps dashboard - route store checks and browser automation"
)]
struct Args {
    /// Test mode: logic (fast), browser (real page), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL of the dashboard (should include ?test=1 to expose the bridge)
    #[arg(long, default_value = "http://localhost:8080/?test=1")]
    base_url: String,

    /// Artifacts directory for screenshots and page dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

/// Outcome of one browser scenario run.
#[derive(Debug, Clone)]
struct BrowserOutcome {
    browser: &'static str,
    scenario: String,
    duration: Duration,
    error: Option<String>,
}

impl BrowserOutcome {
    /// Report row for a single browser run, named `scenario [browser]`.
    fn to_result(&self) -> logic::ScenarioResult {
        let passed = self.error.is_none();
        logic::ScenarioResult {
            scenario_name: format!("{} [{}]", self.scenario, self.browser),
            passed,
            iterations_run: 1,
            successful_iterations: usize::from(passed),
            failures: self.error.iter().cloned().collect(),
            average_duration: self.duration,
            performance_data: if passed { vec![self.duration] } else { Vec::new() },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);

    let logic_results = run_logic_scenarios(&args, &scenarios);
    let browser_outcomes = run_browser_scenarios(&args, &scenarios).await?;

    let mut results = logic_results;
    results.extend(browser_outcomes.iter().map(BrowserOutcome::to_result));
    write_reports(&args, &results, start_time)?;

    let browser_failed = summarize_browser_failures(&browser_outcomes);
    if browser_failed || results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut out = OutputTarget::new(args.output.as_deref())?;
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:22} {description}")?;
    }
    out.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🛡️  DevSecOps Navigation Tester".bright_cyan().bold());
    println!("{}", "=".repeat(32).cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn scenario_artifacts_dir(args: &Args, kind: BrowserKind, scenario: &str) -> String {
    artifacts_dir(&args.artifacts_dir, kind.label(), scenario)
}

fn run_logic_scenarios(args: &Args, scenarios: &[String]) -> Vec<logic::ScenarioResult> {
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return Vec::new();
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(args.verbose);
    scenarios
        .iter()
        .filter_map(|name| {
            let logic = get_scenario(name).and_then(|scenario| scenario.as_logic_scenario());
            if logic.is_none() {
                eprintln!("⚠️  No logic check for scenario {}", name.yellow());
            }
            logic
        })
        .map(|scenario| tester.run_scenario(&scenario, args.iterations))
        .collect()
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Result<Vec<BrowserOutcome>> {
    let mut outcomes = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return Ok(outcomes);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let cfg = build_browser_config(args);
    for name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&name) else {
            eprintln!("⚠️  Unknown browser: {}", name.yellow());
            continue;
        };

        let driver = match new_session(kind, &cfg).await {
            Ok(driver) => driver,
            Err(err) => {
                eprintln!("❌ Could not start {}: {err}", kind.label());
                continue;
            }
        };

        for scenario in scenarios {
            if let Some(outcome) = run_browser_scenario(args, kind, &driver, scenario).await {
                outcomes.push(outcome);
            }
        }

        if let Err(err) = driver.quit().await {
            log::warn!("closing {} session failed: {err}", kind.label());
        }
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    log::info!("{} browser runs, {failed} failed", outcomes.len());
    Ok(outcomes)
}

async fn run_browser_scenario(
    args: &Args,
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
    name: &str,
) -> Option<BrowserOutcome> {
    let Some(scenario) = get_scenario(name) else {
        eprintln!("⚠️  Unknown scenario: {}", name.yellow());
        return None;
    };

    let ctx = ScenarioCtx {
        base_url: args.base_url.clone(),
        bridge: RouterBridge::new(driver),
        verbose: args.verbose,
    };
    let label = kind.label();
    let started = Instant::now();
    let result = scenario.run_browser(driver, &ctx).await;
    let duration = started.elapsed();

    let error = match result {
        Ok(()) => {
            println!("✅ [{}] {name} - {duration:?}", label.green());
            None
        }
        Err(err) => {
            eprintln!("❌ [{}] {name} - {duration:?}: {err:#}", label.red());
            let dir = scenario_artifacts_dir(args, kind, name);
            match capture_artifacts(driver, &dir, &err).await {
                Ok(()) => eprintln!("   📁 Artifacts saved to {dir}"),
                Err(capture_err) => {
                    log::warn!("could not save artifacts to {dir}: {capture_err:#}");
                }
            }
            Some(format!("{err:#}"))
        }
    };

    if let Some(error) = &error {
        log::debug!("{name} failed on {label} after {duration:?}: {error}");
    }
    Some(BrowserOutcome {
        browser: label,
        scenario: name.to_string(),
        duration,
        error,
    })
}

/// Repeat browser failures after the report; returns whether there were any.
fn summarize_browser_failures(outcomes: &[BrowserOutcome]) -> bool {
    let failures: Vec<&BrowserOutcome> = outcomes.iter().filter(|o| o.error.is_some()).collect();
    if failures.is_empty() {
        return false;
    }
    eprintln!("{}", "Browser failures:".red().bold());
    for outcome in failures {
        eprintln!(
            "  • [{}] {} ({:?}): {}",
            outcome.browser,
            outcome.scenario,
            outcome.duration,
            outcome.error.as_deref().unwrap_or_default()
        );
    }
    true
}

fn write_reports(args: &Args, results: &[logic::ScenarioResult], start_time: Instant) -> Result<()> {
    let mut out = OutputTarget::new(args.output.as_deref())?;

    match (args.report, results.is_empty()) {
        (ReportFormat::Json, true) => writeln!(out, "[]")?,
        (ReportFormat::Json, false) => logic::reports::generate_json_report(&mut out, results)?,
        (ReportFormat::Markdown, true) => writeln!(
            out,
            "# DevSecOps Navigation Test Results\n\n_No scenarios executed._"
        )?,
        (ReportFormat::Markdown, false) => {
            logic::reports::generate_markdown_report(&mut out, results)?;
        }
        (ReportFormat::Console, empty) => {
            if empty {
                writeln!(out, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut out, results, start_time.elapsed())?;
            }
            writeln!(out)?;
            writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Report destination: `--output` file or stdout, buffered either way.
struct OutputTarget(BufWriter<Box<dyn Write>>);

impl OutputTarget {
    fn new(path: Option<&Path>) -> Result<Self> {
        let sink: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(stdout()),
        };
        Ok(Self(BufWriter::new(sink)))
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}
