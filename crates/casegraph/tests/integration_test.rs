//! Full runs against a mock feed server.

use casegraph::CaseGraphApp;
use casegraph_common::test_utils::{create_temp_dir, feed_fixtures, init_test_logging};
use casegraph_common::{CaseGraphError, Result};
use casegraph_config::{Config, ConfigLoader, MarkerConfig};
use casegraph_graphs::{ChartData, ChartRenderer, RenderedChart};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a placeholder file instead of a PNG.
#[derive(Default)]
struct StubRenderer {
    calls: AtomicUsize,
}

impl ChartRenderer for StubRenderer {
    fn render_to_file(&self, chart: &ChartData, path: &Path) -> Result<RenderedChart> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, chart.title.as_bytes())?;
        Ok(RenderedChart {
            path: path.to_path_buf(),
            width: chart.width,
            height: chart.height,
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

async fn mock_feed(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeseries.json"))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

fn sample_feed() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(feed_fixtures::sample_payload(), "application/json")
}

fn config_for(url: String, output: &Path) -> Config {
    let mut config = Config::default();
    config.source.url = url;
    config.chart.output = output.to_path_buf();
    config.chart.markers = vec![MarkerConfig {
        label: "First case detected".to_string(),
        date: "2020-01-23".to_string(),
        color: "PEACHPUFF".to_string(),
    }];
    config
}

#[tokio::test]
async fn test_run_writes_chart_for_configured_country() {
    init_test_logging();
    let server = mock_feed(sample_feed()).await;
    let url = format!("{}/timeseries.json", server.uri());
    let temp_dir = create_temp_dir();
    let output = temp_dir.path().join("charts").join("singapore.png");

    let config = config_for(url, &output);
    config.validate().unwrap();
    let renderer = StubRenderer::default();
    let report = CaseGraphApp::new(config).run(&renderer).await.unwrap();

    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.rendered.path, output);
    assert!(output.exists());
    assert_eq!(report.chart.title, "No. of cases in Singapore, daily");
    assert_eq!(report.chart.lines[0].values, vec![0, 1, 3, 7, 13]);
}

#[tokio::test]
async fn test_run_other_country_from_yaml() {
    init_test_logging();
    let server = mock_feed(sample_feed()).await;
    let url = format!("{}/timeseries.json", server.uri());
    let temp_dir = create_temp_dir();
    let output = temp_dir.path().join("malaysia.png");

    let yaml = format!(
        "source:\n  url: {url}\ndata:\n  country: Malaysia\nchart:\n  output: {}\n  markers: []\n",
        output.display()
    );
    let config_path = temp_dir.path().join("casegraph.yaml");
    std::fs::write(&config_path, yaml).unwrap();

    let config = ConfigLoader::read_file(&config_path).unwrap();
    config.validate().unwrap();
    let report = CaseGraphApp::new(config)
        .run(&StubRenderer::default())
        .await
        .unwrap();

    assert_eq!(report.chart.title, "No. of cases in Malaysia, daily");
    assert_eq!(report.chart.latest_labels[0].text, "4");
}

#[tokio::test]
async fn test_unknown_country_stops_before_render() {
    init_test_logging();
    let server = mock_feed(sample_feed()).await;
    let url = format!("{}/timeseries.json", server.uri());
    let temp_dir = create_temp_dir();

    let mut config = config_for(url, &temp_dir.path().join("x.png"));
    config.data.country = "Atlantis".to_string();
    let renderer = StubRenderer::default();
    let error = CaseGraphApp::new(config).run(&renderer).await.unwrap_err();

    assert!(matches!(error, CaseGraphError::UnknownCountry { .. }));
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_fatal() {
    init_test_logging();
    let server = mock_feed(ResponseTemplate::new(500)).await;
    let url = format!("{}/timeseries.json", server.uri());
    let temp_dir = create_temp_dir();

    let config = config_for(url, &temp_dir.path().join("x.png"));
    let renderer = StubRenderer::default();
    let error = CaseGraphApp::new(config).run(&renderer).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}
