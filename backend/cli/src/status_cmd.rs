//! CLI Status Command
//!
//! Queries a running relay's health endpoint.

use anyhow::{bail, Context, Result};

use paperforge_gateway::HealthReport;

use crate::terminal_output::{note_error, note_success, note_warn, render_table, Column};

pub async fn run(url: &str) -> Result<()> {
    let endpoint = format!("{}/api/health", url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let response = match client.get(&endpoint).send().await {
        Ok(resp) => resp,
        Err(e) => {
            note_error(&format!("PaperForge is not reachable at {url}"));
            return Err(e).context("Health request failed");
        }
    };

    if !response.status().is_success() {
        bail!("Health endpoint returned {}", response.status());
    }

    let report: HealthReport = response
        .json()
        .await
        .context("Health endpoint returned unexpected JSON")?;

    let rows = vec![
        vec!["status".to_string(), report.status.clone()],
        vec!["version".to_string(), report.version.clone()],
        vec!["provider".to_string(), report.provider.clone()],
        vec!["model".to_string(), report.model.clone()],
        vec!["configured".to_string(), report.configured.to_string()],
    ];
    print!("{}", render_table(&[Column::left("Field"), Column::left("Value")], &rows));

    if report.configured {
        note_success(&format!("{} is up at {url}", report.service));
    } else {
        note_warn(&format!(
            "{} is up but has no API key for {}; every page will fail",
            report.service, report.provider
        ));
    }
    Ok(())
}
