//! Pipeline submission.
//!
//! Serializes the current graph and posts it to the validation service,
//! which counts nodes and edges and checks the graph forms a DAG. The
//! request is blocking; the caller runs it on a worker thread.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Node, PipelineGraph};

pub const DEFAULT_PARSE_URL: &str = "http://localhost:8000/pipelines/parse";

/// Upper bound on the whole request, so a stalled service releases the
/// worker thread instead of leaving the spinner up forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Validation endpoint, overridable with `PIPELINE_PARSE_URL`.
pub fn parse_url() -> String {
    std::env::var("PIPELINE_PARSE_URL").unwrap_or_else(|_| DEFAULT_PARSE_URL.to_string())
}

#[derive(Serialize)]
struct SubmitPayload<'a> {
    nodes: Vec<&'a Node>,
    edges: &'a [Edge],
}

/// Verdict returned by the validation service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PipelineAnalysis {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl PipelineAnalysis {
    /// User-facing summary shown in the result window.
    pub fn summary(&self) -> String {
        format!(
            "Number of Nodes: {}\nNumber of Edges: {}\nIs Valid DAG: {}\n\n{}",
            self.num_nodes,
            self.num_edges,
            if self.is_dag { "Yes" } else { "No" },
            if self.is_dag {
                "Your pipeline is valid!"
            } else {
                "Warning: Your pipeline contains cycles!"
            }
        )
    }
}

pub fn submit_pipeline(url: &str, graph: &PipelineGraph) -> Result<PipelineAnalysis> {
    let payload = SubmitPayload {
        nodes: graph.nodes.values().collect(),
        edges: &graph.edges,
    };
    log::info!(
        "submitting pipeline: {} nodes, {} edges -> {}",
        payload.nodes.len(),
        payload.edges.len(),
        url
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build http client")?;
    let response = client
        .post(url)
        .json(&payload)
        .send()
        .context("pipeline validation request failed")?
        .error_for_status()
        .context("pipeline validation service returned an error")?;

    response
        .json::<PipelineAnalysis>()
        .context("malformed validation response")
}
