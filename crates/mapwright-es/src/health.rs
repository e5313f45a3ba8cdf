//! Cluster health reporting.

use serde::Deserialize;

/// Minimum active-shard percentage considered healthy.
const HEALTHY_SHARD_PERCENT: f64 = 50.0;

/// Reported cluster color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HealthStatus {
    /// All shards allocated.
    Green,
    /// All primaries allocated, some replicas are not.
    Yellow,
    /// At least one primary is unallocated.
    Red,
    /// A status this client does not know about.
    Unknown,
}

impl From<String> for HealthStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "green" => HealthStatus::Green,
            "yellow" => HealthStatus::Yellow,
            "red" => HealthStatus::Red,
            _ => HealthStatus::Unknown,
        }
    }
}

/// The `GET /_cluster/health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterHealth {
    /// Cluster name.
    pub cluster_name: String,
    /// Reported color.
    pub status: HealthStatus,
    /// Whether the health call itself timed out.
    pub timed_out: bool,
    /// Node count.
    pub number_of_nodes: u32,
    /// Allocated primary shards.
    pub active_primary_shards: u32,
    /// Allocated shards, primaries and replicas.
    pub active_shards: u32,
    /// Shards currently initializing.
    pub initializing_shards: u32,
    /// Shards with no allocation.
    pub unassigned_shards: u32,
    /// Unassigned shards whose allocation is delayed.
    pub delayed_unassigned_shards: u32,
    /// Pending cluster-level tasks.
    pub number_of_pending_tasks: u32,
    /// In-flight shard fetches.
    pub number_of_in_flight_fetch: u32,
    /// Longest task queue wait, in milliseconds.
    pub task_max_waiting_in_queue_millis: u64,
    /// Active shards as a percentage of the total.
    pub active_shards_percent_as_number: f64,
}

impl ClusterHealth {
    /// Health predicate: status is yellow or green **and** at least
    /// half the shards are active. Both conditions are required.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Green | HealthStatus::Yellow)
            && self.active_shards_percent_as_number >= HEALTHY_SHARD_PERCENT
    }
}
