use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::models::{ClosedPut, OptionContract};

/// What one run of the strategy looked at and did.
#[derive(Debug, Serialize)]
struct RunRecord {
    started_at: DateTime<Utc>,
    filtered_symbols: Vec<String>,
    put_candidates: Vec<OptionContract>,
    call_candidates: Vec<OptionContract>,
    sold_puts: Vec<OptionContract>,
    sold_calls: Vec<OptionContract>,
    closed_puts: Vec<ClosedPut>,
}

/// Side-effect-only sink for strategy observations. Accumulates one run
/// record behind a mutex so any stage of the cycle can log through `&self`,
/// then writes a JSON file on `save`. Recording never fails the strategy;
/// only `save` can error, at the top level.
pub struct StrategyJournal {
    dir: PathBuf,
    record: Mutex<RunRecord>,
}

impl StrategyJournal {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            record: Mutex::new(RunRecord {
                started_at: Utc::now(),
                filtered_symbols: Vec::new(),
                put_candidates: Vec::new(),
                call_candidates: Vec::new(),
                sold_puts: Vec::new(),
                sold_calls: Vec::new(),
                closed_puts: Vec::new(),
            }),
        }
    }

    pub async fn set_filtered_symbols(&self, symbols: &[String]) {
        self.record.lock().await.filtered_symbols = symbols.to_vec();
    }

    pub async fn log_put_candidates(&self, contracts: &[OptionContract]) {
        self.record
            .lock()
            .await
            .put_candidates
            .extend_from_slice(contracts);
    }

    pub async fn log_call_candidates(&self, contracts: &[OptionContract]) {
        self.record
            .lock()
            .await
            .call_candidates
            .extend_from_slice(contracts);
    }

    pub async fn log_sold_put(&self, contract: &OptionContract) {
        self.record.lock().await.sold_puts.push(contract.clone());
    }

    pub async fn log_sold_call(&self, contract: &OptionContract) {
        self.record.lock().await.sold_calls.push(contract.clone());
    }

    pub async fn log_closed_puts(&self, closed: &[ClosedPut]) {
        self.record
            .lock()
            .await
            .closed_puts
            .extend_from_slice(closed);
    }

    /// Write the run record as pretty JSON, one file per run.
    pub async fn save(&self) -> anyhow::Result<PathBuf> {
        let record = self.record.lock().await;
        let stamp = record.started_at.format("%Y%m%dT%H%M%SZ");
        let path = self.dir.join(format!("wheel-run-{stamp}.json"));

        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&*record)?;
        std::fs::write(&path, json)?;

        Ok(path)
    }
}
