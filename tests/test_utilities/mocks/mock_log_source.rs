use async_trait::async_trait;
use pullwatch::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock LogSource serving fixed lines and recording the requested window
#[derive(Clone)]
pub struct MockLogSource {
    lines: Vec<String>,
    should_fail: bool,
    requested: Arc<Mutex<Vec<Period>>>,
}

#[allow(dead_code)]
impl MockLogSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            should_fail: false,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builds CRI-O style lines for the given references
    pub fn with_pulls(references: &[&str]) -> Self {
        let lines: Vec<String> = references
            .iter()
            .map(|r| {
                format!(
                    "Jan 15 10:00:00 node-1 crio[812]: time=\"2024-01-15T10:00:00Z\" level=info msg=\"Pulled image: {}\" id=abc",
                    r
                )
            })
            .collect();
        Self {
            lines,
            should_fail: false,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            lines: Vec::new(),
            should_fail: true,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested_periods(&self) -> Vec<Period> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    fn describe(&self) -> String {
        "mock journal".to_string()
    }

    async fn fetch_log_lines(&self, since: &Period) -> Result<Vec<String>> {
        self.requested.lock().unwrap().push(since.clone());
        if self.should_fail {
            anyhow::bail!("journalctl: No such file or directory");
        }
        Ok(self.lines.clone())
    }
}
