pub mod reminder;

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::RuntimeError;

#[async_trait]
pub trait Worker: Send + Sync + 'static {
    fn name(&self) -> &str;
    async fn start(&self, shutdown: broadcast::Receiver<()>) -> Result<(), RuntimeError>;
    fn is_running(&self) -> bool;
}

pub struct WorkerPool {
    workers: HashMap<String, Box<dyn Worker>>,
    shutdown: broadcast::Sender<()>,
}

impl WorkerPool {
    pub fn new() -> Self {
        let (shutdown, _) = broadcast::channel(1);
        Self {
            workers: HashMap::new(),
            shutdown,
        }
    }

    pub fn add_worker<W: Worker + 'static>(&mut self, worker: W) {
        self.workers.insert(worker.name().to_string(), Box::new(worker));
    }

    pub async fn start_all(&self) -> Result<(), RuntimeError> {
        for (name, worker) in self.workers.iter() {
            info!("Starting worker {}", name);
            worker.start(self.shutdown.subscribe()).await?;
        }
        Ok(())
    }

    pub fn stop_all(&self) {
        info!("Stopping {} worker(s)", self.workers.len());
        let _ = self.shutdown.send(());
    }

    pub fn running(&self) -> usize {
        self.workers.values().filter(|worker| worker.is_running()).count()
    }
}
