use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::TerrainError;
use crate::terrain::mesh::{TerrainConfig, TerrainMesh};

pub enum TerrainCommand {
    Build(TerrainConfig),
    Stop,
}

pub enum TerrainResult {
    Built(TerrainMesh),
    Failed(TerrainError),
}

/// Off-thread build facade for interactive consumers. Each build runs
/// the synchronous mesh pipeline on the worker; results are polled with
/// `try_recv_result` so a render loop never blocks on terrain work.
pub struct TerrainEngine {
    tx_cmd: Sender<TerrainCommand>,
    rx_result: Receiver<TerrainResult>,
    last_error: Arc<Mutex<Option<String>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TerrainEngine {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<TerrainCommand>();
        let (tx_result, rx_result) = channel::bounded::<TerrainResult>(2);
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);

        let thread_handle = thread::spawn(move || {
            terrain_thread(rx_cmd, tx_result, last_error_clone);
        });

        Self {
            tx_cmd,
            rx_result,
            last_error,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn build(&self, config: TerrainConfig) {
        let _ = self.tx_cmd.send(TerrainCommand::Build(config));
    }

    pub fn try_recv_result(&self) -> Option<TerrainResult> {
        self.rx_result.try_recv().ok()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(TerrainCommand::Stop);
    }
}

impl Default for TerrainEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerrainEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(TerrainCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn terrain_thread(
    rx_cmd: Receiver<TerrainCommand>,
    tx_result: Sender<TerrainResult>,
    last_error: Arc<Mutex<Option<String>>>,
) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            TerrainCommand::Build(config) => {
                *last_error.lock() = None;

                match TerrainMesh::build(&config) {
                    Ok(mesh) => {
                        let _ = tx_result.send(TerrainResult::Built(mesh));
                    }
                    Err(e) => {
                        *last_error.lock() = Some(e.to_string());
                        let _ = tx_result.send(TerrainResult::Failed(e));
                    }
                }
            }
            TerrainCommand::Stop => return,
        }
    }
}
