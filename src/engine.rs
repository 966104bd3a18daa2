//! Channel-based analysis engine
//!
//! Models the editor boundary: the caller submits a request and moves on,
//! a reply tagged with the request id arrives later.
//!
//! ```text
//!   submit() ──► bounded job channel ──► worker 1..N (Pipeline::run)
//!                                              │
//!   recv()   ◄──────── reply channel ◄─────────┘
//! ```
//!
//! Workers share nothing mutable; each request is analyzed from scratch, so
//! replies may arrive out of submission order.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tracing::{debug, trace};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, EngineError};
use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::pipeline::Pipeline;

/// Reply to one submitted request
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: u64,
    pub result: Result<AnalysisResponse, AnalysisError>,
}

struct Job {
    id: u64,
    request: AnalysisRequest,
}

/// Worker pool answering analysis requests over channels
pub struct AnalysisEngine {
    job_tx: Option<Sender<Job>>,
    reply_rx: Receiver<Reply>,
    workers: Vec<thread::JoinHandle<()>>,
    next_id: AtomicU64,
}

impl AnalysisEngine {
    /// Start `config.workers` worker threads
    pub fn start(config: &AnalysisConfig) -> Self {
        Self::with_workers(config, config.workers)
    }

    /// Start a specific number of worker threads (at least one)
    pub fn with_workers(config: &AnalysisConfig, workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = bounded::<Job>(workers * 4);
        let (reply_tx, reply_rx) = unbounded::<Reply>();

        let handles = (0..workers)
            .map(|n| {
                let job_rx = job_rx.clone();
                let reply_tx = reply_tx.clone();
                let pipeline = Pipeline::new(config);
                thread::spawn(move || worker_loop(n, &pipeline, &job_rx, &reply_tx))
            })
            .collect();

        debug!("Analysis engine started with {} worker(s)", workers);

        Self {
            job_tx: Some(job_tx),
            reply_rx,
            workers: handles,
            next_id: AtomicU64::new(1),
        }
    }

    /// Queue a request and return its id without waiting for the result.
    ///
    /// The request's own id is used when present; otherwise the engine
    /// assigns the next sequence number.
    pub fn submit(&self, mut request: AnalysisRequest) -> Result<u64, EngineError> {
        let job_tx = self.job_tx.as_ref().ok_or(EngineError::Closed)?;
        let id = match request.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        request.id = Some(id);
        job_tx
            .send(Job { id, request })
            .map_err(|_| EngineError::Closed)?;
        trace!("Queued request {}", id);
        Ok(id)
    }

    /// Block until the next reply arrives
    pub fn recv(&self) -> Result<Reply, EngineError> {
        self.reply_rx.recv().map_err(|_| EngineError::Closed)
    }

    /// Reply channel, for callers that want to select or iterate on it
    pub fn replies(&self) -> &Receiver<Reply> {
        &self.reply_rx
    }

    /// Stop accepting requests, let workers drain the queue, and return
    /// every reply not yet received.
    pub fn shutdown(mut self) -> Vec<Reply> {
        self.close();
        self.reply_rx.try_iter().collect()
    }

    fn close(&mut self) {
        self.job_tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for AnalysisEngine {
    fn drop(&mut self) {
        self.close();
    }
}

fn worker_loop(n: usize, pipeline: &Pipeline, jobs: &Receiver<Job>, replies: &Sender<Reply>) {
    trace!("Worker {} started", n);
    for job in jobs.iter() {
        let result = pipeline.run(&job.request);
        if replies.send(Reply { id: job.id, result }).is_err() {
            break;
        }
    }
    trace!("Worker {} stopped", n);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisMode;
    use std::collections::HashMap;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            workers: 2,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_submit_and_receive() {
        let engine = AnalysisEngine::start(&config());
        let id = engine
            .submit(AnalysisRequest::from_paragraphs(["The cat sat.", "A dog ran."]))
            .unwrap();
        let reply = engine.recv().unwrap();
        assert_eq!(reply.id, id);
        let response = reply.result.unwrap();
        assert_eq!(response.id, Some(id));
        assert_eq!(response.paragraph_count, 2);
    }

    #[test]
    fn test_one_reply_per_request() {
        let engine = AnalysisEngine::start(&config());
        let mut expected = HashMap::new();
        for n in 0..10u64 {
            let request = if n % 3 == 0 {
                AnalysisRequest::from_paragraphs(["Lonely paragraph."])
            } else {
                AnalysisRequest::from_paragraphs(["First paragraph.", "Second one here."])
            };
            let id = engine.submit(request.with_id(100 + n)).unwrap();
            expected.insert(id, n % 3 == 0);
        }

        let replies = engine.shutdown();
        assert_eq!(replies.len(), 10);
        for reply in replies {
            let should_fail = expected[&reply.id];
            assert_eq!(reply.result.is_err(), should_fail, "request {}", reply.id);
        }
    }

    #[test]
    fn test_assigns_ids_when_missing() {
        let engine = AnalysisEngine::with_workers(&config(), 1);
        let a = engine
            .submit(AnalysisRequest::from_paragraphs(["x"]).with_mode(AnalysisMode::Sentiment))
            .unwrap();
        let b = engine
            .submit(AnalysisRequest::from_paragraphs(["y"]).with_mode(AnalysisMode::Sentiment))
            .unwrap();
        assert_ne!(a, b);
        let ids: Vec<u64> = engine.shutdown().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_errors_are_replies() {
        let engine = AnalysisEngine::with_workers(&config(), 1);
        let request = AnalysisRequest::new(vec!["a".into()], vec![]).with_id(9);
        engine.submit(request).unwrap();
        let reply = engine.recv().unwrap();
        assert_eq!(reply.id, 9);
        assert_eq!(
            reply.result,
            Err(AnalysisError::MismatchedArrays { paragraphs: 1, keys: 0 })
        );
    }
}
