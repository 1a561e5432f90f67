use std::iter::zip;
use std::sync::mpsc;
use std::thread;

use log::debug;

pub trait Split: Sized {
    fn split_to_vec(self, n: usize) -> Vec<Self>;
}

pub trait Join: Sized {
    fn join_vec(parts: Vec<Self>) -> Self;
}

impl<T: Clone> Split for Vec<T> {
    fn split_to_vec(self, n: usize) -> Vec<Self> {
        let size = self.len() / n;
        let size_xtra = self.len() % n;

        let mut parts = Vec::with_capacity(n);
        let mut start = 0;
        for i in 0..n {
            let end = start + size + usize::from(i < size_xtra);
            parts.push(self[start..end].to_vec());
            start = end;
        }
        parts
    }
}

impl<T> Join for Vec<T> {
    fn join_vec(parts: Vec<Self>) -> Self {
        let mut joined = Vec::with_capacity(parts.iter().map(Vec::len).sum());
        for part in parts {
            joined.extend(part);
        }
        joined
    }
}

pub trait Call<I, O> {
    fn call(&self, input: I) -> O;
}

struct Worker<I> {
    tx: mpsc::Sender<(usize, I)>,
}

impl<I> Worker<I>
where
    I: Send + 'static,
{
    fn new<O, W>(mut work: W, out: mpsc::Sender<(usize, O)>) -> Self
    where
        O: Send + 'static,
        W: FnMut(I) -> O + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<(usize, I)>();
        thread::spawn(move || loop {
            let (n, input) = match rx.recv() {
                Ok(job) => job,
                Err(_) => return,
            };
            if out.send((n, work(input))).is_err() {
                return;
            }
        });
        Self { tx }
    }

    fn send(&self, n: usize, input: I) {
        self.tx.send((n, input)).unwrap();
    }
}

/// Pool of long-lived worker threads. Inputs are split into parts, solved
/// concurrently, and rejoined in submission order, so callers see results in
/// the same order a single worker would have produced.
pub struct WorkerPool<I, O> {
    workers: Vec<Worker<I>>,
    rx: mpsc::Receiver<(usize, O)>,
}

impl<I, O> WorkerPool<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn with<F, W>(n: usize, make_worker: F) -> Self
    where
        F: Fn() -> W,
        W: FnMut(I) -> O + Send + 'static,
    {
        assert!(n > 0, "no workers");
        debug!("spawning {} workers", n);
        let (out, rx) = mpsc::channel();
        let workers = (0..n)
            .map(|_| Worker::new(make_worker(), out.clone()))
            .collect();
        Self { workers, rx }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl<I, O> Call<I, O> for WorkerPool<I, O>
where
    I: Split + Send + 'static,
    O: Join + Send + 'static,
{
    fn call(&self, input: I) -> O {
        let n = self.workers.len();
        let parts = input.split_to_vec(n);
        for (worker, (i, part)) in zip(&self.workers, parts.into_iter().enumerate()) {
            worker.send(i, part);
        }

        let mut solved: Vec<Option<O>> = (0..n).map(|_| None).collect();
        for _ in 0..n {
            let (i, part) = self.rx.recv().unwrap();
            solved[i] = Some(part);
        }
        Join::join_vec(
            solved
                .into_iter()
                .map(|part| part.expect("missing part"))
                .collect(),
        )
    }
}
