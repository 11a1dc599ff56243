use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use super::{FetchError, FetchHandle, FetchRequest, FetchResponse};

/// Fetcher limits.
#[derive(Debug, Copy, Clone)]
pub struct FetchDesc {
    /// Requests allowed in flight before `send` refuses new ones.
    pub max_requests: usize,
    /// Number of worker threads.
    pub num_lanes: usize,
}

impl Default for FetchDesc {
    fn default() -> Self {
        Self {
            max_requests: 128,
            num_lanes: 1,
        }
    }
}

struct Job {
    handle: FetchHandle,
    request: FetchRequest,
}

/// Pool of file-reading lanes.
///
/// Workers share one request channel and report on one response channel.
/// A request counts as in flight from `send` until its response has been
/// delivered by `do_work`.
///
/// Dropping the fetcher closes the request channel and joins every lane;
/// reads already in progress finish first.
pub struct Fetcher {
    desc: FetchDesc,
    request_tx: Option<Sender<Job>>,
    response_rx: Receiver<FetchResponse>,
    lanes: Vec<JoinHandle<()>>,
    next_id: u64,
    in_flight: usize,
}

impl Fetcher {
    pub fn new(desc: FetchDesc) -> Result<Self, FetchError> {
        let desc = FetchDesc {
            max_requests: desc.max_requests.max(1),
            num_lanes: desc.num_lanes.max(1),
        };

        let (request_tx, request_rx) = crossbeam_channel::unbounded::<Job>();
        let (response_tx, response_rx) = crossbeam_channel::unbounded::<FetchResponse>();

        let mut lanes = Vec::with_capacity(desc.num_lanes);
        for lane in 0..desc.num_lanes {
            let jobs = request_rx.clone();
            let responses = response_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("prism-fetch-{lane}"))
                .spawn(move || lane_loop(lane, jobs, responses))?;
            lanes.push(handle);
        }

        log::debug!(
            "fetcher started: {} lanes, {} max requests",
            desc.num_lanes,
            desc.max_requests
        );

        Ok(Self {
            desc,
            request_tx: Some(request_tx),
            response_rx,
            lanes,
            next_id: 0,
            in_flight: 0,
        })
    }

    pub fn desc(&self) -> FetchDesc {
        self.desc
    }

    /// Number of requests sent but not yet delivered through `do_work`.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Queues a request. Refused with [`FetchError::QueueFull`] when
    /// `max_requests` are already in flight.
    pub fn send(&mut self, request: FetchRequest) -> Result<FetchHandle, FetchError> {
        if self.in_flight >= self.desc.max_requests {
            return Err(FetchError::QueueFull(self.in_flight));
        }
        let tx = self.request_tx.as_ref().ok_or(FetchError::Closed)?;

        let handle = FetchHandle(self.next_id);
        tx.send(Job { handle, request })
            .map_err(|_| FetchError::Closed)?;

        self.next_id += 1;
        self.in_flight += 1;
        Ok(handle)
    }

    /// Delivers every completed response to `f` without blocking.
    ///
    /// Returns the number of responses delivered.
    pub fn do_work<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(FetchResponse),
    {
        let mut delivered = 0;
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    delivered += 1;
                    f(response);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        delivered
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        // Lanes exit once the request channel is closed and drained.
        self.request_tx = None;

        for lane in self.lanes.drain(..) {
            if lane.join().is_err() {
                log::error!("fetch lane panicked");
            }
        }
        log::debug!("fetcher shut down");
    }
}

fn lane_loop(lane: usize, jobs: Receiver<Job>, responses: Sender<FetchResponse>) {
    while let Ok(Job { handle, request }) = jobs.recv() {
        let FetchRequest { path, buffer, tag } = request;

        let result = read_into(&path, buffer);
        match &result {
            Ok(bytes) => log::debug!("lane {lane}: fetched {} ({} bytes)", path.display(), bytes.len()),
            Err(err) => log::debug!("lane {lane}: failed {}: {err}", path.display()),
        }

        let response = FetchResponse {
            handle,
            path,
            lane,
            tag,
            result,
        };
        if responses.send(response).is_err() {
            // Fetcher dropped; nobody is listening.
            break;
        }
    }
}

/// Reads the whole file at `path` into `buffer`, which must have enough
/// capacity for it.
pub(crate) fn read_into(path: &Path, mut buffer: Vec<u8>) -> Result<Vec<u8>, FetchError> {
    let mut file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FetchError::FileNotFound,
        _ => FetchError::Io(err),
    })?;

    let size = file.metadata()?.len();
    let capacity = buffer.capacity();
    if size > capacity as u64 {
        return Err(FetchError::BufferTooSmall { size, capacity });
    }

    buffer.clear();
    buffer.resize(size as usize, 0);
    file.read_exact(&mut buffer).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => FetchError::UnexpectedEof,
        _ => FetchError::Io(err),
    })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    /// Polls `do_work` until `count` responses arrived or a deadline passes.
    fn collect(fetcher: &mut Fetcher, count: usize) -> Vec<FetchResponse> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < count && Instant::now() < deadline {
            fetcher.do_work(|r| out.push(r));
            thread::sleep(Duration::from_millis(1));
        }
        out
    }

    // ── read_into ─────────────────────────────────────────────────────────────

    #[test]
    fn reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.bin", b"hello");
        let bytes = read_into(&path, Vec::with_capacity(16)).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn exact_capacity_fits() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.bin", &[7u8; 32]);
        let buffer = Vec::with_capacity(32);
        let cap = buffer.capacity();
        let bytes = read_into(&path, buffer).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes.capacity(), cap);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_into(&dir.path().join("nope.jpg"), Vec::with_capacity(4)).unwrap_err();
        assert!(matches!(err, FetchError::FileNotFound));
    }

    #[test]
    fn small_buffer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "big.bin", &[0u8; 64]);
        let err = read_into(&path, Vec::new()).unwrap_err();
        assert!(matches!(err, FetchError::BufferTooSmall { size: 64, capacity: 0 }));
    }

    // ── Fetcher ───────────────────────────────────────────────────────────────

    #[test]
    fn fetches_on_worker_lanes() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.bin", b"aaa");
        let b = write_file(dir.path(), "b.bin", b"bbbb");

        let mut fetcher = Fetcher::new(FetchDesc { max_requests: 4, num_lanes: 2 }).unwrap();
        let ha = fetcher.send(FetchRequest::new(&a, 16).with_tag(1)).unwrap();
        let hb = fetcher.send(FetchRequest::new(&b, 16).with_tag(2)).unwrap();
        assert_ne!(ha, hb);
        assert_eq!(fetcher.in_flight(), 2);

        let mut responses = collect(&mut fetcher, 2);
        responses.sort_by_key(|r| r.tag);
        assert_eq!(responses.len(), 2);
        assert_eq!(fetcher.in_flight(), 0);

        assert!(responses[0].fetched());
        assert_eq!(responses[0].handle, ha);
        assert_eq!(responses[0].data(), b"aaa");
        assert!(responses[0].lane < 2);
        assert_eq!(responses[1].data(), b"bbbb");
    }

    #[test]
    fn failures_are_delivered_with_their_tag() {
        let dir = tempfile::tempdir().unwrap();
        let mut fetcher = Fetcher::new(FetchDesc::default()).unwrap();
        fetcher
            .send(FetchRequest::new(dir.path().join("missing"), 8).with_tag(5))
            .unwrap();

        let responses = collect(&mut fetcher, 1);
        assert_eq!(responses.len(), 1);
        assert!(responses[0].failed());
        assert_eq!(responses[0].tag, 5);
        assert!(responses[0].data().is_empty());
        assert!(matches!(responses[0].result, Err(FetchError::FileNotFound)));
    }

    #[test]
    fn refuses_past_max_requests() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.bin", b"x");
        let mut fetcher = Fetcher::new(FetchDesc { max_requests: 2, num_lanes: 1 }).unwrap();

        fetcher.send(FetchRequest::new(&path, 4)).unwrap();
        fetcher.send(FetchRequest::new(&path, 4)).unwrap();
        let err = fetcher.send(FetchRequest::new(&path, 4)).unwrap_err();
        assert!(matches!(err, FetchError::QueueFull(2)));

        // Slots free up once responses are delivered.
        assert_eq!(collect(&mut fetcher, 2).len(), 2);
        assert!(fetcher.send(FetchRequest::new(&path, 4)).is_ok());
    }

    #[test]
    fn do_work_without_requests_is_a_no_op() {
        let mut fetcher = Fetcher::new(FetchDesc::default()).unwrap();
        assert_eq!(fetcher.do_work(|_| panic!("no responses expected")), 0);
    }

    #[test]
    fn zero_lanes_is_clamped() {
        let fetcher = Fetcher::new(FetchDesc { max_requests: 0, num_lanes: 0 }).unwrap();
        assert_eq!(fetcher.desc().num_lanes, 1);
        assert_eq!(fetcher.desc().max_requests, 1);
    }
}
