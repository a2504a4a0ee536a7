use fritzpoll_core::directory::{CallResult, DirectoryLoader, Service, ServiceDirectory};
use shared::FieldValue;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Call counters keyed by action name, shared with the actions they count.
#[derive(Clone, Default)]
pub struct CallLog {
  counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl CallLog {
  pub fn calls(&self, action: &str) -> usize {
    self.counts.lock().unwrap().get(action).copied().unwrap_or(0)
  }

  fn record(&self, action: &str) {
    *self.counts.lock().unwrap().entry(action.to_string()).or_default() += 1;
  }
}

/// Canned outcome of one action call.
#[derive(Clone)]
enum Response {
  Values(CallResult),
  Fault(String),
}

/// A router description: service → action → canned response.
#[derive(Clone, Default)]
pub struct ScriptedRouter {
  services: Vec<(String, Vec<(String, Response)>)>,
  log: CallLog,
}

impl ScriptedRouter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn action(self, service: &str, action: &str, values: &[(&str, i64)]) -> Self {
    let result: CallResult = values
      .iter()
      .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
      .collect();
    self.respond(service, action, Response::Values(result))
  }

  /// An action whose every call fails with `fault`.
  pub fn failing(self, service: &str, action: &str, fault: &str) -> Self {
    self.respond(service, action, Response::Fault(fault.to_string()))
  }

  fn respond(mut self, service: &str, action: &str, response: Response) -> Self {
    match self.services.iter().position(|(id, _)| id == service) {
      Some(idx) => self.services[idx].1.push((action.to_string(), response)),
      None => self
        .services
        .push((service.to_string(), vec![(action.to_string(), response)])),
    }
    self
  }

  pub fn log(&self) -> CallLog {
    self.log.clone()
  }

  fn directory(&self) -> ServiceDirectory {
    let mut directory = ServiceDirectory::new();
    for (id, actions) in &self.services {
      let mut service = Service::new();
      for (name, response) in actions {
        let log = self.log.clone();
        let name_owned = name.clone();
        let response = response.clone();
        service.insert_action(name.clone(), move || -> anyhow::Result<CallResult> {
          log.record(&name_owned);
          match &response {
            Response::Values(result) => Ok(result.clone()),
            Response::Fault(fault) => anyhow::bail!("{fault}"),
          }
        });
      }
      directory.insert_service(id.clone(), service);
    }
    directory
  }
}

/// Loader serving a [`ScriptedRouter`], or failing every load.
pub struct ScriptedLoader {
  router: Option<ScriptedRouter>,
  requests: Mutex<Vec<(String, u16)>>,
  loads: AtomicUsize,
}

impl ScriptedLoader {
  pub fn new(router: ScriptedRouter) -> Self {
    Self {
      router: Some(router),
      requests: Mutex::new(Vec::new()),
      loads: AtomicUsize::new(0),
    }
  }

  /// A loader whose device description can never be fetched.
  pub fn unreachable() -> Self {
    Self {
      router: None,
      requests: Mutex::new(Vec::new()),
      loads: AtomicUsize::new(0),
    }
  }

  pub fn requests(&self) -> Vec<(String, u16)> {
    self.requests.lock().unwrap().clone()
  }

  pub fn loads(&self) -> usize {
    self.loads.load(Ordering::SeqCst)
  }
}

impl DirectoryLoader for ScriptedLoader {
  fn load(&self, host: &str, port: u16) -> anyhow::Result<ServiceDirectory> {
    self.loads.fetch_add(1, Ordering::SeqCst);
    self.requests.lock().unwrap().push((host.to_string(), port));
    match &self.router {
      Some(router) => Ok(router.directory()),
      None => anyhow::bail!("dial tcp {host}:{port}: connection refused"),
    }
  }
}

/// Collects formatted log lines emitted while [`LogCapture::run`] executes.
#[derive(Clone, Default)]
pub struct LogCapture {
  buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` with a subscriber writing into this capture on the current
  /// thread.
  pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::fmt()
      .with_writer(self.clone())
      .with_ansi(false)
      .with_max_level(tracing::Level::TRACE)
      .finish();
    tracing::subscriber::with_default(subscriber, f)
  }

  /// Captured lines at `level` (`"WARN"`, `"ERROR"`, ...).
  pub fn lines_at(&self, level: &str) -> Vec<String> {
    let buf = self.buf.lock().unwrap();
    String::from_utf8_lossy(&buf)
      .lines()
      .filter(|line| line.split_whitespace().any(|word| word == level))
      .map(str::to_string)
      .collect()
  }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
  fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(data);
    Ok(data.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for LogCapture {
  type Writer = CaptureWriter;

  fn make_writer(&'a self) -> Self::Writer {
    CaptureWriter(Arc::clone(&self.buf))
  }
}
