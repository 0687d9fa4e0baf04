//! In-memory backend used by unit tests. Counts every call.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{ClientFields, ClientId, Cliente, Sexo};
use crate::repository::backend::ClientBackend;
use crate::repository::error::TransportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub post: usize,
    pub put: usize,
    pub delete: usize,
}

#[derive(Default)]
struct State {
    records: Vec<Cliente>,
    next_id: u64,
    calls: CallCounts,
    fetch_delay: Option<Duration>,
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
    fail_mutations: AtomicBool,
    fail_fetches: AtomicBool,
}

pub fn sample_fields(nombre: &str) -> ClientFields {
    ClientFields {
        nombre: nombre.into(),
        apellido1: "Ruiz".into(),
        apellido2: "Gil".into(),
        direccion: "Calle 1".into(),
        telefono: "600112233".into(),
        sexo: Sexo::Mujer,
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record directly, bypassing the call counters.
    pub fn seed(&self, fields: ClientFields) -> Cliente {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let record = Cliente { id: Some(ClientId::from(state.next_id)), fields };
        state.records.push(record.clone());
        record
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    pub fn records(&self) -> Vec<Cliente> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn set_fetch_delay(&self, delay: Duration) {
        self.state.lock().unwrap().fetch_delay = Some(delay);
    }

    fn mutation_failure(&self) -> Result<(), TransportError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(TransportError::Status { status: 500, body: "injected failure".into() })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ClientBackend for MemoryBackend {
    async fn fetch_all(&self) -> Result<Vec<Cliente>, TransportError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.calls.get += 1;
            state.fetch_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("injected fetch failure".into()));
        }
        Ok(self.records())
    }

    async fn insert(&self, fields: &ClientFields) -> Result<Cliente, TransportError> {
        self.state.lock().unwrap().calls.post += 1;
        self.mutation_failure()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let record = Cliente { id: Some(ClientId::from(state.next_id)), fields: fields.clone() };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, id: &ClientId, record: &Cliente) -> Result<Cliente, TransportError> {
        self.state.lock().unwrap().calls.put += 1;
        self.mutation_failure()?;
        let mut state = self.state.lock().unwrap();
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| TransportError::Status { status: 404, body: "not found".into() })?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn remove(&self, id: &ClientId) -> Result<(), TransportError> {
        self.state.lock().unwrap().calls.delete += 1;
        self.mutation_failure()?;
        let mut state = self.state.lock().unwrap();
        let before = state.records.len();
        state.records.retain(|r| r.id.as_ref() != Some(id));
        if state.records.len() == before {
            return Err(TransportError::Status { status: 404, body: "not found".into() });
        }
        Ok(())
    }
}
