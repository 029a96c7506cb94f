//! Scripted service fake for hook tests.
//!
//! Serves records and events from memory, counts calls, can force every
//! call to fail with a status code, and can hold `list_all` replies behind
//! `oneshot` gates so tests control the order in which overlapping
//! invocations resolve.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use torreblanca_client::{ClientError, EventsApi, RecordApi};
use torreblanca_core::events::Event;
use torreblanca_core::record::{ListEnvelope, NewRecord, Record, RecordPatch};
use torreblanca_core::types::DbId;

struct ScriptedList {
    gate: Option<oneshot::Receiver<()>>,
    reply: Result<Vec<Record>, u16>,
}

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    events: Vec<Event>,
    next_id: DbId,
    fail_with: Option<u16>,
    calls: Vec<String>,
    list_script: VecDeque<ScriptedList>,
}

#[derive(Default)]
pub struct ScriptedApi {
    inner: Mutex<Inner>,
}

impl ScriptedApi {
    pub fn with_records(records: Vec<Record>) -> Arc<Self> {
        let api = Self::default();
        {
            let mut inner = api.lock();
            inner.next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
            inner.records = records;
        }
        Arc::new(api)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("scripted api poisoned")
    }

    pub fn set_events(&self, events: Vec<Event>) {
        self.lock().events = events;
    }

    pub fn fail_with(&self, status: u16) {
        self.lock().fail_with = Some(status);
    }

    pub fn recover(&self) {
        self.lock().fail_with = None;
    }

    /// Queue a reply for the next `list_all` call, optionally held until
    /// the returned sender fires.
    pub fn script_list(&self, reply: Result<Vec<Record>, u16>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().list_script.push_back(ScriptedList {
            gate: Some(rx),
            reply,
        });
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    /// Wait until at least `n` calls have been made.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.calls().len() < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for service calls");
    }

    /// Register a call and return the forced failure, if any.
    fn enter(&self, call: String) -> Result<(), ClientError> {
        let mut inner = self.lock();
        inner.calls.push(call);
        match inner.fail_with {
            Some(status) => Err(transport(status)),
            None => Ok(()),
        }
    }

    fn next_list_script(&self) -> Option<ScriptedList> {
        self.lock().list_script.pop_front()
    }
}

pub fn transport(status: u16) -> ClientError {
    ClientError::Transport {
        operation: "scripted call",
        status,
        reason: "Scripted Failure".to_string(),
    }
}

fn envelope(records: Vec<Record>) -> ListEnvelope {
    ListEnvelope {
        count: records.len() as i64,
        next: None,
        previous: None,
        results: records,
    }
}

#[async_trait]
impl RecordApi for ScriptedApi {
    async fn list_all(&self) -> Result<ListEnvelope, ClientError> {
        self.enter("list_all".to_string())?;
        match self.next_list_script() {
            Some(script) => {
                if let Some(gate) = script.gate {
                    let _ = gate.await;
                }
                script.reply.map(envelope).map_err(transport)
            }
            None => Ok(envelope(self.records())),
        }
    }

    async fn get_by_id(&self, id: DbId) -> Result<Record, ClientError> {
        self.enter(format!("get_by_id:{id}"))?;
        self.records()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(ClientError::NotFound { id })
    }

    async fn create(&self, payload: &NewRecord) -> Result<Record, ClientError> {
        self.enter("create".to_string())?;
        let mut inner = self.lock();
        inner.next_id += 1;
        let record = Record {
            id: inner.next_id,
            name: payload.name.clone(),
            address: payload.address.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            country: payload.country.clone(),
            region: payload.region.clone(),
            logo: payload.logo.clone(),
            logo_url: payload.logo_url.clone(),
            schedule: payload.schedule.clone(),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: DbId, payload: &RecordPatch) -> Result<Record, ClientError> {
        self.enter(format!("update:{id}"))?;
        let mut inner = self.lock();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ClientError::NotFound { id })?;
        if let Some(name) = &payload.name {
            record.name = name.clone();
        }
        if let Some(email) = &payload.email {
            record.email = email.clone();
        }
        if let Some(phone) = &payload.phone {
            record.phone = phone.clone();
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.enter(format!("delete:{id}"))?;
        self.lock().records.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl EventsApi for ScriptedApi {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.enter("list_events".to_string())?;
        Ok(self.lock().events.clone())
    }
}

pub fn school(id: DbId, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
        address: String::new(),
        email: format!("escuela{id}@correo.cl"),
        phone: "123456".to_string(),
        country: "Chile".to_string(),
        region: None,
        logo: String::new(),
        logo_url: String::new(),
        schedule: None,
    }
}

pub fn valid_new_record(name: &str) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        email: "a@b.co".to_string(),
        phone: "123".to_string(),
        ..Default::default()
    }
}

pub fn event(id: DbId, date: &str) -> Event {
    Event {
        id,
        title: format!("Evento {id}"),
        body: String::new(),
        date: date.to_string(),
    }
}
