// Scripted in-memory backend shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::oneshot;

use sitewatch_core::{
    CoreError, NewWebsite, Report, StatusSample, Website, WebsiteApi, WebsiteId,
};

pub fn website(id: &str, monitered: bool, latest_status: Option<i32>) -> Website {
    Website {
        id: WebsiteId::from(id),
        url: format!("http://{id}.example"),
        title: None,
        monitered,
        latest_status,
    }
}

pub fn api_error(message: &str) -> CoreError {
    CoreError::Api {
        message: message.into(),
        status: None,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub websites: Mutex<Vec<Website>>,
    pub ping_fails: Mutex<bool>,
    pub list_fails: Mutex<bool>,
    /// Codes handed out by `check_status`, front first. The last one repeats.
    pub status_codes: Mutex<VecDeque<i32>>,
    /// When set, the next `check_status` waits for this gate.
    pub check_gate: Mutex<Option<oneshot::Receiver<()>>>,
    /// `Ok(None)` means the server ran no immediate check.
    pub start_result: Mutex<Option<Result<Option<i32>, String>>>,
    pub start_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub stop_error: Mutex<Option<String>>,
    pub create_error: Mutex<Option<String>>,
    pub delete_answer: Mutex<Option<bool>>,
    pub report_codes: Mutex<Vec<i32>>,

    pub created: Mutex<Vec<NewWebsite>>,
    pub check_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_websites(websites: Vec<Website>) -> Self {
        let api = Self::default();
        *api.websites.lock().unwrap() = websites;
        api
    }

    pub fn set_status(&self, code: i32) {
        let mut codes = self.status_codes.lock().unwrap();
        codes.clear();
        codes.push_back(code);
    }

    pub fn set_start(&self, result: Result<Option<i32>, &str>) {
        *self.start_result.lock().unwrap() = Some(result.map_err(str::to_owned));
    }

    /// Hold the next `check_status` until the returned sender fires.
    pub fn gate_next_check(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.check_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Hold the next `start_monitoring` until the returned sender fires.
    pub fn gate_next_start(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.start_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn checks(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    fn next_code(&self) -> i32 {
        let mut codes = self.status_codes.lock().unwrap();
        if codes.len() > 1 {
            codes.pop_front().unwrap()
        } else {
            codes.front().copied().unwrap_or(200)
        }
    }
}

impl WebsiteApi for FakeApi {
    async fn ping(&self) -> Result<u16, CoreError> {
        if *self.ping_fails.lock().unwrap() {
            return Err(CoreError::ConnectionFailed {
                url: "http://backend.test".into(),
                reason: "connection refused".into(),
            });
        }
        Ok(404)
    }

    async fn list_websites(&self) -> Result<Vec<Website>, CoreError> {
        if *self.list_fails.lock().unwrap() {
            return Err(api_error("list failed"));
        }
        Ok(self.websites.lock().unwrap().clone())
    }

    async fn check_status(&self, _id: &WebsiteId) -> Result<StatusSample, CoreError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        let code = self.next_code();
        let gate = self.check_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(StatusSample::new(code))
    }

    async fn create_website(&self, website: &NewWebsite) -> Result<Website, CoreError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(message) = self.create_error.lock().unwrap().clone() {
            return Err(api_error(&message));
        }
        self.created.lock().unwrap().push(website.clone());
        let created = Website {
            id: WebsiteId::new(format!("new-{n}")),
            url: website.url.clone(),
            title: website.title.clone(),
            monitered: false,
            latest_status: None,
        };
        self.websites.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_website(&self, id: &WebsiteId) -> Result<bool, CoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.delete_answer.lock().unwrap().unwrap_or(true);
        if answer {
            self.websites.lock().unwrap().retain(|w| &w.id != id);
        }
        Ok(answer)
    }

    async fn start_monitoring(&self, _id: &WebsiteId) -> Result<Option<StatusSample>, CoreError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.start_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let result = self
            .start_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(Some(200)));
        match result {
            Ok(code) => Ok(code.map(StatusSample::new)),
            Err(message) => Err(api_error(&message)),
        }
    }

    async fn stop_monitoring(&self, id: &WebsiteId) -> Result<Website, CoreError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.stop_error.lock().unwrap().clone() {
            return Err(api_error(&message));
        }
        let mut websites = self.websites.lock().unwrap();
        let entry = websites
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| api_error("Website not found"))?;
        entry.monitered = false;
        Ok(entry.clone())
    }

    async fn get_report(&self, id: &WebsiteId) -> Result<Report, CoreError> {
        Ok(Report {
            website_id: id.clone(),
            url: format!("http://{id}.example"),
            history: self
                .report_codes
                .lock()
                .unwrap()
                .iter()
                .copied()
                .map(StatusSample::new)
                .collect(),
        })
    }
}
