//! In-memory [`DomPort`] for tests.
//!
//! Elements are keyed by the exact selector string the code under test will
//! use. Elements can be made to appear late, lists can grow between polls,
//! and clicks can reveal further elements. Every call is recorded so tests
//! can assert on what was (and was not) touched.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::ActionError;
use crate::port::DomPort;
use crate::types::DomEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
    Count(String),
    Text(String),
    Attribute(String, String),
    ScrollIntoView(String),
    Focus(String),
    InjectValue(String, String),
    Dispatch(String, DomEvent),
    Click(String, usize),
    Labels(String),
    StorageGet(String),
    StorageSet(String, String),
}

impl DomOp {
    pub fn selector(&self) -> &str {
        match self {
            DomOp::Count(s)
            | DomOp::Text(s)
            | DomOp::Attribute(s, _)
            | DomOp::ScrollIntoView(s)
            | DomOp::Focus(s)
            | DomOp::InjectValue(s, _)
            | DomOp::Dispatch(s, _)
            | DomOp::Click(s, _)
            | DomOp::Labels(s)
            | DomOp::StorageGet(s)
            | DomOp::StorageSet(s, _) => s,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct FakeElement {
    text: Option<String>,
    attributes: HashMap<String, String>,
    value: Option<String>,
    hidden_probes: u32,
}

#[derive(Debug, Default)]
struct State {
    url: String,
    elements: HashMap<String, FakeElement>,
    lists: HashMap<String, VecDeque<usize>>,
    reveals: HashMap<String, Vec<String>>,
    labels: HashMap<String, Vec<String>>,
    failures: HashMap<String, ActionError>,
    storage: HashMap<String, String>,
    ops: Vec<DomOp>,
}

#[derive(Debug, Default)]
pub struct FakeDom {
    state: Mutex<State>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(url: &str) -> Self {
        let dom = Self::default();
        dom.state.lock().url = url.to_string();
        dom
    }

    /// Simulates a navigation; elements and storage are kept
    pub fn set_url(&self, url: &str) {
        self.state.lock().url = url.to_string();
    }

    pub fn add_element(&self, selector: &str) {
        self.add_element_after(selector, 0);
    }

    /// Element that stays invisible to the first `hidden_probes` count queries
    pub fn add_element_after(&self, selector: &str, hidden_probes: u32) {
        self.state
            .lock()
            .elements
            .entry(selector.to_string())
            .or_default()
            .hidden_probes = hidden_probes;
    }

    pub fn add_text(&self, selector: &str, text: &str) {
        self.state
            .lock()
            .elements
            .entry(selector.to_string())
            .or_default()
            .text = Some(text.to_string());
    }

    pub fn add_attribute(&self, selector: &str, name: &str, value: &str) {
        self.state
            .lock()
            .elements
            .entry(selector.to_string())
            .or_default()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Successive count results for a list selector; the last one repeats
    pub fn script_counts(&self, selector: &str, counts: Vec<usize>) {
        self.state
            .lock()
            .lists
            .insert(selector.to_string(), counts.into());
    }

    /// Clicking `selector` makes `revealed` present
    pub fn reveal_on_click(&self, selector: &str, revealed: &[&str]) {
        self.state.lock().reveals.insert(
            selector.to_string(),
            revealed.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Every count query for `selector` fails with `err`
    pub fn fail_with(&self, selector: &str, err: ActionError) {
        self.state
            .lock()
            .failures
            .insert(selector.to_string(), err);
    }

    pub fn set_labels(&self, selector: &str, labels: &[&str]) {
        self.state.lock().labels.insert(
            selector.to_string(),
            labels.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn set_storage(&self, key: &str, value: &str) {
        self.state
            .lock()
            .storage
            .insert(key.to_string(), value.to_string());
    }

    pub fn storage_value(&self, key: &str) -> Option<String> {
        self.state.lock().storage.get(key).cloned()
    }

    pub fn value_of(&self, selector: &str) -> Option<String> {
        self.state
            .lock()
            .elements
            .get(selector)
            .and_then(|el| el.value.clone())
    }

    pub fn ops(&self) -> Vec<DomOp> {
        self.state.lock().ops.clone()
    }

    pub fn ops_for(&self, selector: &str) -> Vec<DomOp> {
        self.ops()
            .into_iter()
            .filter(|op| op.selector() == selector)
            .collect()
    }

    pub fn touched(&self, selector: &str) -> bool {
        !self.ops_for(selector).is_empty()
    }

    pub fn clicks(&self) -> Vec<(String, usize)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DomOp::Click(selector, index) => Some((selector, index)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: DomOp) {
        self.state.lock().ops.push(op);
    }

    fn with_visible<T>(
        &self,
        selector: &str,
        f: impl FnOnce(&mut FakeElement) -> T,
    ) -> Result<T, ActionError> {
        let mut state = self.state.lock();
        match state.elements.get_mut(selector) {
            Some(el) if el.hidden_probes == 0 => Ok(f(el)),
            _ => Err(ActionError::AnchorNotFound(selector.to_string())),
        }
    }
}

#[async_trait]
impl DomPort for FakeDom {
    async fn current_url(&self) -> Result<String, ActionError> {
        Ok(self.state.lock().url.clone())
    }

    async fn count(&self, selector: &str) -> Result<usize, ActionError> {
        self.record(DomOp::Count(selector.to_string()));
        let mut state = self.state.lock();
        if let Some(err) = state.failures.get(selector) {
            return Err(err.clone());
        }
        if let Some(counts) = state.lists.get_mut(selector) {
            let current = if counts.len() > 1 {
                counts.pop_front().unwrap_or_default()
            } else {
                counts.front().copied().unwrap_or_default()
            };
            return Ok(current);
        }
        match state.elements.get_mut(selector) {
            Some(el) if el.hidden_probes > 0 => {
                el.hidden_probes -= 1;
                Ok(0)
            }
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    async fn text(&self, selector: &str) -> Result<Option<String>, ActionError> {
        self.record(DomOp::Text(selector.to_string()));
        Ok(self
            .with_visible(selector, |el| el.text.clone())
            .unwrap_or_default())
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ActionError> {
        self.record(DomOp::Attribute(selector.to_string(), name.to_string()));
        Ok(self
            .with_visible(selector, |el| el.attributes.get(name).cloned())
            .unwrap_or_default())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), ActionError> {
        self.record(DomOp::ScrollIntoView(selector.to_string()));
        self.with_visible(selector, |_| ())
    }

    async fn focus(&self, selector: &str) -> Result<(), ActionError> {
        self.record(DomOp::Focus(selector.to_string()));
        self.with_visible(selector, |_| ())
    }

    async fn inject_value(&self, selector: &str, value: &str) -> Result<(), ActionError> {
        self.record(DomOp::InjectValue(selector.to_string(), value.to_string()));
        self.with_visible(selector, |el| el.value = Some(value.to_string()))
    }

    async fn dispatch(&self, selector: &str, event: DomEvent) -> Result<(), ActionError> {
        self.record(DomOp::Dispatch(selector.to_string(), event));
        self.with_visible(selector, |_| ())
    }

    async fn click(&self, selector: &str, index: usize) -> Result<(), ActionError> {
        self.record(DomOp::Click(selector.to_string(), index));
        let mut state = self.state.lock();
        let present = state.lists.contains_key(selector)
            || matches!(state.elements.get(selector), Some(el) if el.hidden_probes == 0);
        if !present {
            return Err(ActionError::AnchorNotFound(selector.to_string()));
        }
        if let Some(revealed) = state.reveals.get(selector).cloned() {
            for target in revealed {
                state.elements.entry(target).or_default().hidden_probes = 0;
            }
        }
        Ok(())
    }

    async fn labels(&self, selector: &str) -> Result<Vec<String>, ActionError> {
        self.record(DomOp::Labels(selector.to_string()));
        Ok(self
            .state
            .lock()
            .labels
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn storage_get(&self, key: &str) -> Result<Option<String>, ActionError> {
        self.record(DomOp::StorageGet(key.to_string()));
        Ok(self.state.lock().storage.get(key).cloned())
    }

    async fn storage_set(&self, key: &str, value: &str) -> Result<(), ActionError> {
        self.record(DomOp::StorageSet(key.to_string(), value.to_string()));
        self.state
            .lock()
            .storage
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
