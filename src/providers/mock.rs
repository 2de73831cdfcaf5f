use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, ProviderResult};
use crate::providers::base::Provider;
use crate::providers::types::message::Message;

/// A mock provider that returns pre-configured outcomes for testing and
/// records every message list it was asked to complete.
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    responses: Arc<Mutex<Vec<ProviderResult<String>>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of outcomes
    pub fn new(name: &str, responses: Vec<ProviderResult<String>>) -> Self {
        Self {
            name: name.to_string(),
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(name: &str, reply: &str) -> Self {
        Self::new(name, vec![Ok(reply.to_string())])
    }

    pub fn failing(name: &str, status: u16) -> Self {
        Self::new(
            name,
            vec![Err(ProviderError::Status {
                status,
                body: "mock failure".to_string(),
            })],
        )
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn attempt(&self, messages: &[Message]) -> ProviderResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty reply if no more pre-configured outcomes
            Ok(String::new())
        } else {
            responses.remove(0)
        }
    }
}
