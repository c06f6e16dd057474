use std::sync::{Arc, Mutex};

use ytdigest::summarize::TextGenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCall {
    pub prompt: String,
    pub api_key: String,
}

#[derive(Clone)]
pub struct MockGenerator {
    pub reply: String,
    pub calls: Arc<Mutex<Vec<GenerateCall>>>,
    pub fail_with: Option<String>,
}

impl MockGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, api_key: &str) -> eyre::Result<String> {
        self.calls.lock().unwrap().push(GenerateCall {
            prompt: prompt.to_string(),
            api_key: api_key.to_string(),
        });
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        Ok(self.reply.clone())
    }
}
