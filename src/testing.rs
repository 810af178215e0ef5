//! In-memory collaborators for engine and command tests

use crate::error::{PromptError, RegistryError};
use crate::prompt::{is_yes, normalize_answer, AskOptions, Prompt};
use crate::registry::{PackageInfo, RegistryClient};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Registry backed by maps; every lookup is counted
#[derive(Default)]
pub struct InMemoryRegistry {
    packages: HashMap<String, PackageInfo>,
    failures: HashMap<String, String>,
    searches: HashMap<String, Vec<String>>,
    fetches: AtomicUsize,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, info: PackageInfo) -> Self {
        self.packages.insert(info.name.clone(), info);
        self
    }

    pub fn with_versions(self, name: &str, versions: &[&str]) -> Self {
        self.with_package(PackageInfo::new(name, versions.iter().copied()))
    }

    /// Lookups for `name` fail with a network error
    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    pub fn with_search(mut self, query: &str, results: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            results.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryClient for InMemoryRegistry {
    async fn fetch_package_info(&self, name: &str) -> Result<Option<PackageInfo>, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.get(name) {
            return Err(RegistryError::network_error(name, message.clone()));
        }
        Ok(self.packages.get(name).cloned())
    }

    async fn find_similar_packages(&self, name: &str) -> Vec<String> {
        self.searches
            .get(name)
            .map(|results| results.iter().take(3).cloned().collect())
            .unwrap_or_default()
    }
}

/// Prompt answering from a fixed queue; an exhausted queue behaves like Ctrl-C
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            questions: Vec::new(),
        }
    }

    fn next(&mut self, question: &str) -> Result<String, PromptError> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or(PromptError::Cancelled)
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str, options: AskOptions<'_>) -> Result<String, PromptError> {
        let answer = self.next(question)?;
        Ok(normalize_answer(&answer, options.default_value))
    }

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.next(question)?;
        Ok(is_yes(&answer))
    }
}

/// Base URL of a server that accepts connections and never answers
pub fn stalled_server_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}
