//! Shared test fixtures: a scripted driver and a whitespace token counter.

#![allow(dead_code)]

use async_trait::async_trait;
use novelcraft_core::{GenerateRequest, GenerateResponse};
use novelcraft_error::{ModelsError, ModelsErrorKind, NovelcraftResult};
use novelcraft_interface::{NovelcraftDriver, TokenCounting};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Driver that replays canned replies in order and records every request.
#[derive(Clone, Default)]
pub struct MockDriver {
    script: Arc<Mutex<VecDeque<Result<String, ModelsErrorKind>>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    summary: Arc<Mutex<Option<String>>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let driver = Self::new();
        for reply in replies {
            driver.reply(reply);
        }
        driver
    }

    pub fn reply(&self, text: impl Into<String>) -> &Self {
        self.script.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(&self, kind: ModelsErrorKind) -> &Self {
        self.script.lock().unwrap().push_back(Err(kind));
        self
    }

    /// Answer every memory compaction request with `text`, leaving the
    /// script for story calls.
    pub fn summarize_with(&self, text: impl Into<String>) -> &Self {
        *self.summary.lock().unwrap() = Some(text.into());
        self
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl NovelcraftDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some(summary) = self.summary.lock().unwrap().clone() {
            if is_summarizer_request(req) {
                return Ok(GenerateResponse::builder().text(summary).build().unwrap());
            }
        }
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(GenerateResponse::builder().text(text).build().unwrap()),
            Some(Err(kind)) => Err(ModelsError::new(kind).into()),
            None => Err(ModelsError::new(ModelsErrorKind::Api {
                status: 500,
                message: "mock script exhausted".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

fn is_summarizer_request(req: &GenerateRequest) -> bool {
    req.messages()
        .first()
        .is_some_and(|m| m.content().starts_with("Progressively summarize"))
}

/// Counts whitespace-separated words in every message of a request.
pub fn request_words(req: &GenerateRequest) -> usize {
    req.messages()
        .iter()
        .map(|m| m.content().split_whitespace().count())
        .sum()
}

/// Counts whitespace-separated words as tokens.
pub struct WordCounter;

impl TokenCounting for WordCounter {
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize> {
        Ok(text.split_whitespace().count())
    }
}

pub const SETTING_REPLY: &str = "Title: The Salt Archive
Genre: Mystery
Theme: Memory and Loss
Tone: Quiet and Eerie
Setting: A drowned library, 2090
Characters:
Mara Voss: An archivist who dives for books.
Teo: Her apprentice, who cannot swim.";

pub const RECOMMENDATIONS_REPLY: &str = "Title: The Flooded Stacks
Description: Mara finds a ledger that names her father.
Title: A Debt Repaid
Description: Teo bargains with smugglers for diving gear.
Title: Low Tide
Description: The water recedes and reveals a sealed vault.";
