use async_trait::async_trait;
use novelcraft::{
    GenerateRequest, GenerateResponse, NovelcraftDriver, NovelcraftResult, StoryGenerator,
    TokenCounting, write_story,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const THREE_BRANCHES: &str = "Title: A\nDescription: first.\nTitle: B\nDescription: second.\nTitle: C\nDescription: third.";

#[derive(Clone, Default)]
struct ScriptedDriver {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl ScriptedDriver {
    fn new<I: IntoIterator<Item = String>>(replies: I) -> Self {
        let driver = Self::default();
        driver.replies.lock().unwrap().extend(replies);
        driver
    }

    fn last_message(&self, call: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[call].messages().last().unwrap().content().clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl NovelcraftDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let text = self.replies.lock().unwrap().pop_front().unwrap();
        Ok(GenerateResponse::builder().text(text).build().unwrap())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

struct WordCounter;

impl TokenCounting for WordCounter {
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize> {
        Ok(text.split_whitespace().count())
    }
}

fn generator(driver: &ScriptedDriver) -> StoryGenerator<ScriptedDriver> {
    StoryGenerator::with_counter(driver.clone(), Arc::new(WordCounter))
}

fn opening() -> Vec<String> {
    vec![
        "Title: Tin Hearts\nGenre: Fable".to_string(),
        "The clock ticked.".to_string(),
    ]
}

#[tokio::test]
async fn write_stops_at_requested_chapters_and_falls_back_to_first_pick() -> anyhow::Result<()> {
    let mut replies = opening();
    replies.extend([
        "Gears turned.".to_string(),
        "Title: Rust\nDescription: The gears seize.".to_string(),
        "Oil ran dry.".to_string(),
        THREE_BRANCHES.to_string(),
    ]);
    let driver = ScriptedDriver::new(replies);
    let mut out = Vec::new();

    let session = write_story(generator(&driver), 20_000, "robots", 2, 3, &mut out).await?;

    assert_eq!(session.chapters().len(), 2);
    assert!(!session.is_finished());
    assert_eq!(driver.call_count(), 6);
    assert!(driver.last_message(2).contains("Story Prompt: The clock ticked."));
    assert!(driver.last_message(4).contains("Story Prompt: Rust: The gears seize."));

    let text = String::from_utf8(out)?;
    assert!(text.contains("PROLOGUE\n\nThe clock ticked.\n"));
    assert!(text.contains("CHAPTER 1\n\nGears turned.\n"));
    assert!(text.contains("  1. Rust - The gears seize."));
    assert!(text.contains("CHAPTER 2\n\nOil ran dry.\n"));
    assert!(!text.contains("CHAPTER 3"));
    Ok(())
}

#[tokio::test]
async fn write_ends_at_resolution_without_recommendations() -> anyhow::Result<()> {
    let mut replies = opening();
    for chapter in 0..9 {
        replies.push(format!("Chapter {chapter}."));
        if chapter < 8 {
            replies.push(THREE_BRANCHES.to_string());
        }
    }
    let driver = ScriptedDriver::new(replies);
    let mut out = Vec::new();

    let session = write_story(generator(&driver), 20_000, "robots", 20, 2, &mut out).await?;

    assert!(session.is_finished());
    assert_eq!(session.chapters().len(), 9);
    assert!(session.chapters()[8].recommendations().is_empty());
    assert_eq!(driver.call_count(), 2 + 9 + 8);
    assert!(driver.last_message(4).contains("Story Prompt: B: second."));

    let text = String::from_utf8(out)?;
    assert!(text.ends_with("CHAPTER 9\n\nChapter 8.\n\n"));
    Ok(())
}

#[tokio::test]
async fn chapter_without_recommendations_continues_from_its_text() -> anyhow::Result<()> {
    let mut replies = opening();
    replies.extend([
        "The tower fell.".to_string(),
        "No branches today.".to_string(),
        "Dust settled.".to_string(),
        THREE_BRANCHES.to_string(),
    ]);
    let driver = ScriptedDriver::new(replies);
    let mut out = Vec::new();

    let session = write_story(generator(&driver), 20_000, "robots", 2, 1, &mut out).await?;

    assert!(session.chapters()[0].recommendations().is_empty());
    assert!(driver.last_message(4).contains("Story Prompt: The tower fell."));
    Ok(())
}
