use async_trait::async_trait;
use novelcraft::{
    GenerateRequest, GenerateResponse, ModelsErrorKind, NovelcraftConfig, NovelcraftDriver,
    NovelcraftErrorKind, NovelcraftResult, StoryGenerator, StorySession, TokenCounting,
    build_driver,
};
use std::io::Write;
use std::sync::{Arc, Mutex};

struct EchoDriver {
    replies: Mutex<Vec<String>>,
}

#[async_trait]
impl NovelcraftDriver for EchoDriver {
    async fn generate(&self, _req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        let text = self.replies.lock().unwrap().remove(0);
        Ok(GenerateResponse::builder().text(text).build().unwrap())
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

struct CharCounter;

impl TokenCounting for CharCounter {
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize> {
        Ok(text.len())
    }
}

#[tokio::test]
async fn facade_exposes_the_whole_pipeline() -> anyhow::Result<()> {
    let driver = EchoDriver {
        replies: Mutex::new(vec![
            "Title: Tin Hearts\nGenre: Fable".to_string(),
            "The clock ticked.".to_string(),
            "Gears turned.".to_string(),
            "Title: Rust\nDescription: The gears seize.".to_string(),
        ]),
    };
    let config = NovelcraftConfig::bundled()?;
    let generator = StoryGenerator::with_counter(driver, Arc::new(CharCounter))
        .with_config(*config.generation());
    let mut session = StorySession::new(generator, *config.memory().token_budget());

    assert_eq!(session.create_setting("robots").await?.title(), "Tin Hearts");
    session.create_prologue().await?;
    let chapter = session.next_chapter("The clock ticked.").await?;
    assert_eq!(chapter.final_summary(), "Gears turned.");
    assert_eq!(chapter.recommendations().len(), 1);
    Ok(())
}

#[test]
fn build_driver_reports_missing_key() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[provider]\napi_key_env = \"NOVELCRAFT_FACADE_TEST_KEY_NEVER_SET\""
    )
    .unwrap();
    let config = NovelcraftConfig::from_file(file.path()).unwrap();

    let err = build_driver(&config).unwrap_err();
    match err.kind() {
        NovelcraftErrorKind::Models(e) => {
            assert_eq!(
                e.kind,
                ModelsErrorKind::MissingApiKey("NOVELCRAFT_FACADE_TEST_KEY_NEVER_SET".into())
            )
        }
        other => panic!("unexpected error: {other}"),
    }
}
