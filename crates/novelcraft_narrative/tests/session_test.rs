mod common;

use common::{MockDriver, RECOMMENDATIONS_REPLY, SETTING_REPLY, WordCounter, request_words};
use novelcraft_error::{ModelsErrorKind, NarrativeErrorKind, NovelcraftErrorKind};
use novelcraft_narrative::{STORY_CHAPTERS, SessionState, StoryGenerator, StorySession};
use std::sync::Arc;

fn session(driver: &MockDriver) -> StorySession<MockDriver> {
    StorySession::new(
        StoryGenerator::with_counter(driver.clone(), Arc::new(WordCounter)),
        20_000,
    )
}

fn is_invalid_transition(err: &novelcraft_error::NovelcraftError) -> bool {
    matches!(
        err.kind(),
        NovelcraftErrorKind::Narrative(e) if matches!(e.kind, NarrativeErrorKind::InvalidTransition { .. })
    )
}

#[tokio::test]
async fn full_story_walks_every_state() -> anyhow::Result<()> {
    let driver = MockDriver::with_replies([SETTING_REPLY, "I remember the water."]);
    for chapter in 0..STORY_CHAPTERS {
        driver.reply(format!("Chapter {chapter} prose."));
        if chapter < 8 {
            driver.reply(RECOMMENDATIONS_REPLY);
        }
    }
    let mut story = session(&driver);
    assert_eq!(story.state(), SessionState::NotStarted);

    story.create_setting("A drowned library").await?;
    assert_eq!(story.state(), SessionState::SettingGenerated);
    assert_eq!(story.setting().map(|s| s.title().as_str()), Some("The Salt Archive"));

    story.create_prologue().await?;
    assert_eq!(story.state(), SessionState::PrologueGenerated);

    let mut prompt = "Mara opens the vault".to_string();
    for chapter in 0..STORY_CHAPTERS {
        let result = story.next_chapter(&prompt).await?;
        assert_eq!(result.final_summary(), &format!("Chapter {chapter} prose."));
        let expected = if chapter < 8 { 3 } else { 0 };
        assert_eq!(result.recommendations().len(), expected);
        if let Some(first) = result.recommendations().first().cloned() {
            prompt = story.choose(&first);
        }
        assert_eq!(story.state(), SessionState::Chapter(chapter));
    }

    assert!(story.is_finished());
    assert_eq!(story.chapters().len(), STORY_CHAPTERS);
    assert_eq!(prompt, "The Flooded Stacks: Mara finds a ledger that names her father.");

    let err = story.next_chapter("one more").await.unwrap_err();
    assert!(is_invalid_transition(&err));
    assert!(err.to_string().contains("Chapter(9)"));
    assert_eq!(story.state(), SessionState::Chapter(8));
    assert_eq!(driver.call_count(), 2 + 9 + 8);
    Ok(())
}

#[tokio::test]
async fn retained_memory_stays_within_budget_over_a_full_story() -> anyhow::Result<()> {
    let budget = 500;
    let driver = MockDriver::with_replies([SETTING_REPLY, "I remember the water."]);
    driver.summarize_with("Mara dove into the archive and kept finding her father's name.");
    for chapter in 0..STORY_CHAPTERS {
        let prose = vec![format!("tide{chapter}"); 100].join(" ");
        driver.reply(prose);
        if chapter < STORY_CHAPTERS - 1 {
            driver.reply(RECOMMENDATIONS_REPLY);
        }
    }
    let mut story = StorySession::new(
        StoryGenerator::with_counter(driver.clone(), Arc::new(WordCounter)),
        budget,
    );
    story.create_setting("A drowned library").await?;
    story.create_prologue().await?;

    let mut prompt = "Mara opens the vault".to_string();
    let mut compacted = false;
    for chapter in 0..STORY_CHAPTERS {
        let calls_before = driver.call_count();
        let result = story.next_chapter(&prompt).await?.clone();

        let memory = story.memory();
        assert!(memory.token_count(&WordCounter)? <= budget, "chapter {chapter}");
        assert_eq!(
            memory.turns().back().map(|t| t.input().as_str()),
            Some(novelcraft_narrative::chapter_prompt(&prompt).as_str())
        );
        compacted |= memory.summary().is_some();

        let chapter_request = &driver.requests()[calls_before];
        assert!(request_words(chapter_request) < 2 * budget, "chapter {chapter}");

        if let Some(first) = result.recommendations().first() {
            prompt = story.choose(first);
        }
    }

    assert!(compacted);
    assert!(story.is_finished());
    Ok(())
}

#[tokio::test]
async fn chapters_require_a_prologue() {
    let driver = MockDriver::with_replies([SETTING_REPLY]);
    let mut story = session(&driver);

    let err = story.next_chapter("too soon").await.unwrap_err();
    assert!(is_invalid_transition(&err));

    story.create_setting("idea").await.unwrap();
    let err = story.next_chapter("still too soon").await.unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn setting_cannot_be_generated_twice() {
    let driver = MockDriver::with_replies([SETTING_REPLY, SETTING_REPLY]);
    let mut story = session(&driver);

    story.create_setting("idea").await.unwrap();
    let err = story.create_setting("another idea").await.unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(story.state(), SessionState::SettingGenerated);
}

#[tokio::test]
async fn prologue_requires_setting() {
    let driver = MockDriver::new();
    let mut story = session(&driver);

    let err = story.create_prologue().await.unwrap_err();
    assert!(is_invalid_transition(&err));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn failed_chapter_leaves_state_unchanged() {
    let driver = MockDriver::with_replies([SETTING_REPLY, "prologue"]);
    driver.fail(ModelsErrorKind::Timeout("deadline".into()));
    let mut story = session(&driver);
    story.create_setting("idea").await.unwrap();
    story.create_prologue().await.unwrap();

    assert!(story.next_chapter("go").await.is_err());
    assert_eq!(story.state(), SessionState::PrologueGenerated);
    assert!(story.chapters().is_empty());
    assert_eq!(story.memory().turn_count(), 0);

    driver.reply("Retry worked.").reply(RECOMMENDATIONS_REPLY);
    let result = story.next_chapter("go").await.unwrap();
    assert_eq!(result.final_summary(), "Retry worked.");
    assert_eq!(story.state(), SessionState::Chapter(0));
}

#[tokio::test]
async fn sessions_do_not_share_memory() -> anyhow::Result<()> {
    let driver_a = MockDriver::with_replies([SETTING_REPLY, "p", "a0", RECOMMENDATIONS_REPLY]);
    let driver_b = MockDriver::with_replies([SETTING_REPLY, "p"]);
    let mut a = session(&driver_a);
    let mut b = session(&driver_b);

    for story in [&mut a, &mut b] {
        story.create_setting("idea").await?;
        story.create_prologue().await?;
    }
    a.next_chapter("go").await?;

    assert_eq!(a.memory().turn_count(), 1);
    assert_eq!(b.memory().turn_count(), 0);
    Ok(())
}

#[test]
fn state_display_names_chapter() {
    assert_eq!(SessionState::Chapter(3).to_string(), "Chapter(3)");
    assert_eq!(SessionState::NotStarted.to_string(), "NotStarted");
    assert_eq!(SessionState::Chapter(STORY_CHAPTERS - 1).next_chapter(), None);
    assert_eq!(SessionState::PrologueGenerated.next_chapter(), Some(0));
    assert_eq!(SessionState::Chapter(7).next_chapter(), Some(8));
}
