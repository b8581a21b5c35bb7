//! Prompt text and message assembly for each generation call.

use crate::Stage;
use novelcraft_core::Message;

const SETTING_SYSTEM: &str = "You are an expert in fiction. Generate a detailed settings for a novel based on the following user input.
Now create a setting(Title, Genre, Theme, Tone, Setting, Characters) for your novel, as shown in the examples.
Character entries should only tell you about your character's personality and upbringing.
Just tell me the answer to the input. Don't give interactive answers.";

const SETTING_GREETING: &str = "I'm an AI that generates the best fiction setting. Feel free to tell me anything about your fiction setting.";

/// Few-shot (request, card) pairs shown before the caller's prompt.
const SETTING_EXAMPLES: [(&str, &str); 2] = [
    (
        "A romantic thriller about synthetic humans facing discrimination in a future New York.",
        "Title: The Wounded Ones
Genre: Romantic Thriller
Theme: Love and Discrimination
Tone: Tense and Emotional
Setting: Neo New York, 2156
Characters:
Eleanor Blackwood: A synthetic human rights advocate. Struggling to raise her two daughters after her husband was killed in an accident, Eleanor is an old friend of Frank Miller.
Lydia Blackwood: Eleanor's oldest daughter, 17-year-old Lydia, has '94%' human DNA.
Chloe Blackwood: Eleanor's youngest daughter, 12-year-old Chloe has '62%' human DNA.
Frank Miller: A seasoned detective and journalist who exposes discrimination against synthetic humans and advocates for their equality.",
    ),
    (
        "A dark science fiction thriller about a geneticist who experiments on war orphans.",
        "Title: Project-elven001
Genre: Thriller, Science Fiction
Theme: Ethics of Genetic Engineering, Exploitation, and Redemption
Tone: Dark, Intense, and Realistic
Setting: Near-future, Global Conflict Zones, Secret Laboratory
Characters:
Dr Viktor Hallstrom: A once-respected geneticist who has descended into madness, believing that creating elves is the pinnacle of genetic science.
Lena: A 12-year-old war orphan with a strong spirit.
Max: A 10-year-old boy with a keen intellect and innate curiosity.
Sarah Collins: A top journalist who has assembled a team to produce a documentary about the dangers of war and the devastation of post-war areas.",
    ),
];

const PROLOGUE_SYSTEM: &str = "You are an expert in fiction.
You create only the prologue for your novel using the setting(Title, Genre, Theme, Tone, Setting, Characters) you've been given.
Prologue is a monologue or dialog that serves to set the scene and set the tone before the main story begins.
The novel is told from the point of view of one of the Characters.
Just tell me the answer to the input. Don't give interactive answers.
If there are no setting(Title, Genre, Theme, Tone, Setting, Characters) in the input, give a blank answer.";

const SUMMARY_INSTRUCTIONS: &str = "Write a concise, realistic, and engaging summary based on the provided theme and previous context.
Develop the characters, setting, and plot with rich descriptions.
Ensure the summary flows smoothly, highlighting both hope and despair.
Make the narrative provocative and creative.
Avoid explicit reader interaction prompts or suggested paths.";

const RECOMMEND_INSTRUCTIONS: &str = "Based on the current summary prompt, provide three compelling recommendations for the next part of the summary.
Your recommendations should highlight each of the starkly emotional and realistic choices: hope, tragedy, despair, depression, and enjoyment.
Be extremely contextual and realistic with your recommendations.
Each recommendation should have 'Title': 'Description'. For example: 'Title': 'The Beginning of a Tragedy','Description': 'The people are kind to the new doctor in town, but under the guise of healing their wounds, the doctor slowly conducts experiments.'
The response format is exactly the same as the frames in the example.";

const SUMMARIZER_SYSTEM: &str = "Progressively summarize the lines of conversation provided, adding onto the previous summary and returning a new summary.
Keep every named character, place and unresolved plot thread. Reply with the summary only.";

/// Messages for the setting card call.
pub fn setting_messages(user_prompt: &str) -> Vec<Message> {
    let mut messages = vec![
        Message::system(SETTING_SYSTEM),
        Message::assistant(SETTING_GREETING),
    ];
    for (request, card) in SETTING_EXAMPLES {
        messages.push(Message::user(request));
        messages.push(Message::assistant(card));
    }
    messages.push(Message::user(user_prompt));
    messages
}

/// Messages for the prologue call.
pub fn prologue_messages(rendered_setting: &str) -> Vec<Message> {
    vec![
        Message::system(PROLOGUE_SYSTEM),
        Message::user(rendered_setting),
    ]
}

/// The human turn for a chapter.
///
/// Prior chapters reach the model as history messages, so the turn carries
/// only the story prompt and the writing instruction.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::chapter_prompt;
///
/// let prompt = chapter_prompt("  A storm hits ");
/// assert!(prompt.starts_with("Story Prompt: A storm hits\nWrite a concise"));
/// ```
pub fn chapter_prompt(story_prompt: &str) -> String {
    format!(
        "Story Prompt: {}\nWrite a concise, realistic, and engaging summary based on the above information and the previous story. Highlight both hope and despair in the narrative. Make it provocative and creative.",
        story_prompt.trim()
    )
}

/// Messages for the chapter prose call.
pub fn chapter_messages(stage: Stage, history: &[Message], prompt: &str) -> Vec<Message> {
    staged_messages(stage, SUMMARY_INSTRUCTIONS, history, prompt)
}

/// Messages for the recommendation call, conditioned on the next stage.
pub fn recommendation_messages(
    next_stage: Stage,
    history: &[Message],
    current_story: &str,
) -> Vec<Message> {
    staged_messages(next_stage, RECOMMEND_INSTRUCTIONS, history, current_story)
}

/// Messages for folding evicted turns into the running summary.
pub fn summarizer_messages(previous: Option<&str>, new_lines: &str) -> Vec<Message> {
    vec![
        Message::system(SUMMARIZER_SYSTEM),
        Message::user(format!(
            "Current summary:\n{}\n\nNew lines of conversation:\n{}\n\nNew summary:",
            previous.unwrap_or(""),
            new_lines
        )),
    ]
}

fn staged_messages(
    stage: Stage,
    instructions: &str,
    history: &[Message],
    human: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(format!(
        "You are an experienced novelist who {}\n{}",
        stage.description(),
        instructions
    )));
    messages.extend_from_slice(history);
    messages.push(Message::user(human));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_setting;
    use novelcraft_core::Role;

    #[test]
    fn test_few_shot_cards_parse_cleanly() {
        for (_, card) in SETTING_EXAMPLES {
            let setting = parse_setting(card);
            assert!(!setting.title().is_empty());
            assert!(!setting.characters().is_empty());
            assert!(!setting.tone().is_empty());
        }
    }

    #[test]
    fn test_setting_messages_layout() {
        let messages = setting_messages("A heist on Mars");
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].role(), &Role::System);
        assert_eq!(messages[1].role(), &Role::Assistant);
        assert_eq!(messages[6].content(), "A heist on Mars");
    }

    #[test]
    fn test_staged_system_prompt_names_stage() {
        let messages = chapter_messages(Stage::Crisis, &[], "p");
        assert!(messages[0].content().contains(Stage::Crisis.description()));
        assert_eq!(messages.last().map(|m| m.content().as_str()), Some("p"));
    }
}
