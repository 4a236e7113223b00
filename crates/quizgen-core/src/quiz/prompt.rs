use quizgen_schema::Rules;

use crate::error::QuizError;

/// System prompt describing the object-rooted document the schema constrains the model to.
pub(crate) fn system_prompt(rules: &Rules) -> String {
    let mut prompt = String::from(
        r#"You are a quiz generator. You MUST output ONLY a JSON object that matches this shape exactly:

{
  "Questions": [
    {
      "Question": string,
      "WaitTimeInSec": integer,
      "Answer": {
        "AnswerType": 0 or 1,
        "TrueFalseAnswers": { "IsTrueOrFlase": boolean }   (ONLY if AnswerType = 0),
        "MultiChoiceAnswer": [{"Text": string, "IsCorrect": boolean}, ...] (ONLY if AnswerType = 1)
      }
    }
  ]
}

RULES:
- Output MUST be valid JSON and ONLY the JSON object (no markdown, no comments, no extra text).
- Language and style: follow the user instruction precisely.
- If AnswerType=0: include TrueFalseAnswers and DO NOT include MultiChoiceAnswer at all (not as [] or null).
- If AnswerType=1: include MultiChoiceAnswer and DO NOT include TrueFalseAnswers at all.
- Every multiple-choice question marks at least one option with IsCorrect=true and has no duplicate options.
"#,
    );

    let mut rules_lines = Vec::new();
    if let Some(min) = rules.min_questions {
        rules_lines.push(format!("- Produce at least {min} questions."));
    }
    if rules.require_both_kinds {
        rules_lines.push("- Mix question types: include both AnswerType=0 and AnswerType=1 questions.".to_owned());
    }
    if let Some(count) = rules.options_per_question {
        rules_lines.push(format!("- Multiple-choice questions have exactly {count} options."));
    }
    if rules.single_correct {
        rules_lines.push("- Mark exactly ONE option as IsCorrect=true.".to_owned());
    }
    if rules.unique_questions {
        rules_lines.push("- Avoid duplicate questions and ambiguous trick wording.".to_owned());
    }
    rules_lines.push(match rules.max_wait_secs {
        Some(max) => format!(
            "- WaitTimeInSec: a reasonable value between {} and {max}.",
            rules.min_wait_secs
        ),
        None => format!("- WaitTimeInSec: at least {}.", rules.min_wait_secs),
    });

    prompt.push_str(&rules_lines.join("\n"));
    prompt.push('\n');
    prompt.push_str("\nIf you are unsure about a fact, ask a safer, general-knowledge question rather than inventing.");
    prompt
}

/// Asks the model to fix a response that parsed but broke a rule.
pub(crate) fn repair_prompt(instruction: &str, raw: &str, error: &QuizError) -> String {
    format!(
        "You previously produced invalid JSON for the required schema.\n\
         Fix it and output ONLY the corrected JSON object.\n\n\
         Original user request:\n{instruction}\n\n\
         Invalid JSON you produced:\n{raw}\n\n\
         Problem: {error}\n\n\
         Fix rules:\n\
         - Remove fields that are not allowed for the given AnswerType.\n\
         - Keep every other rule of the original request.\n\
         - Output ONLY JSON.\n"
    )
}

/// Re-sends the request after a failure that produced no usable response.
pub(crate) fn retry_prompt(instruction: &str, error: &QuizError) -> String {
    format!(
        "{instruction}\n\n\
         IMPORTANT: Follow the schema strictly and output ONLY JSON. Previous error: {error}"
    )
}
