//! Grader prompt templates. Placeholders: `{QUERY}`, `{TARGET}`, `{RESPONSE}`.

/// Explanation + TRUE/FALSE grading, after the FRAMES benchmark autorater.
pub const FRAMES_PROMPT: &str = r#"
===Task===
I need your help in evaluating an answer provided by an LLM against a ground truth answer. Your task is to determine if the ground truth answer is present in the LLM's response. Please analyze the provided data and make a decision.

===Instructions===
1. Carefully compare the "Predicted Answer" with the "Ground Truth Answer".
2. Consider the substance of the answers - look for equivalent information or correct answers. Do not focus on exact wording unless the exact wording is crucial to the meaning.
3. Your final decision should be based on whether the meaning and the vital facts of the "Ground Truth Answer" are present in the "Predicted Answer".

===Input Data===
- Question: {QUERY}
- Predicted Answer: {RESPONSE}
- Ground Truth Answer: {TARGET}

===Output Format===
Provide your final evaluation in the following format:

Explanation: (How you made the decision?)

Decision: ("TRUE" or "FALSE")

Please proceed with the evaluation.
"#;

/// Single-letter grading, after the SimpleQA grader.
pub const SIMPLEQA_PROMPT: &str = r#"
Your job is to look at a question, a gold target, and a predicted answer, and then assign a grade of either ["CORRECT", "INCORRECT", "NOT_ATTEMPTED"].

A predicted answer is CORRECT when it contains the gold target without contradicting it. Hedging is fine as long as the gold target is fully present and nothing in the answer contradicts it. Capitalization, punctuation, grammar and order do not matter.

A predicted answer is INCORRECT when any statement in it contradicts the gold target, including hedged answers that list several candidates where one of them is wrong.

A predicted answer is NOT_ATTEMPTED when the gold target is not given in full and nothing in the answer contradicts it, for example "I don't know" or an answer that asks for more context.

Also note:
- When the gold target is a number, the predicted answer must be correct to the last significant figure of the gold target.
- The gold target may hold more information than the question asks for. The predicted answer only needs to contain the information asked for.
- Information clearly inferable from the question can be omitted from the predicted answer.
- Small typos in names are acceptable when it is clearly the same name.

Here is a new example. Simply reply with either CORRECT, INCORRECT, NOT ATTEMPTED. Don't apologize or correct yourself if there was a mistake; we are just trying to grade the answer.
```
Question: {QUERY}
Gold target: {TARGET}
Predicted answer: {RESPONSE}
```

Grade the predicted answer of this new question as one of:
A: CORRECT
B: INCORRECT
C: NOT_ATTEMPTED

Just return the letters "A", "B", or "C", with no text around it.
"#;
