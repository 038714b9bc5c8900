//! Prompt text sent to the model for plan decomposition.

use crate::client::ChatMessage;

const SYSTEM_PROMPT: &str = r#"You are an expert software architect and project planner. Your task is to decompose complex software development goals into structured, executable plans.

Output MUST be valid JSON with this structure:
{
    "goal": "original goal",
    "architecture_overview": "high-level description",
    "total_hours": 100,
    "top_modules": [
        {
            "id": "module-1",
            "name": "Module Name",
            "description": "What this module does",
            "estimated_hours": 20,
            "tasks": [
                {
                    "id": "task-1",
                    "title": "Task title",
                    "description": "Detailed description",
                    "priority": "high|medium|low",
                    "estimated_hours": 4,
                    "dependencies": ["other-task-id"],
                    "acceptance_criteria": ["list", "of", "criteria"]
                }
            ]
        }
    ],
    "risks": ["list of potential risks"],
    "success_criteria": ["list of success metrics"]
}"#;

/// The fixed system instruction, including the JSON Schema of a plan when
/// the `schema` feature is enabled.
pub fn system_prompt() -> String {
    let mut prompt = SYSTEM_PROMPT.to_string();
    #[cfg(feature = "schema")]
    {
        let schema = schemars::schema_for!(crate::models::Plan);
        if let Ok(schema) = serde_json::to_string_pretty(&schema) {
            prompt.push_str("\n\nThe document must validate against this JSON Schema:\n");
            prompt.push_str(&schema);
        }
    }
    prompt
}

/// The user message describing one decomposition request.
pub fn user_prompt(goal: &str, tech_stack: &str, constraints: &[String]) -> String {
    let tech_stack = if tech_stack.trim().is_empty() {
        "Not specified"
    } else {
        tech_stack
    };
    let constraints = if constraints.is_empty() {
        "None".to_string()
    } else {
        constraints
            .iter()
            .map(|c| format!("\n- {c}"))
            .collect::<String>()
    };

    format!(
        "Project Goal: {goal}
Technology Stack: {tech_stack}
Constraints: {constraints}

Please decompose this into a structured development plan. Consider:
1. Modular architecture
2. Task dependencies
3. Risk assessment
4. Realistic time estimates
5. Clear acceptance criteria

Return JSON only, no other text.
"
    )
}

/// Both messages for a decomposition request.
pub fn decomposition_messages(
    goal: &str,
    tech_stack: &str,
    constraints: &[String],
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(goal, tech_stack, constraints)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_request() {
        let prompt = user_prompt(
            "Build a shop",
            "Next.js, Stripe",
            &["Ship in 2 weeks".to_string(), "No SQL".to_string()],
        );
        assert!(prompt.contains("Project Goal: Build a shop"));
        assert!(prompt.contains("Technology Stack: Next.js, Stripe"));
        assert!(prompt.contains("- Ship in 2 weeks"));
        assert!(prompt.contains("- No SQL"));
    }

    #[test]
    fn test_user_prompt_placeholders() {
        let prompt = user_prompt("Build a shop", "", &[]);
        assert!(prompt.contains("Technology Stack: Not specified"));
        assert!(prompt.contains("Constraints: None"));
    }

    #[test]
    fn test_system_prompt_requests_top_modules() {
        let messages = decomposition_messages("g", "", &[]);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("\"top_modules\""));
        assert_eq!(messages[1].role, "user");
    }
}
