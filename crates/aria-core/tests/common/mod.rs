use aria_core::{client::ChatMessage, client::CompletionOptions, ModelClient, Result};

/// Model client that always answers with the same text.
pub struct CannedModel(pub &'static str);

impl ModelClient for CannedModel {
    fn complete(&self, _messages: &[ChatMessage], _options: CompletionOptions) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// A model reply with prose around a three-task plan, one of them carrying
/// no id.
pub const TODO_REPLY: &str = r#"Sure! Here is the plan:
{
  "goal": "Build a todo app",
  "architecture_overview": "REST API with a small web client",
  "top_modules": [
    {
      "id": "module-backend",
      "name": "Backend",
      "tasks": [
        {"id": "task-schema", "title": "Design schema", "priority": "high", "estimated_hours": 2},
        {"title": "Create API", "estimated_hours": "3", "dependencies": ["task-schema"]}
      ]
    },
    {
      "name": "Frontend",
      "tasks": [
        {"id": "task-ui", "title": "Build UI", "estimated_hours": 4.5,
         "acceptance_criteria": ["Lists todos", "Adds todos"]}
      ]
    }
  ],
  "risks": ["Scope creep"]
}
Let me know if you need anything else."#;
