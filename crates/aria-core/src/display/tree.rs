//! Box-drawing tree of a plan's modules and tasks.

use std::fmt;

use super::Hours;
use crate::models::{Module, Plan, Task};

/// Plain-text tree: goal at the root, modules below it, tasks with their
/// status icon and details below each module.
pub struct PlanTree<'a>(pub &'a Plan);

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let last = self.children.len().saturating_sub(1);
        for (index, child) in self.children.iter().enumerate() {
            let (branch, indent) = if index == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{prefix}{branch}{}", child.label)?;
            child.write_children(f, &format!("{prefix}{indent}"))?;
        }
        Ok(())
    }
}

fn module_node(module: &Module) -> Node {
    Node {
        label: format!("📦 {} ({}h)", module.name, Hours(module.estimated_hours)),
        children: module.tasks.iter().map(task_node).collect(),
    }
}

fn task_node(task: &Task) -> Node {
    let mut children = Vec::new();
    if !task.description.is_empty() {
        children.push(Node::leaf(format!("📝 {}", task.description)));
    }
    if !task.dependencies.is_empty() {
        children.push(Node::leaf(format!(
            "🔗 Depends on: {}",
            task.dependencies.join(", ")
        )));
    }
    if !task.acceptance_criteria.is_empty() {
        children.push(Node {
            label: "🎯 Acceptance Criteria".to_string(),
            children: task
                .acceptance_criteria
                .iter()
                .map(|c| Node::leaf(format!("• {c}")))
                .collect(),
        });
    }

    Node {
        label: format!(
            "{} [{}] {} ({}h)",
            task.status.icon(),
            task.priority,
            task.title,
            Hours(task.estimated_hours)
        ),
        children,
    }
}

impl fmt::Display for PlanTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let root = Node {
            label: format!("🎯 {}", plan.goal),
            children: plan.modules.iter().map(module_node).collect(),
        };
        writeln!(f, "{}", root.label)?;
        root.write_children(f, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_layout() {
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "goal": "Todo",
            "top_modules": [
                {"id": "m1", "name": "Backend", "estimated_hours": 3, "tasks": [
                    {"id": "t1", "title": "API", "estimated_hours": 3,
                     "acceptance_criteria": ["returns 200"], "status": "completed"}
                ]},
                {"id": "m2", "name": "Frontend", "tasks": [
                    {"id": "t2", "title": "UI", "dependencies": ["t1"]}
                ]}
            ]
        }))
        .unwrap();

        let tree = PlanTree(&plan).to_string();
        let lines: Vec<&str> = tree.lines().collect();

        assert_eq!(lines[0], "🎯 Todo");
        assert_eq!(lines[1], "├── 📦 Backend (3h)");
        assert_eq!(lines[2], "│   └── ✓ [medium] API (3h)");
        assert_eq!(lines[3], "│       └── 🎯 Acceptance Criteria");
        assert_eq!(lines[4], "│           └── • returns 200");
        assert_eq!(lines[5], "└── 📦 Frontend (0h)");
        assert_eq!(lines[6], "    └── ○ [medium] UI (0h)");
        assert_eq!(lines[7], "        └── 🔗 Depends on: t1");
    }
}
