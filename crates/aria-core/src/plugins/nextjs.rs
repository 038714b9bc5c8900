use std::{fs, path::Path};

use log::debug;
use serde_json::Value;

use super::{
    file_stem, write_files, AnalysisReport, GenerationContext, GenerationInput, GenerationOutcome,
    Plugin, ScaffoldResult,
};
use crate::{error::Result, models::Task};

const CONFIG_FILES: [&str; 5] = [
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "tsconfig.json",
    "tailwind.config.ts",
];

const NEXT_CONFIG: &str = "/** @type {import('next').NextConfig} */\nconst nextConfig = {};\n\nexport default nextConfig;\n";

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2017",
    "lib": ["dom", "dom.iterable", "esnext"],
    "allowJs": true,
    "skipLibCheck": true,
    "strict": true,
    "noEmit": true,
    "esModuleInterop": true,
    "module": "esnext",
    "moduleResolution": "bundler",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "jsx": "preserve",
    "incremental": true,
    "plugins": [{ "name": "next" }],
    "paths": { "@/*": ["./*"] }
  },
  "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx", ".next/types/**/*.ts"],
  "exclude": ["node_modules"]
}
"#;

const LAYOUT: &str = r#"export const metadata = {
  title: "Create Next App",
};

export default function RootLayout({ children }: { children: React.ReactNode }) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#;

const PAGE: &str = r#"export default function Home() {
  return (
    <main>
      <h1>Hello, World!</h1>
    </main>
  );
}
"#;

const GITIGNORE: &str = "node_modules/\n.next/\nout/\n.env*.local\nnext-env.d.ts\n";

/// Next.js 14+ applications using the App Router.
#[derive(Debug, Default)]
pub struct NextJsPlugin;

impl Plugin for NextJsPlugin {
    fn name(&self) -> &str {
        "nextjs"
    }

    fn description(&self) -> &str {
        "Next.js 14+ project scaffolding and analysis"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn analyze(&self, project: &Path) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::new("nextjs");

        let package_json = project.join("package.json");
        if package_json.is_file() {
            report.files_analyzed += 1;
            match read_next_version(&package_json) {
                Ok(Some(version)) => report.version = Some(version),
                Ok(None) => report
                    .issues
                    .push("next is not a dependency in package.json".to_string()),
                Err(issue) => report.issues.push(issue),
            }
        }

        report.files_analyzed += CONFIG_FILES
            .iter()
            .filter(|file| project.join(file).is_file())
            .count();

        let app_router = project.join("app").is_dir() || project.join("src/app").is_dir();
        report.app_router_used = Some(app_router);
        if !app_router {
            report
                .recommendations
                .push("Consider migrating to the App Router (app/ directory)".to_string());
        }
        if !project.join("tsconfig.json").is_file() {
            report
                .recommendations
                .push("Add a tsconfig.json to enable TypeScript".to_string());
        }

        Ok(report)
    }

    fn scaffold(&self, name: &str, target: &Path) -> ScaffoldResult {
        let project_dir = target.join(name);
        let files = [
            ("package.json", package_json(name)),
            ("next.config.mjs", NEXT_CONFIG.to_string()),
            ("tsconfig.json", TSCONFIG.to_string()),
            ("app/layout.tsx", LAYOUT.to_string()),
            ("app/page.tsx", PAGE.to_string()),
            (".gitignore", GITIGNORE.to_string()),
        ];

        match write_files(&project_dir, &files) {
            Ok(_) => ScaffoldResult::created(
                project_dir,
                vec![
                    format!("cd {name}"),
                    "npm install".to_string(),
                    "npm run dev".to_string(),
                ],
            ),
            Err(e) => ScaffoldResult::failed(format!(
                "Failed to create {}: {e}",
                project_dir.display()
            )),
        }
    }

    fn generate(
        &self,
        input: GenerationInput<'_>,
        context: &GenerationContext<'_>,
    ) -> GenerationOutcome {
        let GenerationInput::Task(task) = input else {
            return GenerationOutcome::failed("The nextjs plugin generates code from tasks only");
        };

        let relative = format!("app/{}/page.tsx", file_stem(&task.id));
        match write_files(context.output_dir, &[(relative.as_str(), task_page(task))]) {
            Ok(files) => GenerationOutcome::files(files),
            Err(e) => GenerationOutcome::failed(format!("Failed to write {relative}: {e}")),
        }
    }

    fn handles_stack(&self, tech_stack: &str) -> bool {
        let stack = tech_stack.to_lowercase();
        stack.contains("nextjs") || stack.contains("next.js")
    }
}

/// The `next` version from dependencies or devDependencies, without range
/// prefixes.
fn read_next_version(package_json: &Path) -> std::result::Result<Option<String>, String> {
    let content = fs::read_to_string(package_json).map_err(|e| {
        debug!("Failed to read {}: {e}", package_json.display());
        "Could not read package.json".to_string()
    })?;
    let manifest: Value =
        serde_json::from_str(&content).map_err(|_| "package.json is not valid JSON".to_string())?;

    let version = ["dependencies", "devDependencies"]
        .iter()
        .find_map(|section| manifest.get(section)?.get("next")?.as_str())
        .map(|v| v.trim_start_matches(['^', '~']).to_string());
    Ok(version)
}

fn package_json(name: &str) -> String {
    let manifest = serde_json::json!({
        "name": name,
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start",
            "lint": "next lint"
        },
        "dependencies": {
            "next": "14.2.3",
            "react": "^18",
            "react-dom": "^18"
        },
        "devDependencies": {
            "typescript": "^5",
            "@types/node": "^20",
            "@types/react": "^18",
            "@types/react-dom": "^18"
        }
    });
    format!("{manifest:#}\n")
}

fn task_page(task: &Task) -> String {
    let title = Value::String(task.title.clone());
    let mut page = String::new();
    for criterion in &task.acceptance_criteria {
        page.push_str(&format!("// Acceptance: {criterion}\n"));
    }
    page.push_str(&format!(
        "export default function Page() {{\n  return (\n    <main>\n      <h1>{{{title}}}</h1>\n    </main>\n  );\n}}\n"
    ));
    page
}
