//! SKILL.md rendering.

use super::{EXAMPLES_DIR, GUIDE_DIR};
use crate::config::PackagerConfig;
use crate::content::{DocumentRecord, ExampleRecord};

/// Keep descriptions from closing or opening markdown links.
fn escape_link_text(text: &str) -> String {
    text.replace('[', "(").replace(']', ")")
}

fn document_entry(doc: &DocumentRecord) -> String {
    let rel_path = format!("{GUIDE_DIR}/{}", doc.filename);
    format!(
        "- **{}** ([{rel_path}]({rel_path})): {}",
        doc.title,
        escape_link_text(&doc.description)
    )
}

fn example_entry(example: &ExampleRecord) -> String {
    let rel_path = format!("{EXAMPLES_DIR}/{}", example.filename);
    format!(
        "- **{}** ([{rel_path}]({rel_path})): {}",
        example.filename,
        escape_link_text(&example.description)
    )
}

/// Render the skill index.
///
/// Sections come out in a fixed order; the examples section is left out
/// when there are no examples. `license_file` is the license copied next to
/// the index.
#[must_use]
pub fn render_index(
    documents: &[DocumentRecord],
    examples: &[ExampleRecord],
    config: &PackagerConfig,
    license_file: &str,
) -> String {
    let skill = &config.skill;

    let mut lines = vec![
        "---".to_string(),
        format!("name: {}", skill.name),
        format!("description: {}", skill.description),
        "---".to_string(),
        String::new(),
        format!("# {}", skill.title),
        String::new(),
        skill.intro.clone(),
        String::new(),
        "## Documentation".to_string(),
        String::new(),
    ];

    lines.extend(documents.iter().map(document_entry));
    lines.push(String::new());

    if !examples.is_empty() {
        lines.push("## Code Examples".to_string());
        lines.push(String::new());
        lines.push(skill.examples_intro.clone());
        lines.push(String::new());
        lines.extend(examples.iter().map(example_entry));
        lines.push(String::new());
    }

    lines.push("## Usage Notes".to_string());
    lines.push(String::new());
    lines.extend(skill.usage_notes.iter().map(|note| format!("- {note}")));
    lines.push(String::new());

    lines.extend([
        "## License & Attribution".to_string(),
        String::new(),
        "### Content License".to_string(),
        String::new(),
        format!(
            "The documentation and example code in this skill are from the [{}]({}), {}, \
             distributed under the [{}]({license_file}).",
            skill.title, config.source.repo_url, skill.content_attribution, skill.content_license_name
        ),
        String::new(),
        "### Skill Structure License".to_string(),
        String::new(),
        skill.structure_attribution.clone(),
        String::new(),
    ]);

    lines.join("\n")
}
