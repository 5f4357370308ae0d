//! README generation and update notes.

use std::fs;
use std::path::Path;

use assistant_protocol::types::ReadmeOutcome;

use crate::error::{FsError, Result};

const README_NAME: &str = "README.md";

/// Write or extend `README.md` in `project_dir`. A missing or empty README
/// gets a full template named after the directory; an existing one gets an
/// "Updates Needed" note listing the requested sections.
pub fn update_readme(project_dir: &str, sections: Option<&[String]>) -> Result<ReadmeOutcome> {
    let dir = Path::new(project_dir);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {project_dir}"),
            project_dir,
        ));
    }

    let readme_path = dir.join(README_NAME);
    let readme_text = readme_path.to_string_lossy().into_owned();
    let readme_exists = readme_path.is_file();

    let current = if readme_exists {
        fs::read_to_string(&readme_path).map_err(|e| {
            FsError::io(
                format!("Error reading file {readme_text}"),
                Some(&readme_text),
                e,
            )
        })?
    } else {
        String::new()
    };

    let new_content = if !readme_exists || current.is_empty() {
        fresh_template(&project_title(dir, project_dir)?)
    } else {
        let mut content = current;
        if let Some(sections) = sections.filter(|s| !s.is_empty()) {
            content.push_str("\n\n## Updates Needed\n\n");
            content.push_str("The following sections need to be updated:\n\n");
            for section in sections {
                content.push_str(&format!("- {section}\n"));
            }
        }
        content
    };

    fs::write(&readme_path, new_content).map_err(|e| {
        FsError::io(
            format!("Failed to update file {readme_text}"),
            Some(&readme_text),
            e,
        )
    })?;

    Ok(ReadmeOutcome {
        success: true,
        message: "README updated successfully".to_string(),
        created_new: !readme_exists,
        path: readme_text,
    })
}

fn fresh_template(project_name: &str) -> String {
    let mut content = format!("# {project_name}\n\n");
    content.push_str("## Description\n\nProject description here.\n\n");
    content.push_str("## Installation\n\n```bash\npip install -r requirements.txt\n```\n\n");
    content.push_str("## Usage\n\nUsage instructions here.\n\n");
    content.push_str("## License\n\n[MIT](https://choosealicense.com/licenses/mit/)\n");
    content
}

/// Directory base name after resolving to an absolute path, so `.` titles
/// the README after the real project directory.
fn project_title(dir: &Path, origin: &str) -> Result<String> {
    let absolute = dir
        .canonicalize()
        .map_err(|e| FsError::io(format!("Error updating README in {origin}"), Some(origin), e))?;
    Ok(absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| absolute.to_string_lossy().into_owned()))
}
