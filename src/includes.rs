//! Compiler include-directory extraction from the generated project file.
//!
//! Building a catkin workspace with the CodeBlocks CMake generator produces
//! `build/Project.cbp`, an XML document describing every build target in the
//! workspace together with its compiler settings. This module parses that
//! document and collects the include directories declared by package targets,
//! which editors need to configure C/C++ code intelligence.
//!
//! The extractor is a pure function of a path and a document: it spawns no
//! processes and reads no environment, so it can be tested against in-memory
//! XML. The document is parsed fresh on every call and discarded on return.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{ExtractError, ProjectFileError};

/// Location of the generated CodeBlocks project file, relative to the
/// workspace root.
pub const PROJECT_FILE: &str = "build/Project.cbp";

/// The `type` option value that marks a buildable package target.
///
/// Targets with any other type (tests, utility targets) do not contribute
/// include directories.
const PACKAGE_TARGET_TYPE: &str = "1";

/// Extract the include directories declared by a workspace's package targets.
///
/// Reads `<workspace_root>/build/Project.cbp`, parses it, and returns the
/// directories in document order with duplicates suppressed (each directory
/// keeps the position of its first occurrence).
///
/// # Arguments
///
/// * `workspace_root` - The root of the catkin workspace (the directory that
///   contains `build/` after a successful build)
///
/// # Returns
///
/// The ordered, deduplicated list of include directory paths. The list is
/// empty when no target qualifies.
///
/// # Errors
///
/// - [`ExtractError::WorkspaceNotBuilt`] if the project file is missing or
///   unreadable (the workspace was never built)
/// - [`ExtractError::MalformedProject`] if the file is not valid XML or does
///   not follow the CodeBlocks project schema
pub fn extract_include_dirs(workspace_root: &Path) -> Result<Vec<String>, ExtractError> {
    let path = workspace_root.join(PROJECT_FILE);

    let content = fs::read_to_string(&path).map_err(|source| ExtractError::WorkspaceNotBuilt {
        path: path.clone(),
        source,
    })?;

    parse_include_dirs(&content).map_err(|source| ExtractError::MalformedProject { path, source })
}

/// Parse a CodeBlocks project document and collect package include directories.
///
/// The schema path is fixed: `<CodeBlocks_project_file>` → `<Project>` →
/// `<Build>` → a sequence of `<Target>` elements. Each target is visited in
/// document order; a target contributes only when its effective type marks it
/// as a package target *and* it declares a `<Compiler>` block. Within a
/// contributing target, every `<Add directory="...">` entry appends its path
/// unless the path was already collected.
///
/// # Errors
///
/// Returns a [`ProjectFileError`] when the content is not well-formed XML or
/// one of the fixed schema elements is absent.
pub fn parse_include_dirs(content: &str) -> Result<Vec<String>, ProjectFileError> {
    let doc = Document::parse(content)?;

    let root = doc.root_element();
    if !root.has_tag_name("CodeBlocks_project_file") {
        return Err(ProjectFileError::MissingElement("CodeBlocks_project_file"));
    }

    let project = child_element(root, "Project")?;
    let build = child_element(project, "Build")?;

    let mut includes: Vec<String> = Vec::new();

    for target in build.children().filter(|n| n.has_tag_name("Target")) {
        if effective_target_type(target) != PACKAGE_TARGET_TYPE {
            // Not a package target (e.g. a test) -> skip
            continue;
        }

        let Some(compiler) = target.children().find(|n| n.has_tag_name("Compiler")) else {
            continue;
        };

        for add in compiler.children().filter(|n| n.has_tag_name("Add")) {
            if let Some(directory) = add.attribute("directory")
                && !directory.is_empty()
                && !includes.iter().any(|known| known == directory)
            {
                includes.push(directory.to_string());
            }
        }
    }

    Ok(includes)
}

/// Find a required direct child element by tag name.
fn child_element<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, ProjectFileError> {
    parent
        .children()
        .find(|n| n.has_tag_name(name))
        .ok_or(ProjectFileError::MissingElement(name))
}

/// Resolve a target's effective type from its `<Option>` children.
///
/// Generated projects may legally declare the `type` option more than once;
/// the last declaration reflects the generator's decision, so the last value
/// seen wins. Targets that never declare a type default to `"0"`.
fn effective_target_type<'a>(target: Node<'a, '_>) -> &'a str {
    let mut target_type = "0";

    for option in target.children().filter(|n| n.has_tag_name("Option")) {
        if let Some(value) = option.attribute("type") {
            target_type = value;
        }
    }

    target_type
}
