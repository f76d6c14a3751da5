//! Typed errors for workspace inspection.
//!
//! The include-directory extractor distinguishes exactly two failure
//! conditions: the workspace has never been built (the generated project file
//! is missing), or the project file exists but cannot be understood. Both
//! carry messages suitable for direct display; the caller owns notification
//! and no recovery is attempted internally.

use std::path::PathBuf;

use thiserror::Error;

/// Failure conditions when extracting data from a workspace.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The generated project file does not exist or could not be read.
    ///
    /// Recoverable by the user re-running a build (`catkin_make`); the tool
    /// itself takes no corrective action.
    #[error("cannot read {}: please build the workspace first", path.display())]
    WorkspaceNotBuilt {
        /// Path to the missing `Project.cbp` file.
        path: PathBuf,

        /// The underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// The project file exists but is not well-formed or does not match the
    /// expected CodeBlocks schema.
    #[error("malformed project file {}: {source}", path.display())]
    MalformedProject {
        /// Path to the offending `Project.cbp` file.
        path: PathBuf,

        /// What exactly went wrong while reading the document.
        #[source]
        source: ProjectFileError,
    },
}

/// The ways a `Project.cbp` document can be malformed.
#[derive(Debug, Error)]
pub enum ProjectFileError {
    /// The file is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    /// The XML is well-formed but a required element of the CodeBlocks
    /// schema is missing.
    #[error("missing <{0}> element")]
    MissingElement(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_not_built_message_mentions_build_step() {
        let err = ExtractError::WorkspaceNotBuilt {
            path: PathBuf::from("/ws/build/Project.cbp"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        let message = err.to_string();
        assert!(message.contains("/ws/build/Project.cbp"));
        assert!(message.contains("build the workspace first"));
    }

    #[test]
    fn test_malformed_project_reports_missing_element() {
        let err = ExtractError::MalformedProject {
            path: PathBuf::from("/ws/build/Project.cbp"),
            source: ProjectFileError::MissingElement("Build"),
        };

        assert!(err.to_string().contains("missing <Build> element"));
    }
}
