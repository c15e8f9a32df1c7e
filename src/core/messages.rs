//! Default English message catalog
//!
//! Turns a [`Diagnostic`] into display text by substituting its variables
//! into a `{name}` template. Unknown placeholders are left in place.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::diagnostic::{Diagnostic, MessageId};

/// Template for a message id
pub fn template(message_id: MessageId) -> &'static str {
    match message_id {
        MessageId::EntryNotExist => {
            "The file or directory ({filename}) does not exist or you do not have permission to see it."
        }
        MessageId::FileNotExist => "The file you are looking for ({filename}) does not exist.",
        MessageId::EntryMustBeFile => "Filename ({filename}) cannot be a directory - must be a file.",
        MessageId::FileNotReadable => "You do not have permission to read the file ({filename}).",
        MessageId::FileNotWriteable => {
            "You do not have permission to write to the file ({filename})."
        }
        MessageId::DirectoryNotExist => {
            "The directory you are looking for ({dirname}) does not exist."
        }
        MessageId::EntryMustBeDirectory => {
            "Directory ({dirname}) cannot be a file - must be a directory."
        }
        MessageId::DirectoryNotReadable => {
            "You do not have permission to read the directory ({dirname})."
        }
        MessageId::DirectoryNotWriteable => {
            "You do not have permission to write to the directory ({dirname})."
        }
        MessageId::DirectoryNotListable => {
            "Directory ({dirname}) exists and is readable but there was an error listing its contents: {error}"
        }
        MessageId::FileNotOpened => "Unable to open the file ({filename}) in mode {mode}: {error}",
        MessageId::FileNotClosed => "There was an error closing the file ({filename}): {error}",
        MessageId::FileIoError => {
            "There was an error during {operation} on the file ({filename}): {error}"
        }
        MessageId::ModeForbidsRead => {
            "The file ({filename}) was opened in mode {mode}, which does not permit reading."
        }
        MessageId::ModeForbidsWrite => {
            "The file ({filename}) was opened in mode {mode}, which does not permit writing."
        }
    }
}

fn placeholder_regex() -> Option<&'static Regex> {
    static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").ok())
        .as_ref()
}

/// Render a diagnostic with the default catalog
pub fn render(diagnostic: &Diagnostic) -> String {
    let input = template(diagnostic.message_id());
    let Some(re) = placeholder_regex() else {
        return input.to_string();
    };

    let mut last_end = 0;
    let mut output = String::new();

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };

        output.push_str(&input[last_end..full_match.start()]);
        match diagnostic.variable(&cap[1]) {
            Some(value) => output.push_str(value),
            None => output.push_str(full_match.as_str()),
        }
        last_end = full_match.end();
    }

    output.push_str(&input[last_end..]);
    output
}
