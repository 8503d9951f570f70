//! Tag listing command.

use std::io::Write;

use crate::cli::TagsArgs;
use crate::client::SynseClient;
use crate::error::CliError;
use crate::output::{text_row, FormatFlags, Printer, Record};

/// Handler for the tags command.
pub struct TagsCommand {
    client: SynseClient,
}

impl TagsCommand {
    /// Create a new tags command handler.
    #[must_use]
    pub fn new(client: SynseClient) -> Self {
        Self { client }
    }

    /// Execute the tags command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or rendering fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        flags: FormatFlags,
        args: &TagsArgs,
    ) -> Result<(), CliError> {
        let tags = self.client.tags(args.ns.as_deref()).await?;
        render(out, flags, tags)
    }
}

fn render<W: Write>(out: &mut W, flags: FormatFlags, tags: Vec<String>) -> Result<(), CliError> {
    let records: Vec<Record> = tags.into_iter().map(Record::Text).collect();
    let mut printer = Printer::new(out, flags);
    printer.set_header(&["TAG"]);
    printer.set_row_fn(text_row);
    printer.write_many(&records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_tags_under_header() {
        let mut buf = Vec::new();
        render(
            &mut buf,
            FormatFlags::default(),
            vec!["default/fan".into(), "system/type:led".into()],
        )
        .unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["TAG", "default/fan", "system/type:led"]);
    }

    #[test]
    fn render_json_keeps_plain_strings() {
        let flags = FormatFlags {
            json: true,
            ..Default::default()
        };
        let mut buf = Vec::new();
        render(&mut buf, flags, vec!["default/fan".into()]).unwrap();

        let parsed: Vec<String> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, vec!["default/fan"]);
    }
}
