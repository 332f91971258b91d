//! `choices` command handler.

use clap::Parser;
use color_eyre::Result;

use super::{OutputFormat, SelectorArgs};
use crate::context::AppContext;
use crate::services::{ChoiceList, ChoiceLoader};

/// Print the flattened choice list.
#[derive(Parser)]
pub struct ChoicesCommand {
    #[command(flatten)]
    pub selector: SelectorArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ChoicesCommand {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        let mut loader = self.selector.loader(ctx)?;
        let list = loader.load_choice_list(None)?;

        tracing::info!(count = list.len(), "Listed choices");
        println!("{}", render(&list, self.format)?);
        Ok(())
    }
}

fn render(list: &ChoiceList, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => list
            .iter()
            .map(|view| format!("{}\t{}", view.value, view.label))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&list.iter().collect::<Vec<_>>())?
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use indexmap::IndexMap;

    fn list() -> ChoiceList {
        let mut by_label = IndexMap::new();
        by_label.insert("News (news)".to_string(), CategoryId::from("1"));
        by_label.insert("-- Sports".to_string(), CategoryId::from("2"));
        ChoiceList::new(by_label, None)
    }

    #[test]
    fn test_render_text() {
        let out = render(&list(), OutputFormat::Text).unwrap();
        assert_eq!(out, "1\tNews (news)\n2\t-- Sports");
    }

    #[test]
    fn test_render_json() {
        let out = render(&list(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["label"], "-- Sports");
        assert_eq!(parsed[1]["choice"], "2");
        assert_eq!(parsed[0]["value"], "1");
    }
}
