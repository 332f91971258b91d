//! `resolve` command handler.

use clap::Parser;
use color_eyre::Result;
use indexmap::IndexMap;

use super::SelectorArgs;
use crate::context::AppContext;
use crate::models::CategoryId;
use crate::services::{ChoiceList, ChoiceLoader};

/// Resolve submitted values to category ids.
#[derive(Parser)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub selector: SelectorArgs,

    /// Submitted values
    #[arg(required = true)]
    pub values: Vec<String>,
}

impl ResolveCommand {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        let mut loader = self.selector.loader(ctx)?;
        let list = loader.load_choice_list(None)?;
        let resolved = loader.load_choices_for_values(&self.values, None)?;

        for line in resolved_lines(&list, &self.values, &resolved) {
            println!("{}", line);
        }

        tracing::info!(
            requested = self.values.len(),
            resolved = resolved.len(),
            "Resolved values"
        );
        Ok(())
    }
}

/// One `value\tchoice\tlabel` line per resolved value, in input order.
fn resolved_lines(
    list: &ChoiceList,
    values: &[String],
    resolved: &IndexMap<usize, CategoryId>,
) -> Vec<String> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match resolved.get(&index) {
            Some(choice) => {
                let label = list.labels().get(value).map(String::as_str).unwrap_or("");
                Some(format!("{}\t{}\t{}", value, choice, label))
            }
            None => {
                tracing::warn!(value = %value, "Value is not a valid choice");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_warnings;

    #[test]
    fn test_resolved_lines_skip_unknown_values() {
        let mut by_label = IndexMap::new();
        by_label.insert("News (news)".to_string(), CategoryId::from("1"));
        by_label.insert("-- Sports".to_string(), CategoryId::from("2"));
        let list = ChoiceList::new(by_label, None);

        let values = vec!["2".to_string(), "nope".to_string(), "1".to_string()];
        let resolved = list.choices_for_values(&values);

        let (lines, warnings) = capture_warnings(|| resolved_lines(&list, &values, &resolved));
        assert_eq!(lines, vec!["2\t2\t-- Sports", "1\t1\tNews (news)"]);
        assert_eq!(warnings, vec!["Value is not a valid choice"]);
    }
}
