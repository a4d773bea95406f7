//! Incremental-reveal expansion.
//!
//! A page configured with `incremental_bullets` is expanded into a sequence
//! of build slides: one page per cumulative prefix of its content ending at
//! each list item, so each step reveals one more bullet. Image lines are
//! carried unchanged into every step. This is a pure function over the
//! page's content lines.

use crate::model::Page;

/// Expand one page into its reveal steps.
///
/// Pages without `incremental_bullets`, and pages without any list item,
/// come back unchanged. When content follows the last list item, a final
/// full page is added so no authored line is lost.
pub fn expand_reveal_steps(page: Page) -> Vec<Page> {
    if !page.config.incremental_bullets {
        return vec![page];
    }

    let item_indices: Vec<usize> = page
        .content_lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_list_item(line))
        .map(|(i, _)| i)
        .collect();

    if item_indices.is_empty() {
        return vec![page];
    }

    let mut steps = Vec::with_capacity(item_indices.len() + 1);
    for &end in &item_indices {
        let mut step = page.clone();
        step.content_lines = page.content_lines[..=end].to_vec();
        step.line_numbers = page.line_numbers[..=end].to_vec();
        steps.push(step);
    }

    let last_item = *item_indices.last().expect("checked non-empty");
    if last_item + 1 < page.content_lines.len() {
        steps.push(page);
    }

    steps
}

/// Whether a line is an ordered or unordered list item.
fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("* ") || trimmed.starts_with("- ") || trimmed.starts_with("\u{2022} ") {
        return true;
    }
    match trimmed.split_once(". ") {
        Some((number, _)) => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
