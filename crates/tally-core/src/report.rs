//! Report assembly seams
//!
//! Narrative text and report rendering are pluggable capabilities injected
//! by the caller, never discovered through runtime probes. The defaults
//! here are deterministic: a fixed narrative sentence and a plain-text
//! renderer. Richer backends (an LLM narrator, a PDF renderer) live
//! outside this crate and implement the same traits.

use crate::models::Summary;

/// Produces a narrative explanation of a summary. Implementations must not
/// invent numbers; everything they state comes from the summary itself.
pub trait NarrativeGenerator {
    fn narrative(&self, summary: &Summary) -> String;
}

/// The deterministic fallback narrator.
pub struct PlainNarrative;

impl NarrativeGenerator for PlainNarrative {
    fn narrative(&self, _summary: &Summary) -> String {
        "This report summarizes your financial position. \
         Income, expenses, and key trends are described in the attached tables."
            .to_string()
    }
}

/// Renders a summary plus narrative into a finished report document.
pub trait ReportRenderer {
    fn render(&self, summary: &Summary, narrative: &str) -> String;
}

/// Plain-text report renderer: title, summary lines, category table,
/// narrative section.
pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, summary: &Summary, narrative: &str) -> String {
        let mut out = String::new();
        out.push_str("Tally Financial Report\n");
        out.push_str("Summary\n");
        out.push_str(&format!("Total income: {}\n", summary.total_income));
        out.push_str(&format!("Total expense: {}\n", summary.total_expense));
        out.push_str(&format!("Net cash flow: {}\n", summary.net_cash_flow));

        if !summary.category_totals.is_empty() {
            out.push_str("\nBy category\n");
            for entry in &summary.category_totals {
                out.push_str(&format!("{}\t{}\n", entry.category, entry.total));
            }
        }

        out.push_str("\nNarrative\n");
        out.push_str(narrative);
        out.push('\n');
        out
    }
}
