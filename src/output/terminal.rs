//! Terminal output formatting with colors.

use colored::Colorize;

use crate::constants::REPORT_ALPHA;
use crate::result::TestResult;

/// Format a TestResult for human-readable terminal output.
///
/// The verdict line is judged at [`REPORT_ALPHA`].
pub fn format_result(result: &TestResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);
    let meta = &result.metadata;

    output.push_str("fasano-franceschini test\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Samples: n1 = {}, n2 = {} ({} dimensions, {} orthants)\n",
        meta.n1, meta.n2, meta.dim, meta.orthants
    ));
    output.push_str(&format!(
        "  Statistic: Dn = {:.4} (D1 = {:.4}, D2 = {:.4})\n",
        result.statistic, result.d1, result.d2
    ));
    output.push('\n');

    match (result.p_value, &result.permutation) {
        (Some(p), Some(summary)) => {
            if result.rejects_at(REPORT_ALPHA) {
                output.push_str(&format!(
                    "  {}\n\n",
                    "\u{26A0} Samples differ in distribution".yellow().bold()
                ));
            } else {
                output.push_str(&format!(
                    "  {}\n\n",
                    "\u{2713} No difference detected".green().bold()
                ));
            }
            output.push_str(&format!("    p-value: {:.4}\n", p));
            output.push_str(&format!(
                "    Permutations: {} ({} above, {} tied)\n",
                summary.permutations, summary.greater, summary.ties
            ));
            output.push_str(&format!("    Workers: {}\n", meta.workers));
            if let Some(seed) = meta.seed {
                output.push_str(&format!("    Seed: {}\n", seed));
            }
        }
        _ => {
            output.push_str(&format!(
                "  {}\n",
                "Permutation test skipped; no p-value".dimmed()
            ));
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!(
        "Note: verdict uses alpha = {}; runtime {:.3}s.\n",
        REPORT_ALPHA, meta.runtime_secs
    ));

    output
}
