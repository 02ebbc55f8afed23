//! Text presenter for quotes.

use crate::model::Quote;

/// Render a quote as a human-readable block. Pure function; the warning
/// template and the full template are mutually exclusive.
pub fn format_quote(quote: &Quote) -> String {
    let mut out = format!(
        "--------------------\n{}\n------------------------------\n",
        quote.submission_id
    );

    if let Some(warning) = &quote.warning {
        out.push_str(&format!(
            "       Heating Loss: {}\n Warning: {}",
            quote.estimated_heat_loss, warning
        ));
        return out;
    }

    out.push_str(&format!("  Estimated Heat Loss = {}\n", quote.estimated_heat_loss));
    if let Some(region) = &quote.design_region {
        out.push_str(&format!("  Design Region = {region}\n"));
    }
    if let Some(power) = quote.power_heat_loss {
        out.push_str(&format!("  Power Heat Loss = {power}\n"));
    }
    if let Some(pump) = &quote.recommended_heat_pump {
        out.push_str(&format!("  Recommended Heat Pump = {pump}\n"));
    }
    // The header stays even when the breakdown is empty.
    out.push_str("  Cost Breakdown\n");
    for item in quote.cost_breakdown.iter().flatten() {
        out.push_str(&format!("    {}, {}\n", item.label, item.cost));
    }
    if let Some(total) = quote.total_cost_with_vat {
        out.push_str(&format!("  Total Cost, including VAT = {total}\n"));
    }

    out
}
