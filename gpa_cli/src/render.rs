//! Plain-text rendering of engine output.

use std::fmt::Write;

use gpa_core::calculations::TargetPlan;
use gpa_core::{DisplayRecord, GradeScale, GradeScaleRegistry};

pub fn render_record(title: &str, record: &DisplayRecord) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "═══════════════════════════════════════");
    let _ = writeln!(output, "  {}", title);
    let _ = writeln!(output, "═══════════════════════════════════════");
    let _ = writeln!(output);
    let _ = writeln!(output, "  {:<19}{}", "Average:", record.average_display);
    let _ = writeln!(output, "  {:<19}{:.2}", "Credits counted:", record.total_weight);
    let _ = writeln!(output, "  {:<19}{:.2}", "Credits attempted:", record.attempted_weight);
    let _ = writeln!(output, "  {:<19}{:.2}", "Quality points:", record.total_weighted_sum);
    let _ = writeln!(output, "  {:<19}{}", "Courses counted:", record.included_count);

    if !record.classifications.is_empty() {
        let _ = writeln!(output);
        for c in &record.classifications {
            let _ = write!(output, "  {}: {}", c.set_name, c.label);
            if let Some(shortfall) = c.weight_shortfall {
                let _ = write!(output, " ({:.2} more credits required)", shortfall);
            } else if let Some(margin) = c.margin_to_next_threshold {
                if margin > 0.0 {
                    let _ = write!(output, " ({:.2} to next tier)", margin);
                }
            }
            let _ = writeln!(output);
        }
    }

    if !record.excluded.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "  Not included in the average:");
        for e in &record.excluded {
            let marker = if e.needs_attention { "!" } else { "-" };
            let _ = writeln!(output, "  {} {}", marker, e.message);
        }
    }

    output
}

pub fn render_registry(registry: &GradeScaleRegistry) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Scales:");
    for scale in registry.scales() {
        let _ = writeln!(output, "  {:<22} {} ({} symbols)", scale.id, scale.name, scale.len());
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Profiles:");
    for profile in registry.profiles() {
        let sets: Vec<&str> = profile.threshold_sets.iter().map(|s| s.name.as_str()).collect();
        let _ = writeln!(
            output,
            "  {:<22} {} [scale: {}] {}",
            profile.id,
            profile.name,
            profile.scale_id,
            sets.join(", ")
        );
    }

    output
}

pub fn render_scale(scale: &GradeScale) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", scale);
    let _ = writeln!(output, "  Max credits per entry: {}", scale.max_weight);
    let _ = writeln!(
        output,
        "  Excluded grades toward attempted credits: {}",
        scale.excluded_credit.display_name()
    );
    let _ = writeln!(output);
    for (symbol, value) in scale.grades() {
        let _ = writeln!(output, "  {:<6} {}", symbol, value);
    }

    output
}

pub fn render_target(plan: &TargetPlan, target: f64) -> String {
    if plan.already_secured {
        format!("Target {:.2} is already secured for the remaining credits.", target)
    } else if plan.achievable {
        format!(
            "Average needed on remaining credits to reach {:.2}: {:.2}",
            target, plan.required_average
        )
    } else {
        format!(
            "Target {:.2} is out of reach: it would need {:.2} on the remaining credits.",
            target, plan.required_average
        )
    }
}
