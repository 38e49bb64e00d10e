//! Human-readable rendering of parameter tables

use colored::Colorize;
use grasp_bridge_macros::{ParameterSpec, ParameterValue};

fn heading(title: &str, color: bool) -> String {
    if color {
        title.bold().cyan().to_string()
    } else {
        title.to_string()
    }
}

fn colorize_value(value: &ParameterValue, color: bool) -> String {
    let text = value.to_string();
    if !color {
        return text;
    }
    match value {
        ParameterValue::Bool(true) => text.green().to_string(),
        ParameterValue::Bool(false) => text.red().to_string(),
        _ => text,
    }
}

/// Render resolved values as `key = value` lines under `title`, keys
/// aligned.
pub fn render_parameters(
    title: &str,
    values: &[(&'static str, ParameterValue)],
    color: bool,
) -> String {
    let width = values.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = heading(title, color);
    for (key, value) in values {
        out.push('\n');
        out.push_str(&format!(
            "  {:width$} = {}",
            key,
            colorize_value(value, color),
            width = width
        ));
    }
    out
}

/// Render a parameter table: key, type, default and description.
pub fn render_specs(title: &str, specs: &[ParameterSpec], color: bool) -> String {
    let key_width = specs.iter().map(|s| s.key.len()).max().unwrap_or(0);
    let kind_width = specs
        .iter()
        .map(|s| s.kind.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = heading(title, color);
    for spec in specs {
        out.push('\n');
        let mut line = format!(
            "  {:key_width$}  {:kind_width$}  {}",
            spec.key,
            spec.kind.as_str(),
            colorize_value(&spec.default, color),
            key_width = key_width,
            kind_width = kind_width
        );
        if spec.fixed {
            line.push_str(" (fixed)");
        }
        if !spec.description.is_empty() {
            line.push_str("  # ");
            line.push_str(spec.description);
        }
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_bridge_macros::ParameterKind;

    #[test]
    fn plain_parameters() {
        let values = vec![
            ("voxelize", ParameterValue::Bool(true)),
            ("num_samples", ParameterValue::Integer(100)),
        ];
        let rendered = render_parameters("Detection:", &values, false);
        assert_eq!(
            rendered,
            "Detection:\n  voxelize    = true\n  num_samples = 100"
        );
    }

    #[test]
    fn empty_table_is_just_the_heading() {
        assert_eq!(render_parameters("Planning:", &[], false), "Planning:");
    }

    #[test]
    fn specs_mark_fixed_entries() {
        let specs = vec![ParameterSpec {
            key: "gripper_width_range",
            kind: ParameterKind::DoubleArray,
            default: ParameterValue::DoubleArray(vec![0.03, 0.1]),
            description: "",
            fixed: true,
        }];
        let rendered = render_specs("Detection:", &specs, false);
        assert!(rendered.ends_with("[0.03, 0.1] (fixed)"));
    }
}
