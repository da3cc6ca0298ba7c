//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use snapfit_core::calculations::sweep::{SweepSeries, SweepSpec, CHART_TITLE};
use snapfit_core::calculations::{SnapFitInputs, SnapFitResult};
use snapfit_core::materials::{CrossSectionProfile, MaterialEntry, MaterialSource};
use snapfit_core::settings::Settings;

const RULE: &str = "═══════════════════════════════════════";

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "[OK]"
    } else {
        "[CHECK INPUTS]"
    }
}

/// Boxed report of one calculation
pub fn calc_report(material: &str, inputs: &SnapFitInputs, result: &SnapFitResult, settings: &Settings) -> String {
    let u = &settings.units;
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  SNAP-FIT CALCULATION RESULTS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Input:");
    let _ = writeln!(out, "  Material: {}", material);
    let _ = writeln!(
        out,
        "            E = {} {}, ε = {}",
        inputs.elastic_modulus, u.modulus, inputs.max_strain
    );
    let _ = writeln!(
        out,
        "  Profile:  {} (K = {})",
        inputs.profile,
        inputs.profile.factor()
    );
    let _ = writeln!(
        out,
        "  Arm:      L = {} {len}, h = {} {len}, b = {} {len}",
        inputs.length,
        inputs.thickness,
        inputs.width,
        len = u.length
    );
    let _ = writeln!(
        out,
        "  Lead:     μ = {}, α = {}°",
        inputs.friction_coefficient, inputs.lead_angle_deg
    );
    let _ = writeln!(out, "  FOS:      {}", inputs.effective_factor_of_safety());
    let _ = writeln!(out);
    let _ = writeln!(out, "Results:");
    let _ = writeln!(
        out,
        "  Permissible Deflection y: {:.*} {}",
        settings.deflection_decimals, result.deflection, u.length
    );
    let _ = writeln!(
        out,
        "  Deflection Force P:       {:.*} {}",
        settings.force_decimals, result.deflection_force, u.force
    );
    let _ = writeln!(
        out,
        "  Mating Force W:           {:.*} {}",
        settings.force_decimals, result.mating_force, u.force
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  STATUS: {}", status_icon(result.is_finite()));
    let _ = writeln!(out, "{RULE}");
    out
}

/// Column-aligned sweep table
pub fn sweep_table(spec: &SweepSpec, series: &SweepSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  {}: {}", CHART_TITLE.to_uppercase(), spec.variable.display_name());
    let _ = writeln!(
        out,
        "  {} from {} to {} step {}",
        spec.variable.code(),
        spec.start,
        spec.end,
        spec.step
    );
    let _ = writeln!(out, "{RULE}");

    if series.is_empty() {
        let _ = writeln!(out, "  (no points: step does not move from start toward end)");
        return out;
    }

    let datasets = series.datasets();
    let label_width = series
        .labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(spec.variable.code().len()))
        .max()
        .unwrap_or(0);

    let _ = write!(out, "{:>label_width$}", spec.variable.code());
    for (title, _) in &datasets {
        let _ = write!(out, "  {:>30}", title);
    }
    let _ = writeln!(out);

    for (i, label) in series.labels.iter().enumerate() {
        let _ = write!(out, "{:>label_width$}", label);
        for (_, values) in &datasets {
            let _ = write!(out, "  {:>30.6}", values[i]);
        }
        let _ = writeln!(out);
    }
    out
}

/// Sweep series as CSV with a header row
pub fn sweep_csv(spec: &SweepSpec, series: &SweepSeries) -> String {
    let datasets = series.datasets();
    let mut out = String::new();

    let _ = write!(out, "{}", spec.variable.code());
    for (title, _) in &datasets {
        let _ = write!(out, ",\"{}\"", title);
    }
    let _ = writeln!(out);

    for (i, x) in series.x.iter().enumerate() {
        let _ = write!(out, "{}", x);
        for (_, values) in &datasets {
            let _ = write!(out, ",{}", values[i]);
        }
        let _ = writeln!(out);
    }
    out
}

/// Material listing, one line per entry
pub fn material_list(entries: &[MaterialEntry], settings: &Settings) -> String {
    let width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let source = match entry.source {
            MaterialSource::BuiltIn => "built-in",
            MaterialSource::Custom => "custom",
        };
        let _ = writeln!(
            out,
            "  {:<width$}  E = {:>10} {}  ε = {:<8}  [{}]",
            entry.name,
            entry.properties.elastic_modulus,
            settings.units.modulus,
            entry.properties.max_strain,
            source
        );
    }
    out
}

/// Profile table
pub fn profile_list() -> String {
    let mut out = String::new();
    for profile in CrossSectionProfile::ALL {
        let _ = writeln!(
            out,
            "  {:<16} {}  (factor {})",
            profile.code(),
            profile.display_name(),
            profile.factor()
        );
    }
    out
}

/// Settings as `key = value` lines
pub fn settings_list(settings: &Settings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  default_material    = {}", settings.default_material);
    let _ = writeln!(out, "  default_profile     = {}", settings.default_profile.code());
    let _ = writeln!(out, "  deflection_decimals = {}", settings.deflection_decimals);
    let _ = writeln!(out, "  force_decimals      = {}", settings.force_decimals);
    let _ = writeln!(out, "  label_decimals      = {}", settings.label_decimals);
    let _ = writeln!(out, "  units.length        = {}", settings.units.length);
    let _ = writeln!(out, "  units.force         = {}", settings.units.force);
    let _ = writeln!(out, "  units.modulus       = {}", settings.units.modulus);
    out
}
