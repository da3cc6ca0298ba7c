//! # Snapfit CLI Application
//!
//! Command-line front end for the snap-fit calculator: a calculation, a
//! parametric sweep, the material library and user settings, each as a
//! subcommand. Human-readable output by default, JSON with `--json`.

mod logging;
mod output;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use snapfit_core::calculations::sweep::CHART_TITLE;
use snapfit_core::calculations::{calculate, run_sweep, SnapFitInputs, SnapFitResult, SweepSeries, SweepSpec, SweepVariable};
use snapfit_core::errors::{CalcError, CalcResult};
use snapfit_core::form::{coerce_number, SnapFitForm, SweepForm};
use snapfit_core::materials::{
    clear_custom_materials, save_material, JsonFileStore, MaterialLibrary, MaterialProperties,
    MaterialStore,
};
use snapfit_core::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "snapfit", version)]
#[command(about = "Cantilever snap-fit joint calculator")]
struct Cli {
    /// Path to the data directory (default: ~/.snapfit/)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Calculator form fields. Values are taken as text and coerced the same way
/// the form does, so `--length ""` means 0 and `--length abc` means NaN.
#[derive(Args, Debug, Clone, Default)]
struct FormArgs {
    /// Material name to copy E and ε from
    #[arg(long)]
    material: Option<String>,

    /// Cross-section profile (name or code)
    #[arg(long)]
    profile: Option<String>,

    /// Elastic modulus E (overrides the material)
    #[arg(long, allow_hyphen_values = true)]
    modulus: Option<String>,

    /// Permissible strain ε (overrides the material)
    #[arg(long, allow_hyphen_values = true)]
    strain: Option<String>,

    /// Arm length L
    #[arg(long, allow_hyphen_values = true)]
    length: Option<String>,

    /// Arm thickness h
    #[arg(long, allow_hyphen_values = true)]
    thickness: Option<String>,

    /// Arm width b
    #[arg(long, allow_hyphen_values = true)]
    width: Option<String>,

    /// Friction coefficient μ
    #[arg(long, allow_hyphen_values = true)]
    friction: Option<String>,

    /// Lead angle α in degrees
    #[arg(long, allow_hyphen_values = true)]
    lead_angle: Option<String>,

    /// Factor of safety (0, negative or blank means 1.5)
    #[arg(long, allow_hyphen_values = true)]
    fos: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate deflection, deflection force and mating force
    Calc {
        #[command(flatten)]
        form: FormArgs,

        /// Reject physically meaningless inputs instead of printing NaN
        #[arg(long)]
        strict: bool,
    },

    /// Sweep one input across a range
    Sweep {
        /// Variable to sweep: L, h, b, E, eps, mu, alpha (or a long name)
        variable: String,

        /// First value (default: 80% of the current value)
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,

        /// Last value, inclusive (default: 120% of the current value)
        #[arg(long, allow_hyphen_values = true)]
        end: Option<String>,

        /// Increment (default: 5% of the current value)
        #[arg(long, allow_hyphen_values = true)]
        step: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = SweepFormat::Table)]
        format: SweepFormat,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Browse and edit the material library
    Materials {
        #[command(subcommand)]
        action: MaterialsCommand,
    },

    /// List cross-section profiles
    Profiles,

    /// Show or change user settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum MaterialsCommand {
    /// List built-in and custom materials
    List,

    /// Show one material
    Show { name: String },

    /// Save the form's E and ε as a custom material
    Save {
        name: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Remove all custom materials
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print current settings
    Show,

    /// Change one setting
    Set { key: String, value: String },

    /// Restore defaults
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SweepFormat {
    Table,
    Csv,
    Json,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".snapfit")
}

/// Build the form the way a fresh page would: defaults from settings, then
/// the selected material, then explicit field values.
fn build_form(args: &FormArgs, library: &MaterialLibrary, settings: &Settings) -> SnapFitForm {
    let mut form = SnapFitForm {
        profile: settings.default_profile.display_name().to_string(),
        ..SnapFitForm::default()
    };
    // Always look up: a custom entry may shadow the built-in default
    form.select_material(library, &settings.default_material);
    if let Some(name) = &args.material {
        form.select_material(library, name);
    }

    let overrides = [
        (&args.profile, &mut form.profile),
        (&args.modulus, &mut form.elastic_modulus),
        (&args.strain, &mut form.max_strain),
        (&args.length, &mut form.length),
        (&args.thickness, &mut form.thickness),
        (&args.width, &mut form.width),
        (&args.friction, &mut form.friction),
        (&args.lead_angle, &mut form.lead_angle),
        (&args.fos, &mut form.fos),
    ];
    for (value, field) in overrides {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
    form
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::serialization)?;
    println!("{}", json);
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    material: &'a str,
    inputs: &'a SnapFitInputs,
    result: &'a SnapFitResult,
}

#[derive(Serialize)]
struct SweepOutput<'a> {
    title: &'static str,
    spec: &'a SweepSpec,
    series: &'a SweepSeries,
}

#[derive(Serialize)]
struct ClearOutput {
    removed: usize,
    cancelled: bool,
}

struct Context {
    data_dir: PathBuf,
    json: bool,
    settings: Settings,
    store: JsonFileStore,
}

impl Context {
    fn open(data_dir: PathBuf, json: bool) -> CalcResult<Self> {
        let settings = Settings::load_or_default(&data_dir)?;
        let store = JsonFileStore::in_dir(&data_dir);
        Ok(Context {
            data_dir,
            json,
            settings,
            store,
        })
    }

    fn library(&self) -> CalcResult<MaterialLibrary> {
        MaterialLibrary::load(&self.store)
    }

    fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn run_calc(ctx: &Context, args: &FormArgs, strict: bool) -> CalcResult<()> {
    let form = build_form(args, &ctx.library()?, &ctx.settings);
    let inputs = form.to_inputs()?;
    if strict {
        inputs.validate()?;
    }

    let result = calculate(&inputs);
    if !result.is_finite() {
        tracing::warn!(?result, "calculation produced non-finite values");
    }

    if ctx.json {
        print_json(&CalcOutput {
            material: &form.material,
            inputs: &inputs,
            result: &result,
        })
    } else {
        print!("{}", output::calc_report(&form.material, &inputs, &result, &ctx.settings));
        Ok(())
    }
}

struct SweepRequest<'a> {
    variable: &'a str,
    start: &'a Option<String>,
    end: &'a Option<String>,
    step: &'a Option<String>,
    format: SweepFormat,
    form: &'a FormArgs,
}

fn run_sweep_command(ctx: &Context, req: SweepRequest<'_>) -> CalcResult<()> {
    let variable = SweepVariable::from_str_flexible(req.variable)?;
    let form = build_form(req.form, &ctx.library()?, &ctx.settings);
    let inputs = form.to_inputs()?;

    let mut controls = SweepForm::from_defaults(variable, &form);
    for (value, field) in [
        (req.start, &mut controls.start),
        (req.end, &mut controls.end),
        (req.step, &mut controls.step),
    ] {
        if let Some(value) = value {
            *field = value.clone();
        }
    }

    let spec = controls.to_spec();
    let points = run_sweep(&spec, &inputs)?;
    let series = SweepSeries::with_label_decimals(&points, ctx.settings.label_decimals);

    let format = if ctx.json { SweepFormat::Json } else { req.format };
    match format {
        SweepFormat::Json => print_json(&SweepOutput {
            title: CHART_TITLE,
            spec: &spec,
            series: &series,
        }),
        SweepFormat::Csv => {
            print!("{}", output::sweep_csv(&spec, &series));
            Ok(())
        }
        SweepFormat::Table => {
            print!("{}", output::sweep_table(&spec, &series));
            Ok(())
        }
    }
}

fn run_materials(ctx: &mut Context, action: &MaterialsCommand) -> CalcResult<()> {
    match action {
        MaterialsCommand::List => {
            let entries = ctx.library()?.entries();
            if ctx.json {
                print_json(&entries)
            } else {
                print!("{}", output::material_list(&entries, &ctx.settings));
                Ok(())
            }
        }
        MaterialsCommand::Show { name } => {
            let library = ctx.library()?;
            let properties = library.require(name)?;
            let entry = library
                .entries()
                .into_iter()
                .find(|e| &e.name == name)
                .ok_or_else(|| CalcError::material_not_found(name.as_str()))?;
            if ctx.json {
                print_json(&entry)
            } else {
                println!("{}", entry.name);
                println!("  E = {} {}", properties.elastic_modulus, ctx.settings.units.modulus);
                println!("  ε = {}", properties.max_strain);
                Ok(())
            }
        }
        MaterialsCommand::Save { name, form: args } => {
            let form = build_form(args, &ctx.library()?, &ctx.settings);
            let properties = MaterialProperties::new(
                coerce_number(&form.elastic_modulus),
                coerce_number(&form.max_strain),
            );
            save_material(&mut ctx.store, name, properties)?;
            if ctx.json {
                print_json(&properties)
            } else {
                println!(
                    "Saved '{}' (E = {}, ε = {}) to {}",
                    name,
                    properties.elastic_modulus,
                    properties.max_strain,
                    ctx.store.path().display()
                );
                Ok(())
            }
        }
        MaterialsCommand::Clear { yes } => {
            let count = ctx.store.load()?.len();
            let outcome = if count == 0 {
                ClearOutput { removed: 0, cancelled: false }
            } else if !*yes && !confirm(&format!("Remove all {} custom materials? [y/N] ", count)) {
                ClearOutput { removed: 0, cancelled: true }
            } else {
                clear_custom_materials(&mut ctx.store)?;
                ClearOutput { removed: count, cancelled: false }
            };

            if ctx.json {
                return print_json(&outcome);
            }
            if outcome.cancelled {
                println!("Cancelled.");
            } else if outcome.removed == 0 {
                println!("No custom materials to remove.");
            } else {
                println!("Removed {} custom materials.", outcome.removed);
            }
            Ok(())
        }
    }
}

fn run_settings(ctx: &mut Context, action: &SettingsCommand) -> CalcResult<()> {
    match action {
        SettingsCommand::Show => {
            if ctx.json {
                print_json(&ctx.settings)
            } else {
                print!("{}", output::settings_list(&ctx.settings));
                Ok(())
            }
        }
        SettingsCommand::Set { key, value } => {
            ctx.settings.set(key, value)?;
            ctx.settings.save(ctx.data_dir())?;
            println!("Set {} = {}", key, value);
            Ok(())
        }
        SettingsCommand::Reset => {
            Settings::reset(ctx.data_dir())?;
            ctx.settings = Settings::default();
            println!("Settings restored to defaults.");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut ctx = Context::open(data_dir, cli.json)?;

    match &cli.command {
        Command::Calc { form, strict } => run_calc(&ctx, form, *strict),
        Command::Sweep {
            variable,
            start,
            end,
            step,
            format,
            form,
        } => run_sweep_command(
            &ctx,
            SweepRequest {
                variable,
                start,
                end,
                step,
                format: *format,
                form,
            },
        ),
        Command::Materials { action } => run_materials(&mut ctx, action),
        Command::Profiles => {
            if ctx.json {
                let profiles: Vec<_> = snapfit_core::materials::CrossSectionProfile::ALL
                    .iter()
                    .map(|p| serde_json::json!({ "name": p.display_name(), "code": p.code(), "factor": p.factor() }))
                    .collect();
                print_json(&profiles)
            } else {
                print!("{}", output::profile_list());
                Ok(())
            }
        }
        Command::Settings { action } => run_settings(&mut ctx, action),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use snapfit_core::materials::MemoryStore;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc_with_negative_and_blank_values() {
        let cli = Cli::try_parse_from([
            "snapfit", "--json", "calc", "--lead-angle", "-5", "--fos", "", "--strict",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Calc { form, strict } => {
                assert!(strict);
                assert_eq!(form.lead_angle.as_deref(), Some("-5"));
                assert_eq!(form.fos.as_deref(), Some(""));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_sweep() {
        let cli = Cli::try_parse_from([
            "snapfit", "sweep", "h", "--step", "0.01", "--format", "csv", "--material", "Nylon 6",
        ])
        .unwrap();
        match cli.command {
            Command::Sweep {
                variable,
                step,
                format,
                form,
                ..
            } => {
                assert_eq!(variable, "h");
                assert_eq!(step.as_deref(), Some("0.01"));
                assert_eq!(format, SweepFormat::Csv);
                assert_eq!(form.material.as_deref(), Some("Nylon 6"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_build_form_precedence() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "Mine", MaterialProperties::new(123_000.0, 0.05)).unwrap();
        let library = MaterialLibrary::load(&store).unwrap();

        let args = FormArgs {
            material: Some("Mine".to_string()),
            strain: Some("0.01".to_string()),
            ..FormArgs::default()
        };
        let form = build_form(&args, &library, &Settings::default());
        assert_eq!(form.material, "Mine");
        assert_eq!(form.elastic_modulus, "123000");
        assert_eq!(form.max_strain, "0.01");
    }

    #[test]
    fn test_build_form_uses_settings_default_material() {
        let mut settings = Settings::default();
        settings.set("default_material", "Polypropylene (PP)").unwrap();

        let form = build_form(&FormArgs::default(), &MaterialLibrary::default(), &settings);
        assert_eq!(form.material, "Polypropylene (PP)");
        assert_eq!(form.elastic_modulus, "180000");
    }

    #[test]
    fn test_build_form_custom_override_of_default_material() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "ABS (Generic)", MaterialProperties::new(111_000.0, 0.03)).unwrap();
        let library = MaterialLibrary::load(&store).unwrap();

        let form = build_form(&FormArgs::default(), &library, &Settings::default());
        assert_eq!(form.material, "ABS (Generic)");
        assert_eq!(form.elastic_modulus, "111000");
        assert_eq!(form.max_strain, "0.03");
    }

    #[test]
    fn test_build_form_unknown_material_is_noop() {
        let args = FormArgs {
            material: Some("Unobtainium".to_string()),
            ..FormArgs::default()
        };
        let form = build_form(&args, &MaterialLibrary::default(), &Settings::default());
        assert_eq!(form, SnapFitForm::default());
    }

    #[test]
    fn test_run_against_temp_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();

        let cli = Cli::try_parse_from([
            "snapfit",
            "materials",
            "save",
            "Shop PC",
            "--material",
            "Polycarbonate (PC)",
            "--strain",
            "0.018",
        ])
        .unwrap();
        run(Cli {
            data_dir: Some(data_dir.clone()),
            ..cli
        })
        .unwrap();

        let library = MaterialLibrary::load(&JsonFileStore::in_dir(&data_dir)).unwrap();
        assert_eq!(
            library.get("Shop PC"),
            Some(MaterialProperties::new(350_000.0, 0.018))
        );

        let cli = Cli::try_parse_from(["snapfit", "materials", "clear", "--yes"]).unwrap();
        run(Cli {
            data_dir: Some(data_dir.clone()),
            ..cli
        })
        .unwrap();
        let library = MaterialLibrary::load(&JsonFileStore::in_dir(&data_dir)).unwrap();
        assert!(!library.contains("Shop PC"));
    }

    #[test]
    fn test_save_with_non_numeric_modulus_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();

        let cli = Cli::try_parse_from(["snapfit", "materials", "save", "Bad", "--modulus", "abc"]).unwrap();
        let err = run(Cli {
            data_dir: Some(data_dir.clone()),
            ..cli
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // The store is still readable afterwards
        let library = MaterialLibrary::load(&JsonFileStore::in_dir(&data_dir)).unwrap();
        assert!(!library.contains("Bad"));
        let cli = Cli::try_parse_from(["snapfit", "calc"]).unwrap();
        run(Cli {
            data_dir: Some(data_dir),
            ..cli
        })
        .unwrap();
    }

    #[test]
    fn test_clear_honours_json_flag() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();

        // Nothing to clear yet
        let cli = Cli::try_parse_from(["snapfit", "--json", "materials", "clear", "--yes"]).unwrap();
        assert!(cli.json);
        run(Cli {
            data_dir: Some(data_dir.clone()),
            ..cli
        })
        .unwrap();

        let mut store = JsonFileStore::in_dir(&data_dir);
        save_material(&mut store, "Mine", MaterialProperties::new(1.0, 0.1)).unwrap();
        let cli = Cli::try_parse_from(["snapfit", "--json", "materials", "clear", "--yes"]).unwrap();
        run(Cli {
            data_dir: Some(data_dir.clone()),
            ..cli
        })
        .unwrap();
        assert!(store.load().unwrap().is_empty());

        let json = serde_json::to_string(&ClearOutput { removed: 1, cancelled: false }).unwrap();
        assert_eq!(json, r#"{"removed":1,"cancelled":false}"#);
    }

    #[test]
    fn test_zero_step_sweep_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["snapfit", "sweep", "b", "--step", "0"]).unwrap();
        let err = run(Cli {
            data_dir: Some(dir.path().to_path_buf()),
            ..cli
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SWEEP");
    }
}
