use crate::cli::AnalyseArgs;
use crate::error::{CliError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use ringconf::core::models::ring::RingKind;
use ringconf::core::names::AtomNameTable;
use ringconf::workflows::analyse::{AnalysisOutcome, WorkflowError, analyse_structure};
use ringconf::workflows::report::{Summary, result_line, write_csv};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: AnalyseArgs) -> Result<()> {
    let kind: RingKind = args.ring_type.into();
    let table = load_table(&args, kind)?;
    let inputs = collect_inputs(&args)?;

    if inputs.is_empty() {
        return Err(CliError::Argument(
            "no input files given; pass FILE arguments or --input-list".to_string(),
        ));
    }

    info!("Analysing {} structure file(s) as {}.", inputs.len(), kind);

    let progress = ProgressBar::new(inputs.len() as u64).with_style(bar_style());
    progress.set_draw_target(indicatif::ProgressDrawTarget::stderr());

    let outcomes: Vec<(PathBuf, std::result::Result<AnalysisOutcome, WorkflowError>)> = inputs
        .par_iter()
        .map(|path| {
            let outcome = analyse_structure(path, kind, &table);
            progress.inc(1);
            (path.clone(), outcome)
        })
        .collect();
    progress.finish_and_clear();

    let mut summary = Summary::new(kind);
    let mut rings = Vec::new();

    for (path, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                for skipped in &outcome.diagnostics.skipped {
                    warn!(
                        "{}, line {}: {}",
                        path.display(),
                        skipped.line,
                        skipped.problem
                    );
                }
                summary.record(outcome.ring.conformation());
                if args.show_list() {
                    println!("{}", result_line(&outcome.ring));
                }
                rings.push(outcome.ring);
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                if args.show_list() {
                    println!("{}: omitted", structure_id(&path));
                }
            }
        }
    }

    if args.show_summary() {
        println!("{summary}");
    }

    if let Some(csv_path) = &args.csv {
        write_csv(&rings, File::create(csv_path)?)?;
        info!("CSV results written to {}.", csv_path.display());
    }

    Ok(())
}

fn load_table(args: &AnalyseArgs, kind: RingKind) -> Result<AtomNameTable> {
    match &args.names {
        Some(path) => {
            info!("Loading atom-name table from {}.", path.display());
            let table = AtomNameTable::load(path)?;
            table.validate(kind)?;
            Ok(table)
        }
        None => Ok(AtomNameTable::builtin(kind)),
    }
}

/// Inputs given on the command line, followed by the entries of the input
/// list file. List lines are trimmed; empty lines and `#` comments are
/// skipped.
fn collect_inputs(args: &AnalyseArgs) -> Result<Vec<PathBuf>> {
    let mut inputs = args.inputs.clone();

    if let Some(list_path) = &args.input_list {
        let reader = BufReader::new(File::open(list_path)?);
        for line in reader.lines() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            inputs.push(PathBuf::from(entry));
        }
    }

    Ok(inputs)
}

fn structure_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
        .expect("Failed to create progress bar style template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RingType;
    use std::f64::consts::PI;
    use std::io::Write;

    fn pdb_line(serial: usize, name: &str, x: f64, y: f64, z: f64, element: &str) -> String {
        format!(
            "HETATM{serial:>5} {name:<4} GLC A   1    {x:8.3}{y:8.3}{z:8.3}  1.00  0.00          {element:>2}"
        )
    }

    fn write_chair_glc(dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        let mut file = File::create(&path).unwrap();
        for k in 0..6 {
            let theta = PI / 3.0 * k as f64;
            let z = if k % 2 == 0 { 0.25 } else { -0.25 };
            let (name, element) = if k == 5 {
                ("O5".to_string(), "O")
            } else {
                (format!("C{}", k + 1), "C")
            };
            writeln!(
                file,
                "{}",
                pdb_line(k + 1, &name, 1.5 * theta.cos(), 1.5 * theta.sin(), z, element)
            )
            .unwrap();
        }
        writeln!(file, "END").unwrap();
        path
    }

    fn base_args(ring_type: RingType) -> AnalyseArgs {
        AnalyseArgs {
            inputs: Vec::new(),
            input_list: None,
            ring_type,
            names: None,
            list: false,
            summary: false,
            all: false,
            csv: None,
        }
    }

    #[test]
    fn no_inputs_is_an_argument_error() {
        let result = run(base_args(RingType::Oxane));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn analyses_files_and_exports_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_chair_glc(dir.path(), "glucose.pdb");
        let csv_path = dir.path().join("results.csv");

        let mut args = base_args(RingType::Oxane);
        args.inputs = vec![input];
        args.summary = true;
        args.csv = Some(csv_path.clone());
        run(args).unwrap();

        let csv = std::fs::read_to_string(csv_path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("structure,ligand,code,conformation"));
        assert_eq!(lines.next(), Some("glucose,GLC,3,6C3"));
    }

    #[test]
    fn unreadable_files_are_omitted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_chair_glc(dir.path(), "glucose.pdb");
        let csv_path = dir.path().join("results.csv");

        let mut args = base_args(RingType::Oxane);
        args.inputs = vec![dir.path().join("missing.pdb"), input];
        args.csv = Some(csv_path.clone());
        run(args).unwrap();

        // Only the readable structure reaches the CSV export.
        let csv = std::fs::read_to_string(csv_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn input_list_entries_are_collected_after_positional_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("inputs.txt");
        let mut list = File::create(&list_path).unwrap();
        writeln!(list, "# comment").unwrap();
        writeln!(list, "b.pdb").unwrap();
        writeln!(list).unwrap();
        writeln!(list, "  c.pdb  ").unwrap();

        let mut args = base_args(RingType::Benzene);
        args.inputs = vec![PathBuf::from("a.pdb")];
        args.input_list = Some(list_path);

        let inputs = collect_inputs(&args).unwrap();
        assert_eq!(
            inputs,
            vec![
                PathBuf::from("a.pdb"),
                PathBuf::from("b.pdb"),
                PathBuf::from("c.pdb")
            ]
        );
    }

    #[test]
    fn custom_name_table_must_match_the_ring_size() {
        let dir = tempfile::tempdir().unwrap();
        let names_path = dir.path().join("names.toml");
        std::fs::write(&names_path, "[GLC]\nslots = [[\"C1\"], [\"C2\"]]\n").unwrap();

        let mut args = base_args(RingType::Oxane);
        args.inputs = vec![PathBuf::from("a.pdb")];
        args.names = Some(names_path);

        let result = run(args);
        assert!(matches!(result, Err(CliError::NameTable(_))));
    }
}
