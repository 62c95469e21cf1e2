use std::io::Write;
use std::path::Path;

use colored::Colorize;
use tempfile::NamedTempFile;
use tracing::debug;
use zipper_codec::{read_ledger, render_ledger, WriterConfig};
use zipper_merge::{merge_ledgers, MergeReport};
use zipper_types::{Ledger, Side};

use crate::cli::{Cli, OutputFormat};
use crate::config::ZipperConfig;
use crate::error::{CliError, CliResult};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ZipperConfig::load(cli.config.as_deref())?;
    let report = zip_files(&cli.dest, &cli.master, &cli.source, &config)?;
    print_report(&report, &cli)
}

/// Read both ledgers, merge them, and write the result to `dest`.
///
/// `dest` is only touched once the merge has succeeded.
pub fn zip_files(
    dest: &Path,
    master_path: &Path,
    source_path: &Path,
    config: &ZipperConfig,
) -> CliResult<MergeReport> {
    let master = read_ledger(master_path).map_err(|source| CliError::Ledger {
        side: Side::Master,
        source,
    })?;
    let source = read_ledger(source_path).map_err(|source| CliError::Ledger {
        side: Side::Source,
        source,
    })?;

    let outcome = merge_ledgers(&master, &source, &config.merge)?;
    write_atomically(dest, &outcome.ledger, &config.output)?;
    Ok(outcome.report)
}

/// Write through a temporary file in the destination directory and rename it
/// into place, so a failed write never leaves a truncated ledger behind.
fn write_atomically(dest: &Path, ledger: &Ledger, config: &WriterConfig) -> CliResult<()> {
    config.validate()?;
    let text = render_ledger(ledger, config);
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| CliError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(dest).map_err(|e| write_err(e.error))?;

    debug!(path = %dest.display(), bytes = text.len(), "wrote merged ledger");
    Ok(())
}

fn print_report(report: &MergeReport, cli: &Cli) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "{} Zipped {} + {} → {}",
                "✓".green().bold(),
                cli.master.display().to_string().bold(),
                cli.source.display().to_string().bold(),
                cli.dest.display().to_string().yellow(),
            );
            match report.sync_point {
                Some(idx) => println!(
                    "  Sync point: master #{} (common run {})",
                    idx.to_string().cyan(),
                    report.common_run
                ),
                None => println!("  Sync point: {}", "none".dimmed()),
            }
            println!(
                "  Transactions: {} (master {}, source {}, overlap {})",
                report.merged_transactions.to_string().bold(),
                report.master_transactions,
                report.source_transactions,
                report.overlap()
            );
            println!(
                "  Tail: {} from master, {} from source, {} tie-breaks",
                report.tail_from_master, report.tail_from_source, report.tie_breaks
            );
            println!(
                "  Directives: {} ({} new)",
                report.merged_directives.to_string().bold(),
                report.new_directives().to_string().green()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zipper_codec::parse_ledger;
    use zipper_merge::MergeError;

    const MASTER: &str = "\
account Assets:Checking

2021/01/01 (A) Opening balance
    ; ID: a
    Assets:Checking  $100
    Equity:Opening

2021/01/02 (B) Groceries
    ; ID: b
    Expenses:Food  $20
    Assets:Checking
";

    const SOURCE: &str = "\
account Expenses:Rent

2021/01/02 (B) Groceries
    ; ID: b
    Expenses:Food  $20
    Assets:Checking

2021/01/03 (C) Rent
    ; ID: c
    Expenses:Rent  $500
    Assets:Checking
";

    struct Files {
        dir: tempfile::TempDir,
    }

    impl Files {
        fn new(master: &str, source: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("master.ledger"), master).unwrap();
            std::fs::write(dir.path().join("source.ledger"), source).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> std::path::PathBuf {
            self.dir.path().join(name)
        }

        fn zip(&self) -> CliResult<MergeReport> {
            zip_files(
                &self.path("out.ledger"),
                &self.path("master.ledger"),
                &self.path("source.ledger"),
                &ZipperConfig::default(),
            )
        }
    }

    #[test]
    fn zips_files() {
        let files = Files::new(MASTER, SOURCE);
        let report = files.zip().unwrap();
        assert_eq!(report.merged_transactions, 3);
        assert_eq!(report.sync_point, Some(1));

        let text = std::fs::read_to_string(files.path("out.ledger")).unwrap();
        let merged = parse_ledger(&text).unwrap();
        let codes: Vec<&str> = merged.transactions.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
        assert_eq!(merged.directives.len(), 2);
        assert!(text.starts_with("account Assets:Checking\naccount Expenses:Rent\n"));
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let files = Files::new(MASTER, SOURCE);
        files.zip().unwrap();
        let first = std::fs::read(files.path("out.ledger")).unwrap();
        files.zip().unwrap();
        let second = std::fs::read(files.path("out.ledger")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unorderable_transactions_write_nothing() {
        let master = "2021/01/01 (A) x\n\n2021/01/02 (M) master only\n";
        let source = "2021/01/01 (A) x\n\n2021/01/02 (S) source only\n";
        let files = Files::new(master, source);

        let err = files.zip().unwrap_err();
        assert!(matches!(
            err,
            CliError::Merge(MergeError::UnorderableTransactions { .. })
        ));
        assert!(!files.path("out.ledger").exists());
    }

    #[test]
    fn no_sync_point_writes_nothing() {
        let source = "2021/01/05 (Z) unknown\n";
        let files = Files::new(MASTER, source);

        let err = files.zip().unwrap_err();
        assert!(matches!(err, CliError::Merge(MergeError::NoSyncPoint { .. })));
        assert!(!files.path("out.ledger").exists());
    }

    #[test]
    fn failed_merge_keeps_existing_destination() {
        let files = Files::new(MASTER, "2021/01/05 (Z) unknown\n");
        std::fs::write(files.path("out.ledger"), "previous contents\n").unwrap();

        assert!(files.zip().is_err());
        assert_eq!(
            std::fs::read_to_string(files.path("out.ledger")).unwrap(),
            "previous contents\n"
        );
    }

    #[test]
    fn parse_error_names_side() {
        let files = Files::new(MASTER, "2021/99/99 (Z) broken\n");
        let err = files.zip().unwrap_err();
        assert!(matches!(err, CliError::Ledger { side: Side::Source, .. }));
        assert!(err.to_string().starts_with("source ledger: line 1"));
    }

    #[test]
    fn missing_master_is_file_access_error() {
        let files = Files::new(MASTER, SOURCE);
        let err = zip_files(
            &files.path("out.ledger"),
            &files.path("absent.ledger"),
            &files.path("source.ledger"),
            &ZipperConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Ledger { side: Side::Master, .. }));
        assert!(!files.path("out.ledger").exists());
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let files = Files::new(MASTER, SOURCE);
        let err = zip_files(
            &files.path("missing-dir/out.ledger"),
            &files.path("master.ledger"),
            &files.path("source.ledger"),
            &ZipperConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Write { .. }));
    }

    #[test]
    fn invalid_output_config_writes_nothing() {
        let files = Files::new(MASTER, SOURCE);
        let mut config = ZipperConfig::default();
        config.output.indent = 0;
        let err = zip_files(
            &files.path("out.ledger"),
            &files.path("master.ledger"),
            &files.path("source.ledger"),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Output(_)));
        assert!(!files.path("out.ledger").exists());
    }

    #[test]
    fn output_config_is_applied() {
        let files = Files::new(MASTER, SOURCE);
        let mut config = ZipperConfig::default();
        config.output.date_style = zipper_codec::DateStyle::Dash;
        zip_files(
            &files.path("out.ledger"),
            &files.path("master.ledger"),
            &files.path("source.ledger"),
            &config,
        )
        .unwrap();
        let text = std::fs::read_to_string(files.path("out.ledger")).unwrap();
        assert!(text.contains("2021-01-03 (C) Rent"));
    }
}
