//! Command dispatch.
//!
//! Results go to the given writer as JSON; build reports go to stderr.

use crate::args::{Cli, Command, ListArgs, Source};
use chrono::Utc;
use diseasedx_core::db::open_db;
use diseasedx_core::{
    build_from_csv_path, load_document, save_document, Dataset, DatasetBuild, DiseaseFilter,
    DiseaseListQuery, DiseaseProvider, DiseaseRepository, DiseaseService, ServiceConfig,
    SqliteDiseaseRepository,
};
use log::info;
use serde_json::json;
use std::error::Error;
use std::io::Write;

pub type CliResult<T> = Result<T, Box<dyn Error>>;

pub fn run(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    match &cli.command {
        Command::Version => {
            writeln!(out, "diseasedx {}", diseasedx_core::core_version())?;
        }
        Command::Convert { csv, out: path } => {
            let build = build_from_csv_path(csv, Utc::now())?;
            save_document(&build.dataset, path)?;
            report_build(&build);
            writeln!(
                out,
                "Converted {} diseases to {}",
                build.dataset.len(),
                path.display()
            )?;
        }
        Command::Import { csv } => {
            let db = cli.db.as_ref().ok_or("import requires --db <sqlite>")?;
            let build = build_from_csv_path(csv, Utc::now())?;
            let conn = open_db(db)?;
            let repo = SqliteDiseaseRepository::new(&conn);
            repo.replace_all(build.dataset.records())?;
            let stored = repo.count()?;
            report_build(&build);
            writeln!(out, "Imported {stored} diseases into {}", db.display())?;
        }
        Command::List(args) => {
            let config = ServiceConfig::with_page_size(args.page_size.unwrap_or_default());
            let service = DiseaseService::with_config(load_source(&cli.source())?, config);
            write_json(out, &service.list(&list_query(args)))?;
        }
        Command::Show { id } => {
            let service = DiseaseService::new(load_source(&cli.source())?);
            write_json(out, &service.get_by_id(*id)?)?;
        }
        Command::Check { symptoms } => {
            let service = DiseaseService::new(load_source(&cli.source())?);
            write_json(out, &service.check_symptoms(symptoms)?)?;
        }
        Command::Stats => {
            let service = DiseaseService::new(load_source(&cli.source())?);
            write_json(out, &service.statistics())?;
        }
    }
    Ok(())
}

fn list_query(args: &ListArgs) -> DiseaseListQuery {
    DiseaseListQuery {
        filter: DiseaseFilter {
            search: args.search.clone(),
            contagious: args.contagious,
            chronic: args.chronic,
        },
        page: args.page,
    }
}

fn load_source(source: &Source) -> CliResult<Dataset> {
    let dataset = match source {
        Source::Document(path) => load_document(path)?,
        Source::Database(path) => {
            let conn = open_db(path)?;
            Dataset::from_repository(&SqliteDiseaseRepository::new(&conn))?
        }
    };
    Ok(dataset)
}

fn report_build(build: &DatasetBuild) {
    info!(
        "event=cli_build module=cli status=ok kept={} skipped={}",
        build.report.kept,
        build.report.skipped_count()
    );
    let skipped = build
        .report
        .skipped
        .iter()
        .map(|row| json!({ "record": row.record, "reason": row.reason.as_str() }))
        .collect::<Vec<_>>();
    eprintln!("{}", json!({ "kept": build.report.kept, "skipped": skipped }));
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::args::Cli;
    use clap::Parser;
    use serde_json::Value;
    use std::path::Path;

    const SAMPLE_CSV: &str = "\
Name,Symptoms,Treatments,Disease_Code,Contagious,Chronic
Influenza,\"Fever, Cough\",\"Rest, Fluids\",J11,True,False
,Headache,,X00,False,False
Asthma,\"Wheezing, Cough\",Inhaler,J45,False,True
Measles,\"Rash, Fever\",Rest,B05,yes,no
";

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(std::iter::once("diseasedx").chain(args.iter().copied()))
            .expect("arguments should parse");
        let mut out = Vec::new();
        run(&cli, &mut out).expect("command should succeed");
        String::from_utf8(out).expect("output should be UTF-8")
    }

    fn run_json(args: &[&str]) -> Value {
        serde_json::from_str(&run_args(args)).expect("output should be JSON")
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().expect("temp path should be valid UTF-8")
    }

    #[test]
    fn convert_then_query_document() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let csv = dir.path().join("diseases.csv");
        let json = dir.path().join("out/diseases.json");
        std::fs::write(&csv, SAMPLE_CSV).expect("csv should be written");

        let printed = run_args(&["convert", "--csv", path_str(&csv), "--out", path_str(&json)]);
        assert!(printed.starts_with("Converted 3 diseases"));

        let stats = run_json(&["stats", "--data", path_str(&json)]);
        assert_eq!(stats["total_diseases"], 3);
        assert_eq!(stats["contagious_diseases"], 2);

        let shown = run_json(&["show", "3", "--data", path_str(&json)]);
        assert_eq!(shown["name"], "Measles");
        assert_eq!(shown["symptoms_list"], serde_json::json!(["Rash", "Fever"]));
    }

    #[test]
    fn import_then_query_database() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let csv = dir.path().join("diseases.csv");
        let db = dir.path().join("diseases.sqlite3");
        std::fs::write(&csv, SAMPLE_CSV).expect("csv should be written");

        let printed = run_args(&["import", "--csv", path_str(&csv), "--db", path_str(&db)]);
        assert!(printed.starts_with("Imported 3 diseases"));

        let listed = run_json(&["list", "--db", path_str(&db), "--search", "cough"]);
        assert_eq!(listed["count"], 2);
        assert_eq!(listed["results"][0]["name"], "Influenza");
        assert_eq!(listed["results"][1]["name"], "Asthma");
        assert_eq!(listed["has_next"], false);

        let filtered = run_json(&["list", "--db", path_str(&db), "--chronic", "true"]);
        assert_eq!(filtered["count"], 1);
        assert_eq!(filtered["results"][0]["disease_code"], "J45");

        let checked = run_json(&["check", "fever", "rash", "--db", path_str(&db)]);
        assert_eq!(checked["total_matches"], 2);
        assert_eq!(checked["results"][0]["name"], "Measles");
        assert_eq!(checked["results"][0]["match_percentage"], 100);
        assert_eq!(checked["results"][1]["name"], "Influenza");
        assert_eq!(checked["results"][1]["match_percentage"], 50);
    }

    #[test]
    fn import_without_db_and_unknown_id_fail() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let csv = dir.path().join("diseases.csv");
        std::fs::write(&csv, SAMPLE_CSV).expect("csv should be written");
        let json = dir.path().join("diseases.json");
        run_args(&["convert", "--csv", path_str(&csv), "--out", path_str(&json)]);

        let import = Cli::try_parse_from(["diseasedx", "import", "--csv", path_str(&csv)])
            .expect("arguments should parse");
        assert!(run(&import, &mut Vec::<u8>::new()).is_err());

        let show = Cli::try_parse_from(["diseasedx", "show", "42", "--data", path_str(&json)])
            .expect("arguments should parse");
        let err = run(&show, &mut Vec::<u8>::new()).expect_err("unknown id should fail");
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn version_prints_core_version() {
        let printed = run_args(&["version"]);
        assert_eq!(
            printed.trim(),
            format!("diseasedx {}", diseasedx_core::core_version())
        );
    }
}
