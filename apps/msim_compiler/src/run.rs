//! Orchestration tying C1-C5 together behind the CLI.

use crate::cli::Cli;
use crate::config::{apply_ini_defaults, IniConfig};
use crate::frontend::{EmptyFrontend, Frontend};
use msim_base::Diagnostics;
use msim_codegen::{generate, EmitOptions};
use msim_metadata::{build, build_workset, ModelInfo};
use msim_symbols::SymbolTable;
use std::fs;
use std::path::Path;

/// What one compiler invocation produced, for callers that want to inspect
/// results directly (tests; a future library embedding).
pub struct Outcome {
    pub diagnostics: Diagnostics,
    pub exit_code: i32,
}

fn emit_options(cli: &Cli) -> EmitOptions {
    let mut options = EmitOptions::default();
    options.suppress_line_directives = cli.suppress_line_directives;
    options.local_random_streams = cli.local_random_streams;
    options
}

/// Runs the full pipeline against a table populated by `frontend`, writing
/// artifacts under `cli.output_dir`. Returns 0 on
/// success, non-zero on any resolver error.
pub fn run(cli: &Cli) -> Result<Outcome, Box<dyn std::error::Error>> {
    let mut cli = cli.clone();
    if let Some(ini_path) = cli.ini_file.clone() {
        let ini = IniConfig::load(&ini_path)?;
        apply_ini_defaults(&mut cli, &ini);
    }

    let mut table = SymbolTable::new();
    let frontend = EmptyFrontend;
    let mut diags = Diagnostics::new();
    frontend.populate(&mut table, &mut diags);
    run_with_table(&mut table, &cli, diags)
}

/// Runs resolve → emit → metadata → write against an already-populated
/// `table` (the entry point integration tests use, since this repository
/// has no DSL front-end — see [`crate::frontend`]).
pub fn run_with_table(
    table: &mut SymbolTable,
    cli: &Cli,
    mut diags: Diagnostics,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let resolver = msim_resolve::Resolver::new();
    let resolve_diags = resolver.run(table);
    let error_count = diags.error_count() + resolve_diags.error_count();
    log::info!("{}", resolve_diags.summary_line());

    if error_count > 0 {
        return Ok(Outcome {
            diagnostics: resolve_diags,
            exit_code: 1,
        });
    }

    fs::create_dir_all(&cli.output_dir)?;

    let model = generate(table, emit_options(cli));
    write_artifact(&cli.output_dir, "types0.h", &model.types0)?;
    write_artifact(&cli.output_dir, "types1.h", &model.types1)?;
    write_artifact(&cli.output_dir, "declarations.h", &model.declarations)?;
    write_artifact(&cli.output_dir, "definitions.cpp", &model.definitions)?;
    write_artifact(&cli.output_dir, "fixed_parameters.cpp", &model.fixed_params)?;
    write_artifact(&cli.output_dir, "model_metrics.txt", &model_metrics_report(table, &resolve_diags))?;

    if !cli.suppress_metadata {
        let model_name = cli.model_name.as_deref().unwrap_or("Model");
        let info = ModelInfo {
            name: model_name,
            model_type: 0,
            version: "1.0",
            timestamp: "<generated>",
            default_lang_id: 0,
        };
        let holder = build(table, &info);
        let workset = build_workset(table, &cli.scenario_name);
        log::info!(
            "model digest {} ({} parameter(s) in workset '{}')",
            holder.model_dic.first().map(|r| r.digest.as_str()).unwrap_or(""),
            workset.entries.len(),
            workset.name,
        );

        let sql_dir = cli.sql_dir.clone().unwrap_or_else(|| cli.output_dir.clone());
        fs::create_dir_all(&sql_dir)?;
        write_artifact(
            &sql_dir,
            &format!("{model_name}.sql"),
            "-- SQL schema/database generation is out of this compiler's scope; \
             this file records only the model digest for downstream tooling.\n",
        )?;

        let messages_dir = cli.doc_dir.clone().unwrap_or_else(|| cli.output_dir.clone());
        fs::create_dir_all(&messages_dir)?;
        write_artifact(
            &messages_dir,
            &format!("{}.message.ini", cli.message_lang),
            &format!("[Messages]\n; externalizable runtime messages for {model_name}\n"),
        )?;
    }

    if cli.emit_doc || cli.emit_doc_md {
        let doc_dir = cli.doc_dir.clone().unwrap_or_else(|| cli.output_dir.clone());
        fs::create_dir_all(&doc_dir)?;
        if cli.emit_doc {
            write_artifact(
                &doc_dir,
                "model.html",
                "<!-- model documentation rendering is out of this compiler's scope -->\n",
            )?;
        }
        if cli.emit_doc_md {
            write_artifact(
                &doc_dir,
                "model.md",
                "<!-- model documentation rendering is out of this compiler's scope -->\n",
            )?;
        }
    }

    Ok(Outcome {
        diagnostics: resolve_diags,
        exit_code: 0,
    })
}

/// A plain-text symbol-count summary written on every run, independent of
/// `--suppress-metadata` (which only gates the relational SQL/metadata
/// artifacts, not this report).
fn model_metrics_report(table: &SymbolTable, diags: &Diagnostics) -> String {
    let c = &table.collections;
    format!(
        "model metrics\n\
         enumerations:      {}\n\
         parameters:        {}\n\
         parameter groups:  {}\n\
         tables:            {}\n\
         table groups:      {}\n\
         entities:          {}\n\
         entity sets:       {}\n\
         attribute groups:  {}\n\
         languages:         {}\n\
         errors:            {}\n\
         warnings:          {}\n",
        c.all_enumerations.len(),
        c.all_parameters.len(),
        c.all_parameter_groups.len(),
        c.all_tables.len(),
        c.all_table_groups.len(),
        c.all_entities.len(),
        c.all_entity_sets.len(),
        c.all_attribute_groups.len(),
        c.all_languages.len(),
        diags.error_count(),
        diags.warning_count(),
    )
}

fn write_artifact(dir: &Path, name: &str, content: &str) -> std::io::Result<()> {
    fs::write(dir.join(name), content)
}
