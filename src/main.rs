// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::Parser;
use phrasematch::{DocId, IndexReader, Query, SearchOptions, Searcher};
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

mod cli;
use cli::{display, Cli, Commands, PhraseArgs};

/// Log to stderr, honoring `RUST_LOG` (default `info`). Stdout carries only
/// results.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            phrase,
            limit,
            min_score,
            json,
        } => run_search(&phrase, limit, min_score, json),
        Commands::Explain { phrase, doc } => run_explain(&phrase, DocId(doc)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_search(args: &PhraseArgs, limit: usize, min_score: f32, json: bool) -> Result<()> {
    let (index, phrase) = args.load()?;
    let shown = phrase.to_string();
    let options = SearchOptions {
        limit,
        min_score,
        filter: None,
    };

    let hits = Searcher::new(&index).search(Query::Phrase(phrase), &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    display::section_top(&format!("{} hits", hits.len()));
    display::field_row("query", &shown);
    for (rank, hit) in hits.iter().enumerate() {
        display::row(&format!(
            "{:>3}. doc {:<8} {}",
            rank + 1,
            hit.doc.get(),
            display::score(hit.score)
        ));
    }
    display::section_bot();
    Ok(())
}

fn run_explain(args: &PhraseArgs, doc: DocId) -> Result<()> {
    let (index, phrase) = args.load()?;
    if doc.as_usize() >= index.num_docs() {
        anyhow::bail!("doc {} out of range (corpus has {} documents)", doc, index.num_docs());
    }

    let searcher = Searcher::new(&index);
    let mut query = searcher.prepare(Query::Phrase(phrase.clone()))?;
    query.execute(&index, None)?;

    display::section_top(&format!("doc {}", doc));
    display::field_row("phrase", &phrase.to_string());
    display::field_row("prepared", &query.to_string());
    display::field_row("candidate", &query.matched_docs().contains(&doc).to_string());
    if let Query::Phrase(prepared) = &query {
        let freq = prepared.phrase_freq(doc, index.similarity());
        display::field_row("phrase freq", &format!("{:.4}", freq));
        if let Some(field) = prepared.field() {
            display::field_row("norm", &format!("{:.4}", index.norm(doc, field)?));
        }
    }
    display::field_row("score", &display::score(query.score(doc, &index)?));
    display::section_bot();
    Ok(())
}
