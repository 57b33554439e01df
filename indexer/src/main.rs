use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use sitesearch::{Bm25Params, Engine, EngineConfig, Ingested, LoadOutcome, StopWords, SynonymTable, TracingObserver};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    title: String,
    body: String,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query full-text search snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Tables {
    /// JSON object mapping words to synonym lists (defaults to the built-in English table)
    #[arg(long)]
    synonyms: Option<PathBuf>,
    /// JSON array of stop words (defaults to the built-in English list)
    #[arg(long)]
    stop_words: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a snapshot from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output snapshot file
        #[arg(long)]
        output: String,
        /// BM25 term frequency saturation
        #[arg(long, default_value_t = 1.5)]
        k1: f64,
        /// BM25 length normalization
        #[arg(long, default_value_t = 0.75)]
        b: f64,
        /// Replace documents whose id was already ingested instead of keeping both
        #[arg(long, default_value_t = false)]
        upsert: bool,
        #[command(flatten)]
        tables: Tables,
    },
    /// Run a query against a snapshot and print hits as JSON lines
    Search {
        /// Snapshot file
        #[arg(long)]
        index: String,
        #[arg(long)]
        query: String,
        /// Maximum number of hits to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[command(flatten)]
        tables: Tables,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, k1, b, upsert, tables } => {
            let config = engine_config(&tables, Bm25Params { k1, b })?;
            build_index(&input, &output, config, upsert)
        }
        Commands::Search { index, query, limit, tables } => {
            let config = engine_config(&tables, Bm25Params::default())?;
            run_search(&index, &query, limit, config)
        }
    }
}

fn engine_config(tables: &Tables, params: Bm25Params) -> Result<EngineConfig> {
    let mut config = EngineConfig { params, ..EngineConfig::default() };
    if let Some(path) = &tables.synonyms {
        config.synonyms = Arc::new(SynonymTable::load_json(path)?);
    }
    if let Some(path) = &tables.stop_words {
        config.stop_words = Arc::new(StopWords::load_json(path)?);
    }
    Ok(config)
}

fn build_index(input: &str, output: &str, config: EngineConfig, upsert: bool) -> Result<()> {
    let input_path = Path::new(input);
    let mut engine = Engine::new(config);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input path {input} does not exist");
    }

    let mut replaced = 0usize;
    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        tracing::debug!(file = %file.display(), docs = docs.len(), "read input file");
        for doc in docs {
            if upsert {
                if let Ingested::Replaced(_) = engine.upsert_document(&doc.id, &doc.title, &doc.body) {
                    replaced += 1;
                }
            } else {
                engine.add_document(&doc.id, &doc.title, &doc.body);
            }
        }
    }

    tracing::info!(num_docs = engine.len(), replaced, num_terms = engine.vocabulary_size(), "ingested documents");
    engine.save(output)?;
    tracing::info!(output, "index build complete");
    Ok(())
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<InputDoc>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

fn run_search(index: &str, query: &str, limit: usize, config: EngineConfig) -> Result<()> {
    let mut engine = Engine::new(config).with_observer(Arc::new(TracingObserver));
    if engine.load(index)? == LoadOutcome::Missing {
        bail!("no snapshot found at {index}");
    }
    let hits = engine.search(query);
    tracing::info!(query, total_hits = hits.len(), "search complete");
    for hit in hits.iter().take(limit) {
        println!("{}", serde_json::to_string(hit)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_corpus(dir: &Path) {
        fs::write(
            dir.join("a.jsonl"),
            "{\"id\":\"doc1\",\"title\":\"Apple\",\"body\":\"A red fruit.\"}\n\n\
             {\"id\":\"doc2\",\"title\":\"Banana\",\"body\":\"A red fruit, like an Apple.\"}\n",
        )
        .unwrap();
        fs::write(
            dir.join("b.json"),
            r#"[{"id": "doc1", "title": "Cherry", "body": "A small red fruit."}]"#,
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
    }

    #[test]
    fn builds_snapshot_from_directory() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_corpus(input.path());
        let output = out.path().join("index.json");

        build_index(input.path().to_str().unwrap(), output.to_str().unwrap(), EngineConfig::default(), false).unwrap();

        let mut engine = Engine::default();
        assert_eq!(engine.load(&output).unwrap(), LoadOutcome::Loaded);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.search("apple")[0].id, "doc1");
    }

    #[test]
    fn upsert_collapses_repeated_ids() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_corpus(input.path());
        let output = out.path().join("index.json");

        build_index(input.path().to_str().unwrap(), output.to_str().unwrap(), EngineConfig::default(), true).unwrap();

        let mut engine = Engine::default();
        engine.load(&output).unwrap();
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.get("doc1").unwrap().title, "Cherry");
    }

    #[test]
    fn missing_input_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("index.json");
        assert!(build_index("/definitely/not/here", output.to_str().unwrap(), EngineConfig::default(), false).is_err());
    }
}
