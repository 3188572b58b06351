//! Command implementations: thin glue from CLI arguments to core operations.
//!
//! Nothing here transforms data itself; every command loads a model, calls
//! one core operation and renders or writes the result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use tabula_codec::{
    display_rows, element_to_json_like, normalize_quotes, parse_delimited, parse_json, parse_xml,
    project_to_table, sanitize, serialize_delimited, serialize_json, serialize_xml, table_to_json,
    table_to_xml, write_table_sheet, TextSheet,
};
use tabula_model::{Delimiter, JsonTree, NodeId, NodeKind, Session, Table};
use tabula_query::{QueryKind, emit_query, emit_script};
use tabula_transform::{
    FilterOp, FilterSpec, ReplaceMode, SortOrder, apply_filter, batch_replace, filter_view,
    sort_rows,
};

use crate::cli::{
    ConvertArgs, EditJsonArgs, EditXmlArgs, ExportSqlArgs, FilterArgs, FilterOpArg, FixXmlArgs,
    JsonEditAction, PreviewArgs, QueryKindArg, ReplaceArgs, SortArgs, SqlArgs, TargetFormat,
};
use crate::render::render_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Delimited,
    Json,
    Xml,
}

fn detect_format(path: &Path) -> SourceFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => SourceFormat::Json,
        Some("xml") => SourceFormat::Xml,
        _ => SourceFormat::Delimited,
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn emit(text: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => write_output(path, text),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// Load any supported input into the table model. XML loads as the node/value
/// display projection of the root element.
fn load_table(path: &Path, session: &Session) -> Result<(Table, SourceFormat)> {
    let text = read_input(path)?;
    let format = detect_format(path);
    let table = match format {
        SourceFormat::Delimited => parse_delimited(&text, &session.delimiter)?,
        SourceFormat::Json => project_to_table(&parse_json(&text)?)?,
        SourceFormat::Xml => {
            let doc = parse_xml(&sanitize(&text))?;
            display_rows(&doc.root, true)
        }
    };
    info!(
        rows = table.row_count(),
        columns = table.headers.len(),
        "loaded {}",
        path.display()
    );
    Ok((table, format))
}

/// Write a table back in the format implied by the target path's extension.
fn save_table(table: &Table, path: &Path, session: &Session) -> Result<()> {
    let text = match detect_format(path) {
        SourceFormat::Delimited => serialize_delimited(table, &session.delimiter),
        SourceFormat::Json => serialize_json(&table_to_json(table), true),
        SourceFormat::Xml => table_to_xml(table)?,
    };
    write_output(path, &text)
}

fn column_index(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| anyhow!("unknown column: {name}"))
}

pub fn run_preview(args: &PreviewArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (table, _) = load_table(&args.input, &session)?;
    let shown = args.limit.unwrap_or(table.row_count()).min(table.row_count());
    println!("{}", render_table(&table, shown));
    println!("{} of {} rows", shown, table.row_count());
    Ok(())
}

pub fn run_convert(args: &ConvertArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let source_format = detect_format(&args.input);
    let text = match args.to {
        TargetFormat::Csv => {
            let (table, _) = load_table(&args.input, &session)?;
            let delimiter = args
                .output_delimiter
                .as_deref()
                .map_or_else(|| session.delimiter.clone(), Delimiter::parse);
            serialize_delimited(&table, &delimiter)
        }
        TargetFormat::Json => match source_format {
            // re-format the document itself rather than projecting it
            SourceFormat::Json => serialize_json(&parse_json(&read_input(&args.input)?)?, true),
            SourceFormat::Xml => {
                let doc = parse_xml(&sanitize(&read_input(&args.input)?))?;
                element_to_json_like(&doc.root)
            }
            SourceFormat::Delimited => {
                let (table, _) = load_table(&args.input, &session)?;
                serialize_json(&table_to_json(&table), true)
            }
        },
        TargetFormat::Xml => match source_format {
            SourceFormat::Xml => {
                serialize_xml(&parse_xml(&sanitize(&read_input(&args.input)?))?)?
            }
            _ => {
                let (table, _) = load_table(&args.input, &session)?;
                table_to_xml(&table)?
            }
        },
        TargetFormat::Sql => {
            let (table, format) = load_table(&args.input, &session)?;
            // JSON-sourced exports historically carried a surrogate key
            emit_script(&table, &session.table_name, format == SourceFormat::Json)
        }
        TargetFormat::Sheet => {
            let (table, _) = load_table(&args.input, &session)?;
            let mut sheet = TextSheet::new();
            write_table_sheet(&table, &mut sheet)?;
            sheet.into_text()
        }
    };
    emit(&text, args.output.as_ref())
}

pub fn run_sql(args: &SqlArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (table, _) = load_table(&args.input, &session)?;
    let kind = match args.kind {
        QueryKindArg::Select => QueryKind::Select,
        QueryKindArg::Insert => QueryKind::Insert,
        QueryKindArg::Update => QueryKind::Update,
        QueryKindArg::Delete => QueryKind::Delete,
    };
    println!("{}", emit_query(kind, &table, args.row, &session.table_name));
    Ok(())
}

pub fn run_export_sql(args: &ExportSqlArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (table, format) = load_table(&args.input, &session)?;
    let script = emit_script(&table, &session.table_name, format == SourceFormat::Json);
    emit(&script, args.output.as_ref())
}

pub fn run_filter(args: &FilterArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (mut table, _) = load_table(&args.input, &session)?;
    let op = match args.op {
        FilterOpArg::Contains => FilterOp::Contains,
        FilterOpArg::Equals => FilterOp::Equals,
        FilterOpArg::StartsWith => FilterOp::StartsWith,
        FilterOpArg::EndsWith => FilterOp::EndsWith,
        FilterOpArg::IsEmpty => FilterOp::IsEmpty,
        FilterOpArg::IsNotEmpty => FilterOp::IsNotEmpty,
    };
    let spec = FilterSpec::new(column_index(&table, &args.column)?, op, args.value.clone());

    if args.apply {
        let removed = apply_filter(&mut table, &spec);
        let target = args.output.as_deref().unwrap_or(&args.input);
        save_table(&table, target, &session)?;
        println!("Kept {} rows, removed {}", table.row_count(), removed);
        return Ok(());
    }

    // default: view only, the working data stays intact
    let matches = filter_view(&table, &spec);
    let mut view = Table::new(table.headers.clone());
    for index in &matches {
        view.push_row(table.rows[*index].clone());
    }
    println!("{}", render_table(&view, view.row_count()));
    println!("{} of {} rows match", matches.len(), table.row_count());
    Ok(())
}

pub fn run_sort(args: &SortArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (mut table, _) = load_table(&args.input, &session)?;
    let column = column_index(&table, &args.column)?;
    let order = if args.desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    sort_rows(&mut table, column, order);
    let target = args.output.as_deref().unwrap_or(&args.input);
    save_table(&table, target, &session)?;
    println!(
        "Sorted {} rows by {} ({})",
        table.row_count(),
        args.column,
        if args.desc { "descending" } else { "ascending" }
    );
    Ok(())
}

pub fn run_replace(args: &ReplaceArgs, session: &Session) -> Result<()> {
    let session = session.clone().with_source(args.input.clone());
    let (mut table, _) = load_table(&args.input, &session)?;
    let column = column_index(&table, &args.column)?;
    let mode = if args.regex {
        ReplaceMode::Pattern {
            case_insensitive: args.ignore_case,
        }
    } else {
        ReplaceMode::Literal {
            case_insensitive: args.ignore_case,
        }
    };
    let changed = batch_replace(&mut table, column, &args.search, &args.replacement, mode)?;
    let target = args.output.as_deref().unwrap_or(&args.input);
    save_table(&table, target, &session)?;
    println!("Updated {changed} rows");
    Ok(())
}

pub fn run_fix_xml(args: &FixXmlArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let mut doc = parse_xml(&sanitize(&text))?;
    normalize_quotes(&mut doc);
    let target = args.output.as_deref().unwrap_or(&args.input);
    write_output(target, &serialize_xml(&doc)?)?;
    println!("Cleaned {}", args.input.display());
    Ok(())
}

pub fn run_edit_json(args: &EditJsonArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let mut tree = JsonTree::from_value(&parse_json(&text)?);
    let target = resolve_json_path(&tree, &args.path)?;

    match &args.action {
        JsonEditAction::Set { value } => tree.edit_value(target, value)?,
        JsonEditAction::Remove => tree.remove(target)?,
        JsonEditAction::Add { key, value } => {
            let value = parse_json(value).with_context(|| format!("parse value {value:?}"))?;
            tree.insert(target, key.as_deref(), &value)?;
        }
        JsonEditAction::AddObject { key } => {
            tree.insert_object(target, key.as_deref())?;
        }
        JsonEditAction::AddArray { key } => {
            tree.insert_array(target, key.as_deref())?;
        }
    }

    let output = args.output.as_deref().unwrap_or(&args.input);
    write_output(output, &serialize_json(&tree.to_value(), true))
}

/// Resolve `items/0/qty`-style paths: object children by key, array children
/// by index. The empty path selects the root.
fn resolve_json_path(tree: &JsonTree, path: &str) -> Result<NodeId> {
    let mut current = tree.root();
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        let next = match tree.kind(current) {
            NodeKind::Object => tree
                .children(current)
                .iter()
                .copied()
                .find(|child| tree.label(*child) == segment),
            NodeKind::Array => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| tree.children(current).get(index).copied()),
            _ => None,
        };
        current = next.ok_or_else(|| anyhow!("node not found: {path}"))?;
    }
    Ok(current)
}

pub fn run_edit_xml(args: &EditXmlArgs) -> Result<()> {
    if args.set_attr.is_none() && args.set_text.is_none() {
        bail!("nothing to do: pass --set-attr and/or --set-text");
    }
    let text = read_input(&args.input)?;
    let mut doc = parse_xml(&sanitize(&text))?;

    if let Some(assignment) = &args.set_attr {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("--set-attr expects NAME=VALUE"))?;
        doc.set_attribute(&args.path, name, value)?;
    }
    if let Some(content) = &args.set_text {
        doc.set_element_text(&args.path, content)?;
    }

    let output = args.output.as_deref().unwrap_or(&args.input);
    write_output(output, &serialize_xml(&doc)?)
}
