//! Parser for the context-table language.
//!
//! The accepted textual form is a sequence of records `object : attr attr …
//! ;` with `#`, `--` and `%` line comments (grammar in `tabula.pest`). A
//! blank attribute list is allowed; repeating an object name accumulates
//! further attributes onto the same object. [`parse_table`] yields the raw
//! `(object, attributes)` records; [`build_context`] folds such records into
//! a [`Context`] over the distinct names in insertion order, and
//! [`read_context`] chains the two.

use crate::context::Context;
use crate::error::{Result, TrellisError};
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

#[derive(Parser)]
#[grammar = "tabula.pest"]
struct TabulaParser;

/// One parsed record: an object name and its attribute names.
pub type Record = (String, Vec<String>);

/// Parse a context table into its records, in input order.
pub fn parse_table(input: &str) -> Result<Vec<Record>> {
    let pairs = TabulaParser::parse(Rule::table, input).map_err(|e| {
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };
        TrellisError::Parse {
            message: e.variant.message().to_string(),
            line: Some(line),
            col: Some(col),
        }
    })?;
    let mut records = Vec::new();
    for record in pairs {
        match record.as_rule() {
            Rule::record => {
                let mut names = record.into_inner().map(|p| p.as_str().to_string());
                let object = names.next().ok_or_else(|| TrellisError::Parse {
                    message: "record without object name".into(),
                    line: None,
                    col: None,
                })?;
                records.push((object, names.collect()));
            }
            Rule::EOI => (),
            _ => (),
        }
    }
    debug!(records = records.len(), "context table parsed");
    Ok(records)
}

/// Build a context from parsed records. Domains are the distinct object and
/// attribute names in insertion order; every `(object, attribute)` occurrence
/// is related.
pub fn build_context(records: &[Record]) -> Result<Context<String, String>> {
    let mut objects = Vec::new();
    let mut attributes = Vec::new();
    for (object, attrs) in records {
        objects.push(object.clone());
        attributes.extend(attrs.iter().cloned());
    }
    let mut context = Context::make(objects, attributes)?;
    for (object, attrs) in records {
        for attribute in attrs {
            context = context.relate(object, attribute)?;
        }
    }
    Ok(context)
}

/// Parse a context table and build the context it describes.
pub fn read_context(input: &str) -> Result<Context<String, String>> {
    build_context(&parse_table(input)?)
}
