//! Command-line shell around the trellis core: reads a context table, runs
//! the selected analysis and prints textual or JSON records. All core errors
//! are caught here and turned into a diagnostic with a non-zero exit code.

use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use trellis::bitset::{Bitset, Element};
use trellis::error::TrellisError;
use trellis::mining::{self, Independence, MinerOptions, Rule, Violation};
use trellis::{dot, fca, tabula};

#[derive(Parser, Debug)]
#[command(name = "trellis", version, about = "Concept lattices and association rules over binary relations")]
struct Args {
    /// Context table file; standard input when omitted.
    file: Option<PathBuf>,

    /// List every concept of the lattice (default mode).
    #[arg(long)]
    concepts: bool,

    /// Print the number of concepts.
    #[arg(long)]
    size: bool,

    /// Emit the lattice as a DOT digraph.
    #[arg(long)]
    dot: bool,

    /// Mine rules.
    #[arg(long)]
    rules: bool,

    /// Mine rule violations.
    #[arg(long)]
    flaws: bool,

    /// Mine independent attribute groups.
    #[arg(long)]
    indep: bool,

    /// Prune concepts with fewer objects.
    #[arg(long, default_value_t = 2)]
    min_support: usize,

    /// Lower bound on violation confidence.
    #[arg(long, default_value_t = 0.9)]
    min_confidence: f64,

    /// Upper bound on attributes added per violation.
    #[arg(long, default_value_t = 1)]
    max_diff: usize,

    /// Minimum attributes per emitted rule.
    #[arg(long, default_value_t = 1)]
    min_rhs: usize,

    /// Upper bound on confidence in independent-rule mode.
    #[arg(long, default_value_t = 0.1)]
    max_confidence: f64,

    /// Minimum attributes in independent-rule mode.
    #[arg(long, default_value_t = 2)]
    min_width: usize,

    /// Emit JSON records instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ConceptRecord {
    objects: Vec<String>,
    attributes: Vec<String>,
}

#[derive(Serialize)]
struct RuleRecord {
    support: usize,
    rhs: Vec<String>,
    objects: Vec<String>,
}

#[derive(Serialize)]
struct ViolationRecord {
    confidence: f64,
    gap: usize,
    flaws: Vec<String>,
    rule: RuleRecord,
    weaker: RuleRecord,
}

fn strings<T: Element>(set: &Bitset<T>) -> Vec<String> {
    set.elements().into_iter().map(|e| e.to_string()).collect()
}

fn rule_record<X: Element, Y: Element>(rule: &Rule<X, Y>) -> RuleRecord {
    RuleRecord {
        support: rule.support_count(),
        rhs: strings(&rule.rhs),
        objects: strings(&rule.support),
    }
}

fn violation_record<X: Element, Y: Element>(v: &Violation<X, Y>) -> ViolationRecord {
    ViolationRecord {
        confidence: v.confidence(),
        gap: v.gap(),
        flaws: strings(v.exceptions()),
        rule: rule_record(&v.rule),
        weaker: rule_record(&v.flaw),
    }
}

fn print_json<T: Serialize>(records: &T) -> trellis::Result<()> {
    let rendered = serde_json::to_string_pretty(records)
        .map_err(|e| TrellisError::Input(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn run(args: &Args) -> trellis::Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let context = tabula::read_context(&input)?;
    info!(
        objects = context.object_count(),
        attributes = context.attribute_count(),
        "context loaded"
    );

    let options = MinerOptions {
        min_support: args.min_support,
        min_confidence: args.min_confidence,
        max_diff: args.max_diff,
        min_rhs: args.min_rhs,
        max_confidence: args.max_confidence,
        min_width: args.min_width,
    };

    if args.concepts {
        report_concepts(&context, args.json)
    } else if args.dot {
        print!("{}", dot::dot_graph(&context)?);
        Ok(())
    } else if args.size {
        println!("{}", fca::size(&context)?);
        Ok(())
    } else if args.rules {
        let rules = mining::rules(&context, &options)?;
        info!(rules = rules.len(), "mining complete");
        if args.json {
            print_json(&rules.iter().map(rule_record).collect::<Vec<_>>())
        } else {
            for rule in &rules {
                println!("{rule}");
            }
            Ok(())
        }
    } else if args.flaws {
        let violations = mining::flaws(&context, &options)?;
        info!(violations = violations.len(), "mining complete");
        if args.json {
            print_json(&violations.iter().map(violation_record).collect::<Vec<_>>())
        } else {
            for violation in &violations {
                println!("{violation}");
            }
            Ok(())
        }
    } else if args.indep {
        let independents = mining::indep_rules(&context, &options)?;
        info!(independents = independents.len(), "mining complete");
        if args.json {
            print_json(&independents.iter().map(violation_record).collect::<Vec<_>>())
        } else {
            for independent in &independents {
                println!("{}", Independence(independent));
            }
            Ok(())
        }
    } else {
        report_concepts(&context, args.json)
    }
}

fn report_concepts(
    context: &trellis::context::Context<String, String>,
    json: bool,
) -> trellis::Result<()> {
    let concepts = fca::concepts(context)?;
    info!(concepts = concepts.len(), "lattice enumerated");
    if json {
        let records: Vec<ConceptRecord> = concepts
            .iter()
            .map(|c| ConceptRecord {
                objects: strings(c.objects()),
                attributes: strings(c.attributes()),
            })
            .collect();
        print_json(&records)
    } else {
        for (n, concept) in concepts.iter().enumerate() {
            println!("{n}: {concept}");
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("trellis: {e}");
            ExitCode::FAILURE
        }
    }
}
