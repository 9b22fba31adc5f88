use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use exprtree::config::EvalConfig;
use exprtree::rules::RuleLoader;
use exprtree::tree::{EvalContext, Node, Value};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single tree file
    Eval {
        /// Path to the tree (.json or .yaml)
        #[arg(short, long)]
        file: String,

        /// Positional argument, repeatable; parsed as a JSON scalar or kept as text
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Placeholder prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },
    /// Evaluate a named rule from a rule set
    Rule {
        /// Path to the rule set (.json or .yaml)
        #[arg(short, long)]
        file: String,

        /// Rule name
        #[arg(short, long)]
        name: String,

        /// Positional argument, repeatable
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Placeholder prefix, overrides the rule set's own
        #[arg(short, long)]
        prefix: Option<String>,
    },
    /// Evaluate every rule in a rule set without arguments
    Check {
        /// Path to the rule set (.json or .yaml)
        #[arg(short, long)]
        file: String,
    },
    /// Re-serialize a tree file
    Convert {
        /// Path to the tree (.json or .yaml)
        #[arg(short, long)]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        to: Format,
    },
    /// Print the JSON Schema of the node interchange format
    Schema,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// `360` is an integer, `"360"` a string, `1.1.2` falls back to text
fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

fn flag_or_env_context(prefix: Option<String>) -> anyhow::Result<EvalContext> {
    let config = match prefix {
        Some(p) => EvalConfig::from_prefix(Some(p))?,
        None => EvalConfig::from_env()?,
    };
    Ok(config.context())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let loader = RuleLoader::new();

    match args.command {
        Commands::Eval { file, args, prefix } => {
            let ctx = flag_or_env_context(prefix)?;
            let tree = loader
                .load_tree(&file)
                .with_context(|| format!("failed to load tree from {}", file))?;
            let values: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();

            log::info!("Evaluating {} with {} args", file, values.len());
            let result = tree.evaluate_with(&ctx, &values)?;
            println!("{}", result);
        }
        Commands::Rule {
            file,
            name,
            args,
            prefix,
        } => {
            let set = loader
                .load_rule_set(&file)
                .with_context(|| format!("failed to load rule set from {}", file))?;
            let ctx = match prefix {
                Some(p) => flag_or_env_context(Some(p))?,
                None => set.context(&flag_or_env_context(None)?)?,
            };
            let values: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();

            log::info!("Evaluating rule {} from {}", name, set.name);
            let result = set.evaluate(&name, &ctx, &values)?;
            println!("{}", result);
        }
        Commands::Check { file } => {
            let set = loader
                .load_rule_set(&file)
                .with_context(|| format!("failed to load rule set from {}", file))?;
            let ctx = set.context(&flag_or_env_context(None)?)?;

            let mut failures = 0;
            for rule in &set.rules {
                match rule.tree.evaluate_with(&ctx, &[]) {
                    Ok(value) => println!("{}: {}", rule.name, value),
                    Err(e) => {
                        failures += 1;
                        println!("{}: error: {}", rule.name, e);
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{} of {} rules failed", failures, set.rules.len());
            }
        }
        Commands::Convert { file, to } => {
            let tree = loader
                .load_tree(&file)
                .with_context(|| format!("failed to load tree from {}", file))?;
            let out = match to {
                Format::Json => tree.to_json_pretty()?,
                Format::Yaml => tree.to_yaml()?,
            };
            println!("{}", out.trim_end());
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(Node);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
