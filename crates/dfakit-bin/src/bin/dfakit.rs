use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dfakit::{dot, Dfa, Operation};
use dfakit_bin::{files, report::compare_minimization, xor::xor_definition};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Product construction and minimization of DFAs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Union or intersection of two DFAs over the same alphabet
    Product {
        #[arg(long)]
        dfa1: PathBuf,

        #[arg(long)]
        dfa2: PathBuf,

        /// `union` or `intersection`
        #[arg(long)]
        operation: Operation,

        /// String to run through the resulting DFA
        #[arg(long, visible_alias = "testString")]
        test_string: Option<String>,

        /// Drop states unreachable from the start state
        #[arg(long, default_value_t = false)]
        prune: bool,

        #[arg(long, default_value_t = false)]
        minimize: bool,

        #[arg(short, long, default_value = "dfa/dfa.json")]
        output: PathBuf,

        /// Also write the result as a Graphviz graph
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Minimize a single DFA
    Minimize {
        #[arg(long)]
        dfa: PathBuf,

        #[arg(long, default_value_t = false)]
        prune: bool,

        #[arg(short, long, default_value = "dfa/dfa_min.json")]
        output: PathBuf,

        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Check which inputs a DFA accepts
    Accepts {
        #[arg(long)]
        dfa: PathBuf,

        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Build the XOR DFA from previously saved union and intersection DFAs
    Xor {
        #[arg(long)]
        union: PathBuf,

        #[arg(long)]
        intersection: PathBuf,

        #[arg(short, long, default_value = "dfa/dfa_xor.json")]
        output: PathBuf,
    },

    /// Report how minimization shrinks the union and intersection of two DFAs
    Compare {
        #[arg(long)]
        dfa1: PathBuf,

        #[arg(long)]
        dfa2: PathBuf,

        /// File with one input per line; acceptance over them is timed
        /// before and after minimization
        #[arg(long)]
        inputs: Option<PathBuf>,

        /// Passes over the inputs per measurement
        #[arg(long, default_value_t = 100)]
        rounds: usize,
    },
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "accepted"
    } else {
        "rejected"
    }
}

fn reduce(dfa: Dfa, prune: bool, minimize: bool) -> Dfa {
    let dfa = if prune { Dfa::prune_unreachable(&dfa) } else { dfa };
    if minimize {
        let minimized = Dfa::minimize(&dfa);
        info!("minimization: {} -> {} states", dfa.num_states(), minimized.num_states());
        minimized
    } else {
        dfa
    }
}

fn save(dfa: &Dfa, output: &Path, dot_path: Option<&Path>) -> Result<()> {
    files::save_definition(output, &dfa.to_definition())?;
    println!("DFA with {} states saved to {}", dfa.num_states(), output.display());

    if let Some(dot_path) = dot_path {
        files::write_output(dot_path, &dot::to_dot(dfa))?;
        println!("Graph saved to {}", dot_path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Product {
            dfa1,
            dfa2,
            operation,
            test_string,
            prune,
            minimize,
            output,
            dot,
        } => {
            let l1 = files::load_dfa(&dfa1)?;
            let l2 = files::load_dfa(&dfa2)?;
            let result = Dfa::product(&l1, &l2, operation).with_context(|| {
                format!("Cannot build the {} of {} and {}", operation, dfa1.display(), dfa2.display())
            })?;
            info!("{} has {} states", operation, result.num_states());

            let result = reduce(result, prune, minimize);
            save(&result, &output, dot.as_deref())?;

            match test_string {
                Some(input) => println!(
                    "\nString '{}' is {} by the resulting DFA.",
                    input,
                    verdict(result.accepts(&input))
                ),
                None => println!("\nNo test string provided."),
            }
        }
        Command::Minimize {
            dfa,
            prune,
            output,
            dot,
        } => {
            let source = files::load_dfa(&dfa)?;
            let result = reduce(source.clone(), prune, true);
            println!(
                "Number of states before minimization = {}\nNumber of states after minimization = {}",
                source.num_states(),
                result.num_states()
            );
            save(&result, &output, dot.as_deref())?;
        }
        Command::Accepts { dfa, inputs } => {
            let dfa = files::load_dfa(&dfa)?;
            for input in inputs {
                println!("String '{}' is {}.", input, verdict(dfa.accepts(&input)));
            }
        }
        Command::Xor {
            union,
            intersection,
            output,
        } => {
            let union = files::load_definition(&union)?;
            let intersection = files::load_definition(&intersection)?;
            let xor = xor_definition(&union, &intersection);
            files::save_definition(&output, &xor)?;
            println!("XOR DFA saved to {}", output.display());
        }
        Command::Compare {
            dfa1,
            dfa2,
            inputs,
            rounds,
        } => {
            let l1 = files::load_dfa(&dfa1)?;
            let l2 = files::load_dfa(&dfa2)?;
            let inputs = match inputs {
                Some(path) => files::load_inputs(&path)?,
                None => Vec::new(),
            };

            for report in compare_minimization(&l1, &l2, &inputs, rounds)? {
                println!(
                    "{}: {} states before minimization, {} after ({:.2}% change)",
                    report.operation,
                    report.states_before,
                    report.states_after,
                    report.percent_change()
                );
                if let Some(timing) = report.timing {
                    println!(
                        "{}: {:?} to decide {} inputs before minimization, {:?} after",
                        report.operation,
                        timing.before,
                        inputs.len() * rounds,
                        timing.after
                    );
                    match timing.percent_change() {
                        Some(change) => println!("Percent change = {:.2}%", change),
                        None => println!("Percent change unavailable, runs were too fast to measure"),
                    }
                }
            }
        }
    }

    Ok(())
}
