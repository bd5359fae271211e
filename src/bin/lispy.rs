use anyhow::Result;
use log::debug;
use lispy::evaluator::evaluate;
use lispy::parser::parse;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn main() -> Result<()> {
    env_logger::init();

    println!("~Lispy {}~", env!("CARGO_PKG_VERSION"));
    println!("Enter expressions like: + 1 (* 2 3)");
    println!("Type :help for more commands, or Ctrl+C to exit.");
    println!();

    let mut rl = DefaultEditor::new()?;
    let mut show_tree = false;

    loop {
        let line = match rl.readline(":>> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("Goodbye!");
                break;
            }
            Err(other) => Err(other)?,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        match line {
            ":help" => {
                print_help();
                continue;
            }
            ":tree" => {
                show_tree = !show_tree;
                println!(
                    "Parse tree printing {}",
                    if show_tree { "enabled" } else { "disabled" }
                );
                continue;
            }
            ":quit" | ":exit" => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }

        match parse(line) {
            Ok(tree) => {
                if show_tree {
                    print!("{}", tree.tree());
                    println!(
                        "({} nodes, {} leaves)",
                        tree.count_nodes(),
                        tree.count_leaves()
                    );
                }
                let value = evaluate(&tree);
                debug!("{line} => {value:?}");
                println!("{value}");
            }
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  :help      - Show this help message");
    println!("  :tree      - Toggle printing the parse tree before each result");
    println!("  :quit      - Exit the interpreter");
    println!("  :exit      - Exit the interpreter");
    println!("  Ctrl+C/D   - Exit the interpreter");
    println!();
    println!("Syntax:");
    println!("  Top level: an operator and its operands, no parentheses: + 1 2");
    println!("  Nested:    parenthesized:                                * 2 (- 10 4)");
    println!("  Numbers:   integers, optionally negative: 42, -5");
    println!();
    println!("Operators (symbol or word):");
    for def in lispy::operators::operators() {
        match def.symbol {
            Some(symbol) => println!("  {symbol:<3} {}", def.word),
            None => println!("      {}", def.word),
        }
    }
    println!();
    println!("A single operand to - negates it: - 5");
    println!();
}
